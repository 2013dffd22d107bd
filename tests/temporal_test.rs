// ABOUTME: Tests for temporal context derivation and learned user time patterns
// ABOUTME: Meal periods, seasons, fixed clocks and cuisine preferences per day type and season
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

mod helpers;

use chrono::{Timelike, Weekday};
use helpers::fixtures::*;
use pierre_recipe_ranker::intelligence::temporal::{
    Clock, FixedClock, MealPeriod, Season, TemporalContext, UserTemporalPatterns,
};
use pierre_recipe_ranker::models::{InteractionKind, UserBehaviorData};

#[test]
fn test_meal_period_boundaries() {
    let cases = [
        (4, MealPeriod::LateNight),
        (5, MealPeriod::Breakfast),
        (10, MealPeriod::Breakfast),
        (11, MealPeriod::Lunch),
        (14, MealPeriod::Lunch),
        (15, MealPeriod::Snack),
        (16, MealPeriod::Snack),
        (17, MealPeriod::Dinner),
        (21, MealPeriod::Dinner),
        (22, MealPeriod::LateNight),
        (0, MealPeriod::LateNight),
    ];
    for (hour, expected) in cases {
        assert_eq!(MealPeriod::from_hour(hour), expected, "hour {hour}");
    }
}

#[test]
fn test_season_from_month() {
    assert_eq!(Season::from_month(1), Season::Winter);
    assert_eq!(Season::from_month(3), Season::Spring);
    assert_eq!(Season::from_month(6), Season::Summer);
    assert_eq!(Season::from_month(9), Season::Autumn);
    assert_eq!(Season::from_month(12), Season::Winter);
}

#[test]
fn test_context_from_fixed_clock() {
    let clock = FixedClock(fixed_now());
    assert_eq!(clock.now(), fixed_now());

    let ctx = TemporalContext::now(&clock);
    assert_eq!(ctx.hour, 12);
    assert_eq!(ctx.weekday, Weekday::Wed);
    assert_eq!(ctx.month, 6);
    assert!(!ctx.is_weekend);
    assert_eq!(ctx.meal_period, MealPeriod::Lunch);
    assert_eq!(ctx.season, Season::Summer);
}

#[test]
fn test_weekend_detection() {
    // 2025-06-14 is a Saturday
    let ctx = TemporalContext::from_datetime(at(6, 14, 9));
    assert!(ctx.is_weekend);
    assert_eq!(ctx.meal_period, MealPeriod::Breakfast);
}

#[test]
fn test_at_hour_keeps_the_day() {
    let ctx = TemporalContext::from_datetime(fixed_now()).at_hour(19);
    assert_eq!(ctx.hour, 19);
    assert_eq!(ctx.timestamp.minute(), 0);
    assert_eq!(ctx.weekday, Weekday::Wed);
    assert_eq!(ctx.meal_period, MealPeriod::Dinner);

    let clamped = TemporalContext::from_datetime(fixed_now()).at_hour(40);
    assert_eq!(clamped.hour, 23);
}

#[test]
fn test_patterns_learn_from_positive_records_only() {
    let patterns = UserTemporalPatterns::learn(&behavior_history());

    assert_eq!(patterns.total_interactions, 5);
    assert_eq!(patterns.modal_hour(MealPeriod::Lunch), Some(12));
    assert_eq!(patterns.modal_hour(MealPeriod::Dinner), None);
    assert_eq!(patterns.period_share(MealPeriod::Lunch), 1.0);
    assert_eq!(patterns.period_share(MealPeriod::Dinner), 0.0);
    assert!(patterns.engaged_in_period(MealPeriod::Lunch, " JAPANESE "));
    assert!(!patterns.engaged_in_period(MealPeriod::Lunch, "French"));
}

#[test]
fn test_patterns_rank_cuisines_per_bucket() {
    let patterns = UserTemporalPatterns::learn(&behavior_history());

    assert_eq!(
        patterns.preferred_weekday_cuisines(),
        vec!["indian", "japanese", "mediterranean"]
    );
    assert_eq!(patterns.preferred_weekend_cuisines(), vec!["indian", "japanese"]);
    assert_eq!(
        patterns.preferred_season_cuisines(Season::Summer),
        vec!["indian", "japanese"]
    );
    assert_eq!(
        patterns.preferred_season_cuisines(Season::Spring),
        vec!["mediterranean"]
    );
    assert!(patterns.preferred_season_cuisines(Season::Winter).is_empty());

    assert!(patterns.prefers_on_day(true, "Japanese"));
    assert!(!patterns.prefers_on_day(true, "Mediterranean"));
    assert!(patterns.prefers_in_season(Season::Summer, "Indian"));
}

#[test]
fn test_modal_hour_prefers_earliest_on_ties() {
    let recipe = salmon_bowl();
    let behavior = UserBehaviorData::new(vec![
        interaction(InteractionKind::Liked, &recipe, at(6, 2, 19)),
        interaction(InteractionKind::Liked, &recipe, at(6, 3, 18)),
    ]);
    let patterns = UserTemporalPatterns::learn(&behavior);
    assert_eq!(patterns.modal_hour(MealPeriod::Dinner), Some(18));
}

#[test]
fn test_empty_history_learns_nothing() {
    let patterns = UserTemporalPatterns::learn(&UserBehaviorData::default());
    assert!(patterns.is_empty());
    assert_eq!(patterns.period_share(MealPeriod::Lunch), 0.0);
    assert!(patterns.preferred_weekday_cuisines().is_empty());
}

#[test]
fn test_leaving_a_record_out_matches_relearning() {
    let history = behavior_history();
    let patterns = UserTemporalPatterns::learn(&history);

    for (position, record) in history.interactions.iter().enumerate() {
        let others = UserBehaviorData::new(
            history
                .interactions
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != position)
                .map(|(_, r)| r.clone())
                .collect(),
        );
        assert_eq!(
            patterns.without(record),
            UserTemporalPatterns::learn(&others),
            "record {position}"
        );
    }
}

#[test]
fn test_forgetting_the_only_record_empties_the_patterns() {
    let record = interaction(InteractionKind::Liked, &salmon_bowl(), at(6, 10, 8));
    let patterns = UserTemporalPatterns::learn(&UserBehaviorData::new(vec![record.clone()]));
    assert_eq!(patterns.modal_hour(MealPeriod::Breakfast), Some(8));

    let forgotten = patterns.without(&record);
    assert!(forgotten.is_empty());
    assert_eq!(forgotten, UserTemporalPatterns::default());
}
