// ABOUTME: Tests for ingredient taxonomies: superfoods, dietary heuristics and ingredient keys
// ABOUTME: Covers word-boundary matching, exception phrases, markers and banned-term vetoes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pierre_recipe_ranker::intelligence::taxonomy::{
    detect_superfoods, find_banned_ingredient, first_violated, ingredient_key, ingredient_keys,
    ingredient_veto, line_violates, matched_superfoods, violates_restriction, IngredientVeto,
    PhraseMatcher,
};
use pierre_recipe_ranker::models::{DietaryRestriction, SuperfoodCategory, UserPreferences};
use std::collections::BTreeSet;

// ============================================================================
// Phrase Matching
// ============================================================================

#[test]
fn test_phrase_matcher_respects_word_boundaries() {
    let matcher = PhraseMatcher::new(&["nut", "olive oil"]);
    assert!(matcher.is_match("1 tbsp Olive Oil"));
    assert!(!matcher.is_match("1 cup coconut"));
    assert!(matcher.is_match("a nut or two"));
}

#[test]
fn test_empty_phrase_matcher_never_matches() {
    let matcher = PhraseMatcher::new(&[]);
    assert!(!matcher.is_match("anything"));
    assert_eq!(matcher.strip("anything"), "anything");
}

// ============================================================================
// Superfoods
// ============================================================================

#[test]
fn test_detect_superfoods_across_categories() {
    let found = detect_superfoods(&[
        "200 g salmon fillet",
        "2 cups baby spinach",
        "1 tbsp extra virgin olive oil",
    ]);
    let expected: BTreeSet<_> = [
        SuperfoodCategory::FattyFish,
        SuperfoodCategory::LeafyGreens,
        SuperfoodCategory::OliveOil,
    ]
    .into_iter()
    .collect();
    assert_eq!(found, expected);
}

#[test]
fn test_generic_words_are_not_superfoods() {
    let found = detect_superfoods(&["1 tsp black pepper", "2 vanilla beans", "1 cup olives"]);
    assert!(found.is_empty(), "unexpected categories: {found:?}");
}

#[test]
fn test_olive_garden_dressing_is_not_olive_oil() {
    let found = detect_superfoods(&["2 tbsp olive garden dressing"]);
    assert!(!found.contains(&SuperfoodCategory::OliveOil));
    assert!(found.is_empty(), "unexpected categories: {found:?}");

    let pepper = detect_superfoods(&["black pepper"]);
    assert!(!pepper.contains(&SuperfoodCategory::Beans));
}

#[test]
fn test_matched_superfoods_only_reports_preferred() {
    let preferred: BTreeSet<_> = [SuperfoodCategory::Berries].into_iter().collect();
    let matched = matched_superfoods(&["1 cup blueberries", "1 cup kale"], &preferred);
    assert_eq!(matched.into_iter().collect::<Vec<_>>(), vec![SuperfoodCategory::Berries]);

    let none = matched_superfoods(&["1 cup blueberries"], &BTreeSet::new());
    assert!(none.is_empty());
}

// ============================================================================
// Dietary Heuristics
// ============================================================================

#[test]
fn test_vegetarian_flags_meat_and_fish() {
    assert!(line_violates("2 chicken thighs", &DietaryRestriction::Vegetarian));
    assert!(line_violates("1 tbsp fish sauce", &DietaryRestriction::Vegetarian));
    assert!(!line_violates("1 cauliflower steak", &DietaryRestriction::Vegetarian));
    assert!(!line_violates("200 g tofu", &DietaryRestriction::Vegetarian));
}

#[test]
fn test_vegan_flags_dairy_eggs_and_honey() {
    let vegan = DietaryRestriction::Vegan;
    assert!(line_violates("2 eggs", &vegan));
    assert!(line_violates("1 tbsp honey", &vegan));
    assert!(line_violates("50 g parmesan", &vegan));
    assert!(!line_violates("1 can coconut milk", &vegan));
    assert!(!line_violates("2 tbsp peanut butter", &vegan));
    assert!(!line_violates("1 cup vegan mayo", &vegan));
}

#[test]
fn test_markers_clear_a_line() {
    assert!(!line_violates("1 cup dairy-free cheese", &DietaryRestriction::DairyFree));
    assert!(line_violates("1 cup cheese", &DietaryRestriction::DairyFree));
    assert!(!line_violates("2 slices gluten-free bread", &DietaryRestriction::GlutenFree));
    assert!(line_violates("2 slices bread", &DietaryRestriction::GlutenFree));
}

#[test]
fn test_gluten_free_exceptions() {
    let gluten_free = DietaryRestriction::GlutenFree;
    assert!(!line_violates("1 cup almond flour", &gluten_free));
    assert!(!line_violates("200 g rice noodles", &gluten_free));
    assert!(!line_violates("4 corn tortillas", &gluten_free));
    assert!(line_violates("1 cup all-purpose flour", &gluten_free));
    assert!(line_violates("2 tbsp soy sauce", &gluten_free));
}

#[test]
fn test_nut_free_has_no_exceptions() {
    assert!(line_violates("1 cup almond flour", &DietaryRestriction::NutFree));
    assert!(line_violates("2 tbsp peanut butter", &DietaryRestriction::NutFree));
    assert!(!line_violates("1 cup coconut flakes", &DietaryRestriction::NutFree));
}

#[test]
fn test_custom_restriction_is_case_insensitive_substring() {
    let custom = DietaryRestriction::Custom("Cilantro".into());
    assert!(line_violates("1/4 cup chopped cilantro leaves", &custom));
    assert!(!line_violates("1/4 cup parsley", &custom));
    assert!(!line_violates("anything", &DietaryRestriction::Custom("  ".into())));
}

#[test]
fn test_first_violated_follows_caller_order() {
    let ingredients = ["2 eggs", "1 cup milk", "100 g bacon"];
    let restrictions = vec![
        DietaryRestriction::GlutenFree,
        DietaryRestriction::DairyFree,
        DietaryRestriction::Vegetarian,
    ];
    assert_eq!(
        first_violated(&ingredients, &restrictions),
        Some(&DietaryRestriction::DairyFree)
    );
    assert!(violates_restriction(&ingredients, &DietaryRestriction::Vegetarian));
    assert!(!violates_restriction(&ingredients, &DietaryRestriction::GlutenFree));
}

#[test]
fn test_empty_ingredients_violate_nothing() {
    let empty: [&str; 0] = [];
    assert!(!violates_restriction(&empty, &DietaryRestriction::Vegan));
    assert!(detect_superfoods(&empty).is_empty());
}

// ============================================================================
// Banned Ingredients and Vetoes
// ============================================================================

#[test]
fn test_banned_terms_match_substrings() {
    let banned = vec!["Pork".to_owned(), "   ".to_owned()];
    assert_eq!(
        find_banned_ingredient(&["300 g pork belly"], &banned),
        Some("Pork".to_owned())
    );
    assert_eq!(find_banned_ingredient(&["300 g tofu"], &banned), None);
}

#[test]
fn test_banned_terms_are_checked_before_restrictions() {
    let prefs = UserPreferences {
        banned_ingredients: vec!["bacon".into()],
        dietary_restrictions: vec![DietaryRestriction::Vegetarian],
        ..UserPreferences::default()
    };
    let veto = ingredient_veto(&["100 g bacon"], &prefs).unwrap();
    assert_eq!(veto, IngredientVeto::Banned("bacon".into()));
    assert_eq!(veto.to_string(), "contains banned ingredient 'bacon'");

    let veto = ingredient_veto(&["1 chicken breast"], &prefs).unwrap();
    assert_eq!(veto, IngredientVeto::Restriction(DietaryRestriction::Vegetarian));
    assert_eq!(veto.to_string(), "not vegetarian");

    assert!(ingredient_veto(&["1 cup rice"], &prefs).is_none());
}

// ============================================================================
// Ingredient Keys
// ============================================================================

#[test]
fn test_ingredient_key_strips_quantities_units_and_notes() {
    assert_eq!(
        ingredient_key("2 cups fresh baby spinach (washed), chopped").as_deref(),
        Some("baby spinach")
    );
    assert_eq!(ingredient_key("1/2 cup blueberries").as_deref(), Some("blueberries"));
    assert_eq!(ingredient_key("½ tsp Salt").as_deref(), Some("salt"));
    assert_eq!(ingredient_key("2 cups"), None);
}

#[test]
fn test_ingredient_keys_are_distinct() {
    let keys = ingredient_keys(&["1 cup quinoa", "2 cups quinoa", "1 avocado"]);
    assert_eq!(keys.len(), 2);
    assert!(keys.contains("quinoa"));
    assert!(keys.contains("avocado"));
}
