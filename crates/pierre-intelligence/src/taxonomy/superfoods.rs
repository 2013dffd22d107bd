// ABOUTME: Superfood category detection from free-text ingredient lines
// ABOUTME: Alias tables per SuperfoodCategory compiled into word-boundary matchers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_core::models::SuperfoodCategory;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use super::matcher::PhraseMatcher;

/// Aliases recognized for each category
///
/// Aliases are whole phrases. Generic words that appear in unrelated
/// ingredients ("beans" in "vanilla beans", "olive" in "olive garden") are
/// deliberately absent; only the specific phrase counts.
const SUPERFOOD_ALIASES: &[(SuperfoodCategory, &[&str])] = &[
    (
        SuperfoodCategory::LeafyGreens,
        &[
            "spinach",
            "baby spinach",
            "kale",
            "swiss chard",
            "chard",
            "collard greens",
            "arugula",
            "rocket",
            "watercress",
            "romaine",
            "bok choy",
            "mustard greens",
            "beet greens",
        ],
    ),
    (
        SuperfoodCategory::Berries,
        &[
            "blueberry",
            "blueberries",
            "strawberry",
            "strawberries",
            "raspberry",
            "raspberries",
            "blackberry",
            "blackberries",
            "cranberry",
            "cranberries",
            "acai",
            "goji berries",
            "mixed berries",
        ],
    ),
    (
        SuperfoodCategory::FattyFish,
        &[
            "salmon",
            "sardine",
            "sardines",
            "mackerel",
            "herring",
            "anchovy",
            "anchovies",
            "trout",
            "albacore tuna",
            "arctic char",
        ],
    ),
    (
        SuperfoodCategory::NutsSeeds,
        &[
            "almond",
            "almonds",
            "walnut",
            "walnuts",
            "pecans",
            "pistachios",
            "cashews",
            "hazelnuts",
            "chia seeds",
            "chia",
            "flaxseed",
            "flax seeds",
            "ground flax",
            "hemp seeds",
            "pumpkin seeds",
            "sunflower seeds",
            "sesame seeds",
            "tahini",
        ],
    ),
    (
        SuperfoodCategory::Beans,
        &[
            "black beans",
            "kidney beans",
            "pinto beans",
            "cannellini beans",
            "navy beans",
            "white beans",
            "great northern beans",
            "lima beans",
            "mung beans",
            "adzuki beans",
            "chickpea",
            "chickpeas",
            "garbanzo beans",
            "lentil",
            "lentils",
            "red lentils",
            "split peas",
            "edamame",
        ],
    ),
    (
        SuperfoodCategory::WholeGrains,
        &[
            "quinoa",
            "oats",
            "rolled oats",
            "steel-cut oats",
            "oatmeal",
            "brown rice",
            "wild rice",
            "barley",
            "bulgur",
            "farro",
            "buckwheat",
            "millet",
            "whole wheat",
            "whole-wheat",
            "whole grain",
            "whole-grain",
        ],
    ),
    (
        SuperfoodCategory::OliveOil,
        &[
            "olive oil",
            "extra virgin olive oil",
            "extra-virgin olive oil",
            "evoo",
        ],
    ),
    (
        SuperfoodCategory::Avocado,
        &["avocado", "avocados", "guacamole", "avocado oil"],
    ),
    (
        SuperfoodCategory::Cruciferous,
        &[
            "broccoli",
            "broccolini",
            "cauliflower",
            "brussels sprouts",
            "cabbage",
            "red cabbage",
            "napa cabbage",
            "kohlrabi",
            "radish",
            "radishes",
            "turnip",
        ],
    ),
    (
        SuperfoodCategory::Fermented,
        &[
            "yogurt",
            "yoghurt",
            "greek yogurt",
            "kefir",
            "kimchi",
            "sauerkraut",
            "miso",
            "tempeh",
            "kombucha",
            "natto",
        ],
    ),
    (
        SuperfoodCategory::AromaticSpices,
        &[
            "turmeric",
            "ginger",
            "fresh ginger",
            "garlic",
            "garlic cloves",
            "cinnamon",
            "cumin",
        ],
    ),
];

static SUPERFOOD_MATCHERS: LazyLock<Vec<(SuperfoodCategory, PhraseMatcher)>> =
    LazyLock::new(|| {
        SUPERFOOD_ALIASES
            .iter()
            .map(|(category, aliases)| (*category, PhraseMatcher::new(aliases)))
            .collect()
    });

/// Superfood categories present in any of the ingredient lines
#[must_use]
pub fn detect_superfoods<S: AsRef<str>>(ingredients: &[S]) -> BTreeSet<SuperfoodCategory> {
    SUPERFOOD_MATCHERS
        .iter()
        .filter(|(_, matcher)| {
            ingredients
                .iter()
                .any(|line| matcher.is_match(line.as_ref()))
        })
        .map(|(category, _)| *category)
        .collect()
}

/// Preferred categories actually present in the recipe
#[must_use]
pub fn matched_superfoods<S: AsRef<str>>(
    ingredients: &[S],
    preferred: &BTreeSet<SuperfoodCategory>,
) -> BTreeSet<SuperfoodCategory> {
    if preferred.is_empty() {
        return BTreeSet::new();
    }
    detect_superfoods(ingredients)
        .intersection(preferred)
        .copied()
        .collect()
}
