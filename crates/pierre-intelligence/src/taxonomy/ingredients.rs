// ABOUTME: Ingredient-line normalization into comparable ingredient keys
// ABOUTME: Strips quantities, units, parentheticals and preparation words
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

static PARENTHETICAL: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\([^)]*\)|\[[^\]]*\]").ok());

const UNITS: &[&str] = &[
    "cup", "cups", "c", "tbsp", "tbs", "tablespoon", "tablespoons", "tsp", "teaspoon",
    "teaspoons", "g", "gram", "grams", "kg", "mg", "ml", "l", "liter", "liters", "litre",
    "litres", "oz", "ounce", "ounces", "lb", "lbs", "pound", "pounds", "pinch", "dash",
    "clove", "cloves", "can", "cans", "jar", "slice", "slices", "piece", "pieces", "handful",
    "bunch", "sprig", "sprigs", "stick", "sticks", "package", "pkg", "head", "fillet",
    "fillets", "quart", "pint",
];

const FILLER_WORDS: &[&str] = &[
    "a", "an", "the", "of", "and", "or", "to", "taste", "about", "approximately", "fresh",
    "freshly", "chopped", "diced", "minced", "sliced", "grated", "shredded", "peeled",
    "crushed", "ground", "large", "small", "medium", "finely", "roughly", "thinly", "cooked",
    "raw", "frozen", "boneless", "skinless", "organic", "optional", "divided", "packed",
    "heaping", "level", "whole", "halved", "quartered", "cubed", "drained", "rinsed",
];

fn is_quantity(token: &str) -> bool {
    token
        .chars()
        .any(|c| c.is_ascii_digit() || matches!(c, '½' | '⅓' | '⅔' | '¼' | '¾' | '⅛'))
}

/// Normalized key for an ingredient line
///
/// `"2 cups fresh baby spinach (washed), chopped"` → `"baby spinach"`.
/// Returns `None` when nothing but quantities and filler remains.
#[must_use]
pub fn ingredient_key(line: &str) -> Option<String> {
    let lowered = line.to_lowercase();
    let without_notes = PARENTHETICAL
        .as_ref()
        .map_or_else(|| lowered.clone(), |re| re.replace_all(&lowered, " ").into_owned());
    let head = without_notes.split(',').next().unwrap_or_default();

    let words: Vec<&str> = head
        .split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric() && c != '-'))
        .filter(|token| !token.is_empty())
        .filter(|token| !is_quantity(token))
        .filter(|token| !UNITS.contains(token) && !FILLER_WORDS.contains(token))
        .collect();

    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

/// Distinct normalized keys of a recipe's ingredient lines
#[must_use]
pub fn ingredient_keys<S: AsRef<str>>(ingredients: &[S]) -> BTreeSet<String> {
    ingredients
        .iter()
        .filter_map(|line| ingredient_key(line.as_ref()))
        .collect()
}
