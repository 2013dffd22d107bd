// ABOUTME: Keyword heuristics deciding whether ingredient lines violate dietary restrictions
// ABOUTME: Per-restriction keyword, exception and plant-based marker tables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Dietary restriction heuristics
//!
//! Each ingredient line is checked on its own:
//! 1. A line carrying a compliance marker ("vegan", "dairy-free", ...) passes.
//! 2. Known exception phrases ("coconut milk", "almond flour") are removed.
//! 3. Any remaining keyword on a word boundary is a violation.
//!
//! This is a lookup heuristic, not an allergen database.

use pierre_core::models::DietaryRestriction;
use std::sync::LazyLock;

use super::matcher::PhraseMatcher;

const MEAT_KEYWORDS: &[&str] = &[
    "chicken",
    "chicken breast",
    "chicken thighs",
    "chicken stock",
    "chicken broth",
    "beef",
    "ground beef",
    "beef broth",
    "bone broth",
    "steak",
    "pork",
    "bacon",
    "ham",
    "hamburger",
    "sausage",
    "sausages",
    "prosciutto",
    "pancetta",
    "salami",
    "pepperoni",
    "chorizo",
    "lamb",
    "mutton",
    "veal",
    "venison",
    "turkey",
    "duck",
    "goose",
    "lard",
    "gelatin",
    "fish",
    "fish sauce",
    "salmon",
    "tuna",
    "cod",
    "tilapia",
    "halibut",
    "trout",
    "mackerel",
    "sardine",
    "sardines",
    "anchovy",
    "anchovies",
    "shrimp",
    "prawn",
    "prawns",
    "crab",
    "lobster",
    "scallops",
    "clams",
    "mussels",
    "oysters",
    "squid",
    "octopus",
];

const MEAT_EXCEPTIONS: &[&str] = &[
    "cauliflower steak",
    "tofu steak",
    "mushroom steak",
    "hamburger bun",
    "hamburger buns",
    "chicken of the woods",
];

const MEAT_FREE_MARKERS: &[&str] = &[
    "vegan",
    "vegetarian",
    "plant-based",
    "plant based",
    "meatless",
    "meat-free",
];

const DAIRY_KEYWORDS: &[&str] = &[
    "milk",
    "whole milk",
    "skim milk",
    "buttermilk",
    "butter",
    "ghee",
    "cheese",
    "cream cheese",
    "cottage cheese",
    "parmesan",
    "mozzarella",
    "cheddar",
    "feta",
    "ricotta",
    "mascarpone",
    "gruyere",
    "brie",
    "paneer",
    "halloumi",
    "cream",
    "heavy cream",
    "sour cream",
    "whipped cream",
    "ice cream",
    "half-and-half",
    "yogurt",
    "yoghurt",
    "greek yogurt",
    "kefir",
    "whey",
    "casein",
    "custard",
];

const DAIRY_EXCEPTIONS: &[&str] = &[
    "coconut milk",
    "coconut cream",
    "coconut yogurt",
    "almond milk",
    "oat milk",
    "soy milk",
    "rice milk",
    "cashew milk",
    "peanut butter",
    "almond butter",
    "cashew butter",
    "sunflower butter",
    "nut butter",
    "apple butter",
    "cocoa butter",
    "shea butter",
    "cream of tartar",
];

const DAIRY_FREE_MARKERS: &[&str] = &[
    "vegan",
    "plant-based",
    "plant based",
    "dairy-free",
    "dairy free",
    "non-dairy",
    "lactose-free",
];

/// Non-meat, non-dairy animal products
const ANIMAL_PRODUCT_KEYWORDS: &[&str] = &[
    "egg",
    "eggs",
    "egg white",
    "egg whites",
    "egg yolk",
    "egg yolks",
    "honey",
    "mayonnaise",
    "mayo",
    "aioli",
    "meringue",
];

const ANIMAL_PRODUCT_EXCEPTIONS: &[&str] = &["vegan mayo", "vegan mayonnaise"];

const ANIMAL_FREE_MARKERS: &[&str] = &["vegan", "plant-based", "plant based", "egg-free", "eggless"];

const GLUTEN_KEYWORDS: &[&str] = &[
    "wheat",
    "flour",
    "all-purpose flour",
    "bread flour",
    "bread",
    "breadcrumbs",
    "bread crumbs",
    "panko",
    "pasta",
    "spaghetti",
    "penne",
    "linguine",
    "fettuccine",
    "macaroni",
    "lasagna",
    "noodles",
    "egg noodles",
    "couscous",
    "barley",
    "rye",
    "bulgur",
    "farro",
    "semolina",
    "seitan",
    "soy sauce",
    "beer",
    "malt",
    "tortilla",
    "tortillas",
    "pita",
    "bagel",
    "croutons",
    "crackers",
];

const GLUTEN_EXCEPTIONS: &[&str] = &[
    "almond flour",
    "coconut flour",
    "rice flour",
    "chickpea flour",
    "tapioca flour",
    "potato flour",
    "cassava flour",
    "buckwheat flour",
    "corn flour",
    "rice noodles",
    "glass noodles",
    "rice pasta",
    "corn tortilla",
    "corn tortillas",
];

const GLUTEN_FREE_MARKERS: &[&str] = &["gluten-free", "gluten free"];

const NUT_KEYWORDS: &[&str] = &[
    "nuts",
    "mixed nuts",
    "almond",
    "almonds",
    "almond butter",
    "almond milk",
    "almond flour",
    "walnut",
    "walnuts",
    "pecan",
    "pecans",
    "cashew",
    "cashews",
    "pistachio",
    "pistachios",
    "hazelnut",
    "hazelnuts",
    "macadamia",
    "brazil nuts",
    "pine nuts",
    "peanut",
    "peanuts",
    "peanut butter",
    "nutella",
    "praline",
    "marzipan",
];

const NUT_FREE_MARKERS: &[&str] = &["nut-free", "nut free"];

/// Keyword table for one restriction family
#[derive(Debug)]
struct KeywordRule {
    markers: PhraseMatcher,
    exceptions: PhraseMatcher,
    keywords: PhraseMatcher,
}

impl KeywordRule {
    fn new(keywords: &[&str], exceptions: &[&str], markers: &[&str]) -> Self {
        Self {
            markers: PhraseMatcher::new(markers),
            exceptions: PhraseMatcher::new(exceptions),
            keywords: PhraseMatcher::new(keywords),
        }
    }

    fn violated_by(&self, line: &str) -> bool {
        if self.markers.is_match(line) {
            return false;
        }
        self.keywords.is_match(&self.exceptions.strip(line))
    }
}

#[derive(Debug)]
struct DietaryRules {
    meat: KeywordRule,
    dairy: KeywordRule,
    animal_products: KeywordRule,
    gluten: KeywordRule,
    nuts: KeywordRule,
}

static RULES: LazyLock<DietaryRules> = LazyLock::new(|| DietaryRules {
    meat: KeywordRule::new(MEAT_KEYWORDS, MEAT_EXCEPTIONS, MEAT_FREE_MARKERS),
    dairy: KeywordRule::new(DAIRY_KEYWORDS, DAIRY_EXCEPTIONS, DAIRY_FREE_MARKERS),
    animal_products: KeywordRule::new(
        ANIMAL_PRODUCT_KEYWORDS,
        ANIMAL_PRODUCT_EXCEPTIONS,
        ANIMAL_FREE_MARKERS,
    ),
    gluten: KeywordRule::new(GLUTEN_KEYWORDS, GLUTEN_EXCEPTIONS, GLUTEN_FREE_MARKERS),
    nuts: KeywordRule::new(NUT_KEYWORDS, &[], NUT_FREE_MARKERS),
});

/// Whether a single ingredient line violates the restriction
#[must_use]
pub fn line_violates(line: &str, restriction: &DietaryRestriction) -> bool {
    let rules = &*RULES;
    match restriction {
        DietaryRestriction::Vegetarian => rules.meat.violated_by(line),
        DietaryRestriction::Vegan => {
            rules.meat.violated_by(line)
                || rules.dairy.violated_by(line)
                || rules.animal_products.violated_by(line)
        }
        DietaryRestriction::DairyFree => rules.dairy.violated_by(line),
        DietaryRestriction::GlutenFree => rules.gluten.violated_by(line),
        DietaryRestriction::NutFree => rules.nuts.violated_by(line),
        DietaryRestriction::Custom(text) => {
            let needle = text.trim().to_lowercase();
            !needle.is_empty() && line.to_lowercase().contains(&needle)
        }
    }
}

/// Whether any ingredient line violates the restriction
#[must_use]
pub fn violates_restriction<S: AsRef<str>>(
    ingredients: &[S],
    restriction: &DietaryRestriction,
) -> bool {
    ingredients
        .iter()
        .any(|line| line_violates(line.as_ref(), restriction))
}

/// First restriction (in the caller's order) the ingredients violate
#[must_use]
pub fn first_violated<'a, S: AsRef<str>>(
    ingredients: &[S],
    restrictions: &'a [DietaryRestriction],
) -> Option<&'a DietaryRestriction> {
    restrictions
        .iter()
        .find(|restriction| violates_restriction(ingredients, restriction))
}
