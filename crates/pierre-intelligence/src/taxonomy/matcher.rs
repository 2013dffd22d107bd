// ABOUTME: Word-boundary phrase matching for ingredient taxonomies
// ABOUTME: Compiles alias lists into case-insensitive regexes that never match inside words
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use regex::Regex;
use std::cmp::Reverse;
use tracing::warn;

/// Case-insensitive matcher for a list of exact phrases
///
/// A phrase only matches as a whole: `"olive"` does not match `"olives"` and
/// `"nut"` does not match `"coconut"`.
#[derive(Debug)]
pub struct PhraseMatcher {
    pattern: Option<Regex>,
}

impl PhraseMatcher {
    /// Compile a matcher for the given phrases
    ///
    /// Longer phrases are tried first so multi-word aliases win over their prefixes.
    #[must_use]
    pub fn new(phrases: &[&str]) -> Self {
        let mut sorted: Vec<&str> = phrases
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .collect();
        if sorted.is_empty() {
            return Self { pattern: None };
        }
        sorted.sort_by_key(|p| Reverse(p.len()));
        let alternation = sorted
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        let source = format!(r"(?i)\b(?:{alternation})\b");
        let pattern = match Regex::new(&source) {
            Ok(re) => Some(re),
            Err(e) => {
                warn!(error = %e, "Failed to compile taxonomy phrase pattern");
                None
            }
        };
        Self { pattern }
    }

    /// Whether any phrase occurs in `text` on word boundaries
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|re| re.is_match(text))
    }

    /// Remove every occurrence of the phrases from `text`
    #[must_use]
    pub fn strip(&self, text: &str) -> String {
        self.pattern.as_ref().map_or_else(
            || text.to_owned(),
            |re| re.replace_all(text, " ").into_owned(),
        )
    }
}
