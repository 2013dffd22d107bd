// ABOUTME: Numeric helpers shared by scorers and similarity computations
// ABOUTME: Score clamping, Jaccard overlap, cosine similarity, and relative closeness
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Numeric helpers
//!
//! Every helper is total: empty inputs, zero denominators and non-finite values
//! produce a defined result instead of NaN or a panic.

use pierre_core::constants::scores::{MAX_SCORE, MIN_SCORE};
use std::collections::BTreeSet;

/// Clamp a score into `[0, 100]`, mapping NaN to 0
#[must_use]
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_SCORE;
    }
    value.clamp(MIN_SCORE, MAX_SCORE)
}

/// Clamp a ratio into `[0, 1]`, mapping NaN to 0
#[must_use]
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Jaccard overlap `|A ∩ B| / |A ∪ B|`; two empty sets share no evidence and score 0
#[must_use]
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    let union = a.union(b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    intersection as f64 / union as f64
}

/// Cosine similarity of two vectors; a zero vector has similarity 0
#[must_use]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();
    if norm_a <= f64::EPSILON || norm_b <= f64::EPSILON {
        return 0.0;
    }
    clamp_unit(dot / (norm_a * norm_b))
}

/// Symmetric closeness `1 − |a − b| / max(a, b)`; both zero → 1
#[must_use]
pub fn symmetric_closeness(a: f64, b: f64) -> f64 {
    let largest = a.abs().max(b.abs());
    if largest <= f64::EPSILON {
        return 1.0;
    }
    clamp_unit(1.0 - (a - b).abs() / largest)
}

/// Closeness of `actual` to a reference `target`: `1 − min(1, |a − t| / t)`
///
/// A non-positive target matches only a non-positive actual.
#[must_use]
pub fn closeness_to_target(actual: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return if actual <= 0.0 { 1.0 } else { 0.0 };
    }
    1.0 - ((actual - target).abs() / target).min(1.0)
}

/// Arithmetic mean; empty input → `None`
#[must_use]
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
