//! Per-attribute similarity functions.
//!
//! Each function scores one dimension on a normalized [0, 1] scale. They are
//! pure and total: unknown or empty inputs score 0 instead of failing, so a
//! movie with sparse metadata is simply less connected, never an error.

use data_loader::AttributeSet;

/// Jaccard index of two attribute sets: `|a ∩ b| / |a ∪ b|`.
///
/// Returns 0 if either set is empty.
pub fn set_overlap(a: &AttributeSet, b: &AttributeSet) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection_count(b) as f32;
    let union = a.union_count(b) as f32;
    intersection / union
}

/// 1 when both values are present, non-empty and exactly equal, else 0.
///
/// Comparison is case-sensitive.
pub fn equality_score(a: Option<&str>, b: Option<&str>) -> f32 {
    match (a, b) {
        (Some(a), Some(b)) if !a.is_empty() && a == b => 1.0,
        _ => 0.0,
    }
}

/// `max(0, 1 - |x - y| / max_diff)`.
///
/// Reaches 0 once the difference is `max_diff` or more. A non-positive or
/// non-finite `max_diff` scores 0.
pub fn bounded_difference(x: f32, y: f32, max_diff: f32) -> f32 {
    if !(max_diff.is_finite() && max_diff > 0.0) {
        return 0.0;
    }
    let diff = (x - y).abs();
    if !diff.is_finite() || diff >= max_diff {
        return 0.0;
    }
    1.0 - diff / max_diff
}

/// `bounded_difference` over optional values; unknown on either side is 0.
pub fn optional_bounded_difference(x: Option<f32>, y: Option<f32>, max_diff: f32) -> f32 {
    match (x, y) {
        (Some(x), Some(y)) => bounded_difference(x, y, max_diff),
        _ => 0.0,
    }
}

/// Flat `bonus` when both values are known and at most `window` apart.
pub fn proximity_bonus(x: Option<f32>, y: Option<f32>, window: f32, bonus: f32) -> f32 {
    match (x, y) {
        (Some(x), Some(y)) if (x - y).abs() <= window => bonus,
        _ => 0.0,
    }
}
