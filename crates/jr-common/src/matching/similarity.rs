use crate::radar::{DIMENSION_COUNT, DIMENSION_RANGES, RadarProfile};

/// Range-normalized similarity between two profiles, in `0.0..=1.0`.
///
/// Each dimension contributes `|a - b| / range`; the similarity is one minus
/// the mean of those gaps, clamped to `[0, 1]`.
pub fn similarity(a: &RadarProfile, b: &RadarProfile) -> f64 {
    similarity_of_values(&a.values(), &b.values())
}

/// Absent profiles score 0.0.
pub fn similarity_opt(a: Option<&RadarProfile>, b: Option<&RadarProfile>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => similarity(a, b),
        _ => 0.0,
    }
}

/// Slice form for callers holding raw radar vectors. Returns 0.0 on a
/// dimension mismatch instead of failing the whole recommendation.
pub fn similarity_of_values(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != DIMENSION_COUNT || b.len() != DIMENSION_COUNT {
        tracing::warn!(
            a_len = a.len(),
            b_len = b.len(),
            expected = DIMENSION_COUNT,
            "radar dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let diff_sum: f64 = a
        .iter()
        .zip(b.iter())
        .zip(DIMENSION_RANGES.iter())
        .map(|((x, y), range)| (x - y).abs() / range)
        .sum();

    let sim = 1.0 - diff_sum / DIMENSION_COUNT as f64;
    if sim.is_nan() {
        return 0.0;
    }
    sim.clamp(0.0, 1.0)
}
