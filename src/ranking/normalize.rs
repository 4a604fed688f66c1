//! Min-max column normalization for cross-resume comparability

/// Score assigned to every member of a zero-variance column. A batch where
/// everyone ties carries no ranking signal, so the column is mapped to a
/// neutral constant instead of an arbitrary 0 or 100.
pub const UNIFORM_COLUMN_SCORE: f64 = 50.0;

/// Rescale a score column to [0, 100]. The minimum maps to 0 and the
/// maximum to 100; a column with no spread collapses to
/// [`UNIFORM_COLUMN_SCORE`].
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range <= f64::EPSILON {
        return vec![UNIFORM_COLUMN_SCORE; values.len()];
    }

    values
        .iter()
        .map(|v| (v - min) / range * 100.0)
        .collect()
}

/// Normalize a column where some entries are absent. Present values are
/// rescaled among themselves; `None` stays `None` and never contributes.
pub fn min_max_normalize_partial(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let present: Vec<f64> = values.iter().filter_map(|v| *v).collect();
    if present.is_empty() {
        return values.to_vec();
    }

    let normalized = min_max_normalize(&present);
    let mut iter = normalized.into_iter();

    values
        .iter()
        .map(|v| v.map(|_| iter.next().unwrap_or(UNIFORM_COLUMN_SCORE)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_maps_to_zero_and_max_to_hundred() {
        let normalized = min_max_normalize(&[20.0, 60.0, 100.0]);

        assert!((normalized[0] - 0.0).abs() < 1e-9);
        assert!((normalized[1] - 50.0).abs() < 1e-9);
        assert!((normalized[2] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_uniform_column_collapses_to_fifty() {
        let normalized = min_max_normalize(&[42.0, 42.0, 42.0]);

        assert_eq!(normalized, vec![50.0, 50.0, 50.0]);
    }

    #[test]
    fn test_empty_column() {
        assert!(min_max_normalize(&[]).is_empty());
    }

    #[test]
    fn test_single_value_is_uniform() {
        assert_eq!(min_max_normalize(&[73.0]), vec![50.0]);
    }

    #[test]
    fn test_partial_column_preserves_absences() {
        let normalized = min_max_normalize_partial(&[Some(10.0), None, Some(90.0)]);

        assert!((normalized[0].unwrap() - 0.0).abs() < 1e-9);
        assert!(normalized[1].is_none());
        assert!((normalized[2].unwrap() - 100.0).abs() < 1e-9);
    }
}
