use crate::models::MatchingWeights;

/// Rescale a weight vector so its four components sum to 1
///
/// A non-positive (or non-finite) total cannot be rescaled, so the default
/// vector (0.4 / 0.2 / 0.2 / 0.2) is returned instead.
pub fn normalize_weights(weights: &MatchingWeights) -> MatchingWeights {
    let total = weights.sum();

    if !total.is_finite() || total <= 0.0 {
        return MatchingWeights::default();
    }

    MatchingWeights {
        topic_overlap: weights.topic_overlap / total,
        college_similarity: weights.college_similarity / total,
        availability: weights.availability / total,
        reputation: weights.reputation / total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_sums_to_one() {
        let weights = MatchingWeights {
            topic_overlap: 2.0,
            college_similarity: 1.0,
            availability: 1.0,
            reputation: 4.0,
        };

        let normalized = normalize_weights(&weights);

        assert!((normalized.sum() - 1.0).abs() < 1e-9);
        assert!((normalized.reputation - 0.5).abs() < 1e-9);
        assert!((normalized.topic_overlap - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_zero_sum_uses_default() {
        let zero = MatchingWeights {
            topic_overlap: 0.0,
            college_similarity: 0.0,
            availability: 0.0,
            reputation: 0.0,
        };

        assert_eq!(normalize_weights(&zero), MatchingWeights::default());
    }

    #[test]
    fn test_already_normalized_is_unchanged() {
        let normalized = normalize_weights(&MatchingWeights::default());
        assert!((normalized.topic_overlap - 0.4).abs() < 1e-12);
        assert!((normalized.college_similarity - 0.2).abs() < 1e-12);
    }
}
