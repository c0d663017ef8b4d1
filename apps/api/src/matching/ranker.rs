//! Score normalization over pre-computed vector distances.
//!
//! The database returns candidates sorted by ascending distance; this module
//! owns the per-metric score formula, the deterministic tie-break, and the
//! presentation rounding.

use std::cmp::Ordering;

use serde::Serialize;
use uuid::Uuid;

/// The two distance metrics the vector store can compute, as a tagged choice
/// so each normalization formula stays colocated with its metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceMetric {
    L2,
    Cosine,
}

impl DistanceMetric {
    /// pgvector SQL operator computing this metric.
    pub fn operator(self) -> &'static str {
        match self {
            DistanceMetric::L2 => "<->",
            DistanceMetric::Cosine => "<=>",
        }
    }

    /// Converts a distance into a bounded score.
    ///
    /// L2: `100 / (1 + d)`. Distance 0 scores 100 and the score decays
    /// toward 0 without ever going negative.
    ///
    /// Cosine (domain [0, 2]): `clamp((1 - d) * 100, 0, 100)`. Distances of
    /// 1 or more all floor at 0 rather than going negative.
    pub fn score(self, distance: f64) -> f64 {
        match self {
            DistanceMetric::L2 => 100.0 / (1.0 + distance),
            DistanceMetric::Cosine => ((1.0 - distance) * 100.0).clamp(0.0, 100.0),
        }
    }
}

/// One candidate as returned by the vector store: id plus its distance from
/// the query.
#[derive(Debug, Clone)]
pub struct CandidateHit {
    pub id: Uuid,
    pub distance: f64,
}

/// One scored, positioned match. Produced per query, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub candidate_id: Uuid,
    /// In [0, 100], rounded to one decimal place.
    pub score: f64,
    /// 1-based position.
    pub rank: usize,
}

/// Orders hits by ascending distance (ties broken by candidate id),
/// truncates to `limit`, and converts distances to scores.
pub fn rank(metric: DistanceMetric, mut hits: Vec<CandidateHit>, limit: usize) -> Vec<MatchResult> {
    hits.sort_by(|a, b| {
        a.distance
            .partial_cmp(&b.distance)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });
    hits.truncate(limit);

    hits.into_iter()
        .enumerate()
        .map(|(i, hit)| MatchResult {
            candidate_id: hit.id,
            score: round_one_decimal(metric.score(hit.distance)),
            rank: i + 1,
        })
        .collect()
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(id: u128, distance: f64) -> CandidateHit {
        CandidateHit {
            id: Uuid::from_u128(id),
            distance,
        }
    }

    #[test]
    fn test_l2_score_bounds() {
        assert_eq!(DistanceMetric::L2.score(0.0), 100.0);
        for d in [0.1, 1.0, 5.0, 1000.0] {
            let score = DistanceMetric::L2.score(d);
            assert!(score > 0.0 && score < 100.0, "score was {score} for {d}");
        }
    }

    #[test]
    fn test_cosine_score_bounds_and_floor() {
        assert_eq!(DistanceMetric::Cosine.score(0.0), 100.0);
        assert_eq!(DistanceMetric::Cosine.score(0.25), 75.0);
        // Everything at or past orthogonal floors at exactly 0.
        assert_eq!(DistanceMetric::Cosine.score(1.0), 0.0);
        assert_eq!(DistanceMetric::Cosine.score(1.5), 0.0);
        assert_eq!(DistanceMetric::Cosine.score(2.0), 0.0);
    }

    #[test]
    fn test_rank_orders_by_ascending_distance() {
        let hits = vec![hit(1, 0.1), hit(2, 0.5), hit(3, 0.3)];
        let results = rank(DistanceMetric::L2, hits, 10);

        let ids: Vec<_> = results.iter().map(|r| r.candidate_id).collect();
        assert_eq!(
            ids,
            vec![Uuid::from_u128(1), Uuid::from_u128(3), Uuid::from_u128(2)]
        );
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(
            results.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_rank_ties_break_by_candidate_id() {
        let hits = vec![hit(9, 0.4), hit(2, 0.4), hit(5, 0.4)];
        let results = rank(DistanceMetric::Cosine, hits, 10);
        let ids: Vec<_> = results.iter().map(|r| r.candidate_id).collect();
        assert_eq!(
            ids,
            vec![Uuid::from_u128(2), Uuid::from_u128(5), Uuid::from_u128(9)]
        );
    }

    #[test]
    fn test_rank_truncates_to_limit() {
        let hits = vec![hit(1, 0.1), hit(2, 0.2), hit(3, 0.3)];
        let results = rank(DistanceMetric::L2, hits, 2);
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].candidate_id, Uuid::from_u128(2));
    }

    #[test]
    fn test_scores_round_to_one_decimal() {
        // L2 at d = 0.5 gives 66.666...; presented as 66.7.
        let results = rank(DistanceMetric::L2, vec![hit(1, 0.5)], 1);
        assert_eq!(results[0].score, 66.7);
    }
}
