//! Batch ranking engine and score normalization

pub mod engine;
pub mod normalize;

pub use engine::{RankedResume, RankingEngine, RankingOutcome, ScoreVector, ScoringStrategy};
pub use normalize::min_max_normalize;
