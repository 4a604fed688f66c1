//! Heuristic scorers. Each returns a bounded score in 0-100 for a pair of
//! normalized texts (the ensemble path may exceed 100, capped at 115).

pub mod career;
pub mod embedding;
pub mod ensemble;
pub mod fuzzy;
pub mod graph;
pub mod innovation;
pub mod persona;
pub mod skill_gap;
pub mod tfidf;
pub mod transfer;
