//! Evolutionary weight optimization

pub mod genetic;

pub use genetic::{GaOptimizer, GaReport, WeightVector};
