//! Runtime metrics and ground-truth accuracy validation

pub mod metrics;
pub mod validator;

pub use metrics::{
    AccuracyKind, PerformanceMetrics, PerformanceMonitor, UnifiedAccuracy,
    UnifiedAccuracyCalculator,
};
pub use validator::{AccuracyValidator, TestCase, ValidationMetrics};
