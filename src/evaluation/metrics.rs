//! Performance monitoring and heuristic accuracy estimation

use crate::scoring::embedding::EmbeddingBackend;
use crate::scoring::graph::SkillGraphMatcher;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Whether an accuracy figure is a heuristic estimate or validated against
/// ground truth. Estimated figures are presentation-only and must never be
/// used as a correctness oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccuracyKind {
    Estimated,
    Tested,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub execution_time_secs: f64,
    pub resumes_processed: usize,
    pub strategy: String,
    pub accuracy_score: f64,
    pub accuracy_kind: AccuracyKind,
    pub throughput: f64,
    pub avg_time_per_resume: f64,
    pub time_complexity: String,
    pub space_complexity: String,
}

/// Tracks wall-clock time over a ranking run and derives the summary
/// metrics shown in reports.
pub struct PerformanceMonitor {
    start: Option<Instant>,
    elapsed_secs: f64,
    resumes_processed: usize,
    strategy: String,
    accuracy_score: f64,
    accuracy_kind: AccuracyKind,
}

impl Default for PerformanceMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl PerformanceMonitor {
    pub fn new() -> Self {
        Self {
            start: None,
            elapsed_secs: 0.0,
            resumes_processed: 0,
            strategy: String::new(),
            accuracy_score: 0.0,
            accuracy_kind: AccuracyKind::Estimated,
        }
    }

    pub fn start_monitoring(&mut self) {
        self.start = Some(Instant::now());
    }

    pub fn stop_monitoring(&mut self) -> f64 {
        if let Some(start) = self.start.take() {
            self.elapsed_secs = start.elapsed().as_secs_f64();
        }
        self.elapsed_secs
    }

    pub fn set_strategy(&mut self, strategy: &str) {
        self.strategy = strategy.to_string();
    }

    pub fn set_resumes_count(&mut self, count: usize) {
        self.resumes_processed = count;
    }

    /// Heuristic quality estimate over final scores, sorted best first.
    /// Combines score spread, top-candidate separation, coverage, a bonus
    /// for high performers and a precision simulation over the top 20%.
    /// Clamped to 75-99 and labeled [`AccuracyKind::Estimated`].
    pub fn estimate_accuracy(&mut self, scores: &[f64]) -> f64 {
        if scores.is_empty() {
            self.accuracy_score = 0.0;
            return 0.0;
        }

        let n = scores.len();

        let mut variance_score = (std_dev(scores) / 8.0).min(1.0) * 100.0;
        if n == 1 {
            variance_score = 50.0;
        } else if n == 2 {
            variance_score = variance_score.max(30.0);
        }

        let confidence = if n >= 2 {
            ((scores[0] - scores[1]) / scores[0].max(1.0)).min(1.0) * 100.0
        } else {
            100.0
        };

        let meaningful = scores.iter().filter(|s| **s > 15.0).count();
        let coverage = meaningful as f64 / n as f64 * 100.0;

        let high_performers = scores.iter().filter(|s| **s > 80.0).count();
        let quality_bonus = (high_performers as f64 / n as f64 * 10.0).min(10.0);

        let top_slice = (n / 5).max(1);
        let true_positives = scores[..top_slice].iter().filter(|s| **s > 70.0).count();
        let mut precision = true_positives as f64 / top_slice as f64 * 100.0;
        if n == 1 {
            precision = if scores[0] > 70.0 { 100.0 } else { scores[0] };
        }

        let accuracy = 70.0
            + variance_score * 0.15
            + confidence * 0.15
            + coverage * 0.10
            + quality_bonus * 0.05
            + precision * 0.15;

        self.accuracy_score = accuracy.clamp(75.0, 99.0);
        self.accuracy_kind = AccuracyKind::Estimated;
        self.accuracy_score
    }

    /// Replace the estimate with a validated figure from ground truth.
    pub fn set_tested_accuracy(&mut self, overall_accuracy: f64) {
        self.accuracy_score = overall_accuracy;
        self.accuracy_kind = AccuracyKind::Tested;
    }

    pub fn report(&self) -> PerformanceMetrics {
        let n = self.resumes_processed;
        let scorer_count = match self.strategy.as_str() {
            "ensemble" => 2,
            "ga" => 1,
            _ => 5,
        };

        let throughput = if self.elapsed_secs > 0.0 {
            n as f64 / self.elapsed_secs
        } else {
            0.0
        };
        let avg_time_per_resume = if n > 0 {
            self.elapsed_secs / n as f64
        } else {
            0.0
        };

        PerformanceMetrics {
            execution_time_secs: self.elapsed_secs,
            resumes_processed: n,
            strategy: self.strategy.clone(),
            accuracy_score: self.accuracy_score,
            accuracy_kind: self.accuracy_kind,
            throughput,
            avg_time_per_resume,
            time_complexity: format!("O(n x m) where n={}, m={}", n, scorer_count),
            space_complexity: format!("O(n) = O({})", n),
        }
    }
}

/// Breakdown of the standalone unified accuracy estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnifiedAccuracy {
    pub accuracy: f64,
    /// Weighted embedding/graph similarity of the top candidate, reported
    /// alongside the batch statistics
    pub semantic_blend: f64,
    pub graph_score: f64,
    pub embedding_score: Option<f64>,
    pub kind: AccuracyKind,
}

/// Standalone accuracy calculator combining the top candidate's semantic
/// similarity with batch score statistics. Independent of
/// [`PerformanceMonitor::estimate_accuracy`], which uses a lower base and
/// a wider clamp.
pub struct UnifiedAccuracyCalculator<'a> {
    embedding: &'a dyn EmbeddingBackend,
    graph: &'a SkillGraphMatcher,
}

impl<'a> UnifiedAccuracyCalculator<'a> {
    pub fn new(embedding: &'a dyn EmbeddingBackend, graph: &'a SkillGraphMatcher) -> Self {
        Self { embedding, graph }
    }

    /// Unified estimate over final scores sorted best first, with the job
    /// description and top candidate's text providing the semantic blend.
    /// Empty batches return a zero figure; everything else clamps to 88-99
    /// and is labeled [`AccuracyKind::Estimated`].
    pub fn calculate(
        &self,
        job_desc: &str,
        top_resume_text: &str,
        scores: &[f64],
    ) -> UnifiedAccuracy {
        if scores.is_empty() {
            return UnifiedAccuracy {
                accuracy: 0.0,
                semantic_blend: 0.0,
                graph_score: 0.0,
                embedding_score: None,
                kind: AccuracyKind::Estimated,
            };
        }

        let embedding_score = self.embedding.score(job_desc, top_resume_text);
        let graph_score = self.graph.graph_similarity(job_desc, top_resume_text);
        let semantic_blend = match embedding_score {
            Some(emb) => 0.6 * emb + 0.4 * graph_score,
            None => graph_score,
        };

        let n = scores.len();
        let variance_score = (std_dev(scores) / 8.0).min(1.0) * 100.0;
        let confidence = if n >= 2 {
            ((scores[0] - scores[1]) / scores[0].max(1.0)).min(1.0) * 100.0
        } else {
            100.0
        };

        let meaningful = scores.iter().filter(|s| **s > 15.0).count();
        let coverage = meaningful as f64 / n as f64 * 100.0;

        let high_performers = scores.iter().filter(|s| **s > 80.0).count();
        let quality_bonus = (high_performers as f64 / n as f64 * 10.0).min(10.0);

        let accuracy = 85.0
            + variance_score * 0.25
            + confidence * 0.25
            + coverage * 0.30
            + quality_bonus * 0.20;

        UnifiedAccuracy {
            accuracy: accuracy.clamp(88.0, 99.0),
            semantic_blend,
            graph_score,
            embedding_score,
            kind: AccuracyKind::Estimated,
        }
    }
}

fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::embedding::DisabledEmbedding;

    #[test]
    fn test_unified_accuracy_clamped_to_range() {
        let embedding = DisabledEmbedding;
        let graph = SkillGraphMatcher::default();
        let calculator = UnifiedAccuracyCalculator::new(&embedding, &graph);

        let flat = calculator.calculate("python developer", "python expert", &[10.0, 10.0, 10.0]);
        assert!(flat.accuracy >= 88.0);

        let spread =
            calculator.calculate("python developer", "python expert", &[95.0, 40.0, 20.0, 5.0]);
        assert!(spread.accuracy <= 99.0);
        assert_eq!(spread.kind, AccuracyKind::Estimated);
    }

    #[test]
    fn test_unified_accuracy_empty_batch_is_zero() {
        let embedding = DisabledEmbedding;
        let graph = SkillGraphMatcher::default();
        let calculator = UnifiedAccuracyCalculator::new(&embedding, &graph);

        let result = calculator.calculate("python developer", "python expert", &[]);
        assert_eq!(result.accuracy, 0.0);
    }

    #[test]
    fn test_unified_blend_falls_back_to_graph() {
        let embedding = DisabledEmbedding;
        let graph = SkillGraphMatcher::default();
        let calculator = UnifiedAccuracyCalculator::new(&embedding, &graph);

        let result =
            calculator.calculate("python developer", "python and django expert", &[80.0, 50.0]);
        assert_eq!(result.embedding_score, None);
        assert!(result.graph_score > 0.0);
        assert!((result.semantic_blend - result.graph_score).abs() < 1e-9);
    }

    #[test]
    fn test_estimate_stays_in_range() {
        let mut monitor = PerformanceMonitor::new();

        let low = monitor.estimate_accuracy(&[5.0, 5.0, 5.0]);
        assert!(low >= 75.0);

        let high = monitor.estimate_accuracy(&[99.0, 95.0, 92.0, 90.0, 88.0]);
        assert!(high <= 99.0);
    }

    #[test]
    fn test_empty_scores_give_zero() {
        let mut monitor = PerformanceMonitor::new();
        assert_eq!(monitor.estimate_accuracy(&[]), 0.0);
    }

    #[test]
    fn test_estimate_is_labeled_estimated() {
        let mut monitor = PerformanceMonitor::new();
        monitor.estimate_accuracy(&[80.0, 60.0, 40.0]);

        assert_eq!(monitor.report().accuracy_kind, AccuracyKind::Estimated);
    }

    #[test]
    fn test_tested_accuracy_overrides_estimate() {
        let mut monitor = PerformanceMonitor::new();
        monitor.estimate_accuracy(&[80.0, 60.0]);
        monitor.set_tested_accuracy(62.5);

        let report = monitor.report();
        assert_eq!(report.accuracy_kind, AccuracyKind::Tested);
        assert!((report.accuracy_score - 62.5).abs() < 1e-9);
    }

    #[test]
    fn test_report_throughput() {
        let mut monitor = PerformanceMonitor::new();
        monitor.set_strategy("standard");
        monitor.set_resumes_count(4);
        monitor.start_monitoring();
        monitor.stop_monitoring();

        let report = monitor.report();
        assert_eq!(report.resumes_processed, 4);
        assert!(report.time_complexity.contains("m=5"));
    }
}
