//! Ground-truth validation of predicted rankings

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// One labeled case: the expert ordering plus expert-assigned relevance
/// scores for each resume id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub id: String,
    pub ground_truth: Vec<String>,
    pub relevance: HashMap<String, f64>,
    pub job_description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationMetrics {
    pub test_case_id: String,
    pub precision_at_1: f64,
    pub precision_at_3: f64,
    pub precision_at_5: f64,
    pub recall_at_3: f64,
    pub recall_at_5: f64,
    pub ndcg: f64,
    pub mrr: f64,
    pub rank_correlation: f64,
    pub overall_accuracy: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub avg_precision_at_3: f64,
    pub avg_recall_at_5: f64,
    pub avg_ndcg: f64,
    pub avg_overall_accuracy: f64,
    pub test_cases_run: usize,
    pub individual_results: Vec<ValidationMetrics>,
}

/// Compares predicted rankings against ground truth. All metrics are
/// percentages in 0-100; `overall_accuracy` is the weighted blend used as
/// the tested accuracy figure.
#[derive(Debug, Default)]
pub struct AccuracyValidator {
    test_cases: Vec<TestCase>,
}

impl AccuracyValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_test_case(&mut self, case: TestCase) {
        self.test_cases.push(case);
    }

    /// Share of the predicted top-k that appears in the ground-truth top-k.
    pub fn precision_at_k(predicted: &[String], ground_truth: &[String], k: usize) -> f64 {
        let k = k.min(predicted.len());
        if k == 0 {
            return 0.0;
        }

        let predicted_top: HashSet<&String> = predicted[..k].iter().collect();
        let truth_top: HashSet<&String> = ground_truth.iter().take(k).collect();

        let correct = predicted_top.intersection(&truth_top).count();
        correct as f64 / k as f64 * 100.0
    }

    /// Share of the ground-truth top-k recovered by the predicted top-k.
    pub fn recall_at_k(predicted: &[String], ground_truth: &[String], k: usize) -> f64 {
        let k = k.min(predicted.len());
        let truth_top: HashSet<&String> = ground_truth.iter().take(k).collect();
        if truth_top.is_empty() {
            return 0.0;
        }

        let predicted_top: HashSet<&String> = predicted[..k].iter().collect();
        let correct = predicted_top.intersection(&truth_top).count();
        correct as f64 / truth_top.len() as f64 * 100.0
    }

    /// Normalized discounted cumulative gain with exponential relevance.
    pub fn ndcg(predicted: &[String], relevance: &HashMap<String, f64>) -> f64 {
        if predicted.is_empty() {
            return 0.0;
        }

        let gain = |rel: f64| 2f64.powf(rel) - 1.0;
        let discount = |position: usize| ((position + 2) as f64).log2();

        let dcg: f64 = predicted
            .iter()
            .enumerate()
            .map(|(i, id)| gain(relevance.get(id).copied().unwrap_or(0.0)) / discount(i))
            .sum();

        let mut ideal: Vec<f64> = relevance.values().copied().collect();
        ideal.sort_by(|a, b| b.partial_cmp(a).unwrap_or(std::cmp::Ordering::Equal));
        let idcg: f64 = ideal
            .iter()
            .enumerate()
            .map(|(i, rel)| gain(*rel) / discount(i))
            .sum();

        if idcg == 0.0 {
            return 0.0;
        }
        dcg / idcg * 100.0
    }

    /// Reciprocal rank of the first prediction that lands in the top 3 of
    /// the ground truth.
    pub fn mean_reciprocal_rank(predicted: &[String], ground_truth: &[String]) -> f64 {
        let relevant: HashSet<&String> = ground_truth.iter().take(3).collect();

        for (i, id) in predicted.iter().enumerate() {
            if relevant.contains(id) {
                return 1.0 / (i + 1) as f64 * 100.0;
            }
        }
        0.0
    }

    /// Spearman rank correlation over the ids common to both rankings.
    pub fn rank_correlation(predicted: &[String], ground_truth: &[String]) -> f64 {
        let predicted_ranks: HashMap<&String, usize> = predicted
            .iter()
            .enumerate()
            .map(|(i, id)| (id, i))
            .collect();
        let truth_ranks: HashMap<&String, usize> = ground_truth
            .iter()
            .enumerate()
            .map(|(i, id)| (id, i))
            .collect();

        let common: Vec<&String> = predicted
            .iter()
            .filter(|id| truth_ranks.contains_key(id))
            .collect();
        if common.len() < 2 {
            return 0.0;
        }

        let xs: Vec<f64> = common.iter().map(|id| predicted_ranks[*id] as f64).collect();
        let ys: Vec<f64> = common.iter().map(|id| truth_ranks[*id] as f64).collect();

        let correlation = pearson(&xs, &ys);
        if correlation.is_nan() {
            return 0.0;
        }
        correlation * 100.0
    }

    /// All metrics for one test case, or `None` when the id is unknown.
    pub fn validate_ranking(
        &self,
        predicted: &[String],
        test_case_id: &str,
    ) -> Option<ValidationMetrics> {
        let case = self.test_cases.iter().find(|c| c.id == test_case_id)?;

        let precision_at_3 = Self::precision_at_k(predicted, &case.ground_truth, 3);
        let recall_at_5 = Self::recall_at_k(predicted, &case.ground_truth, 5);
        let ndcg = Self::ndcg(predicted, &case.relevance);
        let rank_correlation = Self::rank_correlation(predicted, &case.ground_truth);

        let overall_accuracy = precision_at_3 * 0.3
            + recall_at_5 * 0.2
            + ndcg * 0.3
            + rank_correlation * 0.2;

        Some(ValidationMetrics {
            test_case_id: case.id.clone(),
            precision_at_1: Self::precision_at_k(predicted, &case.ground_truth, 1),
            precision_at_3,
            precision_at_5: Self::precision_at_k(predicted, &case.ground_truth, 5),
            recall_at_3: Self::recall_at_k(predicted, &case.ground_truth, 3),
            recall_at_5,
            ndcg,
            mrr: Self::mean_reciprocal_rank(predicted, &case.ground_truth),
            rank_correlation,
            overall_accuracy,
        })
    }

    /// Validate multiple predicted rankings keyed by test case id.
    pub fn run_validation_suite(
        &self,
        predictions: &HashMap<String, Vec<String>>,
    ) -> ValidationSummary {
        let individual_results: Vec<ValidationMetrics> = predictions
            .iter()
            .filter_map(|(id, predicted)| self.validate_ranking(predicted, id))
            .collect();

        let n = individual_results.len();
        let avg = |f: fn(&ValidationMetrics) -> f64| -> f64 {
            if n == 0 {
                0.0
            } else {
                individual_results.iter().map(f).sum::<f64>() / n as f64
            }
        };

        ValidationSummary {
            avg_precision_at_3: avg(|m| m.precision_at_3),
            avg_recall_at_5: avg(|m| m.recall_at_5),
            avg_ndcg: avg(|m| m.ndcg),
            avg_overall_accuracy: avg(|m| m.overall_accuracy),
            test_cases_run: n,
            individual_results,
        }
    }
}

fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len() as f64;
    let mean_x = xs.iter().sum::<f64>() / n;
    let mean_y = ys.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys.iter()) {
        cov += (x - mean_x) * (y - mean_y);
        var_x += (x - mean_x).powi(2);
        var_y += (y - mean_y).powi(2);
    }

    cov / (var_x.sqrt() * var_y.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn sample_case() -> TestCase {
        let mut relevance = HashMap::new();
        relevance.insert("a".to_string(), 95.0);
        relevance.insert("b".to_string(), 88.0);
        relevance.insert("c".to_string(), 75.0);
        relevance.insert("d".to_string(), 60.0);
        relevance.insert("e".to_string(), 45.0);

        TestCase {
            id: "python_dev".to_string(),
            ground_truth: ids(&["a", "b", "c", "d", "e"]),
            relevance,
            job_description: "Senior Python Developer with ML expertise".to_string(),
        }
    }

    #[test]
    fn test_perfect_ranking_scores_hundred() {
        let mut validator = AccuracyValidator::new();
        validator.add_test_case(sample_case());

        let metrics = validator
            .validate_ranking(&ids(&["a", "b", "c", "d", "e"]), "python_dev")
            .unwrap();

        assert!((metrics.precision_at_3 - 100.0).abs() < 1e-9);
        assert!((metrics.ndcg - 100.0).abs() < 1e-9);
        assert!((metrics.rank_correlation - 100.0).abs() < 1e-9);
        assert!((metrics.overall_accuracy - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_reversed_ranking_has_negative_correlation() {
        let correlation =
            AccuracyValidator::rank_correlation(&ids(&["e", "d", "c", "b", "a"]), &ids(&["a", "b", "c", "d", "e"]));

        assert!((correlation + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_precision_at_k_partial_overlap() {
        let precision = AccuracyValidator::precision_at_k(
            &ids(&["a", "x", "y"]),
            &ids(&["a", "b", "c"]),
            3,
        );

        assert!((precision - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_mrr_first_hit_position() {
        let mrr =
            AccuracyValidator::mean_reciprocal_rank(&ids(&["x", "b", "y"]), &ids(&["a", "b", "c"]));

        assert!((mrr - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_test_case() {
        let validator = AccuracyValidator::new();
        assert!(validator.validate_ranking(&ids(&["a"]), "missing").is_none());
    }

    #[test]
    fn test_validation_suite_averages() {
        let mut validator = AccuracyValidator::new();
        validator.add_test_case(sample_case());

        let mut predictions = HashMap::new();
        predictions.insert("python_dev".to_string(), ids(&["a", "b", "c", "d", "e"]));
        let summary = validator.run_validation_suite(&predictions);

        assert_eq!(summary.test_cases_run, 1);
        assert!((summary.avg_overall_accuracy - 100.0).abs() < 1e-9);
    }
}
