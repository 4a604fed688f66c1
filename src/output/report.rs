//! Serializable ranking report

use crate::evaluation::metrics::PerformanceMetrics;
use crate::optimizer::GaReport;
use crate::ranking::engine::{RankedResume, RankingOutcome, ScoringStrategy};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub generated_at: DateTime<Utc>,
    pub job_summary: String,
    pub strategy: ScoringStrategy,
    pub results: Vec<RankedResume>,
    pub metrics: PerformanceMetrics,
    pub ga_report: Option<GaReport>,
    pub version: String,
}

impl RankingReport {
    pub fn new(
        job_description: &str,
        outcome: RankingOutcome,
        metrics: PerformanceMetrics,
    ) -> Self {
        Self {
            generated_at: Utc::now(),
            job_summary: summarize(job_description, 120),
            strategy: outcome.strategy,
            results: outcome.results,
            metrics,
            ga_report: outcome.ga_report,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// First `limit` characters of the job description, on a single line
fn summarize(text: &str, limit: usize) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= limit {
        return single_line;
    }
    let truncated: String = single_line.chars().take(limit).collect();
    format!("{}...", truncated.trim_end())
}
