//! Semantic embedding similarity as an optional capability

/// Backend producing a semantic similarity score in 0-100.
///
/// A backend that cannot score (no model available) returns `None`, and the
/// aggregator excludes the metric from the blend rather than folding in a
/// fake zero.
pub trait EmbeddingBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Semantic similarity in 0-100, or `None` when the capability is absent
    fn score(&self, job_desc: &str, resume_text: &str) -> Option<f64>;

    /// Batch variant; the default maps the per-pair scorer over the batch
    fn batch_scores(&self, job_desc: &str, resumes: &[String]) -> Vec<Option<f64>> {
        resumes
            .iter()
            .map(|resume| self.score(job_desc, resume))
            .collect()
    }

    fn is_available(&self) -> bool;
}

/// No-op backend shipped by default. Keeps the aggregator seam intact so a
/// real model backend can be substituted without touching ranking code.
pub struct DisabledEmbedding;

impl EmbeddingBackend for DisabledEmbedding {
    fn name(&self) -> &str {
        "disabled"
    }

    fn score(&self, _job_desc: &str, _resume_text: &str) -> Option<f64> {
        None
    }

    fn is_available(&self) -> bool {
        false
    }
}
