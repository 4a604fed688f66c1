//! Blended ensemble scoring with synergy and confidence adjustments

use crate::processing::text_processor::tokenize;
use crate::scoring::embedding::EmbeddingBackend;
use crate::scoring::graph::SkillGraphMatcher;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Hard ceiling for the ensemble score; everything else stays in 0-100
pub const ENSEMBLE_SCORE_CAP: f64 = 115.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleScore {
    pub final_score: f64,
    pub base_score: f64,
    pub embedding_score: Option<f64>,
    pub graph_score: f64,
    pub synergy_bonus: f64,
    pub perfect_match_bonus: f64,
    pub confidence_multiplier: f64,
}

/// Combines embedding and skill-graph similarity with bonus terms that can
/// push the score above 100 (capped at [`ENSEMBLE_SCORE_CAP`]).
pub struct SuperEnsemble<'a> {
    embedding: &'a dyn EmbeddingBackend,
    graph_matcher: &'a SkillGraphMatcher,
    critical_skills: Vec<(String, f64)>,
}

impl<'a> SuperEnsemble<'a> {
    pub fn new(embedding: &'a dyn EmbeddingBackend, graph_matcher: &'a SkillGraphMatcher) -> Self {
        Self {
            embedding,
            graph_matcher,
            critical_skills: Self::default_critical_skills(),
        }
    }

    pub fn score(&self, job_desc: &str, resume_text: &str) -> EnsembleScore {
        let embedding_score = self.embedding.score(job_desc, resume_text);
        let graph_score = self.graph_matcher.graph_similarity(job_desc, resume_text);

        // Weight renormalization when the embedding capability is absent
        let base_score = match embedding_score {
            Some(emb) => 0.6 * emb + 0.4 * graph_score,
            None => graph_score,
        };

        let synergy_bonus = match embedding_score {
            Some(emb) => synergy_bonus(emb, graph_score),
            None => 0.0,
        };
        let perfect_match_bonus = self.perfect_match_bonus(job_desc, resume_text);
        let confidence_multiplier = confidence_multiplier(resume_text);

        let raw = (base_score + synergy_bonus + perfect_match_bonus) * confidence_multiplier;

        EnsembleScore {
            final_score: raw.min(ENSEMBLE_SCORE_CAP),
            base_score,
            embedding_score,
            graph_score,
            synergy_bonus,
            perfect_match_bonus,
            confidence_multiplier,
        }
    }

    /// Weighted bonus for critical skills appearing in both documents
    fn perfect_match_bonus(&self, job_desc: &str, resume_text: &str) -> f64 {
        let job_lower = job_desc.to_lowercase();
        let resume_lower = resume_text.to_lowercase();

        let total_weight: f64 = self.critical_skills.iter().map(|(_, w)| w).sum();
        if total_weight == 0.0 {
            return 0.0;
        }

        let matched_weight: f64 = self
            .critical_skills
            .iter()
            .filter(|(skill, _)| job_lower.contains(skill) && resume_lower.contains(skill))
            .map(|(_, weight)| weight)
            .sum();

        let match_ratio = matched_weight / total_weight;
        if match_ratio >= 0.9 {
            15.0
        } else if match_ratio >= 0.8 {
            12.0
        } else if match_ratio >= 0.6 {
            8.0
        } else {
            match_ratio * 5.0
        }
    }

    fn default_critical_skills() -> Vec<(String, f64)> {
        vec![
            ("python".to_string(), 3.0),
            ("java".to_string(), 3.0),
            ("communication".to_string(), 2.0),
            ("leadership".to_string(), 2.0),
            ("teamwork".to_string(), 1.0),
            ("problem-solving".to_string(), 2.0),
        ]
    }
}

/// Bonus for two scorers agreeing at a high level
fn synergy_bonus(score1: f64, score2: f64) -> f64 {
    let avg = (score1 + score2) / 2.0;
    let agreement = 1.0 - (score1 - score2).abs() / 100.0;

    if avg > 80.0 && agreement > 0.8 {
        15.0
    } else if avg > 70.0 && agreement > 0.7 {
        10.0
    } else {
        0.0
    }
}

/// Text-quality multiplier in 1.0-1.2 from length, diversity, and structure
fn confidence_multiplier(resume_text: &str) -> f64 {
    let length = resume_text.len() as f64;
    let words = tokenize(resume_text);
    let word_count = words.len() as f64;

    let unique_words: HashSet<&String> = words.iter().collect();

    let length_score = (length / 2000.0).min(1.0);
    let diversity_score = if word_count > 0.0 {
        unique_words.len() as f64 / word_count
    } else {
        0.0
    };
    let structure_score = (word_count / 500.0).min(1.0);

    let confidence = length_score * 0.4 + diversity_score * 0.3 + structure_score * 0.3;
    1.0 + confidence * 0.2
}
