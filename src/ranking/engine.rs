//! Multi-metric ranking over a batch of parsed resumes

use crate::config::Config;
use crate::error::Result;
use crate::optimizer::{GaOptimizer, GaReport};
use crate::processing::resume::Resume;
use crate::ranking::normalize::{min_max_normalize, min_max_normalize_partial};
use crate::scoring::career::CareerPredictor;
use crate::scoring::embedding::{DisabledEmbedding, EmbeddingBackend};
use crate::scoring::ensemble::SuperEnsemble;
use crate::scoring::fuzzy::FuzzyScorer;
use crate::scoring::graph::SkillGraphMatcher;
use crate::scoring::innovation::InnovationScorer;
use crate::scoring::persona::PersonaMatcher;
use crate::scoring::skill_gap::SkillGapAnalyzer;
use crate::scoring::tfidf::TfidfScorer;
use crate::scoring::transfer::ExperienceTransfer;
use serde::{Deserialize, Serialize};

/// How the skills metric and final weights are produced for a batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoringStrategy {
    /// TF-IDF and fuzzy similarity averaged, fixed weights
    Standard,
    /// Ensemble score (embedding + skill graph with bonuses) taken as final
    Ensemble,
    /// Standard metrics with weights evolved by the genetic optimizer
    GaOnly,
}

impl ScoringStrategy {
    pub fn label(&self) -> &'static str {
        match self {
            ScoringStrategy::Standard => "standard",
            ScoringStrategy::Ensemble => "ensemble",
            ScoringStrategy::GaOnly => "ga",
        }
    }
}

/// Raw per-metric scores for one resume, before column normalization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreVector {
    pub skills: f64,
    pub education: f64,
    pub persona: f64,
    pub career: f64,
    pub gap: f64,
    pub transfer: f64,
    pub innovation: f64,
    /// Absent when no embedding backend is available
    pub embedding: Option<f64>,
    pub knowledge: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResume {
    pub filename: String,
    pub score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub scores: ScoreVector,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingOutcome {
    pub results: Vec<RankedResume>,
    pub strategy: ScoringStrategy,
    pub ga_report: Option<GaReport>,
}

pub struct RankingEngine {
    tfidf: TfidfScorer,
    fuzzy: FuzzyScorer,
    graph: SkillGraphMatcher,
    career: CareerPredictor,
    innovation: InnovationScorer,
    transfer: ExperienceTransfer,
    persona: PersonaMatcher,
    gap_analyzer: SkillGapAnalyzer,
    embedding: Box<dyn EmbeddingBackend>,
    optimizer: GaOptimizer,
    display_skills: Vec<String>,
    skills_weight: f64,
    education_weight: f64,
}

impl RankingEngine {
    pub fn new(config: &Config) -> Self {
        let (skills_weight, education_weight) = config.normalized_weights();

        Self {
            tfidf: TfidfScorer::default(),
            fuzzy: FuzzyScorer::new(config.scoring.fuzzy_threshold),
            graph: SkillGraphMatcher::default(),
            career: CareerPredictor::default(),
            innovation: InnovationScorer::default(),
            transfer: ExperienceTransfer::default(),
            persona: PersonaMatcher::default(),
            gap_analyzer: SkillGapAnalyzer::default(),
            embedding: Box::new(DisabledEmbedding),
            optimizer: GaOptimizer::from_config(&config.optimizer),
            display_skills: config.scoring.display_skills.clone(),
            skills_weight,
            education_weight,
        }
    }

    /// Swap in a different embedding backend. The shipped default answers
    /// `None` for every pair, which excludes the metric entirely.
    pub fn with_embedding(mut self, backend: Box<dyn EmbeddingBackend>) -> Self {
        self.embedding = backend;
        self
    }

    /// Score and sort a resume batch against one job description.
    pub fn rank(
        &self,
        job_description: &str,
        resumes: &[Resume],
        strategy: ScoringStrategy,
    ) -> Result<RankingOutcome> {
        if resumes.is_empty() {
            return Ok(RankingOutcome {
                results: Vec::new(),
                strategy,
                ga_report: None,
            });
        }

        log::info!(
            "Ranking {} resumes with the {} strategy",
            resumes.len(),
            strategy.label()
        );

        let texts: Vec<String> = resumes.iter().map(|r| r.text.clone()).collect();
        let tfidf_scores = self.tfidf.calculate_batch_similarity(job_description, &texts);
        let fuzzy_scores = self
            .fuzzy
            .calculate_batch_fuzzy_scores(job_description, &texts);

        let raw: Vec<ScoreVector> = resumes
            .iter()
            .enumerate()
            .map(|(i, resume)| {
                self.score_resume(
                    job_description,
                    resume,
                    tfidf_scores[i],
                    fuzzy_scores[i],
                    strategy,
                )
            })
            .collect();

        let columns = NormalizedColumns::from_raw(&raw, strategy);

        let (skills_weight, education_weight, ga_report) = match strategy {
            ScoringStrategy::GaOnly => {
                let report = self.optimizer.optimize();
                log::info!(
                    "Optimizer converged at fitness {:.2} after {} generations",
                    report.final_fitness,
                    report.generations
                );
                let weights = report.best_weights;
                (weights.skills, weights.education, Some(report))
            }
            _ => (self.skills_weight, self.education_weight, None),
        };

        let mut results: Vec<RankedResume> = resumes
            .iter()
            .enumerate()
            .map(|(i, resume)| {
                let scores = columns.vector_at(i);
                let score = match strategy {
                    ScoringStrategy::Ensemble => scores.skills,
                    _ => final_score(&scores, skills_weight, education_weight),
                };

                let (matched, missing) =
                    self.fuzzy.match_skills(&self.display_skills, &resume.text);

                RankedResume {
                    filename: resume.filename.clone(),
                    score,
                    matched_skills: matched,
                    missing_skills: missing,
                    email: resume.email.clone(),
                    phone: resume.phone.clone(),
                    scores,
                }
            })
            .collect();

        // Stable sort keeps input order for tied scores
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(RankingOutcome {
            results,
            strategy,
            ga_report,
        })
    }

    fn score_resume(
        &self,
        job_description: &str,
        resume: &Resume,
        tfidf_score: f64,
        fuzzy_score: f64,
        strategy: ScoringStrategy,
    ) -> ScoreVector {
        let skills = match strategy {
            ScoringStrategy::Ensemble => {
                let ensemble = SuperEnsemble::new(self.embedding.as_ref(), &self.graph);
                ensemble.score(job_description, &resume.text).final_score
            }
            _ => (tfidf_score + fuzzy_score) / 2.0,
        };

        // Placeholder until structured education parsing exists: longer
        // resumes tend to carry more history
        let education = (resume.text.len() as f64 / 60.0).min(100.0);

        ScoreVector {
            skills,
            education,
            persona: self.persona.match_persona(job_description, &resume.text),
            career: self.career.analyze_trajectory(&resume.text),
            gap: self.gap_analyzer.analyze_gap(job_description, &resume.text).score,
            transfer: self
                .transfer
                .calculate_transfer_score(job_description, &resume.text),
            innovation: self.innovation.calculate_innovation_score(&resume.text),
            embedding: self.embedding.score(job_description, &resume.text),
            knowledge: self.graph.graph_similarity(job_description, &resume.text),
        }
    }
}

/// Column-normalized metric values for a whole batch. The ensemble skills
/// column is passed through raw so its 0-115 scale survives.
struct NormalizedColumns {
    skills: Vec<f64>,
    education: Vec<f64>,
    persona: Vec<f64>,
    career: Vec<f64>,
    gap: Vec<f64>,
    transfer: Vec<f64>,
    innovation: Vec<f64>,
    embedding: Vec<Option<f64>>,
    knowledge: Vec<f64>,
}

impl NormalizedColumns {
    fn from_raw(raw: &[ScoreVector], strategy: ScoringStrategy) -> Self {
        let column = |f: fn(&ScoreVector) -> f64| -> Vec<f64> {
            min_max_normalize(&raw.iter().map(f).collect::<Vec<_>>())
        };

        let skills = if strategy == ScoringStrategy::Ensemble {
            raw.iter().map(|v| v.skills).collect()
        } else {
            column(|v| v.skills)
        };

        let embedding_raw: Vec<Option<f64>> = raw.iter().map(|v| v.embedding).collect();

        Self {
            skills,
            education: column(|v| v.education),
            persona: column(|v| v.persona),
            career: column(|v| v.career),
            gap: column(|v| v.gap),
            transfer: column(|v| v.transfer),
            innovation: column(|v| v.innovation),
            embedding: min_max_normalize_partial(&embedding_raw),
            knowledge: column(|v| v.knowledge),
        }
    }

    fn vector_at(&self, i: usize) -> ScoreVector {
        ScoreVector {
            skills: self.skills[i],
            education: self.education[i],
            persona: self.persona[i],
            career: self.career[i],
            gap: self.gap[i],
            transfer: self.transfer[i],
            innovation: self.innovation[i],
            embedding: self.embedding[i],
            knowledge: self.knowledge[i],
        }
    }
}

/// Base skills/education blend plus the mean of the remaining metrics.
/// Absent embedding scores never contribute to the mean.
fn final_score(scores: &ScoreVector, skills_weight: f64, education_weight: f64) -> f64 {
    let base = scores.skills * skills_weight + scores.education * education_weight;

    let mut advanced = vec![
        scores.persona,
        scores.career,
        scores.gap,
        scores.transfer,
        scores.innovation,
        scores.knowledge,
    ];
    if let Some(embedding) = scores.embedding {
        advanced.push(embedding);
    }
    let advanced_mean = advanced.iter().sum::<f64>() / advanced.len() as f64;

    base * 0.6 + advanced_mean * 0.4
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::text_processor::TextProcessor;

    fn make_resume(name: &str, body: &str) -> Resume {
        let processor = TextProcessor::new();
        Resume::new(name.to_string(), body.to_string(), &processor)
    }

    fn engine() -> RankingEngine {
        RankingEngine::new(&Config::default())
    }

    const JOB: &str = "Senior Python Developer with machine learning expertise, \
                       sql and react experience required, leadership a plus";

    #[test]
    fn test_empty_batch_gives_empty_results() {
        let outcome = engine()
            .rank(JOB, &[], ScoringStrategy::Standard)
            .unwrap();

        assert!(outcome.results.is_empty());
        assert!(outcome.ga_report.is_none());
    }

    #[test]
    fn test_results_sorted_descending() {
        let resumes = vec![
            make_resume("weak.txt", "Retail cashier with customer service experience"),
            make_resume(
                "strong.txt",
                "Senior python developer, machine learning, sql, react, \
                 leadership of a 10 person team, patents filed",
            ),
            make_resume("mid.txt", "Junior python developer, some sql knowledge"),
        ];

        let outcome = engine()
            .rank(JOB, &resumes, ScoringStrategy::Standard)
            .unwrap();

        assert_eq!(outcome.results.len(), 3);
        for window in outcome.results.windows(2) {
            assert!(window[0].score >= window[1].score);
        }
    }

    #[test]
    fn test_superset_resume_matches_at_least_as_many_skills() {
        let base = "Python developer with sql experience";
        let superset = "Python developer with sql experience, plus react, \
                        machine learning and java background";

        let resumes = vec![
            make_resume("base.txt", base),
            make_resume("superset.txt", superset),
        ];
        let outcome = engine()
            .rank(JOB, &resumes, ScoringStrategy::Standard)
            .unwrap();

        let base_matched = outcome
            .results
            .iter()
            .find(|r| r.filename == "base.txt")
            .map(|r| r.matched_skills.len())
            .unwrap();
        let superset_matched = outcome
            .results
            .iter()
            .find(|r| r.filename == "superset.txt")
            .map(|r| r.matched_skills.len())
            .unwrap();

        assert!(superset_matched >= base_matched);
    }

    #[test]
    fn test_ga_strategy_attaches_report() {
        let resumes = vec![
            make_resume("a.txt", "Python developer with sql and flask experience"),
            make_resume("b.txt", "Java developer with react experience"),
        ];

        let outcome = engine().rank(JOB, &resumes, ScoringStrategy::GaOnly).unwrap();

        let report = outcome.ga_report.expect("ga strategy must attach a report");
        assert!(report.best_weights.is_valid(1e-6));
        assert_eq!(outcome.results.len(), 2);
    }

    #[test]
    fn test_ensemble_strategy_scores_within_cap() {
        let resumes = vec![
            make_resume("a.txt", "Python, django, flask, pandas, machine learning"),
            make_resume("b.txt", "Marketing coordinator, social media campaigns"),
        ];

        let outcome = engine()
            .rank(JOB, &resumes, ScoringStrategy::Ensemble)
            .unwrap();

        for result in &outcome.results {
            assert!(result.score >= 0.0);
            assert!(result.score <= crate::scoring::ensemble::ENSEMBLE_SCORE_CAP);
        }
    }

    #[test]
    fn test_matched_and_missing_partition_display_skills() {
        let resumes = vec![make_resume(
            "a.txt",
            "Python and flask developer with react projects",
        )];

        let outcome = engine()
            .rank(JOB, &resumes, ScoringStrategy::Standard)
            .unwrap();
        let result = &outcome.results[0];

        let total = result.matched_skills.len() + result.missing_skills.len();
        assert_eq!(total, Config::default().scoring.display_skills.len());
        for skill in &result.matched_skills {
            assert!(!result.missing_skills.contains(skill));
        }
    }

    #[test]
    fn test_identical_resumes_tie_in_input_order() {
        let body = "Python developer with sql, flask and react experience";
        let resumes = vec![make_resume("first.txt", body), make_resume("second.txt", body)];

        let outcome = engine()
            .rank(JOB, &resumes, ScoringStrategy::Standard)
            .unwrap();

        assert_eq!(outcome.results[0].filename, "first.txt");
        assert_eq!(outcome.results[1].filename, "second.txt");
        assert!((outcome.results[0].score - outcome.results[1].score).abs() < 1e-9);
    }
}
