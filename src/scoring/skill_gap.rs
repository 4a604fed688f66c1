//! Skill gap analysis against a weighted skill hierarchy

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillTier {
    Critical,
    Important,
    Useful,
    Other,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapAnalysis {
    pub score: f64,
    pub missing_skills: Vec<String>,
    pub present_skills: Vec<String>,
    /// Percentage of required skills found in the resume
    pub skill_coverage: f64,
    pub gaps_by_tier: BTreeMap<SkillTier, Vec<String>>,
}

pub struct SkillGapAnalyzer {
    hierarchy: BTreeMap<SkillTier, Vec<String>>,
    synonyms: BTreeMap<String, Vec<String>>,
    fallback_required: Vec<String>,
}

impl Default for SkillGapAnalyzer {
    fn default() -> Self {
        Self::new(Self::default_hierarchy(), Self::default_synonyms())
    }
}

impl SkillGapAnalyzer {
    pub fn new(
        hierarchy: BTreeMap<SkillTier, Vec<String>>,
        synonyms: BTreeMap<String, Vec<String>>,
    ) -> Self {
        Self {
            hierarchy,
            synonyms,
            fallback_required: vec![
                "python".to_string(),
                "communication".to_string(),
                "problem solving".to_string(),
                "teamwork".to_string(),
            ],
        }
    }

    /// Gap analysis between required skills (from the job description) and
    /// the resume. Score in 0-100.
    pub fn analyze_gap(&self, job_description: &str, resume_text: &str) -> GapAnalysis {
        let mut required = self.extract_skills(job_description);
        let resume_skills = self.extract_skills(resume_text);

        if required.is_empty() {
            required = self.fallback_required.iter().cloned().collect();
        }

        let missing: BTreeSet<String> = required.difference(&resume_skills).cloned().collect();
        let present: BTreeSet<String> = required.intersection(&resume_skills).cloned().collect();

        let mut total_penalty = 0.0;
        let mut gaps_by_tier: BTreeMap<SkillTier, Vec<String>> = BTreeMap::new();

        for skill in &missing {
            let tier = self.skill_tier(skill);
            total_penalty += Self::tier_penalty(tier);
            gaps_by_tier.entry(tier).or_default().push(skill.clone());
        }

        let base_score = (100.0 - total_penalty).max(0.0);
        let coverage = if required.is_empty() {
            1.0
        } else {
            present.len() as f64 / required.len() as f64
        };
        let adjusted = (base_score * (0.7 + 0.3 * coverage)).min(100.0);

        GapAnalysis {
            score: adjusted,
            missing_skills: missing.into_iter().collect(),
            present_skills: present.into_iter().collect(),
            skill_coverage: coverage * 100.0,
            gaps_by_tier,
        }
    }

    /// Word-boundary skill extraction with synonym normalization
    fn extract_skills(&self, text: &str) -> BTreeSet<String> {
        let text_lower = text.to_lowercase();
        let mut extracted = BTreeSet::new();

        for skills in self.hierarchy.values() {
            for skill in skills {
                if Self::word_match(&text_lower, skill) {
                    extracted.insert(self.normalize_skill(skill));
                }

                if let Some(variants) = self.synonyms.get(skill) {
                    for variant in variants {
                        if Self::word_match(&text_lower, variant) {
                            extracted.insert(self.normalize_skill(skill));
                        }
                    }
                }
            }
        }

        extracted
    }

    fn word_match(text: &str, term: &str) -> bool {
        let pattern = format!(r"\b{}\b", regex::escape(&term.to_lowercase()));
        Regex::new(&pattern).map(|re| re.is_match(text)).unwrap_or(false)
    }

    fn normalize_skill(&self, skill: &str) -> String {
        let skill_lower = skill.to_lowercase();
        for (standard, variants) in &self.synonyms {
            if variants.iter().any(|v| *v == skill_lower) {
                return standard.clone();
            }
        }
        skill_lower
    }

    fn skill_tier(&self, skill: &str) -> SkillTier {
        for (tier, skills) in &self.hierarchy {
            if skills.iter().any(|s| s == skill) {
                return *tier;
            }
        }
        SkillTier::Other
    }

    fn tier_penalty(tier: SkillTier) -> f64 {
        match tier {
            SkillTier::Critical => 20.0,
            SkillTier::Important => 10.0,
            SkillTier::Useful => 5.0,
            SkillTier::Other => 8.0,
        }
    }

    fn default_hierarchy() -> BTreeMap<SkillTier, Vec<String>> {
        let to_vec = |words: &[&str]| words.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let mut hierarchy = BTreeMap::new();
        hierarchy.insert(
            SkillTier::Critical,
            to_vec(&[
                "python",
                "java",
                "sql",
                "aws",
                "machine learning",
                "leadership",
                "communication",
            ]),
        );
        hierarchy.insert(
            SkillTier::Important,
            to_vec(&[
                "react",
                "node.js",
                "docker",
                "kubernetes",
                "git",
                "problem solving",
                "teamwork",
            ]),
        );
        hierarchy.insert(
            SkillTier::Useful,
            to_vec(&[
                "html",
                "css",
                "javascript",
                "excel",
                "powerpoint",
                "project management",
                "agile",
            ]),
        );
        hierarchy
    }

    fn default_synonyms() -> BTreeMap<String, Vec<String>> {
        let to_vec = |words: &[&str]| words.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let mut synonyms = BTreeMap::new();
        synonyms.insert("python".to_string(), to_vec(&["python", "py", "python3"]));
        synonyms.insert(
            "javascript".to_string(),
            to_vec(&["javascript", "js", "ecmascript"]),
        );
        synonyms.insert(
            "machine learning".to_string(),
            to_vec(&["machine learning", "ml", "artificial intelligence", "ai"]),
        );
        synonyms.insert(
            "communication".to_string(),
            to_vec(&["communication", "interpersonal", "verbal", "written"]),
        );
        synonyms
    }
}
