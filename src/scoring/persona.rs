//! Persona detection and job/resume persona compatibility scoring

use std::collections::BTreeMap;

pub struct PersonaMatcher {
    personas: BTreeMap<String, Vec<String>>,
    compatibility: Vec<((String, String), f64)>,
}

impl Default for PersonaMatcher {
    fn default() -> Self {
        Self::new(Self::default_personas(), Self::default_compatibility())
    }
}

impl PersonaMatcher {
    pub fn new(
        personas: BTreeMap<String, Vec<String>>,
        compatibility: Vec<((String, String), f64)>,
    ) -> Self {
        Self {
            personas,
            compatibility,
        }
    }

    /// Detect the dominant persona and its confidence percentage.
    /// Returns None when no persona keyword appears at all.
    pub fn detect_persona(&self, text: &str) -> Option<(String, f64)> {
        let text_lower = text.to_lowercase();
        let mut scores: BTreeMap<&str, f64> = BTreeMap::new();

        for (persona, keywords) in &self.personas {
            let mut weighted_score = 0.0;
            for keyword in keywords {
                let occurrences = text_lower.matches(keyword.as_str()).count() as f64;
                // Log weighting keeps a single repeated keyword from dominating
                weighted_score += 1.0 + (1.0 + occurrences).ln();
            }
            scores.insert(persona, weighted_score);
        }

        let total: f64 = scores.values().sum();
        if total == 0.0 {
            return None;
        }

        let (dominant, score) = scores
            .iter()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap_or(std::cmp::Ordering::Equal))?;

        let confidence = (score / total) * 100.0;
        Some((dominant.to_string(), confidence))
    }

    /// Persona compatibility score in 0-100.
    pub fn match_persona(&self, job_text: &str, resume_text: &str) -> f64 {
        let (job_persona, job_conf) = match self.detect_persona(job_text) {
            Some(p) => p,
            None => return 50.0,
        };
        let (resume_persona, resume_conf) = match self.detect_persona(resume_text) {
            Some(p) => p,
            None => return 50.0,
        };

        let base_score = if job_persona == resume_persona {
            100.0
        } else {
            self.compatibility_score(&job_persona, &resume_persona)
        };

        let confidence_factor = job_conf.min(resume_conf) / 100.0;
        let adjusted = base_score * (0.7 + 0.3 * confidence_factor);

        adjusted.min(100.0)
    }

    fn compatibility_score(&self, a: &str, b: &str) -> f64 {
        for ((p1, p2), score) in &self.compatibility {
            if (p1 == a && p2 == b) || (p1 == b && p2 == a) {
                return *score;
            }
        }
        50.0
    }

    fn default_personas() -> BTreeMap<String, Vec<String>> {
        let to_vec = |words: &[&str]| words.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let mut personas = BTreeMap::new();
        personas.insert(
            "leader".to_string(),
            to_vec(&[
                "manage", "lead", "direct", "strategy", "oversee", "budget", "team", "executive",
                "vision", "mentor",
            ]),
        );
        personas.insert(
            "developer".to_string(),
            to_vec(&[
                "code", "program", "develop", "software", "engineer", "implement", "debug", "api",
                "framework", "algorithm",
            ]),
        );
        personas.insert(
            "analyst".to_string(),
            to_vec(&[
                "analyze", "data", "report", "research", "insight", "trend", "metric", "evaluate",
                "statistics", "visualization",
            ]),
        );
        personas.insert(
            "creative".to_string(),
            to_vec(&[
                "design", "creative", "innovative", "artistic", "visual", "brand", "content",
                "marketing", "ux", "ui",
            ]),
        );
        personas.insert(
            "technical".to_string(),
            to_vec(&[
                "technical", "system", "infrastructure", "network", "security", "database",
                "server", "cloud", "devops", "architecture",
            ]),
        );
        personas
    }

    fn default_compatibility() -> Vec<((String, String), f64)> {
        let pair = |a: &str, b: &str, s: f64| ((a.to_string(), b.to_string()), s);
        vec![
            pair("leader", "analyst", 75.0),
            pair("leader", "technical", 70.0),
            pair("developer", "technical", 85.0),
            pair("developer", "analyst", 80.0),
            pair("creative", "developer", 70.0),
            pair("analyst", "technical", 75.0),
            pair("creative", "analyst", 60.0),
        ]
    }
}
