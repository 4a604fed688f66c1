//! Career trajectory scoring from seniority keywords

use regex::Regex;

/// Scores career growth from job titles found in resume text.
pub struct CareerPredictor {
    seniority_keywords: Vec<(String, u8)>,
}

impl Default for CareerPredictor {
    fn default() -> Self {
        Self::new(Self::default_seniority_keywords())
    }
}

impl CareerPredictor {
    pub fn new(seniority_keywords: Vec<(String, u8)>) -> Self {
        Self { seniority_keywords }
    }

    /// Analyze career trajectory, returning a score in 0-100.
    /// No recognizable titles yields a neutral 50.0.
    pub fn analyze_trajectory(&self, resume_text: &str) -> f64 {
        let text_lower = resume_text.to_lowercase();
        let mut found_levels: Vec<f64> = Vec::new();

        for (title, level) in &self.seniority_keywords {
            let pattern = format!(r"\b{}\b", regex::escape(title));
            if let Ok(re) = Regex::new(&pattern) {
                if re.is_match(&text_lower) {
                    found_levels.push(f64::from(*level));
                }
            }
        }

        if found_levels.is_empty() {
            return 50.0;
        }

        let avg_level = found_levels.iter().sum::<f64>() / found_levels.len() as f64;
        let max_level = found_levels.iter().cloned().fold(f64::MIN, f64::max);

        let score = (max_level * 0.7 + avg_level * 0.3) * 10.0;
        score.min(100.0)
    }

    fn default_seniority_keywords() -> Vec<(String, u8)> {
        vec![
            ("intern".to_string(), 1),
            ("junior".to_string(), 2),
            ("associate".to_string(), 2),
            ("engineer".to_string(), 3),
            ("developer".to_string(), 3),
            ("analyst".to_string(), 3),
            ("senior".to_string(), 4),
            ("lead".to_string(), 5),
            ("manager".to_string(), 6),
            ("architect".to_string(), 7),
            ("director".to_string(), 8),
            ("vp".to_string(), 9),
            ("head".to_string(), 9),
            ("chief".to_string(), 10),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_titles_is_neutral() {
        let predictor = CareerPredictor::default();
        assert_eq!(predictor.analyze_trajectory("gardening enthusiast"), 50.0);
    }

    #[test]
    fn test_senior_title_scores() {
        let predictor = CareerPredictor::default();
        let score = predictor.analyze_trajectory("Senior developer with Python, 10 years");

        // senior=4, developer=3: (4*0.7 + 3.5*0.3) * 10
        assert!((score - 38.5).abs() < 1e-9);
    }

    #[test]
    fn test_management_titles_score_above_neutral() {
        let predictor = CareerPredictor::default();
        let score = predictor.analyze_trajectory("Engineering manager and former senior developer");

        // manager=6 dominates: (6*0.7 + avg*0.3) * 10 > 50
        assert!(score > 50.0);
        assert!(score <= 100.0);
    }

    #[test]
    fn test_chief_caps_at_100() {
        let predictor = CareerPredictor::default();
        let score = predictor.analyze_trajectory("chief architect and director, former vp");

        assert!(score <= 100.0);
        assert!(score > 80.0);
    }

    #[test]
    fn test_word_boundary_matching() {
        let predictor = CareerPredictor::default();
        // "leadership" must not match "lead"
        assert_eq!(predictor.analyze_trajectory("leadership training"), 50.0);
    }

    #[test]
    fn test_custom_vocabulary() {
        let predictor = CareerPredictor::new(vec![("wizard".to_string(), 10)]);
        assert!(predictor.analyze_trajectory("resident wizard") > 90.0);
    }
}
