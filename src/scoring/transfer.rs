//! Cross-domain experience transfer scoring

/// Scores how well experience transfers between job and resume domains
/// using indicator vectors over a shared keyword vocabulary.
/// Domain order matters: ties in keyword hits resolve to the domain
/// declared first.
pub struct ExperienceTransfer {
    domains: Vec<(String, Vec<String>)>,
    vocabulary: Vec<String>,
}

impl Default for ExperienceTransfer {
    fn default() -> Self {
        Self::new(Self::default_domains())
    }
}

impl ExperienceTransfer {
    pub fn new(domains: Vec<(String, Vec<String>)>) -> Self {
        let mut vocabulary: Vec<String> = domains
            .iter()
            .flat_map(|(_, keywords)| keywords)
            .cloned()
            .collect();
        vocabulary.sort();
        vocabulary.dedup();

        Self { domains, vocabulary }
    }

    /// Detect the dominant domain by keyword occurrence, or None when no
    /// domain keyword appears.
    pub fn detect_domain(&self, text: &str) -> Option<&str> {
        let text_lower = text.to_lowercase();
        let mut best: Option<(&str, usize)> = None;

        for (domain, keywords) in &self.domains {
            let hits = keywords
                .iter()
                .filter(|k| text_lower.contains(k.as_str()))
                .count();
            if hits > 0 && best.map_or(true, |(_, best_hits)| hits > best_hits) {
                best = Some((domain.as_str(), hits));
            }
        }

        best.map(|(domain, _)| domain)
    }

    /// Transfer score in 0-100. Unresolvable domains yield a neutral 60.0.
    pub fn calculate_transfer_score(&self, job_text: &str, resume_text: &str) -> f64 {
        let job_domain = match self.detect_domain(job_text) {
            Some(d) => d,
            None => return 60.0,
        };
        let resume_domain = match self.detect_domain(resume_text) {
            Some(d) => d,
            None => return 60.0,
        };

        let job_vector = self.domain_vector(job_domain);
        let resume_vector = self.domain_vector(resume_domain);

        cosine(&job_vector, &resume_vector) * 100.0
    }

    fn domain_vector(&self, domain: &str) -> Vec<f64> {
        let keywords = self
            .domains
            .iter()
            .find(|(name, _)| name == domain)
            .map(|(_, keywords)| keywords.as_slice())
            .unwrap_or(&[]);
        self.vocabulary
            .iter()
            .map(|term| if keywords.contains(term) { 1.0 } else { 0.0 })
            .collect()
    }

    fn default_domains() -> Vec<(String, Vec<String>)> {
        let entry = |name: &str, keywords: &[&str]| -> (String, Vec<String>) {
            (
                name.to_string(),
                keywords.iter().map(|k| k.to_string()).collect(),
            )
        };
        vec![
            entry("tech", &["software", "it", "developer", "engineering", "data"]),
            entry("finance", &["bank", "finance", "audit", "accounting", "tax"]),
            entry("healthcare", &["medical", "health", "patient", "clinical", "care"]),
            entry("marketing", &["sales", "marketing", "brand", "content", "social"]),
        ]
    }
}

fn cosine(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f64 = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_domain() {
        let transfer = ExperienceTransfer::default();

        assert_eq!(
            transfer.detect_domain("software developer with data skills"),
            Some("tech")
        );
        assert_eq!(
            transfer.detect_domain("bank audit and tax accounting"),
            Some("finance")
        );
        assert_eq!(transfer.detect_domain("professional chess player"), None);
    }

    #[test]
    fn test_domain_tie_resolves_in_declaration_order() {
        let transfer = ExperienceTransfer::default();

        // One tech keyword and one finance keyword: tech is declared first
        // and wins the tie
        assert_eq!(transfer.detect_domain("software banking"), Some("tech"));
        assert_eq!(transfer.detect_domain("banking software"), Some("tech"));
    }

    #[test]
    fn test_same_domain_scores_100() {
        let transfer = ExperienceTransfer::default();
        let score =
            transfer.calculate_transfer_score("software engineering role", "developer with data");

        assert!((score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_domains_score_zero() {
        let transfer = ExperienceTransfer::default();
        let score =
            transfer.calculate_transfer_score("software developer wanted", "clinical patient care");

        assert!(score.abs() < 1e-9);
    }

    #[test]
    fn test_unknown_domain_is_neutral() {
        let transfer = ExperienceTransfer::default();
        let score = transfer.calculate_transfer_score("underwater basket weaving", "developer");

        assert_eq!(score, 60.0);
    }
}
