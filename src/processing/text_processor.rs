//! Text cleaning, normalization, and contact extraction

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

pub struct TextProcessor {
    special_chars: Regex,
    whitespace: Regex,
    email_regex: Regex,
    phone_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        // Keep +, #, . so c++, c#, and node.js survive cleaning
        let special_chars = Regex::new(r"[^a-z0-9\s\+\#\.]").expect("Invalid special chars regex");
        let whitespace = Regex::new(r"\s+").expect("Invalid whitespace regex");

        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");

        let phone_regex =
            Regex::new(r"(\+\d{1,3}[-.]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}")
                .expect("Invalid phone regex");

        Self {
            special_chars,
            whitespace,
            email_regex,
            phone_regex,
        }
    }

    /// Clean and normalize text: lowercase, strip punctuation, collapse
    /// whitespace. Idempotent: cleaning already-clean text is a no-op.
    pub fn clean_text(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped = self.special_chars.replace_all(&lowered, " ");
        self.whitespace.replace_all(&stripped, " ").trim().to_string()
    }

    /// Extract the first email address from raw text
    pub fn extract_email(&self, text: &str) -> Option<String> {
        self.email_regex.find(text).map(|m| m.as_str().to_string())
    }

    /// Extract the first phone number from raw text
    pub fn extract_phone(&self, text: &str) -> Option<String> {
        self.phone_regex.find(text).map(|m| m.as_str().to_string())
    }

    /// Extract known skills using word-boundary matching
    pub fn extract_skills(&self, text: &str, skill_db: &[String]) -> Vec<String> {
        let text_lower = text.to_lowercase();
        let mut found = Vec::new();

        for skill in skill_db {
            let pattern = format!(r"\b{}\b", regex::escape(&skill.to_lowercase()));
            match Regex::new(&pattern) {
                Ok(re) => {
                    if re.is_match(&text_lower) {
                        found.push(skill.clone());
                    }
                }
                Err(e) => log::warn!("Skipping unmatchable skill '{}': {}", skill, e),
            }
        }

        found
    }
}

/// Tokenize into lowercase words using Unicode segmentation. Shared by the
/// vocabulary-diversity computations in the scorers.
pub fn tokenize(text: &str) -> Vec<String> {
    text.unicode_words().map(|w| w.to_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text_normalizes() {
        let processor = TextProcessor::new();
        let cleaned = processor.clean_text("Senior C++ Developer,\n  Node.js &  SQL!");

        assert_eq!(cleaned, "senior c++ developer node.js sql");
    }

    #[test]
    fn test_clean_text_is_idempotent() {
        let processor = TextProcessor::new();
        let once = processor.clean_text("Python / Machine-Learning   Engineer (Remote)");
        let twice = processor.clean_text(&once);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_extract_email() {
        let processor = TextProcessor::new();
        let text = "Contact: jane.doe@example.com or via LinkedIn";

        assert_eq!(
            processor.extract_email(text),
            Some("jane.doe@example.com".to_string())
        );
        assert_eq!(processor.extract_email("no contact info"), None);
    }

    #[test]
    fn test_extract_phone() {
        let processor = TextProcessor::new();

        assert_eq!(
            processor.extract_phone("Call (555) 123-4567 today"),
            Some("(555) 123-4567".to_string())
        );
        assert!(processor.extract_phone("+1-555-123-4567").is_some());
        assert_eq!(processor.extract_phone("no digits here"), None);
    }

    #[test]
    fn test_extract_skills_word_boundaries() {
        let processor = TextProcessor::new();
        let db = vec!["java".to_string(), "javascript".to_string()];

        let found = processor.extract_skills("Expert in JavaScript only", &db);
        assert_eq!(found, vec!["javascript".to_string()]);
    }

    #[test]
    fn test_tokenize_splits_on_punctuation() {
        let tokens = tokenize("Hands-on Python, SQL!");
        assert_eq!(tokens, vec!["hands", "on", "python", "sql"]);
    }
}
