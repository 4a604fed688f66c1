//! Resume record created on upload, immutable once parsed

use crate::processing::text_processor::TextProcessor;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resume {
    pub filename: String,
    pub raw_text: String,
    /// Normalized text used by all scorers
    pub text: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Resume {
    pub fn new(filename: String, raw_text: String, processor: &TextProcessor) -> Self {
        let text = processor.clean_text(&raw_text);
        let email = processor.extract_email(&raw_text);
        let phone = processor.extract_phone(&raw_text);

        Self {
            filename,
            raw_text,
            text,
            email,
            phone,
        }
    }

    /// True when normalization left no meaningful content to score
    pub fn is_empty(&self) -> bool {
        self.text.trim().len() < 10
    }
}
