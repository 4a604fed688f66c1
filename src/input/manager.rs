//! Input manager for handling different file types

use crate::config::InputConfig;
use crate::error::{Result, ResumeRankerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PdfExtractor, PlainTextExtractor, TextExtractor};
use crate::processing::resume::Resume;
use crate::processing::text_processor::TextProcessor;
use log::{info, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    cache: HashMap<String, String>,
    enable_cache: bool,
    max_file_size: u64,
    max_files: usize,
    processor: TextProcessor,
}

impl InputManager {
    pub fn new(config: &InputConfig) -> Self {
        Self {
            cache: HashMap::new(),
            enable_cache: config.enable_caching,
            max_file_size: config.max_file_size,
            max_files: config.max_files,
            processor: TextProcessor::new(),
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    pub async fn extract_text(&mut self, path: &Path) -> Result<String> {
        let path_str = path.to_string_lossy().to_string();

        if self.enable_cache {
            if let Some(cached_text) = self.cache.get(&path_str) {
                info!("Using cached text for: {}", path.display());
                return Ok(cached_text.clone());
            }
        }

        if !path.exists() {
            return Err(ResumeRankerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }
        self.validate_file_size(path)?;

        let file_type = self.detect_file_type(path)?;

        let text = match file_type {
            FileType::Pdf => {
                info!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await?
            }
            FileType::Text => {
                info!("Reading plain text file: {}", path.display());
                PlainTextExtractor.extract(path).await?
            }
            FileType::Markdown => {
                info!("Processing markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ResumeRankerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path_str, text.clone());
        }

        Ok(text)
    }

    /// Parse a batch of resume files. Individual failures and empty
    /// extractions are logged and skipped; the batch continues. Only a
    /// batch that exceeds the file-count limit is rejected outright.
    pub async fn load_resumes(&mut self, paths: &[PathBuf]) -> Result<Vec<Resume>> {
        if paths.len() > self.max_files {
            return Err(ResumeRankerError::InvalidInput(format!(
                "Too many resumes: {} (maximum is {})",
                paths.len(),
                self.max_files
            )));
        }

        let mut resumes = Vec::with_capacity(paths.len());
        for path in paths {
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_else(|| path.display().to_string());

            match self.extract_text(path).await {
                Ok(raw_text) => {
                    let resume = Resume::new(filename.clone(), raw_text, &self.processor);
                    if resume.is_empty() {
                        warn!("Skipping '{}': no extractable text", filename);
                        continue;
                    }
                    resumes.push(resume);
                }
                Err(e) => {
                    warn!("Skipping '{}': {}", filename, e);
                }
            }
        }

        info!("Loaded {} of {} resume files", resumes.len(), paths.len());
        Ok(resumes)
    }

    fn validate_file_size(&self, path: &Path) -> Result<()> {
        let metadata = std::fs::metadata(path)?;
        if metadata.len() > self.max_file_size {
            return Err(ResumeRankerError::InvalidInput(format!(
                "File too large: {} ({} bytes, maximum is {})",
                path.display(),
                metadata.len(),
                self.max_file_size
            )));
        }
        Ok(())
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path.extension().and_then(|ext| ext.to_str()).ok_or_else(|| {
            ResumeRankerError::InvalidInput(format!("File has no extension: {}", path.display()))
        })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::io::Write;

    fn write_resume(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{}", body).unwrap();
        path
    }

    #[tokio::test]
    async fn test_batch_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let good = write_resume(&dir, "good.txt", "Python developer with sql experience");
        let unsupported = write_resume(&dir, "bad.docx", "ignored");
        let missing = dir.path().join("missing.txt");

        let config = Config::default();
        let mut manager = InputManager::new(&config.input);
        let resumes = manager
            .load_resumes(&[good, unsupported, missing])
            .await
            .unwrap();

        assert_eq!(resumes.len(), 1);
        assert_eq!(resumes[0].filename, "good.txt");
    }

    #[tokio::test]
    async fn test_too_many_files_rejected() {
        let mut config = Config::default();
        config.input.max_files = 1;
        let mut manager = InputManager::new(&config.input);

        let paths = vec![PathBuf::from("a.txt"), PathBuf::from("b.txt")];
        assert!(manager.load_resumes(&paths).await.is_err());
    }

    #[tokio::test]
    async fn test_oversized_file_skipped_in_batch() {
        let dir = tempfile::tempdir().unwrap();
        let big = write_resume(&dir, "big.txt", &"x".repeat(100));

        let mut config = Config::default();
        config.input.max_file_size = 10;
        let mut manager = InputManager::new(&config.input);

        let resumes = manager.load_resumes(&[big]).await.unwrap();
        assert!(resumes.is_empty());
    }

    #[tokio::test]
    async fn test_cache_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_resume(&dir, "cached.txt", "Java developer, react projects");

        let config = Config::default();
        let mut manager = InputManager::new(&config.input);

        let first = manager.extract_text(&path).await.unwrap();
        assert_eq!(manager.cache_size(), 1);
        let second = manager.extract_text(&path).await.unwrap();
        assert_eq!(first, second);
    }
}
