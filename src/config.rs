//! Configuration management for the resume ranker

use crate::error::{Result, ResumeRankerError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub input: InputConfig,
    pub scoring: ScoringConfig,
    pub optimizer: OptimizerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Maximum size of a single resume file in bytes
    pub max_file_size: u64,
    /// Maximum number of resumes per ranking run
    pub max_files: usize,
    /// Minimum job description length in characters
    pub min_job_description_len: usize,
    /// Maximum job description length in characters
    pub max_job_description_len: usize,
    pub enable_caching: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub skills_weight: f64,
    pub education_weight: f64,
    /// Fuzzy skill match threshold (0-100)
    pub fuzzy_threshold: f64,
    /// Skills surfaced as matched/missing in ranking results
    pub display_skills: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    pub population_size: usize,
    pub generations: usize,
    pub mutation_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Csv,
    Html,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: InputConfig {
                max_file_size: 10 * 1024 * 1024,
                max_files: 50,
                min_job_description_len: 50,
                max_job_description_len: 50_000,
                enable_caching: true,
            },
            scoring: ScoringConfig {
                skills_weight: 0.7,
                education_weight: 0.3,
                fuzzy_threshold: 80.0,
                display_skills: vec![
                    "python".to_string(),
                    "java".to_string(),
                    "flask".to_string(),
                    "sql".to_string(),
                    "react".to_string(),
                    "machine learning".to_string(),
                    "ai".to_string(),
                ],
            },
            optimizer: OptimizerConfig {
                population_size: 20,
                generations: 10,
                mutation_rate: 0.1,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = toml::from_str(&content).map_err(|e| {
                ResumeRankerError::Configuration(format!("Failed to parse config: {}", e))
            })?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            ResumeRankerError::Configuration(format!("Failed to serialize config: {}", e))
        })?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-ranker")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.scoring.skills_weight < 0.0 || self.scoring.education_weight < 0.0 {
            return Err(ResumeRankerError::Configuration(
                "Scoring weights must be non-negative".to_string(),
            ));
        }
        if self.scoring.skills_weight + self.scoring.education_weight <= 0.0 {
            return Err(ResumeRankerError::Configuration(
                "At least one scoring weight must be greater than zero".to_string(),
            ));
        }
        if self.optimizer.population_size < 2 {
            return Err(ResumeRankerError::Configuration(
                "Optimizer population size must be at least 2".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.optimizer.mutation_rate) {
            return Err(ResumeRankerError::Configuration(
                "Mutation rate must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Skills/education weights normalized to sum to 1.0
    pub fn normalized_weights(&self) -> (f64, f64) {
        let total = self.scoring.skills_weight + self.scoring.education_weight;
        (
            self.scoring.skills_weight / total,
            self.scoring.education_weight / total,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_normalized_weights_sum_to_one() {
        let mut config = Config::default();
        config.scoring.skills_weight = 0.5;
        config.scoring.education_weight = 0.3;

        let (skills, education) = config.normalized_weights();
        assert!((skills + education - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_weights_rejected() {
        let mut config = Config::default();
        config.scoring.skills_weight = 0.0;
        config.scoring.education_weight = 0.0;
        assert!(config.validate().is_err());
    }
}
