//! CLI interface for the resume ranker

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-ranker")]
#[command(about = "Heuristic resume and job description ranking tool")]
#[command(
    long_about = "Rank a batch of resumes against a job description using keyword dictionaries, TF-IDF cosine similarity, fuzzy matching, a skill graph, and an evolutionary weight optimizer"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank resumes against a job description
    Rank {
        /// Path to job description file (TXT, MD)
        #[arg(short, long)]
        job: PathBuf,

        /// Paths to resume files (PDF, TXT, MD)
        #[arg(short, long, required = true, num_args = 1..)]
        resumes: Vec<PathBuf>,

        /// Scoring strategy: standard, ensemble, ga
        #[arg(short, long, default_value = "standard")]
        strategy: String,

        /// Skills weight (0.0 to 1.0)
        #[arg(long)]
        weight_skills: Option<f64>,

        /// Education weight (0.0 to 1.0)
        #[arg(long)]
        weight_education: Option<f64>,

        /// Output format: console, json, markdown, csv, html
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save output to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Output detailed per-metric scores
        #[arg(short, long)]
        detailed: bool,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        "csv" => Ok(crate::config::OutputFormat::Csv),
        "html" => Ok(crate::config::OutputFormat::Html),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown, csv, html",
            format
        )),
    }
}

/// Parse and validate scoring strategy
pub fn parse_strategy(strategy: &str) -> Result<crate::ranking::ScoringStrategy, String> {
    match strategy.to_lowercase().as_str() {
        "standard" | "all" => Ok(crate::ranking::ScoringStrategy::Standard),
        "ensemble" => Ok(crate::ranking::ScoringStrategy::Ensemble),
        "ga" => Ok(crate::ranking::ScoringStrategy::GaOnly),
        _ => Err(format!(
            "Invalid strategy: {}. Supported: standard, ensemble, ga",
            strategy
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
