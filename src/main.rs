//! Resume ranker: heuristic resume and job description ranking tool

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_ranker::cli::{self, Cli, Commands, ConfigAction};
use resume_ranker::config::Config;
use resume_ranker::error::{Result, ResumeRankerError};
use resume_ranker::evaluation::metrics::PerformanceMonitor;
use resume_ranker::input::manager::InputManager;
use resume_ranker::output::formatter::{save_report_to_file, ReportGenerator};
use resume_ranker::output::report::RankingReport;
use resume_ranker::ranking::engine::RankingEngine;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Rank {
            job,
            resumes,
            strategy,
            weight_skills,
            weight_education,
            output,
            save,
            detailed,
        } => {
            rank_command(
                config,
                job,
                resumes,
                &strategy,
                weight_skills,
                weight_education,
                &output,
                save,
                detailed,
            )
            .await
        }
        Commands::Config { action } => config_command(config, action),
    }
}

#[allow(clippy::too_many_arguments)]
async fn rank_command(
    mut config: Config,
    job: PathBuf,
    resumes: Vec<PathBuf>,
    strategy: &str,
    weight_skills: Option<f64>,
    weight_education: Option<f64>,
    output: &str,
    save: Option<PathBuf>,
    detailed: bool,
) -> Result<()> {
    info!("Starting resume ranking");

    cli::validate_file_extension(&job, &["txt", "md"])
        .map_err(|e| ResumeRankerError::InvalidInput(format!("Job description file: {}", e)))?;

    let strategy = cli::parse_strategy(strategy).map_err(ResumeRankerError::InvalidInput)?;
    let output_format = cli::parse_output_format(output).map_err(ResumeRankerError::InvalidInput)?;

    if let Some(w) = weight_skills {
        config.scoring.skills_weight = w;
    }
    if let Some(w) = weight_education {
        config.scoring.education_weight = w;
    }
    config.validate()?;

    let mut input_manager = InputManager::new(&config.input);

    let job_text = input_manager.extract_text(&job).await?;
    let job_len = job_text.chars().count();
    if job_len < config.input.min_job_description_len {
        return Err(ResumeRankerError::InvalidInput(format!(
            "Job description too short: {} characters (minimum is {})",
            job_len, config.input.min_job_description_len
        )));
    }
    if job_len > config.input.max_job_description_len {
        return Err(ResumeRankerError::InvalidInput(format!(
            "Job description too long: {} characters (maximum is {})",
            job_len, config.input.max_job_description_len
        )));
    }

    if resumes.len() > config.input.max_files {
        return Err(ResumeRankerError::InvalidInput(format!(
            "Too many resumes: {} (maximum is {})",
            resumes.len(),
            config.input.max_files
        )));
    }

    let mut monitor = PerformanceMonitor::new();
    monitor.set_strategy(strategy.label());
    monitor.start_monitoring();

    let progress = ProgressBar::new(resumes.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );
    progress.set_message("parsing resumes");

    // Parse one at a time so the bar tracks real progress
    let mut parsed = Vec::with_capacity(resumes.len());
    for path in &resumes {
        let mut batch = input_manager.load_resumes(std::slice::from_ref(path)).await?;
        parsed.append(&mut batch);
        progress.inc(1);
    }
    progress.finish_with_message("resumes parsed");

    let engine = RankingEngine::new(&config);
    let outcome = engine.rank(&job_text, &parsed, strategy)?;

    monitor.stop_monitoring();
    monitor.set_resumes_count(outcome.results.len());
    let scores: Vec<f64> = outcome.results.iter().map(|r| r.score).collect();
    monitor.estimate_accuracy(&scores);

    let report = RankingReport::new(&job_text, outcome, monitor.report());
    let generator = ReportGenerator::with_options(config.output.color_output, detailed);
    let rendered = generator.generate_report(&report, output_format)?;

    if let Some(path) = save {
        save_report_to_file(&rendered, &path)?;
        println!("Report saved to {}", path.display());
    } else {
        println!("{}", rendered);
    }

    Ok(())
}

fn config_command(config: Config, action: Option<ConfigAction>) -> Result<()> {
    match action {
        Some(ConfigAction::Reset) => {
            let defaults = Config::default();
            defaults.save()?;
            println!("Configuration reset to defaults");
            Ok(())
        }
        Some(ConfigAction::Show) | None => {
            let content = toml::to_string_pretty(&config).map_err(|e| {
                ResumeRankerError::Configuration(format!("Failed to serialize config: {}", e))
            })?;
            println!("{}", content);
            Ok(())
        }
    }
}
