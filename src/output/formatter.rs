//! Output formatters for ranking reports

use crate::config::OutputFormat;
use crate::error::{Result, ResumeRankerError};
use crate::evaluation::metrics::AccuracyKind;
use crate::output::report::RankingReport;
use crate::ranking::engine::RankedResume;
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with colors and an optional per-metric breakdown
pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Flat spreadsheet export. Column order and the `N/A` placeholders are a
/// compatibility surface for downstream consumers; do not reorder.
pub struct CsvFormatter;

pub struct HtmlFormatter {
    include_styles: bool,
}

/// Coordinates the individual formatters behind one entry point
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
    csv_formatter: CsvFormatter,
    html_formatter: HtmlFormatter,
}

#[derive(Template)]
#[template(source = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Resume Ranking Report</title>
    {% if include_styles %}
    <style>
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            line-height: 1.6;
            color: #333;
            max-width: 900px;
            margin: 0 auto;
            padding: 20px;
            background: #f8f9fa;
        }
        .container {
            background: white;
            padding: 30px;
            border-radius: 8px;
            box-shadow: 0 2px 10px rgba(0,0,0,0.1);
        }
        .header {
            text-align: center;
            margin-bottom: 30px;
            border-bottom: 3px solid #007acc;
            padding-bottom: 20px;
        }
        table {
            width: 100%;
            border-collapse: collapse;
            margin: 20px 0;
        }
        th, td {
            text-align: left;
            padding: 10px;
            border-bottom: 1px solid #e9ecef;
        }
        th {
            background: #f8f9fa;
            color: #007acc;
        }
        .rank-1 { background: #eaf7ee; }
        .score {
            font-weight: bold;
            color: #007acc;
        }
        .metadata {
            background: #e9ecef;
            padding: 15px;
            border-radius: 6px;
            margin-top: 30px;
            font-size: 0.9em;
            color: #6c757d;
        }
    </style>
    {% endif %}
</head>
<body>
    <div class="container">
        <div class="header">
            <h1>Resume Ranking Report</h1>
            <p>Generated: {{ generated_at }} | Strategy: {{ strategy }}</p>
            <p>{{ job_summary }}</p>
        </div>
        <table>
            <tr>
                <th>#</th>
                <th>Resume</th>
                <th>Score</th>
                <th>Email</th>
                <th>Phone</th>
                <th>Matched Skills</th>
            </tr>
            {{ rows_html | safe }}
        </table>
        <div class="metadata">
            <p><strong>Resumes processed:</strong> {{ resumes_processed }} |
               <strong>Execution time:</strong> {{ execution_time }}s |
               <strong>Accuracy ({{ accuracy_kind }}):</strong> {{ accuracy }}%</p>
            <p>Generated by resume-ranker v{{ version }}</p>
        </div>
    </div>
</body>
</html>"#, ext = "html")]
struct HtmlReportTemplate {
    include_styles: bool,
    generated_at: String,
    strategy: String,
    job_summary: String,
    rows_html: String,
    resumes_processed: usize,
    execution_time: String,
    accuracy_kind: String,
    accuracy: String,
    version: String,
}

fn missing_contact(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

fn accuracy_kind_label(kind: AccuracyKind) -> &'static str {
    match kind {
        AccuracyKind::Estimated => "estimated",
        AccuracyKind::Tested => "tested",
    }
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };
        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn score_color(score: f64) -> Color {
        match score {
            s if s >= 80.0 => Color::Green,
            s if s >= 60.0 => Color::Yellow,
            _ => Color::Red,
        }
    }

    fn format_result(&self, rank: usize, result: &RankedResume) -> String {
        let mut output = String::new();

        let score_text = format!("{:.1}", result.score);
        output.push_str(&format!(
            "{:>3}. {} {}\n",
            rank,
            self.colorize(&result.filename, Color::White),
            self.colorize(&format!("[{}]", score_text), Self::score_color(result.score)),
        ));
        output.push_str(&format!(
            "     Email: {} | Phone: {}\n",
            missing_contact(&result.email),
            missing_contact(&result.phone)
        ));
        if !result.matched_skills.is_empty() {
            output.push_str(&format!(
                "     Matched: {}\n",
                self.colorize(&result.matched_skills.join(", "), Color::Green)
            ));
        }
        if !result.missing_skills.is_empty() {
            output.push_str(&format!(
                "     Missing: {}\n",
                self.colorize(&result.missing_skills.join(", "), Color::Yellow)
            ));
        }

        if self.detailed {
            let s = &result.scores;
            output.push_str(&format!(
                "     Metrics: skills {:.1} | education {:.1} | persona {:.1} | career {:.1}\n",
                s.skills, s.education, s.persona, s.career
            ));
            output.push_str(&format!(
                "              gap {:.1} | transfer {:.1} | innovation {:.1} | knowledge {:.1}",
                s.gap, s.transfer, s.innovation, s.knowledge
            ));
            if let Some(embedding) = s.embedding {
                output.push_str(&format!(" | embedding {:.1}", embedding));
            }
            output.push('\n');
        }

        output.push('\n');
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME RANKING RESULTS", 1));
        output.push_str(&format!(
            "Generated: {} | Strategy: {}\n",
            report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.strategy.label()
        ));
        output.push_str(&format!("Job: {}\n", report.job_summary));

        if report.results.is_empty() {
            output.push_str(&format!(
                "\n{}\n",
                self.colorize("No resumes could be ranked.", Color::Yellow)
            ));
            return Ok(output);
        }

        output.push_str(&self.format_header("Rankings", 2));
        for (i, result) in report.results.iter().enumerate() {
            output.push_str(&self.format_result(i + 1, result));
        }

        if let Some(ga) = &report.ga_report {
            output.push_str(&self.format_header("Weight Optimization", 2));
            output.push_str(&format!(
                "Best weights: skills {:.3}, experience {:.3}, education {:.3}\n",
                ga.best_weights.skills, ga.best_weights.experience, ga.best_weights.education
            ));
            output.push_str(&format!(
                "Final fitness: {:.2} | Convergence rate: {:.3}/gen | {} evaluations\n",
                ga.final_fitness, ga.convergence_rate, ga.evaluations
            ));
        }

        output.push_str(&self.format_header("Performance", 2));
        let m = &report.metrics;
        output.push_str(&format!(
            "Processed {} resumes in {:.3}s ({:.1} resumes/s)\n",
            m.resumes_processed, m.execution_time_secs, m.throughput
        ));
        output.push_str(&format!(
            "Accuracy: {:.1}% ({}) | {}\n",
            m.accuracy_score,
            accuracy_kind_label(m.accuracy_kind),
            m.time_complexity
        ));

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str("# Resume Ranking Report\n\n");

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Strategy:** {}\n\n",
                report.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.strategy.label()
            ));
            output.push_str(&format!("**Job:** {}\n\n", report.job_summary));
        }

        output.push_str("## Rankings\n\n");
        output.push_str("| # | Resume | Score | Email | Phone | Matched Skills |\n");
        output.push_str("|---|--------|-------|-------|-------|----------------|\n");
        for (i, result) in report.results.iter().enumerate() {
            output.push_str(&format!(
                "| {} | {} | {:.1} | {} | {} | {} |\n",
                i + 1,
                result.filename,
                result.score,
                missing_contact(&result.email),
                missing_contact(&result.phone),
                result.matched_skills.join(", ")
            ));
        }
        output.push('\n');

        if let Some(ga) = &report.ga_report {
            output.push_str("## Weight Optimization\n\n");
            output.push_str(&format!(
                "Best weights: skills {:.3}, experience {:.3}, education {:.3}\n\n",
                ga.best_weights.skills, ga.best_weights.experience, ga.best_weights.education
            ));
            output.push_str(&format!(
                "Final fitness {:.2} after {} generations.\n\n",
                ga.final_fitness, ga.generations
            ));
        }

        if self.include_metadata {
            let m = &report.metrics;
            output.push_str("---\n\n");
            output.push_str(&format!(
                "*{} resumes in {:.3}s | accuracy {:.1}% ({}) | resume-ranker v{}*\n",
                m.resumes_processed,
                m.execution_time_secs,
                m.accuracy_score,
                accuracy_kind_label(m.accuracy_kind),
                report.version
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl CsvFormatter {
    /// Quote a field when it contains a comma, quote or newline
    fn escape(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

impl OutputFormatter for CsvFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::from("Filename,Score,Email,Phone,Matched Skills\n");

        for result in &report.results {
            output.push_str(&format!(
                "{},{:.1},{},{},{}\n",
                Self::escape(&result.filename),
                result.score,
                Self::escape(missing_contact(&result.email)),
                Self::escape(missing_contact(&result.phone)),
                Self::escape(&result.matched_skills.join(", "))
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Csv
    }
}

impl HtmlFormatter {
    pub fn new(include_styles: bool) -> Self {
        Self { include_styles }
    }

    fn row_html(rank: usize, result: &RankedResume) -> String {
        let class = if rank == 1 { " class=\"rank-1\"" } else { "" };
        format!(
            "<tr{}>\n    <td>{}</td>\n    <td>{}</td>\n    <td class=\"score\">{:.1}</td>\n    <td>{}</td>\n    <td>{}</td>\n    <td>{}</td>\n</tr>",
            class,
            rank,
            html_escape(&result.filename),
            result.score,
            html_escape(missing_contact(&result.email)),
            html_escape(missing_contact(&result.phone)),
            html_escape(&result.matched_skills.join(", "))
        )
    }
}

impl OutputFormatter for HtmlFormatter {
    fn format_report(&self, report: &RankingReport) -> Result<String> {
        let rows_html = report
            .results
            .iter()
            .enumerate()
            .map(|(i, r)| Self::row_html(i + 1, r))
            .collect::<Vec<_>>()
            .join("\n");

        let template = HtmlReportTemplate {
            include_styles: self.include_styles,
            generated_at: report
                .generated_at
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string(),
            strategy: report.strategy.label().to_string(),
            job_summary: html_escape(&report.job_summary),
            rows_html,
            resumes_processed: report.metrics.resumes_processed,
            execution_time: format!("{:.3}", report.metrics.execution_time_secs),
            accuracy_kind: accuracy_kind_label(report.metrics.accuracy_kind).to_string(),
            accuracy: format!("{:.1}", report.metrics.accuracy_score),
            version: report.version.clone(),
        };

        template
            .render()
            .map_err(|e| ResumeRankerError::OutputFormatting(e.to_string()))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(true, false),
            json_formatter: JsonFormatter::new(true),
            markdown_formatter: MarkdownFormatter::new(true),
            csv_formatter: CsvFormatter,
            html_formatter: HtmlFormatter::new(true),
        }
    }

    pub fn with_options(use_colors: bool, detailed: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            ..Self::new()
        }
    }

    pub fn generate_report(&self, report: &RankingReport, format: OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
            OutputFormat::Csv => self.csv_formatter.format_report(report),
            OutputFormat::Html => self.html_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    use std::fs;
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: OutputFormat, timestamp: bool) -> String {
    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    match format {
        OutputFormat::Console => format!("ranking{}.txt", timestamp_suffix),
        OutputFormat::Json => format!("ranking{}.json", timestamp_suffix),
        OutputFormat::Markdown => format!("ranking{}.md", timestamp_suffix),
        OutputFormat::Csv => format!("ranking{}.csv", timestamp_suffix),
        OutputFormat::Html => format!("ranking{}.html", timestamp_suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::metrics::PerformanceMetrics;
    use crate::ranking::engine::{RankingOutcome, ScoreVector, ScoringStrategy};

    fn sample_report() -> RankingReport {
        let scores = ScoreVector {
            skills: 80.0,
            education: 60.0,
            persona: 50.0,
            career: 70.0,
            gap: 65.0,
            transfer: 60.0,
            innovation: 40.0,
            embedding: None,
            knowledge: 55.0,
        };
        let outcome = RankingOutcome {
            results: vec![
                RankedResume {
                    filename: "jane.txt".to_string(),
                    score: 82.5,
                    matched_skills: vec!["python".to_string(), "sql".to_string()],
                    missing_skills: vec!["react".to_string()],
                    email: Some("jane@example.com".to_string()),
                    phone: None,
                    scores: scores.clone(),
                },
                RankedResume {
                    filename: "with,comma.txt".to_string(),
                    score: 41.0,
                    matched_skills: vec![],
                    missing_skills: vec![],
                    email: None,
                    phone: None,
                    scores,
                },
            ],
            strategy: ScoringStrategy::Standard,
            ga_report: None,
        };
        let metrics = PerformanceMetrics {
            execution_time_secs: 0.215,
            resumes_processed: 2,
            strategy: "standard".to_string(),
            accuracy_score: 85.0,
            accuracy_kind: AccuracyKind::Estimated,
            throughput: 9.3,
            avg_time_per_resume: 0.107,
            time_complexity: "O(n x m) where n=2, m=5".to_string(),
            space_complexity: "O(n) = O(2)".to_string(),
        };
        RankingReport::new("Senior Python Developer with ML expertise needed", outcome, metrics)
    }

    #[test]
    fn test_csv_header_and_na_placeholders() {
        let output = CsvFormatter.format_report(&sample_report()).unwrap();
        let mut lines = output.lines();

        assert_eq!(
            lines.next().unwrap(),
            "Filename,Score,Email,Phone,Matched Skills"
        );
        let first = lines.next().unwrap();
        assert!(first.starts_with("jane.txt,82.5,jane@example.com,N/A"));
        assert!(first.contains("\"python, sql\""));
        let second = lines.next().unwrap();
        assert!(second.starts_with("\"with,comma.txt\",41.0,N/A,N/A"));
    }

    #[test]
    fn test_json_round_trips() {
        let output = JsonFormatter::new(false)
            .format_report(&sample_report())
            .unwrap();
        let parsed: RankingReport = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.results[0].filename, "jane.txt");
    }

    #[test]
    fn test_console_output_without_colors() {
        let output = ConsoleFormatter::new(false, false)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.contains("jane.txt"));
        assert!(output.contains("Matched: python, sql"));
        assert!(output.contains("estimated"));
    }

    #[test]
    fn test_markdown_table() {
        let output = MarkdownFormatter::new(true)
            .format_report(&sample_report())
            .unwrap();

        assert!(output.contains("| # | Resume | Score |"));
        assert!(output.contains("| 1 | jane.txt | 82.5 |"));
    }

    #[test]
    fn test_html_escapes_fields() {
        let mut report = sample_report();
        report.results[0].filename = "a<b>.txt".to_string();

        let output = HtmlFormatter::new(false).format_report(&report).unwrap();
        assert!(output.contains("a&lt;b&gt;.txt"));
        assert!(!output.contains("a<b>.txt"));
    }

    #[test]
    fn test_generator_routes_formats() {
        let generator = ReportGenerator::new();
        let report = sample_report();

        for format in [
            OutputFormat::Console,
            OutputFormat::Json,
            OutputFormat::Markdown,
            OutputFormat::Csv,
            OutputFormat::Html,
        ] {
            assert!(generator.generate_report(&report, format).is_ok());
        }
    }
}
