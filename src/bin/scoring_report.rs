use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use pronunciation_rs::{
    aggregate_attempts, build_attempt_record, AttemptRecord, FailedAttempt, Meta,
    PronunciationScorerBuilder, Report, ScoringConfig, WordInput, REPORT_SCHEMA_VERSION,
};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

#[path = "scoring_report/json_report_formatter.rs"]
mod json_report_formatter;
#[path = "scoring_report/text_report_formatter.rs"]
mod text_report_formatter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    /// Print a plain-text summary table to stdout instead of writing a file.
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "scoring_report")]
#[command(about = "Score recorded pronunciation attempts and write a practice report")]
struct Args {
    /// JSON array or JSON-lines file of attempts.
    #[arg(long, env = "PRONUNCIATION_REPORT_CASES_FILE")]
    cases_file: PathBuf,
    /// Scoring config JSON (thresholds and alignment costs).
    #[arg(long, env = "PRONUNCIATION_REPORT_CONFIG")]
    config: Option<PathBuf>,
    #[arg(long, env = "PRONUNCIATION_REPORT_CORRECT_THRESHOLD")]
    correct_threshold: Option<f64>,
    #[arg(long, env = "PRONUNCIATION_REPORT_PARTIAL_THRESHOLD")]
    partial_threshold: Option<f64>,
    #[arg(long, env = "PRONUNCIATION_REPORT_OUT")]
    out: Option<PathBuf>,
    #[arg(long, env = "PRONUNCIATION_REPORT_LIMIT")]
    limit: Option<usize>,
    #[arg(long, env = "PRONUNCIATION_REPORT_OFFSET", default_value_t = 0)]
    offset: usize,
    #[arg(
        long,
        env = "PRONUNCIATION_REPORT_FORMAT",
        value_enum,
        default_value_t = OutputFormat::Json
    )]
    output_format: OutputFormat,
}

#[derive(Debug, Clone, Deserialize)]
struct Case {
    id: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    words: Vec<WordInput>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        tracing::error!(error = err.as_str(), "scoring_report failed");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    let mut cases = load_cases(&args.cases_file)?;
    if args.offset > 0 {
        cases = cases.into_iter().skip(args.offset).collect();
    }
    if let Some(limit) = args.limit {
        cases.truncate(limit);
    }
    if cases.is_empty() {
        return Err("No cases selected after applying offset/limit.".to_string());
    }
    let case_count = cases.len();

    let scorer = PronunciationScorerBuilder::new(config)
        .build()
        .map_err(|err| format!("Failed to build scorer: {err}"))?;

    let progress = ProgressBar::new(cases.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-"),
    );
    progress.set_message("starting...");

    let mut attempts: Vec<AttemptRecord> = Vec::with_capacity(cases.len());
    let mut failures: Vec<FailedAttempt> = Vec::new();
    for case in &cases {
        progress.set_message(case.id.clone());
        match scorer.score_utterance(&case.words) {
            Ok(utterance) => {
                attempts.push(build_attempt_record(
                    &case.id,
                    case.text.as_deref(),
                    &utterance,
                ));
            }
            Err(err) => {
                tracing::warn!(case_id = case.id.as_str(), error = %err, "attempt rejected");
                failures.push(FailedAttempt {
                    id: case.id.clone(),
                    error: err.to_string(),
                });
            }
        }
        progress.inc(1);
    }
    progress.finish_with_message("done");

    let aggregates = aggregate_attempts(&attempts, failures.len());
    let report = Report {
        schema_version: REPORT_SCHEMA_VERSION,
        meta: Meta {
            generated_at: Utc::now().to_rfc3339(),
            config: *scorer.config(),
            case_count,
        },
        attempts,
        failures,
        aggregates,
    };

    match args.output_format {
        OutputFormat::Json => {
            let out_path = args.out.unwrap_or_else(default_out_path);
            json_report_formatter::save_report(&out_path, &report)?;
            println!("Wrote report for {case_count} attempts to {}", out_path.display());
        }
        OutputFormat::Text => {
            let mut stdout = std::io::stdout().lock();
            text_report_formatter::write_summary(&mut stdout, &report)
                .map_err(|err| format!("Failed to write summary: {err}"))?;
        }
    }
    Ok(())
}

fn resolve_config(args: &Args) -> Result<ScoringConfig, String> {
    let mut config = match args.config.as_ref() {
        Some(path) => ScoringConfig::load(path)
            .map_err(|err| format!("Failed to load config '{}': {err}", path.display()))?,
        None => ScoringConfig::default(),
    };
    if let Some(correct) = args.correct_threshold {
        config.thresholds.correct = correct;
    }
    if let Some(partial) = args.partial_threshold {
        config.thresholds.partial = partial;
    }
    Ok(config)
}

fn load_cases(path: &Path) -> Result<Vec<Case>, String> {
    let data = fs::read_to_string(path)
        .map_err(|err| format!("Failed to read cases file '{}': {err}", path.display()))?;
    parse_cases(&data).map_err(|err| format!("Failed to parse cases file '{}': {err}", path.display()))
}

fn parse_cases(data: &str) -> Result<Vec<Case>, String> {
    if data.trim_start().starts_with('[') {
        return serde_json::from_str(data).map_err(|err| err.to_string());
    }
    data.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).map_err(|err| format!("line {}: {err}", idx + 1))
        })
        .collect()
}

fn default_out_path() -> PathBuf {
    PathBuf::from(format!(
        "scoring_report_{}.json",
        Utc::now().format("%Y%m%dT%H%M%SZ")
    ))
}
