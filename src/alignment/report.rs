use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::alignment::scoring::score_alignment;
use crate::config::ScoringConfig;
use crate::types::{PhonemeOutcome, UtteranceResult, WordStatus};

pub const REPORT_SCHEMA_VERSION: u32 = 1;
const MOST_MISSED_TOP_N: usize = 20;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub schema_version: u32,
    pub meta: Meta,
    pub attempts: Vec<AttemptRecord>,
    pub failures: Vec<FailedAttempt>,
    pub aggregates: AggregateReport,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Meta {
    pub generated_at: String,
    pub config: ScoringConfig,
    pub case_count: usize,
}

/// Display-ready record of one scored attempt, as persisted in attempt
/// history.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptRecord {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub accuracy: f64,
    pub accuracy_percent: u8,
    pub correct_phoneme_count: usize,
    pub total_phoneme_count: usize,
    pub mispronounced_words: Vec<String>,
    pub correct_words: Vec<String>,
    pub words: Vec<WordFeedback>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordFeedback {
    pub word: String,
    pub status: WordStatus,
    pub accuracy: f64,
    pub word_error_rate: f64,
    pub phoneme_errors: Vec<PhonemeError>,
}

/// One non-matching aligned position. A gap side is written as `"_"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhonemeError {
    pub position: usize,
    pub expected: String,
    pub actual: String,
    pub outcome: PhonemeOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedAttempt {
    pub id: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateReport {
    pub counts: AggregateCounts,
    pub status_counts: StatusCounts,
    pub accuracy: Option<MetricDistribution>,
    pub most_missed_words: Vec<MissedWord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AggregateCounts {
    pub total: u32,
    pub scored: u32,
    pub failed: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub correct: u32,
    pub partial: u32,
    pub mispronounced: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct MetricDistribution {
    pub mean: f32,
    pub min: f32,
    pub p50: f32,
    pub p90: f32,
    pub max: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissedWord {
    pub word: String,
    pub count: u32,
}

pub fn build_attempt_record(
    id: &str,
    text: Option<&str>,
    utterance: &UtteranceResult,
) -> AttemptRecord {
    let words = utterance
        .words
        .iter()
        .map(|word| {
            let score = score_alignment(&word.alignment);
            let (expected, actual) = word.alignment.to_symbols();
            let phoneme_errors = score
                .outcomes
                .iter()
                .enumerate()
                .filter(|(_, outcome)| outcome.is_error())
                .map(|(position, &outcome)| PhonemeError {
                    position,
                    expected: expected[position].to_string(),
                    actual: actual[position].to_string(),
                    outcome,
                })
                .collect();
            WordFeedback {
                word: word.word.clone(),
                status: word.status,
                accuracy: word.accuracy,
                word_error_rate: word.word_error_rate,
                phoneme_errors,
            }
        })
        .collect();

    AttemptRecord {
        id: id.to_string(),
        text: text.map(str::to_string),
        accuracy: utterance.accuracy,
        accuracy_percent: to_percent(utterance.accuracy),
        correct_phoneme_count: utterance.correct_phoneme_count,
        total_phoneme_count: utterance.total_phoneme_count,
        mispronounced_words: utterance.mispronounced_words.clone(),
        correct_words: utterance.correct_words.clone(),
        words,
    }
}

pub fn aggregate_attempts(attempts: &[AttemptRecord], failed: usize) -> AggregateReport {
    let mut status_counts = StatusCounts::default();
    let mut missed: HashMap<&str, u32> = HashMap::new();
    for word in attempts.iter().flat_map(|attempt| attempt.words.iter()) {
        match word.status {
            WordStatus::Correct => status_counts.correct += 1,
            WordStatus::Partial => status_counts.partial += 1,
            WordStatus::Mispronounced => status_counts.mispronounced += 1,
        }
        if word.status.needs_practice() {
            *missed.entry(word.word.as_str()).or_insert(0) += 1;
        }
    }

    let accuracies: Vec<f64> = attempts.iter().map(|attempt| attempt.accuracy).collect();

    AggregateReport {
        counts: AggregateCounts {
            total: to_u32(attempts.len() + failed),
            scored: to_u32(attempts.len()),
            failed: to_u32(failed),
        },
        status_counts,
        accuracy: distribution_or_none(&accuracies),
        most_missed_words: ranked_missed_words(missed, MOST_MISSED_TOP_N),
    }
}

fn ranked_missed_words(missed: HashMap<&str, u32>, top_n: usize) -> Vec<MissedWord> {
    let mut ranked: Vec<MissedWord> = missed
        .into_iter()
        .map(|(word, count)| MissedWord {
            word: word.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.word.cmp(&b.word)));
    ranked.truncate(top_n);
    ranked
}

fn distribution_or_none(values: &[f64]) -> Option<MetricDistribution> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;
    Some(MetricDistribution {
        mean: mean as f32,
        min: sorted[0] as f32,
        p50: interpolate_sorted(&sorted, 0.5) as f32,
        p90: interpolate_sorted(&sorted, 0.9) as f32,
        max: sorted[sorted.len() - 1] as f32,
    })
}

/// Linear interpolation between the two ranks around `fraction` of a
/// non-empty sorted slice.
fn interpolate_sorted(sorted: &[f64], fraction: f64) -> f64 {
    let rank = fraction * (sorted.len() - 1) as f64;
    let below = sorted[rank.floor() as usize];
    let above = sorted[rank.ceil() as usize];
    below + (above - below) * rank.fract()
}

fn to_percent(accuracy: f64) -> u8 {
    (accuracy.clamp(0.0, 1.0) * 100.0).round() as u8
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
