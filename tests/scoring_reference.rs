use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use libtest_mimic::{Arguments, Failed, Trial};
use pronunciation_rs::{
    PronunciationScorer, PronunciationScorerBuilder, ScoringConfig, ScoringError, WordInput,
};
use serde::Deserialize;

const SUITE_NAME: &str = "scoring_reference_matches_fixture";
const FLOAT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Deserialize)]
struct WordCase {
    id: String,
    #[serde(flatten)]
    input: WordInput,
    #[serde(default)]
    expected_reference: Vec<String>,
    #[serde(default)]
    expected_predicted: Vec<String>,
    expected_counts: Option<ExpectedCounts>,
    expected_wer: Option<f64>,
    expected_status: Option<String>,
    expected_error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ExpectedCounts {
    #[serde(rename = "match")]
    matches: usize,
    substitution: usize,
    insertion: usize,
    deletion: usize,
}

#[derive(Debug, Deserialize)]
struct UtteranceCase {
    id: String,
    words: Vec<WordInput>,
    expected_accuracy: Option<f64>,
    expected_correct_phoneme_count: Option<usize>,
    expected_total_phoneme_count: Option<usize>,
    #[serde(default)]
    expected_correct_words: Vec<String>,
    #[serde(default)]
    expected_mispronounced_words: Vec<String>,
    expected_error: Option<String>,
}

fn main() {
    let args = Arguments::from_args();
    let repo_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));

    let word_cases: Vec<WordCase> =
        match load_fixture(&repo_root.join("test-data/scoring/word_cases.json")) {
            Ok(rows) => rows,
            Err(err) => {
                run_setup_failure(&args, err);
                return;
            }
        };
    let utterance_cases: Vec<UtteranceCase> =
        match load_fixture(&repo_root.join("test-data/scoring/utterance_cases.json")) {
            Ok(rows) => rows,
            Err(err) => {
                run_setup_failure(&args, err);
                return;
            }
        };
    if word_cases.is_empty() || utterance_cases.is_empty() {
        run_setup_failure(
            &args,
            "No reference rows found under test-data/scoring.".to_string(),
        );
        return;
    }

    let mut tests = Vec::with_capacity(word_cases.len() + utterance_cases.len());
    for row in word_cases {
        let test_name = format!("{SUITE_NAME}::word::{}", row.id);
        tests.push(Trial::test(test_name, move || {
            run_word_case(&row).map_err(Failed::from)
        }));
    }
    for row in utterance_cases {
        let test_name = format!("{SUITE_NAME}::utterance::{}", row.id);
        tests.push(Trial::test(test_name, move || {
            run_utterance_case(&row).map_err(Failed::from)
        }));
    }

    libtest_mimic::run(&args, tests).exit();
}

fn run_setup_failure(args: &Arguments, message: String) {
    let test = Trial::test(format!("{SUITE_NAME}::setup"), move || {
        Err(Failed::from(message))
    });
    libtest_mimic::run(args, vec![test]).exit();
}

fn scorer() -> Result<PronunciationScorer, String> {
    PronunciationScorerBuilder::new(ScoringConfig::default())
        .build()
        .map_err(|err| format!("Failed to build scorer: {err}"))
}

fn run_word_case(row: &WordCase) -> Result<(), String> {
    let scorer = scorer()?;
    let outcome = scorer.classify_input(&row.input);

    if let Some(expected_error) = row.expected_error.as_deref() {
        return match outcome {
            Err(err) => check_error_kind(&row.id, &err, expected_error),
            Ok(result) => Err(format!(
                "{}: expected {expected_error} error, got status {}",
                row.id,
                result.status.as_str()
            )),
        };
    }

    let result = outcome.map_err(|err| format!("{}: classify() failed: {err}", row.id))?;
    let (aligned_reference, aligned_predicted) = result.alignment.to_symbols();
    if aligned_reference != row.expected_reference {
        return Err(format!(
            "{}: aligned reference mismatch (expected {:?}, got {:?})",
            row.id, row.expected_reference, aligned_reference
        ));
    }
    if aligned_predicted != row.expected_predicted {
        return Err(format!(
            "{}: aligned prediction mismatch (expected {:?}, got {:?})",
            row.id, row.expected_predicted, aligned_predicted
        ));
    }

    if let Some(counts) = row.expected_counts.as_ref() {
        let score = pronunciation_rs::score_alignment(&result.alignment);
        let observed = (
            score.match_count,
            score.substitution_count,
            score.insertion_count,
            score.deletion_count,
        );
        let expected = (
            counts.matches,
            counts.substitution,
            counts.insertion,
            counts.deletion,
        );
        if observed != expected {
            return Err(format!(
                "{}: (match, sub, ins, del) expected {expected:?}, got {observed:?}",
                row.id
            ));
        }
    }

    if let Some(expected_wer) = row.expected_wer {
        check_close(&row.id, "word_error_rate", expected_wer, result.word_error_rate)?;
        let expected_accuracy = (1.0 - expected_wer).clamp(0.0, 1.0);
        check_close(&row.id, "accuracy", expected_accuracy, result.accuracy)?;
    }

    if let Some(expected_status) = row.expected_status.as_deref() {
        if result.status.as_str() != expected_status {
            return Err(format!(
                "{}: status mismatch (expected {expected_status}, got {})",
                row.id,
                result.status.as_str()
            ));
        }
    }

    Ok(())
}

fn run_utterance_case(row: &UtteranceCase) -> Result<(), String> {
    let scorer = scorer()?;
    let outcome = scorer.score_utterance(&row.words);

    if let Some(expected_error) = row.expected_error.as_deref() {
        return match outcome {
            Err(err) => check_error_kind(&row.id, &err, expected_error),
            Ok(_) => Err(format!(
                "{}: expected {expected_error} error, got a result",
                row.id
            )),
        };
    }

    let result = outcome.map_err(|err| format!("{}: score_utterance() failed: {err}", row.id))?;
    if let Some(expected) = row.expected_accuracy {
        check_close(&row.id, "accuracy", expected, result.accuracy)?;
    }
    if let Some(expected) = row.expected_correct_phoneme_count {
        if result.correct_phoneme_count != expected {
            return Err(format!(
                "{}: correct_phoneme_count expected {expected}, got {}",
                row.id, result.correct_phoneme_count
            ));
        }
    }
    if let Some(expected) = row.expected_total_phoneme_count {
        if result.total_phoneme_count != expected {
            return Err(format!(
                "{}: total_phoneme_count expected {expected}, got {}",
                row.id, result.total_phoneme_count
            ));
        }
    }
    if result.correct_words != row.expected_correct_words {
        return Err(format!(
            "{}: correct_words expected {:?}, got {:?}",
            row.id, row.expected_correct_words, result.correct_words
        ));
    }
    if result.mispronounced_words != row.expected_mispronounced_words {
        return Err(format!(
            "{}: mispronounced_words expected {:?}, got {:?}",
            row.id, row.expected_mispronounced_words, result.mispronounced_words
        ));
    }
    let observed_order: Vec<&str> = result.words.iter().map(|w| w.word.as_str()).collect();
    let input_order: Vec<&str> = row.words.iter().map(|w| w.word.as_str()).collect();
    if observed_order != input_order {
        return Err(format!(
            "{}: word order changed (expected {input_order:?}, got {observed_order:?})",
            row.id
        ));
    }

    Ok(())
}

fn check_error_kind(id: &str, err: &ScoringError, expected: &str) -> Result<(), String> {
    let kind = match err {
        ScoringError::InvalidInput { .. } => "invalid_input",
        ScoringError::InvalidWord { .. } => "invalid_word",
        ScoringError::IncompleteAttempt => "incomplete_attempt",
        ScoringError::InvalidConfig { .. } => "invalid_config",
        ScoringError::Io { .. } => "io",
        ScoringError::Json { .. } => "json",
    };
    if kind == expected {
        Ok(())
    } else {
        Err(format!("{id}: expected {expected} error, got {kind}: {err}"))
    }
}

fn check_close(id: &str, metric: &str, expected: f64, observed: f64) -> Result<(), String> {
    if (expected - observed).abs() <= FLOAT_TOLERANCE {
        return Ok(());
    }
    Err(format!(
        "{id}: {metric} expected {expected:.6}, got {observed:.6}"
    ))
}

fn load_fixture<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Vec<T>, String> {
    require_path_exists(path, "Missing scoring fixture JSON.")?;
    let file = File::open(path)
        .map_err(|err| format!("Failed to open fixture '{}': {err}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|err| format!("Failed to parse fixture '{}': {err}", path.display()))
}

fn require_path_exists(path: &Path, message: &str) -> Result<(), String> {
    if path.exists() {
        return Ok(());
    }
    Err(format!("{} Missing path: {}", message, path.display()))
}
