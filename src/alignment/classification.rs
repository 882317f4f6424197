use crate::alignment::edit_distance::align_with_costs;
use crate::alignment::scoring::score_alignment;
use crate::config::{ClassificationThresholds, ScoringConfig};
use crate::error::ScoringError;
use crate::types::{AlignmentPair, PhonemeScore, WordResult, WordStatus};

/// Align, score and tier one word.
pub fn classify_word<R: AsRef<str>, P: AsRef<str>>(
    word: &str,
    reference: &[R],
    predicted: &[P],
    config: &ScoringConfig,
) -> Result<WordResult, ScoringError> {
    validate_word(word)?;
    let alignment = align_with_costs(reference, predicted, &config.costs)?;
    let score = score_alignment(&alignment);
    Ok(build_word_result(
        word,
        reference,
        predicted,
        alignment,
        &score,
        &config.thresholds,
    ))
}

pub(crate) fn validate_word(word: &str) -> Result<(), ScoringError> {
    if word.trim().is_empty() {
        return Err(ScoringError::invalid_word(
            "word identifier is missing or blank",
        ));
    }
    Ok(())
}

/// Errors over the reference phoneme count. The denominator never drops below
/// one, so an empty reference with insertions yields a rate above 1.0.
pub fn word_error_rate(score: &PhonemeScore, reference_phoneme_count: usize) -> f64 {
    score.error_count() as f64 / reference_phoneme_count.max(1) as f64
}

pub fn accuracy_from_error_rate(word_error_rate: f64) -> f64 {
    (1.0 - word_error_rate).clamp(0.0, 1.0)
}

pub(crate) fn build_word_result<R: AsRef<str>, P: AsRef<str>>(
    word: &str,
    reference: &[R],
    predicted: &[P],
    alignment: AlignmentPair,
    score: &PhonemeScore,
    thresholds: &ClassificationThresholds,
) -> WordResult {
    let reference_phoneme_count = alignment.reference_phoneme_count();
    let wer = word_error_rate(score, reference_phoneme_count);
    let accuracy = accuracy_from_error_rate(wer);
    let status = WordStatus::from_accuracy(accuracy, thresholds);

    if reference_phoneme_count == 0 {
        tracing::warn!(
            word,
            inserted = score.insertion_count,
            "classification: word has no reference phonemes"
        );
    }
    tracing::debug!(
        word,
        reference_len = reference_phoneme_count,
        matches = score.match_count,
        substitutions = score.substitution_count,
        insertions = score.insertion_count,
        deletions = score.deletion_count,
        wer = format!("{wer:.3}"),
        status = status.as_str(),
        "classification: word scored"
    );

    WordResult {
        word: word.to_string(),
        reference_phonemes: reference.iter().map(|p| p.as_ref().to_string()).collect(),
        predicted_phonemes: predicted.iter().map(|p| p.as_ref().to_string()).collect(),
        alignment,
        status,
        word_error_rate: wer,
        accuracy,
    }
}
