use crate::alignment::classification::{classify_word, validate_word};
use crate::alignment::scoring::score_alignment;
use crate::alignment::tokenization::validate_alignment;
use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::types::{AlignmentPair, UtteranceResult, WordInput, WordResult};

/// Roll per-word results up into one attempt.
///
/// Overall accuracy is weighted by reference phonemes, not averaged over
/// words: a long correct word and a short wrong word do not count equally.
/// Word lists keep utterance order and keep duplicates. A word result with a
/// blank word or a malformed alignment fails the whole attempt.
pub fn aggregate_words(words: Vec<WordResult>) -> Result<UtteranceResult, ScoringError> {
    aggregate_with(words, |pair| score_alignment(pair).match_count)
}

/// Aggregation with a caller-supplied match counter, so a pipeline with a
/// custom scorer rolls up the same matches it classified with.
pub(crate) fn aggregate_with<F>(
    words: Vec<WordResult>,
    count_matches: F,
) -> Result<UtteranceResult, ScoringError>
where
    F: Fn(&AlignmentPair) -> usize,
{
    if words.is_empty() {
        return Err(ScoringError::IncompleteAttempt);
    }
    for word in &words {
        validate_word(&word.word)?;
        validate_alignment(&word.alignment)?;
    }

    let mut total_phoneme_count = 0usize;
    let mut correct_phoneme_count = 0usize;
    let mut mispronounced_words = Vec::new();
    let mut correct_words = Vec::new();

    for word in &words {
        total_phoneme_count += word.alignment.reference_phoneme_count();
        correct_phoneme_count += count_matches(&word.alignment);
        if word.status.needs_practice() {
            mispronounced_words.push(word.word.clone());
        } else {
            correct_words.push(word.word.clone());
        }
    }

    let accuracy = correct_phoneme_count as f64 / total_phoneme_count.max(1) as f64;
    tracing::debug!(
        word_count = words.len(),
        correct_phoneme_count,
        total_phoneme_count,
        accuracy = format!("{accuracy:.3}"),
        needs_practice = mispronounced_words.len(),
        "aggregation: utterance scored"
    );

    Ok(UtteranceResult {
        words,
        accuracy,
        correct_phoneme_count,
        total_phoneme_count,
        mispronounced_words,
        correct_words,
    })
}

/// Classify every word of an attempt, then aggregate. The first invalid word
/// aborts the attempt; no partial result is produced.
pub fn score_utterance(
    inputs: &[WordInput],
    config: &ScoringConfig,
) -> Result<UtteranceResult, ScoringError> {
    if inputs.is_empty() {
        return Err(ScoringError::IncompleteAttempt);
    }
    let words = inputs
        .iter()
        .map(|input| classify_word(&input.word, &input.reference, &input.predicted, config))
        .collect::<Result<Vec<_>, _>>()?;
    aggregate_words(words)
}
