use crate::alignment::aggregation::aggregate_with;
use crate::alignment::classification::{build_word_result, validate_word};
use crate::alignment::tokenization::{validate_alignment, validate_phonemes};
use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::pipeline::traits::{PhonemeScorer, SequenceAligner};
use crate::types::{UtteranceResult, WordInput, WordResult};

/// Configured aligner → scorer → classifier → aggregator pipeline.
///
/// Holds no mutable state; one instance can score attempts from any number of
/// threads at once.
pub struct PronunciationScorer {
    config: ScoringConfig,
    sequence_aligner: Box<dyn SequenceAligner>,
    phoneme_scorer: Box<dyn PhonemeScorer>,
}

pub(crate) struct PronunciationScorerParts {
    pub config: ScoringConfig,
    pub sequence_aligner: Box<dyn SequenceAligner>,
    pub phoneme_scorer: Box<dyn PhonemeScorer>,
}

impl PronunciationScorer {
    pub(crate) fn from_parts(parts: PronunciationScorerParts) -> Self {
        Self {
            config: parts.config,
            sequence_aligner: parts.sequence_aligner,
            phoneme_scorer: parts.phoneme_scorer,
        }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn classify(
        &self,
        word: &str,
        reference: &[String],
        predicted: &[String],
    ) -> Result<WordResult, ScoringError> {
        validate_word(word)?;
        validate_phonemes("reference", reference)?;
        validate_phonemes("predicted", predicted)?;
        let alignment = self.sequence_aligner.align(reference, predicted)?;
        validate_alignment(&alignment)?;
        let score = self.phoneme_scorer.score(&alignment);
        Ok(build_word_result(
            word,
            reference,
            predicted,
            alignment,
            &score,
            &self.config.thresholds,
        ))
    }

    pub fn classify_input(&self, input: &WordInput) -> Result<WordResult, ScoringError> {
        self.classify(&input.word, &input.reference, &input.predicted)
    }

    pub fn aggregate(&self, words: Vec<WordResult>) -> Result<UtteranceResult, ScoringError> {
        aggregate_with(words, |pair| self.phoneme_scorer.score(pair).match_count)
    }

    /// Score one attempt. The first word that fails validation aborts the
    /// whole attempt.
    pub fn score_utterance(&self, inputs: &[WordInput]) -> Result<UtteranceResult, ScoringError> {
        if inputs.is_empty() {
            return Err(ScoringError::IncompleteAttempt);
        }
        let words = inputs
            .iter()
            .map(|input| self.classify_input(input))
            .collect::<Result<Vec<_>, _>>()?;
        self.aggregate(words)
    }
}
