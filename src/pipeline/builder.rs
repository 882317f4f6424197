use crate::config::ScoringConfig;
use crate::error::ScoringError;
use crate::pipeline::defaults::{EditDistanceAligner, PositionalScorer};
use crate::pipeline::runtime::{PronunciationScorer, PronunciationScorerParts};
use crate::pipeline::traits::{PhonemeScorer, SequenceAligner};

pub struct PronunciationScorerBuilder {
    config: ScoringConfig,
    sequence_aligner: Option<Box<dyn SequenceAligner>>,
    phoneme_scorer: Option<Box<dyn PhonemeScorer>>,
}

impl PronunciationScorerBuilder {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            config,
            sequence_aligner: None,
            phoneme_scorer: None,
        }
    }

    pub fn with_sequence_aligner(mut self, sequence_aligner: Box<dyn SequenceAligner>) -> Self {
        self.sequence_aligner = Some(sequence_aligner);
        self
    }

    pub fn with_phoneme_scorer(mut self, phoneme_scorer: Box<dyn PhonemeScorer>) -> Self {
        self.phoneme_scorer = Some(phoneme_scorer);
        self
    }

    pub fn build(self) -> Result<PronunciationScorer, ScoringError> {
        self.config.validate()?;
        let costs = self.config.costs;

        Ok(PronunciationScorer::from_parts(PronunciationScorerParts {
            config: self.config,
            sequence_aligner: self
                .sequence_aligner
                .unwrap_or_else(|| Box::new(EditDistanceAligner::new(costs))),
            phoneme_scorer: self
                .phoneme_scorer
                .unwrap_or_else(|| Box::new(PositionalScorer)),
        }))
    }
}

impl Default for PronunciationScorerBuilder {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
