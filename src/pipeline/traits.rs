use crate::error::ScoringError;
use crate::types::{AlignmentPair, PhonemeScore};

pub trait SequenceAligner: Send + Sync {
    fn align(
        &self,
        reference: &[String],
        predicted: &[String],
    ) -> Result<AlignmentPair, ScoringError>;
}

pub trait PhonemeScorer: Send + Sync {
    fn score(&self, pair: &AlignmentPair) -> PhonemeScore;
}
