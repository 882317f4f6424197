use crate::alignment::edit_distance::align_with_costs;
use crate::alignment::scoring::score_alignment;
use crate::config::AlignmentCosts;
use crate::error::ScoringError;
use crate::pipeline::traits::{PhonemeScorer, SequenceAligner};
use crate::types::{AlignmentPair, PhonemeScore};

#[derive(Debug, Clone, Copy, Default)]
pub struct EditDistanceAligner {
    pub costs: AlignmentCosts,
}

impl EditDistanceAligner {
    pub fn new(costs: AlignmentCosts) -> Self {
        Self { costs }
    }
}

impl SequenceAligner for EditDistanceAligner {
    fn align(
        &self,
        reference: &[String],
        predicted: &[String],
    ) -> Result<AlignmentPair, ScoringError> {
        align_with_costs(reference, predicted, &self.costs)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalScorer;

impl PhonemeScorer for PositionalScorer {
    fn score(&self, pair: &AlignmentPair) -> PhonemeScore {
        score_alignment(pair)
    }
}
