pub mod alignment;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

pub use alignment::aggregation::{aggregate_words, score_utterance};
pub use alignment::classification::classify_word;
pub use alignment::edit_distance::{align, align_with_costs, edit_distance};
pub use alignment::report::{
    aggregate_attempts, build_attempt_record, AggregateReport, AttemptRecord, FailedAttempt,
    Meta, Report, REPORT_SCHEMA_VERSION,
};
pub use alignment::scoring::score_alignment;
pub use alignment::tokenization::{parse_phonemes, validate_alignment, validate_phonemes};
pub use config::{AlignmentCosts, ClassificationThresholds, ScoringConfig};
pub use error::ScoringError;
pub use pipeline::builder::PronunciationScorerBuilder;
pub use pipeline::runtime::PronunciationScorer;
pub use pipeline::traits::{PhonemeScorer, SequenceAligner};
pub use types::{
    AlignmentPair, PhonemeOutcome, PhonemeScore, UtteranceResult, WordInput, WordResult,
    WordStatus, GAP_SYMBOL,
};
