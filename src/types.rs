use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::alignment::tokenization::parse_phonemes;
use crate::config::ClassificationThresholds;

/// Gap marker used when aligned sequences leave the crate. Internally a gap is
/// `None`; this literal only exists at the serialization boundary.
pub const GAP_SYMBOL: &str = "_";

/// Two equal-length aligned sequences. `None` marks a gap; a position never
/// holds a gap on both sides.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlignmentPair {
    #[serde(serialize_with = "serialize_gapped")]
    pub aligned_reference: Vec<Option<String>>,
    #[serde(serialize_with = "serialize_gapped")]
    pub aligned_predicted: Vec<Option<String>>,
}

impl AlignmentPair {
    pub fn len(&self) -> usize {
        self.aligned_reference.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aligned_reference.is_empty()
    }

    /// Number of positions carrying a real reference phoneme.
    pub fn reference_phoneme_count(&self) -> usize {
        self.aligned_reference.iter().flatten().count()
    }

    /// Boundary rendering with gaps written as [`GAP_SYMBOL`].
    pub fn to_symbols(&self) -> (Vec<&str>, Vec<&str>) {
        fn render(seq: &[Option<String>]) -> Vec<&str> {
            seq.iter()
                .map(|p| p.as_deref().unwrap_or(GAP_SYMBOL))
                .collect()
        }
        (
            render(&self.aligned_reference),
            render(&self.aligned_predicted),
        )
    }
}

#[allow(clippy::ptr_arg)]
fn serialize_gapped<S: Serializer>(
    seq: &Vec<Option<String>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(seq.iter().map(|p| p.as_deref().unwrap_or(GAP_SYMBOL)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhonemeOutcome {
    Match,
    Substitution,
    Insertion,
    Deletion,
}

impl PhonemeOutcome {
    pub fn is_error(self) -> bool {
        self != PhonemeOutcome::Match
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PhonemeOutcome::Match => "match",
            PhonemeOutcome::Substitution => "substitution",
            PhonemeOutcome::Insertion => "insertion",
            PhonemeOutcome::Deletion => "deletion",
        }
    }
}

/// Per-position outcomes of one alignment plus their tallies.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PhonemeScore {
    pub outcomes: Vec<PhonemeOutcome>,
    pub match_count: usize,
    pub substitution_count: usize,
    pub insertion_count: usize,
    pub deletion_count: usize,
}

impl PhonemeScore {
    pub fn error_count(&self) -> usize {
        self.substitution_count + self.insertion_count + self.deletion_count
    }
}

/// Correctness tier of one word. Downstream consumers branch on the
/// serialized literals, so the names are part of the wire contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WordStatus {
    Correct,
    Partial,
    Mispronounced,
}

impl WordStatus {
    pub fn from_accuracy(accuracy: f64, thresholds: &ClassificationThresholds) -> Self {
        if accuracy >= thresholds.correct {
            WordStatus::Correct
        } else if accuracy >= thresholds.partial {
            WordStatus::Partial
        } else {
            WordStatus::Mispronounced
        }
    }

    /// Partial and mispronounced words are both surfaced as "needs practice".
    pub fn needs_practice(self) -> bool {
        self != WordStatus::Correct
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WordStatus::Correct => "correct",
            WordStatus::Partial => "partial",
            WordStatus::Mispronounced => "mispronounced",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WordResult {
    pub word: String,
    pub reference_phonemes: Vec<String>,
    pub predicted_phonemes: Vec<String>,
    pub alignment: AlignmentPair,
    pub status: WordStatus,
    /// Errors over reference phoneme count; exceeds 1.0 when insertions
    /// dominate a short reference.
    pub word_error_rate: f64,
    /// `1 - word_error_rate`, clamped to [0, 1].
    pub accuracy: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UtteranceResult {
    pub words: Vec<WordResult>,
    /// Phoneme-weighted: `correct_phoneme_count / max(1, total_phoneme_count)`.
    pub accuracy: f64,
    pub correct_phoneme_count: usize,
    pub total_phoneme_count: usize,
    pub mispronounced_words: Vec<String>,
    pub correct_words: Vec<String>,
}

/// One word of an attempt as delivered by the upstream recognizer.
///
/// Phoneme fields accept either a JSON array (`["K", "AE", "T"]`) or a
/// whitespace-separated string (`"K AE T"`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct WordInput {
    #[serde(default)]
    pub word: String,
    #[serde(default, deserialize_with = "deserialize_phonemes")]
    pub reference: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_phonemes")]
    pub predicted: Vec<String>,
}

impl WordInput {
    pub fn new(
        word: impl Into<String>,
        reference: impl IntoIterator<Item = impl Into<String>>,
        predicted: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            word: word.into(),
            reference: reference.into_iter().map(Into::into).collect(),
            predicted: predicted.into_iter().map(Into::into).collect(),
        }
    }
}

fn deserialize_phonemes<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PhonemeField {
        Spaced(String),
        List(Vec<String>),
    }

    Ok(match PhonemeField::deserialize(deserializer)? {
        PhonemeField::Spaced(text) => parse_phonemes(&text),
        PhonemeField::List(list) => list,
    })
}
