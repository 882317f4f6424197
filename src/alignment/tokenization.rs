use crate::error::ScoringError;
use crate::types::{AlignmentPair, GAP_SYMBOL};

/// Split a dictionary-style pronunciation (`"K AE1 T"`) into phoneme symbols.
///
/// Symbols are kept verbatim: case and stress digits are significant.
pub fn parse_phonemes(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Check an input sequence before alignment. The gap symbol is reserved for
/// aligned output and an empty symbol cannot be compared meaningfully, so both
/// are data-contract violations.
pub fn validate_phonemes<S: AsRef<str>>(
    side: &'static str,
    phonemes: &[S],
) -> Result<(), ScoringError> {
    for (idx, phoneme) in phonemes.iter().enumerate() {
        let symbol = phoneme.as_ref();
        if symbol == GAP_SYMBOL {
            return Err(ScoringError::invalid_input(format!(
                "{side} phoneme {idx} is the reserved gap symbol '{GAP_SYMBOL}'"
            )));
        }
        if symbol.is_empty() {
            return Err(ScoringError::invalid_input(format!(
                "{side} phoneme {idx} is empty"
            )));
        }
    }
    Ok(())
}

/// Check the shape of an aligned pair before it is scored: both sides have
/// the same length, no position is a gap on both sides and every phoneme is a
/// valid symbol.
pub fn validate_alignment(pair: &AlignmentPair) -> Result<(), ScoringError> {
    let (reference_len, predicted_len) =
        (pair.aligned_reference.len(), pair.aligned_predicted.len());
    if reference_len != predicted_len {
        return Err(ScoringError::invalid_input(format!(
            "aligned sequences differ in length ({reference_len} reference vs {predicted_len} predicted)"
        )));
    }
    for (idx, (reference, predicted)) in pair
        .aligned_reference
        .iter()
        .zip(&pair.aligned_predicted)
        .enumerate()
    {
        if reference.is_none() && predicted.is_none() {
            return Err(ScoringError::invalid_input(format!(
                "aligned position {idx} is a gap on both sides"
            )));
        }
    }
    let reference: Vec<&String> = pair.aligned_reference.iter().flatten().collect();
    let predicted: Vec<&String> = pair.aligned_predicted.iter().flatten().collect();
    validate_phonemes("aligned reference", &reference)?;
    validate_phonemes("aligned predicted", &predicted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_produces_empty_sequence() {
        assert!(parse_phonemes("").is_empty());
        assert!(parse_phonemes("   \t ").is_empty());
    }

    #[test]
    fn splits_on_any_whitespace() {
        assert_eq!(parse_phonemes("DH  AH0\tK AE1 T\n"), ["DH", "AH0", "K", "AE1", "T"]);
    }

    #[test]
    fn symbols_keep_case_and_stress() {
        let seq = parse_phonemes("ah0 AH0 AH1");
        assert_eq!(seq, ["ah0", "AH0", "AH1"]);
    }

    #[test]
    fn validate_accepts_regular_sequences() {
        assert!(validate_phonemes("reference", &["K", "AE", "T"]).is_ok());
        assert!(validate_phonemes::<&str>("reference", &[]).is_ok());
    }

    #[test]
    fn validate_rejects_gap_symbol_with_position() {
        let err = validate_phonemes("predicted", &["K", "_", "T"]).unwrap_err();
        match err {
            ScoringError::InvalidInput { message } => {
                assert!(message.contains("predicted phoneme 1"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_empty_symbol() {
        assert!(matches!(
            validate_phonemes("reference", &["K", ""]),
            Err(ScoringError::InvalidInput { .. })
        ));
    }

    #[test]
    fn parsed_gap_symbol_is_caught_by_validation() {
        let seq = parse_phonemes("K _ T");
        assert_eq!(seq.len(), 3);
        assert!(validate_phonemes("reference", &seq).is_err());
    }

    fn pair(reference: &[Option<&str>], predicted: &[Option<&str>]) -> AlignmentPair {
        let owned = |seq: &[Option<&str>]| -> Vec<Option<String>> {
            seq.iter().map(|p| p.map(str::to_string)).collect()
        };
        AlignmentPair {
            aligned_reference: owned(reference),
            aligned_predicted: owned(predicted),
        }
    }

    #[test]
    fn well_formed_alignment_passes() {
        let aligned = pair(&[Some("K"), Some("AE"), None], &[Some("K"), None, Some("T")]);
        assert!(validate_alignment(&aligned).is_ok());
        assert!(validate_alignment(&AlignmentPair::default()).is_ok());
    }

    #[test]
    fn alignment_with_unequal_sides_is_rejected() {
        let aligned = pair(&[None, Some("K")], &[None]);
        let err = validate_alignment(&aligned).unwrap_err();
        match err {
            ScoringError::InvalidInput { message } => {
                assert!(message.contains("differ in length"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn alignment_with_double_gap_is_rejected() {
        let aligned = pair(&[Some("K"), None], &[Some("K"), None]);
        let err = validate_alignment(&aligned).unwrap_err();
        match err {
            ScoringError::InvalidInput { message } => {
                assert!(message.contains("position 1"), "{message}");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn alignment_carrying_gap_symbol_is_rejected() {
        let aligned = pair(&[Some("K"), Some("AE")], &[Some("K"), Some("_")]);
        assert!(matches!(
            validate_alignment(&aligned),
            Err(ScoringError::InvalidInput { .. })
        ));
    }
}
