use crate::types::{AlignmentPair, PhonemeOutcome, PhonemeScore};

/// Classify every aligned position and tally the outcomes.
pub fn score_alignment(pair: &AlignmentPair) -> PhonemeScore {
    let mut score = PhonemeScore {
        outcomes: Vec::with_capacity(pair.len()),
        ..PhonemeScore::default()
    };

    for (reference, predicted) in pair
        .aligned_reference
        .iter()
        .zip(pair.aligned_predicted.iter())
    {
        let outcome = outcome_at(reference.as_deref(), predicted.as_deref());
        match outcome {
            PhonemeOutcome::Match => score.match_count += 1,
            PhonemeOutcome::Substitution => score.substitution_count += 1,
            PhonemeOutcome::Insertion => score.insertion_count += 1,
            PhonemeOutcome::Deletion => score.deletion_count += 1,
        }
        score.outcomes.push(outcome);
    }

    score
}

pub(crate) fn outcome_at(reference: Option<&str>, predicted: Option<&str>) -> PhonemeOutcome {
    match (reference, predicted) {
        (Some(r), Some(p)) if r == p => PhonemeOutcome::Match,
        (None, _) => PhonemeOutcome::Insertion,
        (_, None) => PhonemeOutcome::Deletion,
        _ => PhonemeOutcome::Substitution,
    }
}
