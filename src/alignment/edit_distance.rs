use crate::alignment::tokenization::validate_phonemes;
use crate::config::AlignmentCosts;
use crate::error::ScoringError;
use crate::types::AlignmentPair;

/// Full `(R + 1) × (P + 1)` table of minimal edit costs, row-major.
pub(crate) struct CostMatrix {
    cols: usize,
    cells: Vec<u32>,
}

impl CostMatrix {
    #[inline(always)]
    fn at(&self, i: usize, j: usize) -> u32 {
        self.cells[i * self.cols + j]
    }

    fn distance(&self) -> u32 {
        self.cells.last().copied().unwrap_or(0)
    }
}

/// Global alignment of a reference and a predicted phoneme sequence with the
/// default costs (match 0, substitution/insertion/deletion 1).
pub fn align<R: AsRef<str>, P: AsRef<str>>(
    reference: &[R],
    predicted: &[P],
) -> Result<AlignmentPair, ScoringError> {
    align_with_costs(reference, predicted, &AlignmentCosts::default())
}

/// Needleman–Wunsch style global alignment.
///
/// Backtracking starts at the bottom-right cell. When several moves reproduce
/// the cell cost the diagonal move wins, then the vertical move (deletion),
/// then the horizontal move (insertion). This keeps phonemes paired
/// positionally before any gap is introduced and makes the output
/// deterministic.
pub fn align_with_costs<R: AsRef<str>, P: AsRef<str>>(
    reference: &[R],
    predicted: &[P],
    costs: &AlignmentCosts,
) -> Result<AlignmentPair, ScoringError> {
    validate_phonemes("reference", reference)?;
    validate_phonemes("predicted", predicted)?;

    let matrix = build_cost_matrix(reference, predicted, costs);
    Ok(backtrack(reference, predicted, costs, &matrix))
}

/// Minimal total edit cost between two sequences under `costs`.
pub fn edit_distance<R: AsRef<str>, P: AsRef<str>>(
    reference: &[R],
    predicted: &[P],
    costs: &AlignmentCosts,
) -> Result<u32, ScoringError> {
    validate_phonemes("reference", reference)?;
    validate_phonemes("predicted", predicted)?;
    Ok(build_cost_matrix(reference, predicted, costs).distance())
}

#[inline(always)]
fn pair_cost(reference: &str, predicted: &str, costs: &AlignmentCosts) -> u32 {
    if reference == predicted {
        costs.match_cost
    } else {
        costs.substitution
    }
}

pub(crate) fn build_cost_matrix<R: AsRef<str>, P: AsRef<str>>(
    reference: &[R],
    predicted: &[P],
    costs: &AlignmentCosts,
) -> CostMatrix {
    let rows = reference.len() + 1;
    let cols = predicted.len() + 1;
    let mut cells = vec![0u32; rows * cols];

    for i in 1..rows {
        cells[i * cols] = cells[(i - 1) * cols].saturating_add(costs.deletion);
    }
    for j in 1..cols {
        cells[j] = cells[j - 1].saturating_add(costs.insertion);
    }

    for i in 1..rows {
        let ref_symbol = reference[i - 1].as_ref();
        let row = i * cols;
        let prev_row = (i - 1) * cols;
        for j in 1..cols {
            let diagonal = cells[prev_row + j - 1]
                .saturating_add(pair_cost(ref_symbol, predicted[j - 1].as_ref(), costs));
            let vertical = cells[prev_row + j].saturating_add(costs.deletion);
            let horizontal = cells[row + j - 1].saturating_add(costs.insertion);
            cells[row + j] = diagonal.min(vertical).min(horizontal);
        }
    }

    CostMatrix { cols, cells }
}

fn backtrack<R: AsRef<str>, P: AsRef<str>>(
    reference: &[R],
    predicted: &[P],
    costs: &AlignmentCosts,
    matrix: &CostMatrix,
) -> AlignmentPair {
    let capacity = reference.len() + predicted.len();
    let mut aligned_reference = Vec::with_capacity(capacity);
    let mut aligned_predicted = Vec::with_capacity(capacity);

    let (mut i, mut j) = (reference.len(), predicted.len());
    while i > 0 || j > 0 {
        let here = matrix.at(i, j);

        if i > 0 && j > 0 {
            let ref_symbol = reference[i - 1].as_ref();
            let pred_symbol = predicted[j - 1].as_ref();
            let diagonal = matrix
                .at(i - 1, j - 1)
                .saturating_add(pair_cost(ref_symbol, pred_symbol, costs));
            if here == diagonal {
                aligned_reference.push(Some(ref_symbol.to_string()));
                aligned_predicted.push(Some(pred_symbol.to_string()));
                i -= 1;
                j -= 1;
                continue;
            }
        }

        if i > 0 && (j == 0 || here == matrix.at(i - 1, j).saturating_add(costs.deletion)) {
            aligned_reference.push(Some(reference[i - 1].as_ref().to_string()));
            aligned_predicted.push(None);
            i -= 1;
            continue;
        }

        debug_assert!(j > 0);
        aligned_reference.push(None);
        aligned_predicted.push(Some(predicted[j - 1].as_ref().to_string()));
        j -= 1;
    }

    aligned_reference.reverse();
    aligned_predicted.reverse();
    AlignmentPair {
        aligned_reference,
        aligned_predicted,
    }
}
