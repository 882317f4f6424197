use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

/// Accuracy cut-offs for the three word tiers. Applied in order: `correct`
/// first, then `partial`, everything below is mispronounced.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationThresholds {
    pub correct: f64,
    pub partial: f64,
}

impl ClassificationThresholds {
    pub const DEFAULT_CORRECT: f64 = 0.85;
    pub const DEFAULT_PARTIAL: f64 = 0.5;
}

impl Default for ClassificationThresholds {
    fn default() -> Self {
        Self {
            correct: Self::DEFAULT_CORRECT,
            partial: Self::DEFAULT_PARTIAL,
        }
    }
}

/// Edit costs used by the aligner. Integer so that equal-cost backtrack moves
/// compare exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignmentCosts {
    #[serde(rename = "match")]
    pub match_cost: u32,
    pub substitution: u32,
    pub insertion: u32,
    pub deletion: u32,
}

impl Default for AlignmentCosts {
    fn default() -> Self {
        Self {
            match_cost: 0,
            substitution: 1,
            insertion: 1,
            deletion: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub thresholds: ClassificationThresholds,
    pub costs: AlignmentCosts,
}

impl ScoringConfig {
    pub fn load(path: &Path) -> Result<Self, ScoringError> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| ScoringError::io("read scoring config", e))?;
        let config: Self = serde_json::from_str(&data)
            .map_err(|e| ScoringError::json("parse scoring config", e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        let ClassificationThresholds { correct, partial } = self.thresholds;
        if !correct.is_finite() || !partial.is_finite() {
            return Err(ScoringError::invalid_config(format!(
                "thresholds must be finite (correct={correct}, partial={partial})"
            )));
        }
        if !(0.0..=1.0).contains(&correct) || !(0.0..=1.0).contains(&partial) {
            return Err(ScoringError::invalid_config(format!(
                "thresholds must lie in [0, 1] (correct={correct}, partial={partial})"
            )));
        }
        if partial > correct {
            return Err(ScoringError::invalid_config(format!(
                "partial threshold {partial} exceeds correct threshold {correct}"
            )));
        }

        let costs = self.costs;
        if costs.substitution == 0 || costs.insertion == 0 || costs.deletion == 0 {
            return Err(ScoringError::invalid_config(format!(
                "edit costs must be positive (substitution={}, insertion={}, deletion={})",
                costs.substitution, costs.insertion, costs.deletion
            )));
        }
        if costs.match_cost > costs.substitution {
            return Err(ScoringError::invalid_config(format!(
                "match cost {} exceeds substitution cost {}",
                costs.match_cost, costs.substitution
            )));
        }
        Ok(())
    }
}
