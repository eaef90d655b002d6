use std::fmt;

use crate::distance::SQRT2;

/// Search configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Cost of one diagonal step. Orthogonal steps always cost `1`.
    pub diagonal_cost: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            diagonal_cost: SQRT2,
        }
    }
}

impl SearchConfig {
    /// Check that the octile heuristic stays admissible and consistent for
    /// this configuration, which requires a diagonal cost in `[1, 2]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = self.diagonal_cost;
        if !d.is_finite() || !(1.0..=2.0).contains(&d) {
            return Err(ConfigError::DiagonalCost(d));
        }
        Ok(())
    }
}

/// Errors that can occur when validating a [`SearchConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The diagonal step cost is outside `[1, 2]` or not finite.
    DiagonalCost(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DiagonalCost(d) => {
                write!(f, "diagonal cost {d} is outside [1, 2]")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
