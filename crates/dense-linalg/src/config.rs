use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// What the eigensolver does when it runs out of sweeps.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ConvergencePolicy {
    /// Return the last iterate with `converged == false` and log a warning.
    #[default]
    BestEffort,
    /// Fail with `LinalgError::NoConvergence`.
    Strict,
}

impl FromStr for ConvergencePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "best_effort" | "besteffort" => Ok(ConvergencePolicy::BestEffort),
            "strict" => Ok(ConvergencePolicy::Strict),
            _ => Err(format!(
                "Unknown convergence policy: {}. Expected best_effort or strict",
                s
            )),
        }
    }
}

/// Settings for the Jacobi eigensolver.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct EigenConfig {
    /// Largest off-diagonal magnitude still treated as zero.
    pub tolerance: f64,
    /// Upper bound on full sweeps over all `(p, q)` pairs.
    pub max_sweeps: usize,

    #[serde(default)]
    pub policy: ConvergencePolicy,
}

impl EigenConfig {
    pub fn new(tolerance: f64, max_sweeps: usize) -> Self {
        Self {
            tolerance,
            max_sweeps,
            policy: ConvergencePolicy::BestEffort,
        }
    }

    pub fn with_policy(mut self, policy: ConvergencePolicy) -> Self {
        self.policy = policy;
        self
    }
}

impl Default for EigenConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_sweeps: 100,
            policy: ConvergencePolicy::BestEffort,
        }
    }
}
