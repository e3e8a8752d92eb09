use serde::{Deserialize, Serialize};

/// Run-time knobs for one optimization run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Strength of the section-size balance penalty (`alpha`).
    pub balance_weight: f64,
    /// Strength of the unassignment-spread penalty (`beta`).
    pub fairness_weight: f64,
    /// Hard wall-clock cap on the solver invocation, in seconds.
    pub solver_time_limit_sec: u64,
    /// Identifier of the external MILP engine. Informational only: the
    /// `good_lp` backend is selected at compile time via Cargo features.
    pub solver_backend: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            balance_weight: 0.1,
            fairness_weight: 0.1,
            solver_time_limit_sec: 10,
            solver_backend: "highs".to_string(),
        }
    }
}
