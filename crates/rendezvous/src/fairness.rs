//! Scoring a venue by the travel times it imposes. Lower is fairer.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FairnessStrategy {
    /// Longest single journey.
    #[default]
    MinMax,
    /// Sum of all journeys.
    MinTotal,
    /// Population standard deviation of the journeys.
    MinVariance,
}

/// Score `times` (minutes) under `strategy`. An empty slice scores 0.
pub fn score(times: &[f64], strategy: FairnessStrategy) -> f64 {
    if times.is_empty() {
        return 0.0;
    }
    match strategy {
        FairnessStrategy::MinMax => times.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        FairnessStrategy::MinTotal => times.iter().sum(),
        FairnessStrategy::MinVariance => {
            let n = times.len() as f64;
            let mean = times.iter().sum::<f64>() / n;
            (times.iter().map(|t| (t - mean).powi(2)).sum::<f64>() / n).sqrt()
        }
    }
}
