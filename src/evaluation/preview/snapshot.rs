use std::fmt::{Display, Formatter, Result};

/// State of a prequential run at one sampling point.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub samples_seen: u64,
    pub updates: u64,
    pub rejected: u64,
    /// Mean log density of every sample so far, each scored before training.
    pub mean_log_density: f64,
    /// Same, restricted to the samples since the previous snapshot.
    pub window_log_density: f64,
    pub weights: Vec<f64>,
    pub means: Vec<f64>,
    pub std_devs: Vec<f64>,
    pub seconds: f64,
}

impl Display for Snapshot {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "seen={}, updates={}, rejected={}, ll={:.6}, window_ll={:.6}, t={:.3}s",
            self.samples_seen,
            self.updates,
            self.rejected,
            self.mean_log_density,
            self.window_log_density,
            self.seconds
        )
    }
}
