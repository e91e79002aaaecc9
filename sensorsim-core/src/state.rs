//! Per-sensor temporal state

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::reading::GroundTruthReading;

/// Mutable state owned by exactly one sensor
///
/// Only the lag filter reads and replaces it. Drift needs no memory because it
/// is a function of absolute simulation time.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorState {
    /// Whether the lag filter has bootstrapped
    pub first_sample_taken: bool,
    /// Previous lag filter output
    pub last_filtered_value: Option<GroundTruthReading>,
    /// Successful samples since construction; `reset` keeps the count
    pub samples_taken: u64,
}

impl SensorState {
    /// State of a freshly constructed sensor
    pub const fn new() -> Self {
        Self {
            first_sample_taken: false,
            last_filtered_value: None,
            samples_taken: 0,
        }
    }
}
