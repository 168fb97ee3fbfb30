//! Error and result types for typing runs

use std::time::Duration;
use thiserror::Error;

/// What a run did, counted as it went.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Characters appended to the sink.
    pub typed_units: usize,
    /// Characters erased by delete regions.
    pub deleted_units: usize,
    /// Pause tokens honored.
    pub pauses: usize,
    /// Delete regions entered, nested ones included.
    pub delete_regions: usize,
    /// Close tags that matched no open scope.
    pub ignored_closes: usize,
    /// Sum of every delay requested from the clock.
    pub requested_delay: Duration,
}

impl RunSummary {
    /// Characters still visible at the end of the run.
    pub fn net_units(&self) -> usize {
        self.typed_units - self.deleted_units
    }
}

/// The engine never fails on markup; the only way out early is cancellation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    #[error(
        "typing run cancelled after {} typed and {} deleted characters",
        .summary.typed_units,
        .summary.deleted_units
    )]
    Cancelled { summary: RunSummary },
}

impl TypeError {
    pub fn summary(&self) -> &RunSummary {
        match self {
            TypeError::Cancelled { summary } => summary,
        }
    }
}
