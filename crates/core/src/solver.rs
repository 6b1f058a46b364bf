//! Solver traits and configuration.

use crate::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What to do with order lines that cannot be expanded into boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IssuePolicy {
    /// Skip the line, record an issue and keep packing the rest.
    #[default]
    Skip,
    /// Abort the run on the first problematic line.
    Fail,
}

/// Common configuration for solvers.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Maximum computation time in milliseconds (0 = unlimited).
    pub time_limit_ms: u64,

    /// Handling of unknown SKUs and invalid catalog entries.
    pub issue_policy: IssuePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            time_limit_ms: 0,
            issue_policy: IssuePolicy::default(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the time limit in milliseconds.
    pub fn with_time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Sets the issue policy.
    pub fn with_issue_policy(mut self, policy: IssuePolicy) -> Self {
        self.issue_policy = policy;
        self
    }

    /// Shorthand for [`IssuePolicy::Fail`].
    pub fn strict(self) -> Self {
        self.with_issue_policy(IssuePolicy::Fail)
    }

    /// Returns true if a time limit is set.
    pub fn has_time_limit(&self) -> bool {
        self.time_limit_ms > 0
    }
}

/// Progress callback for long-running operations.
pub type ProgressCallback = Box<dyn Fn(ProgressInfo) + Send + Sync>;

/// Progress information during solving.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressInfo {
    /// Current phase name.
    pub phase: String,
    /// Pallets sealed so far.
    pub pallets_sealed: usize,
    /// Boxes committed to layers so far.
    pub boxes_packed: usize,
    /// Total boxes to pack.
    pub total_boxes: usize,
    /// Elapsed time in milliseconds.
    pub elapsed_ms: u64,
    /// Whether the solver is still running.
    pub running: bool,
}

impl ProgressInfo {
    /// Creates progress info for a running solve.
    pub fn new() -> Self {
        Self {
            running: true,
            ..Default::default()
        }
    }

    /// Sets the phase name.
    pub fn with_phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = phase.into();
        self
    }

    /// Sets the sealed pallet count.
    pub fn with_pallets(mut self, sealed: usize) -> Self {
        self.pallets_sealed = sealed;
        self
    }

    /// Sets packed and total box counts.
    pub fn with_boxes(mut self, packed: usize, total: usize) -> Self {
        self.boxes_packed = packed;
        self.total_boxes = total;
        self
    }

    /// Sets the elapsed time.
    pub fn with_elapsed(mut self, ms: u64) -> Self {
        self.elapsed_ms = ms;
        self
    }

    /// Marks the solve as finished.
    pub fn finished(mut self) -> Self {
        self.running = false;
        self
    }

    /// Fraction of boxes packed (1.0 when there is nothing to pack).
    pub fn fraction(&self) -> f64 {
        if self.total_boxes == 0 {
            1.0
        } else {
            self.boxes_packed as f64 / self.total_boxes as f64
        }
    }
}

/// Trait for stacking solvers.
pub trait Solver {
    /// The unit being packed.
    type Item;
    /// The container the items are packed into.
    type Container;
    /// The solution produced.
    type Output;

    /// Solves the packing problem.
    fn solve(&self, items: &[Self::Item], container: &Self::Container) -> Result<Self::Output>;

    /// Solves with a progress callback.
    fn solve_with_progress(
        &self,
        items: &[Self::Item],
        container: &Self::Container,
        callback: ProgressCallback,
    ) -> Result<Self::Output>;

    /// Cancels an ongoing solve operation.
    fn cancel(&self);
}
