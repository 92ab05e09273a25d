use std::path::PathBuf;

use crate::models::proof::UnitOutcome;

/// Tally of proofs configured so far.
///
/// Owned by the scheduler; `record` is the only mutation and callers must
/// hold the scheduler's lock while calling it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressCounter {
    pub complete: usize,
    pub succeeded: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
    pub total: usize,
    pub width: usize,
}

impl ProgressCounter {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            width: decimal_width(total),
            ..Self::default()
        }
    }

    /// Record the outcome of one proof
    pub fn record(&mut self, path: PathBuf, outcome: UnitOutcome) {
        match outcome {
            UnitOutcome::Succeeded => self.succeeded.push(path),
            UnitOutcome::Failed => self.failed.push(path),
        }
        self.complete += 1;
    }

    pub fn is_drained(&self) -> bool {
        self.complete == self.total
    }

    /// The live progress line, without carriage return
    pub fn render(&self) -> String {
        format!(
            "Configuring CBMC proofs: {:>width$} / {:>width$}",
            self.complete,
            self.total,
            width = self.width
        )
    }
}

fn decimal_width(n: usize) -> usize {
    n.max(1).to_string().len()
}
