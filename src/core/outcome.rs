//! Batch Operation Outcomes
//!
//! Every batch-facing operation in nestscan reports through a uniform
//! `{status, message}` object so callers can keep going past a single
//! failed document or report. Analysis entry points wrap it together
//! with their findings in [`AnalysisOutcome`].
//!
//! @module core/outcome

use serde::{Deserialize, Serialize};

// =============================================================================
// OUTCOME
// =============================================================================

/// Status and accumulated messages of one batch operation.
///
/// Merging outcomes is AND-semantics on status: once any merged-in
/// outcome failed, the whole operation reads as failed, while the
/// message trail keeps every step's text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    /// True while no merged step has failed
    pub status: bool,
    /// Newline-joined message trail
    pub message: String,
}

impl Outcome {
    /// New successful outcome with no message
    pub fn ok() -> Self {
        Self {
            status: true,
            message: String::new(),
        }
    }

    /// New successful outcome with a message
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: true,
            message: message.into(),
        }
    }

    /// New failed outcome with a message
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: false,
            message: message.into(),
        }
    }

    /// Append a message line without touching the status
    pub fn append_message(&mut self, message: &str) {
        if self.message.is_empty() {
            self.message = message.to_string();
        } else {
            self.message.push('\n');
            self.message.push_str(message);
        }
    }

    /// Set the status and append a message in one step
    pub fn update_sep(&mut self, status: bool, message: &str) {
        self.status = self.status && status;
        self.append_message(message);
    }

    /// Merge another outcome into this one
    pub fn update(&mut self, other: &Outcome) {
        self.status = self.status && other.status;
        if !other.message.is_empty() {
            self.append_message(&other.message);
        }
    }
}

impl Default for Outcome {
    fn default() -> Self {
        Self::ok()
    }
}

// =============================================================================
// ANALYSIS OUTCOME
// =============================================================================

/// An [`Outcome`] carrying the findings of an analysis pass.
///
/// `result` is empty when the operation failed or found nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOutcome<T> {
    pub outcome: Outcome,
    pub result: Vec<T>,
}

impl<T> AnalysisOutcome<T> {
    /// Successful analysis with findings
    pub fn success(message: impl Into<String>, result: Vec<T>) -> Self {
        Self {
            outcome: Outcome::success(message),
            result,
        }
    }

    /// Failed analysis, no findings
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::failure(message),
            result: Vec::new(),
        }
    }

    /// Shorthand for the carried status
    pub fn status(&self) -> bool {
        self.outcome.status
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_keeps_failure_sticky() {
        let mut outcome = Outcome::ok();
        outcome.update(&Outcome::failure("step one failed"));
        outcome.update(&Outcome::success("step two ok"));

        assert!(!outcome.status);
        assert_eq!(outcome.message, "step one failed\nstep two ok");
    }

    #[test]
    fn test_update_sep_appends() {
        let mut outcome = Outcome::success("started");
        outcome.update_sep(true, "finished");

        assert!(outcome.status);
        assert_eq!(outcome.message, "started\nfinished");
    }

    #[test]
    fn test_analysis_outcome_failure_is_empty() {
        let analysis: AnalysisOutcome<u32> = AnalysisOutcome::failure("no report");
        assert!(!analysis.status());
        assert!(analysis.result.is_empty());
    }
}
