//! Holder for the error currently shown to the user.

use super::presentable::{normalize, RawFailure, UserError};
use tracing::{debug, warn};

/// Whether an error is waiting for the user's acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReportState {
    /// Nothing to show.
    #[default]
    Idle,
    /// An error is set and should be displayed.
    Presenting(UserError),
}

/// Keeps at most one reported error until it is cleared.
///
/// A second report before [`ErrorReporter::clear`] replaces the first; there
/// is no queue. Construct one per interface and pass it to whatever needs to
/// report.
///
/// # Examples
///
/// ```
/// use faith_journal::errors::{ErrorReporter, RawFailure};
///
/// let mut reporter = ErrorReporter::new();
/// reporter.report(RawFailure::Sync { message: "sync timeout".to_string() });
/// assert!(reporter.is_presenting());
///
/// reporter.clear();
/// assert!(reporter.current_error().is_none());
/// ```
#[derive(Debug, Default)]
pub struct ErrorReporter {
    state: ReportState,
}

impl ErrorReporter {
    /// Creates a reporter in the idle state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes `failure` and presents the result.
    pub fn report(&mut self, failure: impl Into<RawFailure>) {
        let error = normalize(failure.into());
        self.report_error(error);
    }

    /// Presents an error that is already part of the taxonomy.
    pub fn report_error(&mut self, error: UserError) {
        warn!(error_id = error.id(), "Reporting error: {}", error);

        if let ReportState::Presenting(replaced) = &self.state {
            debug!(replaced_id = replaced.id(), "Replaced unacknowledged error");
        }
        self.state = ReportState::Presenting(error);
    }

    /// Drops the current error and returns to idle.
    pub fn clear(&mut self) {
        if self.is_presenting() {
            debug!("Clearing reported error");
        }
        self.state = ReportState::Idle;
    }

    /// The error being presented, if any.
    pub fn current_error(&self) -> Option<&UserError> {
        match &self.state {
            ReportState::Presenting(error) => Some(error),
            ReportState::Idle => None,
        }
    }

    /// True while an error is waiting for acknowledgment.
    pub fn is_presenting(&self) -> bool {
        matches!(self.state, ReportState::Presenting(_))
    }

    /// The full state.
    pub fn state(&self) -> &ReportState {
        &self.state
    }
}
