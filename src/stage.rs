use std::fmt;
use std::path::PathBuf;

/// Result of running a single pipeline stage.
///
/// Recoverable conditions such as a missing upstream file are reported as
/// [`StageOutcome::Skipped`] rather than as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    Written { path: PathBuf, rows: usize },
    Skipped { reason: String },
}

impl StageOutcome {
    pub fn skipped(reason: impl Into<String>) -> Self {
        StageOutcome::Skipped {
            reason: reason.into(),
        }
    }

    pub fn is_written(&self) -> bool {
        matches!(self, StageOutcome::Written { .. })
    }
}

impl fmt::Display for StageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StageOutcome::Written { path, rows } => {
                write!(f, "wrote {} rows to {}", rows, path.display())
            }
            StageOutcome::Skipped { reason } => write!(f, "{}", reason),
        }
    }
}
