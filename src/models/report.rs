use camino::Utf8PathBuf;
use std::fmt;
use std::time::Duration;

/// Terminal status of one backend build invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Succeeded,
    Failed,
    Cancelled,
    Unknown,
}

impl fmt::Display for BuildOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BuildOutcome::Succeeded => "Succeeded",
            BuildOutcome::Failed => "Failed",
            BuildOutcome::Cancelled => "Cancelled",
            BuildOutcome::Unknown => "Unknown",
        };
        f.write_str(label)
    }
}

/// Result of one build invocation, produced by the build backend and
/// read-only to the orchestrator.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub outcome: BuildOutcome,
    pub output_path: Utf8PathBuf,
    pub elapsed: Duration,
    pub total_errors: usize,
}

/// Option flags passed to the build backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub development: bool,
    pub auto_run: bool,
}
