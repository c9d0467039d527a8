//! Error types for device inventory and control.

use thiserror::Error;

/// Errors returned by the Bluetooth collaborators.
///
/// Every variant renders a reason an operator can act on; the TUI shows the
/// `Display` text verbatim in its status line.
#[derive(Debug, Error)]
pub enum BluetoothError {
    /// The helper tool needed for per-device actions is not on `PATH`.
    #[error("{helper} required -- brew install {helper}")]
    HelperMissing {
        /// Name of the missing helper binary.
        helper: String,
    },

    /// The external program could not be started at all.
    #[error("failed to run {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The external program ran but exited unsuccessfully.
    #[error("{context}: {program} exited with {status}{}", format_stderr(stderr))]
    CommandFailed {
        /// What was being attempted, e.g. `failed to connect to AA:BB:..`.
        context: String,
        /// Program that failed.
        program: String,
        /// Exit status description (`status 1`, `signal`).
        status: String,
        /// Trimmed standard error output, possibly empty.
        stderr: String,
    },

    /// The inventory output could not be parsed.
    #[error("failed to parse bluetooth data: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BluetoothError {
    /// Returns a copy of this error with `context` replaced.
    ///
    /// Runners report failures without knowing what the caller was trying to
    /// do; control functions attach that here. Variants without a context
    /// field are returned unchanged.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        match self {
            Self::CommandFailed {
                program,
                status,
                stderr,
                ..
            } => Self::CommandFailed {
                context: context.into(),
                program,
                status,
                stderr,
            },
            other => other,
        }
    }
}

fn format_stderr(stderr: &str) -> String {
    if stderr.is_empty() {
        String::new()
    } else {
        format!(" ({stderr})")
    }
}
