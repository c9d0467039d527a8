//! Process execution seam for the Bluetooth collaborators.
//!
//! Everything that touches the host goes through [`CommandRunner`], so the
//! inventory parser and the control functions can be exercised in tests
//! with a scripted runner.

use super::BluetoothError;
use std::process::Command;

/// Runs external programs and looks them up on `PATH`.
pub trait CommandRunner: Send + Sync {
    /// Runs `program` with `args` to completion and returns its stdout.
    ///
    /// A non-zero exit is reported as [`BluetoothError::CommandFailed`] with
    /// the command line as context.
    fn run(&self, program: &str, args: &[&str]) -> Result<Vec<u8>, BluetoothError>;

    /// Returns `true` if `program` resolves on `PATH`.
    fn is_installed(&self, program: &str) -> bool;
}

/// [`CommandRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<Vec<u8>, BluetoothError> {
        tracing::debug!("running {} {}", program, args.join(" "));
        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|source| BluetoothError::Spawn {
                program: program.to_string(),
                source,
            })?;

        if output.status.success() {
            return Ok(output.stdout);
        }

        let status = match output.status.code() {
            Some(code) => format!("status {code}"),
            None => "signal".to_string(),
        };
        Err(BluetoothError::CommandFailed {
            context: command_line(program, args),
            program: program.to_string(),
            status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    fn is_installed(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

fn command_line(program: &str, args: &[&str]) -> String {
    if args.is_empty() {
        program.to_string()
    } else {
        format!("{} {}", program, args.join(" "))
    }
}
