use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): every batch was sent (or nothing needed sending)
/// - `Failure` (1): the command ran, but some batches failed
/// - `Error` (2): configuration, selection or I/O error
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    pub fn from_failures(has_failures: bool) -> Self {
        if has_failures {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
