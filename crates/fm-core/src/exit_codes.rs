//! Exit codes for the fm-core CLI.
//!
//! Exit codes communicate operation outcome without requiring output
//! parsing. These are stable.

/// Exit codes for fm-core operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Clean result, nothing to flag
    Clean = 0,

    /// Analysis completed and surfaced findings (anomalies, implausible fill)
    AnomaliesFound = 1,

    /// Configuration error
    ConfigError = 10,

    /// Snapshot load/lookup error
    SnapshotError = 11,

    /// Requested metric unavailable (not enough history)
    InsufficientData = 12,

    /// I/O error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean | ExitCode::AnomaliesFound)
    }

    /// Check if this exit code indicates an error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
