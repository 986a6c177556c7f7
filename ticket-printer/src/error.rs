//! Error types for the printer library

use thiserror::Error;

/// Printer error types
#[derive(Debug, Error)]
pub enum PrintError {
    /// Transport type has no working implementation
    #[error("Unsupported transport: {0}")]
    UnsupportedTransport(String),

    /// Required target (device path, spooler queue) is missing
    #[error("Printer not configured: {0}")]
    PrinterNotConfigured(String),

    /// Character device path does not exist
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// Character device exists but could not be opened for writing
    #[error("Cannot open device {path}: {source}")]
    DeviceOpen {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Write to the character device failed
    #[error("Write to device {path} failed: {source}")]
    DeviceWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Print spooler command exited unsuccessfully
    #[error("Spooler command failed (exit code {code:?}): {output}")]
    SpoolerCommand { code: Option<i32>, output: String },

    /// IO error during printing
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for printer operations
pub type PrintResult<T> = Result<T, PrintError>;
