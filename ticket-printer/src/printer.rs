//! Printer adapters for sending ESC/POS data
//!
//! Supports:
//! - Character devices (serial ports, USB line printer nodes)
//! - OS print spooler (CUPS `lp` in raw mode)
//! - Network printers (not implemented, always refused)

use crate::error::{PrintError, PrintResult};
use std::ffi::OsString;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::NamedTempFile;
use tracing::{info, instrument, warn};

/// Default spooler print command (CUPS)
pub const DEFAULT_PRINT_COMMAND: &str = "lp";
/// Default spooler status command (CUPS)
pub const DEFAULT_STATUS_COMMAND: &str = "lpstat";

/// Trait for printer adapters
pub trait Printer {
    /// Send raw ESC/POS data to the printer
    fn print(&self, data: &[u8]) -> PrintResult<()>;

    /// Check if the printer is online/reachable
    fn is_online(&self) -> bool;
}

/// Character device printer
///
/// The device is opened, written and closed within a single `print` call.
#[derive(Debug, Clone)]
pub struct DevicePrinter {
    path: PathBuf,
}

impl DevicePrinter {
    /// Create a printer for a device node, e.g. `/dev/usb/lp0` or `/dev/ttyUSB0`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Printer for DevicePrinter {
    #[instrument(skip(self, data), fields(path = %self.path.display(), data_len = data.len()))]
    fn print(&self, data: &[u8]) -> PrintResult<()> {
        let path = self.path.display().to_string();

        if !self.path.exists() {
            warn!("Device not found");
            return Err(PrintError::DeviceNotFound(path));
        }

        let mut device = OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(|source| match source.kind() {
                io::ErrorKind::NotFound => PrintError::DeviceNotFound(path.clone()),
                _ => PrintError::DeviceOpen {
                    path: path.clone(),
                    source,
                },
            })?;

        device
            .write_all(data)
            .and_then(|_| device.flush())
            .map_err(|source| PrintError::DeviceWrite {
                path: path.clone(),
                source,
            })?;

        info!("Print job written to device");
        Ok(())
    }

    fn is_online(&self) -> bool {
        self.path.exists()
    }
}

/// OS print spooler printer
///
/// Spools the job to a temporary file and hands it to the spooler in raw
/// mode. The temporary file is removed on every exit path.
#[derive(Debug, Clone)]
pub struct SpoolerPrinter {
    target: String,
    print_command: String,
    status_command: String,
    temp_dir: Option<PathBuf>,
}

impl SpoolerPrinter {
    /// Create a printer for a spooler queue
    pub fn new(target: &str) -> PrintResult<Self> {
        let target = target.trim();
        if target.is_empty() {
            return Err(PrintError::PrinterNotConfigured(
                "No spooler target specified".to_string(),
            ));
        }

        Ok(Self {
            target: target.to_string(),
            print_command: DEFAULT_PRINT_COMMAND.to_string(),
            status_command: DEFAULT_STATUS_COMMAND.to_string(),
            temp_dir: None,
        })
    }

    /// Override the print and status commands (non-CUPS hosts)
    pub fn with_commands(mut self, print: impl Into<String>, status: impl Into<String>) -> Self {
        self.print_command = print.into();
        self.status_command = status.into();
        self
    }

    /// Spool into a specific directory instead of the system temp dir
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Arguments for the print command: `-d <target> -o raw <file>`
    fn print_args(&self, file: &Path) -> Vec<OsString> {
        vec![
            "-d".into(),
            self.target.clone().into(),
            "-o".into(),
            "raw".into(),
            file.as_os_str().to_os_string(),
        ]
    }

    fn spool_file(&self, data: &[u8]) -> io::Result<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("receipt-").suffix(".bin");
        let mut file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(data)?;
        file.flush()?;
        Ok(file)
    }
}

impl Printer for SpoolerPrinter {
    #[instrument(skip(self, data), fields(target = %self.target, data_len = data.len()))]
    fn print(&self, data: &[u8]) -> PrintResult<()> {
        let spool = self.spool_file(data)?;

        let result = Command::new(&self.print_command)
            .args(self.print_args(spool.path()))
            .stdin(Stdio::null())
            .output();

        if let Err(e) = spool.close() {
            warn!(error = %e, "Failed to remove spool file");
        }

        let output = result.map_err(|e| PrintError::SpoolerCommand {
            code: None,
            output: format!("{}: {}", self.print_command, e),
        })?;

        let captured = captured_output(&output);
        if !output.status.success() {
            warn!(code = ?output.status.code(), output = %captured, "Spooler rejected print job");
            return Err(PrintError::SpoolerCommand {
                code: output.status.code(),
                output: captured,
            });
        }

        info!(output = %captured, "Print job queued");
        Ok(())
    }

    #[instrument(skip(self), fields(target = %self.target))]
    fn is_online(&self) -> bool {
        let status = Command::new(&self.status_command)
            .arg("-p")
            .arg(&self.target)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match status {
            Ok(s) if s.success() => true,
            Ok(s) => {
                warn!(code = ?s.code(), "Printer queue unavailable");
                false
            }
            Err(e) => {
                warn!(error = %e, "Status command failed to start");
                false
            }
        }
    }
}

/// Network printer
///
/// Raw network printing is not implemented: `print` always fails and
/// `is_online` reports the printer as reachable without probing.
#[derive(Debug, Clone)]
pub struct NetworkPrinter {
    host: String,
    port: u16,
}

impl NetworkPrinter {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            host: host.to_string(),
            port,
        }
    }

    /// Get the printer address
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Printer for NetworkPrinter {
    fn print(&self, _data: &[u8]) -> PrintResult<()> {
        warn!(addr = %self.addr(), "Network printing requested");
        Err(PrintError::UnsupportedTransport(
            "network printing is not implemented".to_string(),
        ))
    }

    fn is_online(&self) -> bool {
        true
    }
}

/// Trimmed stdout followed by stderr
fn captured_output(output: &Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    [stdout.trim(), stderr.trim()]
        .iter()
        .filter(|s| !s.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("\n")
}
