//! Transport dispatcher
//!
//! Routes encoded print data to the transport selected by the printer
//! configuration, and reports availability without printing anything.

use std::path::PathBuf;

use serde::Serialize;
use shared::models::{PrinterConfiguration, TransportType};
use ticket_printer::{DevicePrinter, NetworkPrinter, PrintError, Printer, SpoolerPrinter};
use tracing::{debug, instrument};

use super::error::{PrintJobError, PrintJobResult};

/// Printer status snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrinterStatus {
    pub enabled: bool,
    pub transport: String,
    pub target: Option<String>,
    pub available: bool,
}

/// Delivery seam between the print pipeline and the outside world
pub trait Transport {
    /// Deliver encoded print data
    fn send(&self, data: &[u8], config: &PrinterConfiguration) -> PrintJobResult<()>;

    /// Whether the configured printer can currently accept jobs
    fn is_available(&self, config: &PrinterConfiguration) -> bool;

    fn status(&self, config: &PrinterConfiguration) -> PrinterStatus {
        PrinterStatus {
            enabled: config.enabled,
            transport: config.transport.to_string(),
            target: config.target(),
            available: self.is_available(config),
        }
    }
}

/// Production transport: builds a printer adapter per call
///
/// Holds no handles between calls; each `send` opens and releases its
/// own device or spool file.
#[derive(Debug, Clone, Default)]
pub struct TransportDispatcher {
    spooler_commands: Option<(String, String)>,
    temp_dir: Option<PathBuf>,
}

impl TransportDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the spooler print/status commands (default `lp` / `lpstat`)
    pub fn with_spooler_commands(
        mut self,
        print: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        self.spooler_commands = Some((print.into(), status.into()));
        self
    }

    /// Directory for spool files (default: system temp dir)
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    /// Build the printer adapter for a configuration
    fn printer_for(&self, config: &PrinterConfiguration) -> Result<Box<dyn Printer>, PrintError> {
        match &config.transport {
            TransportType::CharacterDevice => {
                let path = config
                    .device_path
                    .as_deref()
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| {
                        PrintError::PrinterNotConfigured("No device path specified".to_string())
                    })?;
                Ok(Box::new(DevicePrinter::new(path)))
            }
            TransportType::Network => Ok(Box::new(NetworkPrinter::new(
                config.network_host.as_deref().unwrap_or_default(),
                config.network_port,
            ))),
            TransportType::OsSpooler => {
                let target = config.spooler_target_name().ok_or_else(|| {
                    PrintError::PrinterNotConfigured("No spooler target specified".to_string())
                })?;
                let mut printer = SpoolerPrinter::new(target)?;
                if let Some((print, status)) = &self.spooler_commands {
                    printer = printer.with_commands(print.clone(), status.clone());
                }
                if let Some(dir) = &self.temp_dir {
                    printer = printer.with_temp_dir(dir.clone());
                }
                Ok(Box::new(printer))
            }
            TransportType::Other(name) => Err(PrintError::UnsupportedTransport(name.clone())),
        }
    }
}

impl Transport for TransportDispatcher {
    #[instrument(skip(self, data, config), fields(transport = %config.transport, data_len = data.len()))]
    fn send(&self, data: &[u8], config: &PrinterConfiguration) -> PrintJobResult<()> {
        if !config.enabled {
            return Err(PrintJobError::PrintingDisabled);
        }

        let printer = self.printer_for(config)?;
        printer.print(data)?;
        Ok(())
    }

    #[instrument(skip(self, config), fields(transport = %config.transport))]
    fn is_available(&self, config: &PrinterConfiguration) -> bool {
        if !config.enabled {
            return false;
        }

        match self.printer_for(config) {
            Ok(printer) => printer.is_online(),
            Err(e) => {
                debug!(error = %e, "Printer not available");
                false
            }
        }
    }
}
