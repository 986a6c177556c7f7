//! Print job errors

use thiserror::Error;
use ticket_printer::PrintError;

#[derive(Debug, Error)]
pub enum PrintJobError {
    #[error("Printing is disabled")]
    PrintingDisabled,

    #[error("Invoice {0} is not paid")]
    InvoiceNotPaid(String),

    #[error("Company profile is missing")]
    CompanyProfileMissing,

    /// Transport failure, reason text kept as-is
    #[error(transparent)]
    Printer(#[from] PrintError),
}

impl PrintJobError {
    /// Stable error code for the presentation layer
    pub fn code(&self) -> &'static str {
        match self {
            Self::PrintingDisabled => "PRINTING_DISABLED",
            Self::InvoiceNotPaid(_) => "INVOICE_NOT_PAID",
            Self::CompanyProfileMissing => "COMPANY_PROFILE_MISSING",
            Self::Printer(e) => match e {
                PrintError::UnsupportedTransport(_) => "UNSUPPORTED_TRANSPORT",
                PrintError::PrinterNotConfigured(_) => "PRINTER_NOT_CONFIGURED",
                PrintError::DeviceNotFound(_) => "DEVICE_NOT_FOUND",
                PrintError::DeviceOpen { .. } => "DEVICE_OPEN_ERROR",
                PrintError::DeviceWrite { .. } => "DEVICE_WRITE_ERROR",
                PrintError::SpoolerCommand { .. } => "SPOOLER_COMMAND_ERROR",
                PrintError::Io(_) => "PRINTER_IO_ERROR",
            },
        }
    }
}

pub type PrintJobResult<T> = Result<T, PrintJobError>;
