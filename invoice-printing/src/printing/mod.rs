//! Invoice receipt printing
//!
//! - `receipt`: invoice → formatted lines
//! - `dispatcher`: encoded bytes → configured transport
//! - `service`: the print-invoice use case tying both together

mod dispatcher;
mod error;
mod receipt;
mod service;

pub use dispatcher::{PrinterStatus, Transport, TransportDispatcher};
pub use error::{PrintJobError, PrintJobResult};
pub use receipt::ReceiptFormatter;
pub use service::{InvoicePrinter, PrintJob};
