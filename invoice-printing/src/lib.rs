//! Invoice receipt printing
//!
//! Turns a paid invoice and the company profile into an ESC/POS ticket and
//! delivers it to the configured receipt printer.
//!
//! ```no_run
//! use invoice_printing::{InvoicePrinter, config};
//!
//! let settings = config::load_settings("printer.json").ok();
//! let printer = InvoicePrinter::new(config::resolve(&config::from_env(), settings.as_ref()));
//! println!("{:?}", printer.status());
//! ```

pub mod config;
pub mod logger;
pub mod printing;

pub use config::ConfigError;
pub use printing::{
    InvoicePrinter, PrintJob, PrintJobError, PrintJobResult, PrinterStatus, ReceiptFormatter,
    Transport, TransportDispatcher,
};
