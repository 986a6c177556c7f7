//! # ticket-printer
//!
//! ESC/POS thermal printer library - low-level printing capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to print:
//! - Column layout helpers and Windows-1252 conversion
//! - ESC/POS encoding of styled receipt lines
//! - Character device printing (serial / USB nodes)
//! - OS spooler printing (CUPS `lp`, raw mode)
//!
//! Business logic (WHAT to print) stays in application code:
//! - Invoice receipt layout → invoice-printing
//!
//! ## Example
//!
//! ```ignore
//! use ticket_printer::{DevicePrinter, FormattedLine, Printer, encode_lines};
//!
//! let lines = vec![
//!     FormattedLine::bold("FACTURA"),
//!     FormattedLine::normal("No: INV-0001"),
//! ];
//!
//! let printer = DevicePrinter::new("/dev/usb/lp0");
//! printer.print(&encode_lines(&lines))?;
//! ```

mod encoding;
mod error;
mod escpos;
mod printer;

// Re-exports
pub use encoding::{
    align_right, center, convert_to_cp1252, pad_width, sanitize_text, text_width, truncate_width,
    wrap_words,
};
pub use error::{PrintError, PrintResult};
pub use escpos::{
    BOLD_OFF, BOLD_ON, CUT, EscPosBuilder, FormattedLine, INIT, LF, LineStyle, SELECT_CP1252,
    encode_lines,
};
pub use printer::{
    DEFAULT_PRINT_COMMAND, DEFAULT_STATUS_COMMAND, DevicePrinter, NetworkPrinter, Printer,
    SpoolerPrinter,
};
