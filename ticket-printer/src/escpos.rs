//! ESC/POS command builder and receipt line encoder
//!
//! Provides a fluent API for building ESC/POS print data, plus
//! [`encode_lines`] which turns styled receipt lines into a print job.

use crate::encoding::convert_to_cp1252;
use tracing::instrument;

/// ESC @ - Initialize printer
pub const INIT: [u8; 2] = [0x1B, 0x40];
/// ESC t 16 - Select character code table WPC1252
pub const SELECT_CP1252: [u8; 3] = [0x1B, 0x74, 0x10];
/// ESC E 1 - Emphasized mode on
pub const BOLD_ON: [u8; 3] = [0x1B, 0x45, 0x01];
/// ESC E 0 - Emphasized mode off
pub const BOLD_OFF: [u8; 3] = [0x1B, 0x45, 0x00];
/// GS V 0 - Full cut
pub const CUT: [u8; 3] = [0x1D, 0x56, 0x00];
/// LF - Print and line feed
pub const LF: u8 = 0x0A;

/// Text style of a receipt line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Normal,
    Bold,
}

/// A laid-out receipt line, already padded/truncated to the paper width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLine {
    pub text: String,
    pub style: LineStyle,
}

impl FormattedLine {
    pub fn normal(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Normal,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: LineStyle::Bold,
        }
    }

    pub fn is_bold(&self) -> bool {
        self.style == LineStyle::Bold
    }
}

/// ESC/POS command builder
///
/// Builds ESC/POS byte sequences for thermal printers.
/// All text is converted to Windows-1252 as it is written.
pub struct EscPosBuilder {
    buf: Vec<u8>,
}

impl EscPosBuilder {
    /// Create a new builder, starting with printer initialization and
    /// code page selection
    pub fn new() -> Self {
        let mut buf = Vec::with_capacity(1024);
        buf.extend_from_slice(&INIT);
        buf.extend_from_slice(&SELECT_CP1252);
        Self { buf }
    }

    // === Text Output ===

    /// Write raw text (Windows-1252 encoded)
    pub fn text(&mut self, s: &str) -> &mut Self {
        self.buf.extend_from_slice(&convert_to_cp1252(s));
        self
    }

    /// Write text followed by newline
    pub fn line(&mut self, s: &str) -> &mut Self {
        self.text(s);
        self.buf.push(LF);
        self
    }

    // === Text Style ===

    /// Enable bold text
    pub fn bold(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&BOLD_ON);
        self
    }

    /// Disable bold text
    pub fn bold_off(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&BOLD_OFF);
        self
    }

    // === Paper Control ===

    /// Cut paper (full cut)
    pub fn cut(&mut self) -> &mut Self {
        self.buf.extend_from_slice(&CUT);
        self
    }

    // === Build ===

    /// Build the final byte buffer
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

impl Default for EscPosBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode receipt lines into a single ESC/POS print job
///
/// Every line sets its style explicitly (bold on or off) so no style
/// bleeds into the next line. The job ends with exactly one cut.
#[instrument(skip(lines), fields(lines = lines.len()))]
pub fn encode_lines(lines: &[FormattedLine]) -> Vec<u8> {
    let mut b = EscPosBuilder::new();
    for line in lines {
        match line.style {
            LineStyle::Bold => b.bold(),
            LineStyle::Normal => b.bold_off(),
        };
        b.line(&line.text);
    }
    b.cut();
    b.build()
}
