//! Invoice receipt renderer
//!
//! Lays out an invoice snapshot and the company profile into styled,
//! fixed-width lines for a thermal printer.

use chrono::NaiveDateTime;
use rust_decimal::{Decimal, RoundingStrategy};
use shared::models::{
    CompanyProfile, InvoiceSnapshot, LineItem, MAX_PAPER_WIDTH, PrinterConfiguration,
};
use ticket_printer::{
    FormattedLine, align_right, center, sanitize_text, text_width, truncate_width, wrap_words,
};

/// Closing message printed under the totals
const THANK_YOU: &str = "¡Gracias por su compra!";

/// Receipt formatter
///
/// Pure function of (invoice, company, width): formatting the same input
/// twice yields identical lines.
#[derive(Debug, Clone)]
pub struct ReceiptFormatter {
    width: usize,
    currency_symbol: String,
}

impl ReceiptFormatter {
    /// Create a new formatter with specified paper width in characters
    ///
    /// Common widths:
    /// - 58mm paper: 32 characters
    /// - 80mm paper: 48 characters
    ///
    /// The width is clamped to `1..=MAX_PAPER_WIDTH`.
    pub fn new(width: usize) -> Self {
        Self {
            width: width.clamp(1, MAX_PAPER_WIDTH),
            currency_symbol: "$".to_string(),
        }
    }

    pub fn with_currency_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = sanitize_text(&symbol.into());
        self
    }

    /// Formatter matching a resolved printer configuration
    pub fn from_config(config: &PrinterConfiguration) -> Self {
        Self::new(config.paper_width).with_currency_symbol(config.currency_symbol.clone())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Render an invoice receipt
    pub fn format(&self, invoice: &InvoiceSnapshot, company: &CompanyProfile) -> Vec<FormattedLine> {
        let mut lines = Vec::with_capacity(24 + invoice.line_items.len() * 2);

        self.render_company(&mut lines, company);
        self.render_invoice_header(&mut lines, invoice);
        for item in &invoice.line_items {
            self.render_item(&mut lines, item);
        }
        self.render_totals(&mut lines, invoice);
        self.render_footer(&mut lines);

        lines
    }

    /// Render a printer self-test ticket
    pub fn format_test_page(
        &self,
        config: &PrinterConfiguration,
        printed_at: NaiveDateTime,
    ) -> Vec<FormattedLine> {
        let target = config.target().unwrap_or_else(|| "-".to_string());
        let sample = self.format_amount(Decimal::ONE);
        vec![
            FormattedLine::bold(center("PRUEBA DE IMPRESION", self.width)),
            self.sep('='),
            self.left(&format!("Transporte: {}", sanitize_text(config.transport.as_str()))),
            self.left(&format!("Destino: {}", sanitize_text(&target))),
            self.left(&format!("Ancho: {} columnas", self.width)),
            self.left(&format!("Fecha: {}", format_timestamp(printed_at))),
            self.sep('-'),
            self.item_amount_line(&format!("1.00 x {}", sample), &sample),
            self.sep('='),
            FormattedLine::normal(center("Impresora OK", self.width)),
            FormattedLine::normal(""),
            FormattedLine::normal(""),
        ]
    }

    /// Format an amount as currency, e.g. `$20.00`
    pub fn format_amount(&self, amount: Decimal) -> String {
        format!("{}{}", self.currency_symbol, fixed(amount, 2))
    }

    /// Company block: name, tax id, address, phone
    fn render_company(&self, lines: &mut Vec<FormattedLine>, company: &CompanyProfile) {
        lines.push(FormattedLine::bold(center(
            &sanitize_text(&company.legal_name),
            self.width,
        )));
        lines.push(FormattedLine::normal(center(
            &format!("RIF: {}", sanitize_text(&company.tax_id)),
            self.width,
        )));
        for address_line in wrap_words(&sanitize_text(&company.address), self.width) {
            lines.push(FormattedLine::normal(center(&address_line, self.width)));
        }
        lines.push(FormattedLine::normal(center(
            &format!("Tel: {}", sanitize_text(&company.phone)),
            self.width,
        )));
        lines.push(self.sep('='));
    }

    /// Invoice block: title, number, date, warehouse
    fn render_invoice_header(&self, lines: &mut Vec<FormattedLine>, invoice: &InvoiceSnapshot) {
        lines.push(FormattedLine::bold(center("FACTURA", self.width)));
        lines.push(self.left(&format!("No: {}", sanitize_text(&invoice.code))));
        lines.push(self.left(&format!(
            "Fecha: {}",
            format_timestamp(invoice.created_at)
        )));
        lines.push(self.left(&format!(
            "Almacen: {}",
            sanitize_text(&invoice.warehouse_name)
        )));
        lines.push(self.sep('-'));
    }

    /// Item name (wrapped) followed by `qty x price ... subtotal`
    fn render_item(&self, lines: &mut Vec<FormattedLine>, item: &LineItem) {
        for name_line in wrap_words(&sanitize_text(&item.item_name), self.width) {
            lines.push(FormattedLine::normal(name_line));
        }
        let left = format!(
            "{} x {}",
            fixed(item.quantity, 2),
            self.format_amount(item.unit_price)
        );
        lines.push(self.item_amount_line(&left, &self.format_amount(item.subtotal)));
    }

    /// Totals block, with the converted total when the invoice shows a rate
    fn render_totals(&self, lines: &mut Vec<FormattedLine>, invoice: &InvoiceSnapshot) {
        lines.push(self.sep('-'));
        lines.push(FormattedLine::bold(align_right(
            &format!("TOTAL: {}", self.format_amount(invoice.total_amount)),
            self.width,
        )));

        if let Some((rate, converted)) = invoice.conversion() {
            lines.push(FormattedLine::bold(align_right(
                &format!("TOTAL {}: {}", sanitize_text(&rate.currency), fixed(converted, 2)),
                self.width,
            )));
            lines.push(self.left(&format!("Tasa: {}", fixed(rate.rate, 4))));
        }
    }

    fn render_footer(&self, lines: &mut Vec<FormattedLine>) {
        lines.push(self.sep('='));
        lines.push(FormattedLine::normal(center(THANK_YOU, self.width)));
        // Tear-off feed
        lines.push(FormattedLine::normal(""));
        lines.push(FormattedLine::normal(""));
    }

    /// Left text and right-aligned amount on one line
    ///
    /// At least one space separates them, even if the line then exceeds
    /// the paper width.
    fn item_amount_line(&self, left: &str, right: &str) -> FormattedLine {
        let used = text_width(left) + text_width(right);
        let spaces = self.width.saturating_sub(used).max(1);
        FormattedLine::normal(format!("{}{}{}", left, " ".repeat(spaces), right))
    }

    fn left(&self, s: &str) -> FormattedLine {
        FormattedLine::normal(truncate_width(s, self.width))
    }

    fn sep(&self, c: char) -> FormattedLine {
        FormattedLine::normal(c.to_string().repeat(self.width))
    }
}

impl Default for ReceiptFormatter {
    fn default() -> Self {
        Self::new(32)
    }
}

/// Round half away from zero and render with exactly `dp` decimals
fn fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    rounded.to_string()
}

/// Format an invoice timestamp as DD/MM/YYYY HH:mm
fn format_timestamp(ts: NaiveDateTime) -> String {
    ts.format("%d/%m/%Y %H:%M").to_string()
}
