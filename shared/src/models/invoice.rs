//! Invoice Snapshot Model

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Invoice line as it appears on the receipt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub item_name: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    /// Line subtotal as stored on the invoice (not recomputed)
    pub subtotal: Decimal,
}

/// Exchange rate attached to an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    /// Secondary currency code, e.g. "Bs"
    pub currency: String,
    pub rate: Decimal,
    #[serde(default = "default_true")]
    pub show_on_receipt: bool,
}

fn default_true() -> bool {
    true
}

/// Invoice aggregate snapshot, taken at print time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvoiceSnapshot {
    pub code: String,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub warehouse_name: String,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    pub total_amount: Decimal,
    #[serde(default)]
    pub is_paid: bool,
    pub exchange_rate: Option<ExchangeRate>,
    pub total_amount_converted: Option<Decimal>,
}

impl InvoiceSnapshot {
    /// Exchange rate and converted total to print, if the invoice carries a
    /// rate flagged for display.
    ///
    /// Falls back to `total_amount * rate` when no converted total was stored.
    pub fn conversion(&self) -> Option<(&ExchangeRate, Decimal)> {
        let rate = self.exchange_rate.as_ref().filter(|r| r.show_on_receipt)?;
        let converted = self
            .total_amount_converted
            .unwrap_or_else(|| self.total_amount * rate.rate);
        Some((rate, converted))
    }
}
