//! End-to-end receipt printing against a scratch device file

use invoice_printing::{InvoicePrinter, PrintJobError, config};
use rust_decimal::Decimal;
use shared::models::{
    CompanyProfile, ExchangeRate, InvoiceSnapshot, PrinterConfiguration, PrinterSettings,
    TransportType,
};
use ticket_printer::{BOLD_ON, CUT, INIT, PrintError, SELECT_CP1252};

fn company() -> CompanyProfile {
    CompanyProfile {
        legal_name: "ACME".to_string(),
        tax_id: "J-1".to_string(),
        address: "Calle 1".to_string(),
        phone: "555".to_string(),
    }
}

fn invoice() -> InvoiceSnapshot {
    serde_json::from_str(
        r#"{
            "code": "INV-0001",
            "created_at": "2024-01-22T14:32:15",
            "warehouse_name": "Central",
            "line_items": [
                {"item_name": "Widget", "quantity": "2", "unit_price": "10", "subtotal": "20"}
            ],
            "total_amount": "20",
            "is_paid": true
        }"#,
    )
    .unwrap()
}

fn device_config(path: &std::path::Path) -> PrinterConfiguration {
    let persisted = PrinterSettings {
        enabled: Some(true),
        transport: Some(TransportType::from("serial")),
        device_path: Some(path.display().to_string()),
        ..Default::default()
    };
    config::resolve(&PrinterConfiguration::default(), Some(&persisted))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

#[test]
fn prints_paid_invoice_to_character_device() {
    let dir = tempfile::tempdir().unwrap();
    let device = dir.path().join("lp0");
    std::fs::write(&device, b"").unwrap();

    let printer = InvoicePrinter::new(device_config(&device));
    printer.print_invoice(&invoice(), Some(&company())).unwrap();

    let bytes = std::fs::read(&device).unwrap();
    assert!(bytes.starts_with(&INIT));
    assert!(contains(&bytes, &SELECT_CP1252));
    assert!(bytes.ends_with(&CUT));
    assert!(contains(&bytes, &BOLD_ON));
    assert!(contains(&bytes, b"TOTAL: $20.00"));
    assert!(contains(&bytes, b"Fecha: 22/01/2024 14:32"));
    assert!(contains(&bytes, b"Widget\n"));
    // CP1252 encoded farewell line
    assert!(contains(&bytes, b"\xA1Gracias por su compra!"));
    assert_eq!(bytes.windows(CUT.len()).filter(|w| *w == CUT).count(), 1);
}

#[test]
fn prints_exchange_rate_block() {
    let dir = tempfile::tempdir().unwrap();
    let device = dir.path().join("lp0");
    std::fs::write(&device, b"").unwrap();

    let mut invoice = invoice();
    invoice.exchange_rate = Some(ExchangeRate {
        currency: "VES".to_string(),
        rate: "36.5".parse().unwrap(),
        show_on_receipt: true,
    });

    InvoicePrinter::new(device_config(&device))
        .print_invoice(&invoice, Some(&company()))
        .unwrap();

    let bytes = std::fs::read(&device).unwrap();
    assert!(contains(&bytes, b"TOTAL VES: 730.00"));
    assert!(contains(&bytes, b"Tasa: 36.5000"));
}

#[test]
fn rejects_unpaid_invoice_without_touching_device() {
    let dir = tempfile::tempdir().unwrap();
    let device = dir.path().join("lp0");
    std::fs::write(&device, b"").unwrap();

    let mut invoice = invoice();
    invoice.is_paid = false;
    invoice.total_amount = Decimal::ZERO;

    let err = InvoicePrinter::new(device_config(&device))
        .print_invoice(&invoice, Some(&company()))
        .unwrap_err();
    assert!(matches!(err, PrintJobError::InvoiceNotPaid(_)));
    assert!(std::fs::read(&device).unwrap().is_empty());
}

#[test]
fn disabled_printing_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let device = dir.path().join("lp0");
    std::fs::write(&device, b"").unwrap();

    let mut config = device_config(&device);
    config.enabled = false;
    let printer = InvoicePrinter::new(config);

    let err = printer
        .print_invoice(&invoice(), Some(&company()))
        .unwrap_err();
    assert_eq!(err.code(), "PRINTING_DISABLED");
    assert!(std::fs::read(&device).unwrap().is_empty());
    assert!(!printer.status().available);
}

#[test]
fn unknown_transport_is_unsupported() {
    let config = PrinterConfiguration {
        enabled: true,
        transport: TransportType::from("bluetooth"),
        ..Default::default()
    };

    let err = InvoicePrinter::new(config)
        .print_invoice(&invoice(), Some(&company()))
        .unwrap_err();
    assert!(matches!(
        err,
        PrintJobError::Printer(PrintError::UnsupportedTransport(ref name)) if name == "bluetooth"
    ));
}

#[test]
fn missing_device_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let device = dir.path().join("missing");

    let printer = InvoicePrinter::new(device_config(&device));
    let err = printer
        .print_invoice(&invoice(), Some(&company()))
        .unwrap_err();
    assert_eq!(err.code(), "DEVICE_NOT_FOUND");
    assert!(err.to_string().contains("missing"));
    assert!(!printer.status().available);
}
