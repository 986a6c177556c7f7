//! Print-invoice use case
//!
//! Gates on configuration and invoice state, then runs
//! format → encode → dispatch for one invoice.

use shared::models::{CompanyProfile, InvoiceSnapshot, PrinterConfiguration};
use ticket_printer::encode_lines;
use tracing::{debug, error, info, instrument, warn};

use super::dispatcher::{PrinterStatus, Transport, TransportDispatcher};
use super::error::{PrintJobError, PrintJobResult};
use super::receipt::ReceiptFormatter;

/// Ephemeral bundle of the data rendered for one print attempt
///
/// Only constructible for a paid invoice with a company profile.
#[derive(Debug, Clone, Copy)]
pub struct PrintJob<'a> {
    pub invoice: &'a InvoiceSnapshot,
    pub company: &'a CompanyProfile,
}

impl<'a> PrintJob<'a> {
    pub fn new(
        invoice: &'a InvoiceSnapshot,
        company: Option<&'a CompanyProfile>,
    ) -> PrintJobResult<Self> {
        if !invoice.is_paid {
            return Err(PrintJobError::InvoiceNotPaid(invoice.code.clone()));
        }
        let company = company.ok_or(PrintJobError::CompanyProfileMissing)?;
        Ok(Self { invoice, company })
    }
}

/// Invoice receipt printer
///
/// Receives an already-resolved configuration; it never reads settings
/// on its own.
pub struct InvoicePrinter<T: Transport = TransportDispatcher> {
    config: PrinterConfiguration,
    formatter: ReceiptFormatter,
    transport: T,
}

impl InvoicePrinter<TransportDispatcher> {
    /// Create a printer backed by the real transports
    pub fn new(config: PrinterConfiguration) -> Self {
        Self::with_transport(config, TransportDispatcher::new())
    }
}

impl<T: Transport> InvoicePrinter<T> {
    pub fn with_transport(config: PrinterConfiguration, transport: T) -> Self {
        Self {
            formatter: ReceiptFormatter::from_config(&config),
            config,
            transport,
        }
    }

    pub fn config(&self) -> &PrinterConfiguration {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Print the receipt of a paid invoice
    #[instrument(skip_all, fields(invoice = %invoice.code, transport = %self.config.transport))]
    pub fn print_invoice(
        &self,
        invoice: &InvoiceSnapshot,
        company: Option<&CompanyProfile>,
    ) -> PrintJobResult<()> {
        if !self.config.enabled {
            warn!("Printing disabled, receipt not printed");
            return Err(PrintJobError::PrintingDisabled);
        }

        let job = PrintJob::new(invoice, company).inspect_err(|e| {
            warn!(error = %e, "Print job rejected");
        })?;

        let lines = self.formatter.format(job.invoice, job.company);
        let data = encode_lines(&lines);
        debug!(
            lines = lines.len(),
            width = self.formatter.width(),
            bytes = data.len(),
            "Receipt rendered"
        );

        self.transport.send(&data, &self.config).inspect_err(|e| {
            error!(error = %e, code = e.code(), "Failed to print receipt");
        })?;

        info!(bytes = data.len(), "Receipt printed");
        crate::audit_log!(
            "print_invoice",
            format!("invoice:{}", invoice.code),
            self.config.target().unwrap_or_default()
        );
        Ok(())
    }

    /// Print a self-test ticket
    #[instrument(skip_all, fields(transport = %self.config.transport))]
    pub fn print_test_page(&self) -> PrintJobResult<()> {
        if !self.config.enabled {
            warn!("Printing disabled, test page not printed");
            return Err(PrintJobError::PrintingDisabled);
        }

        let now = chrono::Local::now().naive_local();
        let lines = self.formatter.format_test_page(&self.config, now);
        let data = encode_lines(&lines);

        self.transport.send(&data, &self.config).inspect_err(|e| {
            error!(error = %e, code = e.code(), "Failed to print test page");
        })?;

        info!(bytes = data.len(), "Test page printed");
        Ok(())
    }

    /// Current printer status
    pub fn status(&self) -> PrinterStatus {
        self.transport.status(&self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::models::{LineItem, TransportType};
    use std::cell::RefCell;
    use ticket_printer::{CUT, INIT, PrintError};

    /// Records every call; optionally fails sends
    #[derive(Default)]
    struct SpyTransport {
        sent: RefCell<Vec<Vec<u8>>>,
        probes: RefCell<usize>,
        fail_with: Option<fn() -> PrintError>,
    }

    impl Transport for SpyTransport {
        fn send(&self, data: &[u8], _config: &PrinterConfiguration) -> PrintJobResult<()> {
            self.sent.borrow_mut().push(data.to_vec());
            match self.fail_with {
                Some(make) => Err(make().into()),
                None => Ok(()),
            }
        }

        fn is_available(&self, _config: &PrinterConfiguration) -> bool {
            *self.probes.borrow_mut() += 1;
            true
        }
    }

    fn enabled_config() -> PrinterConfiguration {
        PrinterConfiguration {
            enabled: true,
            transport: TransportType::CharacterDevice,
            device_path: Some("/dev/usb/lp0".to_string()),
            ..Default::default()
        }
    }

    fn company() -> CompanyProfile {
        CompanyProfile {
            legal_name: "ACME".to_string(),
            tax_id: "J-1".to_string(),
            address: "Calle 1".to_string(),
            phone: "555".to_string(),
        }
    }

    fn invoice(is_paid: bool) -> InvoiceSnapshot {
        InvoiceSnapshot {
            code: "INV-0001".to_string(),
            created_at: chrono::NaiveDate::from_ymd_opt(2024, 1, 22)
                .and_then(|d| d.and_hms_opt(14, 32, 15))
                .unwrap(),
            warehouse_name: "Central".to_string(),
            line_items: vec![LineItem {
                item_name: "Widget".to_string(),
                quantity: Decimal::from(2),
                unit_price: Decimal::from(10),
                subtotal: Decimal::from(20),
            }],
            total_amount: Decimal::from(20),
            is_paid,
            exchange_rate: None,
            total_amount_converted: None,
        }
    }

    #[test]
    fn test_print_invoice_sends_one_job() {
        let printer = InvoicePrinter::with_transport(enabled_config(), SpyTransport::default());
        printer.print_invoice(&invoice(true), Some(&company())).unwrap();

        let sent = printer.transport().sent.borrow();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].starts_with(&INIT));
        assert!(sent[0].ends_with(&CUT));
        assert!(String::from_utf8_lossy(&sent[0]).contains("No: INV-0001"));
    }

    #[test]
    fn test_disabled_never_reaches_transport() {
        let mut config = enabled_config();
        config.enabled = false;
        let printer = InvoicePrinter::with_transport(config, SpyTransport::default());

        let err = printer
            .print_invoice(&invoice(true), Some(&company()))
            .unwrap_err();
        assert!(matches!(err, PrintJobError::PrintingDisabled));
        assert!(printer.transport().sent.borrow().is_empty());
        assert_eq!(*printer.transport().probes.borrow(), 0);

        let err = printer.print_test_page().unwrap_err();
        assert!(matches!(err, PrintJobError::PrintingDisabled));
        assert!(printer.transport().sent.borrow().is_empty());
    }

    #[test]
    fn test_unpaid_invoice_fails_fast() {
        let printer = InvoicePrinter::with_transport(enabled_config(), SpyTransport::default());

        let err = printer
            .print_invoice(&invoice(false), Some(&company()))
            .unwrap_err();
        assert!(matches!(err, PrintJobError::InvoiceNotPaid(ref code) if code == "INV-0001"));
        assert!(printer.transport().sent.borrow().is_empty());
    }

    #[test]
    fn test_unpaid_checked_before_company() {
        let printer = InvoicePrinter::with_transport(enabled_config(), SpyTransport::default());
        let err = printer.print_invoice(&invoice(false), None).unwrap_err();
        assert!(matches!(err, PrintJobError::InvoiceNotPaid(_)));
    }

    #[test]
    fn test_missing_company_profile() {
        let printer = InvoicePrinter::with_transport(enabled_config(), SpyTransport::default());

        let err = printer.print_invoice(&invoice(true), None).unwrap_err();
        assert!(matches!(err, PrintJobError::CompanyProfileMissing));
        assert!(printer.transport().sent.borrow().is_empty());
    }

    #[test]
    fn test_transport_failure_propagates_unchanged() {
        let spy = SpyTransport {
            fail_with: Some(|| PrintError::DeviceNotFound("/dev/usb/lp0".to_string())),
            ..Default::default()
        };
        let printer = InvoicePrinter::with_transport(enabled_config(), spy);

        let err = printer
            .print_invoice(&invoice(true), Some(&company()))
            .unwrap_err();
        assert!(matches!(
            err,
            PrintJobError::Printer(PrintError::DeviceNotFound(ref p)) if p == "/dev/usb/lp0"
        ));
        assert_eq!(err.to_string(), "Device not found: /dev/usb/lp0");
    }

    #[test]
    fn test_print_job_invariants() {
        let paid = invoice(true);
        let c = company();
        let job = PrintJob::new(&paid, Some(&c)).unwrap();
        assert_eq!(job.invoice.code, "INV-0001");

        let unpaid = invoice(false);
        assert!(PrintJob::new(&unpaid, Some(&c)).is_err());
    }

    #[test]
    fn test_test_page_sent() {
        let printer = InvoicePrinter::with_transport(enabled_config(), SpyTransport::default());
        printer.print_test_page().unwrap();

        let sent = printer.transport().sent.borrow();
        assert_eq!(sent.len(), 1);
        assert!(String::from_utf8_lossy(&sent[0]).contains("PRUEBA DE IMPRESION"));
    }

    #[test]
    fn test_status_uses_transport_probe() {
        let printer = InvoicePrinter::with_transport(enabled_config(), SpyTransport::default());
        let status = printer.status();

        assert_eq!(
            status,
            PrinterStatus {
                enabled: true,
                transport: "character-device".to_string(),
                target: Some("/dev/usb/lp0".to_string()),
                available: true,
            }
        );
        assert_eq!(*printer.transport().probes.borrow(), 1);
    }
}
