//! The AGT rule battery.
//!
//! Codes and messages are those shown to operators by the invoicing product
//! and must stay stable.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::finding::{Finding, Severity};
use super::validator::ValidationContext;
use crate::core::{CompanyStatus, Invoice, is_valid_nif};

/// Minimum length of a company NIF.
pub const MIN_NIF_LEN: usize = 9;

/// VAT rates accepted by AGT.
pub const ALLOWED_VAT_RATES: [Decimal; 2] = [dec!(0), dec!(14)];

/// A rule evaluated once per validation run against the whole context.
pub trait ContextRule: Send + Sync {
    fn code(&self) -> &'static str;
    fn severity(&self) -> Severity;
    fn evaluate(&self, ctx: &ValidationContext<'_>) -> Option<Finding>;
}

/// A rule evaluated once for each matching invoice.
pub trait InvoiceRule: Send + Sync {
    fn code(&self) -> &'static str;
    fn severity(&self) -> Severity;
    fn evaluate(&self, ctx: &ValidationContext<'_>, invoice: &Invoice) -> Option<Finding>;
}

fn finding(code: &str, severity: Severity, message: String) -> Finding {
    Finding {
        code: code.to_string(),
        message,
        severity,
    }
}

/// AGT-001: a company must be selected and carry a NIF of at least 9 characters.
#[derive(Debug, Default)]
pub struct CompanyTaxId;

impl ContextRule for CompanyTaxId {
    fn code(&self) -> &'static str {
        "AGT-001"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn evaluate(&self, ctx: &ValidationContext<'_>) -> Option<Finding> {
        let message = match ctx.company() {
            None => "Empresa não seleccionada ou inexistente.",
            Some(c) if c.tax_id.trim().chars().count() < MIN_NIF_LEN => {
                "Empresa sem NIF válido. Submissão SAF-T interdita."
            }
            Some(_) => return None,
        };
        Some(finding(self.code(), self.severity(), message.into()))
    }
}

/// AGT-LOCKED: only active companies may generate SAF-T.
#[derive(Debug, Default)]
pub struct CompanyActive;

impl ContextRule for CompanyActive {
    fn code(&self) -> &'static str {
        "AGT-LOCKED"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn evaluate(&self, ctx: &ValidationContext<'_>) -> Option<Finding> {
        let message = match ctx.company()?.status {
            CompanyStatus::Active => return None,
            CompanyStatus::Pending => {
                "Esta empresa aguarda aprovação administrativa. Extração SAF-T impossibilitada."
            }
            CompanyStatus::Inactive => "Esta empresa está inactiva. Extração SAF-T impossibilitada.",
        };
        Some(finding(self.code(), self.severity(), message.into()))
    }
}

/// AGT-006: the company legal name must be set.
#[derive(Debug, Default)]
pub struct CompanyName;

impl ContextRule for CompanyName {
    fn code(&self) -> &'static str {
        "AGT-006"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn evaluate(&self, ctx: &ValidationContext<'_>) -> Option<Finding> {
        if !ctx.company()?.name.trim().is_empty() {
            return None;
        }
        Some(finding(
            self.code(),
            self.severity(),
            "Razão Social da empresa não definida.".into(),
        ))
    }
}

/// AGT-003: the period must contain at least one invoice of the company.
#[derive(Debug, Default)]
pub struct PeriodHasInvoices;

impl ContextRule for PeriodHasInvoices {
    fn code(&self) -> &'static str {
        "AGT-003"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn evaluate(&self, ctx: &ValidationContext<'_>) -> Option<Finding> {
        if !ctx.invoices().is_empty() {
            return None;
        }
        Some(finding(
            self.code(),
            self.severity(),
            "Nenhuma factura encontrada para o período seleccionado.".into(),
        ))
    }
}

/// AGT-101: the company head-office address should be filled in.
#[derive(Debug, Default)]
pub struct CompanyAddress;

impl ContextRule for CompanyAddress {
    fn code(&self) -> &'static str {
        "AGT-101"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn evaluate(&self, ctx: &ValidationContext<'_>) -> Option<Finding> {
        if !ctx.company()?.address.trim().is_empty() {
            return None;
        }
        Some(finding(
            self.code(),
            self.severity(),
            "Empresa sem endereço completo (Sede).".into(),
        ))
    }
}

/// AGT-002: every invoice must identify the client's NIF.
#[derive(Debug, Default)]
pub struct ClientTaxId;

impl InvoiceRule for ClientTaxId {
    fn code(&self) -> &'static str {
        "AGT-002"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn evaluate(&self, _ctx: &ValidationContext<'_>, invoice: &Invoice) -> Option<Finding> {
        if !invoice.client.tax_id.trim().is_empty() {
            return None;
        }
        Some(finding(
            self.code(),
            self.severity(),
            format!(
                "Cliente [{}] sem NIF na factura {}.",
                invoice.client.name, invoice.number
            ),
        ))
    }
}

/// AGT-003: document numbers need a `/` between series and sequence.
#[derive(Debug, Default)]
pub struct DocumentNumberFormat;

impl InvoiceRule for DocumentNumberFormat {
    fn code(&self) -> &'static str {
        "AGT-003"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn evaluate(&self, _ctx: &ValidationContext<'_>, invoice: &Invoice) -> Option<Finding> {
        if !invoice.number.is_empty() && invoice.number.contains('/') {
            return None;
        }
        Some(finding(
            self.code(),
            self.severity(),
            format!("Numeração de factura inválida detectada: {}.", invoice.number),
        ))
    }
}

/// AGT-005: VAT rate must be 0% or 14%.
#[derive(Debug, Default)]
pub struct VatRate;

impl InvoiceRule for VatRate {
    fn code(&self) -> &'static str {
        "AGT-005"
    }

    fn severity(&self) -> Severity {
        Severity::Error
    }

    fn evaluate(&self, _ctx: &ValidationContext<'_>, invoice: &Invoice) -> Option<Finding> {
        if ALLOWED_VAT_RATES.contains(&invoice.vat_rate) {
            return None;
        }
        Some(finding(
            self.code(),
            self.severity(),
            format!(
                "Taxa de IVA ({}%) fora dos padrões AGT na factura {}.",
                invoice.vat_rate.normalize(),
                invoice.number
            ),
        ))
    }
}

/// AGT-102: client NIF, when present, should be exactly nine digits.
///
/// Not part of the default battery; enabled by [`AgtValidator::strict`](super::AgtValidator::strict).
#[derive(Debug, Default)]
pub struct ClientTaxIdFormat;

impl InvoiceRule for ClientTaxIdFormat {
    fn code(&self) -> &'static str {
        "AGT-102"
    }

    fn severity(&self) -> Severity {
        Severity::Warning
    }

    fn evaluate(&self, _ctx: &ValidationContext<'_>, invoice: &Invoice) -> Option<Finding> {
        let nif = invoice.client.tax_id.trim();
        if nif.is_empty() || is_valid_nif(nif) {
            return None;
        }
        Some(finding(
            self.code(),
            self.severity(),
            format!(
                "NIF do cliente [{}] na factura {} não tem 9 dígitos.",
                invoice.client.name, invoice.number
            ),
        ))
    }
}
