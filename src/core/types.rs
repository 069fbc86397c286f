use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::totals::{Totals, calculate_totals};

/// Legal entity issuing invoices (the "broker" in the product UI).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    /// Stable identifier.
    pub id: String,
    /// Legal name (razão social).
    pub name: String,
    /// Taxpayer number (NIF).
    pub tax_id: String,
    /// Head-office address, free text.
    pub address: String,
    pub phone: String,
    pub phone_alt: Option<String>,
    pub email: String,
    pub website: Option<String>,
    /// Logo shown on printed invoices, a URL or a data URI.
    #[serde(default)]
    pub logo_url: Option<String>,
    /// Bank name printed on invoices (e.g. "BFA").
    pub bank_name: Option<String>,
    /// Bank coordinates (IBAN, "AO06 ...").
    pub bank_coordinates: String,
    pub fiscal_regime: FiscalRegime,
    pub status: CompanyStatus,
    pub province: Option<String>,
    pub municipality: Option<String>,
    /// When the company was approved.
    pub activated_at: Option<DateTime<Utc>>,
    /// Who approved the company.
    pub activated_by: Option<String>,
}

impl Company {
    /// Only active companies may issue invoices or be exported to SAF-T.
    pub fn can_issue(&self) -> bool {
        self.status == CompanyStatus::Active
    }

    /// Administrative approval of a pending company. Records read from
    /// storage may already be `Active` without passing through here.
    pub fn approve(&mut self, by: impl Into<String>, at: DateTime<Utc>) {
        self.status = CompanyStatus::Active;
        self.activated_at = Some(at);
        self.activated_by = Some(by.into());
    }

    /// Take the company out of service. Companies are never hard-deleted.
    pub fn deactivate(&mut self) {
        self.status = CompanyStatus::Inactive;
    }
}

/// Company fiscal regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FiscalRegime {
    /// Regime Geral, VAT liable at 14%.
    #[default]
    General,
    /// Regime de Exclusão, VAT exempt.
    Exclusion,
}

impl FiscalRegime {
    /// VAT rate normally charged under this regime.
    pub fn default_vat_rate(&self) -> Decimal {
        match self {
            Self::General => dec!(14),
            Self::Exclusion => Decimal::ZERO,
        }
    }
}

/// Approval status of a company.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyStatus {
    Active,
    Pending,
    Inactive,
}

impl CompanyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Inactive => "inactive",
        }
    }
}

/// Invoice counterparty, embedded by value in each invoice.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    /// Taxpayer number (NIF). Empty when unknown.
    pub tax_id: String,
    pub address: String,
    pub email: String,
}

impl Client {
    /// An AGT-compliant client NIF is exactly nine ASCII digits.
    pub fn has_valid_tax_id(&self) -> bool {
        is_valid_nif(&self.tax_id)
    }
}

/// Check whether `nif` is exactly nine ASCII digits.
pub fn is_valid_nif(nif: &str) -> bool {
    nif.len() == 9 && nif.bytes().all(|b| b.is_ascii_digit())
}

/// A single invoice line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: String,
    pub description: String,
    /// May be fractional.
    pub quantity: Decimal,
    /// Price per unit in kwanzas.
    pub unit_price: Decimal,
}

impl LineItem {
    /// quantity × unit price, unrounded.
    pub fn extension(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

/// Print layout selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    #[default]
    Classic,
    Simplified,
    Corporate,
}

/// A sales invoice (factura).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    /// Document number, `<prefix> <year>/<sequence>` (e.g. "FT 2025/001").
    pub number: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    /// Snapshot of the issuing company; matched by `company.id`.
    pub company: Company,
    pub client: Client,
    pub items: Vec<LineItem>,
    /// VAT percentage, expected to be 0 or 14.
    pub vat_rate: Decimal,
    /// Withholding (retenção na fonte) percentage.
    pub withholding_rate: Decimal,
    pub notes: String,
    pub template: TemplateId,
}

impl Invoice {
    /// Derived totals. Never stored.
    pub fn totals(&self) -> Totals {
        calculate_totals(&self.items, self.vat_rate, self.withholding_rate)
    }

    /// Whether this invoice was issued by `company_id`.
    pub fn is_issued_by(&self, company_id: &str) -> bool {
        self.company.id == company_id
    }
}
