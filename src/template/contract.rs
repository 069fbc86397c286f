use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::TemplateConfig;
use crate::core::{
    FacturaError, FiscalRegime, Invoice, TemplateId, amount_to_words, validate_invoice,
};

/// Printed label for the general VAT regime.
pub const GENERAL_REGIME_LABEL: &str = "REGIME GERAL";
/// Printed label for the VAT exclusion regime.
pub const EXCLUSION_REGIME_LABEL: &str = "REGIME DE EXCLUSÃO";

/// Where the printed fiscal-regime label comes from.
///
/// The invoice's VAT rate and the company's stored regime can disagree
/// (an exclusion-regime company issuing a 14% invoice). The policy decides
/// which one the layouts show; see [`regime_sources_disagree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RegimeLabelPolicy {
    /// VAT rate > 0 ⇒ general regime, otherwise exclusion.
    #[default]
    FromVatRate,
    /// Use the company's stored fiscal regime.
    FromCompanyRegime,
}

/// Flat, layout-independent data handed to print templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateContract {
    pub company: CompanySection,
    pub client: ClientSection,
    pub document: DocumentSection,
    pub line_items: Vec<LineItemSection>,
    pub totals: TotalsSection,
    pub bank: BankSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanySection {
    pub id: String,
    pub name: String,
    pub tax_id: String,
    pub address: String,
    pub contacts: String,
    pub email: String,
    /// Empty when the company has no logo.
    pub logo_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientSection {
    pub name: String,
    pub tax_id: String,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSection {
    pub number: String,
    pub document_type: String,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub fiscal_regime: String,
    pub notes: String,
    pub template: TemplateId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemSection {
    pub description: String,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount: Decimal,
    /// Invoice-wide VAT rate; per-line rates are not supported.
    pub vat_rate: Decimal,
    /// quantity × unit price.
    pub extension: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsSection {
    pub subtotal: Decimal,
    pub discounts: Decimal,
    pub tax: Decimal,
    pub withholding: Decimal,
    pub total: Decimal,
    pub total_in_words: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankSection {
    pub name: String,
    pub iban: String,
}

/// Map an invoice (with its embedded company and client) to the template
/// contract. The invoice must satisfy the structural checks of
/// [`validate_invoice`].
pub fn map_invoice(
    invoice: &Invoice,
    config: &TemplateConfig,
) -> Result<TemplateContract, FacturaError> {
    let errors = validate_invoice(invoice);
    if !errors.is_empty() {
        let msg = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        return Err(FacturaError::Validation(msg));
    }

    let company = &invoice.company;
    let totals = invoice.totals();

    Ok(TemplateContract {
        company: CompanySection {
            id: company.id.clone(),
            name: company.name.clone(),
            tax_id: company.tax_id.clone(),
            address: company.address.clone(),
            contacts: company.phone.clone(),
            email: company.email.clone(),
            logo_url: company.logo_url.clone().unwrap_or_default(),
        },
        client: ClientSection {
            name: invoice.client.name.clone(),
            tax_id: invoice.client.tax_id.clone(),
            address: invoice.client.address.clone(),
        },
        document: DocumentSection {
            number: invoice.number.clone(),
            document_type: config.document_type.clone(),
            issue_date: invoice.issue_date,
            due_date: invoice.due_date,
            fiscal_regime: regime_label(invoice, config.regime_label_policy).to_string(),
            notes: invoice.notes.clone(),
            template: invoice.template,
        },
        line_items: invoice
            .items
            .iter()
            .map(|item| LineItemSection {
                description: item.description.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price,
                discount: Decimal::ZERO,
                vat_rate: invoice.vat_rate,
                extension: item.extension(),
            })
            .collect(),
        totals: TotalsSection {
            subtotal: totals.subtotal,
            discounts: Decimal::ZERO,
            tax: totals.tax,
            withholding: totals.withholding,
            total: totals.total,
            total_in_words: amount_to_words(totals.total),
        },
        bank: BankSection {
            name: company
                .bank_name
                .clone()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| config.default_bank_name.clone()),
            iban: company.bank_coordinates.clone(),
        },
    })
}

/// The printed regime label for `invoice` under `policy`.
pub fn regime_label(invoice: &Invoice, policy: RegimeLabelPolicy) -> &'static str {
    let general = match policy {
        RegimeLabelPolicy::FromVatRate => invoice.vat_rate > Decimal::ZERO,
        RegimeLabelPolicy::FromCompanyRegime => {
            invoice.company.fiscal_regime == FiscalRegime::General
        }
    };
    if general {
        GENERAL_REGIME_LABEL
    } else {
        EXCLUSION_REGIME_LABEL
    }
}

/// True when the VAT rate and the company's stored regime imply different labels.
pub fn regime_sources_disagree(invoice: &Invoice) -> bool {
    regime_label(invoice, RegimeLabelPolicy::FromVatRate)
        != regime_label(invoice, RegimeLabelPolicy::FromCompanyRegime)
}
