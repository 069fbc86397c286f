//! Template contract mapping for invoice print layouts.
//!
//! Normalises an [`Invoice`](crate::core::Invoice) into a flat record grouped
//! into `company`, `client`, `document`, `lineItems`, `totals` and `bank`
//! sections. Layouts (classic, simplified, corporate) consume only this
//! contract.
//!
//! # Example
//!
//! ```ignore
//! use factura_ao::template::*;
//!
//! let contract = map_invoice(&invoice, &TemplateConfig::default())?;
//! println!("{}", contract.totals.total_in_words);
//! println!("{}", format_amount(contract.totals.total));
//! ```

mod contract;
mod format;

use serde::{Deserialize, Serialize};

pub use contract::{
    BankSection, ClientSection, CompanySection, DocumentSection, EXCLUSION_REGIME_LABEL,
    GENERAL_REGIME_LABEL, LineItemSection, RegimeLabelPolicy, TemplateContract, TotalsSection,
    map_invoice, regime_label, regime_sources_disagree,
};
pub use format::format_amount;

/// Configuration for template mapping.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Source of the printed fiscal-regime label.
    pub regime_label_policy: RegimeLabelPolicy,
    /// Bank name used when the company has none.
    pub default_bank_name: String,
    /// Printed document type.
    pub document_type: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            regime_label_policy: RegimeLabelPolicy::FromVatRate,
            default_bank_name: "BFA".into(),
            document_type: "FACTURA".into(),
        }
    }
}
