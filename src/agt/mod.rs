//! AGT compliance validation.
//!
//! Checks a company and its invoices for one reporting period against the
//! rules the tax authority (Administração Geral Tributária) imposes before a
//! SAF-T AO file may be generated. Findings carry stable codes; any finding
//! of severity [`Severity::Error`] blocks generation.
//!
//! | Code | Severity | Condition |
//! |------|----------|-----------|
//! | AGT-001 | error | no company, or company NIF shorter than 9 characters |
//! | AGT-LOCKED | error | company not active |
//! | AGT-006 | error | company legal name empty |
//! | AGT-003 | error | no invoice in the period, or invoice number without `/` |
//! | AGT-002 | error | invoice client without NIF |
//! | AGT-005 | error | invoice VAT rate other than 0% or 14% |
//! | AGT-101 | warning | company address empty |
//! | AGT-102 | warning | client NIF not nine digits (strict only) |

mod finding;
mod rules;
mod validator;

pub use finding::{Finding, Severity, ValidationReport};
pub use rules::{
    ALLOWED_VAT_RATES, ClientTaxId, ClientTaxIdFormat, CompanyActive, CompanyAddress, CompanyName,
    CompanyTaxId, ContextRule, DocumentNumberFormat, InvoiceRule, MIN_NIF_LEN, PeriodHasInvoices,
    VatRate,
};
pub use validator::{AgtValidator, AgtValidatorBuilder, ValidationContext, validate_period};
