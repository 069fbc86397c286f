use rust_decimal::Decimal;

use super::error::ValidationError;
use super::types::*;

/// Maximum number of line items per invoice.
pub const MAX_LINE_ITEMS: usize = 10_000;
/// Maximum length of a document number.
pub const MAX_NUMBER_LEN: usize = 200;

/// Check the structural invariants of an invoice.
/// Returns all errors found (not just the first).
///
/// These are construction-time checks only. AGT fiscal rules (client NIF,
/// `/` in the number, 0/14% VAT) belong to the `agt` validator.
pub fn validate_invoice(invoice: &Invoice) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !invoice.company.can_issue() {
        errors.push(ValidationError::with_rule(
            "company.status",
            format!(
                "issuing company '{}' is {}; only active companies may issue invoices",
                invoice.company.id,
                invoice.company.status.as_str()
            ),
            "INV-07",
        ));
    }

    if invoice.number.trim().is_empty() {
        errors.push(ValidationError::with_rule(
            "number",
            "document number must not be empty",
            "INV-01",
        ));
    } else if invoice.number.len() > MAX_NUMBER_LEN {
        errors.push(ValidationError::with_rule(
            "number",
            format!("document number cannot exceed {MAX_NUMBER_LEN} characters"),
            "INV-01",
        ));
    }

    if invoice.due_date < invoice.issue_date {
        errors.push(ValidationError::with_rule(
            "due_date",
            format!(
                "due date {} is before issue date {}",
                invoice.due_date, invoice.issue_date
            ),
            "INV-02",
        ));
    }

    if invoice.items.is_empty() {
        errors.push(ValidationError::with_rule(
            "items",
            "invoice must have at least one line item",
            "INV-03",
        ));
    } else if invoice.items.len() > MAX_LINE_ITEMS {
        errors.push(ValidationError::with_rule(
            "items",
            format!("invoice cannot have more than {MAX_LINE_ITEMS} line items"),
            "INV-03",
        ));
    }

    for (i, item) in invoice.items.iter().enumerate() {
        validate_item(item, i, &mut errors);
    }

    check_rate(invoice.vat_rate, "vat_rate", &mut errors);
    check_rate(invoice.withholding_rate, "withholding_rate", &mut errors);

    errors
}

fn validate_item(item: &LineItem, index: usize, errors: &mut Vec<ValidationError>) {
    let prefix = format!("items[{index}]");

    if item.quantity.is_sign_negative() && !item.quantity.is_zero() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.quantity"),
            "quantity must not be negative",
            "INV-04",
        ));
    }

    if item.unit_price.is_sign_negative() && !item.unit_price.is_zero() {
        errors.push(ValidationError::with_rule(
            format!("{prefix}.unit_price"),
            "unit price must not be negative",
            "INV-05",
        ));
    }
}

fn check_rate(rate: Decimal, field: &str, errors: &mut Vec<ValidationError>) {
    if rate.is_sign_negative() && !rate.is_zero() {
        errors.push(ValidationError::with_rule(
            field,
            format!("rate {rate} must not be negative"),
            "INV-06",
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn invoice() -> Invoice {
        let company = CompanyBuilder::new("c1", "Empresa, Lda", "500000000")
            .status(CompanyStatus::Active)
            .build();
        InvoiceBuilder::new("FT 2025/001", date(1))
            .company(company)
            .add_item(LineItem {
                id: "1".into(),
                description: "Serviço".into(),
                quantity: dec!(1),
                unit_price: dec!(100),
            })
            .build()
            .unwrap()
    }

    #[test]
    fn valid_invoice_has_no_errors() {
        assert!(validate_invoice(&invoice()).is_empty());
    }

    #[test]
    fn empty_items_rejected() {
        let mut inv = invoice();
        inv.items.clear();
        let errors = validate_invoice(&inv);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule.as_deref(), Some("INV-03"));
    }

    #[test]
    fn negative_amounts_rejected() {
        let mut inv = invoice();
        inv.items[0].quantity = dec!(-1);
        inv.items[0].unit_price = dec!(-0.01);
        inv.withholding_rate = dec!(-6.5);
        let errors = validate_invoice(&inv);
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            ["items[0].quantity", "items[0].unit_price", "withholding_rate"]
        );
    }

    #[test]
    fn number_without_slash_is_structurally_fine() {
        let mut inv = invoice();
        inv.number = "FT-001".into();
        assert!(validate_invoice(&inv).is_empty());
    }

    #[test]
    fn only_active_companies_issue() {
        for status in [CompanyStatus::Pending, CompanyStatus::Inactive] {
            let mut inv = invoice();
            inv.company.status = status;
            let errors = validate_invoice(&inv);
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "company.status");
            assert_eq!(errors[0].rule.as_deref(), Some("INV-07"));
        }
    }

    #[test]
    fn due_date_before_issue_date() {
        let mut inv = invoice();
        inv.issue_date = date(10);
        inv.due_date = date(5);
        let errors = validate_invoice(&inv);
        assert!(errors.iter().any(|e| e.field == "due_date"));
    }
}
