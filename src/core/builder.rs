use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use super::error::FacturaError;
use super::types::*;
use super::validation;

/// Default payment term in days when no due date is given.
pub const DEFAULT_PAYMENT_TERM_DAYS: u64 = 15;

/// Builder for constructing valid invoices.
///
/// ```
/// use factura_ao::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let company = CompanyBuilder::new("emp-001", "Empresa Exemplo, Lda", "5000000000")
///     .address("Rua Direita de Luanda")
///     .status(CompanyStatus::Active)
///     .build();
///
/// let invoice = InvoiceBuilder::new("FT 2025/001", NaiveDate::from_ymd_opt(2025, 1, 15).unwrap())
///     .company(company)
///     .client(ClientBuilder::new("Cliente Teste", "541234567").build())
///     .add_item(LineItemBuilder::new("1", "Prestação de Serviços", dec!(1), dec!(100000)).build())
///     .build()
///     .unwrap();
///
/// assert_eq!(invoice.totals().total, dec!(114000));
/// ```
pub struct InvoiceBuilder {
    id: Option<String>,
    number: String,
    issue_date: NaiveDate,
    due_date: Option<NaiveDate>,
    company: Option<Company>,
    client: Client,
    items: Vec<LineItem>,
    vat_rate: Option<Decimal>,
    withholding_rate: Decimal,
    notes: String,
    template: TemplateId,
}

impl InvoiceBuilder {
    pub fn new(number: impl Into<String>, issue_date: NaiveDate) -> Self {
        Self {
            id: None,
            number: number.into(),
            issue_date,
            due_date: None,
            company: None,
            client: Client::default(),
            items: Vec::new(),
            vat_rate: None,
            withholding_rate: Decimal::ZERO,
            notes: String::new(),
            template: TemplateId::default(),
        }
    }

    /// Record identifier. Defaults to the document number.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn company(mut self, company: Company) -> Self {
        self.company = Some(company);
        self
    }

    pub fn client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn add_item(mut self, item: LineItem) -> Self {
        self.items.push(item);
        self
    }

    /// VAT percentage. Defaults to the company's regime rate (14 or 0).
    pub fn vat_rate(mut self, rate: Decimal) -> Self {
        self.vat_rate = Some(rate);
        self
    }

    pub fn withholding_rate(mut self, rate: Decimal) -> Self {
        self.withholding_rate = rate;
        self
    }

    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn template(mut self, template: TemplateId) -> Self {
        self.template = template;
        self
    }

    /// Build the invoice and run the structural checks, including that the
    /// issuing company is active.
    /// Returns all validation errors (not just the first).
    pub fn build(self) -> Result<Invoice, FacturaError> {
        let invoice = self.build_unchecked()?;

        let errors = validation::validate_invoice(&invoice);
        if !errors.is_empty() {
            let msg = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join("; ");
            return Err(FacturaError::Validation(msg));
        }

        Ok(invoice)
    }

    /// Build without the structural checks, e.g. for records imported from storage.
    /// The company status is not checked either.
    pub fn build_unchecked(self) -> Result<Invoice, FacturaError> {
        let company = self
            .company
            .ok_or_else(|| FacturaError::Builder("issuing company is required".into()))?;

        let due_date = match self.due_date {
            Some(d) => d,
            None => self
                .issue_date
                .checked_add_days(Days::new(DEFAULT_PAYMENT_TERM_DAYS))
                .ok_or_else(|| FacturaError::Builder("issue date out of range".into()))?,
        };
        let vat_rate = self
            .vat_rate
            .unwrap_or_else(|| company.fiscal_regime.default_vat_rate());

        Ok(Invoice {
            id: self.id.unwrap_or_else(|| self.number.clone()),
            number: self.number,
            issue_date: self.issue_date,
            due_date,
            company,
            client: self.client,
            items: self.items,
            vat_rate,
            withholding_rate: self.withholding_rate,
            notes: self.notes,
            template: self.template,
        })
    }
}

/// Builder for [`Company`]. New companies start `Pending` until approved.
pub struct CompanyBuilder {
    company: Company,
}

impl CompanyBuilder {
    pub fn new(id: impl Into<String>, name: impl Into<String>, tax_id: impl Into<String>) -> Self {
        Self {
            company: Company {
                id: id.into(),
                name: name.into(),
                tax_id: tax_id.into(),
                address: String::new(),
                phone: String::new(),
                phone_alt: None,
                email: String::new(),
                website: None,
                logo_url: None,
                bank_name: None,
                bank_coordinates: String::new(),
                fiscal_regime: FiscalRegime::General,
                status: CompanyStatus::Pending,
                province: None,
                municipality: None,
                activated_at: None,
                activated_by: None,
            },
        }
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.company.address = address.into();
        self
    }

    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.company.phone = phone.into();
        self
    }

    pub fn phone_alt(mut self, phone: impl Into<String>) -> Self {
        self.company.phone_alt = Some(phone.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.company.email = email.into();
        self
    }

    pub fn website(mut self, website: impl Into<String>) -> Self {
        self.company.website = Some(website.into());
        self
    }

    pub fn logo_url(mut self, url: impl Into<String>) -> Self {
        self.company.logo_url = Some(url.into());
        self
    }

    pub fn bank(mut self, name: impl Into<String>, coordinates: impl Into<String>) -> Self {
        self.company.bank_name = Some(name.into());
        self.company.bank_coordinates = coordinates.into();
        self
    }

    pub fn fiscal_regime(mut self, regime: FiscalRegime) -> Self {
        self.company.fiscal_regime = regime;
        self
    }

    pub fn status(mut self, status: CompanyStatus) -> Self {
        self.company.status = status;
        self
    }

    pub fn location(mut self, province: impl Into<String>, municipality: impl Into<String>) -> Self {
        self.company.province = Some(province.into());
        self.company.municipality = Some(municipality.into());
        self
    }

    pub fn build(self) -> Company {
        self.company
    }
}

/// Builder for [`Client`].
pub struct ClientBuilder {
    client: Client,
}

impl ClientBuilder {
    pub fn new(name: impl Into<String>, tax_id: impl Into<String>) -> Self {
        Self {
            client: Client {
                name: name.into(),
                tax_id: tax_id.into(),
                ..Default::default()
            },
        }
    }

    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.client.address = address.into();
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.client.email = email.into();
        self
    }

    pub fn build(self) -> Client {
        self.client
    }
}

/// Builder for [`LineItem`].
pub struct LineItemBuilder {
    item: LineItem,
}

impl LineItemBuilder {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        quantity: Decimal,
        unit_price: Decimal,
    ) -> Self {
        Self {
            item: LineItem {
                id: id.into(),
                description: description.into(),
                quantity,
                unit_price,
            },
        }
    }

    pub fn build(self) -> LineItem {
        self.item
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn company(regime: FiscalRegime) -> Company {
        CompanyBuilder::new("emp-001", "Empresa, Lda", "5000000000")
            .fiscal_regime(regime)
            .status(CompanyStatus::Active)
            .build()
    }

    fn item() -> LineItem {
        LineItemBuilder::new("1", "Consultoria", dec!(2), dec!(50000)).build()
    }

    #[test]
    fn defaults_follow_company_regime() {
        let inv = InvoiceBuilder::new("FT 2025/001", date(2025, 1, 20))
            .company(company(FiscalRegime::Exclusion))
            .add_item(item())
            .build()
            .unwrap();
        assert_eq!(inv.vat_rate, Decimal::ZERO);
        assert_eq!(inv.due_date, date(2025, 2, 4));
        assert_eq!(inv.id, "FT 2025/001");
    }

    #[test]
    fn explicit_rates_override_defaults() {
        let inv = InvoiceBuilder::new("FT 2025/002", date(2025, 1, 20))
            .id("inv-2")
            .company(company(FiscalRegime::General))
            .add_item(item())
            .vat_rate(dec!(0))
            .withholding_rate(dec!(6.5))
            .build()
            .unwrap();
        assert_eq!(inv.id, "inv-2");
        assert_eq!(inv.totals().withholding, dec!(6500));
    }

    #[test]
    fn company_is_required() {
        let err = InvoiceBuilder::new("FT 2025/001", date(2025, 1, 20))
            .add_item(item())
            .build()
            .unwrap_err();
        assert!(matches!(err, FacturaError::Builder(_)));
    }

    #[test]
    fn at_least_one_item_is_required() {
        let err = InvoiceBuilder::new("FT 2025/001", date(2025, 1, 20))
            .company(company(FiscalRegime::General))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("at least one line item"));
    }

    #[test]
    fn pending_or_inactive_company_cannot_issue() {
        let pending = CompanyBuilder::new("c1", "Pendente Lda", "500000000").build();
        let mut inactive = company(FiscalRegime::General);
        inactive.deactivate();

        for c in [pending, inactive] {
            let err = InvoiceBuilder::new("FT 2025/001", date(2025, 1, 20))
                .company(c.clone())
                .add_item(item())
                .build()
                .unwrap_err();
            assert!(matches!(err, FacturaError::Validation(_)));
            assert!(err.to_string().contains("INV-07"), "{err}");

            let stored = InvoiceBuilder::new("FT 2025/001", date(2025, 1, 20))
                .company(c)
                .add_item(item())
                .build_unchecked()
                .unwrap();
            assert!(!stored.company.can_issue());
        }
    }

    #[test]
    fn new_companies_are_pending() {
        let c = CompanyBuilder::new("x", "X", "123456789").build();
        assert_eq!(c.status, CompanyStatus::Pending);
        assert!(!c.can_issue());
    }
}
