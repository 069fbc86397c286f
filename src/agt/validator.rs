use tracing::debug;

use super::finding::{Finding, ValidationReport};
use super::rules::{
    ClientTaxId, ClientTaxIdFormat, CompanyActive, CompanyAddress, CompanyName, CompanyTaxId,
    ContextRule, DocumentNumberFormat, InvoiceRule, PeriodHasInvoices, VatRate,
};
use crate::core::{
    Company, FacturaError, Invoice, InvoiceFilter, ReportingPeriod, Repository,
};

/// Inputs of one validation run.
///
/// Holds only the invoices issued by the selected company inside the period.
#[derive(Debug, Clone)]
pub struct ValidationContext<'a> {
    company: Option<&'a Company>,
    period: ReportingPeriod,
    invoices: Vec<&'a Invoice>,
}

impl<'a> ValidationContext<'a> {
    /// Build a context, keeping only invoices of `company` dated within `period`.
    pub fn new(company: Option<&'a Company>, period: ReportingPeriod, invoices: &'a [Invoice]) -> Self {
        let invoices = match company {
            Some(c) => invoices
                .iter()
                .filter(|inv| inv.is_issued_by(&c.id) && period.contains(inv.issue_date))
                .collect(),
            None => Vec::new(),
        };
        Self {
            company,
            period,
            invoices,
        }
    }

    pub fn company(&self) -> Option<&'a Company> {
        self.company
    }

    pub fn period(&self) -> ReportingPeriod {
        self.period
    }

    pub fn invoices(&self) -> &[&'a Invoice] {
        &self.invoices
    }
}

enum Step {
    Context(Box<dyn ContextRule>),
    EachInvoice(Vec<Box<dyn InvoiceRule>>),
}

/// Runs the AGT rule battery in a fixed order.
///
/// The default battery reports, in order: AGT-001, AGT-LOCKED, AGT-006,
/// AGT-003 (empty period), then AGT-002 / AGT-003 / AGT-005 for each invoice,
/// then AGT-101.
pub struct AgtValidator {
    steps: Vec<Step>,
}

impl Default for AgtValidator {
    fn default() -> Self {
        Self::builder()
            .rule(CompanyTaxId)
            .rule(CompanyActive)
            .rule(CompanyName)
            .rule(PeriodHasInvoices)
            .per_invoice(vec![
                Box::new(ClientTaxId),
                Box::new(DocumentNumberFormat),
                Box::new(VatRate),
            ])
            .rule(CompanyAddress)
            .build()
    }
}

impl std::fmt::Debug for AgtValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgtValidator")
            .field("codes", &self.codes())
            .finish()
    }
}

impl AgtValidator {
    /// The default battery.
    pub fn new() -> Self {
        Self::default()
    }

    /// The default battery plus the AGT-102 client NIF format warning.
    pub fn strict() -> Self {
        Self::builder()
            .rule(CompanyTaxId)
            .rule(CompanyActive)
            .rule(CompanyName)
            .rule(PeriodHasInvoices)
            .per_invoice(vec![
                Box::new(ClientTaxId),
                Box::new(ClientTaxIdFormat),
                Box::new(DocumentNumberFormat),
                Box::new(VatRate),
            ])
            .rule(CompanyAddress)
            .build()
    }

    /// An empty battery to assemble custom rule sets.
    pub fn builder() -> AgtValidatorBuilder {
        AgtValidatorBuilder::default()
    }

    /// Codes of the configured rules, in evaluation order.
    pub fn codes(&self) -> Vec<&'static str> {
        self.steps
            .iter()
            .flat_map(|step| match step {
                Step::Context(rule) => vec![rule.code()],
                Step::EachInvoice(rules) => rules.iter().map(|r| r.code()).collect(),
            })
            .collect()
    }

    /// Validate `company` for `period` against the given invoices.
    ///
    /// `invoices` may contain invoices of other companies or periods; only
    /// matching ones are checked.
    pub fn validate(
        &self,
        company: Option<&Company>,
        period: ReportingPeriod,
        invoices: &[Invoice],
    ) -> ValidationReport {
        let ctx = ValidationContext::new(company, period, invoices);
        self.run(&ctx)
    }

    /// Evaluate every rule against a prepared context.
    pub fn run(&self, ctx: &ValidationContext<'_>) -> ValidationReport {
        let mut findings: Vec<Finding> = Vec::new();

        for step in &self.steps {
            match step {
                Step::Context(rule) => findings.extend(rule.evaluate(ctx)),
                Step::EachInvoice(rules) => {
                    for invoice in ctx.invoices() {
                        findings.extend(rules.iter().filter_map(|r| r.evaluate(ctx, invoice)));
                    }
                }
            }
        }

        let report = ValidationReport {
            company_id: ctx.company().map(|c| c.id.clone()),
            period: ctx.period(),
            invoices_checked: ctx.invoices().len(),
            findings,
        };

        debug!(
            company_id = report.company_id.as_deref().unwrap_or("-"),
            period = %report.period,
            invoices = report.invoices_checked,
            errors = report.errors().count(),
            warnings = report.warnings().count(),
            "AGT validation finished"
        );

        report
    }
}

/// Assembles an [`AgtValidator`] from individual rules.
#[derive(Default)]
pub struct AgtValidatorBuilder {
    steps: Vec<Step>,
}

impl AgtValidatorBuilder {
    /// Append a rule evaluated once against the whole context.
    pub fn rule(mut self, rule: impl ContextRule + 'static) -> Self {
        self.steps.push(Step::Context(Box::new(rule)));
        self
    }

    /// Append a group of rules evaluated per invoice; findings interleave by invoice.
    pub fn per_invoice(mut self, rules: Vec<Box<dyn InvoiceRule>>) -> Self {
        if !rules.is_empty() {
            self.steps.push(Step::EachInvoice(rules));
        }
        self
    }

    pub fn build(self) -> AgtValidator {
        AgtValidator { steps: self.steps }
    }
}

/// Load the company and its invoices from repositories and validate the period.
///
/// A missing company is reported as AGT-001, not as an error; repository
/// failures are propagated.
pub fn validate_period<C, I>(
    validator: &AgtValidator,
    companies: &C,
    invoices: &I,
    company_id: &str,
    period: ReportingPeriod,
) -> Result<ValidationReport, FacturaError>
where
    C: Repository<Company>,
    I: Repository<Invoice>,
{
    let company = companies.get(company_id)?;
    let matching = match &company {
        Some(c) => InvoiceFilter::new(&c.id, period).load(invoices)?,
        None => Vec::new(),
    };
    Ok(validator.validate(company.as_ref(), period, &matching))
}
