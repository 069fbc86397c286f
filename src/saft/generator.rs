use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::audit_file::{saft_file_name, to_saft_xml};
use super::{SaftConfig, SaftFile, SaftSubmission, SubmissionKind, SubmissionLedger, SubmissionStore};
use crate::agt::{AgtValidator, ValidationReport};
use crate::core::{Company, FacturaError, Invoice, InvoiceFilter, ReportingPeriod, Repository};

/// What the operator asked to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub company_id: String,
    pub period: ReportingPeriod,
    #[serde(default)]
    pub kind: SubmissionKind,
    /// Falls back to [`SaftConfig::default_operator`].
    #[serde(default)]
    pub operator: Option<String>,
}

impl GenerationRequest {
    pub fn new(company_id: impl Into<String>, period: ReportingPeriod) -> Self {
        Self {
            company_id: company_id.into(),
            period,
            kind: SubmissionKind::Normal,
            operator: None,
        }
    }

    /// Mark the request as replacing an earlier submission for the period.
    pub fn substitution(mut self) -> Self {
        self.kind = SubmissionKind::Substitution;
        self
    }

    pub fn operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = Some(operator.into());
        self
    }
}

/// Result of a generation attempt that reached a verdict.
#[derive(Debug, Clone)]
pub enum GenerationOutcome {
    /// Validation passed; the file was assembled and the submission recorded.
    Generated {
        report: ValidationReport,
        submission: SaftSubmission,
        file: SaftFile,
    },
    /// Validation found errors; nothing was assembled or recorded.
    Rejected(ValidationReport),
}

impl GenerationOutcome {
    pub fn report(&self) -> &ValidationReport {
        match self {
            GenerationOutcome::Generated { report, .. } => report,
            GenerationOutcome::Rejected(report) => report,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, GenerationOutcome::Generated { .. })
    }
}

/// Validate, assemble and record SAF-T files for a company and period.
///
/// Reads companies and invoices through [`Repository`] collaborators. The
/// ledger only receives an entry once validation passed and the XML was
/// assembled.
pub struct SaftGenerator<'a, C, I> {
    companies: &'a C,
    invoices: &'a I,
    validator: AgtValidator,
    config: SaftConfig,
}

impl<'a, C, I> SaftGenerator<'a, C, I>
where
    C: Repository<Company>,
    I: Repository<Invoice>,
{
    pub fn new(companies: &'a C, invoices: &'a I) -> Self {
        Self {
            companies,
            invoices,
            validator: AgtValidator::default(),
            config: SaftConfig::default(),
        }
    }

    pub fn with_validator(mut self, validator: AgtValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_config(mut self, config: SaftConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &SaftConfig {
        &self.config
    }

    fn load(
        &self,
        company_id: &str,
        period: ReportingPeriod,
    ) -> Result<(Option<Company>, Vec<Invoice>), FacturaError> {
        let company = self.companies.get(company_id)?;
        let invoices = match &company {
            Some(c) => InvoiceFilter::new(&c.id, period).load(self.invoices)?,
            None => Vec::new(),
        };
        Ok((company, invoices))
    }

    /// Run the full pipeline for `request`.
    ///
    /// Returns `Err` for storage or assembly faults, and for a company that
    /// is not active even when the configured validator let it through.
    /// Failed validation is [`GenerationOutcome::Rejected`].
    pub fn generate<S: SubmissionStore>(
        &self,
        ledger: &mut SubmissionLedger<S>,
        request: &GenerationRequest,
        now: DateTime<Utc>,
    ) -> Result<GenerationOutcome, FacturaError> {
        let (company, invoices) = self.load(&request.company_id, request.period)?;
        let report = self
            .validator
            .validate(company.as_ref(), request.period, &invoices);

        if !report.passed() {
            warn!(
                company_id = %request.company_id,
                period = %request.period,
                errors = report.errors().count(),
                "SAF-T generation rejected by AGT validation"
            );
            return Ok(GenerationOutcome::Rejected(report));
        }

        let company = company
            .ok_or_else(|| FacturaError::NotFound(format!("company {}", request.company_id)))?;
        require_active(&company)?;
        let content = to_saft_xml(&company, request.period, &invoices, &self.config, now.date_naive())?;
        let file = SaftFile::xml(saft_file_name(&company.tax_id, request.period), content);

        let operator = request
            .operator
            .clone()
            .unwrap_or_else(|| self.config.default_operator.clone());
        let submission =
            SaftSubmission::generated(&company, request.period, request.kind, operator, now);
        ledger.record(submission.clone())?;

        info!(
            submission_id = %submission.id,
            company_id = %company.id,
            period = %request.period,
            invoices = invoices.len(),
            file_name = %file.file_name,
            "SAF-T file generated"
        );

        Ok(GenerationOutcome::Generated {
            report,
            submission,
            file,
        })
    }

    /// Re-render the file of a recorded submission from the current invoice records.
    pub fn render(
        &self,
        submission: &SaftSubmission,
        now: DateTime<Utc>,
    ) -> Result<SaftFile, FacturaError> {
        let (company, invoices) = self.load(&submission.company_id, submission.period)?;
        let company = company
            .ok_or_else(|| FacturaError::NotFound(format!("company {}", submission.company_id)))?;
        require_active(&company)?;
        let content = to_saft_xml(&company, submission.period, &invoices, &self.config, now.date_naive())?;
        Ok(SaftFile::xml(submission.file_name(), content))
    }
}

/// SAF-T files are only ever produced for active companies, whatever
/// rules the validator was configured with.
fn require_active(company: &Company) -> Result<(), FacturaError> {
    if company.can_issue() {
        return Ok(());
    }
    Err(FacturaError::Generation(format!(
        "company {} is {}; SAF-T export requires an active company",
        company.id,
        company.status.as_str()
    )))
}
