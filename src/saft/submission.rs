use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{Company, FacturaError, ReportingPeriod};

/// Whether a submission is the first for its period or replaces an earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubmissionKind {
    #[default]
    Normal,
    Substitution,
}

impl SubmissionKind {
    /// Label shown to operators and written to exports.
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionKind::Normal => "Normal",
            SubmissionKind::Substitution => "Substituição",
        }
    }
}

/// Lifecycle state of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubmissionState {
    #[default]
    Generated,
    Submitted,
    Rejected,
}

impl SubmissionState {
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionState::Generated => "Gerado",
            SubmissionState::Submitted => "Submetido",
            SubmissionState::Rejected => "Rejeitado",
        }
    }
}

impl std::fmt::Display for SubmissionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One generated SAF-T file, as kept in the submission ledger.
///
/// Company name and NIF are snapshots taken at generation time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaftSubmission {
    pub id: Uuid,
    pub company_id: String,
    pub company_name: String,
    pub tax_id: String,
    pub period: ReportingPeriod,
    pub kind: SubmissionKind,
    pub generated_at: DateTime<Utc>,
    pub state: SubmissionState,
    pub operator: String,
    pub submitted_at: Option<DateTime<Utc>>,
    /// Receipt number issued by AGT on acceptance.
    pub receipt_number: Option<String>,
}

impl SaftSubmission {
    /// A freshly generated submission with a random id.
    pub fn generated(
        company: &Company,
        period: ReportingPeriod,
        kind: SubmissionKind,
        operator: impl Into<String>,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_id: company.id.clone(),
            company_name: company.name.clone(),
            tax_id: company.tax_id.clone(),
            period,
            kind,
            generated_at,
            state: SubmissionState::Generated,
            operator: operator.into(),
            submitted_at: None,
            receipt_number: None,
        }
    }

    /// Move to `Submitted` or `Rejected`, returning the updated value.
    ///
    /// Only `Generated` submissions can move, and only forward. The ledger
    /// entry itself is never rewritten.
    pub fn transition(
        &self,
        to: SubmissionState,
        at: DateTime<Utc>,
        receipt_number: Option<String>,
    ) -> Result<Self, FacturaError> {
        match (self.state, to) {
            (SubmissionState::Generated, SubmissionState::Submitted) => Ok(Self {
                state: to,
                submitted_at: Some(at),
                receipt_number,
                ..self.clone()
            }),
            (SubmissionState::Generated, SubmissionState::Rejected) => Ok(Self {
                state: to,
                submitted_at: Some(at),
                receipt_number: None,
                ..self.clone()
            }),
            (from, to) => Err(FacturaError::Validation(format!(
                "submission {} cannot move from {from} to {to}",
                self.id
            ))),
        }
    }

    /// File name of the SAF-T document this submission stands for.
    pub fn file_name(&self) -> String {
        super::audit_file::saft_file_name(&self.tax_id, self.period)
    }
}
