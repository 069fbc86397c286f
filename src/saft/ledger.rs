use chrono::{DateTime, SecondsFormat, Utc};
use tracing::info;
use uuid::Uuid;

use super::xml_utils::XmlWriter;
use super::{SaftConfig, SaftFile, SaftSubmission, SubmissionStore};
use crate::core::{FacturaError, ReportingPeriod};

/// Append-only history of generated SAF-T submissions.
///
/// Corrections are new entries of kind
/// [`Substitution`](super::SubmissionKind::Substitution); nothing is updated
/// or removed.
#[derive(Debug)]
pub struct SubmissionLedger<S: SubmissionStore> {
    store: S,
}

impl<S: SubmissionStore> SubmissionLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Append a submission.
    pub fn record(&mut self, submission: SaftSubmission) -> Result<(), FacturaError> {
        info!(
            submission_id = %submission.id,
            company_id = %submission.company_id,
            period = %submission.period,
            kind = submission.kind.label(),
            "submission recorded"
        );
        self.store.append(submission)
    }

    /// All entries, most recent first.
    pub fn entries(&self) -> Result<Vec<SaftSubmission>, FacturaError> {
        let mut entries = self.store.load_all()?;
        entries.reverse();
        Ok(entries)
    }

    pub fn len(&self) -> Result<usize, FacturaError> {
        Ok(self.store.load_all()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, FacturaError> {
        Ok(self.len()? == 0)
    }

    pub fn find(&self, id: Uuid) -> Result<Option<SaftSubmission>, FacturaError> {
        Ok(self.store.load_all()?.into_iter().find(|s| s.id == id))
    }

    /// Entries of one company and period, most recent first.
    pub fn entries_for(
        &self,
        company_id: &str,
        period: ReportingPeriod,
    ) -> Result<Vec<SaftSubmission>, FacturaError> {
        Ok(self
            .entries()?
            .into_iter()
            .filter(|s| s.company_id == company_id && s.period == period)
            .collect())
    }

    /// Summary XML of the whole history, most recent first.
    pub fn consolidated_export(
        &self,
        now: DateTime<Utc>,
        config: &SaftConfig,
    ) -> Result<SaftFile, FacturaError> {
        let entries = self.entries()?;
        if entries.is_empty() {
            return Err(FacturaError::Validation("ledger is empty".into()));
        }

        let mut w = XmlWriter::new()?;
        let timestamp = iso_timestamp(now);
        w.start_element_with_attrs("SaftHistoryExport", &[("timestamp", timestamp.as_str())])?;
        for entry in &entries {
            let id = entry.id.to_string();
            w.start_element_with_attrs("Submission", &[("id", id.as_str())])?;
            w.text_element("Period", &entry.period.label())?;
            w.text_element("CompanyName", &entry.company_name)?;
            w.text_element("NIF", &entry.tax_id)?;
            w.text_element("Status", entry.state.label())?;
            w.text_element("DateGenerated", &iso_timestamp(entry.generated_at))?;
            w.end_element("Submission")?;
        }
        w.end_element("SaftHistoryExport")?;

        let file_name = format!(
            "{}_Consolidado_SAFT_{}.xml",
            config.product_id,
            now.timestamp_millis()
        );
        info!(entries = entries.len(), file_name = %file_name, "consolidated export rendered");
        Ok(SaftFile::xml(file_name, w.into_string()?))
    }
}

fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}
