//! SAF-T AO file generation and the submission ledger.
//!
//! A SAF-T AO file is the monthly XML audit export of a company's sales
//! invoices (namespace `urn:OECD:StandardAuditFile-Tax:AO_1.0`).
//! [`SaftGenerator`] validates the period with the AGT rules, assembles
//! the file with [`to_saft_xml`] and appends a [`SaftSubmission`] to the
//! [`SubmissionLedger`].
//!
//! # Example
//!
//! ```ignore
//! use factura_ao::saft::*;
//!
//! let mut ledger = SubmissionLedger::new(MemorySubmissionStore::new());
//! let generator = SaftGenerator::new(&companies, &invoices);
//! let request = GenerationRequest::new("c1", ReportingPeriod::new(2025, 1)?);
//! match generator.generate(&mut ledger, &request, Utc::now())? {
//!     GenerationOutcome::Generated { file, .. } => std::fs::write(&file.file_name, file.content)?,
//!     GenerationOutcome::Rejected(report) => eprintln!("{:?}", report.findings),
//! }
//! ```

mod audit_file;
mod config;
mod generator;
mod ledger;
mod store;
mod submission;
mod xml_utils;

pub use audit_file::{
    AUDIT_FILE_VERSION, SAFT_AO_NAMESPACE, SAFT_MIME_TYPE, SaftFile, document_totals,
    render_saft_file, saft_file_name, to_saft_xml,
};
pub use config::{EndDatePolicy, SaftConfig, SaftConfigBuilder};
pub use generator::{GenerationOutcome, GenerationRequest, SaftGenerator};
pub use ledger::SubmissionLedger;
pub use store::{JsonFileSubmissionStore, MemorySubmissionStore, SubmissionStore};
pub use submission::{SaftSubmission, SubmissionKind, SubmissionState};
pub use xml_utils::format_amount_2dp;
