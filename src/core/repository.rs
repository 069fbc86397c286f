//! Storage seam for companies and invoices.
//!
//! The core never reads ambient state: every operation that needs records
//! receives a [`Repository`]. [`InMemoryRepository`] backs tests and
//! single-session use; remote stores implement the same trait.

use std::collections::BTreeMap;

use super::error::FacturaError;
use super::period::ReportingPeriod;
use super::types::{Company, Invoice};

/// A record that can be stored in a [`Repository`].
pub trait Record: Clone {
    fn record_id(&self) -> &str;
}

impl Record for Company {
    fn record_id(&self) -> &str {
        &self.id
    }
}

impl Record for Invoice {
    fn record_id(&self) -> &str {
        &self.id
    }
}

/// Per-entity storage contract.
pub trait Repository<T: Record> {
    /// All records.
    fn list(&self) -> Result<Vec<T>, FacturaError>;

    fn get(&self, id: &str) -> Result<Option<T>, FacturaError>;

    /// Insert or replace by id.
    fn save(&mut self, record: T) -> Result<T, FacturaError>;

    fn delete(&mut self, id: &str) -> Result<(), FacturaError>;

    /// Records matching `predicate`.
    fn filter<F>(&self, predicate: F) -> Result<Vec<T>, FacturaError>
    where
        F: Fn(&T) -> bool,
    {
        Ok(self.list()?.into_iter().filter(|r| predicate(r)).collect())
    }
}

/// Map-backed repository, ordered by id.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    records: BTreeMap<String, T>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Record> FromIterator<T> for InMemoryRepository<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            records: iter
                .into_iter()
                .map(|r| (r.record_id().to_string(), r))
                .collect(),
        }
    }
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    fn list(&self) -> Result<Vec<T>, FacturaError> {
        Ok(self.records.values().cloned().collect())
    }

    fn get(&self, id: &str) -> Result<Option<T>, FacturaError> {
        Ok(self.records.get(id).cloned())
    }

    fn save(&mut self, record: T) -> Result<T, FacturaError> {
        self.records
            .insert(record.record_id().to_string(), record.clone());
        Ok(record)
    }

    fn delete(&mut self, id: &str) -> Result<(), FacturaError> {
        self.records
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| FacturaError::NotFound(format!("record '{id}'")))
    }
}

/// Selects the invoices of one company issued within one period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceFilter {
    pub company_id: String,
    pub period: ReportingPeriod,
}

impl InvoiceFilter {
    pub fn new(company_id: impl Into<String>, period: ReportingPeriod) -> Self {
        Self {
            company_id: company_id.into(),
            period,
        }
    }

    pub fn matches(&self, invoice: &Invoice) -> bool {
        invoice.is_issued_by(&self.company_id) && self.period.contains(invoice.issue_date)
    }

    /// Load matching invoices, ordered by issue date then number.
    pub fn load<R>(&self, repo: &R) -> Result<Vec<Invoice>, FacturaError>
    where
        R: Repository<Invoice>,
    {
        let mut invoices = repo.filter(|inv| self.matches(inv))?;
        invoices.sort_by(|a, b| {
            a.issue_date
                .cmp(&b.issue_date)
                .then_with(|| a.number.cmp(&b.number))
        });
        Ok(invoices)
    }
}
