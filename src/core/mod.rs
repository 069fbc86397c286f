//! Core invoice types, totals, amounts in words, numbering and storage.
//!
//! This module provides the foundational types for Angolan invoicing:
//! companies, clients, invoices and their derived totals.

mod builder;
mod error;
mod numbering;
mod period;
mod repository;
mod totals;
mod types;
mod validation;
pub mod words;

pub use builder::*;
pub use error::*;
pub use numbering::*;
pub use period::*;
pub use repository::*;
pub use totals::*;
pub use types::*;
pub use validation::*;
pub use words::{CURRENCY_NAME, amount_to_words};
