//! # factura-ao
//!
//! Angolan invoicing library: invoice totals, amounts in words (Kwanzas),
//! print-template contracts, AGT compliance validation and SAF-T AO export
//! with a submission ledger.
//!
//! All monetary values use [`rust_decimal::Decimal`], never floating point.
//! Storage is a collaborator behind the [`Repository`](crate::core::Repository)
//! trait; the library holds no global state.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use factura_ao::core::*;
//! use rust_decimal_macros::dec;
//!
//! let company = CompanyBuilder::new("c1", "Tech Solutions Lda", "5000000000")
//!     .address("Rua Direita 12, Luanda")
//!     .status(CompanyStatus::Active)
//!     .build();
//!
//! let invoice = InvoiceBuilder::new("FT 2025/001", NaiveDate::from_ymd_opt(2025, 1, 10).unwrap())
//!     .company(company)
//!     .client(ClientBuilder::new("Cliente Exemplo", "123456789").build())
//!     .add_item(LineItemBuilder::new("1", "Consultoria", dec!(1), dec!(100000)).build())
//!     .withholding_rate(dec!(6.5))
//!     .build()
//!     .unwrap();
//!
//! let totals = invoice.totals();
//! assert_eq!(totals.tax, dec!(14000));
//! assert_eq!(totals.total, dec!(107500));
//! assert_eq!(amount_to_words(totals.total), "CENTO E SETE MIL E QUINHENTOS KWANZAS");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Invoice types, totals, amounts in words, numbering, repositories |
//! | `template` | Template contract mapping and amount display formatting |
//! | `agt` | AGT compliance validation |
//! | `saft` | SAF-T AO XML assembly, generation pipeline and submission ledger |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "template")]
pub mod template;

#[cfg(feature = "agt")]
pub mod agt;

#[cfg(feature = "saft")]
pub mod saft;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
