//! `docextract-core` — Typed fields for extracted document data.
//!
//! Leaf crate: raw prediction values come in, `Field`/`TaxLine` values with
//! a confidence score come out. No engine logic lives here beyond the
//! confidence and sum aggregates shared by every consumer.

pub mod aggregate;
pub mod field;
pub mod format;
pub mod raw;
pub mod tax;

pub use aggregate::{aggregate_confidence, aggregate_sum, Scored};
pub use field::{DateField, Field, TextField};
pub use format::format_amount;
pub use raw::{RawField, RawScalar, RawTaxLine};
pub use tax::TaxLine;
