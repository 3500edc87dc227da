//! Search over job offers.
//!
//! Raw query-string parameters ([`SearchParams`]) are compiled by
//! [`compile`] into a typed [`Predicate`] built from the fixed set of
//! [`clause`]s. Stores either evaluate the predicate in memory or render it
//! into SQL.

pub mod clause;
mod compiler;
mod params;
mod predicate;

pub use compiler::{compile, CompileError};
pub use params::SearchParams;
pub use predicate::{escape_like, Predicate};
