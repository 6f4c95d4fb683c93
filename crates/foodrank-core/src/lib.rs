//! Core types and pipeline logic for the foodrank dataset.
//!
//! This crate is deliberately free of filesystem and CSV dependencies. It
//! joins raw food, compound and content tables into ranked fact rows, filters
//! those rows against a requested compound list, and drives the
//! build-or-read pipeline through the backend traits in [`store`].

pub mod build;
pub mod error;
pub mod fact;
pub mod pipeline;
pub mod query;
pub mod report;
pub mod store;
pub mod table;

pub use error::{Error, Result};
pub use fact::{FactRow, RankedTable};
pub use query::{QueryResult, UnknownCompoundWarning};

/// Number of foods kept per compound when the caller does not say otherwise.
pub const DEFAULT_TOP_N: usize = 5;
