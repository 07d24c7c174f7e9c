// src/error.rs
use thiserror::Error;

/// Errors surfaced by the dashboard core and its HTTP boundary.
///
/// Generators themselves never fail; these only cover bad input from the
/// outside (filter clicks, slot lookups) and invalid seed data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MonitorError {
    #[error("unknown filter '{0}' (expected all, database, api or file)")]
    UnknownFilter(String),

    #[error("unknown display slot '{0}'")]
    UnknownSlot(String),

    #[error("catalog needs at least one data source and one job")]
    EmptyCatalog,
}
