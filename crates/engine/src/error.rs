//! The module contains the error the engine can throw.
use thiserror::Error;

/// Engine custom errors.
///
/// Note that the allocation and aggregation paths never fail: imbalanced
/// custom splits and dangling payer references are reported through the
/// `valid` flag on [`Allocation`] so a recompute always produces a result.
/// Errors here come from parsing only.
///
/// [`Allocation`]: crate::Allocation
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
}
