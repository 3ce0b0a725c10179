//! Errors reported by the symbol tables in this crate.
//!
//! Absent keys are not errors - lookups return `Option`s. The only failure
//! is a malformed query.

use thiserror::Error;

/// Symbol table error
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Error {
    /// The upper bound of a range query compares less than its lower bound.
    #[error("The upper bound of the range is less than its lower bound.")]
    InvalidRange,
}

/// A `Result` specialised to this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
