//! Crate error taxonomy.
//!
//! Contract violations are deliberately *not* represented here: the checker
//! collects every violation it finds into a [`ContractReport`] instead of
//! aborting at the first one. `Error` covers the conditions that are fatal
//! to the operation that raised them.
//!
//! [`ContractReport`]: crate::contract::ContractReport

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An equivalent value is already stored; the set is unchanged.
    #[error("an equivalent value is already present")]
    Duplicate,

    /// Index outside `[0, len)`; the operation was aborted.
    #[error("index {index} out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    /// Argument outside its declared valid range; the operation was aborted.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
