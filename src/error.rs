//! Error type for set construction and growth.
//!
//! Duplicate inserts and missing keys are ordinary `bool` outcomes; the
//! variants here cover invalid configuration and slot-array allocation
//! failure only.

use std::collections::TryReserveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HashSetError {
    /// Max load factor outside `(0, 1]` (or not finite).
    #[error("invalid max load factor {0}: must be in (0, 1]")]
    InvalidLoadFactor(f64),

    /// Growth factor below 2 would never enlarge the table.
    #[error("invalid growth factor {0}: must be at least 2")]
    InvalidGrowthFactor(usize),

    /// The slot array for `requested` slots could not be allocated.
    #[error("failed to allocate slot array of {requested} slots")]
    AllocationFailed {
        /// Number of slots the table tried to allocate
        requested: usize,
        #[source]
        source: TryReserveError,
    },
}

pub type Result<T> = std::result::Result<T, HashSetError>;
