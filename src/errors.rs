//! Error types for index construction.

use thiserror::Error;

/// Construction-time errors.
///
/// Queries on a built index never produce these: out-of-range query
/// arguments on the unchecked paths are a caller contract violation (see
/// the checked variants on each structure), while construction either
/// fully succeeds or yields nothing usable.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An index was requested over a bit vector of length zero.
    #[error("cannot build an index over an empty bit vector")]
    EmptyBitVector,
}

/// A specialized `Result` type for index construction.
pub type Result<T> = std::result::Result<T, Error>;
