use thiserror::Error;

/// Returned by map accessors that require the key to be present.
///
/// Lookup, insertion, and removal never produce this error: an absent key
/// is `None` for lookups and a defined no-op for removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("key not found")]
pub struct KeyError;
