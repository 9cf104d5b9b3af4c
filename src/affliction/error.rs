//! Error types for affliction requests.

use thiserror::Error;

use super::catalog::AfflictionKind;

/// Errors that can occur when requesting an affliction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AfflictionError {
    /// The name does not match any affliction kind.
    #[error("Unknown affliction kind '{0}'")]
    UnknownKind(String),

    /// The kind exists but the catalog has no data for it.
    #[error("No catalog data for affliction {0:?}")]
    MissingData(AfflictionKind),
}
