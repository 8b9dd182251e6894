//! Error types for realm storage

use realmgen_logic::error::GenerationError;
use thiserror::Error;

use crate::components::RealmId;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors that can occur during registry operations
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Generation rejected the parameters or broke an invariant
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// Another realm already uses this name
    #[error("realm name already in use: {0}")]
    DuplicateName(String),

    /// No realm with this id
    #[error("unknown realm: {0}")]
    UnknownRealm(RealmId),

    /// No planet at this position in the realm
    #[error("{realm} has no planet {index} at node {sequence}")]
    UnknownPlanet {
        realm: RealmId,
        sequence: u32,
        index: u8,
    },
}
