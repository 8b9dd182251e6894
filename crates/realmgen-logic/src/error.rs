//! Error types for realm generation.

use thiserror::Error;

use crate::params::ParamError;

/// Result type for generation operations
pub type Result<T> = std::result::Result<T, GenerationError>;

/// Errors returned by [`crate::generator::RealmGenerator::generate`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Parameters rejected before any generation work started
    #[error("invalid realm parameters: {}", join_errors(.0))]
    InvalidParams(Vec<ParamError>),

    /// Internal contract broken; indicates a defect in the generator
    #[error("generation invariant violated: {0}")]
    Invariant(#[from] InvariantViolation),
}

/// Contract violations inside the topology builder.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Hub node absent when wiring ran
    #[error("hub node is missing")]
    MissingHub,

    /// A tunnel pair was inserted twice despite the dedup check
    #[error("duplicate tunnel {from} -> {to}")]
    DuplicateTunnel { from: u32, to: u32 },

    /// A node was asked to connect to itself
    #[error("self loop on node {0}")]
    SelfLoop(u32),

    /// Sequence number outside 1..=node_count
    #[error("unknown node {0}")]
    UnknownNode(u32),
}

fn join_errors(errors: &[ParamError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_params_lists_every_reason() {
        let err = GenerationError::InvalidParams(vec![
            ParamError::EmptyName,
            ParamError::SeedRateOutOfRange(120),
        ]);
        let msg = err.to_string();
        assert!(msg.contains("name is empty"), "{msg}");
        assert!(msg.contains("120%"), "{msg}");
    }

    #[test]
    fn invariant_converts() {
        let err: GenerationError = InvariantViolation::MissingHub.into();
        assert_eq!(err, GenerationError::Invariant(InvariantViolation::MissingHub));
    }
}
