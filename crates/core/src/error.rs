//! Error types for the reference model
//!
//! This module defines the error taxonomy shared by reference construction,
//! tokenizing and resolution. We use `thiserror` for automatic `Display` and
//! `Error` trait implementations.
//!
//! None of these errors are retryable: every operation is a pure computation
//! over strings and small trees, so a failure is always handed back to the
//! caller unchanged.

use crate::entity_type::EntityType;
use thiserror::Error;

/// Result type alias for reference model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the reference model
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A reference was given a parent whose type is not an allowed parent
    #[error("{entity_type} cannot have a parent of type {parent_type}")]
    InvalidHierarchy {
        /// Type of the reference being built
        entity_type: EntityType,
        /// Type of the rejected parent
        parent_type: EntityType,
    },

    /// A reference was given an empty name
    #[error("{entity_type} reference name cannot be empty")]
    EmptyName {
        /// Type of the reference being built
        entity_type: EntityType,
    },

    /// A reference was built from an empty list of segments
    #[error("reference must have at least one segment")]
    EmptyChain,

    /// A chain is longer than [`MAX_CHAIN_DEPTH`](crate::reference::MAX_CHAIN_DEPTH)
    #[error("reference chain depth {depth} exceeds maximum of {max}")]
    ChainTooDeep {
        /// Depth reached when the limit was hit
        depth: usize,
        /// Maximum allowed depth
        max: usize,
    },

    /// The input string ends with a dangling escape character
    #[error("malformed reference '{input}': dangling escape character at position {position}")]
    MalformedInput {
        /// The offending input
        input: String,
        /// Character position of the escape character
        position: usize,
    },

    /// A required segment had no name after every default was applied
    #[error("cannot resolve '{input}' as {entity_type}: no name for {missing}")]
    UnresolvableReference {
        /// The input being resolved
        input: String,
        /// Requested type of the resolved reference
        entity_type: EntityType,
        /// The type that could not be named
        missing: EntityType,
    },

    /// An ancestor passed to a rewrite operation is not in the chain
    #[error("{ancestor} is not an ancestor of {reference}")]
    AncestorNotFound {
        /// The ancestor that was looked for
        ancestor: String,
        /// The reference whose chain was searched
        reference: String,
    },
}

impl Error {
    /// Build an `UnresolvableReference` error
    pub fn unresolvable(
        input: impl Into<String>,
        entity_type: EntityType,
        missing: EntityType,
    ) -> Self {
        Error::UnresolvableReference {
            input: input.into(),
            entity_type,
            missing,
        }
    }
}
