//! Core types for wikiref
//!
//! This crate defines the hierarchical entity-reference model:
//! - EntityType: Closed catalog of entity types and their allowed parents
//! - EntityReference: Immutable typed node with a shared parent chain
//! - syntax: Tokenizer/escaper for the reference string format
//! - Error: Error taxonomy shared by construction, parsing and resolution
//!
//! Resolution (string to absolute reference) and compacting serialization
//! live in `wikiref-resolver`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod entity_type;
pub mod error;
pub mod reference;
pub mod syntax;

pub use entity_type::EntityType;
pub use error::{Error, Result};
pub use reference::{Ancestors, EntityReference, MAX_CHAIN_DEPTH};
pub use syntax::Token;
