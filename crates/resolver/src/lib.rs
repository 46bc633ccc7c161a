//! Resolution and serialization for wikiref
//!
//! This crate turns strings into references and references into strings:
//! - ReferenceResolver: fills missing levels (Fixed, Current, CurrentMixed)
//! - ReferenceSerializer: renders references (Simple, Compact, Local)
//! - Context: snapshot of the caller's current location
//! - ModelConfig: default names loaded from `wikiref.toml`
//!
//! All operations are pure functions of their inputs and a context snapshot
//! taken at the start of the call.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod context;
pub mod defaults;
pub mod resolver;
pub mod serializer;

pub use config::{ConfigError, DefaultNames, FixedDefaults, ModelConfig, CONFIG_FILE_NAME};
pub use context::{Context, ContextProvider};
pub use defaults::ResolverKind;
pub use resolver::ReferenceResolver;
pub use serializer::{ReferenceSerializer, SerializerKind};
