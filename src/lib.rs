//! wikiref - Hierarchical entity references
//!
//! Entities live in a fixed hierarchy: tenants hold containers, containers
//! nest and hold documents, documents hold attachments and objects, objects
//! hold properties. A reference names one entity by its typed chain of
//! ancestors.
//!
//! # Quick Start
//!
//! ```
//! use wikiref::{Context, EntityReference, EntityType, ModelConfig};
//! use wikiref::{ReferenceResolver, ReferenceSerializer};
//!
//! let home = EntityReference::from_segments([
//!     (EntityType::Tenant, "acme"),
//!     (EntityType::Container, "Sales"),
//!     (EntityType::Document, "Home"),
//! ])
//! .unwrap();
//! let context = Context::for_document(home);
//!
//! let resolver = ReferenceResolver::current(ModelConfig::default());
//! let budget = resolver
//!     .resolve("Marketing.Budget", EntityType::Document, &context)
//!     .unwrap();
//! assert_eq!(budget.to_string(), "acme:Marketing.Budget");
//!
//! let compact = ReferenceSerializer::compact().serialize(&budget, &context);
//! assert_eq!(compact, "Marketing.Budget");
//! ```
//!
//! # Architecture
//!
//! - `wikiref-core`: type catalog, reference tree, tokenizer and errors
//! - `wikiref-resolver`: context, configuration, resolvers and serializers

pub use wikiref_core::*;
pub use wikiref_resolver::*;
