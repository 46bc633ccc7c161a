//! Shared fixtures for the model tests.

#![allow(dead_code)]

pub use wikiref::{
    Context, EntityReference, EntityType, Error, ModelConfig, ReferenceResolver,
    ReferenceSerializer,
};

/// Build a reference from `(type, name)` pairs, root first.
pub fn reference(segments: &[(EntityType, &str)]) -> EntityReference {
    EntityReference::from_segments(segments.iter().copied()).unwrap()
}

/// `acme:Sales.Home`, the document most tests are "on".
pub fn home() -> EntityReference {
    reference(&[
        (EntityType::Tenant, "acme"),
        (EntityType::Container, "Sales"),
        (EntityType::Document, "Home"),
    ])
}

/// Context positioned on [`home`].
pub fn home_context() -> Context {
    Context::for_document(home())
}

/// Current resolver with default configuration.
pub fn current_resolver() -> ReferenceResolver {
    ReferenceResolver::current(ModelConfig::default())
}
