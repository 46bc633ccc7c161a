//! Ambient context for resolution and serialization
//!
//! Resolvers fill missing segments from "where the caller currently is", and
//! the compacting serializer omits segments that match it. That location is
//! owned by the host application and exposed through [`ContextProvider`].
//!
//! Every resolve/serialize call starts by taking a [`Context`] snapshot from
//! the provider and never reads the provider again, so a provider that is
//! updated concurrently cannot produce a half-old, half-new result.

use std::sync::Arc;
use wikiref_core::{EntityReference, EntityType};

/// Source of the "current" references
pub trait ContextProvider {
    /// The ambient reference for `entity_type`, if there is one
    fn current_reference(&self, entity_type: EntityType) -> Option<EntityReference>;
}

impl<T: ContextProvider + ?Sized> ContextProvider for &T {
    fn current_reference(&self, entity_type: EntityType) -> Option<EntityReference> {
        (**self).current_reference(entity_type)
    }
}

impl<T: ContextProvider + ?Sized> ContextProvider for Arc<T> {
    fn current_reference(&self, entity_type: EntityType) -> Option<EntityReference> {
        (**self).current_reference(entity_type)
    }
}

/// Immutable snapshot of the ambient references
///
/// ## Slots
///
/// - `document`: the current document
/// - `container`: the current container, for callers without a document
/// - `tenant`: the ambient tenant; may differ from the document's own tenant
///
/// The most specific filled slot is the [`base`](Context::base) reference.
/// Defaulting and compaction read [`segment_names`](Context::segment_names),
/// which falls through to less specific slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    document: Option<EntityReference>,
    container: Option<EntityReference>,
    tenant: Option<EntityReference>,
}

impl Context {
    /// Empty context (no current location)
    pub fn new() -> Self {
        Self::default()
    }

    /// Context positioned on `document`
    pub fn for_document(document: EntityReference) -> Self {
        Self::new().with_document(document)
    }

    /// Set the current document
    pub fn with_document(mut self, document: EntityReference) -> Self {
        self.document = Some(document);
        self
    }

    /// Set the current container
    pub fn with_container(mut self, container: EntityReference) -> Self {
        self.container = Some(container);
        self
    }

    /// Set the ambient tenant
    pub fn with_tenant(mut self, tenant: EntityReference) -> Self {
        self.tenant = Some(tenant);
        self
    }

    /// Take a snapshot of `provider`
    pub fn capture(provider: &dyn ContextProvider) -> Self {
        Context {
            document: provider.current_reference(EntityType::Document),
            container: provider.current_reference(EntityType::Container),
            tenant: provider.current_reference(EntityType::Tenant),
        }
    }

    /// True when no slot is filled
    pub fn is_empty(&self) -> bool {
        self.document.is_none() && self.container.is_none() && self.tenant.is_none()
    }

    /// The most specific current reference: document, then container, then tenant
    pub fn base(&self) -> Option<&EntityReference> {
        self.document
            .as_ref()
            .or(self.container.as_ref())
            .or(self.tenant.as_ref())
    }

    /// Names of the `entity_type` segments the context holds, root first
    ///
    /// Slots are searched document, then container, then tenant, and the
    /// first one with such segments wins. A relative document therefore does
    /// not hide the tenant slot.
    pub fn segment_names(&self, entity_type: EntityType) -> Vec<&str> {
        [&self.document, &self.container, &self.tenant]
            .into_iter()
            .flatten()
            .map(|slot| slot.segment_names(entity_type))
            .find(|names| !names.is_empty())
            .unwrap_or_default()
    }

    /// The ambient tenant, falling back to the base reference's tenant
    pub fn current_tenant(&self) -> Option<&EntityReference> {
        self.tenant.as_ref().or_else(|| {
            self.base()
                .and_then(|base| base.extract_ancestor(EntityType::Tenant))
        })
    }
}

impl ContextProvider for Context {
    fn current_reference(&self, entity_type: EntityType) -> Option<EntityReference> {
        match entity_type {
            EntityType::Document => self.document.clone(),
            EntityType::Container => self.container.clone().or_else(|| {
                self.base()
                    .and_then(|base| base.extract_ancestor(EntityType::Container))
                    .cloned()
            }),
            EntityType::Tenant => self.current_tenant().cloned(),
            other => self
                .base()
                .and_then(|base| base.extract_ancestor(other))
                .cloned(),
        }
    }
}
