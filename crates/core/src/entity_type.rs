//! Entity type catalog
//!
//! Every reference segment carries an `EntityType`. The catalog is closed:
//! each type declares which types may appear as its immediate parent and
//! which single parent type is used when a missing ancestor is filled in.
//!
//! ## Hierarchy
//!
//! | Type | Allowed parents | Conventional parent | Depth |
//! |------|-----------------|---------------------|-------|
//! | Tenant | (root only) | - | 0 |
//! | Container | Tenant, Container | Tenant | 1 |
//! | Document | Container | Container | 2 |
//! | Attachment | Document | Document | 3 |
//! | Object | Document | Document | 3 |
//! | ObjectProperty | Object | Object | 4 |
//!
//! Containers nest: a container may sit under another container, which is
//! how nested namespaces are modelled.

use serde::{Deserialize, Serialize};

/// The kinds of addressable entities
///
/// Declaration order follows distance from the root, so the derived `Ord`
/// sorts general types before specific ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    /// Top-level tenant (a wiki)
    Tenant,
    /// Container of documents (a space); may nest
    Container,
    /// Document inside a container
    Document,
    /// File attached to a document
    Attachment,
    /// Structured object stored in a document
    Object,
    /// Single property of an object
    ObjectProperty,
}

impl EntityType {
    /// All entity types, root first
    pub const ALL: [EntityType; 6] = [
        EntityType::Tenant,
        EntityType::Container,
        EntityType::Document,
        EntityType::Attachment,
        EntityType::Object,
        EntityType::ObjectProperty,
    ];

    /// Number of entity types
    pub const COUNT: usize = Self::ALL.len();

    /// Get all entity types as a slice
    pub fn all() -> &'static [EntityType] {
        &Self::ALL
    }

    /// Types allowed as the immediate parent of this type
    ///
    /// An empty slice means the type can only be a root.
    pub const fn allowed_parents(&self) -> &'static [EntityType] {
        match self {
            EntityType::Tenant => &[],
            EntityType::Container => &[EntityType::Tenant, EntityType::Container],
            EntityType::Document => &[EntityType::Container],
            EntityType::Attachment => &[EntityType::Document],
            EntityType::Object => &[EntityType::Document],
            EntityType::ObjectProperty => &[EntityType::Object],
        }
    }

    /// The conventional parent type used when filling in missing ancestors
    pub const fn parent_type(&self) -> Option<EntityType> {
        match self {
            EntityType::Tenant => None,
            EntityType::Container => Some(EntityType::Tenant),
            EntityType::Document => Some(EntityType::Container),
            EntityType::Attachment => Some(EntityType::Document),
            EntityType::Object => Some(EntityType::Document),
            EntityType::ObjectProperty => Some(EntityType::Object),
        }
    }

    /// Distance from the root of the hierarchy
    pub const fn depth(&self) -> u8 {
        match self {
            EntityType::Tenant => 0,
            EntityType::Container => 1,
            EntityType::Document => 2,
            EntityType::Attachment | EntityType::Object => 3,
            EntityType::ObjectProperty => 4,
        }
    }

    /// Index into per-type tables (matches position in [`EntityType::ALL`])
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Check whether `parent` may be the immediate parent of this type
    pub fn is_allowed_parent(&self, parent: EntityType) -> bool {
        self.allowed_parents().contains(&parent)
    }

    /// Check whether `ancestor` may appear anywhere above this type
    pub fn is_allowed_ancestor(&self, ancestor: EntityType) -> bool {
        self.allowed_parents()
            .iter()
            .any(|p| *p == ancestor || (*p != *self && p.is_allowed_ancestor(ancestor)))
    }

    /// Types from the root down to this one, following [`parent_type`](Self::parent_type)
    ///
    /// ```
    /// use wikiref_core::EntityType;
    ///
    /// assert_eq!(
    ///     EntityType::Document.canonical_chain(),
    ///     vec![EntityType::Tenant, EntityType::Container, EntityType::Document]
    /// );
    /// ```
    pub fn canonical_chain(&self) -> Vec<EntityType> {
        let mut chain = Vec::with_capacity(self.depth() as usize + 1);
        chain.push(*self);
        let mut current = *self;
        while let Some(parent) = current.parent_type() {
            chain.push(parent);
            current = parent;
        }
        chain.reverse();
        chain
    }

    /// Short identifier (for configuration keys and serialized forms)
    pub const fn id(&self) -> &'static str {
        match self {
            EntityType::Tenant => "tenant",
            EntityType::Container => "container",
            EntityType::Document => "document",
            EntityType::Attachment => "attachment",
            EntityType::Object => "object",
            EntityType::ObjectProperty => "object_property",
        }
    }

    /// Parse from short identifier
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "tenant" => Some(EntityType::Tenant),
            "container" => Some(EntityType::Container),
            "document" => Some(EntityType::Document),
            "attachment" => Some(EntityType::Attachment),
            "object" => Some(EntityType::Object),
            "object_property" => Some(EntityType::ObjectProperty),
            _ => None,
        }
    }

    /// Human-readable name
    pub const fn label(&self) -> &'static str {
        match self {
            EntityType::Tenant => "Tenant",
            EntityType::Container => "Container",
            EntityType::Document => "Document",
            EntityType::Attachment => "Attachment",
            EntityType::Object => "Object",
            EntityType::ObjectProperty => "Object property",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ============================================================================
// Tests
// ============================================================================
