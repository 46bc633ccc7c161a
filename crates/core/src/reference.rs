//! Hierarchical entity references
//!
//! An [`EntityReference`] names one addressable entity: a name, a type and an
//! optional parent reference. Following parents leads to the root of the
//! chain, e.g. `acme:Sales.Budget` is the chain
//! `Tenant(acme) <- Container(Sales) <- Document(Budget)`.
//!
//! ## Invariants
//!
//! - Names are never empty
//! - Every parent's type is an allowed parent of its child's type
//! - References are immutable; every "modification" builds a new chain
//!
//! Parents are shared (`Arc`), so building a child never copies its
//! ancestors and a chain can be handed to any number of owners. Chains are
//! built bottom-up from immutable nodes, so cycles cannot be formed.
//!
//! ## Usage
//!
//! ```
//! use wikiref_core::{EntityReference, EntityType};
//!
//! let tenant = EntityReference::new("acme", EntityType::Tenant).unwrap();
//! let sales = tenant.child("Sales", EntityType::Container).unwrap();
//! let budget = sales.child("Budget", EntityType::Document).unwrap();
//!
//! assert!(budget.is_absolute());
//! assert_eq!(budget.extract_ancestor(EntityType::Tenant), Some(&tenant));
//! assert_eq!(budget.to_string(), "acme:Sales.Budget");
//!
//! // Documents cannot live directly under a tenant
//! assert!(tenant.child("Budget", EntityType::Document).is_err());
//! ```

use crate::entity_type::EntityType;
use crate::error::{Error, Result};
use crate::syntax::{self, Token};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Maximum number of segments in a reference chain (256 segments)
///
/// Chains are dropped, compared and hashed recursively, so their depth must
/// stay bounded. Enforced when building references and when splitting
/// reference strings.
pub const MAX_CHAIN_DEPTH: usize = 256;

/// Immutable reference to an entity, with its parent chain
///
/// Equality and hashing are structural: two references are equal when every
/// level of their chains has the same name and type.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<Token>", into = "Vec<Token>")]
pub struct EntityReference {
    node: Arc<Node>,
}

#[derive(PartialEq, Eq, Hash)]
struct Node {
    name: String,
    entity_type: EntityType,
    parent: Option<EntityReference>,
}

impl EntityReference {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a reference without a parent
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyName` if `name` is empty.
    pub fn new(name: impl Into<String>, entity_type: EntityType) -> Result<Self> {
        Self::build(name.into(), entity_type, None)
    }

    /// Create a reference under `parent`
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyName` if `name` is empty, or
    /// `Error::InvalidHierarchy` if `parent`'s type is not an allowed parent.
    pub fn with_parent(
        name: impl Into<String>,
        entity_type: EntityType,
        parent: EntityReference,
    ) -> Result<Self> {
        Self::build(name.into(), entity_type, Some(parent))
    }

    /// Create a child of this reference
    ///
    /// # Errors
    ///
    /// Same as [`with_parent`](Self::with_parent).
    pub fn child(&self, name: impl Into<String>, entity_type: EntityType) -> Result<Self> {
        Self::build(name.into(), entity_type, Some(self.clone()))
    }

    /// Build a chain from root-first `(type, name)` segments
    ///
    /// ```
    /// use wikiref_core::{EntityReference, EntityType};
    ///
    /// let doc = EntityReference::from_segments([
    ///     (EntityType::Tenant, "acme"),
    ///     (EntityType::Container, "Sales"),
    ///     (EntityType::Document, "Budget"),
    /// ])
    /// .unwrap();
    /// assert_eq!(doc.name(), "Budget");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyChain` for an empty list, `Error::ChainTooDeep`
    /// past [`MAX_CHAIN_DEPTH`] segments, and the construction errors of
    /// [`with_parent`](Self::with_parent) for invalid segments.
    pub fn from_segments<I, S>(segments: I) -> Result<Self>
    where
        I: IntoIterator<Item = (EntityType, S)>,
        S: Into<String>,
    {
        let mut current: Option<EntityReference> = None;
        for (entity_type, name) in segments {
            current = Some(Self::build(name.into(), entity_type, current)?);
        }
        current.ok_or(Error::EmptyChain)
    }

    fn build(
        name: String,
        entity_type: EntityType,
        parent: Option<EntityReference>,
    ) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::EmptyName { entity_type });
        }
        if let Some(parent) = &parent {
            if !entity_type.is_allowed_parent(parent.entity_type()) {
                return Err(Error::InvalidHierarchy {
                    entity_type,
                    parent_type: parent.entity_type(),
                });
            }
            let depth = parent.len() + 1;
            if depth > MAX_CHAIN_DEPTH {
                return Err(Error::ChainTooDeep {
                    depth,
                    max: MAX_CHAIN_DEPTH,
                });
            }
        }
        Ok(EntityReference {
            node: Arc::new(Node {
                name,
                entity_type,
                parent,
            }),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Name of this segment
    pub fn name(&self) -> &str {
        &self.node.name
    }

    /// Type of this segment
    pub fn entity_type(&self) -> EntityType {
        self.node.entity_type
    }

    /// Parent reference, if any
    pub fn parent(&self) -> Option<&EntityReference> {
        self.node.parent.as_ref()
    }

    /// Type of the parent, or the first allowed parent type when there is none
    pub fn parent_type(&self) -> Option<EntityType> {
        match self.parent() {
            Some(parent) => Some(parent.entity_type()),
            None => self.entity_type().allowed_parents().first().copied(),
        }
    }

    /// Iterate from this reference up to the root
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors {
            current: Some(self),
        }
    }

    /// The outermost reference of the chain
    pub fn root(&self) -> &EntityReference {
        let mut reference = self;
        while let Some(parent) = reference.parent() {
            reference = parent;
        }
        reference
    }

    /// The chain from the root down to this reference
    pub fn chain(&self) -> Vec<&EntityReference> {
        let mut chain: Vec<&EntityReference> = self.ancestors().collect();
        chain.reverse();
        chain
    }

    /// Number of segments in the chain
    pub fn len(&self) -> usize {
        self.ancestors().count()
    }

    /// Always false: a reference has at least one segment
    pub fn is_empty(&self) -> bool {
        false
    }

    /// True when the chain reaches a tenant
    ///
    /// Because every parent link is validated against the catalog, a chain
    /// rooted at a tenant names every ancestor type the leaf requires.
    pub fn is_absolute(&self) -> bool {
        self.root().entity_type() == EntityType::Tenant
    }

    /// The closest reference of type `entity_type`, starting with this one
    pub fn extract_ancestor(&self, entity_type: EntityType) -> Option<&EntityReference> {
        self.ancestors().find(|r| r.entity_type() == entity_type)
    }

    /// The outermost reference of the first run of `entity_type` references
    ///
    /// For `acme:Sales.Q1.Budget` and `Container` this is `Sales`, where
    /// [`extract_ancestor`](Self::extract_ancestor) returns `Q1`.
    pub fn extract_first_ancestor(&self, entity_type: EntityType) -> Option<&EntityReference> {
        let mut reference = self.extract_ancestor(entity_type)?;
        while let Some(parent) = reference.parent() {
            if parent.entity_type() != entity_type {
                break;
            }
            reference = parent;
        }
        Some(reference)
    }

    /// Names of all segments of `entity_type`, root first
    pub fn segment_names(&self, entity_type: EntityType) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .ancestors()
            .filter(|r| r.entity_type() == entity_type)
            .map(|r| r.name())
            .collect();
        names.reverse();
        names
    }

    /// The chain as root-first tokens
    pub fn tokens(&self) -> Vec<Token> {
        self.chain()
            .into_iter()
            .map(|r| Token::new(r.entity_type(), r.name()))
            .collect()
    }

    /// True when `ancestor` appears above this reference in its chain
    pub fn has_ancestor(&self, ancestor: &EntityReference) -> bool {
        self.ancestors().skip(1).any(|r| r == ancestor)
    }

    // =========================================================================
    // Ranged equality
    // =========================================================================

    /// Compare only this segment's name and type, ignoring parents
    pub fn equals_non_recursive(&self, other: &EntityReference) -> bool {
        self.name() == other.name() && self.entity_type() == other.entity_type()
    }

    /// Compare the two chains from the leaf up to and including the `to` level
    ///
    /// Levels above `to` are ignored, so a local reference matches a complete
    /// one when their lower levels agree:
    ///
    /// ```
    /// use wikiref_core::{EntityReference, EntityType};
    ///
    /// let local = EntityReference::from_segments([
    ///     (EntityType::Container, "Sales"),
    ///     (EntityType::Document, "Budget"),
    /// ])
    /// .unwrap();
    /// let full = EntityReference::new("acme", EntityType::Tenant)
    ///     .and_then(|t| local.append_parent(t))
    ///     .unwrap();
    /// assert!(local.equals_up_to(&full, EntityType::Container));
    /// assert!(local != full);
    /// ```
    pub fn equals_up_to(&self, other: &EntityReference, to: EntityType) -> bool {
        let mut left = Some(self);
        let mut right = Some(other);

        while let Some(current) = left {
            let entity_type = current.entity_type();
            if entity_type != to && !entity_type.is_allowed_ancestor(to) {
                break;
            }
            match right {
                Some(r) if current.equals_non_recursive(r) => {
                    left = current.parent();
                    right = r.parent();
                }
                _ => return false,
            }
        }

        // Whatever is left on the other side must sit above `to`
        match right {
            None => true,
            Some(r) => r.entity_type() != to && to.is_allowed_ancestor(r.entity_type()),
        }
    }

    /// Compare the two chains between the `from` level and the `to` level
    ///
    /// Both chains are first cut down to their closest `from` ancestor; false
    /// when either has none.
    pub fn equals_between(
        &self,
        other: &EntityReference,
        from: EntityType,
        to: EntityType,
    ) -> bool {
        match (self.extract_ancestor(from), other.extract_ancestor(from)) {
            (Some(left), Some(right)) => left.equals_up_to(right, to),
            _ => false,
        }
    }

    // =========================================================================
    // Rewrites
    // =========================================================================

    /// Copy of this segment with a different parent
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidHierarchy` if the new parent's type is not allowed.
    pub fn replace_parent(&self, parent: Option<EntityReference>) -> Result<Self> {
        Self::build(self.name().to_string(), self.entity_type(), parent)
    }

    /// Copy of this chain with `ancestor` (and everything above it) replaced
    /// by `replacement`
    ///
    /// Passing `None` as replacement cuts the chain below `ancestor`.
    ///
    /// # Errors
    ///
    /// Returns `Error::AncestorNotFound` if `ancestor` is not in the chain, or
    /// `Error::InvalidHierarchy` if the replacement does not fit.
    pub fn replace_ancestor(
        &self,
        ancestor: &EntityReference,
        replacement: Option<EntityReference>,
    ) -> Result<Self> {
        let chain = self.chain();
        let position = chain[..chain.len() - 1]
            .iter()
            .position(|r| *r == ancestor)
            .ok_or_else(|| Error::AncestorNotFound {
                ancestor: ancestor.to_string(),
                reference: self.to_string(),
            })?;
        Self::rebuild(&chain[position + 1..], replacement)
    }

    /// Copy of this chain with everything above `ancestor` removed
    ///
    /// # Errors
    ///
    /// Returns `Error::AncestorNotFound` if `ancestor` is not in the chain.
    pub fn remove_ancestor(&self, ancestor: &EntityReference) -> Result<Self> {
        self.replace_ancestor(ancestor, None)
    }

    /// Copy of this chain with `parent` attached above its current root
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidHierarchy` if the root cannot take that parent.
    pub fn append_parent(&self, parent: EntityReference) -> Result<Self> {
        Self::rebuild(&self.chain(), Some(parent))
    }

    fn rebuild(segments: &[&EntityReference], base: Option<EntityReference>) -> Result<Self> {
        let mut current = base;
        for segment in segments {
            current = Some(Self::build(
                segment.name().to_string(),
                segment.entity_type(),
                current,
            )?);
        }
        current.ok_or(Error::EmptyChain)
    }
}

/// Iterator from a reference up to its root
pub struct Ancestors<'a> {
    current: Option<&'a EntityReference>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a EntityReference;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current?;
        self.current = current.parent();
        Some(current)
    }
}

impl Ord for EntityReference {
    /// Orders chains root first by name, then type, then chain length
    ///
    /// Agrees with `Eq`. Printed forms are not compared since distinct chains
    /// can print the same.
    fn cmp(&self, other: &Self) -> Ordering {
        let chain = self.chain();
        let other_chain = other.chain();
        for (a, b) in chain.iter().zip(other_chain.iter()) {
            let ordering = a
                .name()
                .cmp(b.name())
                .then(a.entity_type().cmp(&b.entity_type()));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        chain.len().cmp(&other_chain.len())
    }
}

impl PartialOrd for EntityReference {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", syntax::join(&self.tokens()))
    }
}

impl fmt::Debug for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.entity_type(), self)
    }
}

impl TryFrom<Vec<Token>> for EntityReference {
    type Error = Error;

    fn try_from(tokens: Vec<Token>) -> Result<Self> {
        Self::from_segments(tokens.into_iter().map(|t| (t.entity_type, t.name)))
    }
}

impl From<EntityReference> for Vec<Token> {
    fn from(reference: EntityReference) -> Self {
        reference.tokens()
    }
}

// ============================================================================
// Tests
// ============================================================================
