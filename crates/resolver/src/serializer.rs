//! Reference serializers
//!
//! | Kind | Output |
//! |------|--------|
//! | `Simple` | Every segment, root to leaf |
//! | `Compact` | Segments that differ from the current context, plus the leaf |
//! | `Local` | Every segment except the tenant |
//!
//! Compaction groups the chain into levels (tenant, container path,
//! document, object, leaf). Going root to leaf, a level is printed when it
//! differs from the base reference of the context or when a level above it
//! was printed. The leaf is always printed. Resolving the compact form
//! against the same context gives back the original reference.

use crate::context::{Context, ContextProvider};
use serde::{Deserialize, Serialize};
use tracing::trace;
use wikiref_core::syntax::{self, Token};
use wikiref_core::{EntityReference, EntityType};

/// Serializer output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SerializerKind {
    /// Full chain
    Simple,
    /// Only what differs from the context
    Compact,
    /// Full chain without the tenant
    Local,
}

/// Reference serializer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceSerializer {
    kind: SerializerKind,
}

impl ReferenceSerializer {
    /// Create a serializer of `kind`
    pub fn new(kind: SerializerKind) -> Self {
        ReferenceSerializer { kind }
    }

    /// Full-chain serializer
    pub fn simple() -> Self {
        Self::new(SerializerKind::Simple)
    }

    /// Context-compacting serializer
    pub fn compact() -> Self {
        Self::new(SerializerKind::Compact)
    }

    /// Tenant-less serializer
    pub fn local() -> Self {
        Self::new(SerializerKind::Local)
    }

    /// Serialize `reference`
    ///
    /// Only the compact kind reads `context`.
    pub fn serialize(&self, reference: &EntityReference, context: &dyn ContextProvider) -> String {
        match self.kind {
            SerializerKind::Simple => syntax::join(&reference.tokens()),
            SerializerKind::Local => {
                let tokens: Vec<Token> = reference
                    .tokens()
                    .into_iter()
                    .filter(|t| t.entity_type != EntityType::Tenant)
                    .collect();
                syntax::join(&tokens)
            }
            SerializerKind::Compact => compact(reference, &Context::capture(context)),
        }
    }
}

fn compact(reference: &EntityReference, context: &Context) -> String {
    let tokens = reference.tokens();
    let leaf_start = leaf_group_start(&tokens, reference.entity_type());

    let mut printing = false;
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut start = 0;
    while start < leaf_start {
        let entity_type = tokens[start].entity_type;
        let end = tokens[start..leaf_start]
            .iter()
            .position(|t| t.entity_type != entity_type)
            .map_or(leaf_start, |offset| start + offset);
        let group = &tokens[start..end];

        if !printing {
            let names: Vec<&str> = group.iter().map(|t| t.name.as_str()).collect();
            printing = context.segment_names(entity_type) != names;
            if !printing {
                trace!(
                    target: "wikiref::serialize",
                    entity_type = %entity_type,
                    "omitted level matching context"
                );
            }
        }
        if printing {
            out.extend_from_slice(group);
        }
        start = end;
    }

    out.extend_from_slice(&tokens[leaf_start..]);
    syntax::join(&out)
}

/// Index of the first token belonging to the leaf
///
/// A container leaf owns the containers directly above it.
fn leaf_group_start(tokens: &[Token], leaf_type: EntityType) -> usize {
    if leaf_type == EntityType::Container {
        tokens
            .iter()
            .rposition(|t| t.entity_type != EntityType::Container)
            .map_or(0, |i| i + 1)
    } else {
        tokens.len().saturating_sub(1)
    }
}
