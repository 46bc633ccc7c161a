//! Default-value strategies
//!
//! A resolver kind is a table with one default function per entity type.
//! The table is picked once when the resolver is built, so resolution never
//! branches on the kind.
//!
//! A default function returns the names to fill a missing level with, or
//! `None` to leave the level relative. Container levels may hold a path of
//! several names; every other level holds exactly one.

use crate::config::ModelConfig;
use crate::context::Context;
use serde::{Deserialize, Serialize};
use std::fmt;
use wikiref_core::EntityType;

/// Resolver behaviour for missing segments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolverKind {
    /// Configured constants only; ignores the context
    Fixed,
    /// Taken from the context's current reference
    Current,
    /// Like `Current`, but the tenant is the ambient tenant and a missing
    /// document is the configured default document
    CurrentMixed,
}

impl ResolverKind {
    /// All kinds
    pub const ALL: [ResolverKind; 3] = [
        ResolverKind::Fixed,
        ResolverKind::Current,
        ResolverKind::CurrentMixed,
    ];

    /// Short identifier
    pub const fn id(&self) -> &'static str {
        match self {
            ResolverKind::Fixed => "fixed",
            ResolverKind::Current => "current",
            ResolverKind::CurrentMixed => "current_mixed",
        }
    }

    /// True when this kind reads the context
    pub const fn uses_context(&self) -> bool {
        !matches!(self, ResolverKind::Fixed)
    }
}

impl fmt::Display for ResolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// What a default function can see
pub(crate) struct Scope<'a> {
    pub context: &'a Context,
    pub config: &'a ModelConfig,
}

/// Names for a missing level, or `None` to leave it relative
pub(crate) type DefaultFn = fn(&Scope<'_>, EntityType) -> Option<Vec<String>>;

/// Strategy table for `kind`, indexed by `EntityType::index`
pub(crate) fn table(kind: ResolverKind) -> [DefaultFn; EntityType::COUNT] {
    EntityType::ALL.map(|entity_type| strategy(kind, entity_type))
}

fn strategy(kind: ResolverKind, entity_type: EntityType) -> DefaultFn {
    match (kind, entity_type) {
        (ResolverKind::Fixed, _) => fixed,
        (ResolverKind::Current, _) => from_context,
        (ResolverKind::CurrentMixed, EntityType::Tenant) => ambient_tenant,
        (ResolverKind::CurrentMixed, EntityType::Document) => system_default,
        (ResolverKind::CurrentMixed, _) => from_context,
    }
}

fn fixed(scope: &Scope<'_>, entity_type: EntityType) -> Option<Vec<String>> {
    scope
        .config
        .fixed
        .get(entity_type)
        .map(|name| vec![name.to_string()])
}

fn system_default(scope: &Scope<'_>, entity_type: EntityType) -> Option<Vec<String>> {
    Some(vec![scope.config.defaults.get(entity_type).to_string()])
}

fn from_context(scope: &Scope<'_>, entity_type: EntityType) -> Option<Vec<String>> {
    let names: Vec<String> = scope
        .context
        .segment_names(entity_type)
        .into_iter()
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        system_default(scope, entity_type)
    } else {
        Some(names)
    }
}

fn ambient_tenant(scope: &Scope<'_>, entity_type: EntityType) -> Option<Vec<String>> {
    match scope.context.current_tenant() {
        Some(tenant) => Some(vec![tenant.name().to_string()]),
        None => system_default(scope, entity_type),
    }
}
