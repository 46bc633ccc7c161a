//! String and reference resolution
//!
//! Resolving turns a possibly partial reference into one whose chain covers
//! every level of the target type's canonical chain:
//!
//! 1. Split the input into typed tokens
//! 2. Group the tokens by level (all containers form one level)
//! 3. Walk the levels root to leaf, filling each absent level from the
//!    resolver's default function for that type
//!
//! The leaf is never defaulted. Empty tokens count as absent, so `".Budget"`
//! and `"Budget"` resolve the same way. When a default function withholds a
//! level, the result stays relative at that point, unless a more general
//! level was already placed above it, in which case there is no valid chain
//! and resolution fails.

use crate::config::ModelConfig;
use crate::context::{Context, ContextProvider};
use crate::defaults::{self, DefaultFn, ResolverKind, Scope};
use tracing::trace;
use wikiref_core::syntax::{self, Token};
use wikiref_core::{EntityReference, EntityType, Error, Result};

/// One level of the canonical chain with the names supplied for it
#[derive(Debug)]
struct Level {
    entity_type: EntityType,
    names: Vec<String>,
}

/// Resolver for reference strings and partial references
///
/// Stateless apart from its configuration; share it freely between threads.
#[derive(Debug, Clone)]
pub struct ReferenceResolver {
    kind: ResolverKind,
    config: ModelConfig,
    table: [DefaultFn; EntityType::COUNT],
}

impl ReferenceResolver {
    /// Create a resolver of `kind`
    pub fn new(kind: ResolverKind, config: ModelConfig) -> Self {
        ReferenceResolver {
            kind,
            config,
            table: defaults::table(kind),
        }
    }

    /// Resolver that fills missing levels from configured constants
    pub fn fixed(config: ModelConfig) -> Self {
        Self::new(ResolverKind::Fixed, config)
    }

    /// Resolver that fills missing levels from the current context
    pub fn current(config: ModelConfig) -> Self {
        Self::new(ResolverKind::Current, config)
    }

    /// Context resolver using the ambient tenant and default document
    pub fn current_mixed(config: ModelConfig) -> Self {
        Self::new(ResolverKind::CurrentMixed, config)
    }

    /// Resolve a reference string as `target`
    ///
    /// # Errors
    ///
    /// - `Error::MalformedInput` if the input ends with a dangling escape
    /// - `Error::UnresolvableReference` if the leaf is empty, a container
    ///   path mixes empty and named segments, or a withheld level sits below
    ///   a placed one
    ///
    /// # Example
    ///
    /// ```
    /// use wikiref_core::{EntityReference, EntityType};
    /// use wikiref_resolver::{Context, ModelConfig, ReferenceResolver};
    ///
    /// let home = EntityReference::from_segments([
    ///     (EntityType::Tenant, "acme"),
    ///     (EntityType::Container, "Sales"),
    ///     (EntityType::Document, "Home"),
    /// ])
    /// .unwrap();
    /// let resolver = ReferenceResolver::current(ModelConfig::default());
    /// let budget = resolver
    ///     .resolve("Budget", EntityType::Document, &Context::for_document(home))
    ///     .unwrap();
    /// assert_eq!(budget.to_string(), "acme:Sales.Budget");
    /// ```
    pub fn resolve(
        &self,
        input: &str,
        target: EntityType,
        context: &dyn ContextProvider,
    ) -> Result<EntityReference> {
        let context = self.snapshot(context);
        let tokens = syntax::split(input, target)?;
        let levels = group(input, target, tokens)?;

        trace!(
            target: "wikiref::resolve",
            kind = %self.kind,
            input,
            entity_type = %target,
            "resolving reference string"
        );

        self.fill(input, target, levels, &context)?
            .ok_or_else(|| Error::unresolvable(input, target, target))
    }

    /// Complete a partial reference so its chain covers the canonical chain
    ///
    /// Only levels above the reference's root are defaulted; the existing
    /// segments are kept as they are.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnresolvableReference` if a withheld level sits below
    /// a placed one.
    pub fn resolve_reference(
        &self,
        reference: &EntityReference,
        context: &dyn ContextProvider,
    ) -> Result<EntityReference> {
        let root_type = reference.root().entity_type();
        if root_type == EntityType::Tenant {
            return Ok(reference.clone());
        }

        let context = self.snapshot(context);
        let target = reference.entity_type();
        let input = reference.to_string();
        let levels: Vec<Level> = target
            .canonical_chain()
            .into_iter()
            .take_while(|t| *t != root_type)
            .map(|entity_type| Level {
                entity_type,
                names: Vec::new(),
            })
            .collect();

        match self.fill(&input, target, levels, &context)? {
            Some(prefix) => reference.append_parent(prefix),
            None => Ok(reference.clone()),
        }
    }

    /// Take the context snapshot, or an empty one for kinds that ignore it
    fn snapshot(&self, provider: &dyn ContextProvider) -> Context {
        if self.kind.uses_context() {
            Context::capture(provider)
        } else {
            Context::new()
        }
    }

    /// Build the chain for `levels`, defaulting the empty ones
    fn fill(
        &self,
        input: &str,
        target: EntityType,
        levels: Vec<Level>,
        context: &Context,
    ) -> Result<Option<EntityReference>> {
        let scope = Scope {
            context,
            config: &self.config,
        };
        let mut current: Option<EntityReference> = None;

        for level in levels {
            let names = if level.names.is_empty() {
                match (self.table[level.entity_type.index()])(&scope, level.entity_type) {
                    Some(names) => {
                        trace!(
                            target: "wikiref::resolve",
                            kind = %self.kind,
                            entity_type = %level.entity_type,
                            names = ?names,
                            "filled missing level from default"
                        );
                        names
                    }
                    None if current.is_some() => {
                        return Err(Error::unresolvable(input, target, level.entity_type));
                    }
                    None => {
                        trace!(
                            target: "wikiref::resolve",
                            kind = %self.kind,
                            entity_type = %level.entity_type,
                            "level left relative"
                        );
                        continue;
                    }
                }
            } else {
                level.names
            };

            for name in names {
                current = Some(match current {
                    Some(parent) => parent.child(name, level.entity_type)?,
                    None => EntityReference::new(name, level.entity_type)?,
                });
            }
        }

        Ok(current)
    }
}

/// Assign tokens to the levels of `target`'s canonical chain
///
/// A level whose tokens are all empty is absent. The leaf level must end
/// with a named token.
fn group(input: &str, target: EntityType, tokens: Vec<Token>) -> Result<Vec<Level>> {
    let mut levels: Vec<Level> = target
        .canonical_chain()
        .into_iter()
        .map(|entity_type| Level {
            entity_type,
            names: Vec::new(),
        })
        .collect();

    for token in tokens {
        if let Some(level) = levels
            .iter_mut()
            .find(|l| l.entity_type == token.entity_type)
        {
            level.names.push(token.name);
        }
    }

    let leaf_named = levels
        .last()
        .and_then(|leaf| leaf.names.last())
        .is_some_and(|name| !name.is_empty());
    if !leaf_named {
        return Err(Error::unresolvable(input, target, target));
    }

    for level in &mut levels {
        if level.names.iter().all(String::is_empty) {
            level.names.clear();
        } else if level.names.iter().any(String::is_empty) {
            return Err(Error::unresolvable(input, target, level.entity_type));
        }
    }

    Ok(levels)
}

// ============================================================================
// Tests
// ============================================================================
