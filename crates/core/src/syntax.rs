//! Reference string syntax: tokenizing and escaping
//!
//! A serialized reference is a sequence of names joined by separators that
//! depend on the boundary between two types:
//!
//! | Boundary (child under parent) | Separator |
//! |-------------------------------|-----------|
//! | Container under Tenant | `:` |
//! | Container under Container | `.` |
//! | Document under Container | `.` |
//! | Attachment under Document | `@` |
//! | Object under Document | `^` |
//! | ObjectProperty under Object | `.` |
//!
//! `\` is the escape character: it makes the following character literal,
//! whatever it is.
//!
//! ## Splitting
//!
//! [`split`] resolves escapes left to right, then binds boundaries from the
//! leaf end. For the type being parsed it looks for the last unescaped
//! separator that can introduce that type; the text after it is the token,
//! and parsing continues with the parent type the separator implies. Once no
//! separator is left, the remaining text is the current type's token.
//!
//! Separators belonging to other levels are therefore literal inside a name:
//!
//! ```
//! use wikiref_core::{syntax, EntityType};
//!
//! let tokens = syntax::split("wiki:spa^ce.page^Object", EntityType::Object).unwrap();
//! let names: Vec<&str> = tokens.iter().map(|t| t.name.as_str()).collect();
//! assert_eq!(names, vec!["wiki", "spa^ce", "page", "Object"]);
//! ```
//!
//! ## Empty tokens
//!
//! A separator followed by nothing yields an empty token. Tokens keep the
//! distinction between "empty" and "absent" (no token at all); resolvers
//! treat both the same way.

use crate::entity_type::EntityType;
use crate::error::{Error, Result};
use crate::reference::MAX_CHAIN_DEPTH;
use serde::{Deserialize, Serialize};

/// The escape character
pub const ESCAPE: char = '\\';

/// Separator written between a `parent` segment and a `child` segment
pub const fn separator(child: EntityType, parent: EntityType) -> char {
    match (child, parent) {
        (EntityType::Container, EntityType::Tenant) => ':',
        (EntityType::Attachment, _) => '@',
        (EntityType::Object, _) => '^',
        _ => '.',
    }
}

/// Separators that may introduce a name of type `entity_type`
///
/// These are also the characters (besides [`ESCAPE`]) that must be escaped
/// inside such a name.
pub const fn leading_separators(entity_type: EntityType) -> &'static [char] {
    match entity_type {
        EntityType::Tenant => &[],
        EntityType::Container => &['.', ':'],
        EntityType::Document => &['.'],
        EntityType::Attachment => &['@'],
        EntityType::Object => &['^'],
        EntityType::ObjectProperty => &['.'],
    }
}

/// Parent type implied by finding `separator` in front of a `child` name
fn parent_for(child: EntityType, separator: char) -> Option<EntityType> {
    match (child, separator) {
        (EntityType::Container, ':') => Some(EntityType::Tenant),
        (EntityType::Container, _) => Some(EntityType::Container),
        _ => child.parent_type(),
    }
}

/// One raw, unescaped segment of a reference string
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Type inferred from the separator position
    pub entity_type: EntityType,
    /// Unescaped name; may be empty
    pub name: String,
}

impl Token {
    /// Create a token
    pub fn new(entity_type: EntityType, name: impl Into<String>) -> Self {
        Token {
            entity_type,
            name: name.into(),
        }
    }

    /// True when the separator was present but no name followed
    pub fn is_empty(&self) -> bool {
        self.name.is_empty()
    }

    fn from_units(entity_type: EntityType, units: &[Unit]) -> Self {
        Token {
            entity_type,
            name: units.iter().map(|u| u.ch).collect(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Unit {
    ch: char,
    escaped: bool,
}

/// Resolve escapes, remembering which characters were escaped
fn scan(input: &str) -> Result<Vec<Unit>> {
    let mut units = Vec::with_capacity(input.len());
    let mut chars = input.chars().enumerate();
    while let Some((position, ch)) = chars.next() {
        if ch != ESCAPE {
            units.push(Unit { ch, escaped: false });
            continue;
        }
        match chars.next() {
            Some((_, literal)) => units.push(Unit {
                ch: literal,
                escaped: true,
            }),
            None => {
                return Err(Error::MalformedInput {
                    input: input.to_string(),
                    position,
                })
            }
        }
    }
    Ok(units)
}

/// Split `input` into typed tokens, root first, the last one being `target`
///
/// # Errors
///
/// Returns `Error::MalformedInput` if the input ends with a dangling escape,
/// or `Error::ChainTooDeep` if it holds more than [`MAX_CHAIN_DEPTH`] tokens.
pub fn split(input: &str, target: EntityType) -> Result<Vec<Token>> {
    let units = scan(input)?;
    let mut tokens = Vec::new();
    let mut end = units.len();
    let mut current = target;

    loop {
        let separators = leading_separators(current);
        let boundary = units[..end]
            .iter()
            .rposition(|u| !u.escaped && separators.contains(&u.ch))
            .and_then(|at| parent_for(current, units[at].ch).map(|parent| (at, parent)));

        match boundary {
            Some((at, parent)) => {
                tokens.push(Token::from_units(current, &units[at + 1..end]));
                if tokens.len() >= MAX_CHAIN_DEPTH {
                    return Err(Error::ChainTooDeep {
                        depth: tokens.len() + 1,
                        max: MAX_CHAIN_DEPTH,
                    });
                }
                current = parent;
                end = at;
            }
            None => {
                tokens.push(Token::from_units(current, &units[..end]));
                break;
            }
        }
    }

    tokens.reverse();
    Ok(tokens)
}

/// Escape a name of type `entity_type` for embedding in a reference string
pub fn escape(name: &str, entity_type: EntityType) -> String {
    let separators = leading_separators(entity_type);
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch == ESCAPE || separators.contains(&ch) {
            out.push(ESCAPE);
        }
        out.push(ch);
    }
    out
}

/// Join tokens (root first) into a reference string, escaping each name
pub fn join(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut previous: Option<EntityType> = None;
    for token in tokens {
        if let Some(parent) = previous {
            out.push(separator(token.entity_type, parent));
        }
        out.push_str(&escape(&token.name, token.entity_type));
        previous = Some(token.entity_type);
    }
    out
}

// ============================================================================
// Tests
// ============================================================================
