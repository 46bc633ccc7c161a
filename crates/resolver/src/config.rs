//! Resolver configuration via `wikiref.toml`
//!
//! Two tables of default names:
//! - `[defaults]`: system-wide defaults, used by the context-relative
//!   resolvers when the context has nothing for a type
//! - `[fixed]`: the defaults of the fixed resolver; a missing key means
//!   "leave that level relative"

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use wikiref_core::EntityType;

/// Config file name used by hosts that keep one next to their data.
pub const CONFIG_FILE_NAME: &str = "wikiref.toml";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read
    #[error("failed to read config file '{path}': {source}")]
    Read {
        /// File being read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid TOML for this schema
    #[error("failed to parse config '{origin}': {message}")]
    Parse {
        /// File path, or `<inline>` for string input
        origin: String,
        /// Parser message
        message: String,
    },

    /// The file could not be written
    #[error("failed to write config file '{path}': {message}")]
    Write {
        /// File being written
        path: PathBuf,
        /// Serializer or I/O message
        message: String,
    },

    /// A default name is empty
    #[error("invalid value for {table}.{key}: default names cannot be empty")]
    InvalidValue {
        /// `defaults` or `fixed`
        table: &'static str,
        /// Entity type id
        key: &'static str,
    },
}

// ============================================================================
// Default name tables
// ============================================================================

/// System-wide default names, one per entity type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DefaultNames {
    /// Default tenant
    pub tenant: String,
    /// Default container
    pub container: String,
    /// Default document
    pub document: String,
    /// Default attachment
    pub attachment: String,
    /// Default object
    pub object: String,
    /// Default object property
    pub object_property: String,
}

impl Default for DefaultNames {
    fn default() -> Self {
        Self {
            tenant: "xwiki".to_string(),
            container: "Main".to_string(),
            document: "WebHome".to_string(),
            attachment: "filename".to_string(),
            object: "object".to_string(),
            object_property: "property".to_string(),
        }
    }
}

impl DefaultNames {
    /// Default name for `entity_type`
    pub fn get(&self, entity_type: EntityType) -> &str {
        match entity_type {
            EntityType::Tenant => &self.tenant,
            EntityType::Container => &self.container,
            EntityType::Document => &self.document,
            EntityType::Attachment => &self.attachment,
            EntityType::Object => &self.object,
            EntityType::ObjectProperty => &self.object_property,
        }
    }
}

/// Defaults of the fixed resolver; `None` leaves the level relative
///
/// `Default` withholds every level, so keys left out of a `[fixed]` table
/// stay relative. A config without a `[fixed]` table gets
/// [`FixedDefaults::standard`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct FixedDefaults {
    /// Fixed tenant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
    /// Fixed container
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    /// Fixed document
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document: Option<String>,
    /// Fixed attachment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
    /// Fixed object
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object: Option<String>,
    /// Fixed object property
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_property: Option<String>,
}

impl FixedDefaults {
    /// Container `XWiki` and document `WebHome`; everything else relative
    pub fn standard() -> Self {
        Self {
            container: Some("XWiki".to_string()),
            document: Some("WebHome".to_string()),
            ..Self::default()
        }
    }

    /// Fixed name for `entity_type`, if one is configured
    pub fn get(&self, entity_type: EntityType) -> Option<&str> {
        let name = match entity_type {
            EntityType::Tenant => &self.tenant,
            EntityType::Container => &self.container,
            EntityType::Document => &self.document,
            EntityType::Attachment => &self.attachment,
            EntityType::Object => &self.object,
            EntityType::ObjectProperty => &self.object_property,
        };
        name.as_deref()
    }
}

// ============================================================================
// ModelConfig
// ============================================================================

/// Resolver configuration loaded from `wikiref.toml`.
///
/// # Example
///
/// ```toml
/// [defaults]
/// tenant = "xwiki"
/// container = "Main"
/// document = "WebHome"
///
/// [fixed]
/// container = "XWiki"
/// document = "WebHome"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// System-wide default names
    pub defaults: DefaultNames,
    /// Defaults of the fixed resolver
    pub fixed: FixedDefaults,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            defaults: DefaultNames::default(),
            fixed: FixedDefaults::standard(),
        }
    }
}

impl ModelConfig {
    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# wikiref resolver configuration
#
# Names used when a reference string omits a segment and the current
# context has nothing for that type.
[defaults]
tenant = "xwiki"
container = "Main"
document = "WebHome"
attachment = "filename"
object = "object"
object_property = "property"

# Defaults of the fixed resolver, which ignores the current context.
# Leave a key out to keep that level relative.
[fixed]
container = "XWiki"
document = "WebHome"
# tenant = "xwiki"
"#
    }

    /// Parse config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or holds an empty name.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Self::parse(content, "<inline>")
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&content, &path.display().to_string())?;
        debug!(target: "wikiref::config", path = %path.display(), "loaded resolver config");
        Ok(config)
    }

    fn parse(content: &str, origin: &str) -> Result<Self, ConfigError> {
        let config: ModelConfig = toml::from_str(content).map_err(|e| ConfigError::Parse {
            origin: origin.to_string(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every configured name is non-empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for t in EntityType::all() {
            if self.defaults.get(*t).is_empty() {
                return Err(ConfigError::InvalidValue {
                    table: "defaults",
                    key: t.id(),
                });
            }
            if self.fixed.get(*t) == Some("") {
                return Err(ConfigError::InvalidValue {
                    table: "fixed",
                    key: t.id(),
                });
            }
        }
        Ok(())
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<(), ConfigError> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| ConfigError::Write {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            debug!(
                target: "wikiref::config",
                path = %path.display(),
                "wrote default resolver config"
            );
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
