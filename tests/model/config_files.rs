//! Resolvers built from `wikiref.toml`.

use crate::common::*;
use tempfile::TempDir;
use wikiref::{ConfigError, CONFIG_FILE_NAME};

#[test]
fn resolver_uses_configured_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(
        &path,
        "[defaults]\ntenant = \"corp\"\ncontainer = \"Home\"\n",
    )
    .unwrap();

    let config = ModelConfig::from_file(&path).unwrap();
    let resolver = ReferenceResolver::current(config);
    let resolved = resolver
        .resolve("Budget", EntityType::Document, &Context::new())
        .unwrap();
    assert_eq!(resolved.to_string(), "corp:Home.Budget");
}

#[test]
fn default_file_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    ModelConfig::write_default_if_missing(&path).unwrap();
    assert_eq!(ModelConfig::from_file(&path).unwrap(), ModelConfig::default());
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[defaults\n").unwrap();
    let err = ModelConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(CONFIG_FILE_NAME));
}
