//! Resolving strings and partial references against a context.

use crate::common::*;
use wikiref::FixedDefaults;

#[test]
fn document_name_only() {
    let resolved = current_resolver()
        .resolve("Budget", EntityType::Document, &home_context())
        .unwrap();
    assert_eq!(
        resolved,
        reference(&[
            (EntityType::Tenant, "acme"),
            (EntityType::Container, "Sales"),
            (EntityType::Document, "Budget"),
        ])
    );
}

#[test]
fn container_and_document() {
    let resolved = current_resolver()
        .resolve("Marketing.Budget", EntityType::Document, &home_context())
        .unwrap();
    assert_eq!(resolved.to_string(), "acme:Marketing.Budget");
}

#[test]
fn fully_qualified_input_ignores_context() {
    let resolved = current_resolver()
        .resolve("other:Sales.Budget", EntityType::Document, &home_context())
        .unwrap();
    assert_eq!(resolved.to_string(), "other:Sales.Budget");
}

#[test]
fn escaped_separator_stays_in_name() {
    let resolved = current_resolver()
        .resolve("a\\.b", EntityType::Container, &home_context())
        .unwrap();
    assert_eq!(resolved.name(), "a.b");
    assert_eq!(resolved.len(), 2);
}

#[test]
fn empty_string_is_unresolvable() {
    let err = current_resolver()
        .resolve("", EntityType::Document, &home_context())
        .unwrap_err();
    assert!(matches!(err, Error::UnresolvableReference { .. }));
}

#[test]
fn dangling_escape_is_malformed() {
    let err = current_resolver()
        .resolve("Sales.Budget\\", EntityType::Document, &home_context())
        .unwrap_err();
    assert!(matches!(err, Error::MalformedInput { position: 12, .. }));
}

#[test]
fn other_levels_separators_are_literal() {
    let resolved = current_resolver()
        .resolve("wiki:page", EntityType::Document, &home_context())
        .unwrap();
    assert_eq!(resolved.name(), "wiki:page");
    assert_eq!(resolved.to_string(), "acme:Sales.wiki:page");
}

#[test]
fn every_target_type_resolves_to_its_canonical_chain() {
    let resolver = current_resolver();
    let context = home_context();
    for t in EntityType::all() {
        let resolved = resolver.resolve("leaf", *t, &context).unwrap();
        assert_eq!(resolved.entity_type(), *t);
        assert!(resolved.is_absolute(), "{t} should resolve to an absolute chain");
        assert_eq!(resolved.len(), t.canonical_chain().len());
    }
}

#[test]
fn mixed_resolver_tenant_and_document() {
    let resolver = ReferenceResolver::current_mixed(ModelConfig::default());
    let beta = EntityReference::new("beta", EntityType::Tenant).unwrap();
    let context = home_context().with_tenant(beta);

    let doc = resolver.resolve("Budget", EntityType::Document, &context).unwrap();
    assert_eq!(doc.to_string(), "beta:Sales.Budget");

    let attachment = resolver.resolve("a.png", EntityType::Attachment, &context).unwrap();
    assert_eq!(attachment.to_string(), "beta:Sales.WebHome@a.png");
}

#[test]
fn fixed_resolver_with_configured_tenant() {
    let mut config = ModelConfig::default();
    config.fixed = FixedDefaults {
        tenant: Some("main".to_string()),
        ..FixedDefaults::standard()
    };
    let resolver = ReferenceResolver::fixed(config);
    let resolved = resolver
        .resolve("Budget", EntityType::Document, &home_context())
        .unwrap();
    assert_eq!(resolved.to_string(), "main:XWiki.Budget");
}

#[test]
fn resolving_a_resolved_reference_changes_nothing() {
    let resolver = current_resolver();
    let context = home_context();
    for input in ["Budget", "Marketing.Budget", "x:y.z", "A.B.C"] {
        let once = resolver.resolve(input, EntityType::Document, &context).unwrap();
        let twice = resolver.resolve_reference(&once, &context).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn shared_context_across_threads() {
    use std::sync::Arc;

    let resolver = Arc::new(current_resolver());
    let context = Arc::new(home_context());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let resolver = Arc::clone(&resolver);
            let context = Arc::clone(&context);
            std::thread::spawn(move || {
                resolver
                    .resolve(&format!("Doc{i}"), EntityType::Document, &context)
                    .unwrap()
                    .to_string()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("acme:Sales.Doc{i}"));
    }
}
