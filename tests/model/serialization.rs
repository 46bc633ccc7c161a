//! Serializer kinds and their relation to resolution.

use crate::common::*;

fn budget(tenant: &str, container: &str) -> EntityReference {
    reference(&[
        (EntityType::Tenant, tenant),
        (EntityType::Container, container),
        (EntityType::Document, "Budget"),
    ])
}

#[test]
fn compact_in_same_container() {
    let out = ReferenceSerializer::compact().serialize(&budget("acme", "Sales"), &home_context());
    assert_eq!(out, "Budget");
}

#[test]
fn compact_in_other_container() {
    let out =
        ReferenceSerializer::compact().serialize(&budget("acme", "Marketing"), &home_context());
    assert_eq!(out, "Marketing.Budget");
}

#[test]
fn compact_in_other_tenant_prints_everything_below_it() {
    let out = ReferenceSerializer::compact().serialize(&budget("other", "Sales"), &home_context());
    assert_eq!(out, "other:Sales.Budget");
}

#[test]
fn simple_and_local() {
    let r = budget("acme", "Sales");
    assert_eq!(ReferenceSerializer::simple().serialize(&r, &home_context()), "acme:Sales.Budget");
    assert_eq!(ReferenceSerializer::local().serialize(&r, &home_context()), "Sales.Budget");
    assert_eq!(r.to_string(), "acme:Sales.Budget");
}

#[test]
fn local_output_resolves_back_in_same_tenant() {
    let r = budget("acme", "Marketing");
    let text = ReferenceSerializer::local().serialize(&r, &home_context());
    let back = current_resolver()
        .resolve(&text, EntityType::Document, &home_context())
        .unwrap();
    assert_eq!(back, r);
}

#[test]
fn compact_with_container_context() {
    let sales = reference(&[(EntityType::Tenant, "acme"), (EntityType::Container, "Sales")]);
    let context = Context::new().with_container(sales);
    let out = ReferenceSerializer::compact().serialize(&budget("acme", "Sales"), &context);
    assert_eq!(out, "Budget");
}

#[test]
fn present_but_empty_and_absent_levels_resolve_alike() {
    // References never hold empty names, so a compact string only ever
    // omits a level. Both spellings must land on the same reference.
    let resolver = current_resolver();
    let context = home_context();
    let absent = resolver.resolve("Budget", EntityType::Document, &context).unwrap();
    let empty = resolver.resolve(".Budget", EntityType::Document, &context).unwrap();
    let empty_tenant = resolver.resolve(":.Budget", EntityType::Document, &context).unwrap();
    assert_eq!(absent, empty);
    assert_eq!(absent, empty_tenant);
    assert_eq!(
        ReferenceSerializer::compact().serialize(&absent, &context),
        "Budget"
    );
}
