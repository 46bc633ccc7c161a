//! Property-based tests tying resolution and serialization together.
//!
//! Names are drawn from an alphabet heavy in separators and escapes so the
//! escaping rules are exercised on every run.

use proptest::prelude::*;

use crate::common::*;
use wikiref::syntax;

/// Strategy for name characters, separators included.
fn name_char() -> impl Strategy<Value = char> {
    prop_oneof![
        prop::char::range('a', 'z'),
        prop::char::range('A', 'Z'),
        Just('.'),
        Just(':'),
        Just('@'),
        Just('^'),
        Just('\\'),
        Just(' '),
    ]
}

/// Strategy for non-empty names.
fn name() -> impl Strategy<Value = String> {
    prop::collection::vec(name_char(), 1..8).prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for absolute documents with one to three containers.
fn document() -> impl Strategy<Value = EntityReference> {
    (name(), prop::collection::vec(name(), 1..4), name()).prop_map(
        |(tenant, containers, document)| {
            let mut segments = vec![(EntityType::Tenant, tenant)];
            segments.extend(containers.into_iter().map(|c| (EntityType::Container, c)));
            segments.push((EntityType::Document, document));
            EntityReference::from_segments(segments).unwrap()
        },
    )
}

/// Strategy for absolute references of every type below the tenant.
fn absolute_reference() -> impl Strategy<Value = EntityReference> {
    (document(), 0u8..5, name(), name()).prop_map(|(doc, leaf, a, b)| match leaf {
        0 => doc,
        1 => doc.child(a, EntityType::Attachment).unwrap(),
        2 => doc.child(a, EntityType::Object).unwrap(),
        3 => doc
            .child(a, EntityType::Object)
            .unwrap()
            .child(b, EntityType::ObjectProperty)
            .unwrap(),
        _ => doc.parent().cloned().unwrap(),
    })
}

/// A reference plus a context that is sometimes close to it.
fn reference_and_context() -> impl Strategy<Value = (EntityReference, Context)> {
    (absolute_reference(), document(), 0u8..4).prop_map(|(r, other, mode)| {
        let context = match mode {
            // On the reference's own document
            0 => {
                let doc = match r.extract_ancestor(EntityType::Document) {
                    Some(doc) => doc.clone(),
                    None => r.child("Home", EntityType::Document).unwrap(),
                };
                Context::for_document(doc)
            }
            // Same tenant, elsewhere
            1 => {
                let moved = other
                    .replace_ancestor(other.root(), Some(r.root().clone()))
                    .unwrap();
                Context::for_document(moved)
            }
            2 => Context::for_document(other),
            _ => Context::new(),
        };
        (r, context)
    })
}

proptest! {
    #[test]
    fn compact_output_resolves_back((r, context) in reference_and_context()) {
        let text = ReferenceSerializer::compact().serialize(&r, &context);
        let back = current_resolver().resolve(&text, r.entity_type(), &context).unwrap();
        prop_assert_eq!(back, r);
    }

    #[test]
    fn reserializing_resolved_output_is_stable((r, context) in reference_and_context()) {
        let serializer = ReferenceSerializer::compact();
        let text = serializer.serialize(&r, &context);
        let back = current_resolver().resolve(&text, r.entity_type(), &context).unwrap();
        prop_assert_eq!(serializer.serialize(&back, &context), text);
    }

    #[test]
    fn simple_output_resolves_back_without_context(r in absolute_reference()) {
        let text = ReferenceSerializer::simple().serialize(&r, &Context::new());
        let back = current_resolver().resolve(&text, r.entity_type(), &Context::new()).unwrap();
        prop_assert_eq!(back, r);
    }

    #[test]
    fn compact_output_is_a_suffix_of_the_chain((r, context) in reference_and_context()) {
        let text = ReferenceSerializer::compact().serialize(&r, &context);
        let printed = syntax::split(&text, r.entity_type()).unwrap();
        prop_assert!(r.tokens().ends_with(&printed));
    }

    #[test]
    fn compact_output_always_ends_with_leaf((r, context) in reference_and_context()) {
        let text = ReferenceSerializer::compact().serialize(&r, &context);
        prop_assert!(text.ends_with(&syntax::escape(r.name(), r.entity_type())));
    }

    #[test]
    fn resolution_is_idempotent((r, context) in reference_and_context(), input in name()) {
        let resolver = current_resolver();
        if let Ok(once) = resolver.resolve(&input, r.entity_type(), &context) {
            let twice = resolver.resolve_reference(&once, &context).unwrap();
            prop_assert_eq!(twice, once);
        }
    }

    #[test]
    fn serialization_is_deterministic((r, context) in reference_and_context()) {
        let serializer = ReferenceSerializer::compact();
        prop_assert_eq!(
            serializer.serialize(&r, &context),
            serializer.serialize(&r, &context)
        );
    }

    #[test]
    fn ordering_agrees_with_equality(a in absolute_reference(), b in absolute_reference()) {
        prop_assert_eq!(a.cmp(&b) == std::cmp::Ordering::Equal, a == b);
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
    }

    #[test]
    fn json_round_trip(r in absolute_reference()) {
        let json = serde_json::to_string(&r).unwrap();
        let back: EntityReference = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, r);
    }
}
