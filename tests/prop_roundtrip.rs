//! Property-based round-trip tests.
//!
//! Generates random documents and checks `parse(encode(doc)) == doc` for
//! the pretty and compact presets.
//!
//! Generation is bounded by the format's escape design:
//! - String values and keys stick to printable characters: raw control
//!   bytes serialize as escape text and deliberately re-parse as that text.
//! - Typed literal bodies avoid `"` and `\`, which emit verbatim.
//! - Floats are finite; NaN and the infinities have no source form.
//! - Compact documents carry a single root: top-level scalars have no
//!   separator in compact output.

use indexmap::IndexMap;
use libxcdn::{parse, to_string_compact, to_string_pretty, Annotation, Document, Node, Value};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// Tag, annotation, and directive names: identifiers that are not keywords.
fn arb_name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_-]{0,8}"
        .prop_filter("keywords are reserved", |s| {
            !matches!(s.as_str(), "true" | "false" | "null")
        })
}

/// Object keys: any printable ASCII; the serializer quotes what it must.
fn arb_key() -> impl Strategy<Value = String> {
    "[ -~]{0,12}"
}

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::Int),
        any::<f64>()
            .prop_filter("finite floats only", |f| f.is_finite())
            .prop_map(Value::Float),
        "[ -~]{0,16}".prop_map(Value::String),
        prop::collection::vec(any::<u8>(), 0..32).prop_map(Value::Bytes),
        "[0-9][0-9.eE+-]{0,10}".prop_map(Value::Decimal),
        "[0-9TZ:. -]{0,16}".prop_map(Value::DateTime),
        "[PTDHMS0-9.]{0,12}".prop_map(Value::Duration),
        "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}".prop_map(Value::Uuid),
    ]
}

fn arb_annotation() -> impl Strategy<Value = Annotation> {
    (arb_name(), prop::collection::vec(arb_scalar(), 0..3)).prop_map(|(name, args)| {
        let mut annotation = Annotation::new(name);
        for arg in args {
            annotation.push_arg(arg);
        }
        annotation
    })
}

fn arb_node_with(value: impl Strategy<Value = Value>) -> impl Strategy<Value = Node> {
    (
        prop::collection::vec(arb_name(), 0..3),
        prop::collection::vec(arb_annotation(), 0..2),
        value,
    )
        .prop_map(|(tags, annotations, value)| Node {
            tags,
            annotations,
            value,
        })
}

fn arb_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 5, |inner| {
        prop_oneof![
            prop::collection::vec(arb_node_with(inner.clone()), 0..5).prop_map(Value::Array),
            prop::collection::vec((arb_key(), arb_node_with(inner)), 0..5).prop_map(|entries| {
                let mut map = IndexMap::new();
                for (key, node) in entries {
                    map.insert(key, node);
                }
                Value::Object(map)
            }),
        ]
    })
}

fn arb_document(max_values: usize) -> impl Strategy<Value = Document> {
    (
        prop::collection::vec((arb_name(), arb_scalar()), 0..3),
        prop::collection::vec(arb_node_with(arb_value()), 0..=max_values),
    )
        .prop_map(|(prolog, values)| {
            let mut doc = Document::new();
            for (name, value) in prolog {
                doc.push_directive(name, value);
            }
            for node in values {
                doc.push_value(node);
            }
            doc
        })
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn prop_pretty_roundtrip(doc in arb_document(3)) {
        let text = to_string_pretty(&doc);
        let reparsed = parse(&text).unwrap_or_else(|e| {
            panic!("failed to reparse pretty output: {}\n{}", e, text)
        });
        prop_assert_eq!(reparsed, doc);
    }

    #[test]
    fn prop_compact_roundtrip(doc in arb_document(1)) {
        let text = to_string_compact(&doc);
        let reparsed = parse(&text).unwrap_or_else(|e| {
            panic!("failed to reparse compact output: {}\n{}", e, text)
        });
        prop_assert_eq!(reparsed, doc);
    }

    #[test]
    fn prop_bytes_roundtrip_byte_exact(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let mut doc = Document::new();
        doc.push_value(Node::new(Value::Bytes(data.clone())));
        let reparsed = parse(&to_string_pretty(&doc)).unwrap();
        prop_assert_eq!(reparsed.values[0].value.as_bytes(), Some(data.as_slice()));
    }

    #[test]
    fn prop_parse_never_panics(input in "[ -~\n\t]{0,64}") {
        // Arbitrary printable input either parses or errors, never panics.
        let _ = parse(&input);
    }

    #[test]
    fn prop_object_keys_unique(doc in arb_document(2)) {
        fn check(value: &Value) {
            match value {
                Value::Object(entries) => {
                    // IndexMap can't hold duplicates; spot-check by index.
                    for (i, key) in entries.keys().enumerate() {
                        assert_eq!(entries.get_index_of(key), Some(i));
                    }
                    for node in entries.values() {
                        check(&node.value);
                    }
                }
                Value::Array(items) => {
                    for node in items {
                        check(&node.value);
                    }
                }
                _ => {}
            }
        }
        for node in &doc.values {
            check(&node.value);
        }
    }
}
