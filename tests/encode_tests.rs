//! Serializer tests: document model in, text out, and back again.

use indexmap::IndexMap;
use libxcdn::{encode, parse, to_string_compact, to_string_pretty, Annotation, Document, Format, Node, Value};

#[test]
fn test_pretty_layout() {
    let doc = parse("{ a: 1, b: [2, 3] }").unwrap();
    assert_eq!(
        to_string_pretty(&doc),
        "{\n  a: 1,\n  b: [\n    2,\n    3,\n  ],\n}"
    );
}

#[test]
fn test_compact_layout() {
    let doc = parse("{ a: 1, b: [2, 3] }").unwrap();
    assert_eq!(to_string_compact(&doc), "{a: 1, b: [2, 3]}");
}

#[test]
fn test_compact_has_no_newlines() {
    let doc = parse("{ a: 1, b: [2, 3], c: { d: true } }").unwrap();
    assert!(!to_string_compact(&doc).contains('\n'));
}

#[test]
fn test_no_trailing_commas() {
    let doc = parse("{ a: 1, b: 2, }").unwrap();
    let format = Format {
        pretty: true,
        indent: 2,
        trailing_commas: false,
    };
    let out = encode(&doc, format);
    // Separator commas stay; the last entry loses its comma.
    assert_eq!(out, "{\n  a: 1,\n  b: 2\n}");
}

#[test]
fn test_custom_indent() {
    let doc = parse("{ a: [1] }").unwrap();
    let format = Format {
        pretty: true,
        indent: 4,
        trailing_commas: true,
    };
    assert_eq!(encode(&doc, format), "{\n    a: [\n        1,\n    ],\n}");
}

#[test]
fn test_prolog_emission() {
    let doc = parse("$schema: \"https://example.com\",\n$version: 2,\n{ a: 1 }").unwrap();
    let out = to_string_pretty(&doc);
    assert!(out.starts_with("$schema: \"https://example.com\",\n"));
    assert!(out.contains("$version: 2,\n"));

    let compact = to_string_compact(&doc);
    assert!(compact.contains("$schema: \"https://example.com\"\n"));
    assert!(compact.contains("$version: 2\n"));
}

#[test]
fn test_all_types_emission() {
    let doc = parse(
        "{ n: null, b: true, i: 42, f: 3.14, s: \"hello\", d: d\"19.99\", \
         bytes: b\"aGVsbG8=\", dt: t\"2025-01-15T10:30:00Z\", dur: r\"PT30S\", \
         uuid: u\"550e8400-e29b-41d4-a716-446655440000\" }",
    )
    .unwrap();
    let out = to_string_pretty(&doc);

    assert!(out.contains("n: null"));
    assert!(out.contains("b: true"));
    assert!(out.contains("i: 42"));
    assert!(out.contains("f: 3.14"));
    assert!(out.contains("s: \"hello\""));
    assert!(out.contains("d: d\"19.99\""));
    assert!(out.contains("bytes: b\"aGVsbG8=\""));
    assert!(out.contains("dt: t\"2025-01-15T10:30:00Z\""));
    assert!(out.contains("dur: r\"PT30S\""));
    assert!(out.contains("uuid: u\"550e8400-e29b-41d4-a716-446655440000\""));
}

#[test]
fn test_string_escaping() {
    let mut doc = Document::new();
    let mut entries = IndexMap::new();
    entries.insert("nl".to_string(), Node::new(Value::String("a\nb".into())));
    entries.insert("tab".to_string(), Node::new(Value::String("a\tb".into())));
    entries.insert("quote".to_string(), Node::new(Value::String("say \"hi\"".into())));
    entries.insert("slash".to_string(), Node::new(Value::String("a\\b".into())));
    entries.insert("ctl".to_string(), Node::new(Value::String("\u{1}".into())));
    doc.push_value(Node::new(Value::Object(entries)));

    let out = to_string_pretty(&doc);
    assert!(out.contains("nl: \"a\\nb\""));
    assert!(out.contains("tab: \"a\\tb\""));
    assert!(out.contains("quote: \"say \\\"hi\\\"\""));
    assert!(out.contains("slash: \"a\\\\b\""));
    assert!(out.contains("ctl: \"\\u0001\""));
}

#[test]
fn test_key_quoting() {
    let doc = parse("{ simple_key-1: 1, \"key name\": 2, \"true\": 3 }").unwrap();
    let out = to_string_pretty(&doc);

    assert!(out.contains("simple_key-1: 1"));
    assert!(out.contains("\"key name\": 2"));
    // Keywords are reserved and must stay quoted.
    assert!(out.contains("\"true\": 3"));

    assert_eq!(parse(&out).unwrap(), doc);
}

#[test]
fn test_decoration_emission() {
    let doc = parse("@mime(\"image/png\") #thumbnail b\"aGVsbG8=\"").unwrap();
    assert_eq!(
        to_string_pretty(&doc),
        "@mime(\"image/png\") #thumbnail b\"aGVsbG8=\""
    );
}

#[test]
fn test_empty_annotation_args_drop_parens() {
    let doc = parse("@checked() 1").unwrap();
    assert_eq!(to_string_pretty(&doc), "@checked 1");
    assert_eq!(parse("@checked 1").unwrap(), doc);
}

#[test]
fn test_annotation_args_stay_compact_in_pretty_output() {
    let mut annotation = Annotation::new("cfg");
    let mut arg = IndexMap::new();
    arg.insert("a".to_string(), Node::new(Value::Int(1)));
    arg.insert("b".to_string(), Node::new(Value::Int(2)));
    annotation.push_arg(Value::Object(arg));
    annotation.push_arg(Value::Int(9));

    let mut node = Node::new(Value::Null);
    node.add_annotation(annotation);
    let mut doc = Document::new();
    doc.push_value(node);

    assert_eq!(to_string_pretty(&doc), "@cfg({a: 1, b: 2}, 9) null");
}

#[test]
fn test_empty_containers() {
    let doc = parse("{ a: {}, b: [] }").unwrap();
    assert_eq!(to_string_compact(&doc), "{a: {}, b: []}");
    assert_eq!(to_string_pretty(&doc), "{\n  a: {},\n  b: [],\n}");
}

#[test]
fn test_float_emission() {
    let mut doc = Document::new();
    doc.push_value(Node::new(Value::Float(3.0)));
    // Whole floats keep a fraction so they re-lex as floats.
    assert_eq!(to_string_pretty(&doc), "3.0");

    let mut doc = Document::new();
    doc.push_value(Node::new(Value::Float(-0.0)));
    assert_eq!(to_string_pretty(&doc), "-0.0");

    let doc = parse("1e10").unwrap();
    let out = to_string_pretty(&doc);
    assert_eq!(parse(&out).unwrap(), doc);
}

#[test]
fn test_bytes_emission() {
    let mut doc = Document::new();
    doc.push_value(Node::new(Value::Bytes(b"hello".to_vec())));
    assert_eq!(to_string_pretty(&doc), "b\"aGVsbG8=\"");

    let mut doc = Document::new();
    doc.push_value(Node::new(Value::Bytes(Vec::new())));
    assert_eq!(to_string_pretty(&doc), "b\"\"");

    // Padding variants: one and two filler bytes.
    let mut doc = Document::new();
    doc.push_value(Node::new(Value::Bytes(b"hi".to_vec())));
    assert_eq!(to_string_pretty(&doc), "b\"aGk=\"");
}

#[test]
fn test_stream_separation() {
    let doc = parse("{ a: 1 }\n42").unwrap();
    assert_eq!(to_string_pretty(&doc), "{\n  a: 1,\n}\n\n42");
    assert_eq!(parse(&to_string_pretty(&doc)).unwrap(), doc);

    // Compact output still re-parses: the brace delimits the stream.
    assert_eq!(to_string_compact(&doc), "{a: 1}42");
    assert_eq!(parse(&to_string_compact(&doc)).unwrap(), doc);
}

#[test]
fn test_prolog_blank_line_between_directives() {
    let doc = parse("$a: 1, $b: 2").unwrap();
    assert_eq!(to_string_pretty(&doc), "$a: 1,\n\n$b: 2,\n");
    assert_eq!(to_string_compact(&doc), "$a: 1\n$b: 2\n");
    assert_eq!(parse(&to_string_pretty(&doc)).unwrap(), doc);
}

#[test]
fn test_compact_with_trailing_commas() {
    let doc = parse("{ a: [1, 2] }").unwrap();
    let format = Format {
        pretty: false,
        indent: 0,
        trailing_commas: true,
    };
    assert_eq!(encode(&doc, format), "{a: [1, 2,],}");
    assert_eq!(parse(&encode(&doc, format)).unwrap(), doc);
}

#[test]
fn test_key_with_embedded_quote() {
    let doc = parse(r#"{ "a\"b": 1 }"#).unwrap();
    let out = to_string_pretty(&doc);
    assert!(out.contains("\"a\\\"b\": 1"));
    assert_eq!(parse(&out).unwrap(), doc);
}

#[test]
fn test_roundtrip_full_document() {
    let doc = parse(
        "$schema: \"https://gslf.github.io/xCDN/schemas/v1/meta.xcdn\",\n\
         server_config: {\n\
         \x20 host: \"localhost\",\n\
         \x20 ports: [8080, 9090,],\n\
         \x20 timeout: r\"PT30S\",\n\
         \x20 max_cost: d\"19.99\",\n\
         \x20 admin: #user { id: u\"550e8400-e29b-41d4-a716-446655440000\", role: \"super\" },\n\
         \x20 icon: @mime(\"image/png\") b\"aGVsbG8=\",\n\
         }",
    )
    .unwrap();

    let pretty = to_string_pretty(&doc);
    assert_eq!(parse(&pretty).unwrap(), doc);

    let compact = to_string_compact(&doc);
    assert_eq!(parse(&compact).unwrap(), doc);

    // Pretty output is the multi-line rendering.
    assert!(pretty.matches('\n').count() > compact.matches('\n').count());
}

#[test]
fn test_roundtrip_typed_bodies_verbatim() {
    let doc = parse("{ d: d\"1e-9999\", t: t\"whenever\", r: r\"not-iso\" }").unwrap();
    let out = to_string_pretty(&doc);
    assert!(out.contains("d\"1e-9999\""));
    assert!(out.contains("t\"whenever\""));
    assert!(out.contains("r\"not-iso\""));
    assert_eq!(parse(&out).unwrap(), doc);
}

#[test]
fn test_roundtrip_escape_text() {
    let doc = parse(r#"{ a: "tab\there", b: "u\u0041" }"#).unwrap();
    let out = to_string_pretty(&doc);
    assert_eq!(parse(&out).unwrap(), doc);
}

#[test]
fn test_roundtrip_implicit_object() {
    let doc = parse("name: \"xcdn\",\nnested: { flag: true },").unwrap();
    // The implicit object serializes with explicit braces and stays equal.
    let out = to_string_pretty(&doc);
    assert!(out.starts_with('{'));
    assert_eq!(parse(&out).unwrap(), doc);
}

#[test]
fn test_programmatic_document() {
    let mut entries = IndexMap::new();
    entries.insert("name".to_string(), Node::new(Value::from("Alice")));
    entries.insert("age".to_string(), Node::new(Value::Int(30)));

    let mut root = Node::new(Value::Object(entries));
    root.add_tag("person");

    let mut doc = Document::new();
    doc.push_directive("version", Value::Int(1));
    doc.push_value(root);

    let out = to_string_pretty(&doc);
    assert!(out.contains("$version: 1"));
    assert!(out.contains("#person"));
    assert!(out.contains("name: \"Alice\""));
    assert_eq!(parse(&out).unwrap(), doc);
}
