//! Parse an xCDN document, then print its pretty and compact renderings.

use libxcdn::{parse, to_string_compact, to_string_pretty};

fn main() {
    let input = "$schema: \"https://gslf.github.io/xCDN/schemas/v1/meta.xcdn\",\n\
                 \n\
                 config: {\n\
                 \x20 name: \"demo\",\n\
                 \x20 ids: [1, 2, 3,],\n\
                 \x20 timeout: r\"PT30S\",\n\
                 \x20 id: u\"550e8400-e29b-41d4-a716-446655440000\",\n\
                 \x20 created_at: t\"2025-12-07T10:00:00Z\",\n\
                 \x20 payload: b\"aGVsbG8=\",\n\
                 }";

    let doc = match parse(input) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!(
                "Parse error: {} at line {}, col {}",
                e.message, e.span.line, e.span.column
            );
            std::process::exit(1);
        }
    };

    println!("=== Pretty ===\n{}", to_string_pretty(&doc));
    println!("\n=== Compact ===\n{}", to_string_compact(&doc));

    // The rendering parses back to an equal document.
    assert_eq!(parse(&to_string_pretty(&doc)).unwrap(), doc);
    assert_eq!(parse(&to_string_compact(&doc)).unwrap(), doc);
}
