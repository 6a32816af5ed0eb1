//! Dict-like operations on xCDN documents.
//!
//! Demonstrates key existence checks, iteration over entries and arrays,
//! and reading tags and annotations.

use libxcdn::parse;

fn main() {
    let input = "config: {\n\
                 \x20 name: \"demo\",\n\
                 \x20 version: \"1.0.0\",\n\
                 \x20 ids: [1, 2, 3],\n\
                 \x20 admin: #user @role(\"superuser\") {\n\
                 \x20   id: u\"550e8400-e29b-41d4-a716-446655440000\",\n\
                 \x20   email: \"admin@example.com\"\n\
                 \x20 },\n\
                 }";

    let doc = match parse(input) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            std::process::exit(1);
        }
    };

    let config = doc
        .get_key("config")
        .and_then(|n| n.value.as_object())
        .expect("config object");

    // Key existence.
    if config.contains_key("name") {
        println!("'name' exists in config");
    }

    // Iteration preserves source order.
    println!("\nConfig keys:");
    for key in config.keys() {
        println!("  - {}", key);
    }

    // Missing keys come back as None.
    println!(
        "\nMissing key: {}",
        if config.get("missing_key").is_some() {
            "found"
        } else {
            "None (not found)"
        }
    );

    // Array iteration.
    if let Some(ids) = config.get("ids").and_then(|n| n.value.as_array()) {
        println!("\nArray length: {}", ids.len());
        for (i, item) in ids.iter().enumerate() {
            println!("  [{}] = {}", i, item.value.as_int().unwrap_or(0));
        }
    }

    // Tags and annotations on the admin node.
    if let Some(admin) = config.get("admin") {
        println!("\nAdmin node:");
        println!("  Tags ({}):", admin.tag_count());
        for tag in &admin.tags {
            println!("    #{}", tag);
        }
        println!(
            "  Has #user tag: {}",
            if admin.has_tag("user") { "yes" } else { "no" }
        );

        println!("  Annotations ({}):", admin.annotation_count());
        if let Some(role) = admin.find_annotation("role") {
            println!("    @{} with {} args", role.name, role.arg_count());
            if let Some(first) = role.arg(0).and_then(|v| v.as_str()) {
                println!("    First arg: {}", first);
            }
        }
    }
}
