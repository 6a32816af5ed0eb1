//! Accessing fields in an xCDN document.
//!
//! Demonstrates the accessor API for navigating nested structures.

use libxcdn::parse;

fn main() {
    let input = "config: {\n\
                 \x20 name: \"demo\",\n\
                 \x20 version: \"1.0.0\",\n\
                 \x20 ids: [1, 2, 3],\n\
                 \x20 nested: {\n\
                 \x20   deep: {\n\
                 \x20     value: \"found it!\"\n\
                 \x20   }\n\
                 \x20 }\n\
                 }";

    let doc = match parse(input) {
        Ok(doc) => doc,
        Err(e) => {
            eprintln!("Parse error: {}", e);
            std::process::exit(1);
        }
    };

    // Step-by-step access through the object map.
    if let Some(config) = doc.get_key("config") {
        let config = config.value.as_object().expect("config is an object");

        if let Some(name) = config.get("name").and_then(|n| n.value.as_str()) {
            println!("Name: {}", name);
        }
        if let Some(version) = config.get("version").and_then(|n| n.value.as_str()) {
            println!("Version: {}", version);
        }
        if let Some(ids) = config.get("ids").and_then(|n| n.value.as_array()) {
            if let Some(first) = ids.first().and_then(|n| n.value.as_int()) {
                println!("First ID: {}", first);
            }
        }
    }

    // Deep access with a dot-separated path.
    if let Some(deep) = doc.get_path("config.nested.deep.value") {
        println!("Deep value: {}", deep.value.as_str().unwrap_or("?"));
    }
}
