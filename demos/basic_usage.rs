//! Basic usage example for the ADL parser
//!
//! Parses a small asset description and walks the resulting entry tree.

use adl_parser::{AdlError, parse_str};

fn main() -> Result<(), AdlError> {
    let text = r#"
        # watchtower asset
        name = "Watchtower"
        cost = 120
        buildable = yes
        tags = [defense "Tier 1"]

        body = {
            mesh = "models/watchtower.obj"
            scale = 1.5
        }
    "#;

    let root = parse_str(text)?;

    println!("name: {:?}", root.get_str("name"));
    println!("cost: {:?}", root.get_number("cost"));
    println!("buildable: {:?}", root.get_boolean("buildable"));

    if let Some(tags) = root.get_list("tags") {
        println!("tags: {}", tags.join(", "));
    }

    for sub in root.subentries() {
        println!(
            "sub-entry '{}' with {} keys",
            sub.type_name().unwrap_or("?"),
            sub.len()
        );
    }

    Ok(())
}
