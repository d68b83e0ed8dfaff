//! # ADL Parser
//!
//! A recursive, character-level parser for the ADL asset description
//! language: entries with an optional type tag, containing key/value pairs
//! whose values may be numbers, booleans, quoted or bare strings, string
//! lists, or nested sub-entries.
//!
//! ## Overview
//!
//! The parser consumes a character stream directly (there is no separate
//! tokenizer) and produces a tree of typed key/value containers. Nested
//! `key={ ... }` blocks become sub-entries tagged with the key that
//! introduced them; `key=[ ... ]` blocks become string lists. Every failure
//! is position-aware: errors report the source label plus the number of
//! characters consumed when the violation was detected.
//!
//! ## The format
//!
//! ```text
//! # a comment runs to the end of the line
//! name = "Dusk Tower"        # quoted strings keep their case
//! scale = 2.5                # barewords coerce to numbers...
//! solid = yes                # ...or booleans (true/yes, false/no)
//! biome = Highlands          # ...or lowercased strings
//! tags = [structure "Landmark" decor]
//! mesh = {                   # nested entries to any depth
//!     path = "models/tower.obj"
//!     lod = 2
//! }
//! ```
//!
//! Whitespace (any character at or below space) separates tokens; keys are
//! lowercased on store; `\` inside a quoted string escapes the next
//! character literally.
//!
//! ## Basic Usage
//!
//! ```rust
//! use adl_parser::parse_str;
//!
//! let root = parse_str(r#"
//!     name = "Dusk Tower"
//!     scale = 2.5
//!     solid = yes
//!     mesh = { path = "models/tower.obj" lod = 2 }
//!     tags = [structure "Landmark" decor]
//! "#)?;
//!
//! assert_eq!(root.get_str("name"), Some("Dusk Tower"));
//! assert_eq!(root.get_number("scale"), Some(2.5));
//! assert_eq!(root.get_boolean("solid"), Some(true));
//!
//! let mesh = root.get_entry("mesh").unwrap();
//! assert_eq!(mesh.type_name(), Some("mesh"));
//! assert_eq!(mesh.get_number("lod"), Some(2.0));
//!
//! let tags: Vec<&str> = root.get_list("tags").unwrap().iter().map(String::as_str).collect();
//! assert_eq!(tags, ["structure", "Landmark", "decor"]);
//! # Ok::<(), adl_parser::ParseError>(())
//! ```
//!
//! ## Error Handling
//!
//! Every grammar violation aborts the whole parse and pinpoints the source
//! label and character offset:
//!
//! ```rust
//! use adl_parser::{ParseError, parse_document};
//!
//! let result = parse_document("broken.adl", &b"title=\"unterminated"[..]);
//! match result {
//!     Err(ParseError::UnterminatedString { location }) => {
//!         assert_eq!(location.source, "broken.adl");
//!     }
//!     other => panic!("expected an unterminated string error, got {other:?}"),
//! }
//! ```
//!
//! ## Files and Streams
//!
//! [`parse_file`] opens a path and uses it as the error label;
//! [`parse_document`] accepts any [`std::io::Read`] plus a label of your
//! choosing. Deeply nested documents are bounded by
//! [`ParserConfig::max_depth`] rather than the call stack.

pub mod error;
pub mod parser;
pub mod source;

// Re-export main types and functions
pub use error::{AdlError, Location, ParseError};
pub use parser::{
    Entry, Parser, ParserConfig, StringList, Subentries, Value, parse_document,
    parse_document_with_config, parse_file, parse_str,
};
pub use source::CharSource;
