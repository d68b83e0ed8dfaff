//! ADL parser: the value model and the recursive entry/list state machines
//!
//! Parsing is construction: one call to [`Parser::parse`] consumes the
//! character source and returns the finished root [`Entry`]. Nested
//! `key={ ... }` blocks are parsed by ordinary recursion over the same
//! source, so each sub-parse consumes exactly the characters belonging to
//! its block and leaves the cursor just past the closing brace.

use crate::error::{AdlError, ParseError};
use crate::source::CharSource;
use indexmap::IndexMap;
use serde::Serialize;
use smallvec::SmallVec;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Configuration options for the parser
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Maximum nesting depth to prevent stack overflow
    pub max_depth: usize,
}

impl ParserConfig {
    /// Creates a parser configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_depth: 128 }
    }
}

/// List value type - uses SmallVec to avoid heap allocation for short
/// lists (tags, flags, and similar)
pub type StringList = SmallVec<[String; 4]>;

/// An ADL value: the type stored under each key of an [`Entry`]
///
/// Values are immutable once stored. Serialization inlines the variant
/// content, so a parsed tree hands off to serde consumers as plain maps,
/// sequences, and scalars.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A numeric value (always double precision)
    Number(f64),
    /// A boolean value, written `true`/`yes` or `false`/`no`
    Boolean(bool),
    /// A quoted string, case preserved, or a lowercased bareword
    String(String),
    /// A bracketed list of strings
    List(StringList),
    /// A nested sub-entry
    Entry(Entry),
}

impl Value {
    /// Returns true if the value is a number
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns true if the value is a boolean
    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    /// Returns true if the value is a string
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns true if the value is a string list
    pub fn is_list(&self) -> bool {
        matches!(self, Value::List(_))
    }

    /// Returns true if the value is a nested entry
    pub fn is_entry(&self) -> bool {
        matches!(self, Value::Entry(_))
    }

    /// Returns the numeric value if this is a Number variant
    pub fn as_number(&self) -> Option<f64> {
        if let Value::Number(n) = self { Some(*n) } else { None }
    }

    /// Returns the boolean value if this is a Boolean variant
    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self { Some(*b) } else { None }
    }

    /// Returns a reference to the string if this is a String variant
    pub fn as_str(&self) -> Option<&str> {
        if let Value::String(s) = self { Some(s.as_str()) } else { None }
    }

    /// Returns a reference to the list if this is a List variant
    pub fn as_list(&self) -> Option<&StringList> {
        if let Value::List(items) = self { Some(items) } else { None }
    }

    /// Returns a reference to the entry if this is an Entry variant
    pub fn as_entry(&self) -> Option<&Entry> {
        if let Value::Entry(entry) = self { Some(entry) } else { None }
    }
}

/// A parsed ADL node: an optional type tag plus a key/value mapping
///
/// Sub-entries live in the mapping under their declaring key, exactly like
/// primitive values; [`Entry::subentries`] walks them in declaration
/// order. The root entry of a document has no type tag; every nested entry
/// is tagged with the key that introduced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    #[serde(skip)]
    type_name: Option<String>,
    #[serde(flatten)]
    primitives: IndexMap<String, Value>,
}

impl Entry {
    fn new(type_name: Option<String>) -> Self {
        Self {
            type_name,
            primitives: IndexMap::new(),
        }
    }

    /// Returns the type tag, present for sub-entries and absent for the
    /// document root
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Returns the full key/value mapping in declaration order
    pub fn primitives(&self) -> &IndexMap<String, Value> {
        &self.primitives
    }

    /// Returns the number of keys in this entry
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Returns true if this entry has no keys
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Looks up a value by its lowercase key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.primitives.get(key)
    }

    /// Returns the value under `key` only if it is a number
    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(Value::as_number)
    }

    /// Returns the value under `key` only if it is a boolean
    pub fn get_boolean(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_boolean)
    }

    /// Returns the value under `key` only if it is a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    /// Returns the value under `key` only if it is a string list
    pub fn get_list(&self, key: &str) -> Option<&StringList> {
        self.get(key).and_then(Value::as_list)
    }

    /// Returns the value under `key` only if it is a nested entry
    pub fn get_entry(&self, key: &str) -> Option<&Entry> {
        self.get(key).and_then(Value::as_entry)
    }

    /// Iterates over the nested sub-entries in declaration order
    pub fn subentries(&self) -> Subentries<'_> {
        Subentries {
            values: self.primitives.values(),
        }
    }
}

/// Iterator over the nested sub-entries of an [`Entry`]
pub struct Subentries<'entry> {
    values: indexmap::map::Values<'entry, String, Value>,
}

impl<'entry> Iterator for Subentries<'entry> {
    type Item = &'entry Entry;

    fn next(&mut self) -> Option<Self::Item> {
        self.values.find_map(Value::as_entry)
    }
}

impl<'entry> IntoIterator for &'entry Entry {
    type Item = &'entry Entry;
    type IntoIter = Subentries<'entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.subentries()
    }
}

/// Whitespace in the grammar is any character at or below space
fn is_delimiter(character: char) -> bool {
    character <= ' '
}

/// Applies the bareword coercion rule: number, then boolean word, then
/// lowercased string
fn coerce_bare(token: &str) -> Value {
    let lowered = token.to_lowercase();
    if let Ok(number) = lowered.parse::<f64>() {
        return Value::Number(number);
    }
    match lowered.as_str() {
        "true" | "yes" => Value::Boolean(true),
        "false" | "no" => Value::Boolean(false),
        _ => Value::String(lowered),
    }
}

/// States of the entry scanner
enum Mode {
    /// Accumulating a key or type name
    Key,
    /// Saw whitespace after a key name, waiting for `=`
    Separator,
    /// Accumulating a bare value or dispatching a sub-structure
    Value,
    /// Inside a quoted string value
    Quoted,
    /// Just closed a quoted string, sub-entry, or list; the next
    /// character must be whitespace or `}`
    PostValue,
}

/// States of the list scanner
enum ListMode {
    /// Accumulating a bare element, or at a boundary between elements
    Element,
    /// Inside a quoted element
    Quoted,
    /// Just closed a quoted element; the next character must be
    /// whitespace or `]`
    PostElement,
}

/// The recursive ADL document parser
///
/// Owns the character source for the duration of the parse; dropping the
/// parser releases the underlying stream on every path.
pub struct Parser<R> {
    source: CharSource<R>,
    config: ParserConfig,
}

impl<R: Read> Parser<R> {
    /// Creates a parser with the default configuration
    pub fn new(source: CharSource<R>) -> Self {
        Self::with_config(source, ParserConfig::default())
    }

    /// Creates a parser with an explicit configuration
    pub fn with_config(source: CharSource<R>, config: ParserConfig) -> Self {
        Self { source, config }
    }

    /// Parses the whole document into a root entry with no type tag
    pub fn parse(mut self) -> Result<Entry, ParseError> {
        self.parse_entry(None, 0)
    }

    /// Discards characters up to and including the next newline, then
    /// hands the newline (or EOF) back to the state machine
    fn skip_comment(&mut self) -> Result<Option<char>, ParseError> {
        loop {
            match self.source.read_one()? {
                Some('\n') => return Ok(Some('\n')),
                Some(_) => {}
                None => return Ok(None),
            }
        }
    }

    fn parse_entry(&mut self, type_name: Option<String>, depth: usize) -> Result<Entry, ParseError> {
        if depth > self.config.max_depth {
            return Err(ParseError::DepthExceeded {
                limit: self.config.max_depth,
                location: self.source.location(),
            });
        }

        let mut entry = Entry::new(type_name);
        let mut buf = String::new();
        let mut key = String::new();
        let mut mode = Mode::Key;

        loop {
            let mut next = self.source.read_one()?;
            // A '#' starts a comment regardless of the current mode, even
            // in the middle of a bare token; the terminating newline is
            // delivered to the state machine in its place
            if next == Some('#') {
                next = self.skip_comment()?;
            }

            let Some(character) = next else {
                return match mode {
                    Mode::Key if buf.is_empty() => Ok(entry),
                    Mode::Key => Err(ParseError::DanglingKey {
                        key: buf,
                        location: self.source.location(),
                    }),
                    Mode::PostValue => Ok(entry),
                    Mode::Quoted => Err(ParseError::UnterminatedString {
                        location: self.source.location(),
                    }),
                    Mode::Separator | Mode::Value => Err(ParseError::UnexpectedEof {
                        location: self.source.location(),
                    }),
                };
            };

            match mode {
                Mode::Key => {
                    if character == '=' {
                        key = std::mem::take(&mut buf).to_lowercase();
                        mode = Mode::Value;
                    } else if character == '}' {
                        if buf.is_empty() {
                            return Ok(entry);
                        }
                        return Err(ParseError::DanglingKey {
                            key: buf,
                            location: self.source.location(),
                        });
                    } else if is_delimiter(character) {
                        if !buf.is_empty() {
                            mode = Mode::Separator;
                        }
                    } else if matches!(character, '"' | '\'' | '{') {
                        return Err(ParseError::IllegalKeyCharacter {
                            character,
                            location: self.source.location(),
                        });
                    } else {
                        buf.push(character);
                    }
                }
                Mode::Separator => {
                    if character == '=' {
                        key = std::mem::take(&mut buf).to_lowercase();
                        mode = Mode::Value;
                    } else if !is_delimiter(character) {
                        return Err(ParseError::ExpectedSeparator {
                            character,
                            location: self.source.location(),
                        });
                    }
                }
                Mode::Value => {
                    if is_delimiter(character) {
                        if !buf.is_empty() {
                            let value = coerce_bare(&buf);
                            buf.clear();
                            entry.primitives.insert(key.clone(), value);
                            // The finalizing whitespace already satisfies
                            // the post-value delimiter rule
                            mode = Mode::Key;
                        }
                    } else if character == '"' {
                        if !buf.is_empty() {
                            return Err(ParseError::DelimiterInsideToken {
                                character,
                                location: self.source.location(),
                            });
                        }
                        mode = Mode::Quoted;
                    } else if character == '{' {
                        if !buf.is_empty() {
                            return Err(ParseError::DelimiterInsideToken {
                                character,
                                location: self.source.location(),
                            });
                        }
                        let sub = self.parse_entry(Some(key.clone()), depth + 1)?;
                        entry.primitives.insert(key.clone(), Value::Entry(sub));
                        mode = Mode::PostValue;
                    } else if character == '[' {
                        let items = self.parse_list()?;
                        buf.clear();
                        entry.primitives.insert(key.clone(), Value::List(items));
                        mode = Mode::PostValue;
                    } else if matches!(character, '=' | '}' | '\'') {
                        return Err(ParseError::IllegalValueCharacter {
                            character,
                            location: self.source.location(),
                        });
                    } else {
                        buf.push(character);
                    }
                }
                Mode::Quoted => {
                    if character == '"' {
                        let value = Value::String(std::mem::take(&mut buf));
                        entry.primitives.insert(key.clone(), value);
                        mode = Mode::PostValue;
                    } else if character == '\\' {
                        // Take the next raw character as-is; the escape
                        // read bypasses comment handling
                        match self.source.read_one()? {
                            Some(escaped) => buf.push(escaped),
                            None => {
                                return Err(ParseError::UnterminatedString {
                                    location: self.source.location(),
                                });
                            }
                        }
                    } else {
                        buf.push(character);
                    }
                }
                Mode::PostValue => {
                    if character == '}' {
                        return Ok(entry);
                    } else if is_delimiter(character) {
                        mode = Mode::Key;
                    } else {
                        return Err(ParseError::ExpectedDelimiter {
                            character,
                            location: self.source.location(),
                        });
                    }
                }
            }
        }
    }

    /// Consumes a bracketed list up to and including the closing `]`
    ///
    /// Elements are always strings: barewords are lowercased, quoted
    /// elements keep their case and resolve `\` escapes. Comments are not
    /// recognized inside a list.
    fn parse_list(&mut self) -> Result<StringList, ParseError> {
        let mut items = StringList::new();
        let mut buf = String::new();
        let mut mode = ListMode::Element;

        loop {
            let Some(character) = self.source.read_one()? else {
                return Err(match mode {
                    ListMode::Quoted => ParseError::UnterminatedString {
                        location: self.source.location(),
                    },
                    ListMode::Element | ListMode::PostElement => ParseError::UnterminatedList {
                        location: self.source.location(),
                    },
                });
            };

            match mode {
                ListMode::Element => {
                    if character == ']' {
                        if !buf.is_empty() {
                            items.push(buf.to_lowercase());
                        }
                        return Ok(items);
                    } else if character == '"' {
                        if !buf.is_empty() {
                            return Err(ParseError::DelimiterInsideToken {
                                character,
                                location: self.source.location(),
                            });
                        }
                        mode = ListMode::Quoted;
                    } else if is_delimiter(character) {
                        if !buf.is_empty() {
                            items.push(buf.to_lowercase());
                            buf.clear();
                        }
                    } else {
                        buf.push(character);
                    }
                }
                ListMode::Quoted => {
                    if character == '"' {
                        items.push(std::mem::take(&mut buf));
                        mode = ListMode::PostElement;
                    } else if character == '\\' {
                        match self.source.read_one()? {
                            Some(escaped) => buf.push(escaped),
                            None => {
                                return Err(ParseError::UnterminatedString {
                                    location: self.source.location(),
                                });
                            }
                        }
                    } else {
                        buf.push(character);
                    }
                }
                ListMode::PostElement => {
                    if character == ']' {
                        return Ok(items);
                    } else if is_delimiter(character) {
                        mode = ListMode::Element;
                    } else {
                        return Err(ParseError::ExpectedDelimiter {
                            character,
                            location: self.source.location(),
                        });
                    }
                }
            }
        }
    }
}

/// Parses a document from any byte stream, labelling errors with `label`
pub fn parse_document<R: Read>(label: impl Into<String>, reader: R) -> Result<Entry, ParseError> {
    Parser::new(CharSource::new(label, reader)).parse()
}

/// Parses a document from a byte stream with an explicit configuration
pub fn parse_document_with_config<R: Read>(
    label: impl Into<String>,
    reader: R,
    config: ParserConfig,
) -> Result<Entry, ParseError> {
    Parser::with_config(CharSource::new(label, reader), config).parse()
}

/// Parses a document held in memory; errors are labelled `<string>`
pub fn parse_str(text: &str) -> Result<Entry, ParseError> {
    parse_document("<string>", text.as_bytes())
}

/// Opens a file and parses it as an ADL document
///
/// The file path doubles as the source label in error messages.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Entry, AdlError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let entry = parse_document(path.display().to_string(), file)?;
    Ok(entry)
}
