//! Position-aware character source
//!
//! Wraps any byte stream together with a source label and hands out one
//! decoded character at a time, counting every character consumed. The
//! count is what appears in diagnostics, so error locations are measured
//! in raw characters read rather than line/column pairs.

use crate::error::{Location, ParseError};
use std::io::Read;

/// Chunk size for refilling the internal buffer
const CHUNK_SIZE: usize = 4096;

/// A single-character pull source over any [`Read`] implementation
///
/// The source is exclusively owned by one parse call graph: the root
/// parser and every recursive sub-entry parse share the same instance and
/// advance its cursor monotonically. No look-ahead beyond the character
/// being decoded is provided. The underlying stream is released when the
/// source is dropped, whether or not parsing succeeded.
pub struct CharSource<R> {
    reader: R,
    label: String,
    buffer: Vec<u8>,
    buffer_position: usize,
    consumed: u64,
    eof_reached: bool,
}

impl<R: Read> CharSource<R> {
    /// Creates a character source with an identifying label for diagnostics
    pub fn new(label: impl Into<String>, reader: R) -> Self {
        Self {
            reader,
            label: label.into(),
            buffer: Vec::with_capacity(CHUNK_SIZE),
            buffer_position: 0,
            consumed: 0,
            eof_reached: false,
        }
    }

    /// Returns the source label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the 1-based count of characters consumed so far
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Snapshots the current position for an error message
    pub fn location(&self) -> Location {
        Location::new(self.label.clone(), self.consumed)
    }

    /// Reads one more chunk from the underlying stream
    fn fill(&mut self) -> Result<(), ParseError> {
        // Compact the buffer by removing processed data
        if self.buffer_position > 0 {
            self.buffer.drain(0..self.buffer_position);
            self.buffer_position = 0;
        }

        let mut chunk = [0u8; CHUNK_SIZE];
        let bytes_read = self.reader.read(&mut chunk).map_err(|error| ParseError::Read {
            location: self.location(),
            error,
        })?;

        if bytes_read == 0 {
            self.eof_reached = true;
        } else {
            self.buffer.extend_from_slice(&chunk[..bytes_read]);
        }
        Ok(())
    }

    /// Pulls the next character, or `None` at end of stream
    pub fn read_one(&mut self) -> Result<Option<char>, ParseError> {
        // Keep at least one full UTF-8 sequence buffered unless the
        // stream is exhausted
        while !self.eof_reached && self.buffer.len() - self.buffer_position < 4 {
            self.fill()?;
        }

        let bytes = &self.buffer[self.buffer_position..];
        let Some(&first) = bytes.first() else {
            return Ok(None);
        };

        let width = match first {
            0x00..=0x7F => 1,
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => {
                return Err(ParseError::InvalidUtf8 {
                    location: self.location(),
                });
            }
        };
        if bytes.len() < width {
            // Stream ended in the middle of a multi-byte sequence
            return Err(ParseError::InvalidUtf8 {
                location: self.location(),
            });
        }

        let decoded = std::str::from_utf8(&bytes[..width]).map_err(|_| ParseError::InvalidUtf8 {
            location: self.location(),
        })?;
        let character = decoded.chars().next().unwrap_or_default();

        self.buffer_position += width;
        self.consumed += 1;
        Ok(Some(character))
    }
}
