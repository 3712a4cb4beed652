//! # Line Reading and Parsing
//!
//! Splits an input stream into physical lines and classifies each one as
//! blank, malformed, or a parsed JSON value. Lines are read as raw bytes so
//! the content digest covers exactly what was scanned, and a line that is not
//! valid UTF-8 becomes a malformed line rather than a read failure.

use std::borrow::Cow;
use std::io::{self, BufRead};

use serde_json::Value;

/// One physical line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLine {
    /// 1-based physical line number.
    pub number: usize,
    /// Raw bytes, including the line terminator if one was present.
    pub bytes: Vec<u8>,
}

impl RawLine {
    /// Line text with the terminator removed, lossily decoded for display.
    pub fn text(&self) -> Cow<'_, str> {
        let end = self
            .bytes
            .iter()
            .rposition(|b| *b != b'\n' && *b != b'\r')
            .map_or(0, |i| i + 1);
        String::from_utf8_lossy(&self.bytes[..end])
    }

    /// Classify the line.
    pub fn parse(&self) -> LineOutcome {
        match std::str::from_utf8(&self.bytes) {
            Ok(text) => parse_line(text),
            Err(e) => LineOutcome::Malformed {
                reason: format!("line is not valid UTF-8: {e}"),
            },
        }
    }
}

/// Classification of one line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    /// Empty after trimming whitespace.
    Blank,
    /// Not parseable as JSON.
    Malformed {
        /// Parser diagnostic.
        reason: String,
    },
    /// A parsed JSON value of any shape.
    Parsed(Value),
}

impl LineOutcome {
    /// True for [`LineOutcome::Blank`].
    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }
}

/// Classify one line of text.
pub fn parse_line(text: &str) -> LineOutcome {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return LineOutcome::Blank;
    }
    match serde_json::from_str::<Value>(trimmed) {
        Ok(value) => LineOutcome::Parsed(value),
        Err(e) => LineOutcome::Malformed {
            reason: e.to_string(),
        },
    }
}

/// Reads numbered physical lines from a buffered source.
#[derive(Debug)]
pub struct LineReader<R> {
    inner: R,
    number: usize,
}

impl<R: BufRead> LineReader<R> {
    /// Wrap a buffered reader.
    pub fn new(inner: R) -> Self {
        Self { inner, number: 0 }
    }

    /// Read the next line, or `None` at end of input.
    pub fn next_line(&mut self) -> io::Result<Option<RawLine>> {
        let mut bytes = Vec::new();
        if self.inner.read_until(b'\n', &mut bytes)? == 0 {
            return Ok(None);
        }
        self.number += 1;
        Ok(Some(RawLine {
            number: self.number,
            bytes,
        }))
    }
}
