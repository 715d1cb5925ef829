//! Dotted key parser.

use super::ast::{KeyPath, PathSegment};
use super::error::LookupError;

/// Parser for a single dot-delimited segment.
///
/// The scan accepts `letter (letter | digit)+ '[' digit+ ']'` and nothing
/// else as an indexed segment. When the scan leaves that shape at any point
/// the raw segment becomes a plain field name.
pub struct Parser<'a> {
    input: &'a str,
    position: usize,
}

/// Where the segment scan currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// Inside the field name, with this many characters consumed
    Name(usize),
    /// After `[`, with the byte offset where the digits start
    Digits(usize),
    /// After `]`
    Closed,
}

impl<'a> Parser<'a> {
    /// Creates a parser over one raw segment.
    pub fn new(segment: &'a str) -> Self {
        Self {
            input: segment,
            position: 0,
        }
    }

    /// Parses a full dotted key.
    ///
    /// An empty key yields a single empty segment. Trailing empty segments
    /// (`a.b.`) are dropped, so a key made only of dots yields no segments
    /// and resolves to the root.
    pub fn parse(key: &str) -> Result<KeyPath, LookupError> {
        let segments = split_key(key)
            .into_iter()
            .map(|raw| Parser::new(raw).parse_segment())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(KeyPath::new(segments))
    }

    /// Parses this parser's segment into a field name and optional index.
    pub fn parse_segment(&mut self) -> Result<PathSegment, LookupError> {
        match self.scan_indexed() {
            Some((name_end, digits)) => {
                let index = digits
                    .parse::<usize>()
                    .map_err(|_| LookupError::MalformedIndex {
                        segment: self.input.to_string(),
                    })?;
                Ok(PathSegment::indexed(&self.input[..name_end], index))
            }
            None => Ok(PathSegment::field(self.input)),
        }
    }

    /// Returns the end of the field name and the digit text when the whole
    /// segment has the indexed shape.
    fn scan_indexed(&mut self) -> Option<(usize, &'a str)> {
        let input = self.input;
        let mut state = match self.next()? {
            ch if ch.is_ascii_alphabetic() => Scan::Name(1),
            _ => return None,
        };
        let mut name_end = 0;
        let mut digits = "";

        while let Some(ch) = self.next() {
            let at = self.position - ch.len_utf8();
            state = match (state, ch) {
                (Scan::Name(len), c) if c.is_ascii_alphanumeric() => Scan::Name(len + 1),
                (Scan::Name(len), '[') if len >= 2 => {
                    name_end = at;
                    Scan::Digits(self.position)
                }
                (Scan::Digits(_), c) if c.is_ascii_digit() => state,
                (Scan::Digits(start), ']') if at > start => {
                    digits = &input[start..at];
                    Scan::Closed
                }
                _ => return None,
            };
        }

        (state == Scan::Closed).then_some((name_end, digits))
    }

    /// Returns the current character without advancing.
    fn peek(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Returns the next character and advances position.
    fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += ch.len_utf8();
        Some(ch)
    }
}

/// Splits a key on `.`, dropping trailing empty pieces.
fn split_key(key: &str) -> Vec<&str> {
    if key.is_empty() {
        return vec![""];
    }
    let mut parts: Vec<&str> = key.split('.').collect();
    while parts.last().is_some_and(|part| part.is_empty()) {
        parts.pop();
    }
    parts
}
