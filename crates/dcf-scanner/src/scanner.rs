//! Tokenizer.
//!
//! Produces a flat list of `SourceToken`s. Whitespace and `#` line comments
//! are skipped; newlines are kept because they separate statements.

use crate::token::{SourceToken, SourceType};

/// Error returned when the source contains something the scanner does not
/// understand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanError {
    pub message: String,
    pub pos: u32,
}

impl std::fmt::Display for ScanError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at offset {}", self.message, self.pos)
    }
}

impl std::error::Error for ScanError {}

/// Tokenize `source` in one go.
pub fn tokenize(source: &str) -> Result<Vec<SourceToken>, ScanError> {
    Scanner::new(source).collect()
}

/// Tokenizer state machine.
pub struct Scanner<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

#[inline]
fn is_identifier_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_' || ch == b'$'
}

#[inline]
fn is_identifier_part(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_' || ch == b'$'
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Scanner {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    fn error(&self, message: impl Into<String>, pos: usize) -> ScanError {
        ScanError {
            message: message.into(),
            pos: pos as u32,
        }
    }

    fn token(&self, kind: SourceType, start: usize) -> SourceToken {
        SourceToken::new(kind, start as u32, self.pos as u32)
    }

    #[inline]
    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Skip spaces, tabs and comments. Newlines are tokens and stay put.
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek(0) {
            match ch {
                b' ' | b'\t' => self.pos += 1,
                b'\\' if matches!(self.peek(1), Some(b'\n')) => self.pos += 2,
                b'#' => {
                    let rest = &self.bytes[self.pos..];
                    self.pos += memchr::memchr(b'\n', rest).unwrap_or(rest.len());
                }
                _ => break,
            }
        }
    }

    /// Offset of the next word after `from`, skipping spaces and tabs only.
    fn next_word_at(&self, from: usize) -> Option<(usize, usize)> {
        let mut start = from;
        while matches!(self.bytes.get(start), Some(b' ' | b'\t')) {
            start += 1;
        }
        if start == from || !self.bytes.get(start).copied().is_some_and(is_identifier_start) {
            return None;
        }
        let mut end = start;
        while self.bytes.get(end).copied().is_some_and(is_identifier_part) {
            end += 1;
        }
        Some((start, end))
    }

    fn scan_word(&mut self) -> SourceToken {
        let start = self.pos;
        while self.peek(0).is_some_and(is_identifier_part) {
            self.pos += 1;
        }
        let kind = match &self.source[start..self.pos] {
            "this" => SourceType::This,
            "true" | "false" => SourceType::Bool,
            "null" => SourceType::Null,
            "in" | "instanceof" => SourceType::Relation,
            "is" | "isnt" | "and" | "or" => SourceType::Operator,
            "not" => {
                // `not in` is a single relational token.
                if let Some((word_start, word_end)) = self.next_word_at(self.pos)
                    && &self.source[word_start..word_end] == "in"
                {
                    self.pos = word_end;
                    SourceType::Relation
                } else {
                    SourceType::Not
                }
            }
            _ => SourceType::Identifier,
        };
        self.token(kind, start)
    }

    fn scan_number(&mut self) -> SourceToken {
        let start = self.pos;
        while self.peek(0).is_some_and(|ch| ch.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.peek(0) == Some(b'.') && self.peek(1).is_some_and(|ch| ch.is_ascii_digit()) {
            self.pos += 1;
            while self.peek(0).is_some_and(|ch| ch.is_ascii_digit()) {
                self.pos += 1;
            }
        }
        self.token(SourceType::Number, start)
    }

    fn scan_string(&mut self, quote: u8) -> Result<SourceToken, ScanError> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek(0) {
                None | Some(b'\n') => return Err(self.error("unterminated string literal", start)),
                Some(b'\\') => self.pos += 2,
                Some(ch) if ch == quote => {
                    self.pos += 1;
                    return Ok(self.token(SourceType::String, start));
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    fn scan_punctuation(&mut self, ch: u8) -> Result<SourceToken, ScanError> {
        let start = self.pos;
        let (kind, width) = match (ch, self.peek(1)) {
            (b'\r', Some(b'\n')) => (SourceType::Newline, 2),
            (b'\r' | b'\n', _) => (SourceType::Newline, 1),
            (b';', _) => (SourceType::Semicolon, 1),
            (b'(', _) => (SourceType::LParen, 1),
            (b')', _) => (SourceType::RParen, 1),
            (b'[', _) => (SourceType::LBracket, 1),
            (b']', _) => (SourceType::RBracket, 1),
            (b',', _) => (SourceType::Comma, 1),
            (b'.', _) => (SourceType::Dot, 1),
            (b'@', _) => (SourceType::This, 1),
            (b'=' | b'!' | b'<' | b'>', Some(b'=')) => (SourceType::Operator, 2),
            (b'|', Some(b'|')) | (b'&', Some(b'&')) => (SourceType::Operator, 2),
            (b'=', _) => (SourceType::Assign, 1),
            (b'!', _) => (SourceType::Not, 1),
            (b'+' | b'-' | b'*' | b'/' | b'%' | b'<' | b'>', _) => (SourceType::Operator, 1),
            _ => {
                let found = self.source[start..].chars().next().unwrap_or('\0');
                return Err(self.error(format!("unexpected character '{found}'"), start));
            }
        };
        self.pos += width;
        Ok(self.token(kind, start))
    }

    /// Scan the next token, or `None` at end of input.
    pub fn next_token(&mut self) -> Result<Option<SourceToken>, ScanError> {
        self.skip_trivia();
        let Some(ch) = self.peek(0) else {
            return Ok(None);
        };
        let token = if is_identifier_start(ch) {
            self.scan_word()
        } else if ch.is_ascii_digit() {
            self.scan_number()
        } else if ch == b'"' || ch == b'\'' {
            self.scan_string(ch)?
        } else {
            self.scan_punctuation(ch)?
        };
        Ok(Some(token))
    }
}

impl Iterator for Scanner<'_> {
    type Item = Result<SourceToken, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token().transpose()
    }
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod tests;
