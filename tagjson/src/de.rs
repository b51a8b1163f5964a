//! Text → value, by hand-rolled recursive descent.
//!
//! The whole input must be one JSON value surrounded by optional whitespace. A single leading
//! byte-order mark is tolerated. Escape decoding inside strings is delegated to `serde_json` once
//! the literal has been delimited and its escapes checked, so positions for bad escapes still
//! come from us.

use std::str::FromStr;

use crate::ser::DEFAULT_MAX_DEPTH;
use crate::{Error, JsonValue, Map, Result, Span};

const BOM: &str = "\u{feff}";

#[derive(Debug)]
pub struct Parser<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Consume the entire input as a single value.
    pub fn parse(mut self) -> Result<JsonValue> {
        if self.src.starts_with(BOM) {
            self.pos = BOM.len();
        }
        self.skip_ws();
        if self.at_end() {
            return Err(Error::malformed(
                Span::point(self.pos),
                "expected a JSON value but the input is empty",
            ));
        }
        let value = self.parse_value(0)?;
        self.skip_ws();
        if !self.at_end() {
            return Err(Error::malformed(
                Span::new(self.pos, self.bytes.len()),
                "trailing characters after the JSON value",
            ));
        }
        Ok(value)
    }

    fn parse_value(&mut self, depth: usize) -> Result<JsonValue> {
        match self.peek() {
            Some(b'n') => self.parse_literal("null", JsonValue::Null),
            Some(b't') => self.parse_literal("true", JsonValue::Bool(true)),
            Some(b'f') => self.parse_literal("false", JsonValue::Bool(false)),
            Some(b'"') => self.parse_string().map(JsonValue::String),
            Some(b'-' | b'0'..=b'9') => self.parse_number(),
            Some(b'{') => self.parse_object(depth),
            Some(b'[') => self.parse_array(depth),
            _ => Err(self.error_here("expected a value")),
        }
    }

    fn parse_literal(&mut self, literal: &'static str, value: JsonValue) -> Result<JsonValue> {
        if self.src[self.pos..].starts_with(literal) {
            self.pos += literal.len();
            return Ok(value);
        }
        // Cover the whole bogus word, e.g. `nul` or `trueish`.
        let word_len = self.src[self.pos..]
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(self.bytes.len() - self.pos)
            .max(1);
        Err(Error::malformed(
            Span::new(self.pos, self.pos + word_len),
            format!("expected `{literal}`"),
        ))
    }

    fn parse_number(&mut self) -> Result<JsonValue> {
        let start = self.pos;
        self.eat(b'-');
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => {
                self.digits();
            }
            _ => return Err(self.error_here("expected a digit")),
        }

        let mut is_float = false;
        if self.eat(b'.') {
            is_float = true;
            if self.digits() == 0 {
                return Err(self.error_here("expected a digit after the decimal point"));
            }
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            is_float = true;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.digits() == 0 {
                return Err(self.error_here("expected a digit in the exponent"));
            }
        }

        let text = &self.src[start..self.pos];
        if !is_float {
            // Integers too large for i64 fall through to the float path.
            if let Ok(i) = text.parse::<i64>() {
                return Ok(JsonValue::Int(i));
            }
        }
        match text.parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(JsonValue::Float(f)),
            _ => Err(Error::malformed(
                Span::new(start, self.pos),
                "number out of range",
            )),
        }
    }

    fn parse_string(&mut self) -> Result<String> {
        let start = self.pos;
        self.pos += 1;
        let mut has_escape = false;
        loop {
            match self.peek() {
                None => {
                    return Err(Error::malformed(
                        Span::new(start, self.pos),
                        "unterminated string",
                    ))
                }
                Some(b'"') => {
                    self.pos += 1;
                    break;
                }
                Some(b'\\') => {
                    has_escape = true;
                    let escape = self.pos;
                    match self.bytes.get(escape + 1) {
                        Some(b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't') => {
                            self.pos += 2
                        }
                        Some(b'u') if self.is_hex4(escape + 2) => self.pos += 6,
                        _ => {
                            let hi = self.char_span(escape + 1).hi;
                            return Err(Error::malformed(
                                Span::new(escape, hi),
                                "invalid escape sequence",
                            ));
                        }
                    }
                }
                Some(b) if b < 0x20 => {
                    return Err(Error::malformed(
                        Span::new(self.pos, self.pos + 1),
                        "control characters in strings must be escaped",
                    ))
                }
                Some(_) => self.pos += 1,
            }
        }

        let literal = &self.src[start..self.pos];
        if !has_escape {
            return Ok(literal[1..literal.len() - 1].to_owned());
        }
        serde_json::from_str::<String>(literal).map_err(|_| {
            Error::malformed(Span::new(start, self.pos), "invalid unicode escape")
        })
    }

    fn parse_array(&mut self, depth: usize) -> Result<JsonValue> {
        let depth = self.enter(depth)?;
        self.pos += 1;
        let mut items = Vec::new();
        self.skip_ws();
        if self.eat(b']') {
            return Ok(JsonValue::Array(items));
        }
        loop {
            self.skip_ws();
            items.push(self.parse_value(depth)?);
            self.skip_ws();
            if self.eat(b',') {
                continue;
            }
            if self.eat(b']') {
                return Ok(JsonValue::Array(items));
            }
            return Err(self.error_here("expected `,` or `]`"));
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<JsonValue> {
        let depth = self.enter(depth)?;
        self.pos += 1;
        let mut map = Map::new();
        self.skip_ws();
        if self.eat(b'}') {
            return Ok(JsonValue::Object(map));
        }
        loop {
            self.skip_ws();
            if self.peek() != Some(b'"') {
                return Err(self.error_here("expected a string key"));
            }
            let key = self.parse_string()?;
            self.skip_ws();
            if !self.eat(b':') {
                return Err(self.error_here("expected `:` after the object key"));
            }
            self.skip_ws();
            let value = self.parse_value(depth)?;
            // Duplicate keys: the last one wins, same as `set_field`.
            map.insert(key, value);
            self.skip_ws();
            if self.eat(b',') {
                continue;
            }
            if self.eat(b'}') {
                return Ok(JsonValue::Object(map));
            }
            return Err(self.error_here("expected `,` or `}`"));
        }
    }

    fn enter(&self, depth: usize) -> Result<usize> {
        let depth = depth + 1;
        if depth > self.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.max_depth,
            });
        }
        Ok(depth)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(b' ' | b'\t' | b'\n' | b'\r')) {
            self.pos += 1;
        }
    }

    fn digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn is_hex4(&self, at: usize) -> bool {
        self.bytes
            .get(at..at + 4)
            .map_or(false, |h| h.iter().all(u8::is_ascii_hexdigit))
    }

    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    /// The span of the character starting at byte `at`; empty at end of input.
    fn char_span(&self, at: usize) -> Span {
        let at = at.min(self.bytes.len());
        let len = self.src[at..].chars().next().map_or(0, char::len_utf8);
        Span::new(at, at + len)
    }

    fn error_here(&self, reason: &str) -> Error {
        let span = self.char_span(self.pos);
        let reason = match self.src[span.lo..span.hi].chars().next() {
            Some(c) => format!("{reason}, found {c:?}"),
            None => format!("{reason}, found end of input"),
        };
        Error::malformed(span, reason)
    }
}

/// Parse `src` with the default depth limit.
pub fn from_str(src: &str) -> Result<JsonValue> {
    Parser::new(src).parse()
}

pub fn from_str_with_limit(src: &str, max_depth: usize) -> Result<JsonValue> {
    Parser::new(src).max_depth(max_depth).parse()
}

impl FromStr for JsonValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        from_str(s)
    }
}
