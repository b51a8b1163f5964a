//! Value → text.
//!
//! Output is always valid JSON: strings are escaped, containers never carry a trailing separator
//! and floats keep a fractional part so they read back as floats.

use crate::{Error, JsonValue, Result};

/// Nesting limit shared by the serializer and the parser unless configured otherwise.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Serializer {
    max_depth: usize,
    /// `None` is the single-line form; `Some(n)` puts every element on its own line, indented by
    /// `n` spaces per level.
    indent: Option<usize>,
}

impl Default for Serializer {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            indent: None,
        }
    }
}

impl Serializer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn pretty(mut self, indent: usize) -> Self {
        self.indent = Some(indent);
        self
    }

    pub fn to_string(&self, value: &JsonValue) -> Result<String> {
        let mut out = String::new();
        self.write(value, &mut out)?;
        Ok(out)
    }

    /// Append the text form of `value` to `out`. On error `out` may hold a partial document.
    pub fn write(&self, value: &JsonValue, out: &mut String) -> Result<()> {
        self.write_value(value, 0, out)
    }

    fn write_value(&self, value: &JsonValue, depth: usize, out: &mut String) -> Result<()> {
        match value {
            JsonValue::Null => out.push_str("null"),
            JsonValue::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
            JsonValue::Int(i) => out.push_str(&i.to_string()),
            JsonValue::Float(f) => write_float(*f, out)?,
            JsonValue::String(s) => write_str(s, out),
            JsonValue::Object(map) => {
                let depth = self.enter(depth)?;
                if map.is_empty() {
                    out.push_str("{}");
                    return Ok(());
                }
                out.push('{');
                for (i, (key, val)) in map.iter().enumerate() {
                    self.separator(i, depth, out);
                    write_str(key, out);
                    out.push_str(": ");
                    self.write_value(val, depth, out)?;
                }
                self.newline(depth - 1, out);
                out.push('}');
            }
            JsonValue::Array(items) => {
                let depth = self.enter(depth)?;
                if items.is_empty() {
                    out.push_str("[]");
                    return Ok(());
                }
                out.push('[');
                for (i, item) in items.iter().enumerate() {
                    self.separator(i, depth, out);
                    self.write_value(item, depth, out)?;
                }
                self.newline(depth - 1, out);
                out.push(']');
            }
        }
        Ok(())
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

    fn separator(&self, index: usize, depth: usize, out: &mut String) {
        if index > 0 {
            out.push(',');
            if self.indent.is_none() {
                out.push(' ');
            }
        }
        self.newline(depth, out);
    }

    fn newline(&self, depth: usize, out: &mut String) {
        if let Some(indent) = self.indent {
            out.push('\n');
            out.extend(std::iter::repeat(' ').take(indent * depth));
        }
    }
}

fn write_float(f: f64, out: &mut String) -> Result<()> {
    if !f.is_finite() {
        return Err(Error::NonFiniteFloat);
    }
    let text = f.to_string();
    out.push_str(&text);
    if !text.contains(|c| c == '.' || c == 'e' || c == 'E') {
        out.push_str(".0");
    }
    Ok(())
}

fn write_str(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c if c < ' ' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Serialize on a single line with the default depth limit. Fails on deeper nesting and on
/// NaN or infinite floats.
pub fn to_string(value: &JsonValue) -> Result<String> {
    Serializer::default().to_string(value)
}

/// Serialize with one element per line, indented by `indent` spaces per level.
pub fn to_string_pretty(value: &JsonValue, indent: usize) -> Result<String> {
    Serializer::default().pretty(indent).to_string(value)
}
