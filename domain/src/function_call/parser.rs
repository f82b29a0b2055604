//! Function call parser.
//!
//! Grammar, with `FUNCTION_CALL` matched case-insensitively:
//!
//! ```text
//! call   := "FUNCTION_CALL" "[" code "]" ws "(" params? ")"
//! params := param ("," param)*
//! param  := key ws "=" ws value
//! value  := '"' chars '"' | "'" chars "'" | bare
//! ```
//!
//! Quoted values honour `\"`, `\'` and `\\`. Bare values run to the next
//! comma or `)` outside any `()`, `[]` or `{}` nesting, and double-quoted
//! strings inside that nesting are skipped over, so embedded JSON survives
//! intact. A quote directly followed by `{` or `[` is read as unescaped
//! JSON when the balanced brackets end right at the closing quote, since
//! models rarely escape JSON; any other quoted text is an ordinary string.
//! Keys are word characters in any script.
//!
//! Parsing never fails as a whole: a malformed call is reported in
//! [`ParseReport::skipped`] and scanning resumes after its marker.

use std::collections::HashMap;

use crate::tool::codes::EXTRACTED_KEYWORDS_PARAM;
use crate::tool::entities::{ParamValue, ParsedFunctionCall};

const MARKER: &[u8] = b"FUNCTION_CALL";

/// A call that could not be parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSkip {
    /// Text from the marker up to where parsing stopped
    pub raw: String,
    pub reason: String,
}

/// Parsed calls in textual order, plus the skipped ones
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub calls: Vec<ParsedFunctionCall>,
    pub skipped: Vec<ParseSkip>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FunctionCallParser;

impl FunctionCallParser {
    pub fn new() -> Self {
        Self
    }

    /// All well-formed calls, left to right
    pub fn parse(&self, text: &str) -> Vec<ParsedFunctionCall> {
        self.parse_with_report(text).calls
    }

    pub fn parse_with_report(&self, text: &str) -> ParseReport {
        let mut report = ParseReport::default();
        let mut pos = 0;

        while let Some(start) = find_marker(text, pos) {
            let mut cursor = Cursor::new(text, start + MARKER.len());
            match cursor.parse_call() {
                Ok((tool, parameters)) => {
                    report.calls.push(ParsedFunctionCall {
                        tool,
                        parameters,
                        raw: text[start..cursor.pos].to_string(),
                    });
                    pos = cursor.pos;
                }
                Err(reason) => {
                    let end = cursor.pos.min(text.len()).max(start + MARKER.len());
                    report.skipped.push(ParseSkip {
                        raw: text[start..end].to_string(),
                        reason,
                    });
                    pos = start + MARKER.len();
                }
            }
        }

        report
    }
}

fn find_marker(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.len() < MARKER.len() {
        return None;
    }
    (from..=bytes.len() - MARKER.len())
        .find(|&i| bytes[i..i + MARKER.len()].eq_ignore_ascii_case(MARKER))
}

/// Byte cursor over the text. Every delimiter is ASCII, so slicing at
/// delimiter positions always lands on a char boundary.
struct Cursor<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str, pos: usize) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_ws(&mut self) {
        while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn expect(&mut self, expected: u8) -> Result<(), String> {
        match self.peek() {
            Some(b) if b == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(b) => Err(format!(
                "expected '{}' but found '{}'",
                expected as char, b as char
            )),
            None => Err(format!("expected '{}' but reached end of text", expected as char)),
        }
    }

    fn parse_call(&mut self) -> Result<(String, HashMap<String, ParamValue>), String> {
        self.skip_ws();
        self.expect(b'[')?;
        let code_start = self.pos;
        while let Some(b) = self.peek() {
            if b == b']' {
                break;
            }
            if matches!(b, b'[' | b'(' | b'\n') {
                return Err("malformed tool code".to_string());
            }
            self.pos += 1;
        }
        let code = self.text[code_start..self.pos].trim().to_string();
        self.expect(b']')?;
        if code.is_empty() {
            return Err("empty tool code".to_string());
        }

        self.skip_ws();
        self.expect(b'(')?;
        let parameters = self.parse_params()?;
        Ok((code, parameters))
    }

    fn parse_params(&mut self) -> Result<HashMap<String, ParamValue>, String> {
        let mut params = HashMap::new();
        loop {
            self.skip_ws();
            match self.peek() {
                None => return Err("unterminated parameter list".to_string()),
                Some(b')') => {
                    self.pos += 1;
                    return Ok(params);
                }
                Some(b',') => {
                    self.pos += 1;
                    continue;
                }
                Some(_) => {}
            }

            let key_start = self.pos;
            self.pos += self.text[key_start..]
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == '_')
                .map(char::len_utf8)
                .sum::<usize>();
            let key = self.text[key_start..self.pos].to_string();
            self.skip_ws();

            if key.is_empty() || self.peek() != Some(b'=') {
                // junk segment, drop it
                self.scan_bare()?;
                continue;
            }
            self.pos += 1;
            self.skip_ws();

            let value = self.parse_value()?;
            params.insert(key.clone(), classify(&key, value));
        }
    }

    fn parse_value(&mut self) -> Result<Value, String> {
        match self.peek() {
            Some(quote @ (b'"' | b'\'')) => {
                let mut body_start = self.pos + 1;
                while self.bytes.get(body_start).is_some_and(|b| b.is_ascii_whitespace()) {
                    body_start += 1;
                }
                if matches!(self.bytes.get(body_start), Some(b'{' | b'['))
                    && let Some(json) = self.quoted_json(body_start, quote)
                {
                    return Ok(Value::Quoted(json));
                }

                self.pos += 1;
                let value = self.scan_quoted(quote)?;
                // anything between the closing quote and the separator is ignored
                self.scan_bare()?;
                Ok(Value::Quoted(value))
            }
            _ => Ok(Value::Bare(self.scan_bare()?.trim().to_string())),
        }
    }

    /// Unescaped JSON between quotes: the balanced `{...}`/`[...]` starting
    /// at `start` must be followed by the closing quote and then `,` or `)`.
    /// Leaves the cursor untouched when that shape does not hold.
    fn quoted_json(&mut self, start: usize, quote: u8) -> Option<String> {
        let mut pos = start;
        let mut depth = 0usize;
        let mut in_string = false;
        loop {
            let b = *self.bytes.get(pos)?;
            pos += 1;
            if in_string {
                match b {
                    b'\\' => pos += 1,
                    b'"' => in_string = false,
                    _ => {}
                }
                continue;
            }
            match b {
                b'"' => in_string = true,
                b'{' | b'[' => depth += 1,
                b'}' | b']' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
        }

        let json_end = pos;
        while self.bytes.get(pos).is_some_and(|b| b.is_ascii_whitespace()) {
            pos += 1;
        }
        if self.bytes.get(pos) != Some(&quote) {
            return None;
        }
        pos += 1;
        let after = pos;
        while self.bytes.get(pos).is_some_and(|b| b.is_ascii_whitespace()) {
            pos += 1;
        }
        if !matches!(self.bytes.get(pos), Some(b',' | b')')) {
            return None;
        }

        self.pos = after;
        Some(self.text[start..json_end].to_string())
    }

    fn scan_quoted(&mut self, quote: u8) -> Result<String, String> {
        let mut out = Vec::new();
        while let Some(b) = self.peek() {
            match b {
                b'\\' if matches!(self.bytes.get(self.pos + 1), Some(&n) if n == quote || n == b'\\') => {
                    out.push(self.bytes[self.pos + 1]);
                    self.pos += 2;
                }
                b if b == quote => {
                    self.pos += 1;
                    return Ok(String::from_utf8_lossy(&out).into_owned());
                }
                b => {
                    out.push(b);
                    self.pos += 1;
                }
            }
        }
        Err("unterminated quoted value".to_string())
    }

    /// Advance to the next top-level `,` or `)` (left unconsumed) and return
    /// the text passed over.
    fn scan_bare(&mut self) -> Result<&'a str, String> {
        let start = self.pos;
        let mut depth = 0usize;
        let mut in_string = false;

        while let Some(b) = self.peek() {
            if in_string {
                match b {
                    b'\\' => self.pos += 1,
                    b'"' => in_string = false,
                    _ => {}
                }
                self.pos += 1;
                continue;
            }
            match b {
                b'"' if depth > 0 => in_string = true,
                b'(' | b'[' | b'{' => depth += 1,
                b')' if depth == 0 => return Ok(&self.text[start..self.pos]),
                b',' if depth == 0 => return Ok(&self.text[start..self.pos]),
                b')' | b']' | b'}' => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.pos += 1;
        }

        self.pos = self.pos.min(self.bytes.len());
        Err("unterminated parameter list".to_string())
    }
}

enum Value {
    Quoted(String),
    Bare(String),
}

fn classify(key: &str, value: Value) -> ParamValue {
    let text = match value {
        Value::Quoted(s) | Value::Bare(s) => s,
    };

    if key == EXTRACTED_KEYWORDS_PARAM && (text.starts_with('{') || text.starts_with('[')) {
        return ParamValue::Str(text);
    }
    if text.eq_ignore_ascii_case("true") {
        return ParamValue::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return ParamValue::Bool(false);
    }
    if !text.is_empty()
        && text.bytes().all(|b| b.is_ascii_digit())
        && let Ok(n) = text.parse::<i64>()
    {
        return ParamValue::Int(n);
    }
    ParamValue::Str(text)
}
