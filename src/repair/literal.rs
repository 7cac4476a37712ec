//! A tolerant decoder for Python-style literal syntax.
//!
//! Accepts everything strict JSON accepts plus single-quoted and
//! triple-quoted strings, adjacent string concatenation, `True`/`False`/`None`,
//! tuples, trailing commas, bare identifier keys, `#` comments and digit
//! separators.

use serde_json::{Map, Number, Value};

use super::DecodeError;

const MAX_DEPTH: usize = 128;

/// Parses `text` as a single literal expression.
///
/// # Errors
///
/// Returns [`DecodeError::Literal`] with the byte offset of the first
/// offending character.
pub fn parse(text: &str) -> Result<Value, DecodeError> {
    let mut parser = Parser { text, pos: 0 };
    parser.skip_trivia();
    let value = parser.value(0)?;
    parser.skip_trivia();
    if parser.peek().is_some() {
        return Err(parser.error("unexpected trailing characters"));
    }
    Ok(value)
}

struct Parser<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.rest().chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn error(&self, message: impl Into<String>) -> DecodeError {
        error_at(self.pos, message)
    }

    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.bump();
                }
                Some('#') => {
                    while !matches!(self.bump(), None | Some('\n')) {}
                }
                _ => break,
            }
        }
    }

    fn value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        if depth > MAX_DEPTH {
            return Err(self.error("nesting too deep"));
        }

        match self.peek() {
            None => Err(self.error("unexpected end of input")),
            Some('{') => self.dict(depth),
            Some('[') => self.sequence(']', depth),
            Some('(') => self.sequence(')', depth),
            Some('\'' | '"') => self.strings().map(Value::String),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.') => {
                self.number().map(Value::Number)
            }
            Some(c) if is_ident_start(c) => {
                let start = self.pos;
                match self.identifier() {
                    "True" | "true" => Ok(Value::Bool(true)),
                    "False" | "false" => Ok(Value::Bool(false)),
                    "None" | "null" => Ok(Value::Null),
                    other => Err(error_at(start, format!("unexpected name '{other}'"))),
                }
            }
            Some(c) => Err(self.error(format!("unexpected character '{c}'"))),
        }
    }

    fn dict(&mut self, depth: usize) -> Result<Value, DecodeError> {
        self.bump();
        let mut map = Map::new();

        loop {
            self.skip_trivia();
            if self.eat('}') {
                break;
            }

            let key = self.key()?;
            self.skip_trivia();
            if !self.eat(':') {
                return Err(self.error("expected ':' after key"));
            }
            self.skip_trivia();
            let value = self.value(depth + 1)?;
            map.insert(key, value);

            self.skip_trivia();
            if self.eat(',') {
                continue;
            }
            if self.eat('}') {
                break;
            }
            return Err(self.error("expected ',' or '}'"));
        }

        Ok(Value::Object(map))
    }

    fn key(&mut self) -> Result<String, DecodeError> {
        match self.peek() {
            Some('\'' | '"') => self.strings(),
            Some(c) if is_ident_start(c) => Ok(self.identifier().to_string()),
            Some(c) if c.is_ascii_digit() || c == '-' => self.number().map(|n| n.to_string()),
            _ => Err(self.error("expected a key")),
        }
    }

    fn sequence(&mut self, close: char, depth: usize) -> Result<Value, DecodeError> {
        self.bump();
        let mut items = Vec::new();

        loop {
            self.skip_trivia();
            if self.eat(close) {
                break;
            }

            items.push(self.value(depth + 1)?);

            self.skip_trivia();
            if self.eat(',') {
                continue;
            }
            if self.eat(close) {
                break;
            }
            return Err(self.error(format!("expected ',' or '{close}'")));
        }

        Ok(Value::Array(items))
    }

    fn identifier(&mut self) -> &'a str {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.bump();
        }
        &self.text[start..self.pos]
    }

    /// One or more adjacent string literals, concatenated.
    fn strings(&mut self) -> Result<String, DecodeError> {
        let mut out = self.string()?;
        loop {
            let checkpoint = self.pos;
            self.skip_trivia();
            if matches!(self.peek(), Some('\'' | '"')) {
                out.push_str(&self.string()?);
            } else {
                self.pos = checkpoint;
                return Ok(out);
            }
        }
    }

    fn string(&mut self) -> Result<String, DecodeError> {
        let start = self.pos;
        let Some(quote) = self.bump() else {
            return Err(self.error("expected a string"));
        };
        let triple = self.peek() == Some(quote) && self.peek_nth(1) == Some(quote);
        if triple {
            self.pos += 2 * quote.len_utf8();
        }

        let mut out = String::new();
        loop {
            let Some(c) = self.bump() else {
                return Err(error_at(start, "unterminated string"));
            };
            match c {
                '\\' => self.escape(&mut out)?,
                c if c == quote => {
                    if !triple {
                        break;
                    }
                    if self.peek() == Some(quote) && self.peek_nth(1) == Some(quote) {
                        self.pos += 2 * quote.len_utf8();
                        break;
                    }
                    out.push(c);
                }
                c => out.push(c),
            }
        }
        Ok(out)
    }

    fn escape(&mut self, out: &mut String) -> Result<(), DecodeError> {
        let offset = self.pos - 1;
        let Some(c) = self.bump() else {
            return Err(error_at(offset, "unterminated escape"));
        };
        match c {
            '\n' => {}
            '\\' | '\'' | '"' | '/' => out.push(c),
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'a' => out.push('\u{7}'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            'v' => out.push('\u{b}'),
            '0'..='7' => out.push(self.octal(c, offset)?),
            'x' => out.push(self.code_point(2, offset)?),
            'U' => out.push(self.code_point(8, offset)?),
            'u' => {
                let high = self.hex(4, offset)?;
                let code = if (0xD800..0xDC00).contains(&high) && self.rest().starts_with("\\u") {
                    self.pos += 2;
                    let low = self.hex(4, offset)?;
                    if !(0xDC00..0xE000).contains(&low) {
                        return Err(error_at(offset, "invalid unicode escape"));
                    }
                    0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
                } else {
                    high
                };
                out.push(
                    char::from_u32(code).ok_or_else(|| error_at(offset, "invalid unicode escape"))?,
                );
            }
            other => {
                out.push('\\');
                out.push(other);
            }
        }
        Ok(())
    }

    fn hex(&mut self, digits: usize, offset: usize) -> Result<u32, DecodeError> {
        let end = self.pos + digits;
        let code = self
            .text
            .get(self.pos..end)
            .filter(|s| s.chars().all(|c| c.is_ascii_hexdigit()))
            .and_then(|s| u32::from_str_radix(s, 16).ok())
            .ok_or_else(|| error_at(offset, "invalid hex escape"))?;
        self.pos = end;
        Ok(code)
    }

    /// Up to three octal digits, the first already consumed.
    fn octal(&mut self, first: char, offset: usize) -> Result<char, DecodeError> {
        let mut code = first.to_digit(8).unwrap_or_default();
        for _ in 0..2 {
            let Some(digit) = self.peek().and_then(|c| c.to_digit(8)) else {
                break;
            };
            self.bump();
            code = code * 8 + digit;
        }
        char::from_u32(code).ok_or_else(|| error_at(offset, "invalid octal escape"))
    }

    fn code_point(&mut self, digits: usize, offset: usize) -> Result<char, DecodeError> {
        let code = self.hex(digits, offset)?;
        char::from_u32(code).ok_or_else(|| error_at(offset, "invalid unicode escape"))
    }

    fn number(&mut self) -> Result<Number, DecodeError> {
        let start = self.pos;
        if matches!(self.peek(), Some('-' | '+')) {
            self.bump();
        }
        loop {
            match self.peek() {
                Some(c) if c.is_ascii_digit() || c == '.' || c == '_' => {
                    self.bump();
                }
                Some('e' | 'E') => {
                    self.bump();
                    if matches!(self.peek(), Some('-' | '+')) {
                        self.bump();
                    }
                }
                _ => break,
            }
        }

        let literal: String = self.text[start..self.pos]
            .chars()
            .filter(|&c| c != '_')
            .collect();
        let literal = literal.strip_prefix('+').unwrap_or(&literal);

        if let Ok(int) = literal.parse::<i64>() {
            return Ok(Number::from(int));
        }
        if let Ok(uint) = literal.parse::<u64>() {
            return Ok(Number::from(uint));
        }
        literal
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .ok_or_else(|| error_at(start, format!("invalid number '{literal}'")))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn error_at(offset: usize, message: impl Into<String>) -> DecodeError {
    DecodeError::Literal {
        offset,
        message: message.into(),
    }
}
