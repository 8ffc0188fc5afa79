//! Parser for mapping literals.
//!
//! Classifier output and the marketplace address column arrive as textual
//! dictionaries, in either JSON or single-quoted dict syntax
//! (`{'category': 'house', 'price_max': 0}`). This parses both into
//! `serde_json::Value` and never evaluates anything.
//!
//! Accepted: objects, lists, tuples (as arrays), single/double-quoted
//! strings with the usual escapes, integers, floats, `True`/`False`/`None`
//! and their JSON spellings. Object keys must be strings or numbers.

use serde_json::{Map, Number, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum LiteralError {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected character {found:?} at offset {offset}")]
    Unexpected { found: char, offset: usize },

    #[error("invalid number {0:?}")]
    InvalidNumber(String),

    #[error("invalid escape sequence at offset {0}")]
    InvalidEscape(usize),

    #[error("trailing characters at offset {0}")]
    Trailing(usize),

    #[error("expected a mapping, got {0}")]
    NotAMapping(&'static str),

    #[error("nesting too deep at offset {0}")]
    TooDeep(usize),
}

/// Deepest container nesting accepted.
pub const MAX_DEPTH: usize = 64;

/// Parse `text` as a single literal value.
pub fn parse_literal(text: &str) -> Result<Value, LiteralError> {
    let mut parser = Parser::new(text);
    parser.skip_ws();
    let value = parser.value()?;
    parser.skip_ws();
    match parser.peek() {
        None => Ok(value),
        Some(_) => Err(LiteralError::Trailing(parser.offset())),
    }
}

/// Parse `text` and require the top-level value to be a mapping.
pub fn parse_mapping(text: &str) -> Result<Map<String, Value>, LiteralError> {
    match parse_literal(text)? {
        Value::Object(map) => Ok(map),
        other => Err(LiteralError::NotAMapping(kind(&other))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            depth: 0,
        }
    }

    fn offset(&self) -> usize {
        self.pos
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.bump();
        }
    }

    fn expect(&mut self, want: char) -> Result<(), LiteralError> {
        let offset = self.pos;
        match self.bump() {
            Some(c) if c == want => Ok(()),
            Some(found) => Err(LiteralError::Unexpected { found, offset }),
            None => Err(LiteralError::UnexpectedEnd),
        }
    }

    fn value(&mut self) -> Result<Value, LiteralError> {
        let offset = self.pos;
        match self.peek() {
            None => Err(LiteralError::UnexpectedEnd),
            Some('{') => self.nested(Self::mapping),
            Some('[') => self.nested(|p| p.sequence('[', ']')),
            Some('(') => self.nested(|p| p.sequence('(', ')')),
            Some(q @ ('\'' | '"')) => self.string(q).map(Value::String),
            Some(c) if c == '-' || c == '+' || c == '.' || c.is_ascii_digit() => self.number(),
            Some(c) if c.is_ascii_alphabetic() => self.keyword(),
            Some(found) => Err(LiteralError::Unexpected { found, offset }),
        }
    }

    /// Run a container parser one level deeper.
    fn nested(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<Value, LiteralError>,
    ) -> Result<Value, LiteralError> {
        if self.depth >= MAX_DEPTH {
            return Err(LiteralError::TooDeep(self.pos));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn mapping(&mut self) -> Result<Value, LiteralError> {
        self.expect('{')?;
        let mut map = Map::new();
        loop {
            self.skip_ws();
            if self.peek() == Some('}') {
                self.bump();
                return Ok(Value::Object(map));
            }

            let key_offset = self.pos;
            let key = match self.value()? {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                _ => {
                    let found = self.src[key_offset..].chars().next().unwrap_or('?');
                    return Err(LiteralError::Unexpected {
                        found,
                        offset: key_offset,
                    });
                }
            };

            self.skip_ws();
            self.expect(':')?;
            self.skip_ws();
            let value = self.value()?;
            map.insert(key, value);

            self.skip_ws();
            let offset = self.pos;
            match self.bump() {
                Some(',') => continue,
                Some('}') => return Ok(Value::Object(map)),
                Some(found) => return Err(LiteralError::Unexpected { found, offset }),
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    fn sequence(&mut self, open: char, close: char) -> Result<Value, LiteralError> {
        self.expect(open)?;
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.peek() == Some(close) {
                self.bump();
                return Ok(Value::Array(items));
            }

            items.push(self.value()?);

            self.skip_ws();
            let offset = self.pos;
            match self.bump() {
                Some(',') => continue,
                Some(c) if c == close => return Ok(Value::Array(items)),
                Some(found) => return Err(LiteralError::Unexpected { found, offset }),
                None => return Err(LiteralError::UnexpectedEnd),
            }
        }
    }

    fn string(&mut self, quote: char) -> Result<String, LiteralError> {
        self.expect(quote)?;
        let mut out = String::new();
        loop {
            let offset = self.pos;
            match self.bump().ok_or(LiteralError::UnexpectedEnd)? {
                c if c == quote => return Ok(out),
                '\\' => {
                    let c = self.bump().ok_or(LiteralError::UnexpectedEnd)?;
                    match c {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        'b' => out.push('\u{8}'),
                        'f' => out.push('\u{c}'),
                        '0' => out.push('\0'),
                        '\\' | '\'' | '"' | '/' => out.push(c),
                        'x' => out.push(self.hex_char(2, offset)?),
                        'u' => out.push(self.utf16_escape(offset)?),
                        'U' => out.push(self.hex_char(8, offset)?),
                        _ => return Err(LiteralError::InvalidEscape(offset)),
                    }
                }
                c => out.push(c),
            }
        }
    }

    fn hex_code(&mut self, digits: usize, offset: usize) -> Result<u32, LiteralError> {
        let end = self.pos + digits;
        let hex = self
            .src
            .get(self.pos..end)
            .ok_or(LiteralError::InvalidEscape(offset))?;
        let code = u32::from_str_radix(hex, 16).map_err(|_| LiteralError::InvalidEscape(offset))?;
        self.pos = end;
        Ok(code)
    }

    fn hex_char(&mut self, digits: usize, offset: usize) -> Result<char, LiteralError> {
        let code = self.hex_code(digits, offset)?;
        char::from_u32(code).ok_or(LiteralError::InvalidEscape(offset))
    }

    /// `\uXXXX`, joining a high surrogate with the `\uXXXX` low surrogate
    /// that must follow it.
    fn utf16_escape(&mut self, offset: usize) -> Result<char, LiteralError> {
        let high = self.hex_code(4, offset)?;
        if !(0xD800..=0xDBFF).contains(&high) {
            return char::from_u32(high).ok_or(LiteralError::InvalidEscape(offset));
        }

        if !self.src[self.pos..].starts_with("\\u") {
            return Err(LiteralError::InvalidEscape(offset));
        }
        self.pos += 2;
        let low = self.hex_code(4, offset)?;
        if !(0xDC00..=0xDFFF).contains(&low) {
            return Err(LiteralError::InvalidEscape(offset));
        }

        let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
        char::from_u32(code).ok_or(LiteralError::InvalidEscape(offset))
    }

    fn number(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while matches!(
            self.peek(),
            Some(c) if c.is_ascii_digit() || matches!(c, '-' | '+' | '.' | 'e' | 'E' | '_')
        ) {
            self.bump();
        }
        let raw = &self.src[start..self.pos];
        let cleaned = raw.replace('_', "");
        let cleaned = cleaned.strip_prefix('+').unwrap_or(&cleaned);

        if let Ok(i) = cleaned.parse::<i64>() {
            return Ok(Value::Number(i.into()));
        }
        if let Ok(u) = cleaned.parse::<u64>() {
            return Ok(Value::Number(u.into()));
        }
        cleaned
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| LiteralError::InvalidNumber(raw.to_string()))
    }

    fn keyword(&mut self) -> Result<Value, LiteralError> {
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
            self.bump();
        }
        match &self.src[start..self.pos] {
            "True" | "true" => Ok(Value::Bool(true)),
            "False" | "false" => Ok(Value::Bool(false)),
            "None" | "null" => Ok(Value::Null),
            _ => Err(LiteralError::Unexpected {
                found: self.src[start..].chars().next().unwrap_or('?'),
                offset: start,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_quoted_dict() {
        let map = parse_mapping(
            "{'category': 'house', 'type': 'Yeni Tikili', 'price_min': 100000, 'price_max': 0}",
        )
        .unwrap();
        assert_eq!(
            Value::Object(map),
            json!({"category": "house", "type": "Yeni Tikili", "price_min": 100000, "price_max": 0})
        );
    }

    #[test]
    fn test_json_object() {
        let map = parse_mapping(r#"{"category": "other", "item": "iphone 13", "price_max": 500.5}"#)
            .unwrap();
        assert_eq!(map["item"], json!("iphone 13"));
        assert_eq!(map["price_max"], json!(500.5));
    }

    #[test]
    fn test_python_keywords_and_tuples() {
        let value = parse_literal("{'a': True, 'b': None, 'c': (1, 2,), 'd': [False]}").unwrap();
        assert_eq!(
            value,
            json!({"a": true, "b": null, "c": [1, 2], "d": [false]})
        );
    }

    #[test]
    fn test_unicode_and_escapes() {
        let map = parse_mapping(r"{'Şəhər': 'Bakı', 'note': 'it\'s ə'}").unwrap();
        assert_eq!(map["Şəhər"], json!("Bakı"));
        assert_eq!(map["note"], json!("it's ə"));
    }

    #[test]
    fn test_numeric_keys_become_strings() {
        let map = parse_mapping("{1: 'x', -2.5: 'y'}").unwrap();
        assert_eq!(map["1"], json!("x"));
        assert_eq!(map["-2.5"], json!("y"));
    }

    #[test]
    fn test_negative_and_float_numbers() {
        assert_eq!(parse_literal("-15").unwrap(), json!(-15));
        assert_eq!(parse_literal("1e3").unwrap(), json!(1000.0));
        assert_eq!(parse_literal("1_000").unwrap(), json!(1000));
    }

    #[test]
    fn test_rejects_non_mapping() {
        assert_eq!(
            parse_mapping("['house']").unwrap_err(),
            LiteralError::NotAMapping("a sequence")
        );
    }

    #[test]
    fn test_rejects_prose() {
        assert!(parse_mapping("Sure! Here is the dict you asked for").is_err());
    }

    #[test]
    fn test_rejects_trailing_text() {
        assert!(matches!(
            parse_mapping("{'a': 1} thanks"),
            Err(LiteralError::Trailing(_))
        ));
    }

    #[test]
    fn test_rejects_unterminated() {
        assert_eq!(
            parse_mapping("{'a': 'b'").unwrap_err(),
            LiteralError::UnexpectedEnd
        );
        assert_eq!(parse_mapping("{'a': 'b").unwrap_err(), LiteralError::UnexpectedEnd);
    }

    #[test]
    fn test_rejects_function_calls() {
        assert!(parse_mapping("{'a': __import__('os')}").is_err());
    }

    #[test]
    fn test_deep_nesting_is_rejected() {
        let text = format!("{{'a': {}}}", "[".repeat(20_000));
        assert!(matches!(parse_mapping(&text), Err(LiteralError::TooDeep(_))));
    }

    #[test]
    fn test_nesting_up_to_limit_is_accepted() {
        let inner = MAX_DEPTH - 1;
        let text = format!("{{'a': {}{}}}", "[".repeat(inner), "]".repeat(inner));
        assert!(parse_mapping(&text).is_ok());

        let text = format!("{{'a': {}{}}}", "[".repeat(inner + 1), "]".repeat(inner + 1));
        assert!(matches!(parse_mapping(&text), Err(LiteralError::TooDeep(_))));
    }

    #[test]
    fn test_surrogate_pair_escape() {
        let map = parse_mapping(r#"{"item": "telefon \ud83d\ude00", "b": "\u0259"}"#).unwrap();
        assert_eq!(map["item"], json!("telefon \u{1F600}"));
        assert_eq!(map["b"], json!("ə"));
    }

    #[test]
    fn test_lone_surrogate_is_invalid() {
        assert!(matches!(
            parse_mapping(r#"{"a": "\ud83d"}"#),
            Err(LiteralError::InvalidEscape(_))
        ));
        assert!(matches!(
            parse_mapping(r#"{"a": "\ud83d\u0041"}"#),
            Err(LiteralError::InvalidEscape(_))
        ));
    }
}
