//! The cursor-driven recursive-descent SNBT reader used by `V1_12` and later.

use super::{Profile, SnbtError};
use crate::tag::{NbtCompound, NbtList, NbtTag};

pub(super) fn parse(input: &str, profile: Profile) -> Result<NbtCompound, SnbtError> {
    let mut cursor = Cursor::new(input, profile);
    cursor.skip_ws();
    let value = cursor.parse_value()?;
    cursor.skip_ws();
    if cursor.pos != input.len() {
        return Err(SnbtError::new(input, cursor.pos, "trailing data after root value"));
    }
    match value {
        NbtTag::Compound(compound) => Ok(compound),
        other => Err(SnbtError::new(
            input,
            0,
            format!("expected a compound as the root value, found {}", other.kind()),
        )),
    }
}

struct Cursor<'a> {
    input: &'a str,
    pos: usize,
    profile: Profile,
}

const STRUCTURAL: &[char] = &['{', '}', '[', ']', ':', ',', ';', '"', '\''];

impl<'a> Cursor<'a> {
    fn new(input: &'a str, profile: Profile) -> Self {
        Cursor { input, pos: 0, profile }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.pos ..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_at(&self, skip: usize) -> Option<char> {
        self.rest().chars().nth(skip)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(ch) if ch.is_whitespace()) {
            self.advance();
        }
    }

    fn expect_char(&mut self, expected: char) -> Result<(), SnbtError> {
        match self.advance() {
            Some(ch) if ch == expected => Ok(()),
            Some(ch) => Err(SnbtError::new(
                self.input,
                self.pos - ch.len_utf8(),
                format!("expected '{}', found '{}'", expected, ch),
            )),
            None => Err(SnbtError::eof(
                self.input,
                format!("expected '{}'", expected),
            )),
        }
    }

    fn error(&self, message: impl Into<String>) -> SnbtError {
        SnbtError::new(self.input, self.pos, message)
    }

    fn quote_chars(&self) -> &'static [char] {
        if self.profile.allow_single_quotes() {
            &['"', '\'']
        } else {
            &['"']
        }
    }

    fn parse_value(&mut self) -> Result<NbtTag, SnbtError> {
        self.skip_ws();
        match self.peek() {
            Some('{') => self.parse_compound().map(NbtTag::Compound),
            Some('[') => self.parse_list_or_array(),
            Some(q) if self.quote_chars().contains(&q) =>
                self.parse_quoted(q).map(NbtTag::String),
            Some(_) => self.parse_unquoted_value(),
            None => Err(SnbtError::eof(self.input, "expected a value")),
        }
    }

    fn parse_compound(&mut self) -> Result<NbtCompound, SnbtError> {
        self.expect_char('{')?;
        let mut compound = NbtCompound::new();
        self.skip_ws();
        if self.peek() == Some('}') {
            self.advance();
            return Ok(compound);
        }
        loop {
            self.skip_ws();
            let key = self.parse_key()?;
            self.skip_ws();
            self.expect_char(':')?;
            let value = self.parse_value()?;
            compound.insert(key, value);
            self.skip_ws();
            match self.advance() {
                Some(',') => continue,
                Some('}') => return Ok(compound),
                Some(ch) => return Err(self.error(format!("expected ',' or '}}', found '{}'", ch))),
                None => return Err(SnbtError::eof(self.input, "unterminated compound")),
            }
        }
    }

    fn parse_key(&mut self) -> Result<String, SnbtError> {
        match self.peek() {
            Some(q) if self.quote_chars().contains(&q) => self.parse_quoted(q),
            Some(_) => Ok(self.read_unquoted().to_owned()),
            None => Err(SnbtError::eof(self.input, "expected a compound key")),
        }
    }

    fn parse_quoted(&mut self, quote: char) -> Result<String, SnbtError> {
        self.expect_char(quote)?;
        let mut value = String::new();
        loop {
            match self.advance() {
                Some('\\') => match self.advance() {
                    Some(ch) if ch == quote || ch == '\\' => value.push(ch),
                    Some(ch) =>
                        return Err(self.error(format!("invalid escape sequence '\\{}'", ch))),
                    None => return Err(SnbtError::eof(self.input, "unterminated escape sequence")),
                },
                Some(ch) if ch == quote => return Ok(value),
                Some(ch) => value.push(ch),
                None => return Err(SnbtError::eof(self.input, "unterminated string")),
            }
        }
    }

    fn read_unquoted(&mut self) -> &'a str {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() || STRUCTURAL.contains(&ch) {
                break;
            }
            self.advance();
        }
        &self.input[start .. self.pos]
    }

    fn parse_unquoted_value(&mut self) -> Result<NbtTag, SnbtError> {
        let token = self.read_unquoted();
        if token.is_empty() {
            let found = self.peek().unwrap_or('\0');
            return Err(self.error(format!("unexpected character '{}'", found)));
        }
        if let Some(tag) = classify_unquoted(token) {
            return Ok(tag);
        }
        if token.eq_ignore_ascii_case("true") {
            return Ok(NbtTag::Byte(1));
        }
        if token.eq_ignore_ascii_case("false") {
            return Ok(NbtTag::Byte(0));
        }
        Ok(NbtTag::String(token.to_owned()))
    }

    fn parse_list_or_array(&mut self) -> Result<NbtTag, SnbtError> {
        self.expect_char('[')?;
        let c1 = self.peek();
        let c2 = self.peek_at(1);
        if let (Some(kind), Some(';')) = (c1, c2) {
            if kind != '"' && kind != '\'' {
                return self.parse_typed_array(kind);
            }
        }
        self.parse_list()
    }

    fn parse_typed_array(&mut self, kind: char) -> Result<NbtTag, SnbtError> {
        self.advance(); // kind letter
        self.advance(); // ';'
        self.skip_ws();
        match kind.to_ascii_uppercase() {
            'B' => self.parse_array_elements::<i8>('b', |s| s.parse().ok()).map(NbtTag::ByteArray),
            'I' => self.parse_array_elements::<i32>('i', |s| s.parse().ok()).map(NbtTag::IntArray),
            'L' => self.parse_array_elements::<i64>('l', |s| s.parse().ok()).map(NbtTag::LongArray),
            _ => Err(self.error(format!("expected 'B', 'I', or 'L', found '{}'", kind))),
        }
    }

    fn parse_array_elements<T>(
        &mut self,
        suffix: char,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<Vec<T>, SnbtError> {
        let mut values = Vec::new();
        self.skip_ws();
        if self.peek() == Some(']') {
            self.advance();
            return Ok(values);
        }
        loop {
            self.skip_ws();
            let elem_start = self.pos;
            let token = self.read_unquoted();
            if token.is_empty() {
                return Err(self.error("expected a numeric array element"));
            }
            let body = token
                .strip_suffix(|ch: char| ch.to_ascii_lowercase() == suffix)
                .unwrap_or(token);
            let value = parse(body).ok_or_else(|| {
                SnbtError::new(
                    self.input,
                    elem_start,
                    format!("element is not a valid {} array value", suffix.to_ascii_uppercase()),
                )
            })?;
            values.push(value);
            self.skip_ws();
            match self.advance() {
                Some(',') => continue,
                Some(']') => return Ok(values),
                Some(ch) => return Err(self.error(format!("expected ',' or ']', found '{}'", ch))),
                None => return Err(SnbtError::eof(self.input, "unterminated array")),
            }
        }
    }

    fn parse_list(&mut self) -> Result<NbtTag, SnbtError> {
        let mut list = NbtList::new();
        self.skip_ws();
        if self.peek() == Some(']') {
            self.advance();
            return Ok(list.into());
        }
        loop {
            self.skip_ws();
            let elem_start = self.pos;
            let value = self.parse_value()?;
            list.push(value)
                .map_err(|err| SnbtError::new(self.input, elem_start, err.to_string()))?;
            self.skip_ws();
            match self.advance() {
                Some(',') => continue,
                Some(']') => return Ok(list.into()),
                Some(ch) => return Err(self.error(format!("expected ',' or ']', found '{}'", ch))),
                None => return Err(SnbtError::eof(self.input, "unterminated list")),
            }
        }
    }
}

/// Classifies an unquoted primitive token, matching the first of the following rules in order
/// (mirroring the Minecraft client's regex-based classifier):
///
/// 1. number with an `f` suffix → float
/// 2. integer with a `b` suffix → byte
/// 3. integer with an `s` suffix → short
/// 4. integer with an `l` suffix → long
/// 5. bare integer → int
/// 6. number with a `d` suffix → double
/// 7. number containing a decimal point, no suffix required → double
///
/// Returns `None` if the token doesn't have a recognized numeric shape (the caller then falls
/// back to the `true`/`false`/string rules).
pub(super) fn classify_unquoted(token: &str) -> Option<NbtTag> {
    if token.is_empty() {
        return None;
    }

    let last = token.chars().last().unwrap();
    let (body, suffix) = if last.is_ascii_alphabetic() {
        (&token[.. token.len() - 1], Some(last.to_ascii_lowercase()))
    } else {
        (token, None)
    };

    let (is_numeric, has_dot) = numeric_shape(body);
    if !is_numeric {
        return None;
    }

    match suffix {
        Some('f') => body.parse::<f32>().ok().map(NbtTag::Float),
        Some('b') if !has_dot => body.parse::<i64>().ok().map(|v| NbtTag::Byte(v as i8)),
        Some('s') if !has_dot => body.parse::<i64>().ok().map(|v| NbtTag::Short(v as i16)),
        Some('l') if !has_dot => body.parse::<i64>().ok().map(NbtTag::Long),
        Some('d') => body.parse::<f64>().ok().map(NbtTag::Double),
        None if !has_dot => body.parse::<i64>().ok().map(|v| NbtTag::Int(v as i32)),
        None if has_dot => body.parse::<f64>().ok().map(NbtTag::Double),
        _ => None,
    }
}

/// Whether `s` has the shape `[-+]?(digits?\.digits | digits\.? )(e[-+]?digits)?` — i.e. a
/// number that `f64`/`i64` parsing would accept once an optional type suffix is stripped.
/// Returns `(matches, contains a decimal point)`.
fn numeric_shape(s: &str) -> (bool, bool) {
    let mut chars = s.chars().peekable();
    let mut has_digit = false;
    let mut has_dot = false;

    if matches!(chars.peek(), Some('+') | Some('-')) {
        chars.next();
    }

    while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
        has_digit = true;
        chars.next();
    }

    if matches!(chars.peek(), Some('.')) {
        has_dot = true;
        chars.next();
        while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
            has_digit = true;
            chars.next();
        }
    }

    if matches!(chars.peek(), Some('e') | Some('E')) {
        chars.next();
        if matches!(chars.peek(), Some('+') | Some('-')) {
            chars.next();
        }
        let mut exponent_digit = false;
        while matches!(chars.peek(), Some(c) if c.is_ascii_digit()) {
            exponent_digit = true;
            chars.next();
        }
        if !exponent_digit {
            return (false, has_dot);
        }
    }

    (has_digit && chars.peek().is_none(), has_dot)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::snbt::Profile;

    #[test]
    fn classifies_in_order() {
        assert!(matches!(classify_unquoted("1.0f"), Some(NbtTag::Float(_))));
        assert!(matches!(classify_unquoted("5b"), Some(NbtTag::Byte(5))));
        assert!(matches!(classify_unquoted("5s"), Some(NbtTag::Short(5))));
        assert!(matches!(classify_unquoted("5l"), Some(NbtTag::Long(5))));
        assert!(matches!(classify_unquoted("5"), Some(NbtTag::Int(5))));
        assert!(matches!(classify_unquoted("5d"), Some(NbtTag::Double(_))));
        assert!(matches!(classify_unquoted("5.0"), Some(NbtTag::Double(_))));
        assert!(classify_unquoted("hello").is_none());
    }

    #[test]
    fn parses_scalar_compound() {
        let compound =
            parse("{a:1b,b:2s,c:3,d:4L,e:5.0f,f:6.0d,g:\"x\"}", Profile::V1_21_5).unwrap();
        assert!(matches!(compound.get::<_, i8>("a"), Ok(1)));
        assert!(matches!(compound.get::<_, &str>("g"), Ok("x")));
    }

    #[test]
    fn typed_array_rejects_booleans() {
        let err = parse("{a:[B;true,false,1b]}", Profile::V1_21_5).unwrap_err();
        assert!(err.to_string().contains("<--[HERE]"));
    }

    #[test]
    fn error_excerpt_has_marker() {
        let err = parse("{id:\"incomplete", Profile::V1_21_5).unwrap_err();
        assert!(err.to_string().ends_with("incomplete<--[HERE]"));
    }
}
