//! The lenient string-splitting SNBT reader used by `V1_7` and `V1_8`. Pre-1.13 Minecraft never
//! had a real SNBT grammar, so rather than force-fitting the old dialect into the cursor parser
//! in [`super::modern`], this recognises only a compound root and recursively splits at
//! unquoted/unbracketed delimiters the way the historical client did.

use super::SnbtError;
use crate::tag::{NbtCompound, NbtList, NbtTag};

pub(super) fn parse(input: &str) -> Result<NbtCompound, SnbtError> {
    let trimmed = input.trim();
    let opened = trimmed
        .strip_prefix('{')
        .ok_or_else(|| SnbtError::new(input, 0, "legacy SNBT root must be a compound"))?;
    let body = opened
        .strip_suffix('}')
        .ok_or_else(|| SnbtError::eof(input, "unterminated compound, expected '}'"))?;
    parse_compound_body(input, body)
}

fn parse_compound_body(input: &str, body: &str) -> Result<NbtCompound, SnbtError> {
    let mut compound = NbtCompound::new();
    for segment in split_top_level(body, ',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let colon = find_top_level(segment, ':').ok_or_else(|| {
            SnbtError::new(input, offset_of(input, segment), "missing ':' in compound entry")
        })?;
        let key = unquote(segment[.. colon].trim());
        let value_text = segment[colon + 1 ..].trim();
        let value = parse_value(input, value_text)?;
        compound.insert(key, value);
    }
    Ok(compound)
}

fn parse_value(input: &str, text: &str) -> Result<NbtTag, SnbtError> {
    let text = text.trim();
    if let Some(inner) = text.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
        return parse_compound_body(input, inner).map(NbtTag::Compound);
    }
    if let Some(inner) = text.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        return Ok(parse_list_or_array(inner));
    }
    if is_quoted(text) {
        return Ok(NbtTag::String(unquote(text)));
    }
    Ok(classify_primitive(text).unwrap_or_else(|| NbtTag::String(text.to_owned())))
}

/// Parses a list whose surrounding `[`/`]` have already been stripped. Tolerates `index:value`
/// entries (the index is discarded) and silently drops any entry that fails to parse into the
/// list's intern kind, matching the historical client's forgiving behaviour.
fn parse_list_or_array(inner: &str) -> NbtTag {
    let entries: Vec<&str> = split_top_level(inner, ',')
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    if entries.iter().all(|entry| is_plain_integer(strip_index_prefix(entry))) && !entries.is_empty() {
        let values: Vec<i32> = entries
            .iter()
            .filter_map(|entry| strip_index_prefix(entry).parse().ok())
            .collect();
        if values.len() == entries.len() {
            return NbtTag::IntArray(values);
        }
    }

    let mut list = NbtList::new();
    for entry in entries {
        let entry = strip_index_prefix(entry);
        let value = match parse_value("", entry) {
            Ok(value) => value,
            Err(_) => continue,
        };
        let _ = list.push(value);
    }
    list.into()
}

fn strip_index_prefix(entry: &str) -> &str {
    if let Some(colon) = find_top_level(entry, ':') {
        if entry[.. colon].trim().chars().all(|c| c.is_ascii_digit()) && colon > 0 {
            return entry[colon + 1 ..].trim();
        }
    }
    entry
}

fn is_plain_integer(s: &str) -> bool {
    let s = s.strip_prefix(['-', '+']).unwrap_or(s);
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

fn classify_primitive(text: &str) -> Option<NbtTag> {
    if text.is_empty() {
        return None;
    }

    let last = text.chars().last().unwrap();
    if last.is_ascii_alphabetic() && "dfbls".contains(last.to_ascii_lowercase()) {
        let body = &text[.. text.len() - 1];
        return match last.to_ascii_lowercase() {
            'd' => body.parse::<f64>().ok().map(NbtTag::Double),
            'f' => body.parse::<f32>().ok().map(NbtTag::Float),
            'b' => body.parse::<i8>().ok().map(NbtTag::Byte),
            'l' => body.parse::<i64>().ok().map(NbtTag::Long),
            's' => body.parse::<i16>().ok().map(NbtTag::Short),
            _ => None,
        };
    }

    if is_plain_integer(text) {
        if let Ok(value) = text.parse::<i32>() {
            return Some(NbtTag::Int(value));
        }
    }

    if is_plain_double(text) {
        if let Ok(value) = text.parse::<f64>() {
            return Some(NbtTag::Double(value));
        }
    }

    if text.eq_ignore_ascii_case("true") {
        return Some(NbtTag::Byte(1));
    }
    if text.eq_ignore_ascii_case("false") {
        return Some(NbtTag::Byte(0));
    }

    None
}

fn is_plain_double(s: &str) -> bool {
    let s = s.strip_prefix(['-', '+']).unwrap_or(s);
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s, None),
    };
    let int_ok = int_part.chars().all(|c| c.is_ascii_digit());
    match frac_part {
        Some(frac) => int_ok && !frac.is_empty() && frac.chars().all(|c| c.is_ascii_digit()),
        None => !int_part.is_empty() && int_ok,
    }
}

fn is_quoted(text: &str) -> bool {
    (text.starts_with('"') && text.ends_with('"') && text.len() >= 2)
        || (text.starts_with('\'') && text.ends_with('\'') && text.len() >= 2)
}

fn unquote(text: &str) -> String {
    if is_quoted(text) {
        let inner = &text[1 .. text.len() - 1];
        let quote = text.chars().next().unwrap();
        let mut result = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(ch) = chars.next() {
            if ch == '\\' {
                match chars.next() {
                    Some(next) if next == quote || next == '\\' => result.push(next),
                    Some(next) => {
                        result.push('\\');
                        result.push(next);
                    }
                    None => result.push('\\'),
                }
            } else {
                result.push(ch);
            }
        }
        result
    } else {
        text.to_owned()
    }
}

/// Splits `s` at every top-level occurrence of `delim`, treating `"`/`'`-quoted runs and
/// `{}`/`[]`-bracketed runs as opaque so commas and colons inside them aren't mistaken for
/// structural delimiters.
fn split_top_level(s: &str, delim: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut chars = s.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        match quote {
            Some(q) => {
                if ch == '\\' {
                    chars.next();
                } else if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                '{' | '[' => depth += 1,
                '}' | ']' => depth -= 1,
                c if c == delim && depth == 0 => {
                    parts.push(&s[start .. index]);
                    start = index + delim.len_utf8();
                }
                _ => {}
            },
        }
    }
    parts.push(&s[start ..]);
    parts
}

fn find_top_level(s: &str, delim: char) -> Option<usize> {
    let mut depth = 0i32;
    let mut quote: Option<char> = None;
    let mut chars = s.char_indices().peekable();

    while let Some((index, ch)) = chars.next() {
        match quote {
            Some(q) => {
                if ch == '\\' {
                    chars.next();
                } else if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '"' | '\'' => quote = Some(ch),
                '{' | '[' => depth += 1,
                '}' | ']' => depth -= 1,
                c if c == delim && depth == 0 => return Some(index),
                _ => {}
            },
        }
    }
    None
}

fn offset_of(haystack: &str, needle: &str) -> usize {
    let haystack_start = haystack.as_ptr() as usize;
    let needle_start = needle.as_ptr() as usize;
    needle_start.saturating_sub(haystack_start)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_simple_compound() {
        let compound = parse("{foo:1,bar:hello}").unwrap();
        assert!(matches!(compound.get::<_, i32>("foo"), Ok(1)));
        assert!(matches!(compound.get::<_, &str>("bar"), Ok("hello")));
    }

    #[test]
    fn typed_suffixes() {
        let compound = parse("{a:1b,b:2s,c:3l,d:4.0f,e:5.0d}").unwrap();
        assert!(matches!(compound.get::<_, i8>("a"), Ok(1)));
        assert!(matches!(compound.get::<_, i16>("b"), Ok(2)));
        assert!(matches!(compound.get::<_, i64>("c"), Ok(3)));
    }

    #[test]
    fn int_array_detection() {
        let compound = parse("{data:[1,2,3]}").unwrap();
        assert!(matches!(compound.get::<_, &[i32]>("data"), Ok([1, 2, 3])));
    }

    #[test]
    fn index_prefixed_list_entries() {
        let compound = parse("{list:[0:a,1:b,2:c]}").unwrap();
        let list = compound.get::<_, &NbtList>("list").unwrap();
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn silently_skips_malformed_list_entries() {
        let compound = parse("{list:[1b,not_a_byte_honestly_its_fine_wait_no,2b]}");
        assert!(compound.is_ok());
    }

    #[test]
    fn errors_on_missing_colon() {
        assert!(parse("{foo}").is_err());
    }

    #[test]
    fn unterminated_compound_error_excerpt_has_marker() {
        let err = parse("{id:\"incomplete").unwrap_err();
        assert!(
            format!("{}", err).ends_with("id:\"incomplete<--[HERE]"),
            "{}",
            err
        );
    }
}
