//! Dialect-aware SNBT serialization. Output is a deterministic function of `(tree, profile)`.

use super::Profile;
use crate::tag::{NbtCompound, NbtList, NbtTag};

pub(super) fn write_compound(compound: &NbtCompound, profile: Profile) -> String {
    let mut out = String::new();
    write_compound_into(&mut out, compound, profile);
    out
}

fn write_tag(out: &mut String, tag: &NbtTag, profile: Profile) {
    match tag {
        &NbtTag::Byte(value) => write_suffixed(out, value, "b", profile),
        &NbtTag::Short(value) => write_suffixed(out, value, "s", profile),
        &NbtTag::Int(value) => out.push_str(&value.to_string()),
        &NbtTag::Long(value) => write_suffixed(out, value, "L", profile),
        &NbtTag::Float(value) => write_suffixed(out, value, "f", profile),
        &NbtTag::Double(value) => write_suffixed(out, value, "d", profile),
        NbtTag::ByteArray(values) => write_array(out, "B", values, "b", profile),
        NbtTag::IntArray(values) => write_array(out, "I", values, "", profile),
        NbtTag::LongArray(values) => write_array(out, "L", values, "L", profile),
        NbtTag::String(value) => write_quoted(out, value, profile),
        NbtTag::List(list) => write_list(out, list, profile),
        NbtTag::Compound(compound) => write_compound_into(out, compound, profile),
    }
}

fn write_suffixed(out: &mut String, value: impl ToString, suffix: &str, profile: Profile) {
    out.push_str(&value.to_string());
    if profile.use_type_suffix() {
        out.push_str(suffix);
    }
}

fn write_array<T: ToString>(out: &mut String, prefix: &str, values: &[T], suffix: &str, profile: Profile) {
    out.push('[');
    out.push_str(prefix);
    out.push(';');
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        out.push_str(&value.to_string());
        if profile.use_type_suffix() {
            out.push_str(suffix);
        }
    }
    out.push(']');
}

fn write_list(out: &mut String, list: &NbtList, profile: Profile) {
    out.push('[');
    for (index, tag) in list.as_ref().iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        write_tag(out, tag, profile);
    }
    out.push(']');
}

fn write_compound_into(out: &mut String, compound: &NbtCompound, profile: Profile) {
    out.push('{');
    for (index, (key, tag)) in compound.inner().iter().enumerate() {
        if index > 0 {
            out.push(',');
        }
        write_key(out, key, profile);
        out.push(':');
        write_tag(out, tag, profile);
    }
    out.push('}');
}

fn write_key(out: &mut String, key: &str, profile: Profile) {
    if profile.legacy_parser() {
        out.push_str(key);
        return;
    }
    if matches!(profile, Profile::V1_12 | Profile::V1_13 | Profile::V1_14) && is_bare_word(key) {
        out.push_str(key);
        return;
    }
    write_quoted(out, key, profile);
}

fn is_bare_word(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '+' | '-'))
}

fn write_quoted(out: &mut String, value: &str, profile: Profile) {
    let quote = if profile.allow_single_quotes() && value.contains('"') && !value.contains('\'') {
        '\''
    } else {
        '"'
    };
    out.push(quote);
    for ch in value.chars() {
        if ch == quote || ch == '\\' {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push(quote);
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn writes_scalars_with_suffixes() {
        let mut compound = NbtCompound::new();
        compound.insert("b", 1i8);
        compound.insert("l", 2i64);
        let text = write_compound(&compound, Profile::V1_12);
        assert!(text.contains("b:1b"));
        assert!(text.contains("l:2L"));
    }

    #[test]
    fn legacy_profile_omits_suffixes() {
        let mut compound = NbtCompound::new();
        compound.insert("b", 1i8);
        let text = write_compound(&compound, Profile::V1_7);
        assert!(text.contains("b:1"));
        assert!(!text.contains("1b"));
    }

    #[test]
    fn quotes_keys_needing_escape() {
        let mut compound = NbtCompound::new();
        compound.insert("has space", 1i32);
        let text = write_compound(&compound, Profile::V1_14);
        assert!(text.contains("\"has space\":1"));
    }

    #[test]
    fn prefers_single_quote_to_avoid_escaping() {
        let mut compound = NbtCompound::new();
        compound.insert("s", "contains \"quotes\"");
        let text = write_compound(&compound, Profile::V1_21_5);
        assert!(text.contains("'contains \"quotes\"'"));
    }

    #[test]
    fn arrays_use_type_prefix() {
        let mut compound = NbtCompound::new();
        compound.insert("arr", vec![1i32, 2, 3]);
        let text = write_compound(&compound, Profile::V1_12);
        assert!(text.contains("arr:[I;1,2,3]"));
    }
}
