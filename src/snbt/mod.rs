//! A version-aware codec for stringified NBT (SNBT), the textual dialect used in commands and
//! debug output. Two genuinely different parsers exist because pre-1.13 Minecraft's SNBT
//! grammar was not really a grammar: [`legacy`] tolerates its quirks with a string-splitting
//! approach, while [`modern`] is a conventional cursor-driven recursive-descent parser. Both
//! share the same [`NbtTag`]/[`NbtCompound`]/[`NbtList`] value model as their target.

mod legacy;
mod modern;
mod writer;

use crate::tag::NbtCompound;
use std::{
    error::Error,
    fmt::{self, Debug, Display, Formatter},
};

/// A named bundle of SNBT parsing and serialization rules corresponding to a Minecraft version
/// family. See the [module documentation](crate::snbt) for which parser each profile selects.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Profile {
    /// Minecraft 1.7.x: legacy string-splitting parser, double-quotes only, no type suffixes.
    V1_7,
    /// Minecraft 1.8.x: same dialect as [`V1_7`](Profile::V1_7).
    V1_8,
    /// Minecraft 1.12.x: modern parser, double-quotes only, type suffixes on output.
    V1_12,
    /// Minecraft 1.13.x: same dialect as [`V1_12`](Profile::V1_12).
    V1_13,
    /// Minecraft 1.14 through pre-1.21.5: modern parser, single quotes permitted.
    V1_14,
    /// Minecraft 1.21.5 and later: modern parser with the newer `[B;]`/`[I;]`/`[L;]` array
    /// disambiguation rules.
    V1_21_5,
}

impl Profile {
    /// Whether SNBT text under this profile is read with the [`legacy`] string-splitting parser
    /// rather than the [`modern`] cursor parser.
    pub const fn legacy_parser(self) -> bool {
        matches!(self, Profile::V1_7 | Profile::V1_8)
    }

    /// Whether a string may be quoted with `'` in addition to `"`.
    pub const fn allow_single_quotes(self) -> bool {
        matches!(self, Profile::V1_14 | Profile::V1_21_5)
    }

    /// Whether the writer should emit numeric type suffixes (`b`, `s`, `L`, `f`, `d`).
    pub const fn use_type_suffix(self) -> bool {
        !matches!(self, Profile::V1_7 | Profile::V1_8)
    }

    /// Whether this profile uses the newer typed-array disambiguation introduced in 1.21.5.
    pub const fn modern_arrays(self) -> bool {
        matches!(self, Profile::V1_21_5)
    }
}

/// Parses the given SNBT text into a compound tree under the given dialect.
///
/// # Examples
///
/// ```
/// # use mc_nbt::*;
/// use mc_nbt::snbt::{self, Profile};
///
/// let mut compound = NbtCompound::new();
/// compound.insert("short", -10i16);
/// compound.insert("string", "fizzbuzz");
/// compound.insert("array", vec![1i64, 1, 2, 3, 5]);
///
/// const SNBT: &str = "{short: -10s, string: fizzbuzz, array: [L; 1, 1, 2, 3, 5]}";
///
/// assert_eq!(compound, snbt::parse(SNBT, Profile::V1_21_5).unwrap());
/// ```
pub fn parse(input: &str, profile: Profile) -> Result<NbtCompound, SnbtError> {
    if profile.legacy_parser() {
        legacy::parse(input)
    } else {
        modern::parse(input, profile)
    }
}

/// Serializes a compound to SNBT text under the given dialect. The output is a deterministic
/// function of `(compound, profile)`.
pub fn write(compound: &NbtCompound, profile: Profile) -> String {
    writer::write_compound(compound, profile)
}

/// An error produced while parsing SNBT text. Carries the byte index the error was detected at
/// and a trimmed excerpt of the preceding input ending in the literal marker `<--[HERE]`, so
/// that error messages are actionable without a full AST dump.
pub struct SnbtError {
    message: String,
    cursor: usize,
    excerpt: String,
}

impl SnbtError {
    pub(crate) fn new(input: &str, cursor: usize, message: impl Into<String>) -> Self {
        SnbtError {
            message: message.into(),
            cursor,
            excerpt: Self::excerpt(input, cursor),
        }
    }

    pub(crate) fn eof(input: &str, message: impl Into<String>) -> Self {
        Self::new(input, input.len(), message)
    }

    fn excerpt(input: &str, cursor: usize) -> String {
        let end = cursor.min(input.len());
        // Keep only the last ~35 characters of context before the cursor.
        let start = input[.. end]
            .char_indices()
            .rev()
            .nth(34)
            .map(|(index, _)| index)
            .unwrap_or(0);
        input[start .. end].to_owned()
    }

    /// The byte index into the input at which the error was detected.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

impl Display for SnbtError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at index {}: {}<--[HERE]",
            self.message, self.cursor, self.excerpt
        )
    }
}

impl Debug for SnbtError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SnbtError {{ message: {:?}, cursor: {}, excerpt: {:?} }}",
            self.message, self.cursor, self.excerpt
        )
    }
}

impl Error for SnbtError {}
