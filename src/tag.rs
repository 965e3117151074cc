use crate::{
    kind::TagKind,
    raw,
    snbt::{self, SnbtError},
    NbtRepr,
    NbtReprError,
    NbtStructureError,
};
use indexmap::IndexMap;
use std::{
    borrow::Borrow,
    convert::{AsMut, AsRef, TryFrom},
    fmt::{self, Debug, Display, Formatter},
    hash::Hash,
    ops::{Index, IndexMut},
    str::FromStr,
};

/// The generic NBT tag type, containing all supported tag variants which wrap around a
/// corresponding Rust type.
///
/// This type should still be read and written with the utilities in the [`io`] module when
/// possible if speed is the main priority.
///
/// [`io`]: crate::io
#[derive(Clone, PartialEq)]
pub enum NbtTag {
    /// A signed, one-byte integer.
    Byte(i8),
    /// A signed, two-byte integer.
    Short(i16),
    /// A signed, four-byte integer.
    Int(i32),
    /// A signed, eight-byte integer.
    Long(i64),
    /// A 32-bit floating point value.
    Float(f32),
    /// A 64-bit floating point value.
    Double(f64),
    /// An array (vec) of one-byte integers. Minecraft treats this as an array of signed bytes.
    ByteArray(Vec<i8>),
    /// A UTF-8 string.
    String(String),
    /// An NBT tag list.
    List(NbtList),
    /// An NBT tag compound.
    Compound(NbtCompound),
    /// An array (vec) of signed, four-byte integers.
    IntArray(Vec<i32>),
    /// An array (vec) of signed, eight-byte integers.
    LongArray(Vec<i64>),
}

impl NbtTag {
    /// Returns the tag kind of this tag.
    pub fn kind(&self) -> TagKind {
        match self {
            NbtTag::Byte(_) => TagKind::Byte,
            NbtTag::Short(_) => TagKind::Short,
            NbtTag::Int(_) => TagKind::Int,
            NbtTag::Long(_) => TagKind::Long,
            NbtTag::Float(_) => TagKind::Float,
            NbtTag::Double(_) => TagKind::Double,
            NbtTag::ByteArray(_) => TagKind::ByteArray,
            NbtTag::String(_) => TagKind::String,
            NbtTag::List(_) => TagKind::List,
            NbtTag::Compound(_) => TagKind::Compound,
            NbtTag::IntArray(_) => TagKind::IntArray,
            NbtTag::LongArray(_) => TagKind::LongArray,
        }
    }

    fn kind_name(&self) -> &'static str {
        self.kind().name().unwrap_or("end")
    }

    /// Returns the single character denoting this tag's type, or an empty string if this tag
    /// type has no type specifier.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mc_nbt::NbtTag;
    /// assert_eq!(NbtTag::Long(10).type_specifier(), "L");
    /// assert_eq!(NbtTag::String(String::new()).type_specifier(), "");
    ///
    /// // Note that while integers do not require a type specifier, this method will still return "I"
    /// assert_eq!(NbtTag::Int(-10).type_specifier(), "I");
    /// ```
    pub fn type_specifier(&self) -> &str {
        match self {
            NbtTag::Byte(_) => "B",
            NbtTag::Short(_) => "S",
            NbtTag::Int(_) => "I",
            NbtTag::Long(_) => "L",
            NbtTag::Float(_) => "F",
            NbtTag::Double(_) => "D",
            NbtTag::ByteArray(_) => "B",
            NbtTag::IntArray(_) => "I",
            NbtTag::LongArray(_) => "L",
            _ => "",
        }
    }

    /// Converts this NBT tag into a valid, parsable SNBT string with no extraneous spacing,
    /// using the same default dialect as [`Display`]. For dialect-aware serialization, see
    /// [`crate::snbt::write`].
    ///
    /// # Examples
    ///
    /// Simple primitive conversion:
    ///
    /// ```
    /// # use mc_nbt::NbtTag;
    /// assert_eq!(NbtTag::Byte(5).to_snbt(), "5B");
    /// assert_eq!(NbtTag::String("\"Quoted text\"".to_owned()).to_snbt(), "'\"Quoted text\"'");
    /// ```
    ///
    /// More complex tag conversion:
    ///
    /// ```
    /// # use mc_nbt::*;
    /// let mut compound = NbtCompound::new();
    /// compound.insert("foo".to_owned(), vec![-1_i64, -3_i64, -5_i64]);
    /// assert_eq!(NbtTag::Compound(compound).to_snbt(), "{foo:[L;-1,-3,-5]}");
    /// ```
    pub fn to_snbt(&self) -> String {
        macro_rules! list_to_string {
            ($list:expr) => {
                format!(
                    "[{};{}]",
                    self.type_specifier(),
                    $list
                        .iter()
                        .map(ToString::to_string)
                        .collect::<Vec<String>>()
                        .join(",")
                )
            };
        }

        match self {
            NbtTag::Byte(value) => format!("{}{}", value, self.type_specifier()),
            NbtTag::Short(value) => format!("{}{}", value, self.type_specifier()),
            NbtTag::Int(value) => format!("{}", value),
            NbtTag::Long(value) => format!("{}{}", value, self.type_specifier()),
            NbtTag::Float(value) => format!("{}{}", value, self.type_specifier()),
            NbtTag::Double(value) => format!("{}{}", value, self.type_specifier()),
            NbtTag::ByteArray(value) => list_to_string!(value),
            NbtTag::String(value) => Self::string_to_snbt(value),
            NbtTag::List(value) => value.to_snbt(),
            NbtTag::Compound(value) => value.to_snbt(),
            NbtTag::IntArray(value) => list_to_string!(value),
            NbtTag::LongArray(value) => list_to_string!(value),
        }
    }

    /// Returns whether or not the given string needs to be quoted due to non-alphanumeric or
    /// otherwise non-standard characters.
    pub fn should_quote(string: &str) -> bool {
        for ch in string.chars() {
            if ch == ':'
                || ch == ','
                || ch == '"'
                || ch == '\''
                || ch == '{'
                || ch == '}'
                || ch == '['
                || ch == ']'
            {
                return true;
            }
        }

        false
    }

    /// Wraps the given string in quotes and escapes any quotes contained in the original string.
    pub fn string_to_snbt(string: &str) -> String {
        // Determine the best option for the surrounding quotes to minimize escape sequences
        let surrounding: char;
        if string.contains('"') {
            surrounding = '\'';
        } else {
            surrounding = '"';
        }

        let mut snbt_string = String::with_capacity(2 + string.len());
        snbt_string.push(surrounding);

        // Construct the string accounting for escape sequences
        for ch in string.chars() {
            if ch == surrounding || ch == '\\' {
                snbt_string.push('\\');
            }
            snbt_string.push(ch);
        }

        snbt_string.push(surrounding);
        snbt_string
    }

    /// Widens or narrows this tag's value into an `i8`, the way a numeric scalar would be cast
    /// in a two's-complement truncation. A string payload is parsed lazily and yields `0` if it
    /// is not valid decimal text; any other tag kind also yields `0`.
    pub fn as_byte(&self) -> i8 {
        self.as_numeric(|v| v as i8, |v| v as i8, |v| v as i8, |v| v as i8, |v| v as i8, |v| v as i8)
    }

    /// See [`as_byte`](NbtTag::as_byte).
    pub fn as_short(&self) -> i16 {
        self.as_numeric(
            |v| v as i16,
            |v| v as i16,
            |v| v as i16,
            |v| v as i16,
            |v| v as i16,
            |v| v as i16,
        )
    }

    /// See [`as_byte`](NbtTag::as_byte).
    pub fn as_int(&self) -> i32 {
        self.as_numeric(
            |v| v as i32,
            |v| v as i32,
            |v| v as i32,
            |v| v as i32,
            |v| v as i32,
            |v| v as i32,
        )
    }

    /// See [`as_byte`](NbtTag::as_byte).
    pub fn as_long(&self) -> i64 {
        self.as_numeric(
            |v| v as i64,
            |v| v as i64,
            |v| v as i64,
            |v| v as i64,
            |v| v as i64,
            |v| v as i64,
        )
    }

    /// See [`as_byte`](NbtTag::as_byte).
    pub fn as_float(&self) -> f32 {
        self.as_numeric(
            |v| v as f32,
            |v| v as f32,
            |v| v as f32,
            |v| v as f32,
            |v| v as f32,
            |v| v as f32,
        )
    }

    /// See [`as_byte`](NbtTag::as_byte).
    pub fn as_double(&self) -> f64 {
        self.as_numeric(
            |v| v as f64,
            |v| v as f64,
            |v| v as f64,
            |v| v as f64,
            |v| v as f64,
            |v| v as f64,
        )
    }

    fn as_numeric<T: Default + FromStr>(
        &self,
        from_byte: impl Fn(i8) -> T,
        from_short: impl Fn(i16) -> T,
        from_int: impl Fn(i32) -> T,
        from_long: impl Fn(i64) -> T,
        from_float: impl Fn(f32) -> T,
        from_double: impl Fn(f64) -> T,
    ) -> T {
        match self {
            &NbtTag::Byte(v) => from_byte(v),
            &NbtTag::Short(v) => from_short(v),
            &NbtTag::Int(v) => from_int(v),
            &NbtTag::Long(v) => from_long(v),
            &NbtTag::Float(v) => from_float(v),
            &NbtTag::Double(v) => from_double(v),
            NbtTag::String(s) => s.trim().parse().unwrap_or_default(),
            _ => T::default(),
        }
    }
}

impl Display for NbtTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.to_snbt(), f)
    }
}

impl Debug for NbtTag {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.to_snbt(), f)
    }
}

// Implement the from trait for all the tag's internal types
macro_rules! tag_from {
    ($($type:ty, $tag:ident);*) => {
        $(
            impl From<$type> for NbtTag {
                fn from(value: $type) -> NbtTag {
                    NbtTag::$tag(value)
                }
            }
        )*
    };
}

tag_from!(
    i8, Byte;
    i16, Short;
    i32, Int;
    i64, Long;
    f32, Float;
    f64, Double;
    Vec<i8>, ByteArray;
    String, String;
    NbtList, List;
    NbtCompound, Compound;
    Vec<i32>, IntArray;
    Vec<i64>, LongArray
);

impl From<&str> for NbtTag {
    fn from(value: &str) -> NbtTag {
        NbtTag::String(value.to_owned())
    }
}

impl From<&String> for NbtTag {
    fn from(value: &String) -> NbtTag {
        NbtTag::String(value.clone())
    }
}

impl From<bool> for NbtTag {
    fn from(value: bool) -> NbtTag {
        NbtTag::Byte(if value { 1 } else { 0 })
    }
}

impl From<u8> for NbtTag {
    fn from(value: u8) -> Self {
        NbtTag::Byte(value as i8)
    }
}

impl From<Vec<u8>> for NbtTag {
    fn from(value: Vec<u8>) -> Self {
        NbtTag::ByteArray(raw::cast_byte_buf_to_signed(value))
    }
}

impl<T: NbtRepr> From<T> for NbtTag {
    fn from(x: T) -> Self {
        NbtTag::Compound(x.to_nbt())
    }
}

macro_rules! prim_from_tag {
    ($($type:ty, $tag:ident);*) => {
        $(
            impl TryFrom<&NbtTag> for $type {
                type Error = NbtStructureError;

                fn try_from(tag: &NbtTag) -> Result<Self, Self::Error> {
                    if let NbtTag::$tag(value) = tag {
                        Ok(*value)
                    } else {
                        Err(NbtStructureError::type_mismatch(stringify!($tag), tag.kind_name()))
                    }
                }
            }
        )*
    };
}

prim_from_tag!(
    i8, Byte;
    i16, Short;
    i32, Int;
    i64, Long;
    f32, Float;
    f64, Double
);

impl TryFrom<&NbtTag> for bool {
    type Error = NbtStructureError;

    fn try_from(tag: &NbtTag) -> Result<Self, Self::Error> {
        match tag {
            &NbtTag::Byte(value) => Ok(value != 0),
            &NbtTag::Short(value) => Ok(value != 0),
            &NbtTag::Int(value) => Ok(value != 0),
            &NbtTag::Long(value) => Ok(value != 0),
            _ => Err(NbtStructureError::type_mismatch(
                "Byte, Short, Int, or Long",
                tag.kind_name(),
            )),
        }
    }
}

impl TryFrom<&NbtTag> for u8 {
    type Error = NbtStructureError;

    fn try_from(tag: &NbtTag) -> Result<Self, Self::Error> {
        match tag {
            &NbtTag::Byte(value) => Ok(value as u8),
            _ => Err(NbtStructureError::type_mismatch("Byte", tag.kind_name())),
        }
    }
}

macro_rules! ref_from_tag {
    ($($type:ty, $tag:ident);*) => {
        $(
            impl<'a> TryFrom<&'a NbtTag> for &'a $type {
                type Error = NbtStructureError;

                fn try_from(tag: &'a NbtTag) -> Result<Self, Self::Error> {
                    if let NbtTag::$tag(value) = tag {
                        Ok(value)
                    } else {
                        Err(NbtStructureError::type_mismatch(stringify!($tag), tag.kind_name()))
                    }
                }
            }

            impl<'a> TryFrom<&'a mut NbtTag> for &'a mut $type {
                type Error = NbtStructureError;

                fn try_from(tag: &'a mut NbtTag) -> Result<Self, Self::Error> {
                    if let NbtTag::$tag(value) = tag {
                        Ok(value)
                    } else {
                        Err(NbtStructureError::type_mismatch(stringify!($tag), tag.kind_name()))
                    }
                }
            }
        )*
    };
}

ref_from_tag!(
    i8, Byte;
    i16, Short;
    i32, Int;
    i64, Long;
    f32, Float;
    f64, Double;
    Vec<i8>, ByteArray;
    [i8], ByteArray;
    String, String;
    str, String;
    NbtList, List;
    NbtCompound, Compound;
    Vec<i32>, IntArray;
    [i32], IntArray;
    Vec<i64>, LongArray;
    [i64], LongArray
);

impl<'a> TryFrom<&'a NbtTag> for &'a u8 {
    type Error = NbtStructureError;

    fn try_from(tag: &'a NbtTag) -> Result<Self, Self::Error> {
        if let NbtTag::Byte(value) = tag {
            Ok(unsafe { &*(value as *const i8 as *const u8) })
        } else {
            Err(NbtStructureError::type_mismatch("Byte", tag.kind_name()))
        }
    }
}

impl<'a> TryFrom<&'a NbtTag> for &'a [u8] {
    type Error = NbtStructureError;

    fn try_from(tag: &'a NbtTag) -> Result<Self, Self::Error> {
        if let NbtTag::ByteArray(value) = tag {
            Ok(raw::cast_bytes_to_unsigned(value.as_slice()))
        } else {
            Err(NbtStructureError::type_mismatch("ByteArray", tag.kind_name()))
        }
    }
}

macro_rules! from_tag {
    ($($type:ty, $tag:ident);*) => {
        $(
            impl TryFrom<NbtTag> for $type {
                type Error = NbtStructureError;

                fn try_from(tag: NbtTag) -> Result<Self, Self::Error> {
                    let name = tag.kind_name();
                    if let NbtTag::$tag(value) = tag {
                        Ok(value)
                    } else {
                        Err(NbtStructureError::type_mismatch(stringify!($tag), name))
                    }
                }
            }
        )*
    };
}

from_tag!(
    i8, Byte;
    i16, Short;
    i32, Int;
    i64, Long;
    f32, Float;
    f64, Double;
    Vec<i8>, ByteArray;
    String, String;
    NbtList, List;
    NbtCompound, Compound;
    Vec<i32>, IntArray;
    Vec<i64>, LongArray
);

impl TryFrom<NbtTag> for Vec<u8> {
    type Error = NbtStructureError;

    fn try_from(tag: NbtTag) -> Result<Self, Self::Error> {
        let name = tag.kind_name();
        if let NbtTag::ByteArray(value) = tag {
            Ok(raw::cast_byte_buf_to_unsigned(value))
        } else {
            Err(NbtStructureError::type_mismatch("ByteArray", name))
        }
    }
}

/// The NBT tag list type: a homogeneous, ordered sequence of tags sharing one "intern" kind.
///
/// An empty list has an intern kind of [`TagKind::End`]. The intern kind is fixed by the first
/// element inserted and is enforced on every subsequent [`push`](NbtList::push) or
/// [`set`](NbtList::set); clearing a list empties it but does not forget the intern kind until
/// the next push overwrites it.
///
/// [`NbtTag`]: crate::NbtTag
#[derive(Clone, PartialEq)]
pub struct NbtList {
    tags: Vec<NbtTag>,
    intern: TagKind,
}

impl NbtList {
    /// Returns a new, empty NBT tag list with intern kind [`TagKind::End`].
    pub const fn new() -> Self {
        NbtList {
            tags: Vec::new(),
            intern: TagKind::End,
        }
    }

    /// Returns a mutable reference to the internal vector of this NBT list. Pushing
    /// mismatched-kind tags through this reference bypasses the intern-kind check.
    pub fn inner_mut(&mut self) -> &mut Vec<NbtTag> {
        &mut self.tags
    }

    /// Returns the internal vector of this NBT list.
    pub fn into_inner(self) -> Vec<NbtTag> {
        self.tags
    }

    /// Returns a new NBT tag list with the given initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        NbtList {
            tags: Vec::with_capacity(capacity),
            intern: TagKind::End,
        }
    }

    /// Returns the kind every element of this list shares. [`TagKind::End`] if the list is
    /// empty and has never held an element.
    pub fn intern_kind(&self) -> TagKind {
        self.intern
    }

    /// Clones the data in the given list and converts it into an [`NbtList`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use mc_nbt::NbtList;
    /// let list: Vec<i32> = vec![1, 2, 3];
    /// let nbt_list = NbtList::clone_from(&list);
    /// assert_eq!(nbt_list.iter_map::<i32>().flatten().collect::<Vec<i32>>(), list);
    /// ```
    pub fn clone_from<'a, T, L>(list: L) -> Self
    where
        T: Clone + Into<NbtTag> + 'a,
        L: IntoIterator<Item = &'a T>,
    {
        let tags: Vec<NbtTag> = list.into_iter().map(|x| x.clone().into()).collect();
        let intern = tags.first().map(NbtTag::kind).unwrap_or(TagKind::End);
        NbtList { tags, intern }
    }

    /// Creates an [`NbtList`] of [`NbtCompound`]s by mapping each element in the given list to
    /// its NBT representation.
    pub fn clone_repr_from<'a, T, L>(list: L) -> Self
    where
        T: NbtRepr + 'a,
        L: IntoIterator<Item = &'a T>,
    {
        let tags: Vec<NbtTag> = list.into_iter().map(|x| x.to_nbt().into()).collect();
        let intern = tags.first().map(NbtTag::kind).unwrap_or(TagKind::End);
        NbtList { tags, intern }
    }

    /// Iterates over this tag list, converting each tag reference into the specified type.
    ///
    /// # Examples
    ///
    /// ```
    /// # use mc_nbt::{NbtList, NbtStructureError};
    /// let mut list = NbtList::new();
    /// list.push(0i32).unwrap();
    /// list.push(1i32).unwrap();
    ///
    /// let mut iter = list.iter_map::<i32>();
    /// assert!(matches!(iter.next(), Some(Ok(0i32))));
    /// assert!(matches!(iter.next(), Some(Ok(1i32))));
    /// assert!(iter.next().is_none());
    /// ```
    pub fn iter_map<'a, T: TryFrom<&'a NbtTag>>(
        &'a self,
    ) -> impl Iterator<Item = Result<T, <T as TryFrom<&'a NbtTag>>::Error>> + 'a {
        self.tags.iter().map(|tag| T::try_from(tag))
    }

    /// Iterates over mutable references to the tags in this list, converting each tag reference
    /// into the specified type. See [`iter_map`](NbtList::iter_map) for usage details.
    pub fn iter_mut_map<'a, T: TryFrom<&'a mut NbtTag>>(
        &'a mut self,
    ) -> impl Iterator<Item = Result<T, <T as TryFrom<&'a mut NbtTag>>::Error>> + 'a {
        self.tags.iter_mut().map(|tag| T::try_from(tag))
    }

    /// Converts this tag list to a valid SNBT string.
    pub fn to_snbt(&self) -> String {
        let mut snbt_list = String::with_capacity(2);
        snbt_list.push('[');
        snbt_list.push_str(
            &self
                .tags
                .iter()
                .map(|tag| tag.to_snbt())
                .collect::<Vec<String>>()
                .join(","),
        );
        snbt_list.push(']');
        snbt_list
    }

    /// Returns the length of this list.
    #[inline]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true if this tag list has a length of zero, false otherwise.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Returns the value of the tag at the given index, or an error if the index is out of
    /// bounds or the tag type does not match the type specified.
    ///
    /// ```
    /// # use mc_nbt::*;
    /// let list = NbtList::clone_from(&vec![1i32, 2, 3]);
    ///
    /// assert!(matches!(list.get::<i32>(0), Ok(1)));
    /// assert!(list.get::<f64>(0).is_err()); // Type mismatch
    /// assert!(list.get::<i32>(10).is_err()); // Invalid index
    /// ```
    pub fn get<'a, T>(&'a self, index: usize) -> Result<T, NbtReprError>
    where
        T: TryFrom<&'a NbtTag>,
        T::Error: Into<anyhow::Error>,
    {
        T::try_from(
            self.tags
                .get(index)
                .ok_or_else(|| NbtStructureError::invalid_index(index, self.len()))?,
        )
        .map_err(NbtReprError::from_any)
    }

    /// Returns a mutable reference to the tag at the given index, or an error if the index is
    /// out of bounds or the tag type does not match the type specified.
    pub fn get_mut<'a, T>(&'a mut self, index: usize) -> Result<T, NbtReprError>
    where
        T: TryFrom<&'a mut NbtTag>,
        T::Error: Into<anyhow::Error>,
    {
        let len = self.len();
        T::try_from(
            self.tags
                .get_mut(index)
                .ok_or_else(|| NbtStructureError::invalid_index(index, len))?,
        )
        .map_err(NbtReprError::from_any)
    }

    /// Pushes the given value to the back of the list after wrapping it in an `NbtTag`. Fails
    /// with [`TypeMismatch`](NbtStructureError::TypeMismatch) if the list is non-empty and the
    /// value's kind does not match [`intern_kind`](NbtList::intern_kind); pushing to an empty
    /// list always succeeds and (re)establishes the intern kind.
    ///
    /// ```
    /// # use mc_nbt::*;
    /// let mut list = NbtList::new();
    ///
    /// list.push(10i32).unwrap();
    ///
    /// assert!(matches!(list.get::<i32>(0), Ok(10)));
    /// assert!(list.push(1.0f64).is_err()); // Type mismatch
    /// ```
    pub fn push<T: Into<NbtTag>>(&mut self, value: T) -> Result<(), NbtStructureError> {
        let value = value.into();
        if self.tags.is_empty() {
            self.intern = value.kind();
        } else if value.kind() != self.intern {
            return Err(NbtStructureError::type_mismatch(
                self.intern.name().unwrap_or("end"),
                value.kind().name().unwrap_or("end"),
            ));
        }
        self.tags.push(value);
        Ok(())
    }

    /// Replaces the tag at the given index, enforcing the same intern-kind rule as
    /// [`push`](NbtList::push). Fails with `InvalidIndex` if out of bounds.
    pub fn set<T: Into<NbtTag>>(&mut self, index: usize, value: T) -> Result<(), NbtStructureError> {
        let len = self.tags.len();
        if index >= len {
            return Err(NbtStructureError::invalid_index(index, len));
        }
        let value = value.into();
        if value.kind() != self.intern {
            return Err(NbtStructureError::type_mismatch(
                self.intern.name().unwrap_or("end"),
                value.kind().name().unwrap_or("end"),
            ));
        }
        self.tags[index] = value;
        Ok(())
    }

    /// Removes and returns the tag at the given index, shifting later elements down. Fails with
    /// `InvalidIndex` if out of bounds.
    pub fn remove(&mut self, index: usize) -> Result<NbtTag, NbtStructureError> {
        let len = self.tags.len();
        if index >= len {
            return Err(NbtStructureError::invalid_index(index, len));
        }
        Ok(self.tags.remove(index))
    }

    /// Empties this list. The intern kind is retained until the next [`push`](NbtList::push)
    /// or [`set`](NbtList::set) overwrites it.
    pub fn clear(&mut self) {
        self.tags.clear();
    }
}

impl Default for NbtList {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Into<NbtTag>> From<Vec<T>> for NbtList {
    fn from(list: Vec<T>) -> Self {
        let tags: Vec<NbtTag> = list.into_iter().map(|x| x.into()).collect();
        let intern = tags.first().map(NbtTag::kind).unwrap_or(TagKind::End);
        NbtList { tags, intern }
    }
}

impl AsRef<[NbtTag]> for NbtList {
    fn as_ref(&self) -> &[NbtTag] {
        &self.tags
    }
}

impl AsMut<[NbtTag]> for NbtList {
    fn as_mut(&mut self) -> &mut [NbtTag] {
        &mut self.tags
    }
}

impl Display for NbtList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.to_snbt(), f)
    }
}

impl Debug for NbtList {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.to_snbt(), f)
    }
}

impl Index<usize> for NbtList {
    type Output = NbtTag;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tags[index]
    }
}

impl IndexMut<usize> for NbtList {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.tags[index]
    }
}

macro_rules! numeric_accessor {
    ($get:ident, $get_or:ident, $ty:ty, $variant:ident, $name:literal) => {
        /// Returns the named value, coercing a string payload via decimal parsing (yielding `0`
        /// on parse failure) to match legacy Minecraft save data. Fails with `Missing` if the
        /// name is absent, or `TypeMismatch` if present with an incompatible, non-string kind.
        pub fn $get(&self, name: &str) -> Result<$ty, NbtReprError> {
            match self.0.get(name) {
                Some(NbtTag::$variant(value)) => Ok(*value),
                Some(NbtTag::String(s)) => Ok(s.trim().parse::<$ty>().unwrap_or_default()),
                Some(other) =>
                    Err(NbtStructureError::type_mismatch($name, other.kind_name()).into()),
                None => Err(NbtStructureError::missing_tag(name).into()),
            }
        }

        /// Like [`
        #[doc = stringify!($get)]
        /// `](Self::
        #[doc = stringify!($get)]
        /// ), but returns `default` instead of failing when the name is absent or holds an
        /// incompatible, non-string kind.
        pub fn $get_or(&self, name: &str, default: $ty) -> $ty {
            match self.0.get(name) {
                Some(NbtTag::$variant(value)) => *value,
                Some(NbtTag::String(s)) => s.trim().parse::<$ty>().unwrap_or_default(),
                _ => default,
            }
        }
    };
}

/// The NBT tag compound type: an ordered set of uniquely-named tags.
///
/// Iteration follows insertion order. Replacing an existing entry by name preserves its ordinal
/// position; removing an entry swaps the last entry into the vacated slot (so iteration order
/// changes on removal, but both name and ordinal lookups stay O(1)). Backed by an
/// [`indexmap::IndexMap`], which provides exactly this semantic natively.
///
/// [`NbtTag`]: crate::NbtTag
#[derive(Clone, PartialEq)]
pub struct NbtCompound(pub(crate) IndexMap<String, NbtTag>);

impl NbtCompound {
    /// Returns a new, empty NBT tag compound.
    pub fn new() -> Self {
        NbtCompound(IndexMap::new())
    }

    /// Returns a reference to the internal map of this compound.
    pub fn inner(&self) -> &IndexMap<String, NbtTag> {
        &self.0
    }

    /// Returns a mutable reference to the internal map of this compound.
    pub fn inner_mut(&mut self) -> &mut IndexMap<String, NbtTag> {
        &mut self.0
    }

    /// Returns the internal map of this NBT compound.
    pub fn into_inner(self) -> IndexMap<String, NbtTag> {
        self.0
    }

    /// Returns a new NBT tag compound with the given initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        NbtCompound(IndexMap::with_capacity(capacity))
    }

    /// Clones the data in the given map and converts it into an [`NbtCompound`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use mc_nbt::NbtCompound;
    /// # use std::collections::HashMap;
    /// let mut map = HashMap::new();
    /// map.insert("foo", 10i32);
    /// map.insert("bar", -5i32);
    ///
    /// let compound = NbtCompound::clone_from(&map);
    /// assert_eq!(
    ///     compound.get::<_, i32>("foo").unwrap() + compound.get::<_, i32>("bar").unwrap(),
    ///     5i32
    /// );
    /// ```
    pub fn clone_from<'a, K, V, M>(map: &'a M) -> Self
    where
        K: Clone + Into<String> + 'a,
        V: Clone + Into<NbtTag> + 'a,
        &'a M: IntoIterator<Item = (&'a K, &'a V)>,
    {
        NbtCompound(
            map.into_iter()
                .map(|(key, value)| (key.clone().into(), value.clone().into()))
                .collect(),
        )
    }

    /// Creates an [`NbtCompound`] of [`NbtCompound`]s by mapping each element in the given map
    /// to its NBT representation.
    pub fn clone_repr_from<'a, K, V, M>(map: &'a M) -> Self
    where
        K: Clone + Into<String> + 'a,
        V: NbtRepr + 'a,
        &'a M: IntoIterator<Item = (&'a K, &'a V)>,
    {
        NbtCompound(
            map.into_iter()
                .map(|(key, value)| (key.clone().into(), value.to_nbt().into()))
                .collect(),
        )
    }

    /// Iterates over this tag compound in insertion order, converting each tag reference into
    /// the specified type. Each key is paired with the result of the attempted conversion; the
    /// iterator does not terminate even if some conversions fail.
    pub fn iter_map<'a, T: TryFrom<&'a NbtTag>>(
        &'a self,
    ) -> impl Iterator<Item = (&'a str, Result<T, <T as TryFrom<&'a NbtTag>>::Error>)> + 'a {
        self.0
            .iter()
            .map(|(key, tag)| (key.as_str(), T::try_from(tag)))
    }

    /// Iterates over this tag compound, converting each mutable tag reference into the
    /// specified type. See [`iter_map`](NbtCompound::iter_map) for details.
    pub fn iter_mut_map<'a, T: TryFrom<&'a mut NbtTag>>(
        &'a mut self,
    ) -> impl Iterator<Item = (&'a str, Result<T, <T as TryFrom<&'a mut NbtTag>>::Error>)> + 'a
    {
        self.0
            .iter_mut()
            .map(|(key, tag)| (key.as_str(), T::try_from(tag)))
    }

    /// Converts this tag compound into a valid SNBT string, in iteration order.
    pub fn to_snbt(&self) -> String {
        let mut snbt_compound = String::with_capacity(2);
        snbt_compound.push('{');
        snbt_compound.push_str(
            &self
                .0
                .iter()
                .map(|(key, tag)| {
                    if NbtTag::should_quote(key) {
                        format!("{}:{}", NbtTag::string_to_snbt(key), tag.to_snbt())
                    } else {
                        format!("{}:{}", key, tag.to_snbt())
                    }
                })
                .collect::<Vec<String>>()
                .join(","),
        );
        snbt_compound.push('}');
        snbt_compound
    }

    /// Returns the number of tags in this compound.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the length of this compound is zero, false otherwise.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the value of the tag with the given name, or an error if no tag exists with that
    /// name or it holds a different kind. Performs no string-to-number coercion; see the
    /// `get_byte`/`get_int`/etc. family for that.
    ///
    /// ```
    /// # use mc_nbt::*;
    /// let mut compound = NbtCompound::new();
    /// compound.insert("test", 1.0f64);
    ///
    /// assert!((compound.get::<_, f64>("test").unwrap() - 1.0f64).abs() < 1e-5);
    /// assert!(compound.get::<_, i32>("test").is_err()); // Type mismatch
    /// assert!(compound.get::<_, f64>("foo").is_err()); // Missing tag
    /// ```
    pub fn get<'a, 'b, K, T>(&'a self, name: &'b K) -> Result<T, NbtReprError>
    where
        String: Borrow<K>,
        K: Hash + Eq + ?Sized,
        &'b K: Into<String>,
        T: TryFrom<&'a NbtTag>,
        T::Error: Into<anyhow::Error>,
    {
        T::try_from(
            self.0
                .get(name)
                .ok_or_else(|| NbtStructureError::MissingTag { name: name.into() })?,
        )
        .map_err(NbtReprError::from_any)
    }

    /// Returns a mutable reference to the tag with the given name, or an error if no tag exists
    /// with that name or it holds a different kind.
    ///
    /// ```
    /// # use mc_nbt::*;
    /// let mut compound = NbtCompound::new();
    /// compound.insert("test", 1.0f64);
    ///
    /// *compound.get_mut::<_, &mut f64>("test").unwrap() *= 2.0;
    ///
    /// assert!((compound.get::<_, f64>("test").unwrap() - 2.0f64).abs() < 1e-5);
    /// ```
    pub fn get_mut<'a, 'b, K, T>(&'a mut self, name: &'b K) -> Result<T, NbtReprError>
    where
        String: Borrow<K>,
        K: Hash + Eq + ?Sized,
        &'b K: Into<String>,
        T: TryFrom<&'a mut NbtTag>,
        T::Error: Into<anyhow::Error>,
    {
        T::try_from(
            self.0
                .get_mut(name)
                .ok_or_else(|| NbtStructureError::MissingTag { name: name.into() })?,
        )
        .map_err(NbtReprError::from_any)
    }

    /// Returns the (ordinal index, tag) pair at the given ordinal, or `None` if out of bounds.
    pub fn get_at(&self, index: usize) -> Option<(&str, &NbtTag)> {
        self.0
            .get_index(index)
            .map(|(key, tag)| (key.as_str(), tag))
    }

    /// Returns the ordinal index of the named entry, or `None` if absent.
    pub fn index_of<K>(&self, name: &K) -> Option<usize>
    where
        String: Borrow<K>,
        K: Hash + Eq + ?Sized,
    {
        self.0.get_index_of(name)
    }

    /// Returns whether or not this compound has a tag with the given name.
    ///
    /// ```
    /// # use mc_nbt::*;
    /// let mut compound = NbtCompound::new();
    /// compound.insert("test", 1.0f64);
    ///
    /// assert!(compound.contains_key("test"));
    /// assert!(!compound.contains_key("foo"));
    /// ```
    #[inline]
    pub fn contains_key<K>(&self, key: &K) -> bool
    where
        String: Borrow<K>,
        K: Hash + Eq + ?Sized,
    {
        self.0.contains_key(key)
    }

    /// Adds the given value to this compound under the given name, wrapping it in an `NbtTag`.
    /// If the name already exists, its value is replaced in place and its ordinal position is
    /// preserved; otherwise the entry is appended.
    ///
    /// ```
    /// # use mc_nbt::*;
    /// let mut compound = NbtCompound::new();
    /// compound.insert("test", 1.0f64);
    ///
    /// assert!((compound.get::<_, f64>("test").unwrap() - 1.0f64).abs() < 1e-5);
    /// ```
    pub fn insert<K: Into<String>, T: Into<NbtTag>>(&mut self, name: K, value: T) {
        self.0.insert(name.into(), value.into());
    }

    /// Removes the named entry, swapping the last entry into the vacated ordinal slot. Returns
    /// whether an entry was present to remove.
    pub fn remove<K>(&mut self, name: &K) -> bool
    where
        String: Borrow<K>,
        K: Hash + Eq + ?Sized,
    {
        self.0.swap_remove(name).is_some()
    }

    numeric_accessor!(get_byte, get_byte_or, i8, Byte, "byte");

    numeric_accessor!(get_short, get_short_or, i16, Short, "short");

    numeric_accessor!(get_int, get_int_or, i32, Int, "int");

    numeric_accessor!(get_long, get_long_or, i64, Long, "long");

    numeric_accessor!(get_float, get_float_or, f32, Float, "float");

    numeric_accessor!(get_double, get_double_or, f64, Double, "double");

    /// Returns the named string value. Fails with `Missing` if absent, `TypeMismatch` if a
    /// different kind.
    pub fn get_string(&self, name: &str) -> Result<&str, NbtReprError> {
        match self.0.get(name) {
            Some(NbtTag::String(value)) => Ok(value.as_str()),
            Some(other) => Err(NbtStructureError::type_mismatch("string", other.kind_name()).into()),
            None => Err(NbtStructureError::missing_tag(name).into()),
        }
    }

    /// Like [`get_string`](Self::get_string), but returns `default` instead of failing.
    pub fn get_string_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        match self.0.get(name) {
            Some(NbtTag::String(value)) => value.as_str(),
            _ => default,
        }
    }

    /// Returns the named compound value. Fails with `Missing` if absent, `TypeMismatch` if a
    /// different kind.
    pub fn get_compound(&self, name: &str) -> Result<&NbtCompound, NbtReprError> {
        match self.0.get(name) {
            Some(NbtTag::Compound(value)) => Ok(value),
            Some(other) =>
                Err(NbtStructureError::type_mismatch("compound", other.kind_name()).into()),
            None => Err(NbtStructureError::missing_tag(name).into()),
        }
    }

    /// Like [`get_compound`](Self::get_compound), but returns `default` instead of failing.
    pub fn get_compound_or<'a>(&'a self, name: &str, default: &'a NbtCompound) -> &'a NbtCompound {
        match self.0.get(name) {
            Some(NbtTag::Compound(value)) => value,
            _ => default,
        }
    }

    /// Parses an NBT compound from SNBT text under the default (most permissive modern) dialect.
    /// For a specific Minecraft-version dialect, use [`crate::snbt::parse`] directly.
    ///
    /// # Example
    ///
    /// ```
    /// # use mc_nbt::NbtCompound;
    /// let tag = NbtCompound::from_snbt(r#"{string:Stuff, list:[I;1,2,3,4,5]}"#).unwrap();
    /// assert!(matches!(tag.get::<_, &str>("string"), Ok("Stuff")));
    /// assert_eq!(tag.get::<_, &[i32]>("list").unwrap(), vec![1,2,3,4,5].as_slice());
    /// ```
    pub fn from_snbt(input: &str) -> Result<Self, SnbtError> {
        snbt::parse(input, snbt::Profile::V1_21_5)
    }
}

impl Default for NbtCompound {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for NbtCompound {
    type Err = SnbtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_snbt(s)
    }
}

impl Display for NbtCompound {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.to_snbt(), f)
    }
}

impl Debug for NbtCompound {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(&self.to_snbt(), f)
    }
}
