#![deny(rust_2018_idioms)]
#![warn(missing_debug_implementations, missing_docs)]

/*!
Binary and stringified (SNBT) codecs for Minecraft's Named Binary Tag format.

This crate provides a typed in-memory tree model for NBT data ([`NbtTag`], [`NbtCompound`],
[`NbtList`]), a bit-exact big-endian binary codec with gz/zlib framing ([`io`]), and a
version-aware SNBT text codec spanning the dialects used from Minecraft 1.7 through 1.21.5
([`snbt`]).

# Basic Usage

The basic unit of NBT data is the [`NbtTag`]. Larger data structures are represented through a
tree of compounds (ordered maps) and lists of NBT tags.

## Creating NBT Data

```
# use mc_nbt::*;
let mut compound = NbtCompound::new();
compound.insert("foo", 123);
compound.insert("bar", -3.6f32);

let mut list = NbtList::with_capacity(3);
(1i64..=3).for_each(|x| list.push(x).unwrap());
compound.insert("list", list);

*compound.get_mut::<_, &mut i32>("foo").unwrap() += 1;

assert!(matches!(compound.get::<_, i32>("foo"), Ok(124)));
assert!(compound.get::<_, f64>("bar").is_err());
assert!(compound.get::<_, &NbtTag>("list").is_ok());
```

## Reading and Writing NBT

```
# use mc_nbt::*;
use mc_nbt::io::{self, Flavor};
use std::io::Cursor;

let mut compound = NbtCompound::new();
compound.insert("foo", 123);
compound.insert("bar", -3.6f32);

let mut binary: Vec<u8> = Vec::new();
io::write_nbt(&mut binary, Some("root-tag"), &compound, Flavor::Uncompressed).unwrap();

let read_compound = io::read_nbt(&mut Cursor::new(binary), Flavor::Uncompressed).unwrap();
assert_eq!(read_compound.1, "root-tag"); // The root tag's name is generally unused
assert_eq!(read_compound.0, compound);
```

# Querying Tags

Generics are used to make the tag querying process as seamless as possible, however this
allows for two types of errors to occur: missing tags (invalid key or index), and tag type
mismatches. Thus, methods that would normally return an [`Option`](Option) in `std` collection
equivalents return a [`Result`](Result) in this crate.

An error converting NBT tags directly into unwrapped values via [`TryFrom`](std::convert::TryFrom)
and [`TryInto`](std::convert::TryInto) is represented by an [`NbtStructureError`](crate::NbtStructureError).
An error querying an [`NbtCompound`] or [`NbtList`] is represented by an [`NbtReprError`](crate::NbtReprError),
which is short for "NBT representation error." See the error's documentation for details.

```
# use mc_nbt::*;
use std::convert::TryFrom;

let tag1: NbtTag = vec![1i8, 2, 3].into();
let tag2: NbtTag = "abcde".into();

assert_eq!(Vec::<i8>::try_from(tag1).unwrap(), vec![1i8, 2, 3]);
assert!(i16::try_from(&tag2).is_err()); // Type mismatch
```

```
# use mc_nbt::*;
let mut compound = NbtCompound::new();
compound.insert("foo", 123);
compound.insert("bar", -3.6f32);

assert!(compound.get::<_, i32>("fooz").is_err()); // Missing tag
assert!(compound.get::<_, i32>("bar").is_err()); // Type mismatch
```

Named numeric accessors like [`get_int`](NbtCompound::get_int) additionally coerce a stored
string by parsing it, returning `0` on failure, matching legacy Minecraft save-compatibility
behavior; the generic `get` accessors above do not perform this coercion.

# Collection Types and Iteration

The [`NbtCompound`] and [`NbtList`] types are ordered wrappers around an
[`IndexMap`](indexmap::IndexMap) and a [`Vec`](Vec) respectively. Because [`NbtTag`]s obscure
the type of data actually stored, these wrappers provide utilities for unpacking tags into
concrete types. If greater functionality is required, then the internal collection managed by
these wrappers can be accessed through calls to [`as_ref`](std::convert::AsRef::as_ref) and
[`as_mut`](std::convert::AsMut::as_mut).

## Lists

Minecraft's NBT specification has special tags for arrays (or [`Vec`](Vec)s in rust) of `i8`,
`i32`, and `i64`. Thus, vecs of these types can be directly converted into [`NbtTag`]s. All
other NBT-compatible types must be stored in an [`NbtList`], whose intern kind is fixed on
first insertion; [`push`](NbtList::push) and [`set`](NbtList::set) fail with
[`NbtStructureError::TypeMismatch`] rather than silently producing a non-homogenous list.

Obtaining the aforementioned special list types can be done through a regular query.
```
# use mc_nbt::*;
let mut compound = NbtCompound::new();
compound.insert("list", vec![10i32, 20, 30]);

compound.get_mut::<_, &mut [i32]>("list")
    .unwrap()
    .iter_mut()
    .for_each(|x| *x /= 10);

let list = compound.get::<_, &[i32]>("list");
assert!(list.is_ok());
assert_eq!(list.unwrap(), [1i32, 2, 3].as_ref());
```

Utility methods are provided for NBT lists to iterate over unpacked values. See
[`iter_map`](crate::NbtList::iter_map) and [`iter_mut_map`](crate::NbtList::iter_mut_map).
```
# use mc_nbt::*;
let mut list = NbtList::new();
list.push("abc").unwrap();
list.push("ijk").unwrap();
list.push("xyz").unwrap();

list.iter_mut_map::<&mut String>()
    .for_each(|s| s.unwrap().push('!'));

let mut iter = list.iter_map::<&str>();
assert!(matches!(iter.next(), Some(Ok("abc!"))));
assert!(matches!(iter.next(), Some(Ok("ijk!"))));
assert!(matches!(iter.next(), Some(Ok("xyz!"))));
assert!(matches!(iter.next(), None));
```

NBT lists can be created by cloning data from an iterator (or something which can be
converted into an iterator) via [`clone_from`](crate::NbtList::clone_from).
```
# use mc_nbt::*;
let mut list1 = NbtList::new();
list1.push("abc").unwrap();
list1.push("ijk").unwrap();
list1.push("xyz").unwrap();

let list2 = NbtList::clone_from(&["abc", "ijk", "xyz"]);

assert_eq!(list1, list2);
```

## Compounds

[`NbtCompound`]s have the same set of utility functions as [`NbtList`]s, except for the
obvious fact that compounds use string keys instead of indices. Similar to lists, compounds
have [`iter_map`](crate::NbtCompound::iter_map) and [`iter_mut_map`](crate::NbtCompound::iter_mut_map)
utility functions, as well as a [`clone_from`](crate::NbtCompound::clone_from) constructor.
Access by name and by ordinal index (see [`get_at`](NbtCompound::get_at)) are both O(1).
See the documentation for more details.

# Stringified NBT (SNBT)

Minecraft also contains a string encoding of NBT data called SNBT. This encoding is basically an
extension of JSON with stricter types and looser rules regarding string quotation, and it has
changed shape across Minecraft versions; see the [`snbt`](crate::snbt) module documentation for
the version-aware [`Profile`](crate::snbt::Profile) this crate models.

```
# use mc_nbt::*;
use mc_nbt::snbt::{self, Profile};

let tag: NbtTag = vec![10i8, 15, 20].into();
assert_eq!(tag.to_snbt(), "[B;10,15,20]");

let mut compound = NbtCompound::new();
compound.insert("short", -10i16);
compound.insert("string", "fizzbuzz");
compound.insert("array", vec![1i64, 1, 2, 3, 5]);

const SNBT: &str = "{short: -10s, string: fizzbuzz, array: [L; 1, 1, 2, 3, 5]}";

assert_eq!(compound, snbt::parse(SNBT, Profile::V1_21_5).unwrap());
```

# NBT Representation

The [`NbtRepr`] trait allows for custom types to be convertible into [`NbtTag`]s by defining
methods for writing and reading to and from an [`NbtCompound`].

```
# use mc_nbt::*;
#[derive(Debug, PartialEq, Eq)]
struct Example {
    name: String,
    value: i32
}

impl NbtRepr for Example {
    type Error = NbtReprError;

    fn read_nbt(&mut self, nbt: &NbtCompound) -> Result<(), NbtReprError> {
        self.name = nbt.get::<_, &str>("name")?.to_owned();
        self.value = nbt.get("value")?;
        Ok(())
    }

    fn write_nbt(&self, nbt: &mut NbtCompound) {
        nbt.insert("name", &self.name);
        nbt.insert("value", self.value);
    }
}

let ex1 = Example {
    name: "foo".to_owned(),
    value: 10
};

let mut nbt = NbtCompound::new();
nbt.insert("name", "foo");
nbt.insert("value", 10);

let mut ex2 = Example {
    name: "".to_owned(),
    value: 0
};
ex2.read_nbt(&nbt).unwrap();

assert_eq!(ex1.to_nbt(), nbt);
assert_eq!(ex1, ex2);
```

[`NbtCompound`]: crate::NbtCompound
[`NbtList`]: crate::NbtList
[`NbtRepr`]: crate::NbtRepr
[`NbtTag`]: crate::NbtTag
*/

/// Provides a bit-exact big-endian binary codec for NBT data, a conservative size estimator for
/// pre-sizing output buffers, and gz/zlib compression framing around the core codec.
pub mod io;
/// The closed set of 13 NBT tag kinds and their predicates.
pub mod kind;
mod raw;
mod repr;
mod tag;

/// A version-aware codec for stringified NBT (SNBT), the textual dialect used in commands and
/// debug output.
///
/// SNBT is essentially an extension of JSON. It uses the same overarching syntax with some
/// changes to enforce stronger types, and its exact grammar has shifted across Minecraft
/// versions; see [`Profile`](crate::snbt::Profile) for the dialects this crate models.
///
/// # Numbers
///
/// Numbers in SNBT generally have a single-character suffix specifying their type (with `i32`
/// and `f64` being exceptions). If a number without a decimal point is encountered without a
/// type specifier, then the parser assumes it is an int. Likewise, if a number with a decimal
/// point but no type specifier is encountered, then it is assumed to be a double. Examples:
///  - Byte (`i8`): `2B`, `-3b`
///  - Short (`i16`): `17S`, `-1024s`
///  - Int (`i32`): `123`
///  - Long (`i64`): `43046721L`
///  - Float (`f32`): `3.141F`, `0.0f`
///  - Double (`f64`): `18932.214`, `10.2D`
///
/// Booleans are encoded as bytes, so `0b` represents `false` and `1b` (or any non-zero byte
/// value) represents `true`.
///
/// # Strings
///
/// Under the modern dialects, any sequence of characters not recognized as another token is
/// read as a string, with quoting optional (`foo` is equivalent to `"foo"`); the legacy 1.7/1.8
/// dialect is stricter about where quotes are required.
///
/// # Arrays and Lists
///
/// There are three array types: byte arrays, int arrays, and long arrays. To differentiate an
/// [`NbtList`](crate::NbtList) from an array, arrays start with a type specifier followed by a
/// semicolon, e.g. `[I;]` for an empty int array or `[L; -1, -2, -3]` for a long array.
///
/// NBT lists also use square-bracket syntax without a type specifier, e.g. `[foo, bar, baz]`,
/// and must be homogenously typed; the parser fails with a type mismatch otherwise.
///
/// # Compounds
///
/// All valid SNBT strings have a compound as the root tag, following `{key: value, ...}` syntax.
pub mod snbt;

pub use repr::*;
pub use tag::*;
