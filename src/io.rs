use crate::{kind::TagKind, raw, NbtCompound, NbtList, NbtTag};
use flate2::{
    read::{GzDecoder, ZlibDecoder},
    write::{GzEncoder, ZlibEncoder},
    Compression,
};
use std::{
    error::Error,
    fmt::{self, Display, Formatter},
    io::{self, Read, Write},
};

/// Describes the flavors of NBT data: uncompressed, Zlib compressed and Gz compressed. Framing
/// is a thin adapter over the core uncompressed codec; the codec itself never sees compression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flavor {
    /// Uncompressed NBT data.
    Uncompressed,
    /// Zlib compressed NBT data. When writing, the default compression level will be used.
    ZlibCompressed,
    /// Zlib compressed NBT data with the given compression level.
    ZlibCompressedWith(Compression),
    /// Gz compressed NBT data. When writing, the default compression level will be used.
    GzCompressed,
    /// Gz compressed NBT data with the given compression level.
    GzCompressedWith(Compression),
}

/// Reads the given flavor of NBT data from the given reader, returning the resulting NBT
/// compound and associated root name.
pub fn read_nbt<R: Read>(
    reader: &mut R,
    flavor: Flavor,
) -> Result<(NbtCompound, String), NbtIoError> {
    match flavor {
        Flavor::Uncompressed => read_nbt_uncompressed(reader),
        Flavor::ZlibCompressed | Flavor::ZlibCompressedWith(_) =>
            read_nbt_uncompressed(&mut ZlibDecoder::new(reader)),
        Flavor::GzCompressed | Flavor::GzCompressedWith(_) =>
            read_nbt_uncompressed(&mut GzDecoder::new(reader)),
    }
}

fn read_nbt_uncompressed<R: Read>(reader: &mut R) -> Result<(NbtCompound, String), NbtIoError> {
    let root_id = raw::read_u8(reader)?;
    if root_id != TagKind::Compound.id() {
        return Err(NbtIoError::TagTypeMismatch {
            expected: TagKind::Compound.id(),
            found: root_id,
        });
    }

    let root_name = read_string(reader)?;
    match read_tag_body(reader, TagKind::Compound)? {
        NbtTag::Compound(compound) => Ok((compound, root_name)),
        _ => unreachable!("read_tag_body(.., Compound) always returns a Compound"),
    }
}

/// Reads the named entry at the cursor's current position: a 1-byte kind id, a name if the kind
/// isn't `End`, and the kind's payload. Returns `(String::new(), NbtTag::Compound(empty))` is
/// never produced here — callers that need the `End` sentinel inspect the id directly, as in
/// compound payload decoding below.
fn read_string<R: Read>(reader: &mut R) -> Result<String, NbtIoError> {
    raw::read_string(reader).map_err(|error| match error.kind() {
        io::ErrorKind::InvalidData => NbtIoError::InvalidUtf8,
        _ => NbtIoError::StdIo(error),
    })
}

fn read_length<R: Read>(reader: &mut R) -> Result<usize, NbtIoError> {
    let len = raw::read_i32(reader)?;
    if len < 0 {
        return Err(NbtIoError::NegativeLength(len));
    }
    Ok(len as usize)
}

fn read_tag_body<R: Read>(reader: &mut R, kind: TagKind) -> Result<NbtTag, NbtIoError> {
    let tag = match kind {
        TagKind::End => return Err(NbtIoError::UnknownTag(TagKind::End.id())),
        TagKind::Byte => NbtTag::Byte(raw::read_i8(reader)?),
        TagKind::Short => NbtTag::Short(raw::read_i16(reader)?),
        TagKind::Int => NbtTag::Int(raw::read_i32(reader)?),
        TagKind::Long => NbtTag::Long(raw::read_i64(reader)?),
        TagKind::Float => NbtTag::Float(raw::read_f32(reader)?),
        TagKind::Double => NbtTag::Double(raw::read_f64(reader)?),
        TagKind::ByteArray => {
            let len = read_length(reader)?;
            let mut array = vec![0u8; len];
            reader.read_exact(&mut array)?;
            NbtTag::ByteArray(raw::cast_byte_buf_to_signed(array))
        }
        TagKind::String => NbtTag::String(read_string(reader)?),
        TagKind::List => {
            let element_id = raw::read_u8(reader)?;
            let element_kind = TagKind::from_id(element_id)
                .ok_or(NbtIoError::UnknownTag(element_id))?;
            let len = read_length(reader)?;

            // Lists of End with a nonzero declared length are tolerated and produce an empty
            // list, matching the source's lenient behaviour.
            if element_kind == TagKind::End || len == 0 {
                return Ok(NbtTag::List(NbtList::new()));
            }

            let mut list = NbtList::with_capacity(len);
            for _ in 0 .. len {
                list.push(read_tag_body(reader, element_kind)?)
                    .expect("freshly read elements share the declared element kind");
            }

            NbtTag::List(list)
        }
        TagKind::Compound => {
            let mut compound = NbtCompound::new();
            let mut tag_id = raw::read_u8(reader)?;

            while tag_id != TagKind::End.id() {
                let entry_kind =
                    TagKind::from_id(tag_id).ok_or(NbtIoError::UnknownTag(tag_id))?;
                let name = read_string(reader)?;
                let tag = read_tag_body(reader, entry_kind)?;
                compound.insert(name, tag);
                tag_id = raw::read_u8(reader)?;
            }

            NbtTag::Compound(compound)
        }
        TagKind::IntArray => {
            let len = read_length(reader)?;
            let mut array = Vec::with_capacity(len);
            for _ in 0 .. len {
                array.push(raw::read_i32(reader)?);
            }
            NbtTag::IntArray(array)
        }
        TagKind::LongArray => {
            let len = read_length(reader)?;
            let mut array = Vec::with_capacity(len);
            for _ in 0 .. len {
                array.push(raw::read_i64(reader)?);
            }
            NbtTag::LongArray(array)
        }
    };

    Ok(tag)
}

/// Writes the given flavor of NBT data to the given writer. If no root name is provided, an
/// empty string is used.
pub fn write_nbt<W: Write>(
    writer: &mut W,
    root_name: Option<&str>,
    root: &NbtCompound,
    flavor: Flavor,
) -> Result<(), NbtIoError> {
    let (mode, compression) = match flavor {
        Flavor::Uncompressed => {
            return write_nbt_uncompressed(writer, root_name, root);
        }
        Flavor::ZlibCompressed => (2, Compression::default()),
        Flavor::ZlibCompressedWith(compression) => (2, compression),
        Flavor::GzCompressed => (1, Compression::default()),
        Flavor::GzCompressedWith(compression) => (1, compression),
    };

    if mode == 1 {
        write_nbt_uncompressed(&mut GzEncoder::new(writer, compression), root_name, root)
    } else {
        write_nbt_uncompressed(&mut ZlibEncoder::new(writer, compression), root_name, root)
    }
}

fn write_nbt_uncompressed<W: Write>(
    writer: &mut W,
    root_name: Option<&str>,
    root: &NbtCompound,
) -> Result<(), NbtIoError> {
    raw::write_u8(writer, TagKind::Compound.id())?;
    write_string(writer, root_name.unwrap_or(""))?;
    write_compound_body(writer, root)
}

fn write_compound_body<W: Write>(writer: &mut W, compound: &NbtCompound) -> Result<(), NbtIoError> {
    for (name, tag) in compound.inner() {
        raw::write_u8(writer, raw::id_for_tag(Some(tag)))?;
        write_string(writer, name)?;
        write_tag_body(writer, tag)?;
    }

    raw::write_u8(writer, raw::id_for_tag(None))?;
    Ok(())
}

fn write_string<W: Write>(writer: &mut W, value: &str) -> Result<(), NbtIoError> {
    if value.len() > u16::MAX as usize {
        return Err(NbtIoError::StringTooLong(value.len()));
    }
    raw::write_string(writer, value)?;
    Ok(())
}

fn write_tag_body<W: Write>(writer: &mut W, tag: &NbtTag) -> Result<(), NbtIoError> {
    match tag {
        &NbtTag::Byte(value) => raw::write_i8(writer, value)?,
        &NbtTag::Short(value) => raw::write_i16(writer, value)?,
        &NbtTag::Int(value) => raw::write_i32(writer, value)?,
        &NbtTag::Long(value) => raw::write_i64(writer, value)?,
        &NbtTag::Float(value) => raw::write_f32(writer, value)?,
        &NbtTag::Double(value) => raw::write_f64(writer, value)?,
        NbtTag::ByteArray(value) => {
            raw::write_i32(writer, value.len() as i32)?;
            writer.write_all(raw::cast_bytes_to_unsigned(value.as_slice()))?;
        }
        NbtTag::String(value) => write_string(writer, value)?,
        NbtTag::List(value) =>
            if value.is_empty() {
                writer.write_all(&[raw::id_for_tag(None), 0, 0, 0, 0])?;
            } else {
                let intern = value.intern_kind();
                raw::write_u8(writer, intern.id())?;
                raw::write_i32(writer, value.len() as i32)?;

                for sub_tag in value.as_ref() {
                    if sub_tag.kind() != intern {
                        return Err(NbtIoError::NonHomogenousList);
                    }

                    write_tag_body(writer, sub_tag)?;
                }
            },
        NbtTag::Compound(value) => write_compound_body(writer, value)?,
        NbtTag::IntArray(value) => {
            raw::write_i32(writer, value.len() as i32)?;
            for &int in value.iter() {
                raw::write_i32(writer, int)?;
            }
        }
        NbtTag::LongArray(value) => {
            raw::write_i32(writer, value.len() as i32)?;
            for &long in value.iter() {
                raw::write_i64(writer, long)?;
            }
        }
    }

    Ok(())
}

/// Computes a conservative upper bound, in bytes, of the wire size of the payload of `tag` (not
/// counting its own kind id or name, matching how the payload is actually nested during
/// writing). The bound is exact for every kind except [`NbtTag::String`], whose UTF-8 byte
/// length is already the tightest bound this platform's native-UTF-8 strings allow, so the
/// estimate uses `2 + byte_len` rather than the 4×-code-unit bound that a UTF-16-based host
/// language would need.
///
/// Callers typically add the 1-byte kind id and, for named entries, `2 + name.len()` for the
/// name payload on top of this estimate.
pub fn size_estimate(tag: &NbtTag) -> usize {
    match tag {
        NbtTag::Byte(_) => 1,
        NbtTag::Short(_) => 2,
        NbtTag::Int(_) => 4,
        NbtTag::Long(_) => 8,
        NbtTag::Float(_) => 4,
        NbtTag::Double(_) => 8,
        NbtTag::ByteArray(value) => 4 + value.len(),
        NbtTag::String(value) => 2 + value.len(),
        NbtTag::List(value) => {
            4 + 1 + value.as_ref().iter().map(size_estimate).sum::<usize>()
        }
        NbtTag::Compound(value) => {
            1 + value
                .inner()
                .iter()
                .map(|(name, tag)| 1 + 2 + name.len() + size_estimate(tag))
                .sum::<usize>()
        }
        NbtTag::IntArray(value) => 4 + value.len() * 4,
        NbtTag::LongArray(value) => 4 + value.len() * 8,
    }
}

/// Estimates the total wire size of a named root compound, i.e. what [`write_nbt`] with
/// [`Flavor::Uncompressed`] would write.
pub fn size_estimate_named(name: &str, root: &NbtCompound) -> usize {
    let body = 1 + root
        .inner()
        .iter()
        .map(|(name, tag)| 1 + 2 + name.len() + size_estimate(tag))
        .sum::<usize>();
    1 + 2 + name.len() + body
}

/// Describes an error which occurred during the reading or writing of NBT data.
#[derive(Debug)]
pub enum NbtIoError {
    /// A native I/O error (includes running out of bytes mid-read).
    StdIo(io::Error),
    /// No root tag was found. All NBT data must start with a valid compound tag.
    MissingRootTag,
    /// A sequential data structure was found to be non-homogenous. All sequential structures
    /// in NBT data are homogenous.
    NonHomogenousList,
    /// An array or list declared a negative length on the wire.
    NegativeLength(i32),
    /// String bytes on the wire were not valid UTF-8.
    InvalidUtf8,
    /// A string's UTF-8 encoding exceeded 65,535 bytes during writing.
    StringTooLong(usize),
    /// An invalid tag ID was encountered.
    UnknownTag(u8),
    /// The first tag ID was expected, but the second was found.
    TagTypeMismatch {
        /// The tag kind id that was expected.
        expected: u8,
        /// The tag kind id that was actually found.
        found: u8,
    },
}

impl From<io::Error> for NbtIoError {
    fn from(error: io::Error) -> Self {
        NbtIoError::StdIo(error)
    }
}

impl Display for NbtIoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NbtIoError::StdIo(error) => write!(f, "{}", error),
            NbtIoError::MissingRootTag =>
                write!(f, "NBT tree does not start with a valid root tag."),
            NbtIoError::NonHomogenousList =>
                write!(f, "Encountered non-homogenous list or sequential type"),
            &NbtIoError::NegativeLength(len) =>
                write!(f, "Encountered negative length {} while reading an array or list", len),
            NbtIoError::InvalidUtf8 => write!(f, "Encountered invalid UTF-8 while reading a string"),
            &NbtIoError::StringTooLong(len) => write!(
                f,
                "String encoded length {} exceeds the 65,535 byte limit",
                len
            ),
            &NbtIoError::UnknownTag(id) => write!(
                f,
                "Encountered invalid tag ID 0x{:X} during deserialization",
                id
            ),
            &NbtIoError::TagTypeMismatch { expected, found } => write!(
                f,
                "Tag type mismatch: expected 0x{:X} but found 0x{:X}",
                expected, found
            ),
        }
    }
}

impl Error for NbtIoError {}

#[cfg(test)]
mod test {
    use super::*;

    fn sample_compound() -> NbtCompound {
        let mut compound = NbtCompound::new();
        compound.insert("byte", 1i8);
        compound.insert("string", "hello");
        let mut list = NbtList::new();
        list.push(1i32).unwrap();
        list.push(2i32).unwrap();
        compound.insert("list", list);
        compound.insert("ints", vec![1i32, 2, 3]);
        compound
    }

    #[test]
    fn round_trips_uncompressed() {
        let compound = sample_compound();
        let mut buf = Vec::new();
        write_nbt(&mut buf, Some("root"), &compound, Flavor::Uncompressed).unwrap();

        let (read_compound, name) = read_nbt(&mut io::Cursor::new(buf), Flavor::Uncompressed).unwrap();
        assert_eq!(name, "root");
        assert_eq!(read_compound, compound);
    }

    #[test]
    fn round_trips_zlib() {
        let compound = sample_compound();
        let mut buf = Vec::new();
        write_nbt(&mut buf, None, &compound, Flavor::ZlibCompressed).unwrap();

        let (read_compound, _) = read_nbt(&mut io::Cursor::new(buf), Flavor::ZlibCompressed).unwrap();
        assert_eq!(read_compound, compound);
    }

    #[test]
    fn round_trips_gz() {
        let compound = sample_compound();
        let mut buf = Vec::new();
        write_nbt(&mut buf, None, &compound, Flavor::GzCompressed).unwrap();

        let (read_compound, _) = read_nbt(&mut io::Cursor::new(buf), Flavor::GzCompressed).unwrap();
        assert_eq!(read_compound, compound);
    }

    #[test]
    fn rejects_unknown_tag_id() {
        let buf = vec![0xA, 0, 0, 0xFF];
        let err = read_nbt(&mut io::Cursor::new(buf), Flavor::Uncompressed).unwrap_err();
        assert!(matches!(err, NbtIoError::UnknownTag(0xFF)));
    }

    #[test]
    fn rejects_negative_array_length() {
        // Compound -> byte array tag "a" with length -1
        let mut buf = vec![0xA, 0, 0];
        buf.push(TagKind::ByteArray.id());
        buf.extend_from_slice(&[0, 1, b'a']);
        buf.extend_from_slice(&(-1i32).to_be_bytes());
        let err = read_nbt(&mut io::Cursor::new(buf), Flavor::Uncompressed).unwrap_err();
        assert!(matches!(err, NbtIoError::NegativeLength(-1)));
    }

    #[test]
    fn empty_typed_list_with_nonzero_length_is_tolerated() {
        // Compound -> list tag "a" with element kind End and declared length 5
        let mut buf = vec![0xA, 0, 0];
        buf.push(TagKind::List.id());
        buf.extend_from_slice(&[0, 1, b'a']);
        buf.push(TagKind::End.id());
        buf.extend_from_slice(&5i32.to_be_bytes());
        buf.push(TagKind::End.id());

        let (compound, _) = read_nbt(&mut io::Cursor::new(buf), Flavor::Uncompressed).unwrap();
        let list = compound.get::<_, &NbtList>("a").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn size_estimate_matches_writer_for_non_string_payloads() {
        let mut compound = NbtCompound::new();
        compound.insert("ints", vec![1i32, 2, 3, 4]);
        compound.insert("n", 42i64);

        let mut buf = Vec::new();
        write_nbt_uncompressed(&mut buf, None, &compound).unwrap();

        let estimate = size_estimate_named("", &compound);
        assert_eq!(estimate, buf.len());
    }

    #[test]
    fn size_estimate_never_undercounts_strings() {
        let mut compound = NbtCompound::new();
        compound.insert("s", "hello");
        let mut buf = Vec::new();
        write_nbt_uncompressed(&mut buf, None, &compound).unwrap();
        assert!(size_estimate_named("", &compound) >= buf.len());
    }
}
