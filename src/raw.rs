use crate::{kind::TagKind, NbtTag};
use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::{
    io::{Error, ErrorKind, Read, Result, Write},
    mem::ManuallyDrop,
    slice,
};

#[inline]
pub const fn id_for_tag(tag: Option<&NbtTag>) -> u8 {
    match tag {
        None => TagKind::End.id(),
        Some(NbtTag::Byte(..)) => TagKind::Byte.id(),
        Some(NbtTag::Short(..)) => TagKind::Short.id(),
        Some(NbtTag::Int(..)) => TagKind::Int.id(),
        Some(NbtTag::Long(..)) => TagKind::Long.id(),
        Some(NbtTag::Float(..)) => TagKind::Float.id(),
        Some(NbtTag::Double(..)) => TagKind::Double.id(),
        Some(NbtTag::ByteArray(..)) => TagKind::ByteArray.id(),
        Some(NbtTag::String(..)) => TagKind::String.id(),
        Some(NbtTag::List(..)) => TagKind::List.id(),
        Some(NbtTag::Compound(..)) => TagKind::Compound.id(),
        Some(NbtTag::IntArray(..)) => TagKind::IntArray.id(),
        Some(NbtTag::LongArray(..)) => TagKind::LongArray.id(),
    }
}

#[inline]
pub fn read_u8<R: Read>(reader: &mut R) -> Result<u8> {
    reader.read_u8()
}

#[inline]
pub fn read_i8<R: Read>(reader: &mut R) -> Result<i8> {
    reader.read_i8()
}

#[inline]
pub fn read_i16<R: Read>(reader: &mut R) -> Result<i16> {
    reader.read_i16::<BigEndian>()
}

#[inline]
pub fn read_u16<R: Read>(reader: &mut R) -> Result<u16> {
    reader.read_u16::<BigEndian>()
}

#[inline]
pub fn read_i32<R: Read>(reader: &mut R) -> Result<i32> {
    reader.read_i32::<BigEndian>()
}

#[inline]
pub fn read_i64<R: Read>(reader: &mut R) -> Result<i64> {
    reader.read_i64::<BigEndian>()
}

#[inline]
pub fn read_f32<R: Read>(reader: &mut R) -> Result<f32> {
    reader.read_f32::<BigEndian>()
}

#[inline]
pub fn read_f64<R: Read>(reader: &mut R) -> Result<f64> {
    reader.read_f64::<BigEndian>()
}

/// Reads a length-prefixed string: a 16-bit unsigned big-endian byte length, then that many
/// UTF-8 bytes. Unlike the original Java format, which uses modified UTF-8 (CESU-8), this reads
/// and writes plain UTF-8.
pub fn read_string<R: Read>(reader: &mut R) -> Result<String> {
    let len = read_u16(reader)? as usize;
    let mut bytes = vec![0; len];
    reader.read_exact(&mut bytes)?;

    String::from_utf8(bytes)
        .map_err(|_| Error::new(ErrorKind::InvalidData, "Invalid string encoding."))
}

#[inline]
pub fn write_u8<W: Write>(writer: &mut W, value: u8) -> Result<()> {
    writer.write_u8(value)
}

#[inline]
pub fn write_i8<W: Write>(writer: &mut W, value: i8) -> Result<()> {
    writer.write_i8(value)
}

#[inline]
pub fn write_i16<W: Write>(writer: &mut W, value: i16) -> Result<()> {
    writer.write_i16::<BigEndian>(value)
}

#[inline]
pub fn write_u16<W: Write>(writer: &mut W, value: u16) -> Result<()> {
    writer.write_u16::<BigEndian>(value)
}

#[inline]
pub fn write_i32<W: Write>(writer: &mut W, value: i32) -> Result<()> {
    writer.write_i32::<BigEndian>(value)
}

#[inline]
pub fn write_i64<W: Write>(writer: &mut W, value: i64) -> Result<()> {
    writer.write_i64::<BigEndian>(value)
}

#[inline]
pub fn write_f32<W: Write>(writer: &mut W, value: f32) -> Result<()> {
    writer.write_f32::<BigEndian>(value)
}

#[inline]
pub fn write_f64<W: Write>(writer: &mut W, value: f64) -> Result<()> {
    writer.write_f64::<BigEndian>(value)
}

/// Writes a length-prefixed UTF-8 string. The caller (the binary writer in [`crate::io`]) is
/// responsible for rejecting strings whose encoded length exceeds 65,535 bytes before calling
/// this, since that case should surface as a [`crate::io::NbtIoError::StringTooLong`] rather
/// than a generic I/O error.
pub fn write_string<W: Write>(writer: &mut W, string: &str) -> Result<()> {
    let bytes = string.as_bytes();
    write_u16(writer, bytes.len() as u16)?;
    writer.write_all(bytes)
}

#[inline]
pub fn cast_byte_buf_to_signed(buf: Vec<u8>) -> Vec<i8> {
    let mut me = ManuallyDrop::new(buf);
    let ptr = me.as_mut_ptr() as *mut i8;
    let length = me.len();
    let capacity = me.capacity();

    // Safety: i8 and u8 share size and alignment, and ptr/length/capacity came from a valid Vec.
    unsafe { Vec::from_raw_parts(ptr, length, capacity) }
}

#[inline]
pub fn cast_byte_buf_to_unsigned(buf: Vec<i8>) -> Vec<u8> {
    let mut me = ManuallyDrop::new(buf);
    let ptr = me.as_mut_ptr() as *mut u8;
    let length = me.len();
    let capacity = me.capacity();

    // Safety: see cast_byte_buf_to_signed.
    unsafe { Vec::from_raw_parts(ptr, length, capacity) }
}

#[inline]
pub fn cast_bytes_to_unsigned(bytes: &[i8]) -> &[u8] {
    let data = bytes.as_ptr() as *const u8;
    let len = bytes.len();

    // Safety: i8 and u8 share layout, and the lifetime is tied to the input reference.
    unsafe { slice::from_raw_parts(data, len) }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn string_round_trip() {
        let mut buf = Vec::new();
        write_string(&mut buf, "hello, world").unwrap();
        let mut cursor = Cursor::new(buf);
        assert_eq!(read_string(&mut cursor).unwrap(), "hello, world");
    }

    #[test]
    fn rejects_invalid_utf8() {
        let mut buf = Vec::new();
        write_u16(&mut buf, 2).unwrap();
        buf.extend_from_slice(&[0xFF, 0xFE]);
        let mut cursor = Cursor::new(buf);
        assert!(read_string(&mut cursor).is_err());
    }

    #[test]
    fn byte_buf_cast_round_trips() {
        let signed: Vec<i8> = vec![-1, 0, 1, 127, -128];
        let unsigned = cast_byte_buf_to_unsigned(signed.clone());
        assert_eq!(unsigned, vec![255u8, 0, 1, 127, 128]);
        assert_eq!(cast_byte_buf_to_signed(unsigned), signed);
    }
}
