use mc_nbt::{
    io::{read_nbt, write_nbt, Flavor},
    NbtCompound,
    NbtList,
    NbtTag,
};
use std::io::Cursor;

#[test]
fn simple_compound_round_trip() {
    // Root name "", single entry name = "Hello" (string).
    let mut nbt = NbtCompound::new();
    nbt.insert("name", "Hello");

    let mut bytes = Vec::new();
    write_nbt(&mut bytes, Some(""), &nbt, Flavor::Uncompressed).unwrap();

    #[rustfmt::skip]
    let expected: &[u8] = &[
        0x0A, 0x00, 0x00,
        0x08, 0x00, 0x04, b'n', b'a', b'm', b'e', 0x00, 0x05, b'H', b'e', b'l', b'l', b'o',
        0x00,
    ];
    assert_eq!(bytes, expected);

    let (read_back, root_name) = read_nbt(&mut Cursor::new(&bytes), Flavor::Uncompressed).unwrap();
    assert_eq!(root_name, "");
    assert_eq!(read_back, nbt);
}

#[test]
fn empty_list_round_trip() {
    let mut nbt = NbtCompound::new();
    nbt.insert("xs", NbtList::new());

    let mut bytes = Vec::new();
    write_nbt(&mut bytes, None, &nbt, Flavor::Uncompressed).unwrap();

    let (read_back, _) = read_nbt(&mut Cursor::new(&bytes), Flavor::Uncompressed).unwrap();
    let xs = read_back.get::<_, &NbtList>("xs").unwrap();
    assert!(xs.is_empty());
    assert_eq!(xs.intern_kind(), mc_nbt::kind::TagKind::End);
}

#[test]
fn long_array_wire_format() {
    let mut nbt = NbtCompound::new();
    nbt.insert("L", vec![0x0102030405060708i64, 0x1122334455667788i64]);

    let mut bytes = Vec::new();
    write_nbt(&mut bytes, None, &nbt, Flavor::Uncompressed).unwrap();

    #[rustfmt::skip]
    let needle: &[u8] = &[
        0x00, 0x00, 0x00, 0x02,
        0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08,
        0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88,
    ];
    assert!(
        bytes.windows(needle.len()).any(|w| w == needle),
        "unexpected payload: {:02X?}",
        bytes
    );
}

#[test]
fn binary_round_trip_preserves_structure() {
    let mut root = NbtCompound::new();
    root.insert("byte", 12i8);
    root.insert("short", 32i16);
    root.insert("int", 512i32);
    root.insert("long", 1024i64);
    root.insert("float", 12.99f32);
    root.insert("double", 1212.0101f64);
    root.insert("string", "test");
    root.insert("list", NbtList::from(vec!["a", "b", "c"]));
    root.insert(
        "compound_list",
        NbtList::from(vec![NbtCompound::new(), NbtCompound::new()]),
    );
    root.insert("byte_array", vec![1i8, 2, 3, 4]);
    root.insert("int_array", vec![1i32, 3, 5, 7]);
    root.insert("long_array", vec![1i64, 9, 81]);

    let mut nested = NbtCompound::new();
    nested.insert("test", 12i8);
    root.insert("compound", nested);

    let mut bytes = Vec::new();
    write_nbt(&mut bytes, None, &root, Flavor::Uncompressed).unwrap();

    let (read_back, _) = read_nbt(&mut Cursor::new(&bytes), Flavor::Uncompressed).unwrap();
    assert_eq!(read_back, root);

    // Byte round trip: writing what we just read produces the same bytes again.
    let mut rewritten = Vec::new();
    write_nbt(&mut rewritten, None, &read_back, Flavor::Uncompressed).unwrap();
    assert_eq!(rewritten, bytes);
}

#[test]
fn rejects_unknown_tag_kind() {
    #[rustfmt::skip]
    let bytes: &[u8] = &[
        0x0A, 0x00, 0x00,
        0xFF, 0x00, 0x01, b'x',
        0x00,
    ];
    let err = read_nbt(&mut Cursor::new(bytes), Flavor::Uncompressed).unwrap_err();
    assert!(matches!(err, mc_nbt::io::NbtIoError::UnknownTag(0xFF)));
}

#[test]
fn gzip_and_zlib_round_trip() {
    let mut nbt = NbtCompound::new();
    nbt.insert("greeting", "hello, world");
    nbt.insert("values", vec![1i32, 2, 3]);

    for flavor in [Flavor::GzCompressed, Flavor::ZlibCompressed] {
        let mut bytes = Vec::new();
        write_nbt(&mut bytes, Some("root"), &nbt, flavor).unwrap();
        let (read_back, name) = read_nbt(&mut Cursor::new(&bytes), flavor).unwrap();
        assert_eq!(name, "root");
        assert_eq!(read_back, nbt);
    }
}

#[test]
fn size_estimate_is_an_upper_bound() {
    let mut root = NbtCompound::new();
    root.insert("name", "a string with some length to it");
    root.insert("nums", vec![1i32, 2, 3, 4, 5]);
    root.insert("tag", NbtTag::Double(3.5));

    let mut bytes = Vec::new();
    write_nbt(&mut bytes, Some("root"), &root, Flavor::Uncompressed).unwrap();

    let estimate = mc_nbt::io::size_estimate_named("root", &root);
    assert!(estimate >= bytes.len(), "{estimate} < {}", bytes.len());
}

#[test]
fn size_estimate_is_exact_without_strings() {
    let mut root = NbtCompound::new();
    root.insert("a", 1i32);
    root.insert("b", vec![1i64, 2, 3]);

    let mut bytes = Vec::new();
    write_nbt(&mut bytes, Some("r"), &root, Flavor::Uncompressed).unwrap();

    assert_eq!(mc_nbt::io::size_estimate_named("r", &root), bytes.len());
}
