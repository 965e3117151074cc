use mc_nbt::{
    snbt::{self, Profile},
    NbtCompound,
    NbtTag,
};

#[test]
fn modern_scalar_round_trip() {
    const TEXT: &str = "{a:1b,b:2s,c:3,d:4L,e:5.0f,f:6.0d,g:\"x\"}";
    let nbt = snbt::parse(TEXT, Profile::V1_21_5).unwrap();

    assert_eq!(nbt.get::<_, i8>("a").unwrap(), 1);
    assert_eq!(nbt.get::<_, i16>("b").unwrap(), 2);
    assert_eq!(nbt.get::<_, i32>("c").unwrap(), 3);
    assert_eq!(nbt.get::<_, i64>("d").unwrap(), 4);
    assert_eq!(nbt.get::<_, f32>("e").unwrap(), 5.0);
    assert_eq!(nbt.get::<_, f64>("f").unwrap(), 6.0);
    assert_eq!(nbt.get::<_, &str>("g").unwrap(), "x");

    assert_eq!(
        snbt::write(&nbt, Profile::V1_21_5),
        "{\"a\":1b,\"b\":2s,\"c\":3,\"d\":4L,\"e\":5f,\"f\":6d,\"g\":\"x\"}"
    );
}

#[test]
fn legacy_tolerates_what_modern_also_accepts() {
    const TEXT: &str = "{id:35,Damage:0s}";

    let legacy = snbt::parse(TEXT, Profile::V1_8).unwrap();
    assert_eq!(legacy.get::<_, i32>("id").unwrap(), 35);
    assert_eq!(legacy.get::<_, i16>("Damage").unwrap(), 0);

    let modern = snbt::parse(TEXT, Profile::V1_21_5).unwrap();
    assert_eq!(modern, legacy);
}

#[test]
fn int_array_literal() {
    let mut expected = NbtCompound::new();
    expected.insert("xs", vec![1i32, 2, 3]);

    let modern = snbt::parse("{xs:[I;1,2,3]}", Profile::V1_21_5).unwrap();
    assert_eq!(modern, expected);

    let legacy = snbt::parse("{xs:[1,2,3]}", Profile::V1_8).unwrap();
    assert_eq!(legacy, expected);
}

#[test]
fn modern_typed_array_rejects_booleans() {
    let err = snbt::parse("{xs:[B;true,false,1b]}", Profile::V1_21_5).unwrap_err();
    // Just confirm it's an error; the message isn't part of the contract.
    let _ = err;
}

#[test]
fn error_excerpt_has_marker() {
    let err = snbt::parse("{id:\"incomplete", Profile::V1_21_5).unwrap_err();
    assert!(
        format!("{}", err).ends_with("id:\"incomplete<--[HERE]"),
        "{}",
        err
    );
}

#[test]
fn error_excerpt_has_marker_under_legacy_profiles() {
    for profile in [Profile::V1_7, Profile::V1_8] {
        let err = snbt::parse("{id:\"incomplete", profile).unwrap_err();
        assert!(
            format!("{}", err).ends_with("id:\"incomplete<--[HERE]"),
            "{profile:?}: {err}"
        );
    }
}

#[test]
fn writer_quotes_keys_per_dialect() {
    let mut nbt = NbtCompound::new();
    nbt.insert("has space", 1i32);

    // V1_12 permits bare-word keys but "has space" isn't one, so it must be quoted.
    let out = snbt::write(&nbt, Profile::V1_12);
    assert!(out.contains("\"has space\""), "{out}");

    // V1_21_5 always quotes keys, even bare words.
    let mut simple = NbtCompound::new();
    simple.insert("plain", 1i32);
    let out = snbt::write(&simple, Profile::V1_21_5);
    assert!(out.contains("\"plain\""), "{out}");
}

#[test]
fn display_and_to_snbt_agree_with_parse() {
    let mut nbt = NbtCompound::new();
    nbt.insert("nested", {
        let mut inner = NbtCompound::new();
        inner.insert("flag", NbtTag::Byte(1));
        inner
    });
    nbt.insert("list", mc_nbt::NbtList::from(vec![1i32, 2, 3]));

    let text = nbt.to_snbt();
    let round_tripped = snbt::parse(&text, Profile::V1_21_5).unwrap();
    assert_eq!(round_tripped, nbt);
}
