use mc_nbt::{NbtCompound, NbtList};

#[test]
fn put_replaces_value_and_keeps_ordinal() {
    let mut compound = NbtCompound::new();
    compound.insert("a", 1i32);
    compound.insert("b", 2i32);
    compound.insert("c", 3i32);

    compound.insert("b", 99i32);

    assert_eq!(compound.get::<_, i32>("b").unwrap(), 99);
    assert_eq!(compound.index_of("b"), Some(1));
    assert_eq!(compound.len(), 3);
}

#[test]
fn remove_swaps_last_entry_into_vacated_slot() {
    let mut compound = NbtCompound::new();
    compound.insert("a", 1i32);
    compound.insert("b", 2i32);
    compound.insert("c", 3i32);

    assert!(compound.remove("a"));

    assert_eq!(compound.len(), 2);
    // "c" (previously last) should have moved into the vacated slot.
    assert_eq!(compound.index_of("c"), Some(0));
    assert_eq!(compound.index_of("b"), Some(1));
    assert_eq!(compound.get::<_, i32>("c").unwrap(), 3);
    assert_eq!(compound.get::<_, i32>("b").unwrap(), 2);
}

#[test]
fn list_intern_type_rejects_mismatched_push() {
    let mut list = NbtList::new();
    list.push(1i32).unwrap();
    list.push(2i32).unwrap();

    assert!(list.push("not an int").is_err());
    assert_eq!(list.len(), 2);
}

#[test]
fn list_clear_retains_intern_type() {
    let mut list = NbtList::new();
    list.push(1i64).unwrap();
    list.push(2i64).unwrap();
    assert_eq!(list.intern_kind(), mc_nbt::kind::TagKind::Long);

    list.clear();

    assert!(list.is_empty());
    // The intern kind is reported as-is until the next push or set overwrites it.
    assert_eq!(list.intern_kind(), mc_nbt::kind::TagKind::Long);
    list.push(3i64).unwrap();
    assert_eq!(list.intern_kind(), mc_nbt::kind::TagKind::Long);
}

#[test]
fn contains_key_reflects_current_entries() {
    let mut compound = NbtCompound::new();
    assert!(!compound.contains_key("k"));
    compound.insert("k", 1i32);
    assert!(compound.contains_key("k"));
    compound.remove("k");
    assert!(!compound.contains_key("k"));
}
