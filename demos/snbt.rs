use mc_nbt::{
    snbt::{self, Profile, SnbtError},
    NbtCompound,
};

fn main() -> Result<(), SnbtError> {
    // Instead of making an NbtCompound by inserting everything you can use SNBT. This allows NBT
    // to be represented by a json-like format. Numbers need a type suffix to be anything other
    // than an int, and lists become typed arrays by putting B;/I;/L; at the start.
    let nbt = NbtCompound::from_snbt(
        r#"{
        name: "stringified nbt",
        tags: 4S,
        nested_compounds: {
            "keys can have spaces": [B;12, 13, 14]
        }
    }"#,
    )?;

    // You can also convert back to SNBT by using .to_snbt on any Nbt value (this includes
    // NbtTag and NbtList), or snbt::write for a specific version dialect.
    println!("{}", nbt.to_snbt());
    println!("{}", snbt::write(&nbt, Profile::V1_12));

    Ok(())
}
