use mc_nbt::{
    io::{read_nbt, write_nbt, Flavor, NbtIoError},
    NbtCompound,
};
use std::io::Cursor;

fn main() -> Result<(), NbtIoError> {
    let mut nbt = NbtCompound::new();
    nbt.insert("name", "Steve");
    nbt.insert("health", 20.0f32);
    nbt.insert("inventory", vec![1i32, 5, 9]);

    let mut uncompressed = Vec::new();
    write_nbt(&mut uncompressed, Some("player"), &nbt, Flavor::Uncompressed)?;
    println!("bytes: {:02X?}", uncompressed);

    // You can read nbt from raw bytes
    let (read_back, name) = read_nbt(&mut Cursor::new(&uncompressed), Flavor::Uncompressed)?;
    println!("name: {}, nbt: {}", name, read_back);

    // by changing the Flavor you can write (and read) compressed nbt too
    let mut gz_compressed = Vec::new();
    write_nbt(&mut gz_compressed, Some("player"), &nbt, Flavor::GzCompressed)?;
    let (decompressed, _) = read_nbt(&mut Cursor::new(&gz_compressed), Flavor::GzCompressed)?;
    println!("gz round trip: {}", decompressed);

    Ok(())
}
