use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use mc_nbt::{
    io::{self, Flavor},
    snbt::{self, Profile},
    NbtCompound,
    NbtList,
};
use once_cell::sync::Lazy;
use std::io::Cursor;

static SAMPLE: Lazy<NbtCompound> = Lazy::new(build_sample);

fn build_sample() -> NbtCompound {
    let mut root = NbtCompound::new();
    root.insert("name", "bench-world");
    root.insert("version", 4325i32);

    let mut players = NbtList::new();
    for i in 0 .. 200 {
        let mut player = NbtCompound::new();
        player.insert("uuid", format!("player-{}", i));
        player.insert("health", 20.0f32);
        player.insert("pos", NbtList::from(vec![i as f64, 64.0, -i as f64]));
        player.insert("inventory", vec![1i32, 2, 3, 4, 5, 6, 7, 8]);
        players.push(player).unwrap();
    }
    root.insert("players", players);

    root.insert("heightmap", vec![0i64; 256]);
    root
}

fn bench_binary_round_trip(c: &mut Criterion) {
    let mut buf = Vec::new();
    io::write_nbt(&mut buf, Some("root"), &SAMPLE, Flavor::Uncompressed).unwrap();

    let mut group = c.benchmark_group("binary");
    group.throughput(Throughput::Bytes(buf.len() as u64));

    group.bench_function("write_uncompressed", |b| {
        b.iter(|| {
            let mut out = Vec::new();
            io::write_nbt(&mut out, Some("root"), black_box(&SAMPLE), Flavor::Uncompressed)
                .unwrap();
            out
        })
    });

    group.bench_function("read_uncompressed", |b| {
        b.iter(|| {
            io::read_nbt(&mut Cursor::new(black_box(&buf)), Flavor::Uncompressed).unwrap()
        })
    });

    group.bench_function("size_estimate", |b| {
        b.iter(|| io::size_estimate_named("root", black_box(&SAMPLE)))
    });

    group.finish();
}

fn bench_snbt_round_trip(c: &mut Criterion) {
    let text = snbt::write(&SAMPLE, Profile::V1_21_5);

    let mut group = c.benchmark_group("snbt");
    group.throughput(Throughput::Bytes(text.len() as u64));

    group.bench_function("write", |b| {
        b.iter(|| snbt::write(black_box(&SAMPLE), Profile::V1_21_5))
    });

    group.bench_function("parse_modern", |b| {
        b.iter(|| snbt::parse(black_box(&text), Profile::V1_21_5).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_binary_round_trip, bench_snbt_round_trip);
criterion_main!(benches);
