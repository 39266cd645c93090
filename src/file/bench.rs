use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

// Reference the main crate
extern crate remote_file;

use remote_file::client::{LocalClient, MemoryClient};
use remote_file::config::OpenConfig;
use remote_file::file::FileHandle;

const PATH: &str = "/bench/payload.bin";

// Generate a random payload of specified length
fn generate_payload(length: usize) -> Vec<u8> {
    let mut rng = rand::thread_rng();
    let mut payload = vec![0u8; length];
    rng.fill(payload.as_mut_slice());
    payload
}

// Copying read vs zero-copy read into a reused buffer
pub fn bench_read_paths(c: &mut Criterion) {
    let client = MemoryClient::new();
    client.put(PATH, generate_payload(4 * 1024 * 1024));
    let file = FileHandle::open(&client, PATH, &OpenConfig::read()).unwrap();

    let mut group = c.benchmark_group("ReadPaths");

    for chunk in [4 * 1024usize, 64 * 1024, 1024 * 1024] {
        group.throughput(Throughput::Bytes(chunk as u64));

        group.bench_with_input(BenchmarkId::new("pread", chunk), &chunk, |b, &chunk| {
            b.iter(|| black_box(file.pread(black_box(0), chunk).unwrap()))
        });

        let mut buf = vec![0u8; chunk];
        group.bench_with_input(BenchmarkId::new("pread_into", chunk), &chunk, |b, _| {
            b.iter(|| black_box(file.pread_into(black_box(0), &mut buf).unwrap()))
        });
    }

    group.finish();
}

// Sequential writes through the copying and region paths, sunk into /dev/null
pub fn bench_write_paths(c: &mut Criterion) {
    let payload = generate_payload(64 * 1024);
    let client = LocalClient::new();
    let mut group = c.benchmark_group("WritePaths");
    group.throughput(Throughput::Bytes(payload.len() as u64));

    group.bench_function("write", |b| {
        let mut file = FileHandle::open(&client, "/dev/null", &OpenConfig::write()).unwrap();
        b.iter(|| black_box(file.write(black_box(&payload)).unwrap()))
    });

    group.bench_function("write_from", |b| {
        let mut file = FileHandle::open(&client, "/dev/null", &OpenConfig::write()).unwrap();
        b.iter(|| black_box(file.write_from(black_box(&payload)).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_read_paths, bench_write_paths);
criterion_main!(benches);
