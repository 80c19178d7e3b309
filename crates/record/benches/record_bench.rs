use criterion::{black_box, criterion_group, criterion_main, Criterion};
use record::testing::make_record;
use record::{RecordHeader, TRACK_NAME_OFFSET};

fn build_record() -> Vec<u8> {
    // Typical session files are a few hundred KiB of samples after the header.
    let mut buf = make_record("Chayka Test", "J Smith", "Honda+250", "23-05-10 14:30:00");
    buf.resize(buf.len() + 256 * 1024, 0x55);
    buf
}

fn scan_benchmark(c: &mut Criterion) {
    let buf = build_record();
    c.bench_function("value_offset_scan_track", |b| {
        b.iter(|| TRACK_NAME_OFFSET.scan(black_box(&buf)).unwrap());
    });
}

fn header_file_name_benchmark(c: &mut Criterion) {
    let buf = build_record();
    c.bench_function("record_header_parse_and_name", |b| {
        b.iter(|| {
            let header = RecordHeader::parse(black_box(&buf)).unwrap();
            header.file_name("drk")
        });
    });
}

criterion_group!(benches, scan_benchmark, header_file_name_benchmark);
criterion_main!(benches);
