use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use zed_f9p::*;

fn nav_pvt_frame() -> [u8; 100] {
    let mut frame = [0u8; 100];
    frame[..6].copy_from_slice(&[0xb5, 0x62, 0x01, 0x07, 0x5c, 0x00]);
    for (i, b) in frame[6..98].iter_mut().enumerate() {
        *b = i as u8;
    }
    let (ck_a, ck_b) = ubx_checksum(&frame[2..98]);
    frame[98] = ck_a;
    frame[99] = ck_b;
    frame
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let frame = nav_pvt_frame();
    c.bench_function("decode_nav_pvt", |b| {
        let mut record = NavPvt::default();
        b.iter(|| {
            decode(black_box(&frame), frame.len(), &mut record).unwrap();
            black_box(&record);
        })
    });

    let mut corrupted = frame;
    corrupted[50] ^= 0xff;
    c.bench_function("decode_nav_pvt_bad_checksum", |b| {
        let mut record = NavPvt::default();
        b.iter(|| decode(black_box(&corrupted), corrupted.len(), &mut record).is_err())
    });

    for size in [256, 1024] {
        let mut dma = vec![0u8; size];
        dma[..frame.len()].copy_from_slice(&frame);
        c.bench_function(&format!("decode_nav_pvt_from_dma_{}", size), |b| {
            let mut record = NavPvt::default();
            b.iter(|| decode(black_box(&dma), frame.len(), &mut record).unwrap())
        });
    }

    c.bench_function("build_set_output_rate_frame", |b| {
        b.iter(|| build_set_output_rate_frame(black_box(3)))
    });
    c.bench_function("build_disable_legacy_output_frame", |b| {
        b.iter(build_disable_legacy_output_frame)
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
