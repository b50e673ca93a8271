// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the pdfsnap-document crate: the save-path transport
// encoding and the photo to PDF conversion.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{DynamicImage, Rgb, RgbImage};

use pdfsnap_document::{PhotoPdfWriter, encode_transport};

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Encode a 4 MiB buffer, roughly the size of a PDF wrapping a phone photo.
fn bench_transport_encoding(c: &mut Criterion) {
    let bytes: Vec<u8> = (0..4 * 1024 * 1024).map(|i: usize| (i % 251) as u8).collect();

    c.bench_function("encode_transport (4 MiB, 8 KiB chunks)", |b| {
        b.iter(|| black_box(encode_transport(black_box(&bytes), 8192)));
    });
}

/// Convert and serialise a 640x480 synthetic photo.
fn bench_photo_to_pdf(c: &mut Criterion) {
    let mut img = RgbImage::new(640, 480);
    for (x, y, px) in img.enumerate_pixels_mut() {
        *px = Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8]);
    }
    let dynamic = DynamicImage::ImageRgb8(img);
    let writer = PhotoPdfWriter::default();

    c.bench_function("photo_to_pdf (640x480)", |b| {
        b.iter(|| {
            let doc = writer.create_from_image(black_box(&dynamic)).unwrap();
            black_box(doc.to_bytes().unwrap());
        });
    });
}

criterion_group!(benches, bench_transport_encoding, bench_photo_to_pdf);
criterion_main!(benches);
