#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn form(chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
    let mut body = b"ILBM".to_vec();
    for (id, content) in chunks {
        body.extend_from_slice(*id);
        body.extend_from_slice(&(content.len() as u32).to_be_bytes());
        body.extend_from_slice(content);
    }
    let mut out = b"FORM".to_vec();
    out.extend_from_slice(&(body.len() as u32).to_be_bytes());
    out.extend_from_slice(&body);
    out
}

fn bmhd(width: u16, height: u16, planes: u8, compression: u8) -> Vec<u8> {
    let mut h = Vec::new();
    h.extend_from_slice(&width.to_be_bytes());
    h.extend_from_slice(&height.to_be_bytes());
    h.extend_from_slice(&[0, 0, 0, 0, planes, 0, compression, 0, 0, 0, 10, 11]);
    h.extend_from_slice(&width.to_be_bytes());
    h.extend_from_slice(&height.to_be_bytes());
    h
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    let cmap4 = [0, 0, 0, 255, 0, 0, 0, 255, 0, 255, 255, 255];

    // 16x2, 2 planes, uncompressed
    let raw = form(&[
        (b"BMHD", &bmhd(16, 2, 2, 0)),
        (b"CMAP", &cmap4),
        (b"BODY", &[0xF0, 0x0F, 0xAA, 0x55, 0xFF, 0x00, 0x00, 0xFF]),
    ]);
    fs::write(format!("{dir}/raw_16x2x2.iff"), raw).unwrap();

    // 16x2, 2 planes, PackBits with literal, repeat and no-op runs
    let packed = form(&[
        (b"BMHD", &bmhd(16, 2, 2, 1)),
        (b"CMAP", &cmap4),
        (b"BODY", &[0xFF, 0xAA, 0x01, 0x12, 0x34, 0x80, 0xFF, 0x00, 0xFF, 0xFF]),
    ]);
    fs::write(format!("{dir}/packbits_16x2x2.iff"), packed).unwrap();

    // Odd-length unknown chunk ahead of the header
    let odd = form(&[
        (b"ANNO", b"odd"),
        (b"BMHD", &bmhd(8, 1, 1, 0)),
        (b"CMAP", &cmap4[..6]),
        (b"BODY", &[0x81]),
    ]);
    fs::write(format!("{dir}/odd_chunk.iff"), odd).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/just_form.bin"), b"FORM").unwrap();
    fs::write(format!("{dir}/bad_len.bin"), b"FORM\0\0\0\x20ILBM").unwrap();
    fs::write(format!("{dir}/no_chunks.bin"), b"FORM\0\0\0\x04ILBM").unwrap();

    println!("Generated seed corpus in {dir}/");
}
