//! Test-only ILBM writer and pattern generators.
#![allow(dead_code)]

pub const BLACK: [u8; 3] = [0, 0, 0];
pub const RED: [u8; 3] = [255, 0, 0];
pub const GREEN: [u8; 3] = [0, 255, 0];
pub const WHITE: [u8; 3] = [255, 255, 255];

/// Wrap chunks in `FORM <len> ILBM`. No pad bytes are inserted.
pub fn form(chunks: &[(&[u8; 4], &[u8])]) -> Vec<u8> {
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

pub fn bmhd(width: u16, height: u16, planes: u8, compression: u8) -> Vec<u8> {
    let mut out = Vec::with_capacity(20);
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    out.extend_from_slice(&[0, 0, 0, 0]); // origin
    out.extend_from_slice(&[planes, 0, compression, 0]);
    out.extend_from_slice(&0u16.to_be_bytes()); // transparent color
    out.extend_from_slice(&[10, 11]); // aspect
    out.extend_from_slice(&width.to_be_bytes());
    out.extend_from_slice(&height.to_be_bytes());
    out
}

pub fn cmap(colors: &[[u8; 3]]) -> Vec<u8> {
    colors.iter().flatten().copied().collect()
}

/// Split index rows into per-row, per-plane byte rows (MSB = leftmost pixel).
pub fn plane_rows(indices: &[u8], width: usize, height: usize, planes: u8) -> Vec<Vec<Vec<u8>>> {
    assert_eq!(width % 8, 0);
    assert_eq!(indices.len(), width * height);
    (0..height)
        .map(|y| {
            let row = &indices[y * width..(y + 1) * width];
            (0..planes)
                .map(|p| {
                    row.chunks_exact(8)
                        .map(|px| {
                            px.iter().enumerate().fold(0u8, |acc, (x, &i)| {
                                acc | (((i >> p) & 1) << (7 - x))
                            })
                        })
                        .collect()
                })
                .collect()
        })
        .collect()
}

pub fn raw_body(indices: &[u8], width: usize, height: usize, planes: u8) -> Vec<u8> {
    plane_rows(indices, width, height, planes)
        .into_iter()
        .flatten()
        .flatten()
        .collect()
}

pub fn packbits_body(indices: &[u8], width: usize, height: usize, planes: u8) -> Vec<u8> {
    plane_rows(indices, width, height, planes)
        .iter()
        .flatten()
        .flat_map(|row| pack_bits(row))
        .collect()
}

/// Straightforward PackBits encoder: repeats of 2+ become runs, the rest literals.
pub fn pack_bits(row: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < row.len() {
        let mut run = 1;
        while i + run < row.len() && run < 128 && row[i + run] == row[i] {
            run += 1;
        }
        if run >= 2 {
            out.push((257 - run) as u8);
            out.push(row[i]);
            i += run;
        } else {
            let start = i;
            i += 1;
            while i < row.len() && i - start < 128 && !(i + 1 < row.len() && row[i] == row[i + 1])
            {
                i += 1;
            }
            out.push((i - start - 1) as u8);
            out.extend_from_slice(&row[start..i]);
        }
    }
    out
}

/// Complete ILBM file from an index grid.
pub fn ilbm(
    indices: &[u8],
    width: u16,
    height: u16,
    planes: u8,
    palette: &[[u8; 3]],
    compression: u8,
) -> Vec<u8> {
    let (w, h) = (width as usize, height as usize);
    let body = match compression {
        0 => raw_body(indices, w, h, planes),
        1 => packbits_body(indices, w, h, planes),
        _ => panic!("test writer only emits compression 0 or 1"),
    };
    form(&[
        (b"BMHD", &bmhd(width, height, planes, compression)),
        (b"CMAP", &cmap(palette)),
        (b"BODY", &body),
    ])
}

/// Deterministic pseudo-random indices below `1 << planes`.
pub fn noise_indices(width: usize, height: usize, planes: u8) -> Vec<u8> {
    let mask = ((1u16 << planes) - 1) as u8;
    let mut state: u32 = 0xDEAD_BEEF;
    (0..width * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as u8) & mask
        })
        .collect()
}

/// Horizontal bands of one index each; compresses well with PackBits.
pub fn band_indices(width: usize, height: usize, planes: u8) -> Vec<u8> {
    let colors = 1usize << planes;
    (0..height)
        .flat_map(|y| core::iter::repeat_n((y % colors) as u8, width))
        .collect()
}

/// `n` distinct colors.
pub fn ramp_palette(n: usize) -> Vec<[u8; 3]> {
    (0..n)
        .map(|i| [i as u8, (i * 7) as u8, 255 - i as u8])
        .collect()
}
