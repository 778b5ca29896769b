//! PackBits run-length decoding.
//!
//! Control byte `n` (unsigned):
//! - `0..=127`: copy the next `n + 1` bytes literally
//! - `128`: no-op, only the control byte is consumed
//! - `129..=255`: repeat the next byte `257 - n` times

use alloc::vec::Vec;

use log::warn;

use super::cursor::ByteCursor;
use crate::error::IlbmError;

/// Unpack from `src` until exactly `len` bytes have been appended to `out`.
///
/// Returns the number of source bytes consumed. A run that would overshoot
/// `len` is clipped.
pub fn unpack_bits(src: &[u8], out: &mut Vec<u8>, len: usize) -> Result<usize, IlbmError> {
    let mut cursor = ByteCursor::new(src);
    unpack_row(&mut cursor, out, len)?;
    Ok(cursor.position())
}

pub(crate) fn unpack_row(
    cursor: &mut ByteCursor<'_>,
    out: &mut Vec<u8>,
    len: usize,
) -> Result<(), IlbmError> {
    let start = out.len();
    let end = start + len;
    while out.len() < end {
        let room = end - out.len();
        let n = cursor.read_u8()?;
        match n {
            0..=127 => {
                let run = usize::from(n) + 1;
                let literal = cursor.read_bytes(run)?;
                if run > room {
                    warn!("PackBits literal of {run} bytes clipped to {room}");
                }
                out.extend_from_slice(&literal[..run.min(room)]);
            }
            128 => {}
            _ => {
                let run = 257 - usize::from(n);
                let value = cursor.read_u8()?;
                if run > room {
                    warn!("PackBits repeat of {run} bytes clipped to {room}");
                }
                out.resize(out.len() + run.min(room), value);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn literal_run() {
        let mut out = Vec::new();
        let used = unpack_bits(&[2, 0x11, 0x22, 0x33], &mut out, 3).unwrap();
        assert_eq!(out, [0x11, 0x22, 0x33]);
        assert_eq!(used, 4);
    }

    #[test]
    fn repeat_run() {
        let mut out = Vec::new();
        let used = unpack_bits(&[0xFE, 0x80], &mut out, 3).unwrap();
        assert_eq!(out, [0x80, 0x80, 0x80]);
        assert_eq!(used, 2);
    }

    #[test]
    fn control_128_is_noop() {
        let mut out = Vec::new();
        let used = unpack_bits(&[0x80, 0x00, 0x42], &mut out, 1).unwrap();
        assert_eq!(out, [0x42]);
        assert_eq!(used, 3);

        // Only the 128 is consumed before the literal that satisfies the row.
        let mut out = Vec::new();
        let used = unpack_bits(&[0x80, 0x80, 0xFF, 0x07, 0xAA], &mut out, 2).unwrap();
        assert_eq!(out, [0x07, 0x07]);
        assert_eq!(used, 4);
    }

    #[test]
    fn longest_runs() {
        let mut src = vec![127u8];
        src.extend(0..128u8);
        let mut out = Vec::new();
        assert_eq!(unpack_bits(&src, &mut out, 128).unwrap(), 129);
        assert_eq!(out, (0..128u8).collect::<Vec<_>>());

        let mut out = Vec::new();
        assert_eq!(unpack_bits(&[129, 5], &mut out, 128).unwrap(), 2);
        assert_eq!(out, vec![5u8; 128]);
    }

    #[test]
    fn mixed_runs_append() {
        let mut out = vec![0xEE];
        unpack_bits(&[0xFD, 0x01, 1, 0x02, 0x03], &mut out, 6).unwrap();
        assert_eq!(out, [0xEE, 0x01, 0x01, 0x01, 0x01, 0x02, 0x03]);
    }

    #[test]
    fn overshoot_is_clipped() {
        let mut out = Vec::new();
        // Repeat of 4 into a 2-byte row, then the next row starts cleanly.
        let used = unpack_bits(&[0xFD, 0x09, 0x00, 0x01], &mut out, 2).unwrap();
        assert_eq!(out, [0x09, 0x09]);
        assert_eq!(used, 2);

        let mut out = Vec::new();
        let used = unpack_bits(&[3, 1, 2, 3, 4], &mut out, 3).unwrap();
        assert_eq!(out, [1, 2, 3]);
        assert_eq!(used, 5);
    }

    #[test]
    fn truncated_input_underruns() {
        let mut out = Vec::new();
        assert!(matches!(
            unpack_bits(&[4, 1, 2], &mut out, 5),
            Err(IlbmError::BufferUnderrun { .. })
        ));
        let mut out = Vec::new();
        assert!(matches!(
            unpack_bits(&[0xFE], &mut out, 3),
            Err(IlbmError::BufferUnderrun { .. })
        ));
        let mut out = Vec::new();
        assert!(matches!(
            unpack_bits(&[0x80, 0x80], &mut out, 1),
            Err(IlbmError::BufferUnderrun { .. })
        ));
    }

    #[test]
    fn zero_length_consumes_nothing() {
        let mut out = Vec::new();
        assert_eq!(unpack_bits(&[], &mut out, 0).unwrap(), 0);
        assert!(out.is_empty());
    }
}
