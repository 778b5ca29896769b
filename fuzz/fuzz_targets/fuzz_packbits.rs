#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&len, src)) = data.split_first() else {
        return;
    };
    let len = usize::from(len);
    let mut out = Vec::new();
    if let Ok(used) = zenilbm::ilbm::unpack_bits(src, &mut out, len) {
        assert_eq!(out.len(), len, "row length mismatch");
        assert!(used <= src.len());
    }
});
