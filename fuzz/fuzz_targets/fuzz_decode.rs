#![no_main]
use libfuzzer_sys::fuzz_target;
use zenilbm::{DecodeRequest, Limits};

fuzz_target!(|data: &[u8]| {
    let limits = Limits {
        max_memory_bytes: Some(256 * 1024 * 1024),
        ..Default::default()
    };

    // Must never panic
    let _ = zenilbm::probe(data);
    let rgb = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode(enough::Unstoppable);
    let indexed = DecodeRequest::new(data)
        .with_limits(&limits)
        .decode_indexed(enough::Unstoppable);

    // Both outputs come from the same bitplanes
    if let (Ok(rgb), Ok(indexed)) = (rgb, indexed) {
        assert_eq!(rgb.width, indexed.width);
        assert_eq!(rgb.height, indexed.height);
        for (px, &i) in rgb.pixels().chunks_exact(3).zip(indexed.pixels()) {
            assert_eq!(rgb.palette().get(usize::from(i)).as_ref().map(|c| &c[..]), Some(px));
        }
    }
});
