#![no_main]
use libfuzzer_sys::fuzz_target;
use progmem::*;

fuzz_target!(|data: &[u8]| {
    // header: width, height, preset, block size, frame count
    let [w, h, p, b, n, pixels @ ..] = data else {
        return;
    };
    let width = u32::from(*w % 16) + 1;
    let height = u32::from(*h % 16) + 1;
    let preset = Preset::ALL[*p as usize % Preset::ALL.len()];
    let block_size = BlockSize::ALL[*b as usize % BlockSize::ALL.len()];
    let count = usize::from(*n % 4) + 1;

    let frame_bytes = (width * height * 4) as usize;
    if pixels.len() < frame_bytes * count {
        return;
    }
    let frames: Vec<Frame<'_>> = pixels
        .chunks_exact(frame_bytes)
        .take(count)
        .map(|px| Frame::rgba(px, width, height))
        .collect();

    let seq = if count == 1 {
        encode_still(&frames[0], preset, enough::Unstoppable)
    } else {
        encode_animation(&frames, preset, enough::Unstoppable)
    }
    .expect("valid frames must encode");

    let text = render(&seq, "fuzz", block_size).expect("render without limits");

    // every literal parses back to the encoded value, in order
    let open = text.find("= {\n").expect("initializer") + 4;
    let close = text.rfind("\n};\n").expect("terminator");
    let parsed: Vec<u32> = text[open..close]
        .split(|c| c == ',' || c == '{' || c == '}')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|lit| {
            let hex = lit.strip_prefix("0x").expect("hex prefix");
            assert!(hex.len() >= block_size.digits());
            u32::from_str_radix(hex, 16).expect("hex digits")
        })
        .collect();
    let expected: Vec<u32> = seq
        .frames()
        .iter()
        .flat_map(|f| f.values().iter().copied())
        .collect();
    assert_eq!(parsed, expected, "literal mismatch");
});
