#![no_main]

use libfuzzer_sys::fuzz_target;
use sparsepack::{Codec, ValueKind};

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary bytes to both readers - should never panic or hang.
    // First byte picks the start offset, the rest is the stream.
    let Some((&start, stream)) = data.split_first() else {
        return;
    };
    for codec in [Codec::Sparse, Codec::Dense] {
        let mut input = codec.reader(stream, usize::from(start));
        for i in 0..stream.len() * 2 + 8 {
            let _ = ValueKind::ALL[i % ValueKind::ALL.len()].read_from(input.as_mut());
        }
    }
});
