#![no_main]

use libfuzzer_sys::fuzz_target;
use sparsepack::{SparseWriteStream, ValueWriteStream};

fuzz_target!(|data: &[u8]| {
    // Bytes are ints; 0xFF marks a scope boundary and 0xFE rolls back to the last one.
    let mut out = SparseWriteStream::with_capacity(0);
    let mut expected: Vec<Vec<u32>> = vec![Vec::new()];
    let mut scope = out.start_scope();

    for &b in data {
        match b {
            0xFF => {
                scope = out.start_scope();
                expected.push(Vec::new());
            }
            0xFE => {
                out.roll_back(scope);
                if let Some(last) = expected.last_mut() {
                    last.clear();
                }
            }
            v => {
                let v = u32::from(v) << (v % 25);
                out.write_int(v);
                if let Some(last) = expected.last_mut() {
                    last.push(v);
                }
            }
        }
    }

    // Re-encode the surviving scopes from scratch and compare bytes.
    let mut fresh = SparseWriteStream::new();
    for values in &expected {
        fresh.align();
        for &v in values {
            fresh.write_int(v);
        }
    }
    assert_eq!(out.into_bytes(), fresh.into_bytes(), "rollback left stale bytes");
});
