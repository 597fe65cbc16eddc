#![no_main]

use libfuzzer_sys::fuzz_target;
use sparsepack::{Codec, Value, ValueKind};

/// Turn fuzzer bytes into (kind, payload) values; 9 bytes per value
fn values_from(data: &[u8]) -> Vec<Value> {
    data.chunks_exact(9)
        .map(|chunk| {
            let kind = ValueKind::ALL[usize::from(chunk[0]) % ValueKind::ALL.len()];
            let mut raw = [0u8; 8];
            raw.copy_from_slice(&chunk[1..]);
            let bits = u64::from_le_bytes(raw);
            // Shift by the low byte so small values and zero runs are common
            let bits = bits >> (chunk[1] % 64);
            match kind {
                ValueKind::Int => Value::Int(bits as u32),
                ValueKind::SignedInt => Value::SignedInt(bits as i32),
                ValueKind::Float => Value::Float(f32::from_bits(bits as u32)),
                ValueKind::Double => Value::Double(f64::from_bits(bits)),
                ValueKind::Long => Value::Long(bits as i64),
                ValueKind::Bool => Value::Bool(bits & 1 == 1),
                ValueKind::Byte => Value::Byte(bits as i8),
            }
        })
        .collect()
}

fuzz_target!(|data: &[u8]| {
    let values = values_from(data);

    for codec in [Codec::Sparse, Codec::Dense] {
        let mut out = codec.writer();
        for v in &values {
            v.write_to(out.as_mut());
        }

        // Property 1: position() is idempotent
        let len = out.position();
        assert_eq!(out.position(), len, "position changed without writes");

        // Property 2: every value decodes bit-exactly in write order
        let mut input = codec.reader(out.buffer(), 0);
        for v in &values {
            let decoded = v.kind().read_from(input.as_mut());
            assert!(decoded.bits_eq(v), "{codec:?}: expected {v}, got {decoded}");
        }

        // Property 3: the reader never ends past the flushed length
        assert!(input.position() <= len, "reader overran the stream");
    }
});
