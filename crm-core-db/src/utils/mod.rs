use heapless::String as HeaplessString;
use serde::Serialize;
use std::hash::Hasher;
use twox_hash::XxHash64;

/// Hashes serializable data into an i64 using CBOR serialization and XxHash64.
///
/// This provides a stable hash across different runs and systems by:
/// - Serializing the data to CBOR format (deterministic binary representation)
/// - Using XxHash64 with a fixed seed (0) for consistent hashing
pub fn hash_as_i64<T: Serialize>(data: &T) -> Result<i64, String> {
    let mut hasher = XxHash64::with_seed(0);
    let mut cbor = Vec::new();
    ciborium::ser::into_writer(data, &mut cbor)
        .map_err(|e| format!("Failed to serialize data for hashing: {e}"))?;
    hasher.write(&cbor);
    Ok(hasher.finish() as i64)
}

/// Copies a str into a bounded heapless string, truncating on a char
/// boundary when the input exceeds the capacity.
pub fn bounded<const N: usize>(s: &str) -> HeaplessString<N> {
    let mut out = HeaplessString::new();
    for ch in s.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
    out
}

/// Fallible conversion into a bounded heapless string; the field name is
/// carried into the error for caller-facing validation messages.
pub fn try_bounded<const N: usize>(s: &str, field: &str) -> Result<HeaplessString<N>, String> {
    HeaplessString::try_from(s).map_err(|_| format!("{field} exceeds {N} characters"))
}
