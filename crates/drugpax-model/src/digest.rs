//! Content digests used for identifier derivation.
//!
//! Identifiers must be reproducible across runs and platforms, so we use a
//! **simple, deterministic, non-cryptographic** digest:
//!
//! - algorithm: **FNV-1a 64-bit**
//! - input: the UTF-8 bytes of each part, parts separated by `0x1f`
//! - output: 16 lowercase hex digits
//!
//! This digest is **not** a security primitive. It is an identity tool: two
//! records that carry the same discriminating content collapse to the same
//! identifier.

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x00000100000001b3;

/// Unit separator placed between parts, so `["ab", "c"]` and `["a", "bc"]`
/// hash differently.
const PART_SEPARATOR: u8 = 0x1f;

fn add(hash: &mut u64, bytes: &[u8]) {
    for b in bytes {
        *hash ^= (*b) as u64;
        *hash = hash.wrapping_mul(FNV_PRIME);
    }
}

/// FNV-1a 64-bit over arbitrary bytes, as 16 hex digits.
pub fn fnv1a64_hex(bytes: &[u8]) -> String {
    let mut hash = FNV_OFFSET_BASIS;
    add(&mut hash, bytes);
    format!("{hash:016x}")
}

/// FNV-1a 64-bit over an ordered list of string parts.
pub fn fnv1a64_parts_hex<S: AsRef<str>>(parts: &[S]) -> String {
    let mut hash = FNV_OFFSET_BASIS;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            add(&mut hash, &[PART_SEPARATOR]);
        }
        add(&mut hash, part.as_ref().as_bytes());
    }
    format!("{hash:016x}")
}
