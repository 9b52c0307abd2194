//! SHA256 + base36 ID generation for fields and schemas.

use chrono::{DateTime, Utc};
use num_bigint::BigUint;
use num_traits::Zero;
use sha2::{Digest, Sha256};

/// Base36 alphabet (0-9, a-z).
const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Prefix for field IDs.
pub const FIELD_PREFIX: &str = "fld";

/// Prefix for saved-schema IDs.
pub const SCHEMA_PREFIX: &str = "frm";

/// Default hash length for generated IDs.
pub const DEFAULT_LENGTH: usize = 6;

/// Converts a byte slice to a base36 string of the specified length.
pub fn encode_base36(data: &[u8], length: usize) -> String {
    let mut num = BigUint::from_bytes_be(data);
    let base = BigUint::from(36u32);
    let zero = BigUint::zero();

    // Build the string in reverse.
    let mut chars: Vec<u8> = Vec::with_capacity(length);
    while num > zero {
        let rem = &num % &base;
        num /= &base;
        // rem is guaranteed to be < 36, so fits in a u8 index.
        let idx = rem.to_u32_digits();
        let i = if idx.is_empty() { 0 } else { idx[0] as usize };
        chars.push(BASE36_ALPHABET[i]);
    }

    chars.reverse();

    let mut s = String::from_utf8(chars).expect("base36 chars are valid UTF-8");

    // Pad with zeros if needed.
    if s.len() < length {
        let padding = "0".repeat(length - s.len());
        s = padding + &s;
    }

    // Truncate to exact length (keep least significant digits).
    if s.len() > length {
        s = s[s.len() - length..].to_owned();
    }

    s
}

/// Creates a hash-based ID from a label, a timestamp and a nonce.
///
/// The nonce lets a caller retry on the (unlikely) collision within one
/// schema's field list.
pub fn generate_id(
    prefix: &str,
    label: &str,
    timestamp: DateTime<Utc>,
    length: usize,
    nonce: i32,
) -> String {
    let content = format!(
        "{}|{}|{}",
        label,
        timestamp.timestamp_nanos_opt().unwrap_or(0),
        nonce
    );

    let hash = Sha256::digest(content.as_bytes());

    // Byte width chosen so the base36 output fills the requested length.
    let num_bytes = match length {
        3 => 2,
        4 => 3,
        5 | 6 => 4,
        7 | 8 => 5,
        _ => 4,
    };

    let short_hash = encode_base36(&hash[..num_bytes], length);
    format!("{}-{}", prefix, short_hash)
}

/// Generates a field ID unique against the given existing IDs.
pub fn unique_id(
    prefix: &str,
    label: &str,
    length: usize,
    existing: impl Fn(&str) -> bool,
) -> String {
    let now = Utc::now();
    let mut nonce = 0;
    loop {
        let id = generate_id(prefix, label, now, length, nonce);
        if !existing(&id) {
            return id;
        }
        nonce += 1;
    }
}
