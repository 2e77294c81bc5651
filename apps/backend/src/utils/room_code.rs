//! Room code generation and normalization.
//!
//! Room codes are 8-character strings using Crockford's Base32 alphabet, so they
//! survive being read aloud or typed by hand.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U

pub const ROOM_CODE_LEN: usize = 8;

/// Generate a fresh room code from the thread-local CSPRNG.
pub fn generate_room_code() -> String {
    let mut rng = rand::rng();
    (0..ROOM_CODE_LEN)
        .map(|_| CROCKFORD[rng.random_range(0..CROCKFORD.len())] as char)
        .collect()
}

/// Canonical form used as the registry key. Lookups are case-insensitive.
pub fn normalize_room_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}
