// src/auth/token.rs
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

pub const SESSION_TOKEN_BYTES: usize = 32;

/// URL-safe random token from the OS RNG (~43 chars for 32 bytes).
pub fn generate_token() -> String {
    let mut buf = [0u8; SESSION_TOKEN_BYTES];
    OsRng.fill_bytes(&mut buf);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buf)
}

/// Short random hex id, used to keep upload filenames unique.
pub fn short_id() -> String {
    let mut buf = [0u8; 4];
    OsRng.fill_bytes(&mut buf);
    buf.iter().map(|b| format!("{b:02x}")).collect()
}

/// SHA-256 of a token or password. Only this goes to the DB.
pub fn hash_token(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}

/// Constant-time-ish compare for hashes (simple and sufficient here).
pub fn hashes_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Compare a submitted password with the configured one without
/// short-circuiting on the first differing byte.
pub fn password_matches(submitted: &str, expected: &str) -> bool {
    hashes_equal(&hash_token(submitted), &hash_token(expected))
}
