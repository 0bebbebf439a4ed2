//! Credential generation

use rand::rngs::OsRng;
use rand::RngCore;

/// Length of generated `AUTH_SECRET` values.
pub const AUTH_SECRET_LEN: usize = 32;

/// Lowercase hex string of `len` chars from the OS CSPRNG.
pub fn generate_hex_secret(len: usize) -> String {
    let mut bytes = vec![0u8; len.div_ceil(2)];
    OsRng.fill_bytes(&mut bytes);
    let mut hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    hex.truncate(len);
    hex
}
