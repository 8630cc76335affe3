use rand::Rng;

/// Bytes of entropy in a session token.
pub const TOKEN_BYTES: usize = 32;

/// Generate an opaque session token: 32 random bytes, hex-encoded.
pub fn generate_token() -> String {
    let token_bytes: [u8; TOKEN_BYTES] = rand::thread_rng().gen();
    hex::encode(token_bytes)
}
