//! Email verification tokens

/// Token length used when none is configured
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Longest token the `verification_token` column can hold
pub const MAX_TOKEN_LENGTH: usize = 50;

/// Shortest token ever issued
pub const MIN_TOKEN_LENGTH: usize = 16;

/// Generate a cryptographically secure random verification token
///
/// `len` is clamped to 16..=50 characters.
pub fn generate_verification_token(len: usize) -> String {
    use rand::Rng;

    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

    let len = len.clamp(MIN_TOKEN_LENGTH, MAX_TOKEN_LENGTH);
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}
