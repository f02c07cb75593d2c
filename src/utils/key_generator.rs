//! Short key generation utilities.
//!
//! Keys are drawn from OS entropy and mapped onto a 62-symbol alphabet with
//! rejection sampling, so every symbol is equally likely.

/// Number of symbols in a generated key.
pub const KEY_LENGTH: usize = 6;

/// Symbols a key is drawn from.
pub const KEY_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Largest multiple of 62 that fits in a byte. Bytes at or above it are
/// discarded.
const REJECTION_THRESHOLD: u8 = 248;

/// Random bytes fetched per refill.
const ENTROPY_CHUNK: usize = 16;

/// Keys that collide with fixed routes and are never issued.
pub const RESERVED_KEYS: &[&str] = &["health"];

/// Generates a random short key.
///
/// Uses `getrandom` for entropy. Each byte below [`REJECTION_THRESHOLD`]
/// yields one symbol via `byte % 62`; other bytes are discarded and more
/// entropy is drawn as needed.
///
/// # Errors
///
/// Returns the underlying error if the OS random source fails.
///
/// # Examples
///
/// ```ignore
/// let key = generate_key()?;
/// assert_eq!(key.len(), 6);
/// assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_key() -> Result<String, getrandom::Error> {
    let mut key = String::with_capacity(KEY_LENGTH);
    let mut buffer = [0u8; ENTROPY_CHUNK];

    while key.len() < KEY_LENGTH {
        getrandom::fill(&mut buffer)?;

        for &byte in &buffer {
            if let Some(symbol) = map_byte(byte) {
                key.push(symbol);
                if key.len() == KEY_LENGTH {
                    break;
                }
            }
        }
    }

    Ok(key)
}

/// Maps a random byte to a symbol, or `None` if it must be rejected.
fn map_byte(byte: u8) -> Option<char> {
    if byte >= REJECTION_THRESHOLD {
        return None;
    }
    Some(KEY_ALPHABET[(byte % 62) as usize] as char)
}

/// Returns true if `key` has the shape of a generated key.
pub fn is_valid_key(key: &str) -> bool {
    key.len() == KEY_LENGTH && key.bytes().all(|b| KEY_ALPHABET.contains(&b))
}

/// Returns true if `key` is reserved for a fixed route.
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}
