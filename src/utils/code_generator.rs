//! Short code generation and validation utilities.
//!
//! Codes are fixed-length strings over the base62 alphabet, drawn from the
//! thread-local CSPRNG provided by `rand`.

use rand::Rng;
use regex::Regex;
use std::sync::LazyLock;

/// Symbols a short code may contain, in alphabet order.
pub const BASE62_ALPHABET: &[u8; 62] =
    b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length of every generated short code.
pub const SHORT_CODE_LENGTH: usize = 7;

static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9a-zA-Z]{7}$").expect("short code regex is valid"));

/// Source of candidate short codes.
///
/// Every call must return an independent draw; the allocator relies on that
/// to get a fresh candidate after a collision.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Uniform random base62 generator.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(SHORT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> String {
        generate_code(self.length)
    }
}

/// Generates a random code of `length` base62 characters.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(7);
/// assert!(is_valid_short_code(&code));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| BASE62_ALPHABET[rng.random_range(0..BASE62_ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `code` has the shape of a short code (`^[0-9a-zA-Z]{7}$`).
pub fn is_valid_short_code(code: &str) -> bool {
    SHORT_CODE_REGEX.is_match(code)
}
