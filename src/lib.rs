//! Streaming [SHA-256] over arbitrary byte input.
//!
//! [SHA-256]: https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.180-4.pdf

mod compress;
mod error;
pub mod prompt;
mod sha256;
pub mod selftest;

pub use compress::{compress, Compress, Soft, State, IV, K};
pub use error::Error;
pub use sha256::{digest, Digest, Sha256};

/// The size of a SHA-256 block, in 32-bit words.
pub const BLOCK_SIZE: usize = 16;
/// The size of a SHA-256 digest, in 32-bit words.
pub const DIGEST_SIZE: usize = 8;

/// The size of a SHA-256 block, in bytes.
pub const BLOCK_LEN: usize = BLOCK_SIZE * 4;
/// The size of a SHA-256 digest, in bytes.
pub const DIGEST_LEN: usize = DIGEST_SIZE * 4;
