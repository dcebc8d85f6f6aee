use thiserror::Error;

/// Errors returned by the hasher and its helpers.
#[derive(Debug, Error)]
pub enum Error {
    /// The context already produced its digest and must be reset before reuse.
    #[error("hasher was already finalized")]
    Finalized,
    /// The message would be 2^64 bits or longer, which the length field cannot encode.
    #[error("message length does not fit the 64-bit length field")]
    InputTooLarge,
    #[error("expected {} hex characters", crate::DIGEST_LEN * 2)]
    InvalidHex,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
