//! Error taxonomy for engine construction and key generation.

use crate::mode::CipherMode;

/// Errors raised by `aes-core`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The supplied key does not have the length the mode requires.
    #[error("{mode} requires a {expected}-byte key, got {actual} bytes")]
    KeyLength {
        /// Mode the key was supplied for.
        mode: CipherMode,
        /// Required key length in bytes.
        expected: usize,
        /// Length of the key that was supplied.
        actual: usize,
    },
    /// A mode name could not be parsed.
    #[error("unknown cipher mode '{0}', expected one of aes-{{128,192,256}}-{{ecb,cbc}}")]
    UnknownMode(Box<str>),
    /// The system entropy source failed or returned too few bytes.
    #[error("unable to gather key material from the system entropy source ({0})")]
    Entropy(#[source] rand::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
