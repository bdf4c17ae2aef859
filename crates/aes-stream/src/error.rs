//! Stream codec errors.

use std::io;

/// Errors raised while encrypting or decrypting a stream.
///
/// Output already written before the error is not rolled back.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The ciphertext ended part-way through a block.
    #[error("ciphertext is not a whole number of blocks: {read} trailing bytes at offset {offset}")]
    Framing {
        /// Byte offset of the truncated block.
        offset: u64,
        /// Bytes read for the truncated block (1..=15).
        read: usize,
    },
    /// Reading the input or writing the output failed.
    #[error("stream I/O error ({0})")]
    Io(#[from] io::Error),
}
