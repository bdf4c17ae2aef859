//! Padded streaming transform over [`aes_core::AesEngine`].
//!
//! Plaintext of any length is split into 16-byte blocks and the final block is
//! padded PKCS#7-style: every padding byte holds the number of padding bytes,
//! and input that ends on a block boundary gains one whole block of `0x10`.
//! Ciphertext is therefore always a non-empty multiple of 16 bytes and strictly
//! longer than the plaintext.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod codec;
mod error;

pub use crate::codec::{decrypt_stream, decrypt_to_vec, encrypt_stream, encrypt_to_vec};
pub use crate::error::StreamError;
