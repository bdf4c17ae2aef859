//! Table-driven AES (Rijndael) block cipher with ECB and CBC chaining.
//!
//! This crate provides:
//! - Constant tables (S-boxes, round constants, GF(2^8) multiplication tables).
//! - The key schedule for 128-, 192- and 256-bit keys.
//! - The round transformations and their inverses.
//! - Stateless single-block encryption/decryption and a stateful [`AesEngine`]
//!   carrying the CBC chaining block.
//! - Key generation from the operating system's entropy source.
//!
//! Lookup tables make this implementation unsuitable where timing or cache
//! side channels matter. There is no authentication: pair it with a MAC if
//! integrity is required.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod block;
mod cipher;
mod engine;
mod error;
mod key;
mod keygen;
mod mode;
pub mod round;
pub mod tables;

pub use crate::block::{xor_in_place, Block, BLOCK_SIZE};
pub use crate::cipher::{decrypt_block, encrypt_block, expand_key};
pub use crate::engine::AesEngine;
pub use crate::error::{Error, Result};
pub use crate::key::{Key, RoundKeys};
pub use crate::keygen::{generate_key, generate_key_with};
pub use crate::mode::{Chaining, CipherMode, KeySize};
