//! Stateful cipher engine: a mode, its key schedule and the CBC chaining block.
//!
//! CBC here follows the original stream format: the chaining block is XORed
//! into the *output* of the block transform on encryption, and into the
//! ciphertext *before* the inverse transform on decryption. The initial
//! chaining block is all zeroes and is not part of the ciphertext, so the
//! first block of two messages that share a prefix encrypts identically.
//! Callers that need unique IVs per message must arrange them outside this
//! engine.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::{xor_in_place, Block, BLOCK_SIZE};
use crate::cipher::{decrypt_block, encrypt_block, expand_key};
use crate::error::Result;
use crate::key::{Key, RoundKeys};
use crate::mode::CipherMode;

/// AES engine bound to one mode and key.
///
/// Not safe to drive from several threads at once in CBC mode; the chaining
/// block is mutated on every call. The round keys are immutable and may be
/// borrowed by other threads through [`AesEngine::round_keys`].
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct AesEngine {
    #[zeroize(skip)]
    mode: CipherMode,
    key: Key,
    schedule: RoundKeys,
    chain: Block,
}

impl AesEngine {
    /// Validates `key` against `mode` and expands the round keys.
    pub fn new(mode: CipherMode, key: &[u8]) -> Result<Self> {
        let key = Key::new(mode, key)?;
        Ok(Self::with_key(mode, key))
    }

    /// Builds an engine from an already validated key.
    ///
    /// The key size recorded in `key` wins over `mode.key_size`.
    pub fn with_key(mode: CipherMode, key: Key) -> Self {
        let mode = CipherMode::new(key.size(), mode.chaining);
        let schedule = expand_key(&key);
        log::debug!("initialised {mode} engine with {} rounds", schedule.rounds());
        Self {
            mode,
            key,
            schedule,
            chain: [0u8; BLOCK_SIZE],
        }
    }

    /// Mode this engine was constructed with.
    pub fn mode(&self) -> CipherMode {
        self.mode
    }

    /// Number of cipher rounds.
    pub fn rounds(&self) -> usize {
        self.schedule.rounds()
    }

    /// Expanded round keys.
    pub fn round_keys(&self) -> &RoundKeys {
        &self.schedule
    }

    /// Key this engine was built from.
    pub fn key(&self) -> &Key {
        &self.key
    }

    /// Restores the all-zero initial chaining block so a new message can start.
    pub fn reset_chain(&mut self) {
        self.chain = [0u8; BLOCK_SIZE];
    }

    /// Encrypts one block in place, chaining it in CBC mode.
    pub fn encrypt_block(&mut self, block: &mut Block) {
        *block = encrypt_block(block, &self.schedule);
        if self.mode.is_cbc() {
            xor_in_place(block, &self.chain);
            self.chain = *block;
        }
    }

    /// Decrypts one block in place, unchaining it first in CBC mode.
    pub fn decrypt_block(&mut self, block: &mut Block) {
        if self.mode.is_cbc() {
            let ciphertext = *block;
            xor_in_place(block, &self.chain);
            self.chain = ciphertext;
        }
        *block = decrypt_block(block, &self.schedule);
    }
}

impl core::fmt::Debug for AesEngine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AesEngine")
            .field("mode", &self.mode)
            .field("rounds", &self.rounds())
            .finish_non_exhaustive()
    }
}
