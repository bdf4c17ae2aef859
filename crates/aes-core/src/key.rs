//! Key material: raw cipher keys and expanded round keys.

use core::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::block::Block;
use crate::error::{Error, Result};
use crate::mode::{CipherMode, KeySize};

/// Longest key, in bytes.
const MAX_KEY_LEN: usize = KeySize::Aes256.key_len();

/// Most round keys any key size needs (`Nr + 1` for AES-256).
pub(crate) const MAX_ROUND_KEYS: usize = KeySize::Aes256.rounds() + 1;

/// Raw AES key whose length matches its [`KeySize`]. Wiped on drop.
///
/// Zeroizing keeps the length and clears the bytes.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct Key {
    bytes: [u8; MAX_KEY_LEN],
    #[zeroize(skip)]
    size: KeySize,
}

impl Key {
    /// Copies `bytes` into a key for `mode`, rejecting any length mismatch.
    pub fn new(mode: CipherMode, bytes: &[u8]) -> Result<Self> {
        if bytes.len() != mode.key_len() {
            return Err(Error::KeyLength {
                mode,
                expected: mode.key_len(),
                actual: bytes.len(),
            });
        }
        let mut stored = [0u8; MAX_KEY_LEN];
        stored[..bytes.len()].copy_from_slice(bytes);
        Ok(Self {
            bytes: stored,
            size: mode.key_size,
        })
    }

    /// Key size this key was validated against.
    pub fn size(&self) -> KeySize {
        self.size
    }

    /// Raw key bytes, as stored on disk.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.size.key_len()]
    }
}

impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Key")
            .field("size", &self.size)
            .field("bytes", &"<redacted>")
            .finish()
    }
}

/// Expanded round keys: `Nr + 1` blocks. Wiped on drop.
///
/// Zeroizing clears every block but keeps the round count, so a wiped
/// schedule is still usable (as an all-zero key schedule).
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct RoundKeys {
    keys: [Block; MAX_ROUND_KEYS],
    #[zeroize(skip)]
    rounds: usize,
}

impl RoundKeys {
    /// Wraps `keys[..=rounds]` as a schedule.
    pub(crate) fn new(keys: [Block; MAX_ROUND_KEYS], rounds: usize) -> Self {
        debug_assert!(rounds < MAX_ROUND_KEYS);
        Self { keys, rounds }
    }

    /// Returns the round key at the requested index (`0..=Nr`).
    #[inline]
    pub fn get(&self, round: usize) -> &Block {
        &self.keys[..=self.rounds][round]
    }

    /// Number of rounds (`Nr`) these keys drive.
    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Number of round keys (`Nr + 1`).
    #[inline]
    pub fn len(&self) -> usize {
        self.rounds + 1
    }

    /// Always false: a schedule holds at least the initial round key.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates round keys from round 0 upwards.
    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.keys[..=self.rounds].iter()
    }
}

impl fmt::Debug for RoundKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoundKeys")
            .field("rounds", &self.rounds())
            .finish_non_exhaustive()
    }
}
