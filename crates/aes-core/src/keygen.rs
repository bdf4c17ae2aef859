//! Random key generation.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::key::Key;
use crate::mode::CipherMode;

/// Generates a key for `mode` from the operating system's entropy source.
///
/// Fails with [`Error::Entropy`] if the source is unavailable; there is no
/// fallback to a weaker generator.
pub fn generate_key(mode: CipherMode) -> Result<Key> {
    generate_key_with(mode, &mut OsRng)
}

/// Generates a key for `mode` from the supplied cryptographic RNG.
pub fn generate_key_with<R: RngCore + CryptoRng>(mode: CipherMode, rng: &mut R) -> Result<Key> {
    let mut bytes = Zeroizing::new(vec![0u8; mode.key_len()]);
    rng.try_fill_bytes(&mut bytes).map_err(Error::Entropy)?;
    log::debug!("generated {}-byte key for {mode}", bytes.len());
    Key::new(mode, &bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn generated_keys_have_mode_length() {
        for mode in CipherMode::ALL {
            let key = generate_key(mode).unwrap();
            assert_eq!(key.as_bytes().len(), mode.key_len());
            assert_eq!(key.size(), mode.key_size);
        }
    }

    #[test]
    fn os_keys_differ() {
        let a = generate_key(CipherMode::AES_256_CBC).unwrap();
        let b = generate_key(CipherMode::AES_256_CBC).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn seeded_generation_is_reproducible() {
        let a = generate_key_with(CipherMode::AES_192_ECB, &mut ChaCha20Rng::from_seed([1; 32]))
            .unwrap();
        let b = generate_key_with(CipherMode::AES_192_ECB, &mut ChaCha20Rng::from_seed([1; 32]))
            .unwrap();
        assert_eq!(a, b);
    }

    struct DeadSource;

    impl RngCore for DeadSource {
        fn next_u32(&mut self) -> u32 {
            0
        }
        fn next_u64(&mut self) -> u64 {
            0
        }
        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(0);
        }
        fn try_fill_bytes(&mut self, _dest: &mut [u8]) -> core::result::Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::other("entropy source closed")))
        }
    }

    impl CryptoRng for DeadSource {}

    #[test]
    fn entropy_failure_is_reported() {
        let err = generate_key_with(CipherMode::AES_128_ECB, &mut DeadSource).unwrap_err();
        assert!(matches!(err, Error::Entropy(_)));
        assert!(err.to_string().contains("entropy"));
    }
}
