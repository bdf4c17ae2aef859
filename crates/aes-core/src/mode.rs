//! Cipher modes: key size crossed with block chaining.

use core::fmt;
use core::str::FromStr;

use crate::error::Error;

/// AES key size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeySize {
    /// 128-bit key, 10 rounds.
    Aes128,
    /// 192-bit key, 12 rounds.
    Aes192,
    /// 256-bit key, 14 rounds.
    Aes256,
}

impl KeySize {
    /// Key length in bytes.
    pub const fn key_len(self) -> usize {
        self.words() * 4
    }

    /// Key length in 32-bit words (`Nk`).
    pub const fn words(self) -> usize {
        match self {
            KeySize::Aes128 => 4,
            KeySize::Aes192 => 6,
            KeySize::Aes256 => 8,
        }
    }

    /// Number of rounds (`Nr = Nk + 6`).
    pub const fn rounds(self) -> usize {
        self.words() + 6
    }

    /// Key length in bits.
    pub const fn bits(self) -> usize {
        self.key_len() * 8
    }
}

/// Block chaining mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Chaining {
    /// Electronic codebook: blocks are independent.
    Ecb,
    /// Cipher block chaining with an all-zero initial vector.
    Cbc,
}

/// Full cipher mode. Fixed for the lifetime of an engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CipherMode {
    /// Key size (and therefore round count).
    pub key_size: KeySize,
    /// Whether chaining state is carried between blocks.
    pub chaining: Chaining,
}

impl CipherMode {
    /// AES-128 in ECB mode.
    pub const AES_128_ECB: Self = Self::new(KeySize::Aes128, Chaining::Ecb);
    /// AES-192 in ECB mode.
    pub const AES_192_ECB: Self = Self::new(KeySize::Aes192, Chaining::Ecb);
    /// AES-256 in ECB mode.
    pub const AES_256_ECB: Self = Self::new(KeySize::Aes256, Chaining::Ecb);
    /// AES-128 in CBC mode.
    pub const AES_128_CBC: Self = Self::new(KeySize::Aes128, Chaining::Cbc);
    /// AES-192 in CBC mode.
    pub const AES_192_CBC: Self = Self::new(KeySize::Aes192, Chaining::Cbc);
    /// AES-256 in CBC mode.
    pub const AES_256_CBC: Self = Self::new(KeySize::Aes256, Chaining::Cbc);

    /// Every supported mode, ECB variants first.
    pub const ALL: [Self; 6] = [
        Self::AES_128_ECB,
        Self::AES_192_ECB,
        Self::AES_256_ECB,
        Self::AES_128_CBC,
        Self::AES_192_CBC,
        Self::AES_256_CBC,
    ];

    /// Builds a mode from its components.
    pub const fn new(key_size: KeySize, chaining: Chaining) -> Self {
        Self { key_size, chaining }
    }

    /// Required key length in bytes.
    pub const fn key_len(&self) -> usize {
        self.key_size.key_len()
    }

    /// Number of cipher rounds.
    pub const fn rounds(&self) -> usize {
        self.key_size.rounds()
    }

    /// True when blocks are chained.
    pub const fn is_cbc(&self) -> bool {
        matches!(self.chaining, Chaining::Cbc)
    }

    /// True when blocks are independent.
    pub const fn is_ecb(&self) -> bool {
        matches!(self.chaining, Chaining::Ecb)
    }
}

impl fmt::Display for CipherMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chaining = match self.chaining {
            Chaining::Ecb => "ecb",
            Chaining::Cbc => "cbc",
        };
        write!(f, "aes-{}-{}", self.key_size.bits(), chaining)
    }
}

impl FromStr for CipherMode {
    type Err = Error;

    /// Accepts names such as `aes-256-cbc`, `AES_128_ECB` or `aes128cbc`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let unknown = || Error::UnknownMode(s.into());

        let rest = normalized.strip_prefix("aes").ok_or_else(unknown)?;
        if rest.len() != 6 || !rest.is_ascii() {
            return Err(unknown());
        }
        let (bits, chaining) = rest.split_at(3);
        let key_size = match bits {
            "128" => KeySize::Aes128,
            "192" => KeySize::Aes192,
            "256" => KeySize::Aes256,
            _ => return Err(unknown()),
        };
        let chaining = match chaining {
            "ecb" => Chaining::Ecb,
            "cbc" => Chaining::Cbc,
            _ => return Err(unknown()),
        };
        Ok(Self::new(key_size, chaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_and_rounds() {
        assert_eq!(CipherMode::AES_128_ECB.key_len(), 16);
        assert_eq!(CipherMode::AES_192_CBC.key_len(), 24);
        assert_eq!(CipherMode::AES_256_ECB.key_len(), 32);
        assert_eq!(KeySize::Aes128.rounds(), 10);
        assert_eq!(KeySize::Aes192.rounds(), 12);
        assert_eq!(KeySize::Aes256.rounds(), 14);
    }

    #[test]
    fn chaining_flags() {
        assert!(CipherMode::AES_128_CBC.is_cbc());
        assert!(!CipherMode::AES_128_CBC.is_ecb());
        assert!(CipherMode::AES_256_ECB.is_ecb());
    }

    #[test]
    fn display_parses_back() {
        for mode in CipherMode::ALL {
            let name = mode.to_string();
            assert_eq!(name.parse::<CipherMode>().unwrap(), mode);
        }
        assert_eq!(CipherMode::AES_192_CBC.to_string(), "aes-192-cbc");
    }

    #[test]
    fn parse_is_lenient_about_case_and_separators() {
        assert_eq!(
            "AES_256_CBC".parse::<CipherMode>().unwrap(),
            CipherMode::AES_256_CBC
        );
        assert_eq!(
            "aes128ecb".parse::<CipherMode>().unwrap(),
            CipherMode::AES_128_ECB
        );
    }

    #[test]
    fn parse_rejects_unknown_names() {
        for bad in ["", "aes", "aes-512-cbc", "aes-128-ctr", "des-128-ecb", "aes-128-cbcx"] {
            let err = bad.parse::<CipherMode>().unwrap_err();
            assert!(matches!(err, Error::UnknownMode(_)), "{bad}");
        }
    }
}
