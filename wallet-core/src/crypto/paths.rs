// wallet-core/src/crypto/paths.rs
//
// Derivation Paths Module - BIP-32 path parsing + BIP-44 path builder
// Format: m/44'/coin_type'/account'/change/index

use crate::error::{DerivationError, WalletError, WalletResult};
use std::fmt;
use std::str::FromStr;

/// Offset cho hardened index (2^31)
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

// =============================================================================
// SLIP-44 COIN TYPES
// =============================================================================
/// SLIP-44 Registered Coin Types
/// Ref: https://github.com/satoshilabs/slips/blob/master/slip-0044.md
pub mod coin_type {
    pub const BITCOIN: u32 = 0;
    pub const LITECOIN: u32 = 2;
    pub const DOGECOIN: u32 = 3;
    pub const DASH: u32 = 5;
    pub const ETHEREUM: u32 = 60; // EVM chains dùng chung coin_type 60
    pub const ETHEREUM_CLASSIC: u32 = 61;
    pub const COSMOS: u32 = 118;
    pub const ZCASH: u32 = 133;
    pub const BITCOIN_CASH: u32 = 145;
    pub const TRON: u32 = 195;
}

// =============================================================================
// PATH SEGMENT
// =============================================================================

/// One `(index, hardened)` segment of a BIP-32 path. `index` is always < 2^31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChildIndex {
    index: u32,
    hardened: bool,
}

impl ChildIndex {
    pub fn new(index: u32, hardened: bool) -> WalletResult<Self> {
        if index >= HARDENED_OFFSET {
            return Err(DerivationError::InvalidPath {
                path: index.to_string(),
                reason: format!("index {} exceeds 2^31 - 1", index),
            }
            .into());
        }
        Ok(Self { index, hardened })
    }

    #[inline]
    pub fn normal(index: u32) -> WalletResult<Self> {
        Self::new(index, false)
    }

    #[inline]
    pub fn hardened(index: u32) -> WalletResult<Self> {
        Self::new(index, true)
    }

    /// Index không kèm hardened bit
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    #[inline]
    pub fn is_hardened(&self) -> bool {
        self.hardened
    }

    /// ser32 value used in the HMAC input (hardened bit included)
    #[inline]
    pub fn raw(&self) -> u32 {
        if self.hardened {
            self.index | HARDENED_OFFSET
        } else {
            self.index
        }
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

// =============================================================================
// DERIVATION PATH
// =============================================================================

/// Parsed BIP-32 derivation path, e.g. `m/44'/60'/0'/0/0`
///
/// Accepted markers for hardened segments: `'` and `h`.
/// `"m"` alone is the master key (no segments).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DerivationPath {
    segments: Vec<ChildIndex>,
}

impl DerivationPath {
    pub fn new(segments: Vec<ChildIndex>) -> Self {
        Self { segments }
    }

    /// `m/44'/coin_type'/account'/change/index`
    pub fn bip44(coin_type: u32, account: u32, change: u32, index: u32) -> WalletResult<Self> {
        Ok(Self::new(vec![
            ChildIndex::hardened(44)?,
            ChildIndex::hardened(coin_type)?,
            ChildIndex::hardened(account)?,
            ChildIndex::normal(change)?,
            ChildIndex::normal(index)?,
        ]))
    }

    /// Path wallet mặc định của một coin: `m/44'/coin_type'/account'/0/0`
    #[inline]
    pub fn wallet(coin_type: u32, account: u32) -> WalletResult<Self> {
        Self::bip44(coin_type, account, 0, 0)
    }

    #[inline]
    pub fn segments(&self) -> &[ChildIndex] {
        &self.segments
    }

    #[inline]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    /// Path con: thêm một segment vào cuối
    pub fn child(&self, segment: ChildIndex) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    fn invalid(path: &str, reason: impl Into<String>) -> WalletError {
        DerivationError::InvalidPath {
            path: path.to_string(),
            reason: reason.into(),
        }
        .into()
    }
}

impl FromStr for DerivationPath {
    type Err = WalletError;

    fn from_str(path: &str) -> WalletResult<Self> {
        let trimmed = path.trim();

        let rest = match trimmed.strip_prefix('m') {
            Some(rest) => rest,
            None => return Err(Self::invalid(path, "path must start with 'm/'")),
        };
        if rest.is_empty() {
            return Ok(Self::default());
        }
        let rest = rest
            .strip_prefix('/')
            .ok_or_else(|| Self::invalid(path, "path must start with 'm/'"))?;

        let mut segments = Vec::new();
        for segment in rest.split('/') {
            if segment.is_empty() {
                return Err(Self::invalid(path, "empty segment"));
            }

            let (digits, hardened) = match segment.strip_suffix(['\'', 'h', 'H']) {
                Some(digits) => (digits, true),
                None => (segment, false),
            };

            // Chỉ chấp nhận chữ số ASCII (u32::from_str cho phép dấu '+')
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Self::invalid(
                    path,
                    format!("non-numeric segment '{}'", segment),
                ));
            }

            let index: u32 = digits
                .parse()
                .map_err(|_| Self::invalid(path, format!("index '{}' out of range", digits)))?;

            if index >= HARDENED_OFFSET {
                return Err(Self::invalid(
                    path,
                    format!("index {} must be below 2^31 (use the ' marker)", index),
                ));
            }

            segments.push(ChildIndex { index, hardened });
        }

        Ok(Self { segments })
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("m")?;
        for segment in &self.segments {
            write!(f, "/{}", segment)?;
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> WalletResult<DerivationPath> {
        s.parse()
    }

    #[test]
    fn test_parse_bip44() {
        let p = path("m/44'/60'/0'/0/5").unwrap();
        assert_eq!(p.depth(), 5);
        assert!(p.segments()[0].is_hardened());
        assert_eq!(p.segments()[1].raw(), 60 | HARDENED_OFFSET);
        assert!(!p.segments()[3].is_hardened());
        assert_eq!(p.segments()[4].raw(), 5);
        assert_eq!(p, DerivationPath::bip44(60, 0, 0, 5).unwrap());
    }

    #[test]
    fn test_parse_h_marker() {
        assert_eq!(path("m/44h/0h/0h/0/0").unwrap(), path("m/44'/0'/0'/0/0").unwrap());
    }

    #[test]
    fn test_master_only() {
        assert_eq!(path("m").unwrap().depth(), 0);
        assert_eq!(path("m").unwrap().to_string(), "m");
    }

    #[test]
    fn test_display_roundtrip() {
        let s = "m/44'/195'/3'/1/42";
        assert_eq!(path(s).unwrap().to_string(), s);
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in [
            "",
            "44'/0'/0'",
            "/44'/0'",
            "m/",
            "m//0",
            "m/44'/abc/0",
            "m/44'/+1/0",
            "m/-1",
            "m/'",
            "n/44'",
            "m44'",
            "m/44'/0'/0'/0/0/",
        ] {
            assert!(
                matches!(
                    path(bad),
                    Err(WalletError::Derivation(DerivationError::InvalidPath { .. }))
                ),
                "{:?} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_rejects_index_overflow() {
        // 2^31 without marker
        assert!(path("m/2147483648").is_err());
        // 2^31 with marker would overflow the hardened bit
        assert!(path("m/2147483648'").is_err());
        // beyond u32
        assert!(path("m/99999999999").is_err());
        // 2^31 - 1 is the largest valid index
        assert!(path("m/2147483647'/2147483647").is_ok());
    }

    #[test]
    fn test_child_index_bounds() {
        assert!(ChildIndex::normal(HARDENED_OFFSET).is_err());
        assert_eq!(ChildIndex::hardened(0).unwrap().to_string(), "0'");
    }

    #[test]
    fn test_wallet_path() {
        assert_eq!(DerivationPath::wallet(0, 0).unwrap().to_string(), "m/44'/0'/0'/0/0");
        assert_eq!(DerivationPath::wallet(118, 2).unwrap().to_string(), "m/44'/118'/2'/0/0");
        assert!(DerivationPath::wallet(60, HARDENED_OFFSET).is_err());
    }
}
