// wallet-core/src/error.rs
//
// Error taxonomy cho toàn bộ core. Mọi lỗi đều local và deterministic,
// không có lỗi nào cần retry/backoff kiểu network (trừ InvalidChildKey).

use thiserror::Error;

pub type WalletResult<T> = std::result::Result<T, WalletError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WalletError {
    #[error("Mnemonic Error: {0}")]
    Mnemonic(#[from] MnemonicError),

    #[error("Derivation Error: {0}")]
    Derivation(#[from] DerivationError),

    #[error("Address Error: {0}")]
    Address(#[from] AddressError),

    #[error("Cryptography Error: {0}")]
    Crypto(#[from] CryptoError),

    #[error("Registry Error: {0}")]
    Registry(#[from] RegistryError),
}

impl WalletError {
    /// `true` only for [`DerivationError::InvalidChildKey`]: per BIP-32 the caller
    /// may retry with the next child index.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WalletError::Derivation(DerivationError::InvalidChildKey { .. })
        )
    }

    /// Mã lỗi ổn định cho API boundary (JSON)
    pub fn code(&self) -> &'static str {
        match self {
            WalletError::Mnemonic(_) => "InvalidMnemonic",
            WalletError::Derivation(DerivationError::InvalidChildKey { .. }) => "InvalidChildKey",
            WalletError::Derivation(DerivationError::InvalidPath { .. }) => "InvalidDerivationPath",
            WalletError::Derivation(_) => "InvalidSeed",
            WalletError::Address(AddressError::UnsupportedProfile { .. }) => {
                "UnsupportedCurrencyProfile"
            }
            WalletError::Address(AddressError::ChecksumMismatch) => "ChecksumMismatch",
            WalletError::Address(_) => "InvalidAddress",
            WalletError::Crypto(CryptoError::InvalidSignature(_)) => "InvalidSignature",
            WalletError::Crypto(_) => "SigningError",
            WalletError::Registry(RegistryError::UnsupportedCoin(_)) => "UnsupportedCoin",
            WalletError::Registry(_) => "InvalidConfig",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MnemonicError {
    #[error("Invalid word count: {0}. Expected 12 or 24 words.")]
    InvalidWordCount(usize),

    #[error("Word '{0}' not found in the BIP39 wordlist.")]
    UnknownWord(String),

    #[error("Checksum validation failed.")]
    ChecksumFailed,

    #[error("Unsupported entropy size: {0} bits. Expected 128 or 256.")]
    InvalidEntropyBits(usize),

    #[error("BIP39 internal error: {0}")]
    Bip39Error(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DerivationError {
    #[error("Invalid derivation path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Derived child key at index {index:#010x} is invalid; retry with index + 1")]
    InvalidChildKey { index: u32 },

    #[error("Invalid seed length: expected 16..=64 bytes, got {0}")]
    InvalidSeedLength(usize),

    #[error("Invalid master key derived from seed")]
    InvalidMasterKey,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressError {
    #[error("Unsupported currency profile '{coin_id}': {reason}")]
    UnsupportedProfile { coin_id: String, reason: String },

    #[error("Checksum mismatch")]
    ChecksumMismatch,

    #[error("Invalid address encoding: {0}")]
    InvalidEncoding(String),

    #[error("Version bytes mismatch: expected {expected}, got {actual}")]
    VersionMismatch { expected: String, actual: String },

    #[error("Invalid payload length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unsupported coin: '{0}'")]
    UnsupportedCoin(String),

    #[error("Coin '{0}' is already registered")]
    DuplicateCoin(String),

    #[error("Invalid registry configuration: {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_invalid_child_key_is_retryable() {
        let retry: WalletError = DerivationError::InvalidChildKey { index: 7 }.into();
        assert!(retry.is_retryable());

        let path: WalletError = DerivationError::InvalidPath {
            path: "x".into(),
            reason: "bad".into(),
        }
        .into();
        assert!(!path.is_retryable());
        assert!(!WalletError::from(AddressError::ChecksumMismatch).is_retryable());
    }

    #[test]
    fn test_display_is_nested() {
        let err: WalletError = RegistryError::UnsupportedCoin("foo".into()).into();
        assert_eq!(err.to_string(), "Registry Error: Unsupported coin: 'foo'");
    }

    #[test]
    fn test_codes() {
        assert_eq!(
            WalletError::from(MnemonicError::ChecksumFailed).code(),
            "InvalidMnemonic"
        );
        assert_eq!(
            WalletError::from(DerivationError::InvalidChildKey { index: 1 }).code(),
            "InvalidChildKey"
        );
        assert_eq!(
            WalletError::from(AddressError::UnsupportedProfile {
                coin_id: "x".into(),
                reason: "y".into()
            })
            .code(),
            "UnsupportedCurrencyProfile"
        );
        assert_eq!(
            WalletError::from(CryptoError::InvalidKeyFormat("k".into())).code(),
            "SigningError"
        );
        assert_eq!(
            WalletError::from(RegistryError::UnsupportedCoin("x".into())).code(),
            "UnsupportedCoin"
        );
    }
}
