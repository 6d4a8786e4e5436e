// wallet-core/src/crypto/mod.rs

//! Core Cryptography Module
//!
//! - **Mnemonic / Seed**: BIP-39 phrases (12/24 words) and PBKDF2 seed stretching via [`WalletMnemonic`].
//! - **Key Tree**: BIP-32 secp256k1 derivation via [`KeyDeriver`] / [`ExtendedKey`].
//! - **Derivation Paths**: BIP-44 path parsing and builders via [`DerivationPath`].
//! - **Hashes**: SHA-256d, HASH160, Keccak-256 shared by codecs and signer.

pub mod hash;
pub mod key_deriver;
pub mod mnemonic;
pub mod paths;

// Re-exports for cleaner API access
pub use key_deriver::{ExtendedKey, KeyDeriver};
pub use mnemonic::{WalletMnemonic, WordCount};
pub use paths::{ChildIndex, DerivationPath, HARDENED_OFFSET};
