// wallet-core/src/lib.rs

//! Multi-currency HD wallet core
//!
//! Một mnemonic → một seed → một key tree (BIP-32/44) → address và chữ ký
//! cho mọi coin được mô tả bằng [`CurrencyProfile`].
//!
//! - [`crypto`]: BIP-39 mnemonic, BIP-32 derivation, hashes
//! - [`chains`]: address codecs (Base58Check, EVM, Bech32, base64url)
//! - [`signer`]: ECDSA secp256k1 signing + verification
//! - [`registry`]: currency profiles, wallet creation, cache
//! - [`api`]: String/JSON facade cho host

pub mod api;
pub mod chains;
pub mod crypto;
pub mod error;
pub mod registry;
pub mod signer;

pub use chains::{codec_for, AddressCodec, DecodedAddress};
pub use crypto::{DerivationPath, ExtendedKey, KeyDeriver, WalletMnemonic};
pub use error::{WalletError, WalletResult};
pub use registry::{CurrencyProfile, Wallet, WalletCache, WalletRegistry};
pub use signer::{verify_signature, DigestScheme, Signature, SigningEngine, TransactionFields};
