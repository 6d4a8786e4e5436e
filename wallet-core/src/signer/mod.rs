// wallet-core/src/signer/mod.rs

//! Signing Engine
//!
//! ECDSA secp256k1 signing cho mọi family, hash function chọn theo
//! [`DigestScheme`] của profile.
//!
//! # Key Features
//! - **Transactions**: canonical encoding của field map → digest → ký via [`SigningEngine`].
//! - **Messages**: prefix + độ dài + message (Bitcoin-style và EIP-191).
//! - **Verification**: [`verify_signature`] + public key recovery từ [`Signature`].

pub mod engine;
pub mod message;
pub mod signature;
pub mod transaction;

pub use engine::SigningEngine;
pub use message::message_hash;
pub use signature::{verify_signature, Signature};
pub use transaction::TransactionFields;

use crate::crypto::hash;
use serde::{Deserialize, Serialize};

/// Hash function áp dụng trước khi ký
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DigestScheme {
    /// SHA256(SHA256(data)) — Bitcoin family
    DoubleSha256,
    /// KECCAK256(data) — EVM, Tron
    Keccak256,
    /// SHA256(data) — Cosmos SDK
    Sha256,
}

impl DigestScheme {
    pub fn digest(self, data: &[u8]) -> [u8; 32] {
        match self {
            DigestScheme::DoubleSha256 => hash::sha256d(data),
            DigestScheme::Keccak256 => hash::keccak256(data),
            DigestScheme::Sha256 => hash::sha256(data),
        }
    }
}

/// Bitcoin CompactSize varint
pub(crate) fn write_compact_size(buf: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xFC => buf.push(n as u8),
        0xFD..=0xFFFF => {
            buf.push(0xFD);
            buf.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xFFFF_FFFF => {
            buf.push(0xFE);
            buf.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            buf.push(0xFF);
            buf.extend_from_slice(&n.to_le_bytes());
        }
    }
}
