// wallet-core/src/chains/utxo/mod.rs
//
// UTXO Address Module - Base58Check P2PKH-style addresses
// Format: Base58(version || hash(pubkey) || SHA256d(version || hash)[..4])
//
// Dùng cho: Bitcoin, Litecoin, Dogecoin, Dash, Zcash (t-addr), Tron

pub mod wif;

pub use wif::Wif;

use super::{public_key_hash, AddressCodec, DecodedAddress};
use crate::crypto::hash::checksum4;
use crate::error::{AddressError, WalletResult};
use crate::registry::profile::CurrencyProfile;

/// Base58Check encode: thêm 4 bytes checksum rồi Base58
pub fn base58check_encode(payload: &[u8]) -> String {
    let mut data = Vec::with_capacity(payload.len() + 4);
    data.extend_from_slice(payload);
    data.extend_from_slice(&checksum4(payload));
    bs58::encode(data).into_string()
}

/// Base58Check decode: trả về payload (không gồm checksum)
pub fn base58check_decode(encoded: &str) -> WalletResult<Vec<u8>> {
    let data = bs58::decode(encoded)
        .into_vec()
        .map_err(|e| AddressError::InvalidEncoding(e.to_string()))?;
    if data.len() < 5 {
        return Err(AddressError::InvalidLength {
            expected: 5,
            actual: data.len(),
        }
        .into());
    }

    let (payload, checksum) = data.split_at(data.len() - 4);
    if checksum4(payload) != checksum {
        return Err(AddressError::ChecksumMismatch.into());
    }
    Ok(payload.to_vec())
}

/// Base58Check codec, version bytes + hash pipeline lấy từ profile
#[derive(Debug, Clone, Copy, Default)]
pub struct UtxoBase58Codec;

impl AddressCodec for UtxoBase58Codec {
    fn encode(&self, public_key: &[u8], profile: &CurrencyProfile) -> WalletResult<String> {
        let version = profile.required_version_bytes()?;
        let digest = public_key_hash(public_key, profile.hash_pipeline)?;

        let mut payload = Vec::with_capacity(version.len() + digest.len());
        payload.extend_from_slice(version);
        payload.extend_from_slice(&digest);
        Ok(base58check_encode(&payload))
    }

    fn decode(&self, address: &str, profile: &CurrencyProfile) -> WalletResult<DecodedAddress> {
        let version = profile.required_version_bytes()?;
        let payload = base58check_decode(address)?;

        let expected = version.len() + profile.hash_pipeline.output_len();
        if payload.len() != expected {
            return Err(AddressError::InvalidLength {
                expected,
                actual: payload.len(),
            }
            .into());
        }

        let (actual_version, hash) = payload.split_at(version.len());
        if actual_version != version {
            return Err(AddressError::VersionMismatch {
                expected: hex::encode(version),
                actual: hex::encode(actual_version),
            }
            .into());
        }

        Ok(DecodedAddress {
            version: actual_version.to_vec(),
            payload: hash.to_vec(),
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
