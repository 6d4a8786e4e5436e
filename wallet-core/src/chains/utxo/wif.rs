// wallet-core/src/chains/utxo/wif.rs
//
// Wallet Import Format
// Format: Base58Check(version || private_key || [0x01 nếu compressed])

use super::{base58check_decode, base58check_encode};
use crate::error::{AddressError, CryptoError, WalletError, WalletResult};
use crate::registry::profile::CurrencyProfile;
use k256::SecretKey;
use zeroize::{Zeroize, Zeroizing};

/// Suffix đánh dấu public key dạng compressed
const COMPRESSED_FLAG: u8 = 0x01;

/// WIF encoder/decoder
///
/// # Security
/// Output/input đều chứa private key → luôn bọc trong [`Zeroizing`].
pub struct Wif;

impl Wif {
    /// Encode private key thành WIF string
    pub fn encode(private_key: &[u8; 32], version: u8, compressed: bool) -> Zeroizing<String> {
        let mut payload = Zeroizing::new(Vec::with_capacity(34));
        payload.push(version);
        payload.extend_from_slice(private_key);
        if compressed {
            payload.push(COMPRESSED_FLAG);
        }
        Zeroizing::new(base58check_encode(&payload))
    }

    /// Encode theo `wifVersionByte` của profile (luôn compressed)
    pub fn encode_for(
        profile: &CurrencyProfile,
        private_key: &[u8; 32],
    ) -> WalletResult<Zeroizing<String>> {
        let version = profile
            .wif_version_byte
            .ok_or_else(|| profile.unsupported("missing WIF version byte"))?;
        Ok(Self::encode(private_key, version, true))
    }

    /// Decode WIF → (private key, compressed)
    ///
    /// Fail closed: checksum sai, version sai, độ dài sai, hoặc
    /// scalar không hợp lệ đều trả về lỗi.
    pub fn decode(wif: &str, version: u8) -> WalletResult<(Zeroizing<[u8; 32]>, bool)> {
        let mut payload = base58check_decode(wif)?;

        let result = Self::parse_payload(&payload, version);
        payload.zeroize();
        result
    }

    fn parse_payload(payload: &[u8], version: u8) -> WalletResult<(Zeroizing<[u8; 32]>, bool)> {
        let compressed = match payload.len() {
            33 => false,
            34 if payload[33] == COMPRESSED_FLAG => true,
            34 => {
                return Err(AddressError::InvalidEncoding(
                    "invalid WIF compression flag".to_string(),
                )
                .into())
            }
            len => {
                return Err(AddressError::InvalidLength {
                    expected: 34,
                    actual: len,
                }
                .into())
            }
        };

        if payload[0] != version {
            return Err(AddressError::VersionMismatch {
                expected: hex::encode([version]),
                actual: hex::encode([payload[0]]),
            }
            .into());
        }

        let mut key = Zeroizing::new([0u8; 32]);
        key.copy_from_slice(&payload[1..33]);

        // 0 và >= n không phải private key hợp lệ
        SecretKey::from_slice(key.as_slice()).map_err(|_| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(
                "WIF payload is not a valid secp256k1 scalar".to_string(),
            ))
        })?;

        Ok((key, compressed))
    }
}

// =============================================================================
// TESTS
// =============================================================================
