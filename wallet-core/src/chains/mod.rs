// wallet-core/src/chains/mod.rs
//
// Address Codecs - Public key → address string, và ngược lại
//
// Mỗi AddressFamily có đúng một codec. Tham số cụ thể của coin
// (version bytes, hrp, hash pipeline) luôn được đọc từ CurrencyProfile.

pub mod custom;
pub mod evm;
pub mod utxo;

pub use custom::{Base64UrlCodec, Bech32Codec};
pub use evm::{EvmAddress, EvmKeccakCodec};
pub use utxo::{UtxoBase58Codec, Wif};

use crate::crypto::hash;
use crate::error::{CryptoError, WalletError, WalletResult};
use crate::registry::profile::{AddressFamily, CurrencyProfile, CustomEncoding, HashPipeline};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;

// =============================================================================
// TRAIT
// =============================================================================

/// Kết quả decode một address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedAddress {
    /// Version bytes / hrp bytes (rỗng với EVM)
    pub version: Vec<u8>,
    /// Hash payload (20 hoặc 32 bytes, hoặc truncated)
    pub payload: Vec<u8>,
}

/// Encode/decode address cho một family
pub trait AddressCodec: Send + Sync {
    /// Public key (SEC1, 33 hoặc 65 bytes) → address string
    fn encode(&self, public_key: &[u8], profile: &CurrencyProfile) -> WalletResult<String>;

    /// Address string → version + payload, kiểm tra checksum
    fn decode(&self, address: &str, profile: &CurrencyProfile) -> WalletResult<DecodedAddress>;

    /// Fail closed: mọi lỗi decode đều là `false`
    fn verify(&self, address: &str, profile: &CurrencyProfile) -> bool {
        self.decode(address, profile).is_ok()
    }
}

static UTXO_CODEC: UtxoBase58Codec = UtxoBase58Codec;
static EVM_CODEC: EvmKeccakCodec = EvmKeccakCodec;
static BECH32_CODEC: Bech32Codec = Bech32Codec;
static BASE64URL_CODEC: Base64UrlCodec = Base64UrlCodec;

/// Chọn codec theo family của profile
///
/// Trả về `UnsupportedProfile` nếu profile thiếu tham số bắt buộc cho family đó.
pub fn codec_for(profile: &CurrencyProfile) -> WalletResult<&'static dyn AddressCodec> {
    match (profile.family, &profile.custom_encoding) {
        (AddressFamily::Utxo, _) => {
            profile.required_version_bytes()?;
            Ok(&UTXO_CODEC)
        }
        (AddressFamily::Evm, _) => {
            if profile.hash_pipeline != HashPipeline::Keccak160 {
                return Err(profile.unsupported("EVM family requires the keccak160 pipeline"));
            }
            Ok(&EVM_CODEC)
        }
        (AddressFamily::Custom, Some(CustomEncoding::Bech32 { hrp })) => {
            if hrp.is_empty() {
                return Err(profile.unsupported("empty bech32 hrp"));
            }
            Ok(&BECH32_CODEC)
        }
        (AddressFamily::Custom, Some(CustomEncoding::Base64UrlHash { truncate, .. })) => {
            if *truncate == 0 || *truncate > profile.hash_pipeline.output_len() {
                return Err(profile.unsupported(format!(
                    "truncate must be in 1..={}",
                    profile.hash_pipeline.output_len()
                )));
            }
            Ok(&BASE64URL_CODEC)
        }
        (AddressFamily::Custom, None) => {
            Err(profile.unsupported("custom family requires customEncoding"))
        }
    }
}

// =============================================================================
// PUBLIC KEY HELPERS
// =============================================================================

/// Validate SEC1 public key và trả về (compressed, uncompressed)
pub(crate) fn normalize_public_key(public_key: &[u8]) -> WalletResult<([u8; 33], [u8; 65])> {
    if public_key.len() != 33 && public_key.len() != 65 {
        return Err(WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
            "public key must be 33 or 65 bytes, got {}",
            public_key.len()
        ))));
    }
    let key = PublicKey::from_sec1_bytes(public_key).map_err(|e| {
        WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
            "Invalid secp256k1 public key: {}",
            e
        )))
    })?;

    let mut compressed = [0u8; 33];
    compressed.copy_from_slice(key.to_encoded_point(true).as_bytes());
    let mut uncompressed = [0u8; 65];
    uncompressed.copy_from_slice(key.to_encoded_point(false).as_bytes());
    Ok((compressed, uncompressed))
}

/// Áp dụng hash pipeline lên public key
pub fn public_key_hash(public_key: &[u8], pipeline: HashPipeline) -> WalletResult<Vec<u8>> {
    let (compressed, uncompressed) = normalize_public_key(public_key)?;
    let digest = match pipeline {
        HashPipeline::Hash160 => hash::hash160(&compressed).to_vec(),
        HashPipeline::Keccak160 => hash::keccak256(&uncompressed[1..])[12..].to_vec(),
        HashPipeline::Sha256 => hash::sha256(&compressed).to_vec(),
        HashPipeline::Keccak256 => hash::keccak256(&uncompressed[1..]).to_vec(),
    };
    Ok(digest)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AddressError;
    use crate::registry::profile::builtin_profiles;

    // m/44'/0'/0'/0/0 của mnemonic "deer begin ..."
    const PUBKEY: &str = "02dadace760c35a9dff8317cbb6ec884d0d4c9c98632dad5dde941b217d7090a67";

    fn is_unsupported(result: WalletResult<&'static dyn AddressCodec>) -> bool {
        matches!(
            result,
            Err(WalletError::Address(AddressError::UnsupportedProfile { .. }))
        )
    }

    #[test]
    fn test_every_builtin_has_codec() {
        for profile in builtin_profiles() {
            assert!(codec_for(&profile).is_ok(), "{}", profile.coin_id);
        }
    }

    #[test]
    fn test_codec_for_rejects_incomplete_profiles() {
        let mut btc = builtin_profiles().remove(0);
        btc.address_version_bytes.clear();
        assert!(is_unsupported(codec_for(&btc)));

        let mut custom = CurrencyProfile::bech32("x", "X", 1, "x");
        custom.custom_encoding = None;
        assert!(is_unsupported(codec_for(&custom)));

        custom.custom_encoding = Some(CustomEncoding::Base64UrlHash {
            truncate: 33,
            prefix: String::new(),
        });
        assert!(is_unsupported(codec_for(&custom)));

        let mut evm = CurrencyProfile::evm("e", "E", 60);
        evm.hash_pipeline = HashPipeline::Hash160;
        assert!(is_unsupported(codec_for(&evm)));
    }

    #[test]
    fn test_compressed_and_uncompressed_hash_equal() {
        let compressed = hex::decode(PUBKEY).unwrap();
        let (_, uncompressed) = normalize_public_key(&compressed).unwrap();
        for pipeline in [
            HashPipeline::Hash160,
            HashPipeline::Keccak160,
            HashPipeline::Sha256,
            HashPipeline::Keccak256,
        ] {
            let a = public_key_hash(&compressed, pipeline).unwrap();
            let b = public_key_hash(&uncompressed, pipeline).unwrap();
            assert_eq!(a, b);
            assert_eq!(a.len(), pipeline.output_len());
        }
    }

    #[test]
    fn test_keccak160_matches_evm_address() {
        let compressed = hex::decode(PUBKEY).unwrap();
        let tail = public_key_hash(&compressed, HashPipeline::Keccak160).unwrap();
        assert_eq!(hex::encode(tail), "ec38d4af55939de1c0bd399c0318498f639cdef8");
    }

    #[test]
    fn test_rejects_bad_public_keys() {
        assert!(normalize_public_key(&[0x02; 32]).is_err());
        assert!(normalize_public_key(&[0x05; 33]).is_err());
        // x = 0 không nằm trên curve
        let mut not_on_curve = [0u8; 33];
        not_on_curve[0] = 0x02;
        assert!(normalize_public_key(&not_on_curve).is_err());
    }
}
