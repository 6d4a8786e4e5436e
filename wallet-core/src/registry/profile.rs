// wallet-core/src/registry/profile.rs
//
// CurrencyProfile - Data-driven mô tả một coin
//
// Thêm coin mới = thêm một CurrencyProfile, KHÔNG thêm code branch.
// Tất cả structs đều Serialize/Deserialize (camelCase) để load từ config JSON.

use crate::crypto::paths::coin_type;
use crate::error::{AddressError, WalletError, WalletResult};
use crate::signer::DigestScheme;
use serde::{Deserialize, Serialize};

// =============================================================================
// ENUMS
// =============================================================================

/// Address family — chọn AddressCodec
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFamily {
    /// Base58Check (Bitcoin, Litecoin, Dogecoin, Tron, ...)
    Utxo,
    /// `0x` + hex(Keccak-256 tail) (Ethereum, BSC, Polygon, ...)
    Evm,
    /// Định dạng riêng, tham số nằm trong `customEncoding`
    Custom,
}

impl AddressFamily {
    /// Hash dùng cho signing khi profile không chỉ định
    pub fn default_digest(self) -> DigestScheme {
        match self {
            AddressFamily::Utxo => DigestScheme::DoubleSha256,
            AddressFamily::Evm => DigestScheme::Keccak256,
            AddressFamily::Custom => DigestScheme::Sha256,
        }
    }
}

/// Public key → address payload hash
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HashPipeline {
    /// RIPEMD160(SHA256(compressed pubkey)) — 20 bytes
    Hash160,
    /// KECCAK256(uncompressed pubkey[1..])[12..] — 20 bytes
    Keccak160,
    /// SHA256(compressed pubkey) — 32 bytes
    Sha256,
    /// KECCAK256(uncompressed pubkey[1..]) — 32 bytes
    Keccak256,
}

impl HashPipeline {
    /// Độ dài output (bytes)
    pub const fn output_len(self) -> usize {
        match self {
            HashPipeline::Hash160 | HashPipeline::Keccak160 => 20,
            HashPipeline::Sha256 | HashPipeline::Keccak256 => 32,
        }
    }
}

/// Tham số cho Custom family
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CustomEncoding {
    /// BIP-173 Bech32 với human-readable part (Cosmos SDK style)
    #[serde(rename_all = "camelCase")]
    Bech32 { hrp: String },
    /// base64url(hash[..truncate]) không padding, optional text prefix.
    ///
    /// Không có checksum. Chưa được đối chiếu với network thật nào.
    #[serde(rename_all = "camelCase")]
    Base64UrlHash {
        truncate: usize,
        #[serde(default)]
        prefix: String,
    },
}

// =============================================================================
// CURRENCY PROFILE
// =============================================================================

/// Cấu hình một currency, key duy nhất là `coin_id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyProfile {
    /// Unique identifier (e.g., "btc", "eth")
    pub coin_id: String,
    /// Tên hiển thị (e.g., "Bitcoin")
    pub name: String,
    /// SLIP-44 coin type dùng trong path m/44'/coin_type'/...
    pub bip44_coin_type: u32,
    pub family: AddressFamily,
    /// Version byte(s) đứng trước payload (UTXO family)
    #[serde(default)]
    pub address_version_bytes: Vec<u8>,
    /// WIF version byte (optional)
    #[serde(default)]
    pub wif_version_byte: Option<u8>,
    pub hash_pipeline: HashPipeline,
    #[serde(default)]
    pub custom_encoding: Option<CustomEncoding>,
    pub digest_scheme: DigestScheme,
    /// Prefix cho message signing, dùng nguyên văn. Họ Bitcoin: byte đầu là độ dài
    /// phần text ("\x18Bitcoin Signed Message:\n"). EVM/Tron: byte đầu là version
    /// byte 0x19 của EIP-191 / TIP-191, không phải độ dài.
    #[serde(default)]
    pub message_prefix: Option<String>,
}

impl CurrencyProfile {
    /// Profile UTXO / Base58Check chuẩn (HASH160, double-SHA256 signing)
    pub fn utxo(
        coin_id: &str,
        name: &str,
        bip44_coin_type: u32,
        address_version_bytes: &[u8],
        wif_version_byte: u8,
        message_prefix: &str,
    ) -> Self {
        Self {
            coin_id: coin_id.to_string(),
            name: name.to_string(),
            bip44_coin_type,
            family: AddressFamily::Utxo,
            address_version_bytes: address_version_bytes.to_vec(),
            wif_version_byte: Some(wif_version_byte),
            hash_pipeline: HashPipeline::Hash160,
            custom_encoding: None,
            digest_scheme: DigestScheme::DoubleSha256,
            message_prefix: Some(message_prefix.to_string()),
        }
    }

    /// Profile EVM (Keccak tail, EIP-191 message prefix)
    pub fn evm(coin_id: &str, name: &str, bip44_coin_type: u32) -> Self {
        Self {
            coin_id: coin_id.to_string(),
            name: name.to_string(),
            bip44_coin_type,
            family: AddressFamily::Evm,
            address_version_bytes: Vec::new(),
            wif_version_byte: None,
            hash_pipeline: HashPipeline::Keccak160,
            custom_encoding: None,
            digest_scheme: DigestScheme::Keccak256,
            message_prefix: Some(ETHEREUM_MESSAGE_PREFIX.to_string()),
        }
    }

    /// Profile Bech32 (Cosmos SDK style: HASH160 payload)
    pub fn bech32(coin_id: &str, name: &str, bip44_coin_type: u32, hrp: &str) -> Self {
        Self {
            coin_id: coin_id.to_string(),
            name: name.to_string(),
            bip44_coin_type,
            family: AddressFamily::Custom,
            address_version_bytes: Vec::new(),
            wif_version_byte: None,
            hash_pipeline: HashPipeline::Hash160,
            custom_encoding: Some(CustomEncoding::Bech32 {
                hrp: hrp.to_string(),
            }),
            digest_scheme: DigestScheme::Sha256,
            message_prefix: None,
        }
    }

    pub(crate) fn unsupported(&self, reason: impl Into<String>) -> WalletError {
        AddressError::UnsupportedProfile {
            coin_id: self.coin_id.clone(),
            reason: reason.into(),
        }
        .into()
    }

    /// Version bytes bắt buộc (UTXO family)
    pub(crate) fn required_version_bytes(&self) -> WalletResult<&[u8]> {
        if self.address_version_bytes.is_empty() {
            return Err(self.unsupported("missing address version bytes"));
        }
        Ok(&self.address_version_bytes)
    }
}

// =============================================================================
// MESSAGE PREFIXES
// =============================================================================

pub const BITCOIN_MESSAGE_PREFIX: &str = "\x18Bitcoin Signed Message:\n";
pub const LITECOIN_MESSAGE_PREFIX: &str = "\x19Litecoin Signed Message:\n";
pub const DOGECOIN_MESSAGE_PREFIX: &str = "\x19Dogecoin Signed Message:\n";
pub const DASH_MESSAGE_PREFIX: &str = "\x19DarkCoin Signed Message:\n";
pub const ZCASH_MESSAGE_PREFIX: &str = "\x16Zcash Signed Message:\n";
pub const ETHEREUM_MESSAGE_PREFIX: &str = "\x19Ethereum Signed Message:\n";
pub const TRON_MESSAGE_PREFIX: &str = "\x19TRON Signed Message:\n";

// =============================================================================
// BUILT-IN TABLE
// =============================================================================

/// Danh sách profile mặc định
pub fn builtin_profiles() -> Vec<CurrencyProfile> {
    vec![
        CurrencyProfile::utxo(
            "btc",
            "Bitcoin",
            coin_type::BITCOIN,
            &[0x00],
            0x80,
            BITCOIN_MESSAGE_PREFIX,
        ),
        CurrencyProfile::utxo(
            "ltc",
            "Litecoin",
            coin_type::LITECOIN,
            &[0x30],
            0xB0,
            LITECOIN_MESSAGE_PREFIX,
        ),
        CurrencyProfile::utxo(
            "doge",
            "Dogecoin",
            coin_type::DOGECOIN,
            &[0x1E],
            0x9E,
            DOGECOIN_MESSAGE_PREFIX,
        ),
        CurrencyProfile::utxo(
            "dash",
            "Dash",
            coin_type::DASH,
            &[0x4C],
            0xCC,
            DASH_MESSAGE_PREFIX,
        ),
        CurrencyProfile::utxo(
            "zec",
            "Zcash (transparent)",
            coin_type::ZCASH,
            &[0x1C, 0xB8],
            0x80,
            ZCASH_MESSAGE_PREFIX,
        ),
        CurrencyProfile::utxo(
            "bch",
            "Bitcoin Cash (legacy)",
            coin_type::BITCOIN_CASH,
            &[0x00],
            0x80,
            BITCOIN_MESSAGE_PREFIX,
        ),
        CurrencyProfile::evm("eth", "Ethereum", coin_type::ETHEREUM),
        CurrencyProfile::evm("etc", "Ethereum Classic", coin_type::ETHEREUM_CLASSIC),
        CurrencyProfile::evm("bsc", "BNB Smart Chain", coin_type::ETHEREUM),
        CurrencyProfile::evm("polygon", "Polygon", coin_type::ETHEREUM),
        CurrencyProfile {
            // Base58Check với Keccak payload, signing kiểu Ethereum
            wif_version_byte: None,
            hash_pipeline: HashPipeline::Keccak160,
            digest_scheme: DigestScheme::Keccak256,
            ..CurrencyProfile::utxo(
                "trx",
                "Tron",
                coin_type::TRON,
                &[0x41],
                0x80,
                TRON_MESSAGE_PREFIX,
            )
        },
        CurrencyProfile::bech32("atom", "Cosmos Hub", coin_type::COSMOS, "cosmos"),
        CurrencyProfile::bech32("osmo", "Osmosis", coin_type::COSMOS, "osmo"),
    ]
}

// =============================================================================
// CONFIG ENTRY
// =============================================================================

/// Raw config entry — mọi field đều optional để báo lỗi rõ ràng
/// (`UnsupportedCurrencyProfile`) thay vì lỗi parse chung chung.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyProfileConfig {
    pub coin_id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub bip44_coin_type: u32,
    #[serde(default)]
    pub family: Option<AddressFamily>,
    #[serde(default)]
    pub address_version_bytes: Vec<u8>,
    #[serde(default)]
    pub wif_version_byte: Option<u8>,
    #[serde(default)]
    pub hash_pipeline: Option<HashPipeline>,
    #[serde(default)]
    pub custom_encoding: Option<CustomEncoding>,
    #[serde(default)]
    pub digest_scheme: Option<DigestScheme>,
    #[serde(default)]
    pub message_prefix: Option<String>,
}

impl TryFrom<CurrencyProfileConfig> for CurrencyProfile {
    type Error = WalletError;

    fn try_from(config: CurrencyProfileConfig) -> WalletResult<Self> {
        let unsupported = |reason: &str| -> WalletError {
            AddressError::UnsupportedProfile {
                coin_id: config.coin_id.clone(),
                reason: reason.to_string(),
            }
            .into()
        };

        let family = config.family.ok_or_else(|| unsupported("missing family"))?;
        let hash_pipeline = config.hash_pipeline.unwrap_or(match family {
            AddressFamily::Evm => HashPipeline::Keccak160,
            AddressFamily::Utxo | AddressFamily::Custom => HashPipeline::Hash160,
        });
        if family == AddressFamily::Utxo && config.address_version_bytes.is_empty() {
            return Err(unsupported("missing address version bytes"));
        }

        Ok(Self {
            name: config.name.clone().unwrap_or_else(|| config.coin_id.clone()),
            bip44_coin_type: config.bip44_coin_type,
            family,
            address_version_bytes: config.address_version_bytes,
            wif_version_byte: config.wif_version_byte,
            hash_pipeline,
            custom_encoding: config.custom_encoding,
            digest_scheme: config.digest_scheme.unwrap_or(family.default_digest()),
            message_prefix: config.message_prefix,
            coin_id: config.coin_id,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_builtin_coin_ids_unique() {
        let profiles = builtin_profiles();
        let ids: HashSet<_> = profiles.iter().map(|p| p.coin_id.as_str()).collect();
        assert_eq!(ids.len(), profiles.len());
    }

    #[test]
    fn test_message_prefix_length_byte() {
        // Họ Bitcoin: byte đầu tiên = độ dài phần text còn lại
        for prefix in [
            BITCOIN_MESSAGE_PREFIX,
            LITECOIN_MESSAGE_PREFIX,
            DOGECOIN_MESSAGE_PREFIX,
            DASH_MESSAGE_PREFIX,
            ZCASH_MESSAGE_PREFIX,
        ] {
            assert_eq!(prefix.as_bytes()[0] as usize, prefix.len() - 1, "{:?}", prefix);
        }
    }

    #[test]
    fn test_message_prefix_version_byte() {
        // EIP-191 / TIP-191: 0x19 là version byte, không phải độ dài
        for prefix in [ETHEREUM_MESSAGE_PREFIX, TRON_MESSAGE_PREFIX] {
            assert_eq!(prefix.as_bytes()[0], 0x19, "{:?}", prefix);
        }
        assert_ne!(TRON_MESSAGE_PREFIX.as_bytes()[0] as usize, TRON_MESSAGE_PREFIX.len() - 1);
    }

    #[test]
    fn test_tron_profile() {
        let tron = builtin_profiles()
            .into_iter()
            .find(|p| p.coin_id == "trx")
            .unwrap();
        assert_eq!(tron.family, AddressFamily::Utxo);
        assert_eq!(tron.hash_pipeline, HashPipeline::Keccak160);
        assert_eq!(tron.digest_scheme, DigestScheme::Keccak256);
        assert_eq!(tron.wif_version_byte, None);
    }

    #[test]
    fn test_serde_camel_case_roundtrip() {
        let btc = builtin_profiles().remove(0);
        let json = serde_json::to_value(&btc).unwrap();
        assert_eq!(json["coinId"], "btc");
        assert_eq!(json["bip44CoinType"], 0);
        assert_eq!(json["family"], "utxo");
        assert_eq!(json["hashPipeline"], "hash160");
        assert_eq!(json["digestScheme"], "doubleSha256");

        let back: CurrencyProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, btc);
    }

    #[test]
    fn test_custom_encoding_tagged() {
        let atom = CurrencyProfile::bech32("atom", "Cosmos Hub", 118, "cosmos");
        let json = serde_json::to_value(&atom).unwrap();
        assert_eq!(json["customEncoding"]["kind"], "bech32");
        assert_eq!(json["customEncoding"]["hrp"], "cosmos");
    }

    #[test]
    fn test_config_missing_family_is_unsupported() {
        let config: CurrencyProfileConfig =
            serde_json::from_str(r#"{"coinId": "xyz", "bip44CoinType": 9999}"#).unwrap();
        assert!(matches!(
            CurrencyProfile::try_from(config),
            Err(WalletError::Address(AddressError::UnsupportedProfile { .. }))
        ));
    }

    #[test]
    fn test_config_missing_version_bytes_is_unsupported() {
        let config: CurrencyProfileConfig = serde_json::from_str(
            r#"{"coinId": "xyz", "bip44CoinType": 9999, "family": "utxo"}"#,
        )
        .unwrap();
        let err = CurrencyProfile::try_from(config).unwrap_err();
        assert!(err.to_string().contains("version bytes"));
    }

    #[test]
    fn test_config_defaults() {
        let config: CurrencyProfileConfig = serde_json::from_str(
            r#"{"coinId": "rvn", "name": "Ravencoin", "bip44CoinType": 175,
                "family": "utxo", "addressVersionBytes": [60], "wifVersionByte": 128}"#,
        )
        .unwrap();
        let profile = CurrencyProfile::try_from(config).unwrap();
        assert_eq!(profile.hash_pipeline, HashPipeline::Hash160);
        assert_eq!(profile.digest_scheme, DigestScheme::DoubleSha256);
        assert_eq!(profile.address_version_bytes, vec![60]);
    }
}
