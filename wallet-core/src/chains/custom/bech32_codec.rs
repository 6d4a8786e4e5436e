// wallet-core/src/chains/custom/bech32_codec.rs
//
// BIP-173 Bech32: hrp || "1" || base32(payload) || 6-char BCH checksum
// Dùng cho Cosmos SDK chains (payload = HASH160 của compressed pubkey)

use crate::chains::{public_key_hash, AddressCodec, DecodedAddress};
use crate::error::{AddressError, WalletError, WalletResult};
use crate::registry::profile::{CurrencyProfile, CustomEncoding};
use bech32::{FromBase32, ToBase32, Variant};

#[derive(Debug, Clone, Copy, Default)]
pub struct Bech32Codec;

impl Bech32Codec {
    fn hrp(profile: &CurrencyProfile) -> WalletResult<&str> {
        match &profile.custom_encoding {
            Some(CustomEncoding::Bech32 { hrp }) if !hrp.is_empty() => Ok(hrp.as_str()),
            _ => Err(profile.unsupported("missing bech32 hrp")),
        }
    }
}

fn map_bech32_error(err: bech32::Error) -> WalletError {
    match err {
        bech32::Error::InvalidChecksum => AddressError::ChecksumMismatch.into(),
        other => AddressError::InvalidEncoding(other.to_string()).into(),
    }
}

impl AddressCodec for Bech32Codec {
    fn encode(&self, public_key: &[u8], profile: &CurrencyProfile) -> WalletResult<String> {
        let hrp = Self::hrp(profile)?;
        let digest = public_key_hash(public_key, profile.hash_pipeline)?;
        bech32::encode(hrp, digest.to_base32(), Variant::Bech32).map_err(map_bech32_error)
    }

    fn decode(&self, address: &str, profile: &CurrencyProfile) -> WalletResult<DecodedAddress> {
        let expected_hrp = Self::hrp(profile)?;
        let (hrp, data, variant) = bech32::decode(address).map_err(map_bech32_error)?;

        if variant != Variant::Bech32 {
            return Err(AddressError::InvalidEncoding("expected bech32 variant".to_string()).into());
        }
        if hrp != expected_hrp {
            return Err(AddressError::VersionMismatch {
                expected: expected_hrp.to_string(),
                actual: hrp,
            }
            .into());
        }

        let payload = Vec::<u8>::from_base32(&data).map_err(map_bech32_error)?;
        let expected_len = profile.hash_pipeline.output_len();
        if payload.len() != expected_len {
            return Err(AddressError::InvalidLength {
                expected: expected_len,
                actual: payload.len(),
            }
            .into());
        }

        Ok(DecodedAddress {
            version: hrp.into_bytes(),
            payload,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // m/44'/118'/0'/0/0 của mnemonic "abandon ... about"
    const ABANDON_COSMOS: &str = "cosmos19rl4cm2hmr8afy4kldpxz3fka4jguq0auqdal4";

    fn cosmos() -> CurrencyProfile {
        CurrencyProfile::bech32("atom", "Cosmos Hub", 118, "cosmos")
    }

    #[test]
    fn test_decode_known_address() {
        let decoded = Bech32Codec.decode(ABANDON_COSMOS, &cosmos()).unwrap();
        assert_eq!(decoded.version, b"cosmos".to_vec());
        assert_eq!(decoded.payload.len(), 20);
    }

    #[test]
    fn test_uppercase_accepted_mixed_rejected() {
        assert!(Bech32Codec.verify(&ABANDON_COSMOS.to_uppercase(), &cosmos()));
        let mixed = ABANDON_COSMOS.replacen('r', "R", 1);
        assert!(!Bech32Codec.verify(&mixed, &cosmos()));
    }

    #[test]
    fn test_hrp_mismatch() {
        let osmo = CurrencyProfile::bech32("osmo", "Osmosis", 118, "osmo");
        assert!(matches!(
            Bech32Codec.decode(ABANDON_COSMOS, &osmo),
            Err(WalletError::Address(AddressError::VersionMismatch { .. }))
        ));
    }

    #[test]
    fn test_tamper_detected() {
        // Đổi ký tự cuối của checksum
        let tampered = format!("{}5", &ABANDON_COSMOS[..ABANDON_COSMOS.len() - 1]);
        assert!(matches!(
            Bech32Codec.decode(&tampered, &cosmos()),
            Err(WalletError::Address(AddressError::ChecksumMismatch))
        ));
    }

    #[test]
    fn test_missing_hrp_unsupported() {
        let mut profile = cosmos();
        profile.custom_encoding = None;
        assert!(Bech32Codec.encode(&[0x02; 33], &profile).is_err());
    }
}
