// wallet-core/src/chains/custom/base64url.rs
//
// prefix || base64url_nopad(hash(pubkey)[..truncate])
//
// ⚠ Không có checksum: decode chỉ kiểm tra alphabet + độ dài.

use crate::chains::{public_key_hash, AddressCodec, DecodedAddress};
use crate::error::{AddressError, WalletResult};
use crate::registry::profile::{CurrencyProfile, CustomEncoding};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

#[derive(Debug, Clone, Copy, Default)]
pub struct Base64UrlCodec;

impl Base64UrlCodec {
    fn params(profile: &CurrencyProfile) -> WalletResult<(usize, &str)> {
        match &profile.custom_encoding {
            Some(CustomEncoding::Base64UrlHash { truncate, prefix })
                if *truncate > 0 && *truncate <= profile.hash_pipeline.output_len() =>
            {
                Ok((*truncate, prefix.as_str()))
            }
            _ => Err(profile.unsupported("invalid base64url parameters")),
        }
    }
}

impl AddressCodec for Base64UrlCodec {
    fn encode(&self, public_key: &[u8], profile: &CurrencyProfile) -> WalletResult<String> {
        let (truncate, prefix) = Self::params(profile)?;
        let digest = public_key_hash(public_key, profile.hash_pipeline)?;
        Ok(format!("{}{}", prefix, URL_SAFE_NO_PAD.encode(&digest[..truncate])))
    }

    fn decode(&self, address: &str, profile: &CurrencyProfile) -> WalletResult<DecodedAddress> {
        let (truncate, prefix) = Self::params(profile)?;
        let body = address.strip_prefix(prefix).ok_or_else(|| AddressError::VersionMismatch {
            expected: prefix.to_string(),
            actual: address.chars().take(prefix.chars().count()).collect(),
        })?;

        let payload = URL_SAFE_NO_PAD
            .decode(body)
            .map_err(|e| AddressError::InvalidEncoding(e.to_string()))?;
        if payload.len() != truncate {
            return Err(AddressError::InvalidLength {
                expected: truncate,
                actual: payload.len(),
            }
            .into());
        }

        Ok(DecodedAddress {
            version: prefix.as_bytes().to_vec(),
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::profile::HashPipeline;

    const PUBKEY: &str = "02dadace760c35a9dff8317cbb6ec884d0d4c9c98632dad5dde941b217d7090a67";

    fn profile(prefix: &str) -> CurrencyProfile {
        CurrencyProfile {
            hash_pipeline: HashPipeline::Sha256,
            custom_encoding: Some(CustomEncoding::Base64UrlHash {
                truncate: 20,
                prefix: prefix.to_string(),
            }),
            ..CurrencyProfile::bech32("b64", "Base64 test", 9999, "unused")
        }
    }

    #[test]
    fn test_encode_known() {
        let address = Base64UrlCodec
            .encode(&hex::decode(PUBKEY).unwrap(), &profile(""))
            .unwrap();
        assert_eq!(address, "lo2Hl0TQ1KUuh-9GOg9YVnucnww");
    }

    #[test]
    fn test_prefix_roundtrip() {
        let p = profile("b64:");
        let address = Base64UrlCodec.encode(&hex::decode(PUBKEY).unwrap(), &p).unwrap();
        assert_eq!(address, "b64:lo2Hl0TQ1KUuh-9GOg9YVnucnww");
        let decoded = Base64UrlCodec.decode(&address, &p).unwrap();
        assert_eq!(decoded.payload.len(), 20);
        assert!(!Base64UrlCodec.verify("lo2Hl0TQ1KUuh-9GOg9YVnucnww", &p));
    }

    #[test]
    fn test_rejects_padding_and_bad_length() {
        let p = profile("");
        assert!(!Base64UrlCodec.verify("lo2Hl0TQ1KUuh-9GOg9YVnucnww=", &p));
        assert!(!Base64UrlCodec.verify("lo2Hl0TQ", &p));
        assert!(!Base64UrlCodec.verify("lo2Hl0TQ1KUuh+9GOg9YVnucnww", &p));
    }
}
