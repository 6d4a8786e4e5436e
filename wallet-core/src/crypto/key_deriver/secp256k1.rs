// wallet-core/src/crypto/key_deriver/secp256k1.rs
//
// secp256k1 Key Derivation — BIP-32
//
// Dùng cho: Bitcoin, Ethereum/EVM, Tron, Cosmos, Litecoin, Dogecoin, ...
// Algorithm: HMAC-SHA512 hierarchical deterministic derivation
// Reference: https://github.com/bitcoin/bips/blob/master/bip-0032.mediawiki

use crate::crypto::paths::ChildIndex;
use crate::error::{CryptoError, DerivationError, WalletError, WalletResult};
use hmac::{Hmac, Mac};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, Scalar, SecretKey};
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

type HmacSha512 = Hmac<Sha512>;

/// (private key, chain code) sau một bước derivation
pub(crate) type KeyMaterial = (Zeroizing<[u8; 32]>, [u8; 32]);

/// secp256k1 BIP-32 primitives
///
/// # Khác biệt với SLIP-0010 ed25519
/// - Master key seed: "Bitcoin seed"
/// - Hỗ trợ cả hardened và normal derivation
/// - IL phải < n và child scalar phải != 0, nếu không derivation FAIL
///   (không bao giờ tự động skip sang index kế tiếp)
pub(crate) struct Secp256k1Deriver;

impl Secp256k1Deriver {
    /// BIP-32 master key seed constant
    const MASTER_SECRET: &'static [u8] = b"Bitcoin seed";

    /// I = HMAC-SHA512(Key = "Bitcoin seed", Data = seed)
    /// IL = master private key, IR = master chain code
    pub fn master_key_generate(seed: &[u8]) -> WalletResult<KeyMaterial> {
        let mut mac = Self::hmac(Self::MASTER_SECRET)?;
        mac.update(seed);
        let (il, chain_code) = Self::split(mac);

        if Self::scalar_from_bytes(&il).is_none() {
            return Err(DerivationError::InvalidMasterKey.into());
        }
        Ok((il, chain_code))
    }

    /// Derive child private key
    ///
    /// - Hardened: Data = 0x00 || parent_key || ser32(index)
    /// - Normal:   Data = serP(parent_pub) || ser32(index)
    ///
    /// child = (IL + parent_key) mod n
    pub fn child_key_derive(
        parent_key: &[u8; 32],
        parent_chain_code: &[u8; 32],
        child: ChildIndex,
    ) -> WalletResult<KeyMaterial> {
        let mut mac = Self::hmac(parent_chain_code)?;
        if child.is_hardened() {
            mac.update(&[0x00]);
            mac.update(parent_key);
        } else {
            mac.update(&Self::public_key(parent_key)?);
        }
        mac.update(&child.raw().to_be_bytes());

        let (il, chain_code) = Self::split(mac);
        let key = Self::tweak_add(parent_key, &il, child.raw())?;
        Ok((key, chain_code))
    }

    /// (IL + parent) mod n, failing with `InvalidChildKey` when IL >= n or the
    /// sum is zero.
    pub fn tweak_add(
        parent_key: &[u8; 32],
        il: &[u8; 32],
        index: u32,
    ) -> WalletResult<Zeroizing<[u8; 32]>> {
        let tweak = Self::scalar_from_bytes(il)
            .ok_or(WalletError::Derivation(DerivationError::InvalidChildKey { index }))?;
        let parent = Self::scalar_from_bytes(parent_key).ok_or_else(|| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(
                "Parent key is not a valid secp256k1 scalar".to_string(),
            ))
        })?;

        let child = tweak + parent;
        if bool::from(child.is_zero()) {
            return Err(DerivationError::InvalidChildKey { index }.into());
        }

        Ok(Zeroizing::new(child.to_bytes().into()))
    }

    /// Compressed SEC1 public key (33 bytes)
    pub fn public_key(private_key: &[u8; 32]) -> WalletResult<[u8; 33]> {
        let secret = Self::secret_key(private_key)?;
        let encoded = secret.public_key().to_encoded_point(true);
        let mut out = [0u8; 33];
        out.copy_from_slice(encoded.as_bytes());
        Ok(out)
    }

    /// Uncompressed SEC1 public key (65 bytes, prefix 0x04)
    pub fn public_key_uncompressed(private_key: &[u8; 32]) -> WalletResult<[u8; 65]> {
        let secret = Self::secret_key(private_key)?;
        let encoded = secret.public_key().to_encoded_point(false);
        let mut out = [0u8; 65];
        out.copy_from_slice(encoded.as_bytes());
        Ok(out)
    }

    fn secret_key(private_key: &[u8; 32]) -> WalletResult<SecretKey> {
        SecretKey::from_slice(private_key).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid secp256k1 private key: {}",
                e
            )))
        })
    }

    /// `None` nếu bytes >= n (group order)
    fn scalar_from_bytes(bytes: &[u8; 32]) -> Option<Scalar> {
        Option::from(Scalar::from_repr(FieldBytes::from(*bytes)))
    }

    fn hmac(key: &[u8]) -> WalletResult<HmacSha512> {
        HmacSha512::new_from_slice(key).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "HMAC init failed: {}",
                e
            )))
        })
    }

    fn split(mac: HmacSha512) -> KeyMaterial {
        // Copy into stack buffer we fully control, then zeroize
        let result = mac.finalize().into_bytes();
        let mut buf = [0u8; 64];
        buf.copy_from_slice(&result);

        let mut key = Zeroizing::new([0u8; 32]);
        let mut chain_code = [0u8; 32];
        key.copy_from_slice(&buf[..32]);
        chain_code.copy_from_slice(&buf[32..]);

        buf.zeroize();
        (key, chain_code)
    }
}

// =============================================================================
// TESTS
// =============================================================================
