// wallet-core/src/signer/signature.rs
//
// ECDSA secp256k1 Signature (r, s, recovery id) + verification

use crate::error::{CryptoError, WalletError, WalletResult};
use k256::ecdsa::signature::hazmat::PrehashVerifier;
use k256::ecdsa::{RecoveryId, Signature as EcdsaSignature, VerifyingKey};
use serde::{Deserialize, Serialize};

/// Chữ ký ECDSA (low-S normalized)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    #[serde(with = "hex::serde")]
    pub r: [u8; 32],
    #[serde(with = "hex::serde")]
    pub s: [u8; 32],
    /// 0 hoặc 1 (y parity của R); x overflow không xảy ra với low-S signing
    pub recovery_id: u8,
    /// Compressed SEC1 public key của signer (33 bytes)
    #[serde(with = "hex::serde")]
    pub public_key: Vec<u8>,
}

impl Signature {
    pub(crate) fn from_parts(
        signature: &EcdsaSignature,
        recovery_id: RecoveryId,
        public_key: Vec<u8>,
    ) -> Self {
        let bytes = signature.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Self {
            r,
            s,
            recovery_id: recovery_id.to_byte(),
            public_key,
        }
    }

    /// r || s (64 bytes)
    pub fn to_rs(&self) -> [u8; 64] {
        let mut out = [0u8; 64];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }

    /// r || s || v (65 bytes), v = recovery id thô (0/1).
    ///
    /// Ethereum `personal_sign` dùng v + 27.
    pub fn to_rsv(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..64].copy_from_slice(&self.to_rs());
        out[64] = self.recovery_id;
        out
    }

    fn to_ecdsa(&self) -> WalletResult<EcdsaSignature> {
        EcdsaSignature::from_scalars(self.r, self.s)
            .map_err(|e| WalletError::Crypto(CryptoError::InvalidSignature(e.to_string())))
    }

    /// Khôi phục compressed public key từ digest đã ký
    pub fn recover_public_key(&self, hash: &[u8; 32]) -> WalletResult<[u8; 33]> {
        let signature = self.to_ecdsa()?;
        let recovery_id = RecoveryId::from_byte(self.recovery_id).ok_or_else(|| {
            WalletError::Crypto(CryptoError::InvalidSignature(format!(
                "invalid recovery id {}",
                self.recovery_id
            )))
        })?;

        let key = VerifyingKey::recover_from_prehash(hash, &signature, recovery_id)
            .map_err(|e| WalletError::Crypto(CryptoError::InvalidSignature(e.to_string())))?;

        let mut out = [0u8; 33];
        out.copy_from_slice(key.to_encoded_point(true).as_bytes());
        Ok(out)
    }
}

/// Verify chữ ký trên digest với public key (33 hoặc 65 bytes)
///
/// Fail closed: public key/chữ ký sai format, hoặc high-S, đều trả về `false`.
pub fn verify_signature(hash: &[u8; 32], signature: &Signature, public_key: &[u8]) -> bool {
    let Ok(key) = VerifyingKey::from_sec1_bytes(public_key) else {
        return false;
    };
    let Ok(sig) = signature.to_ecdsa() else {
        return false;
    };
    key.verify_prehash(hash, &sig).is_ok()
}

// =============================================================================
// TESTS
// =============================================================================
