// wallet-core/src/signer/engine.rs
//
// Signing Engine - Offline ECDSA secp256k1 signing
// Transaction field map / message → digest (theo DigestScheme) → chữ ký low-S

use super::{message_hash, DigestScheme, Signature, TransactionFields};
use crate::error::{CryptoError, WalletError, WalletResult};
use k256::ecdsa::SigningKey;

/// Signer gắn với một private key
///
/// # Security Architecture
/// - **ZeroizeOnDrop**: `SigningKey` tự động ghi đè bộ nhớ bằng 0 khi Drop
/// - **No Debug Leak**: Custom Debug impl chỉ hiển thị public key
/// - **Deterministic**: RFC 6979 nonce, cùng input → cùng chữ ký
pub struct SigningEngine {
    signing_key: SigningKey,
    public_key: Vec<u8>,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị private key
impl std::fmt::Debug for SigningEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningEngine")
            .field("public_key", &hex::encode(&self.public_key))
            .finish_non_exhaustive()
    }
}

impl SigningEngine {
    // =========================================================================
    // CONSTRUCTOR
    // =========================================================================

    /// Khởi tạo Signer với Private Key 32 bytes
    ///
    /// Key = 0 hoặc >= n (group order) bị từ chối.
    pub fn new(private_key: &[u8]) -> WalletResult<Self> {
        // SigningKey::from_slice tự pad key ngắn hơn 32 bytes
        if private_key.len() != 32 {
            return Err(WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid private key length: expected 32 bytes, got {}",
                private_key.len()
            ))));
        }
        let signing_key = SigningKey::from_slice(private_key).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "Invalid private key (must be 32 bytes, 0 < k < n): {}",
                e
            )))
        })?;
        let public_key = signing_key
            .verifying_key()
            .to_encoded_point(true)
            .as_bytes()
            .to_vec();

        Ok(Self {
            signing_key,
            public_key,
        })
    }

    /// Compressed SEC1 public key (33 bytes)
    #[inline]
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    // =========================================================================
    // SIGNING
    // =========================================================================

    /// Ký digest 32 bytes đã tính sẵn
    pub fn sign_hash(&self, hash: &[u8; 32]) -> WalletResult<Signature> {
        let (signature, recovery_id) = self
            .signing_key
            .sign_prehash_recoverable(hash)
            .map_err(|e| WalletError::Crypto(CryptoError::SigningFailed(e.to_string())))?;

        Ok(Signature::from_parts(
            &signature,
            recovery_id,
            self.public_key.clone(),
        ))
    }

    /// Ký transaction: digest = scheme(canonical_bytes(fields))
    pub fn sign_transaction(
        &self,
        fields: &TransactionFields,
        scheme: DigestScheme,
    ) -> WalletResult<Signature> {
        self.sign_hash(&fields.hash(scheme))
    }

    /// Ký message với prefix của coin
    pub fn sign_message(
        &self,
        message: &[u8],
        prefix: &str,
        scheme: DigestScheme,
    ) -> WalletResult<Signature> {
        self.sign_hash(&message_hash(message, prefix, scheme))
    }
}

// =============================================================================
// TESTS
// =============================================================================
