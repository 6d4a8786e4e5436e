// wallet-core/src/crypto/key_deriver/mod.rs
//
// KeyTree - BIP-32 Hierarchical Deterministic Derivation
//
// Kiến trúc:
// ┌─────────────────────────────────────────────────┐
// │  Seed (64 bytes from BIP-39 Mnemonic)           │
// │                    │                            │
// │                    ▼                            │
// │     masterKeyFromSeed  (HMAC "Bitcoin seed")    │
// │                    │                            │
// │                    ▼                            │
// │     deriveChild × N   (m/44'/coin'/acct'/0/0)   │
// │                    │                            │
// │                    ▼                            │
// │     ExtendedKey → AddressCodec / SigningEngine  │
// └─────────────────────────────────────────────────┘

mod secp256k1;

pub(crate) use secp256k1::Secp256k1Deriver;

use crate::crypto::hash::{checksum4, hash160};
use crate::crypto::paths::{ChildIndex, DerivationPath, HARDENED_OFFSET};
use crate::error::{DerivationError, WalletResult};
use zeroize::Zeroizing;

/// BIP-32 mainnet private version bytes (`xprv`)
const XPRV_VERSION: [u8; 4] = [0x04, 0x88, 0xAD, 0xE4];

// =============================================================================
// EXTENDED KEY
// =============================================================================

/// BIP-32 extended private key
///
/// Immutable: mọi derivation đều tạo ra `ExtendedKey` mới.
#[derive(Clone, PartialEq, Eq)]
pub struct ExtendedKey {
    private_key: Zeroizing<[u8; 32]>,
    chain_code: Zeroizing<[u8; 32]>,
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_index: u32,
}

// Custom Debug - KHÔNG hiển thị private key / chain code
impl std::fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_index", &self.child_index)
            .finish_non_exhaustive()
    }
}

impl ExtendedKey {
    /// Master key (depth 0) từ seed
    pub fn from_seed(seed: &[u8]) -> WalletResult<Self> {
        KeyDeriver::validate_seed(seed)?;
        let (private_key, chain_code) = Secp256k1Deriver::master_key_generate(seed)?;
        Ok(Self {
            private_key,
            chain_code: Zeroizing::new(chain_code),
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_index: 0,
        })
    }

    /// Derive một child (depth + 1)
    pub fn derive(&self, child: ChildIndex) -> WalletResult<Self> {
        let depth = self.depth.checked_add(1).ok_or_else(|| DerivationError::InvalidPath {
            path: child.to_string(),
            reason: "maximum depth of 255 exceeded".to_string(),
        })?;

        let (private_key, chain_code) =
            Secp256k1Deriver::child_key_derive(&self.private_key, &self.chain_code, child)?;

        Ok(Self {
            private_key,
            chain_code: Zeroizing::new(chain_code),
            depth,
            parent_fingerprint: self.fingerprint()?,
            child_index: child.raw(),
        })
    }

    /// Derive child theo index.
    ///
    /// Hardened khi `hardened == true` hoặc `index >= 2^31`.
    pub fn derive_child(&self, index: u32, hardened: bool) -> WalletResult<Self> {
        let child = if index >= HARDENED_OFFSET {
            ChildIndex::hardened(index - HARDENED_OFFSET)?
        } else {
            ChildIndex::new(index, hardened)?
        };
        self.derive(child)
    }

    /// Derive tuần tự theo toàn bộ path (relative to `self`)
    pub fn derive_path(&self, path: &DerivationPath) -> WalletResult<Self> {
        let mut key = self.clone();
        for &segment in path.segments() {
            key = key.derive(segment)?;
        }
        Ok(key)
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// Private key (32 bytes)
    ///
    /// # Warning
    /// Secret material — không log, không persist cleartext.
    #[inline]
    pub fn private_key(&self) -> &[u8; 32] {
        &self.private_key
    }

    #[inline]
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    #[inline]
    pub fn depth(&self) -> u8 {
        self.depth
    }

    #[inline]
    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    #[inline]
    pub fn child_index(&self) -> u32 {
        self.child_index
    }

    /// Compressed public key (33 bytes)
    pub fn public_key(&self) -> WalletResult<[u8; 33]> {
        Secp256k1Deriver::public_key(&self.private_key)
    }

    /// Uncompressed public key (65 bytes, 0x04 prefix)
    pub fn public_key_uncompressed(&self) -> WalletResult<[u8; 65]> {
        Secp256k1Deriver::public_key_uncompressed(&self.private_key)
    }

    /// First 4 bytes of HASH160(compressed public key)
    pub fn fingerprint(&self) -> WalletResult<[u8; 4]> {
        let id = hash160(&self.public_key()?);
        Ok([id[0], id[1], id[2], id[3]])
    }

    /// BIP-32 `xprv...` serialization (Base58Check, 78-byte payload)
    pub fn to_xprv(&self) -> Zeroizing<String> {
        let mut payload = Zeroizing::new(Vec::with_capacity(82));
        payload.extend_from_slice(&XPRV_VERSION);
        payload.push(self.depth);
        payload.extend_from_slice(&self.parent_fingerprint);
        payload.extend_from_slice(&self.child_index.to_be_bytes());
        payload.extend_from_slice(&self.chain_code[..]);
        payload.push(0x00);
        payload.extend_from_slice(&self.private_key[..]);
        let checksum = checksum4(&payload);
        payload.extend_from_slice(&checksum);
        Zeroizing::new(bs58::encode(&payload[..]).into_string())
    }
}

// =============================================================================
// UNIFIED DERIVER
// =============================================================================
/// Key Deriver - Entry point cho key derivation
pub struct KeyDeriver;

impl KeyDeriver {
    /// HMAC-SHA512("Bitcoin seed", seed) → master `ExtendedKey` (depth 0)
    #[inline]
    pub fn master_key_from_seed(seed: &[u8]) -> WalletResult<ExtendedKey> {
        ExtendedKey::from_seed(seed)
    }

    /// Derive một child từ parent
    #[inline]
    pub fn derive_child(
        parent: &ExtendedKey,
        index: u32,
        hardened: bool,
    ) -> WalletResult<ExtendedKey> {
        parent.derive_child(index, hardened)
    }

    /// Parse path rồi derive từ master key
    ///
    /// # Arguments
    /// * `seed` - BIP-39 seed (64 bytes)
    /// * `path` - Derivation path (e.g., "m/44'/60'/0'/0/0")
    pub fn derive_from_path(seed: &[u8], path: &str) -> WalletResult<ExtendedKey> {
        let path: DerivationPath = path.parse()?;
        Self::master_key_from_seed(seed)?.derive_path(&path)
    }

    /// Batch derive: derive tới base_path 1 lần, rồi fan-out từng index (non-hardened)
    ///
    /// Hiệu quả hơn N lần gọi `derive_from_path()`: master → base chỉ tính 1 lần.
    pub fn derive_batch(
        seed: &[u8],
        base_path: &str,
        indices: std::ops::Range<u32>,
    ) -> WalletResult<Vec<ExtendedKey>> {
        let base = Self::derive_from_path(seed, base_path)?;

        let mut keys = Vec::with_capacity(indices.len());
        for index in indices {
            keys.push(base.derive(ChildIndex::normal(index)?)?);
        }
        Ok(keys)
    }

    /// BIP-32 cho phép seed 128..512 bits
    #[inline]
    fn validate_seed(seed: &[u8]) -> WalletResult<()> {
        if !(16..=64).contains(&seed.len()) {
            return Err(DerivationError::InvalidSeedLength(seed.len()).into());
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
