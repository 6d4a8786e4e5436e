// wallet-core/src/registry/mod.rs
//
// Wallet Registry - coin_id → CurrencyProfile, seed → Wallet per coin
//
// Flow: seed → m/44'/coin_type'/account'/0/0 → private key → public key
//       → AddressCodec (theo family) → address

pub mod cache;
pub mod profile;

pub use cache::WalletCache;
pub use profile::{
    builtin_profiles, AddressFamily, CurrencyProfile, CurrencyProfileConfig, CustomEncoding,
    HashPipeline,
};

use crate::chains::{codec_for, DecodedAddress, Wif};
use crate::crypto::key_deriver::ExtendedKey;
use crate::crypto::paths::DerivationPath;
use crate::error::{RegistryError, WalletResult};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};
use zeroize::Zeroizing;

// =============================================================================
// WALLET
// =============================================================================

/// Wallet của một coin tại một account
#[derive(Clone)]
pub struct Wallet {
    pub coin_id: String,
    pub address: String,
    /// Compressed SEC1 public key (33 bytes)
    pub public_key: [u8; 33],
    pub private_key: Zeroizing<[u8; 32]>,
    /// WIF (chỉ khi profile có `wifVersionByte`)
    pub wif: Option<Zeroizing<String>>,
    /// Derivation path đã dùng (e.g., "m/44'/0'/0'/0/0")
    pub path: String,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị private key / WIF
impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("coin_id", &self.coin_id)
            .field("address", &self.address)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// REGISTRY
// =============================================================================

/// Registry các currency profile
///
/// Thêm coin = `register_currency(profile)`, không cần code mới.
#[derive(Debug, Clone, Default)]
pub struct WalletRegistry {
    profiles: HashMap<String, CurrencyProfile>,
}

impl WalletRegistry {
    /// Registry rỗng
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry với toàn bộ built-in profiles
    pub fn with_defaults() -> WalletResult<Self> {
        let mut registry = Self::new();
        for profile in builtin_profiles() {
            registry.register_currency(profile)?;
        }
        Ok(registry)
    }

    /// Load profiles từ JSON array (camelCase)
    pub fn from_json(json: &str) -> WalletResult<Self> {
        let entries: Vec<CurrencyProfileConfig> = serde_json::from_str(json)
            .map_err(|e| RegistryError::InvalidConfig(e.to_string()))?;

        let mut registry = Self::new();
        for entry in entries {
            registry.register_currency(CurrencyProfile::try_from(entry)?)?;
        }
        Ok(registry)
    }

    /// Đăng ký một profile
    ///
    /// Fail fast: coin_id trùng → `DuplicateCoin`, profile thiếu tham số
    /// cho family → `UnsupportedProfile`.
    pub fn register_currency(&mut self, profile: CurrencyProfile) -> WalletResult<()> {
        if self.profiles.contains_key(&profile.coin_id) {
            return Err(RegistryError::DuplicateCoin(profile.coin_id).into());
        }
        codec_for(&profile)?;

        debug!(
            coin_id = %profile.coin_id,
            family = ?profile.family,
            coin_type = profile.bip44_coin_type,
            "registered currency"
        );
        self.profiles.insert(profile.coin_id.clone(), profile);
        Ok(())
    }

    pub fn profile(&self, coin_id: &str) -> WalletResult<&CurrencyProfile> {
        self.profiles
            .get(coin_id)
            .ok_or_else(|| RegistryError::UnsupportedCoin(coin_id.to_string()).into())
    }

    /// Danh sách coin_id (sorted)
    pub fn coin_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    // =========================================================================
    // WALLET CREATION
    // =========================================================================

    /// Tạo wallet cho một coin tại `m/44'/coin_type'/account'/0/0`
    pub fn create_wallet(&self, seed: &[u8], coin_id: &str, account: u32) -> WalletResult<Wallet> {
        let profile = self.profile(coin_id)?;
        let path = DerivationPath::wallet(profile.bip44_coin_type, account)?;
        let key = ExtendedKey::from_seed(seed)?.derive_path(&path)?;
        self.wallet_from_key(profile, &key, path.to_string())
    }

    /// Tạo wallet cho nhiều coin từ cùng một seed
    ///
    /// Lỗi của một coin không ảnh hưởng coin khác: mỗi coin có Result riêng.
    pub fn create_all_wallets<I, S>(
        &self,
        seed: &[u8],
        coin_ids: I,
        account: u32,
    ) -> BTreeMap<String, WalletResult<Wallet>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        coin_ids
            .into_iter()
            .map(|coin_id| {
                let coin_id = coin_id.as_ref();
                let result = self.create_wallet(seed, coin_id, account);
                if let Err(e) = &result {
                    warn!(coin_id, error = %e, "wallet creation failed");
                }
                (coin_id.to_string(), result)
            })
            .collect()
    }

    /// Encode address + WIF từ một key đã derive
    pub fn wallet_from_key(
        &self,
        profile: &CurrencyProfile,
        key: &ExtendedKey,
        path: String,
    ) -> WalletResult<Wallet> {
        let public_key = key.public_key()?;
        let address = codec_for(profile)?.encode(&public_key, profile)?;
        let wif = match profile.wif_version_byte {
            Some(version) => Some(Wif::encode(key.private_key(), version, true)),
            None => None,
        };

        debug!(coin_id = %profile.coin_id, %path, %address, "derived wallet");
        Ok(Wallet {
            coin_id: profile.coin_id.clone(),
            address,
            public_key,
            private_key: Zeroizing::new(*key.private_key()),
            wif,
            path,
        })
    }

    // =========================================================================
    // ADDRESS VALIDATION
    // =========================================================================

    /// Decode address theo profile của coin
    pub fn decode_address(&self, coin_id: &str, address: &str) -> WalletResult<DecodedAddress> {
        let profile = self.profile(coin_id)?;
        codec_for(profile)?.decode(address, profile)
    }

    /// `true` nếu address hợp lệ cho coin (fail closed)
    pub fn verify_address(&self, coin_id: &str, address: &str) -> bool {
        self.decode_address(coin_id, address).is_ok()
    }
}

// =============================================================================
// TESTS
// =============================================================================
