// wallet-core/src/registry/cache.rs
//
// Wallet Cache - bounded FIFO cache cho derived wallets
//
// Key = (SHA256(seed), coin_id, account). Seed không được lưu.
// Wallet bị evict → Drop → private key/WIF tự động zeroize.

use super::{Wallet, WalletRegistry};
use crate::crypto::hash::sha256;
use crate::error::WalletResult;
use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::debug;

type CacheKey = ([u8; 32], String, u32);

#[derive(Default)]
struct CacheState {
    entries: HashMap<CacheKey, Wallet>,
    order: VecDeque<CacheKey>,
}

/// Thread-safe wallet cache với capacity cố định
pub struct WalletCache {
    capacity: usize,
    state: Mutex<CacheState>,
}

impl std::fmt::Debug for WalletCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletCache")
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}

impl WalletCache {
    pub const DEFAULT_CAPACITY: usize = 64;

    /// `capacity` = 0 được nâng lên 1
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Xóa toàn bộ (zeroize qua Drop)
    pub fn clear(&self) {
        let mut state = self.lock();
        state.entries.clear();
        state.order.clear();
    }

    /// Lấy từ cache, hoặc derive qua registry rồi cache lại
    ///
    /// Lỗi không được cache.
    pub fn get_or_create(
        &self,
        registry: &WalletRegistry,
        seed: &[u8],
        coin_id: &str,
        account: u32,
    ) -> WalletResult<Wallet> {
        let key: CacheKey = (sha256(seed), coin_id.to_string(), account);

        if let Some(wallet) = self.lock().entries.get(&key) {
            debug!(coin_id, account, "wallet cache hit");
            return Ok(wallet.clone());
        }

        // Derive ngoài lock
        let wallet = registry.create_wallet(seed, coin_id, account)?;

        let mut state = self.lock();
        if !state.entries.contains_key(&key) {
            while state.entries.len() >= self.capacity {
                match state.order.pop_front() {
                    Some(oldest) => {
                        state.entries.remove(&oldest);
                    }
                    None => break,
                }
            }
            state.order.push_back(key.clone());
            state.entries.insert(key, wallet.clone());
        }
        Ok(wallet)
    }

    // Poisoned lock vẫn dùng được: state luôn nhất quán giữa các thao tác
    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for WalletCache {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn registry() -> WalletRegistry {
        WalletRegistry::with_defaults().unwrap()
    }

    #[test]
    fn test_hit_returns_same_wallet() {
        let cache = WalletCache::new(4);
        let registry = registry();
        let seed = [7u8; 64];
        let a = cache.get_or_create(&registry, &seed, "btc", 0).unwrap();
        let b = cache.get_or_create(&registry, &seed, "btc", 0).unwrap();
        assert_eq!(a.address, b.address);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_fifo_eviction() {
        let cache = WalletCache::new(2);
        let registry = registry();
        let seed = [7u8; 64];
        cache.get_or_create(&registry, &seed, "btc", 0).unwrap();
        cache.get_or_create(&registry, &seed, "eth", 0).unwrap();
        cache.get_or_create(&registry, &seed, "ltc", 0).unwrap();
        assert_eq!(cache.len(), 2);

        let state = cache.lock();
        assert!(!state.entries.keys().any(|(_, coin, _)| coin == "btc"));
        assert_eq!(state.order.len(), 2);
    }

    #[test]
    fn test_errors_not_cached() {
        let cache = WalletCache::default();
        assert!(cache
            .get_or_create(&registry(), &[7u8; 64], "nope", 0)
            .is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_distinct_seeds_distinct_entries() {
        let cache = WalletCache::new(8);
        let registry = registry();
        let a = cache.get_or_create(&registry, &[1u8; 64], "eth", 0).unwrap();
        let b = cache.get_or_create(&registry, &[2u8; 64], "eth", 0).unwrap();
        assert_ne!(a.address, b.address);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_concurrent_access() {
        let cache = Arc::new(WalletCache::new(16));
        let registry = Arc::new(registry());
        let handles: Vec<_> = (0..4u32)
            .map(|i| {
                let cache = Arc::clone(&cache);
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || {
                    cache
                        .get_or_create(&registry, &[9u8; 64], "eth", i % 2)
                        .unwrap()
                        .address
                })
            })
            .collect();
        for handle in handles {
            assert!(handle.join().unwrap().starts_with("0x"));
        }
        assert_eq!(cache.len(), 2);
    }
}
