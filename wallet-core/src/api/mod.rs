// wallet-core/src/api/mod.rs
//
// Public API - String-in / JSON-friendly-out facade cho host (FFI, CLI, ...)
// Mọi input là owned String để bridge sang ngôn ngữ khác dễ dàng.

pub mod models;

pub use models::{ApiError, WalletCredential, WalletOutcome};

use crate::crypto::mnemonic::WalletMnemonic;
use crate::error::{CryptoError, WalletError, WalletResult};
use crate::registry::{builtin_profiles, CurrencyProfile, WalletRegistry};
use crate::signer::{verify_signature, Signature, SigningEngine, TransactionFields};
use std::collections::BTreeMap;
use tracing::debug;
use zeroize::Zeroizing;

// --- Key Management ---

/// Sinh mnemonic mới (12 hoặc 24 từ)
pub fn generate_mnemonic(word_count: usize) -> WalletResult<String> {
    let entropy_bits = match word_count {
        12 => 128,
        24 => 256,
        other => return Err(crate::error::MnemonicError::InvalidWordCount(other).into()),
    };
    let mnemonic = WalletMnemonic::generate(entropy_bits)?;
    Ok(mnemonic.phrase().to_string())
}

/// Kiểm tra mnemonic (wordlist + checksum), không bao giờ panic
pub fn validate_mnemonic(phrase: String) -> bool {
    WalletMnemonic::validate(&phrase)
}

fn seed_from(mnemonic: &str, passphrase: Option<&str>) -> WalletResult<Zeroizing<[u8; 64]>> {
    let mnemonic = WalletMnemonic::from_phrase(mnemonic)?;
    Ok(mnemonic.to_seed(passphrase))
}

/// Tạo wallet cho một coin
pub fn create_wallet(
    registry: &WalletRegistry,
    mnemonic: String,
    passphrase: Option<String>,
    coin_id: String,
    account: u32,
) -> WalletResult<WalletCredential> {
    let mnemonic = Zeroizing::new(mnemonic);
    let passphrase = passphrase.map(Zeroizing::new);
    let seed = seed_from(&mnemonic, passphrase.as_deref().map(String::as_str))?;

    let wallet = registry.create_wallet(seed.as_slice(), &coin_id, account)?;
    Ok(WalletCredential::from(&wallet))
}

/// Tạo wallet cho nhiều coin (account 0)
///
/// Mnemonic sai → lỗi cho cả call. Lỗi của từng coin nằm trong
/// `WalletOutcome::Error` và không ảnh hưởng coin khác.
pub fn create_all_wallets(
    registry: &WalletRegistry,
    mnemonic: String,
    passphrase: Option<String>,
    coin_ids: Vec<String>,
) -> WalletResult<BTreeMap<String, WalletOutcome>> {
    let mnemonic = Zeroizing::new(mnemonic);
    let passphrase = passphrase.map(Zeroizing::new);
    let seed = seed_from(&mnemonic, passphrase.as_deref().map(String::as_str))?;

    let outcomes = registry
        .create_all_wallets(seed.as_slice(), &coin_ids, 0)
        .into_iter()
        .map(|(coin_id, result)| {
            let outcome = match result {
                Ok(wallet) => WalletOutcome::Ok {
                    wallet: WalletCredential::from(&wallet),
                },
                Err(e) => WalletOutcome::Error {
                    error: ApiError::from(&e),
                },
            };
            (coin_id, outcome)
        })
        .collect();

    debug!(coins = coin_ids.len(), "created wallets");
    Ok(outcomes)
}

// --- Signing ---

fn engine_from_hex(private_key_hex: &str) -> WalletResult<SigningEngine> {
    let bytes = Zeroizing::new(
        hex::decode(private_key_hex.trim_start_matches("0x")).map_err(|e| {
            WalletError::Crypto(CryptoError::InvalidKeyFormat(format!(
                "private key is not valid hex: {}",
                e
            )))
        })?,
    );
    SigningEngine::new(&bytes)
}

/// Ký transaction field map theo digest scheme của coin
pub fn sign_transaction(
    registry: &WalletRegistry,
    coin_id: String,
    private_key_hex: String,
    fields: TransactionFields,
) -> WalletResult<Signature> {
    let profile = registry.profile(&coin_id)?;
    let private_key_hex = Zeroizing::new(private_key_hex);
    engine_from_hex(&private_key_hex)?.sign_transaction(&fields, profile.digest_scheme)
}

/// Ký message theo prefix + digest scheme của coin
pub fn sign_message(
    registry: &WalletRegistry,
    coin_id: String,
    private_key_hex: String,
    message: String,
) -> WalletResult<Signature> {
    let profile = registry.profile(&coin_id)?;
    let prefix = profile
        .message_prefix
        .as_deref()
        .ok_or_else(|| profile.unsupported("message signing not configured"))?;
    let private_key_hex = Zeroizing::new(private_key_hex);
    engine_from_hex(&private_key_hex)?.sign_message(
        message.as_bytes(),
        prefix,
        profile.digest_scheme,
    )
}

/// Verify chữ ký transaction với public key (hex)
pub fn verify_transaction(
    registry: &WalletRegistry,
    coin_id: String,
    fields: TransactionFields,
    signature: Signature,
    public_key_hex: String,
) -> WalletResult<bool> {
    let profile = registry.profile(&coin_id)?;
    let Ok(public_key) = hex::decode(public_key_hex.trim_start_matches("0x")) else {
        return Ok(false);
    };
    Ok(verify_signature(
        &fields.hash(profile.digest_scheme),
        &signature,
        &public_key,
    ))
}

// --- Address ---

/// Kiểm tra address (checksum, version, độ dài) cho coin
pub fn verify_address(registry: &WalletRegistry, coin_id: String, address: String) -> bool {
    registry.verify_address(&coin_id, &address)
}

// --- Config Helpers ---

pub fn get_default_currencies() -> Vec<CurrencyProfile> {
    builtin_profiles()
}

// =============================================================================
// TESTS
// =============================================================================
