// wallet-core/src/api/models.rs
//
// API Data Models - JSON-friendly structures cho FFI/host boundary
//
// Tất cả structs đều:
// - Serialize/Deserialize (camelCase)
// - Bytes → hex string
// - Secret fields bị zeroize khi Drop và không xuất hiện trong Debug

use crate::error::WalletError;
use crate::registry::Wallet;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

// =============================================================================
// WALLET CREDENTIAL
// =============================================================================

/// Wallet đã derive, dạng JSON
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct WalletCredential {
    pub coin_id: String,
    pub address: String,
    /// Compressed SEC1 public key (hex)
    pub public_key: String,
    /// Private key 32 bytes (hex)
    pub private_key_hex: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wif: Option<String>,
    pub path: String,
}

impl std::fmt::Debug for WalletCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletCredential")
            .field("coin_id", &self.coin_id)
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl From<&Wallet> for WalletCredential {
    fn from(wallet: &Wallet) -> Self {
        Self {
            coin_id: wallet.coin_id.clone(),
            address: wallet.address.clone(),
            public_key: hex::encode(wallet.public_key),
            private_key_hex: hex::encode(*wallet.private_key),
            wif: wallet.wif.as_ref().map(|wif| wif.to_string()),
            path: wallet.path.clone(),
        }
    }
}

// =============================================================================
// ERROR / OUTCOME
// =============================================================================

/// Lỗi dạng JSON: mã ổn định + message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl From<&WalletError> for ApiError {
    fn from(err: &WalletError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// Kết quả per-coin của `create_all_wallets`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum WalletOutcome {
    Ok { wallet: WalletCredential },
    Error { error: ApiError },
}

impl WalletOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, WalletOutcome::Ok { .. })
    }

    pub fn wallet(&self) -> Option<&WalletCredential> {
        match self {
            WalletOutcome::Ok { wallet } => Some(wallet),
            WalletOutcome::Error { .. } => None,
        }
    }
}
