// wallet-core/src/chains/evm/address.rs
//
// EVM Address Module - Keccak-256 address derivation + EIP-55 checksum

use crate::chains::normalize_public_key;
use crate::crypto::hash::keccak256;
use crate::crypto::key_deriver::Secp256k1Deriver;
use crate::error::{AddressError, WalletResult};
use alloy_primitives::Address;
use zeroize::Zeroize;

/// EVM Address helpers
///
/// # Flow:  Private Key (32B) → Public Key (64B) → Keccak256 → Address (20B)
///
/// # Security
/// - Zeroize: intermediate hash bị xóa sau khi dùng
/// - No Storage: Module này KHÔNG lưu private key
pub struct EvmAddress;

impl EvmAddress {
    // =========================================================================
    // CORE: Public Key → Address Bytes (20 bytes)
    // =========================================================================

    /// Derive 20 bytes address từ SEC1 public key (33 hoặc 65 bytes)
    ///
    /// # Algorithm (chuẩn Ethereum Yellow Paper)
    /// 1. Decompress → `pub_key` (uncompressed, 65B)
    /// 2. Bỏ prefix byte 0x04 → `pub_key_raw` (64B)
    /// 3. Keccak-256(`pub_key_raw`) → `hash` (32B)
    /// 4. `hash[12..32]` → `address` (20B)
    pub fn bytes_from_public_key(public_key: &[u8]) -> WalletResult<[u8; 20]> {
        let (_, uncompressed) = normalize_public_key(public_key)?;
        let mut hash = keccak256(&uncompressed[1..]);

        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        hash.zeroize();

        Ok(address)
    }

    /// Derive 20 bytes address từ private key
    pub fn bytes_from_private_key(private_key: &[u8; 32]) -> WalletResult<[u8; 20]> {
        let public_key = Secp256k1Deriver::public_key_uncompressed(private_key)?;
        Self::bytes_from_public_key(&public_key)
    }

    /// Lowercase `0x` + 40 hex (canonical output của codec)
    #[inline]
    pub fn to_lower_hex(bytes: &[u8; 20]) -> String {
        format!("0x{}", hex::encode(bytes))
    }

    // =========================================================================
    // UTILITIES
    // =========================================================================

    /// Validate chuỗi có phải EVM address hợp lệ không
    ///
    /// Kiểm tra: `0x` prefix + 40 hex chars + EIP-55 checksum (nếu mixed case)
    #[inline]
    pub fn is_valid(address: &str) -> bool {
        Self::parse(address).is_ok()
    }

    /// Parse address, enforce EIP-55 khi chuỗi mixed-case
    pub fn parse(address: &str) -> WalletResult<[u8; 20]> {
        let body = address.strip_prefix("0x").ok_or_else(|| {
            AddressError::InvalidEncoding("EVM address must start with 0x".to_string())
        })?;
        if body.len() != 40 {
            return Err(AddressError::InvalidLength {
                expected: 40,
                actual: body.len(),
            }
            .into());
        }
        if !body.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddressError::InvalidEncoding("non-hex character".to_string()).into());
        }

        let has_lower = body.bytes().any(|b| b.is_ascii_lowercase());
        let has_upper = body.bytes().any(|b| b.is_ascii_uppercase());
        let parsed = if has_lower && has_upper {
            Address::parse_checksummed(address, None)
                .map_err(|_| AddressError::ChecksumMismatch)?
        } else {
            address
                .parse::<Address>()
                .map_err(|e| AddressError::InvalidEncoding(e.to_string()))?
        };

        Ok(parsed.into_array())
    }

    /// Normalize về EIP-55 checksum format
    ///
    /// `"0xabcd..."` → `"0xAbCd..."` (mixed-case theo checksum)
    pub fn to_checksum(address: &str) -> WalletResult<String> {
        let bytes = Self::parse(address)?;
        Ok(Address::from(bytes).to_checksum(None))
    }

    /// So sánh 2 address (case-insensitive, byte comparison)
    #[inline]
    pub fn equals(addr1: &str, addr2: &str) -> bool {
        match (addr1.parse::<Address>(), addr2.parse::<Address>()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
