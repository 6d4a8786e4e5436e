// wallet-core/src/crypto/hash.rs
//
// Hash primitives dùng chung cho KeyTree, AddressCodec và SigningEngine.

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};
use tiny_keccak::{Hasher, Keccak};

/// SHA-256
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// SHA-256(SHA-256(data)) — Bitcoin-style double hash
#[inline]
pub fn sha256d(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// RIPEMD-160(SHA-256(data))
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(Sha256::digest(data)).into()
}

/// Keccak-256 (Ethereum variant, NOT NIST SHA3-256)
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut out = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut out);
    out
}

/// First 4 bytes of SHA-256d, used as the Base58Check checksum.
#[inline]
pub fn checksum4(data: &[u8]) -> [u8; 4] {
    let digest = sha256d(data);
    [digest[0], digest[1], digest[2], digest[3]]
}
