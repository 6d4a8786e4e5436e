// wallet-core/src/signer/message.rs
//
// Message Signing Digest
//
// - SHA schemes (Bitcoin-style): prefix || compact_size(len) || message
// - Keccak (EIP-191):            prefix || ascii_decimal(len) || message

use super::{write_compact_size, DigestScheme};

/// Digest của một signed message
///
/// `prefix` được dùng nguyên văn (e.g., `"\x18Bitcoin Signed Message:\n"`,
/// hoặc `"\x19Ethereum Signed Message:\n"` với version byte EIP-191).
pub fn message_hash(message: &[u8], prefix: &str, scheme: DigestScheme) -> [u8; 32] {
    let mut buf = Vec::with_capacity(prefix.len() + 9 + message.len());
    buf.extend_from_slice(prefix.as_bytes());
    match scheme {
        DigestScheme::Keccak256 => buf.extend_from_slice(message.len().to_string().as_bytes()),
        DigestScheme::DoubleSha256 | DigestScheme::Sha256 => {
            write_compact_size(&mut buf, message.len() as u64)
        }
    }
    buf.extend_from_slice(message);
    scheme.digest(&buf)
}
