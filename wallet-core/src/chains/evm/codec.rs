// wallet-core/src/chains/evm/codec.rs

use super::EvmAddress;
use crate::chains::{AddressCodec, DecodedAddress};
use crate::error::WalletResult;
use crate::registry::profile::CurrencyProfile;

/// `0x` + hex(KECCAK256(pubkey[1..])[12..])
///
/// Encode luôn trả về lowercase. Decode chấp nhận lowercase, uppercase,
/// hoặc mixed-case đúng EIP-55.
#[derive(Debug, Clone, Copy, Default)]
pub struct EvmKeccakCodec;

impl AddressCodec for EvmKeccakCodec {
    fn encode(&self, public_key: &[u8], _profile: &CurrencyProfile) -> WalletResult<String> {
        let bytes = EvmAddress::bytes_from_public_key(public_key)?;
        Ok(EvmAddress::to_lower_hex(&bytes))
    }

    fn decode(&self, address: &str, _profile: &CurrencyProfile) -> WalletResult<DecodedAddress> {
        let bytes = EvmAddress::parse(address)?;
        Ok(DecodedAddress {
            version: Vec::new(),
            payload: bytes.to_vec(),
        })
    }
}
