// wallet-core/src/chains/evm/mod.rs

//! Ethereum Virtual Machine (EVM) Chain Support
//!
//! Ethereum và các chain tương thích (BSC, Polygon, Ethereum Classic, ...).
//!
//! # Key Features
//! - **Address Derivation**: Keccak-256 tail của public key via [`EvmAddress`].
//! - **Codec**: lowercase `0x` output, EIP-55 enforcement khi decode via [`EvmKeccakCodec`].

pub mod address;
pub mod codec;

// Re-exports for cleaner API access
pub use address::EvmAddress;
pub use codec::EvmKeccakCodec;
