// wallet-core/src/chains/custom/mod.rs
//
// Custom Address Families - tham số nằm trong `CurrencyProfile::custom_encoding`

pub mod base64url;
pub mod bech32_codec;

pub use base64url::Base64UrlCodec;
pub use bech32_codec::Bech32Codec;
