// wallet-core/src/signer/transaction.rs
//
// Transaction Fields - Canonical Encoding
//
// Field map được sắp xếp theo key (BTreeMap), mỗi entry encode thành
// compact_size(len(key)) || key || compact_size(len(value)) || value.
// Cùng một map luôn cho cùng bytes → cùng digest.

use super::{write_compact_size, DigestScheme};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Transaction dưới dạng field map (string → string)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionFields(BTreeMap<String, String>);

impl TransactionFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Bytes canonical để hash
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        for (key, value) in &self.0 {
            write_compact_size(&mut buf, key.len() as u64);
            buf.extend_from_slice(key.as_bytes());
            write_compact_size(&mut buf, value.len() as u64);
            buf.extend_from_slice(value.as_bytes());
        }
        buf
    }

    /// Digest của canonical bytes
    pub fn hash(&self, scheme: DigestScheme) -> [u8; 32] {
        scheme.digest(&self.canonical_bytes())
    }
}

impl From<BTreeMap<String, String>> for TransactionFields {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TransactionFields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TransactionFields {
        TransactionFields::new()
            .with("to", "bob")
            .with("from", "alice")
            .with("amount", "1000")
    }

    #[test]
    fn test_canonical_bytes_sorted() {
        assert_eq!(
            hex::encode(sample().canonical_bytes()),
            "06616d6f756e7404313030300466726f6d05616c69636502746f03626f62"
        );
    }

    #[test]
    fn test_insertion_order_irrelevant() {
        let reversed: TransactionFields =
            [("amount", "1000"), ("from", "alice"), ("to", "bob")].into_iter().collect();
        assert_eq!(reversed, sample());
        assert_eq!(reversed.canonical_bytes(), sample().canonical_bytes());
    }

    #[test]
    fn test_hash_vectors() {
        assert_eq!(
            hex::encode(sample().hash(DigestScheme::DoubleSha256)),
            "1539aa060ac7a897d4d719829ee51905f9c13284ec86d5d03c276957d4f40bcd"
        );
        assert_eq!(
            hex::encode(sample().hash(DigestScheme::Keccak256)),
            "68de0745779e334c3f1d92a26733bed0c8b6dcf550ebfb77862e85adf074487d"
        );
    }

    #[test]
    fn test_length_prefix_prevents_ambiguity() {
        // {"ab": "c"} và {"a": "bc"} không được cho cùng bytes
        let a = TransactionFields::new().with("ab", "c");
        let b = TransactionFields::new().with("a", "bc");
        assert_ne!(a.canonical_bytes(), b.canonical_bytes());
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, r#"{"amount":"1000","from":"alice","to":"bob"}"#);
        let back: TransactionFields = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_empty() {
        assert!(TransactionFields::new().canonical_bytes().is_empty());
    }
}
