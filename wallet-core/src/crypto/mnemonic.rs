// wallet-core/src/crypto/mnemonic.rs
//
// SeedDerivation - BIP-39 Mnemonic
// Chuẩn: BIP-39 (Mnemonic), PBKDF2-HMAC-SHA512 2048 rounds (Seed Derivation)

use crate::error::{MnemonicError, WalletError, WalletResult};
use bip39::{Language, Mnemonic};
use rand::{rngs::OsRng, RngCore};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Số lượng words hỗ trợ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordCount {
    /// 12 words (128-bit entropy)
    Twelve = 12,
    /// 24 words (256-bit entropy)
    TwentyFour = 24,
}

impl WordCount {
    /// Lấy số bytes entropy cần thiết
    #[inline]
    pub const fn entropy_bytes(self) -> usize {
        match self {
            WordCount::Twelve => 16,
            WordCount::TwentyFour => 32,
        }
    }

    /// Map entropy size (bits) → word count. Only 128 and 256 are accepted.
    pub fn from_entropy_bits(bits: usize) -> WalletResult<Self> {
        match bits {
            128 => Ok(WordCount::Twelve),
            256 => Ok(WordCount::TwentyFour),
            other => Err(MnemonicError::InvalidEntropyBits(other).into()),
        }
    }

    fn from_words(count: usize) -> WalletResult<Self> {
        match count {
            12 => Ok(WordCount::Twelve),
            24 => Ok(WordCount::TwentyFour),
            other => Err(MnemonicError::InvalidWordCount(other).into()),
        }
    }
}

/// Wallet Mnemonic - BIP-39 phrase, immutable sau khi tạo
///
/// # Security Architecture
/// - **ZeroizeOnDrop**: Phrase được tự động ghi đè bằng 0 khi struct bị drop
/// - **CSPRNG**: Sử dụng `OsRng` (OS-level cryptographically secure RNG)
/// - **No Debug Leak**: Custom Debug impl không hiển thị phrase
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct WalletMnemonic {
    inner: Mnemonic,
    phrase: String,
    #[zeroize(skip)]
    word_count: WordCount,
}

// Custom Debug - KHÔNG BAO GIỜ hiển thị mnemonic phrase
impl std::fmt::Debug for WalletMnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletMnemonic")
            .field("word_count", &(self.word_count as usize))
            .field("phrase", &"[REDACTED]")
            .finish()
    }
}

impl WalletMnemonic {
    // =========================================================================
    // CONSTRUCTORS
    // =========================================================================

    /// Sinh mnemonic mới từ `entropy_bits` (128 → 12 words, 256 → 24 words)
    pub fn generate(entropy_bits: usize) -> WalletResult<Self> {
        Self::with_word_count(WordCount::from_entropy_bits(entropy_bits)?)
    }

    /// Tạo mnemonic với số lượng words cho trước
    pub fn with_word_count(word_count: WordCount) -> WalletResult<Self> {
        let entropy_size = word_count.entropy_bytes();

        // Stack-allocated entropy buffer (max 32 bytes)
        let mut entropy = [0u8; 32];
        OsRng.fill_bytes(&mut entropy[..entropy_size]);

        let mnemonic = Mnemonic::from_entropy_in(Language::English, &entropy[..entropy_size])
            .map_err(|e| MnemonicError::Bip39Error(e.to_string()));

        // Zeroize entropy ngay sau khi sử dụng
        entropy.zeroize();

        let inner = mnemonic?;
        Ok(Self {
            phrase: inner.to_string(),
            inner,
            word_count,
        })
    }

    /// Khôi phục mnemonic từ phrase có sẵn
    ///
    /// # Validation
    /// - Kiểm tra số lượng words (12 hoặc 24)
    /// - Kiểm tra từng word có trong BIP-39 English wordlist
    /// - Kiểm tra checksum
    pub fn from_phrase(phrase: &str) -> WalletResult<Self> {
        // Normalize whitespace và count words
        let normalized = phrase.split_whitespace().collect::<Vec<_>>();
        let word_count = WordCount::from_words(normalized.len())?;

        let normalized_phrase = normalized.join(" ");
        let inner = Mnemonic::parse_in_normalized(Language::English, &normalized_phrase)
            .map_err(|e| {
                let err = match e {
                    bip39::Error::UnknownWord(idx) => MnemonicError::UnknownWord(
                        normalized.get(idx).map(|w| w.to_string()).unwrap_or_default(),
                    ),
                    bip39::Error::InvalidChecksum => MnemonicError::ChecksumFailed,
                    bip39::Error::BadWordCount(n) => MnemonicError::InvalidWordCount(n),
                    other => MnemonicError::Bip39Error(other.to_string()),
                };
                WalletError::Mnemonic(err)
            })?;

        Ok(Self {
            inner,
            phrase: normalized_phrase,
            word_count,
        })
    }

    // =========================================================================
    // GETTERS
    // =========================================================================

    /// Lấy mnemonic phrase
    ///
    /// # Warning
    /// Cẩn thận khi hiển thị hoặc log giá trị này!
    #[inline]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }

    #[inline]
    pub fn word_count(&self) -> usize {
        self.word_count as usize
    }

    pub fn words(&self) -> Vec<&str> {
        self.phrase.split_whitespace().collect()
    }

    /// Lấy strength (bit) của mnemonic
    pub fn strength_bits(&self) -> usize {
        self.word_count.entropy_bytes() * 8
    }

    // =========================================================================
    // SEED DERIVATION
    // =========================================================================

    /// Tạo seed 64 bytes (PBKDF2-HMAC-SHA512, salt = "mnemonic" + passphrase, 2048 rounds)
    ///
    /// # Security Note
    /// Passphrase khác với password. Nếu mất passphrase, không thể khôi phục ví
    /// ngay cả khi có mnemonic phrase.
    pub fn to_seed(&self, passphrase: Option<&str>) -> Zeroizing<[u8; 64]> {
        Zeroizing::new(self.inner.to_seed(passphrase.unwrap_or("")))
    }

    // =========================================================================
    // VALIDATION
    // =========================================================================

    /// Kiểm tra phrase có hợp lệ không: word count, wordlist, checksum.
    ///
    /// Fail closed: mọi input lỗi đều trả về `false`, không bao giờ panic.
    #[inline]
    pub fn validate(phrase: &str) -> bool {
        Self::from_phrase(phrase).is_ok()
    }

    /// Kiểm tra một từ có trong BIP-39 English wordlist không
    pub fn is_valid_word(word: &str) -> bool {
        Language::English.find_word(word).is_some()
    }
}

// =============================================================================
// UNIT TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // Standard test mnemonic (from BIP-39 test vectors)
    const TEST_MNEMONIC_12: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
    const TEST_MNEMONIC_24: &str =
        "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";
    const TEST_SEED_12: &str = "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4";

    #[test]
    fn test_generate_12_words() {
        let mnemonic = WalletMnemonic::generate(128).unwrap();
        assert_eq!(mnemonic.word_count(), 12);
        assert!(WalletMnemonic::validate(mnemonic.phrase()));
    }

    #[test]
    fn test_generate_24_words() {
        let mnemonic = WalletMnemonic::generate(256).unwrap();
        assert_eq!(mnemonic.word_count(), 24);
        assert!(WalletMnemonic::validate(mnemonic.phrase()));
    }

    #[test]
    fn test_generate_rejects_other_sizes() {
        assert_eq!(
            WalletMnemonic::generate(160).unwrap_err(),
            WalletError::Mnemonic(MnemonicError::InvalidEntropyBits(160))
        );
    }

    #[test]
    fn test_from_phrase_24_words() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_24).unwrap();
        assert_eq!(mnemonic.word_count(), 24);
        assert_eq!(mnemonic.strength_bits(), 256);
    }

    #[test]
    fn test_from_phrase_normalizes_whitespace() {
        let messy_phrase =
            "  abandon  abandon   abandon abandon abandon abandon abandon abandon abandon abandon abandon about  ";
        let mnemonic = WalletMnemonic::from_phrase(messy_phrase).unwrap();
        assert_eq!(mnemonic.phrase(), TEST_MNEMONIC_12);
    }

    #[test]
    fn test_from_phrase_invalid_word_count() {
        let result = WalletMnemonic::from_phrase("abandon abandon abandon");
        assert!(matches!(
            result,
            Err(WalletError::Mnemonic(MnemonicError::InvalidWordCount(3)))
        ));
    }

    #[test]
    fn test_from_phrase_rejects_15_words() {
        // Valid BIP-39 length, but outside the supported {12, 24}
        let fifteen = "abandon ".repeat(14) + "address";
        assert!(matches!(
            WalletMnemonic::from_phrase(&fifteen),
            Err(WalletError::Mnemonic(MnemonicError::InvalidWordCount(15)))
        ));
    }

    #[test]
    fn test_from_phrase_invalid_word() {
        let invalid =
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon invalid";
        assert_eq!(
            WalletMnemonic::from_phrase(invalid).unwrap_err(),
            WalletError::Mnemonic(MnemonicError::UnknownWord("invalid".into()))
        );
    }

    #[test]
    fn test_from_phrase_bad_checksum() {
        let bad =
            "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon";
        assert_eq!(
            WalletMnemonic::from_phrase(bad).unwrap_err(),
            WalletError::Mnemonic(MnemonicError::ChecksumFailed)
        );
    }

    #[test]
    fn test_to_seed_vector() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let seed = mnemonic.to_seed(None);
        assert_eq!(hex::encode(&seed[..]), TEST_SEED_12);
    }

    #[test]
    fn test_to_seed_with_passphrase_vector() {
        let mnemonic = WalletMnemonic::from_phrase(
            "deer begin security project car pyramid inmate use pupil leopard palace title",
        )
        .unwrap();
        assert_eq!(
            hex::encode(&mnemonic.to_seed(Some("TREZOR"))[..]),
            "88871baa8a21697220c879eb1ed00e2e740d61328dc060974facd596858679380d15fa259b08325accd11462cd061c10bb17526e93748f88f645dfa0ff230236"
        );
    }

    #[test]
    fn test_to_seed_with_passphrase() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let seed_no_pass = mnemonic.to_seed(None);
        let seed_with_pass = mnemonic.to_seed(Some("TREZOR"));

        // Seeds phải khác nhau
        assert_ne!(&seed_no_pass[..], &seed_with_pass[..]);
        // Empty passphrase == no passphrase
        assert_eq!(&seed_no_pass[..], &mnemonic.to_seed(Some(""))[..]);
    }

    #[test]
    fn test_validate_fails_closed() {
        assert!(WalletMnemonic::validate(TEST_MNEMONIC_12));
        assert!(WalletMnemonic::validate(TEST_MNEMONIC_24));
        assert!(!WalletMnemonic::validate("invalid mnemonic phrase"));
        assert!(!WalletMnemonic::validate(""));
        assert!(!WalletMnemonic::validate("abandon"));
        assert!(!WalletMnemonic::validate("ABANDON ".repeat(11).as_str()));
        assert!(!WalletMnemonic::validate("\u{0}\u{1} 💥"));
    }

    #[test]
    fn test_is_valid_word() {
        assert!(WalletMnemonic::is_valid_word("abandon"));
        assert!(WalletMnemonic::is_valid_word("zoo"));
        assert!(!WalletMnemonic::is_valid_word("invalidword"));
        // "hello" nằm trong wordlist BIP-39
        assert!(WalletMnemonic::is_valid_word("hello"));
        assert!(!WalletMnemonic::is_valid_word("hellox"));
        assert!(!WalletMnemonic::is_valid_word("bitcoin"));
    }

    #[test]
    fn test_words() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let words = mnemonic.words();
        assert_eq!(words.len(), 12);
        assert_eq!(words[0], "abandon");
        assert_eq!(words[11], "about");
    }

    #[test]
    fn test_debug_does_not_leak_phrase() {
        let mnemonic = WalletMnemonic::from_phrase(TEST_MNEMONIC_12).unwrap();
        let debug_output = format!("{:?}", mnemonic);

        assert!(!debug_output.contains("abandon"));
        assert!(debug_output.contains("REDACTED"));
        assert!(debug_output.contains("word_count: 12"));
    }

    #[test]
    fn test_unique_generation() {
        let m1 = WalletMnemonic::generate(128).unwrap();
        let m2 = WalletMnemonic::generate(128).unwrap();
        assert_ne!(m1.phrase(), m2.phrase());
    }
}
