//! Reversible id ↔ short code transform.
//!
//! Ids are first scrambled by reversing their low [`BLOCK_SIZE`] bits, then
//! rendered in base 31 over [`ALPHABET`] and left-padded with the zero symbol.
//! Consecutive counter values therefore produce unrelated-looking codes while
//! staying fully reversible.

use thiserror::Error;

/// Symbols used for rendering, in digit order. Vowels and look-alikes are left out.
pub const ALPHABET: &[u8; 31] = b"mn6j2c4rv8bpygw95z7hsdaetxuk3fq";

/// Number of low-order bits scrambled before rendering.
pub const BLOCK_SIZE: u32 = 24;

const BASE: u64 = ALPHABET.len() as u64;
const BLOCK_MASK: u64 = (1 << BLOCK_SIZE) - 1;

/// Digits needed to render `u64::MAX` in base 31.
pub const MAX_DIGITS: usize = 13;

/// Errors returned by [`IdCodec::decode`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("short code is empty")]
    Empty,

    #[error("short code is {length} characters long, at most {max} are allowed")]
    TooLong { length: usize, max: usize },

    #[error("invalid character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("short code does not fit in a 64-bit id")]
    Overflow,

    #[error("short code is not in canonical form, expected {expected:?}")]
    NonCanonical { expected: String },
}

/// Stateless codec between numeric ids and short codes.
///
/// # Examples
///
/// ```ignore
/// let codec = IdCodec::new(6);
/// let code = codec.encode(1);
/// assert_eq!(code.len(), 6);
/// assert_eq!(codec.decode(&code), Ok(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdCodec {
    min_length: usize,
}

impl IdCodec {
    /// Creates a codec padding every code to at least `min_length` characters.
    pub fn new(min_length: usize) -> Self {
        Self { min_length }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    /// Longest input [`decode`](Self::decode) will look at.
    pub fn max_length(&self) -> usize {
        self.min_length.max(MAX_DIGITS)
    }

    /// Encodes `id` into a code of at least [`min_length`](Self::min_length) characters.
    pub fn encode(&self, id: u64) -> String {
        let mut value = scramble(id);
        let mut digits = Vec::with_capacity(self.max_length());

        while value > 0 {
            digits.push(ALPHABET[(value % BASE) as usize]);
            value /= BASE;
        }
        while digits.len() < self.min_length {
            digits.push(ALPHABET[0]);
        }
        digits.reverse();

        digits.into_iter().map(char::from).collect()
    }

    /// Decodes a short code back into the id it was produced from.
    ///
    /// # Errors
    ///
    /// Returns a [`CodecError`] if the code is empty, longer than
    /// [`max_length`](Self::max_length), uses symbols outside [`ALPHABET`],
    /// overflows `u64`, or is not exactly what [`encode`](Self::encode)
    /// would produce for the decoded id.
    pub fn decode(&self, code: &str) -> Result<u64, CodecError> {
        if code.is_empty() {
            return Err(CodecError::Empty);
        }

        let max = self.max_length();
        let length = code.chars().count();
        if length > max {
            return Err(CodecError::TooLong { length, max });
        }

        let mut value: u64 = 0;
        for (position, character) in code.chars().enumerate() {
            let digit = digit_of(character)
                .ok_or(CodecError::InvalidCharacter { character, position })?;
            value = value
                .checked_mul(BASE)
                .and_then(|v| v.checked_add(digit))
                .ok_or(CodecError::Overflow)?;
        }

        let id = scramble(value);

        let expected = self.encode(id);
        if expected != code {
            return Err(CodecError::NonCanonical { expected });
        }

        Ok(id)
    }
}

/// Reverses the low [`BLOCK_SIZE`] bits, leaving the rest untouched.
///
/// The transform is its own inverse.
fn scramble(n: u64) -> u64 {
    let low = n & BLOCK_MASK;
    let reversed = low.reverse_bits() >> (u64::BITS - BLOCK_SIZE);
    (n & !BLOCK_MASK) | reversed
}

fn digit_of(character: char) -> Option<u64> {
    if !character.is_ascii() {
        return None;
    }
    ALPHABET
        .iter()
        .position(|&symbol| symbol == character as u8)
        .map(|index| index as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_scramble_is_an_involution() {
        for n in [0, 1, 2, 3, 255, 1 << 23, BLOCK_MASK, 1 << 40, u64::MAX] {
            assert_eq!(scramble(scramble(n)), n);
        }
    }

    #[test]
    fn test_scramble_reverses_low_block() {
        assert_eq!(scramble(1), 1 << 23);
        assert_eq!(scramble(1 << 24), 1 << 24);
    }

    #[test]
    fn test_encode_pads_to_min_length() {
        let codec = IdCodec::new(6);
        assert_eq!(codec.encode(0), "mmmmmm");
        assert_eq!(codec.encode(1).len(), 6);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let codec = IdCodec::new(6);
        assert_eq!(codec.encode(42), codec.encode(42));
    }

    #[test]
    fn test_round_trip_small_ids() {
        let codec = IdCodec::new(6);
        for id in 0..5_000 {
            let code = codec.encode(id);
            assert!(code.len() >= 6);
            assert_eq!(codec.decode(&code), Ok(id), "code {code}");
        }
    }

    #[test]
    fn test_round_trip_large_ids() {
        let codec = IdCodec::new(6);
        for id in [887_503_680, 1 << 32, 1 << 63, u64::MAX - 1, u64::MAX] {
            let code = codec.encode(id);
            assert!(code.len() <= MAX_DIGITS);
            assert_eq!(codec.decode(&code), Ok(id));
        }
    }

    #[test]
    fn test_first_issued_ids_produce_six_characters() {
        let codec = IdCodec::new(6);
        let mut seen = HashSet::new();

        for id in 1..=10_000 {
            let code = codec.encode(id);
            assert_eq!(code.len(), 6);
            assert!(seen.insert(code));
        }
    }

    #[test]
    fn test_codes_only_use_alphabet() {
        let codec = IdCodec::new(6);
        let code = codec.encode(123_456_789);
        assert!(code.bytes().all(|b| ALPHABET.contains(&b)));
    }

    #[test]
    fn test_larger_min_length() {
        let codec = IdCodec::new(16);
        let code = codec.encode(u64::MAX);
        assert_eq!(code.len(), 16);
        assert_eq!(codec.max_length(), 16);
        assert_eq!(codec.decode(&code), Ok(u64::MAX));
    }

    #[test]
    fn test_decode_empty() {
        assert_eq!(IdCodec::new(6).decode(""), Err(CodecError::Empty));
    }

    #[test]
    fn test_decode_too_long() {
        let codec = IdCodec::new(6);
        let result = codec.decode(&"n".repeat(14));
        assert_eq!(result, Err(CodecError::TooLong { length: 14, max: 13 }));
    }

    #[test]
    fn test_decode_invalid_character() {
        let codec = IdCodec::new(6);
        assert_eq!(
            codec.decode("ms34i2"),
            Err(CodecError::InvalidCharacter {
                character: 'i',
                position: 4
            })
        );
        assert!(matches!(
            codec.decode("mmmmmé"),
            Err(CodecError::InvalidCharacter { .. })
        ));
        assert!(matches!(
            codec.decode("MMMMMM"),
            Err(CodecError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn test_decode_overflow() {
        let codec = IdCodec::new(6);
        assert_eq!(codec.decode(&"q".repeat(13)), Err(CodecError::Overflow));
    }

    #[test]
    fn test_decode_rejects_extra_padding() {
        let codec = IdCodec::new(6);
        let padded = format!("m{}", codec.encode(7));
        assert!(matches!(
            codec.decode(&padded),
            Err(CodecError::NonCanonical { .. })
        ));
    }

    #[test]
    fn test_decode_rejects_short_codes() {
        let codec = IdCodec::new(6);
        assert!(matches!(
            codec.decode("n"),
            Err(CodecError::NonCanonical { .. })
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(CodecError::Empty.to_string(), "short code is empty");
        assert!(
            CodecError::Overflow
                .to_string()
                .contains("64-bit")
        );
    }
}
