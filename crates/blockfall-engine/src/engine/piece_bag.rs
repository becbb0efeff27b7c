use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::piece::PieceKind;

/// Piece generator using the 7-bag randomization algorithm.
///
/// # 7-Bag System
///
/// 1. The bag is filled with one of each of the 7 piece kinds
/// 2. The bag is shuffled (Fisher–Yates)
/// 3. Pieces are drawn one at a time until the bag is empty
/// 4. Only then is a fresh shuffled bag drawn
///
/// Within every group of 7 draws starting at a refill, each kind appears
/// exactly once, so no kind can be absent for more than 12 draws.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceBag, PieceKind};
///
/// let mut bag = PieceBag::new();
/// let mut drawn: Vec<PieceKind> = bag.by_ref().take(7).collect();
/// drawn.sort_by_key(|kind| *kind as u8);
/// assert_eq!(drawn, PieceKind::ALL);
/// ```
#[derive(Debug, Clone)]
pub struct PieceBag {
    rng: Pcg32,
    bag: ArrayVec<PieceKind, { PieceKind::LEN }>,
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceBag {
    /// Creates a bag seeded from the thread-local random generator.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            bag: ArrayVec::new(),
        }
    }

    fn refill(&mut self) {
        let mut kinds = PieceKind::ALL;
        kinds.shuffle(&mut self.rng);
        self.bag.extend(kinds);
    }

    /// Draws the next piece, refilling the bag first if it is empty.
    pub fn pop_next(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.refill();
        }
        self.bag.pop().expect("piece bag is refilled before drawing")
    }

    /// Returns how many pieces are left before the next refill.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.bag.len()
    }
}

/// Endless stream of pieces.
impl Iterator for PieceBag {
    type Item = PieceKind;

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.pop_next())
    }
}

/// Seed for deterministic piece generation.
///
/// This is a 128-bit (16-byte) seed for the bag's random generator. The
/// same seed always produces the same piece sequence, which makes sessions
/// reproducible for debugging and testing.
///
/// Displayed, parsed and serialized as a 32-character hex string.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceBag, PieceSeed};
///
/// let seed: PieceSeed = "0123456789abcdeffedcba9876543210".parse().unwrap();
/// let first: Vec<_> = PieceBag::with_seed(seed).take(14).collect();
/// let second: Vec<_> = PieceBag::with_seed(seed).take(14).collect();
/// assert_eq!(first, second);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParsePieceSeedError {
    #[display("invalid hex: expected 32 characters, got {_0}")]
    InvalidLength(#[error(not(source))] usize),
    #[display("invalid hex: unexpected character '{_0}'")]
    InvalidDigit(#[error(not(source))] char),
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let len = s.chars().count();
        if len != 32 {
            return Err(ParsePieceSeedError::InvalidLength(len));
        }
        let num = s.chars().try_fold(0_u128, |acc, c| {
            let digit = c
                .to_digit(16)
                .ok_or(ParsePieceSeedError::InvalidDigit(c))?;
            Ok((acc << 4) | u128::from(digit))
        })?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values with `rng.random()`.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SEED: PieceSeed = PieceSeed::from_bytes([
        0x12, 0x34, 0x56, 0x78, 0x9A, 0xBC, 0xDE, 0xF0, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77,
        0x88,
    ]);

    fn sorted(mut kinds: Vec<PieceKind>) -> Vec<PieceKind> {
        kinds.sort_by_key(|kind| *kind as u8);
        kinds
    }

    #[test]
    fn test_every_refill_cycle_is_a_permutation() {
        let mut bag = PieceBag::with_seed(SEED);
        for cycle in 0..50 {
            let drawn: Vec<_> = (0..PieceKind::LEN).map(|_| bag.pop_next()).collect();
            assert_eq!(sorted(drawn), PieceKind::ALL, "cycle {cycle}");
        }
    }

    #[test]
    fn test_random_bags_are_permutations() {
        for _ in 0..20 {
            let mut bag = PieceBag::new();
            let drawn: Vec<_> = bag.by_ref().take(PieceKind::LEN).collect();
            assert_eq!(sorted(drawn), PieceKind::ALL);
        }
    }

    #[test]
    fn test_refill_only_when_empty() {
        let mut bag = PieceBag::with_seed(SEED);
        assert_eq!(bag.remaining(), 0);
        bag.pop_next();
        assert_eq!(bag.remaining(), 6);
        for _ in 0..6 {
            bag.pop_next();
        }
        assert_eq!(bag.remaining(), 0);
        bag.pop_next();
        assert_eq!(bag.remaining(), 6);
    }

    #[test]
    fn test_deterministic_piece_generation() {
        let first: Vec<_> = PieceBag::with_seed(SEED).take(28).collect();
        let second: Vec<_> = PieceBag::with_seed(SEED).take(28).collect();
        assert_eq!(first, second);
    }

    mod piece_seed_serialization {
        use super::*;

        #[test]
        fn test_format_is_32_char_hex_string() {
            let seed: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&seed).unwrap();
            let hex_str = serialized.trim_matches('"');
            assert_eq!(hex_str.len(), 32);
            assert!(hex_str.chars().all(|c| c.is_ascii_hexdigit()));

            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();
            assert_eq!(deserialized, seed);
        }

        #[test]
        fn test_known_values() {
            let zeros = PieceSeed::from_bytes([0; 16]);
            assert_eq!(zeros.to_string(), "00000000000000000000000000000000");

            let ones = PieceSeed::from_bytes([0xFF; 16]);
            assert_eq!(
                serde_json::to_string(&ones).unwrap(),
                "\"ffffffffffffffffffffffffffffffff\""
            );
        }

        #[test]
        fn test_big_endian_byte_order() {
            let seed = PieceSeed::from_bytes([
                0x01, 0x23, 0x45, 0x67, 0x89, 0xAB, 0xCD, 0xEF, 0xFE, 0xDC, 0xBA, 0x98, 0x76, 0x54,
                0x32, 0x10,
            ]);
            assert_eq!(seed.to_string(), "0123456789abcdeffedcba9876543210");
            assert_eq!("0123456789ABCDEFFEDCBA9876543210".parse(), Ok(seed));
        }

        #[test]
        fn test_parse_errors() {
            assert_eq!(
                "0123456789abcdef0123456789abcde".parse::<PieceSeed>(),
                Err(ParsePieceSeedError::InvalidLength(31))
            );
            assert_eq!(
                "0123456789abcdef0123456789abcdef0".parse::<PieceSeed>(),
                Err(ParsePieceSeedError::InvalidLength(33))
            );
            assert_eq!(
                "".parse::<PieceSeed>(),
                Err(ParsePieceSeedError::InvalidLength(0))
            );
            assert_eq!(
                "ghijklmnopqrstuvwxyzghijklmnopqr".parse::<PieceSeed>(),
                Err(ParsePieceSeedError::InvalidDigit('g'))
            );

            let err = serde_json::from_str::<PieceSeed>("\"+123\"").unwrap_err();
            assert!(err.to_string().contains("invalid hex"));
        }

        #[test]
        fn test_deserialized_seed_preserves_piece_generation() {
            let original: PieceSeed = rand::rng().random();
            let serialized = serde_json::to_string(&original).unwrap();
            let deserialized: PieceSeed = serde_json::from_str(&serialized).unwrap();

            let first: Vec<_> = PieceBag::with_seed(original).take(20).collect();
            let second: Vec<_> = PieceBag::with_seed(deserialized).take(20).collect();
            assert_eq!(first, second);
        }
    }
}
