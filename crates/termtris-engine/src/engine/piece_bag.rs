use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
    seq::SliceRandom,
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{ParsePieceSeedError, PieceKind};

/// Supplies piece kinds using the 7-bag randomization algorithm.
///
/// # 7-Bag System
///
/// 1. A "bag" holds one of each of the 7 piece kinds
/// 2. The bag is shuffled uniformly (every one of the 5040 orders is equally likely)
/// 3. Kinds are drawn from the bag until it is exhausted
/// 4. An exhausted bag is replaced by a fresh shuffle before the next draw
///
/// Every run of 7 draws starting at a bag boundary is therefore a permutation of all
/// kinds. The same kind can close one bag and open the next, so at most two equal
/// kinds appear back to back.
///
/// # Example
///
/// ```
/// use termtris_engine::PieceBag;
///
/// let mut bag = PieceBag::new();
/// let mut first_bag: Vec<_> = (0..7).map(|_| bag.draw()).collect();
/// first_bag.sort_by_key(|kind| *kind as u8);
/// first_bag.dedup();
/// assert_eq!(first_bag.len(), 7);
/// ```
#[derive(Debug, Clone)]
pub struct PieceBag {
    rng: Pcg32,
    pieces: [PieceKind; PieceKind::LEN],
    // Index of the next piece to hand out; counts down and goes negative when exhausted.
    countdown: isize,
    bag_count: u64,
}

impl Default for PieceBag {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit (16-byte) seed for the bag's random number generator. The same seed
/// always produces the same sequence of kinds.
///
/// Seeds print and parse as 32 hexadecimal digits.
///
/// # Example
///
/// ```
/// use termtris_engine::{PieceBag, PieceSeed};
///
/// let seed: PieceSeed = "0123456789abcdeffedcba9876543210".parse().unwrap();
/// let mut bag1 = PieceBag::with_seed(seed);
/// let mut bag2 = PieceBag::with_seed(seed);
/// assert_eq!(bag1.draw(), bag2.draw());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = u128::from_be_bytes(self.0);
        write!(f, "{num:032x}")
    }
}

impl FromStr for PieceSeed {
    type Err = ParsePieceSeedError;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        if hex_str.len() != 32 {
            return Err(ParsePieceSeedError::InvalidLength { len: hex_str.len() });
        }
        let num =
            u128::from_str_radix(hex_str, 16).map_err(|_| ParsePieceSeedError::InvalidDigit {
                seed: hex_str.to_owned(),
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
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values using the standard random distribution.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}

impl PieceBag {
    /// Creates a new bag with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    ///
    /// No bag is shuffled until the first draw.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        Self {
            rng: Pcg32::from_seed(seed.0),
            pieces: PieceKind::ALL,
            countdown: -1,
            bag_count: 0,
        }
    }

    /// Regenerates the bag as a fresh permutation of all kinds.
    fn refill(&mut self) {
        self.pieces = PieceKind::ALL;
        self.pieces.shuffle(&mut self.rng);
        self.countdown = 6;
        self.bag_count += 1;
        log::trace!("shuffled bag #{}: {:?}", self.bag_count, self.pieces);
    }

    /// Draws the next kind, shuffling a new bag first if the current one is exhausted.
    pub fn draw(&mut self) -> PieceKind {
        if self.countdown < 0 {
            self.refill();
        }
        #[expect(clippy::cast_sign_loss)]
        let kind = self.pieces[self.countdown as usize];
        self.countdown -= 1;
        kind
    }

    /// Number of bags shuffled so far.
    #[must_use]
    pub fn bag_count(&self) -> u64 {
        self.bag_count
    }
}
