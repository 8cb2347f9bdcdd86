// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lane vector algebra.
//!
//! A [`Group`] packs one bit from each of `P::GROUP_PARALLELISM` independent
//! lanes into 32-bit words. Lane `32 * w + b` lives in bit `b` of word `w`.
//! Every operation acts on each bit position independently, so a boolean
//! network expressed with [`Group::and`], [`Group::or`], [`Group::xor`] and
//! [`Group::not`] is evaluated for all lanes at once.

use crate::error::{Error, Result};
use crate::params::{Parallelism, WORD_BITS};
use crate::words;
use core::ops::{BitAnd, BitOr, BitXor, Not};
use rand::CryptoRng;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;

/// One bit per lane across `P::GROUP_PARALLELISM` lanes.
pub struct Group<P: Parallelism> {
    words: P::Words,
}

impl<P: Parallelism> Clone for Group<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Parallelism> Copy for Group<P> {}

impl<P: Parallelism> PartialEq for Group<P> {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl<P: Parallelism> Eq for Group<P> {}

impl<P: Parallelism> core::hash::Hash for Group<P> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        core::hash::Hash::hash(&self.words, state);
    }
}

impl<P: Parallelism> Default for Group<P> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<P: Parallelism> core::fmt::Debug for Group<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Group")
            .field("variant", &P::NAME)
            .field("bytes", &hex::encode(self.to_bytes()))
            .finish()
    }
}

impl<P: Parallelism> Group<P> {
    /// All lanes false.
    #[inline(always)]
    pub fn zero() -> Self {
        Self {
            words: words::splat::<P>(0),
        }
    }

    /// All lanes true.
    #[inline(always)]
    pub fn ones() -> Self {
        Self {
            words: words::splat::<P>(u32::MAX),
        }
    }

    /// Per-lane AND.
    #[inline(always)]
    pub fn and(self, other: Self) -> Self {
        Self {
            words: words::zip_with::<P>(self.words, other.words, |a, b| a & b),
        }
    }

    /// Per-lane OR.
    #[inline(always)]
    pub fn or(self, other: Self) -> Self {
        Self {
            words: words::zip_with::<P>(self.words, other.words, |a, b| a | b),
        }
    }

    /// Per-lane XOR.
    #[inline(always)]
    pub fn xor(self, other: Self) -> Self {
        Self {
            words: words::zip_with::<P>(self.words, other.words, |a, b| a ^ b),
        }
    }

    /// Per-lane complement.
    #[inline(always)]
    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self {
            words: words::map::<P>(self.words, |a| !a),
        }
    }

    /// Wrap raw storage words.
    pub fn from_words(words: P::Words) -> Self {
        Self { words }
    }

    /// Raw storage words.
    pub fn words(&self) -> P::Words {
        self.words
    }

    /// Little-endian byte image: lowest address holds lanes 0..8.
    pub fn to_bytes(&self) -> P::Bytes {
        words::to_bytes::<P>(&self.words)
    }

    /// Inverse of [`Group::to_bytes`].
    pub fn from_bytes(bytes: &P::Bytes) -> Self {
        Self {
            words: words::from_bytes::<P>(bytes),
        }
    }

    /// Decode from a slice of exactly `P::GROUP_BYTES` bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            words: words::from_slice::<P>(bytes)?,
        })
    }

    /// Build a group lane by lane.
    pub fn from_fn(mut f: impl FnMut(usize) -> bool) -> Self {
        let mut words = P::Words::default();
        for (w, word) in words.as_mut().iter_mut().enumerate() {
            for b in 0..WORD_BITS {
                *word |= u32::from(f(w * WORD_BITS + b)) << b;
            }
        }
        Self { words }
    }

    /// Read a single lane.
    pub fn lane(&self, lane: usize) -> Result<bool> {
        let (w, b) = Self::locate(lane)?;
        Ok((self.words.as_ref()[w] >> b) & 1 == 1)
    }

    /// Copy of `self` with one lane replaced.
    pub fn with_lane(self, lane: usize, value: bool) -> Result<Self> {
        let (w, b) = Self::locate(lane)?;
        let mut words = self.words;
        let word = &mut words.as_mut()[w];
        *word = (*word & !(1 << b)) | (u32::from(value) << b);
        Ok(Self { words })
    }

    /// Uniformly random lanes.
    pub fn random(rng: &mut impl CryptoRng) -> Self {
        let mut bytes = P::Bytes::default();
        rng.fill_bytes(bytes.as_mut());
        Self::from_bytes(&bytes)
    }

    fn locate(lane: usize) -> Result<(usize, usize)> {
        if lane >= P::GROUP_PARALLELISM {
            return Err(Error::LaneOutOfRange {
                lane,
                lanes: P::GROUP_PARALLELISM,
            });
        }
        Ok((lane / WORD_BITS, lane % WORD_BITS))
    }
}

impl<P: Parallelism> BitAnd for Group<P> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.and(rhs)
    }
}

impl<P: Parallelism> BitOr for Group<P> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.or(rhs)
    }
}

impl<P: Parallelism> BitXor for Group<P> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        self.xor(rhs)
    }
}

impl<P: Parallelism> Not for Group<P> {
    type Output = Self;

    fn not(self) -> Self {
        Group::not(self)
    }
}

impl<P: Parallelism> ConstantTimeEq for Group<P> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.words.as_ref().ct_eq(other.words.as_ref())
    }
}

impl<P: Parallelism> ConditionallySelectable for Group<P> {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            words: words::zip_with::<P>(a.words, b.words, |x, y| {
                u32::conditional_select(&x, &y, choice)
            }),
        }
    }
}

impl<P: Parallelism> Zeroize for Group<P> {
    fn zeroize(&mut self) {
        self.words.as_mut().zeroize();
    }
}

#[cfg(feature = "serde")]
impl<P: Parallelism> serde::Serialize for Group<P> {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serdect::slice::serialize_hex_lower_or_bin(&self.to_bytes(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, P: Parallelism> serde::Deserialize<'de> for Group<P> {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        Self::from_slice(&bytes).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Parallel32, Parallel64, Parallel128};

    #[test]
    fn constants() {
        assert_eq!(Group::<Parallel64>::zero().words(), [0, 0]);
        assert_eq!(Group::<Parallel64>::ones().words(), [u32::MAX; 2]);
        assert_eq!(Group::<Parallel64>::default(), Group::zero());
    }

    #[test]
    fn ops_match_named_combinators() {
        let mut rng = rand::rng();
        let a = Group::<Parallel64>::random(&mut rng);
        let b = Group::<Parallel64>::random(&mut rng);
        assert_eq!(a & b, a.and(b));
        assert_eq!(a | b, a.or(b));
        assert_eq!(a ^ b, a.xor(b));
        assert_eq!(!a, a.not());
    }

    #[test]
    fn lanes_do_not_interact() {
        let a = Group::<Parallel64>::from_words([0x8000_0001, 0x0000_0001]);
        let b = Group::<Parallel64>::from_words([0x0000_0001, 0x8000_0000]);
        assert_eq!(a.and(b).words(), [0x0000_0001, 0]);
        assert_eq!(a.or(b).words(), [0x8000_0001, 0x8000_0001]);
        assert_eq!(a.xor(b).words(), [0x8000_0000, 0x8000_0001]);
    }

    #[test]
    fn lane_indexing() {
        let g = Group::<Parallel64>::zero()
            .with_lane(0, true)
            .and_then(|g| g.with_lane(33, true))
            .and_then(|g| g.with_lane(63, true))
            .expect("lanes in range");
        assert_eq!(g.words(), [0x0000_0001, 0x8000_0002]);
        assert!(g.lane(33).expect("lane"));
        assert!(!g.lane(32).expect("lane"));
        assert_eq!(
            g.lane(64),
            Err(Error::LaneOutOfRange {
                lane: 64,
                lanes: 64
            })
        );
        let cleared = g.with_lane(33, false).expect("lane");
        assert_eq!(cleared.words(), [0x0000_0001, 0x8000_0000]);
    }

    #[test]
    fn from_fn_matches_lane() {
        let g = Group::<Parallel128>::from_fn(|lane| lane % 3 == 0);
        for lane in 0..Parallel128::GROUP_PARALLELISM {
            assert_eq!(g.lane(lane), Ok(lane % 3 == 0));
        }
    }

    #[test]
    fn byte_image_is_little_endian() {
        let g = Group::<Parallel64>::from_fn(|lane| lane == 0 || lane == 40);
        assert_eq!(hex::encode(g.to_bytes()), "0100000000010000");
        assert_eq!(Group::from_bytes(&g.to_bytes()), g);
    }

    #[test]
    fn constant_time_helpers() {
        let a = Group::<Parallel32>::ones();
        let b = Group::<Parallel32>::zero();
        assert!(bool::from(a.ct_eq(&a)));
        assert!(!bool::from(a.ct_eq(&b)));
        assert_eq!(Group::conditional_select(&a, &b, Choice::from(0)), a);
        assert_eq!(Group::conditional_select(&a, &b, Choice::from(1)), b);
    }

    #[test]
    fn zeroize_clears_lanes() {
        let mut g = Group::<Parallel64>::ones();
        g.zeroize();
        assert_eq!(g, Group::zero());
    }

    #[test]
    fn debug_shows_variant_and_hex() {
        let s = format!("{:?}", Group::<Parallel32>::ones());
        assert!(s.contains("PARALLEL_032_INT"));
        assert!(s.contains("ffffffff"));
    }
}
