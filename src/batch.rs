// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Byte lane algebra.
//!
//! A [`Batch`] packs `P::BYTES_PER_BATCH` independent byte lanes into the
//! same word storage a [`Group`](crate::Group) uses. Byte lane `i` is byte
//! `i % 4` (least significant first) of word `i / 4`.
//!
//! Shifts act on whole 32-bit storage words, exactly like the bit-level
//! stages they replace: bits shifted out of one byte lane enter its
//! neighbour. Diffusion stages isolate the bits they need with the
//! [`masks`] afterwards.

use crate::error::{Error, Result};
use crate::params::{Parallelism, WORD_BYTES};
use crate::words;
use core::ops::{BitAnd, BitOr, BitXor, Shl, Shr};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// Byte patterns replicated into every lane by the named batch masks.
pub mod masks {
    /// Bits 0, 3 and 5.
    pub const ALL_29: u8 = 0x29;
    /// Bit 1.
    pub const ALL_02: u8 = 0x02;
    /// Bit 2.
    pub const ALL_04: u8 = 0x04;
    /// Bit 4.
    pub const ALL_10: u8 = 0x10;
    /// Bit 6.
    pub const ALL_40: u8 = 0x40;
    /// Bit 7.
    pub const ALL_80: u8 = 0x80;
}

/// Replicate a byte into all four bytes of a word.
const BYTE_SPREAD: u32 = 0x0101_0101;

/// One byte per lane across `P::BYTES_PER_BATCH` lanes.
pub struct Batch<P: Parallelism> {
    words: P::Words,
}

impl<P: Parallelism> Clone for Batch<P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Parallelism> Copy for Batch<P> {}

impl<P: Parallelism> PartialEq for Batch<P> {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl<P: Parallelism> Eq for Batch<P> {}

impl<P: Parallelism> core::hash::Hash for Batch<P> {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        core::hash::Hash::hash(&self.words, state);
    }
}

impl<P: Parallelism> Default for Batch<P> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<P: Parallelism> core::fmt::Debug for Batch<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Batch")
            .field("variant", &P::NAME)
            .field("bytes", &hex::encode(self.to_bytes()))
            .finish()
    }
}

impl<P: Parallelism> Batch<P> {
    /// Every byte lane zero.
    #[inline(always)]
    pub fn zero() -> Self {
        Self::splat(0)
    }

    /// Every byte lane set to `byte`.
    #[inline(always)]
    pub fn splat(byte: u8) -> Self {
        Self {
            words: words::splat::<P>(u32::from(byte).wrapping_mul(BYTE_SPREAD)),
        }
    }

    /// [`masks::ALL_29`] in every lane.
    #[inline(always)]
    pub fn all_29() -> Self {
        Self::splat(masks::ALL_29)
    }

    /// [`masks::ALL_02`] in every lane.
    #[inline(always)]
    pub fn all_02() -> Self {
        Self::splat(masks::ALL_02)
    }

    /// [`masks::ALL_04`] in every lane.
    #[inline(always)]
    pub fn all_04() -> Self {
        Self::splat(masks::ALL_04)
    }

    /// [`masks::ALL_10`] in every lane.
    #[inline(always)]
    pub fn all_10() -> Self {
        Self::splat(masks::ALL_10)
    }

    /// [`masks::ALL_40`] in every lane.
    #[inline(always)]
    pub fn all_40() -> Self {
        Self::splat(masks::ALL_40)
    }

    /// [`masks::ALL_80`] in every lane.
    #[inline(always)]
    pub fn all_80() -> Self {
        Self::splat(masks::ALL_80)
    }

    /// Bytewise AND.
    #[inline(always)]
    pub fn and(self, other: Self) -> Self {
        Self {
            words: words::zip_with::<P>(self.words, other.words, |a, b| a & b),
        }
    }

    /// Bytewise OR.
    #[inline(always)]
    pub fn or(self, other: Self) -> Self {
        Self {
            words: words::zip_with::<P>(self.words, other.words, |a, b| a | b),
        }
    }

    /// Bytewise XOR.
    #[inline(always)]
    pub fn xor(self, other: Self) -> Self {
        Self {
            words: words::zip_with::<P>(self.words, other.words, |a, b| a ^ b),
        }
    }

    /// Logical left shift of every storage word by `n` bits.
    ///
    /// Zero-filling; `n >= 32` clears the batch.
    #[inline(always)]
    pub fn shift_left(self, n: u32) -> Self {
        Self {
            words: words::map::<P>(self.words, |a| a.checked_shl(n).unwrap_or(0)),
        }
    }

    /// Logical right shift of every storage word by `n` bits.
    ///
    /// Zero-filling; `n >= 32` clears the batch.
    #[inline(always)]
    pub fn shift_right(self, n: u32) -> Self {
        Self {
            words: words::map::<P>(self.words, |a| a.checked_shr(n).unwrap_or(0)),
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

    /// Byte lanes in order.
    pub fn to_bytes(&self) -> P::Bytes {
        words::to_bytes::<P>(&self.words)
    }

    /// Build from byte lanes in order.
    pub fn from_bytes(bytes: &P::Bytes) -> Self {
        Self {
            words: words::from_bytes::<P>(bytes),
        }
    }

    /// Decode from a slice of exactly `P::BYTES_PER_BATCH` bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            words: words::from_slice::<P>(bytes)?,
        })
    }

    /// Read byte lane `lane`.
    #[allow(clippy::cast_possible_truncation)]
    pub fn byte(&self, lane: usize) -> Result<u8> {
        if lane >= P::BYTES_PER_BATCH {
            return Err(Error::LaneOutOfRange {
                lane,
                lanes: P::BYTES_PER_BATCH,
            });
        }
        let word = self.words.as_ref()[lane / WORD_BYTES];
        Ok((word >> (8 * (lane % WORD_BYTES))) as u8)
    }
}

impl<P: Parallelism> BitAnd for Batch<P> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.and(rhs)
    }
}

impl<P: Parallelism> BitOr for Batch<P> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.or(rhs)
    }
}

impl<P: Parallelism> BitXor for Batch<P> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        self.xor(rhs)
    }
}

impl<P: Parallelism> Shl<u32> for Batch<P> {
    type Output = Self;

    fn shl(self, n: u32) -> Self {
        self.shift_left(n)
    }
}

impl<P: Parallelism> Shr<u32> for Batch<P> {
    type Output = Self;

    fn shr(self, n: u32) -> Self {
        self.shift_right(n)
    }
}

impl<P: Parallelism> ConstantTimeEq for Batch<P> {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.words.as_ref().ct_eq(other.words.as_ref())
    }
}

impl<P: Parallelism> Zeroize for Batch<P> {
    fn zeroize(&mut self) {
        self.words.as_mut().zeroize();
    }
}

#[cfg(feature = "serde")]
impl<P: Parallelism> serde::Serialize for Batch<P> {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serdect::slice::serialize_hex_lower_or_bin(&self.to_bytes(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de, P: Parallelism> serde::Deserialize<'de> for Batch<P> {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes = serdect::slice::deserialize_hex_or_bin_vec(deserializer)?;
        Self::from_slice(&bytes).map_err(serde::de::Error::custom)
    }
}
