// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parallelism parameter sets.
//!
//! Defines the [`Parallelism`] trait and the concrete word-packed backends
//! [`Parallel32`], [`Parallel64`], and [`Parallel128`]. Every backend
//! exposes the same operation contract; they differ only in how many
//! 32-bit words make up one group.

use core::fmt::Debug;
use core::hash::Hash;

/// Bits in one storage word.
pub(crate) const WORD_BITS: usize = 32;
/// Bytes in one storage word.
pub(crate) const WORD_BYTES: usize = 4;

/// Trait defining the width constants of a bit-sliced backend.
pub trait Parallelism: Clone + Copy + Debug + Send + Sync + 'static {
    /// Human-readable name of this backend.
    const NAME: &'static str;
    /// Number of bit lanes packed into one group.
    const GROUP_PARALLELISM: usize;
    /// Number of 32-bit storage words per group.
    const GROUP_WORDS: usize;
    /// Byte width of one group, and of one state-table slot.
    const GROUP_BYTES: usize;
    /// Number of byte lanes packed into one batch.
    const BYTES_PER_BATCH: usize;

    /// Word storage, `[u32; GROUP_WORDS]`.
    type Words: Copy
        + Default
        + Eq
        + Hash
        + Debug
        + AsRef<[u32]>
        + AsMut<[u32]>
        + Send
        + Sync
        + 'static;

    /// Serialized form, `[u8; GROUP_BYTES]`.
    type Bytes: Copy
        + Default
        + Eq
        + Hash
        + Debug
        + AsRef<[u8]>
        + AsMut<[u8]>
        + Send
        + Sync
        + 'static;

    /// Ordering point between network stages.
    ///
    /// Word-packed backends keep all lanes in ordinary registers, so this
    /// does nothing. Backends built on wider vector units may issue a
    /// fence here; callers place it at the same points either way.
    #[inline(always)]
    fn barrier() {}
}

macro_rules! define_parallelism {
    ($name:ident, $display:expr, words = $words:expr) => {
        #[doc = concat!("Word-packed backend ", $display, ".")]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name;

        impl Parallelism for $name {
            const NAME: &'static str = $display;
            const GROUP_PARALLELISM: usize = $words * WORD_BITS;
            const GROUP_WORDS: usize = $words;
            const GROUP_BYTES: usize = $words * WORD_BYTES;
            const BYTES_PER_BATCH: usize = $words * WORD_BYTES;

            type Words = [u32; $words];
            type Bytes = [u8; $words * WORD_BYTES];
        }
    };
}

define_parallelism!(Parallel32, "PARALLEL_032_INT", words = 1);
define_parallelism!(Parallel64, "PARALLEL_064_2INT", words = 2);
define_parallelism!(Parallel128, "PARALLEL_128_4INT", words = 4);

#[cfg(test)]
mod tests {
    use super::*;

    fn consistent<P: Parallelism>() {
        assert_eq!(P::GROUP_PARALLELISM, P::GROUP_WORDS * WORD_BITS);
        assert_eq!(P::GROUP_BYTES * 8, P::GROUP_PARALLELISM);
        assert_eq!(P::Words::default().as_ref().len(), P::GROUP_WORDS);
        assert_eq!(P::Bytes::default().as_ref().len(), P::GROUP_BYTES);
        assert_eq!(P::BYTES_PER_BATCH, P::GROUP_BYTES);
        P::barrier();
    }

    #[test]
    fn parallel64_shape() {
        assert_eq!(Parallel64::GROUP_PARALLELISM, 64);
        assert_eq!(Parallel64::GROUP_BYTES, 8);
        assert_eq!(Parallel64::BYTES_PER_BATCH, 8);
        consistent::<Parallel64>();
    }

    #[test]
    fn parallel32_shape() {
        assert_eq!(Parallel32::GROUP_PARALLELISM, 32);
        consistent::<Parallel32>();
    }

    #[test]
    fn parallel128_shape() {
        assert_eq!(Parallel128::GROUP_PARALLELISM, 128);
        consistent::<Parallel128>();
    }
}
