// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Word-wise combinators and the little-endian word codec shared by
//! groups and batches.

use crate::error::{Error, Result};
use crate::params::{Parallelism, WORD_BYTES};

/// Combine two word arrays position by position.
#[inline(always)]
pub(crate) fn zip_with<P: Parallelism>(
    a: P::Words,
    b: P::Words,
    f: impl Fn(u32, u32) -> u32,
) -> P::Words {
    let mut out = a;
    for (x, y) in out.as_mut().iter_mut().zip(b.as_ref()) {
        *x = f(*x, *y);
    }
    out
}

/// Apply `f` to every word.
#[inline(always)]
pub(crate) fn map<P: Parallelism>(a: P::Words, f: impl Fn(u32) -> u32) -> P::Words {
    let mut out = a;
    for x in out.as_mut().iter_mut() {
        *x = f(*x);
    }
    out
}

/// Fill every word with `value`.
#[inline(always)]
pub(crate) fn splat<P: Parallelism>(value: u32) -> P::Words {
    map::<P>(P::Words::default(), |_| value)
}

/// Serialize words: word `i` occupies bytes `4i..4i+4`, least significant first.
pub(crate) fn to_bytes<P: Parallelism>(words: &P::Words) -> P::Bytes {
    let mut out = P::Bytes::default();
    for (chunk, word) in out
        .as_mut()
        .chunks_exact_mut(WORD_BYTES)
        .zip(words.as_ref())
    {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    out
}

/// Inverse of [`to_bytes`].
pub(crate) fn from_bytes<P: Parallelism>(bytes: &P::Bytes) -> P::Words {
    let mut out = P::Words::default();
    for (word, chunk) in out
        .as_mut()
        .iter_mut()
        .zip(bytes.as_ref().chunks_exact(WORD_BYTES))
    {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    out
}

/// Decode words from a slice that must be exactly `GROUP_BYTES` long.
pub(crate) fn from_slice<P: Parallelism>(bytes: &[u8]) -> Result<P::Words> {
    if bytes.len() != P::GROUP_BYTES {
        return Err(Error::InvalidLength {
            expected: P::GROUP_BYTES,
            got: bytes.len(),
        });
    }
    let mut raw = P::Bytes::default();
    raw.as_mut().copy_from_slice(bytes);
    Ok(from_bytes::<P>(&raw))
}
