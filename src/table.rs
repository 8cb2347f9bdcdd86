// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cipher-state table codec.
//!
//! The descrambling engine keeps one slot per network node in a flat,
//! caller-owned byte table. Slot `g` occupies bytes
//! `g * P::GROUP_BYTES..(g + 1) * P::GROUP_BYTES` and holds the
//! little-endian image of one [`Group`] (see [`Group::to_bytes`]).
//!
//! Every function here checks the slot index and buffer lengths and
//! reports violations as [`Error`]s; nothing reads or writes outside the
//! slices it is given.

use crate::error::{Error, Result};
use crate::group::Group;
use crate::params::Parallelism;
use core::marker::PhantomData;
use core::ops::Range;

/// Number of whole slots in `table`.
pub fn slot_count<P: Parallelism>(table: &[u8]) -> usize {
    table.len() / P::GROUP_BYTES
}

fn slot_range<P: Parallelism>(table: &[u8], slot: usize) -> Result<Range<usize>> {
    let slots = slot_count::<P>(table);
    if slot >= slots {
        return Err(Error::SlotOutOfRange { slot, slots });
    }
    let start = slot * P::GROUP_BYTES;
    Ok(start..start + P::GROUP_BYTES)
}

/// Read slot `slot` as a group.
pub fn load<P: Parallelism>(table: &[u8], slot: usize) -> Result<Group<P>> {
    let range = slot_range::<P>(table, slot)?;
    Group::from_slice(&table[range])
}

/// Overwrite slot `slot` with `value`.
pub fn store<P: Parallelism>(table: &mut [u8], slot: usize, value: &Group<P>) -> Result<()> {
    let range = slot_range::<P>(table, slot)?;
    table[range].copy_from_slice(value.to_bytes().as_ref());
    Ok(())
}

/// XOR the first `n` bytes of slot `slot` into `data[..n]`.
///
/// The table is left untouched.
pub fn accumulate_xor<P: Parallelism>(
    n: usize,
    data: &mut [u8],
    table: &[u8],
    slot: usize,
) -> Result<()> {
    if n > P::GROUP_BYTES {
        return Err(Error::XorLengthOutOfRange {
            max: P::GROUP_BYTES,
            got: n,
        });
    }
    if data.len() < n {
        return Err(Error::BufferTooShort {
            expected: n,
            got: data.len(),
        });
    }
    let range = slot_range::<P>(table, slot)?;
    for (d, t) in data[..n].iter_mut().zip(&table[range]) {
        *d ^= *t;
    }
    Ok(())
}

/// Copy `P::GROUP_BYTES` raw bytes from `data` into slot `slot`.
pub fn table_in<P: Parallelism>(table: &mut [u8], slot: usize, data: &[u8]) -> Result<()> {
    if data.len() < P::GROUP_BYTES {
        return Err(Error::BufferTooShort {
            expected: P::GROUP_BYTES,
            got: data.len(),
        });
    }
    let range = slot_range::<P>(table, slot)?;
    table[range].copy_from_slice(&data[..P::GROUP_BYTES]);
    Ok(())
}

/// Copy slot `slot` into the first `P::GROUP_BYTES` bytes of `data`.
pub fn table_out<P: Parallelism>(data: &mut [u8], table: &[u8], slot: usize) -> Result<()> {
    if data.len() < P::GROUP_BYTES {
        return Err(Error::BufferTooShort {
            expected: P::GROUP_BYTES,
            got: data.len(),
        });
    }
    let range = slot_range::<P>(table, slot)?;
    data[..P::GROUP_BYTES].copy_from_slice(&table[range]);
    Ok(())
}

/// Borrowed view over a caller-owned state table.
///
/// Construction checks that the table is a whole number of slots; the
/// view never allocates, resizes, or frees the underlying buffer. Callers
/// holding only a shared borrow use [`StateTableRef`].
pub struct StateTable<'a, P: Parallelism> {
    bytes: &'a mut [u8],
    _marker: PhantomData<P>,
}

impl<P: Parallelism> core::fmt::Debug for StateTable<'_, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StateTable")
            .field("variant", &P::NAME)
            .field("slots", &self.slots())
            .finish_non_exhaustive()
    }
}

impl<'a, P: Parallelism> StateTable<'a, P> {
    /// Wrap `bytes`, which must hold a whole number of slots.
    pub fn new(bytes: &'a mut [u8]) -> Result<Self> {
        if bytes.len() % P::GROUP_BYTES != 0 {
            return Err(Error::MisalignedTable {
                len: bytes.len(),
                group_bytes: P::GROUP_BYTES,
            });
        }
        Ok(Self {
            bytes,
            _marker: PhantomData,
        })
    }

    /// Number of slots.
    pub fn slots(&self) -> usize {
        slot_count::<P>(&*self.bytes)
    }

    /// See [`load`].
    pub fn load(&self, slot: usize) -> Result<Group<P>> {
        load::<P>(&*self.bytes, slot)
    }

    /// See [`store`].
    pub fn store(&mut self, slot: usize, value: &Group<P>) -> Result<()> {
        store::<P>(self.bytes, slot, value)
    }

    /// See [`accumulate_xor`].
    pub fn accumulate_xor(&self, n: usize, data: &mut [u8], slot: usize) -> Result<()> {
        accumulate_xor::<P>(n, data, &*self.bytes, slot)
    }

    /// See [`table_in`].
    pub fn table_in(&mut self, slot: usize, data: &[u8]) -> Result<()> {
        table_in::<P>(self.bytes, slot, data)
    }

    /// See [`table_out`].
    pub fn table_out(&self, data: &mut [u8], slot: usize) -> Result<()> {
        table_out::<P>(data, &*self.bytes, slot)
    }

    /// The underlying table.
    pub fn as_bytes(&self) -> &[u8] {
        &*self.bytes
    }

    /// Read-only view over the same table.
    pub fn as_view(&self) -> StateTableRef<'_, P> {
        StateTableRef {
            bytes: &*self.bytes,
            _marker: PhantomData,
        }
    }
}

/// Read-only view over a caller-owned state table.
pub struct StateTableRef<'a, P: Parallelism> {
    bytes: &'a [u8],
    _marker: PhantomData<P>,
}

impl<P: Parallelism> Clone for StateTableRef<'_, P> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: Parallelism> Copy for StateTableRef<'_, P> {}

impl<P: Parallelism> core::fmt::Debug for StateTableRef<'_, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("StateTableRef")
            .field("variant", &P::NAME)
            .field("slots", &self.slots())
            .finish_non_exhaustive()
    }
}

impl<'a, P: Parallelism> StateTableRef<'a, P> {
    /// Wrap `bytes`, which must hold a whole number of slots.
    pub fn new(bytes: &'a [u8]) -> Result<Self> {
        if bytes.len() % P::GROUP_BYTES != 0 {
            return Err(Error::MisalignedTable {
                len: bytes.len(),
                group_bytes: P::GROUP_BYTES,
            });
        }
        Ok(Self {
            bytes,
            _marker: PhantomData,
        })
    }

    /// Number of slots.
    pub fn slots(&self) -> usize {
        slot_count::<P>(self.bytes)
    }

    /// See [`load`].
    pub fn load(&self, slot: usize) -> Result<Group<P>> {
        load::<P>(self.bytes, slot)
    }

    /// See [`accumulate_xor`].
    pub fn accumulate_xor(&self, n: usize, data: &mut [u8], slot: usize) -> Result<()> {
        accumulate_xor::<P>(n, data, self.bytes, slot)
    }

    /// See [`table_out`].
    pub fn table_out(&self, data: &mut [u8], slot: usize) -> Result<()> {
        table_out::<P>(data, self.bytes, slot)
    }

    /// The underlying table.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}
