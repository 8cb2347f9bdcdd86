// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for the bit-sliced primitive layer.
//!
//! The lane and byte-lane algebra is total and never fails. Only the
//! boundary operations that index caller-owned memory return these.

/// Errors raised at the boundary between packed values and caller buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Slot index past the end of the state table.
    #[error("slot {slot} out of range: table holds {slots} slots")]
    SlotOutOfRange {
        /// Requested slot.
        slot: usize,
        /// Number of slots in the table.
        slots: usize,
    },
    /// Byte count for an accumulating XOR exceeds the slot width.
    #[error("xor length out of range: at most {max} bytes, got {got}")]
    XorLengthOutOfRange {
        /// Slot width in bytes.
        max: usize,
        /// Requested byte count.
        got: usize,
    },
    /// Caller buffer too small for the operation.
    #[error("buffer too short: need {expected} bytes, got {got}")]
    BufferTooShort {
        /// Required length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// Byte slice of the wrong size for a packed value.
    #[error("invalid length: expected {expected}, got {got}")]
    InvalidLength {
        /// Expected length.
        expected: usize,
        /// Actual length.
        got: usize,
    },
    /// Table length is not a whole number of slots.
    #[error("table of {len} bytes is not a multiple of the {group_bytes}-byte slot width")]
    MisalignedTable {
        /// Table length in bytes.
        len: usize,
        /// Slot width in bytes.
        group_bytes: usize,
    },
    /// Lane index past the parallelism width.
    #[error("lane {lane} out of range: width is {lanes}")]
    LaneOutOfRange {
        /// Requested lane.
        lane: usize,
        /// Number of lanes.
        lanes: usize,
    },
}

/// Result type alias using [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
