// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bit-sliced parallel primitives for CSA descrambling.
//!
//! This crate provides the data-parallel substrate a bit-sliced block
//! cipher engine evaluates its boolean network on. One bit from each of
//! many independent streams is packed into a fixed position of ordinary
//! 32-bit words, so each AND/OR/XOR/NOT advances every stream at once.
//!
//! - [`Group`]: the lane vector, one bit per lane.
//! - [`Batch`]: the byte-lane vector, one byte per lane, with the shifts
//!   and masks used by byte-granular diffusion stages.
//! - [`table`]: the codec between groups and the caller-owned state table.
//!
//! # Supported Backends
//!
//! - [`Parallel32`] - 32 lanes in one word
//! - [`Parallel64`] - 64 lanes in two words
//! - [`Parallel128`] - 128 lanes in four words
//!
//! # Example
//!
//! ```
//! use ffdecsa_parallel::{Group, Parallel64, StateTable};
//!
//! let mut raw = [0u8; 16];
//! let mut table = StateTable::<Parallel64>::new(&mut raw).expect("aligned");
//! table.store(0, &Group::ones()).expect("store");
//! table.store(1, &Group::zero()).expect("store");
//!
//! let mut out = [0u8; 4];
//! table.accumulate_xor(4, &mut out, 0).expect("xor");
//! assert_eq!(out, [0xff; 4]);
//! table.accumulate_xor(4, &mut out, 1).expect("xor");
//! assert_eq!(out, [0xff; 4]);
//! ```

pub mod batch;
pub mod error;
pub mod group;
pub mod params;
pub mod table;

mod words;

pub use batch::Batch;
pub use error::{Error, Result};
pub use group::Group;
pub use params::{Parallel32, Parallel64, Parallel128, Parallelism};
pub use table::{StateTable, StateTableRef};
