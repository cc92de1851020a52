//! Rank and select indexes over immutable bit vectors.
//!
//! A [`BitVector`](bit_vec/struct.BitVector.html) packs bits into
//! fixed-width words; the index structures in this crate are read-only
//! layers built over it (or over anything implementing
//! [`BitVec`](bit_vec/trait.BitVec.html), including plain `&[u64]`):
//!
//!   - [`SuperblockRank`](rank/struct.SuperblockRank.html) answers
//!     `rank1(i)`, the number of ones in positions `[0, i)`, in constant
//!     time from a single level of absolute counters (≈25% of the
//!     vector's size);
//!   - [`TwoLevelRank`](rank/struct.TwoLevelRank.html) answers the same
//!     query from superblock plus block counters (≈3%, one more memory
//!     access);
//!   - [`RankIndex`](rank/enum.RankIndex.html) selects between the two at
//!     construction time;
//!   - [`HybridSelect`](select/struct.HybridSelect.html) answers
//!     `select(k)`, the position of the k-th occurrence of a chosen bit
//!     value, from occurrence buckets stored as a span bitmap or an
//!     explicit position array, depending on how spread out they are;
//!   - [`BinSearchSelect`](select/struct.BinSearchSelect.html) is the
//!     baseline that binary searches any rank structure instead.
//!
//! Space accounting for all of the above goes through
//! [`SpaceUsage`](trait.SpaceUsage.html), so a driver can report index
//! overhead as a fraction of the raw vector's bytes.
//!
//! # Usage
//!
//! It's [on crates.io](https://crates.io/crates/ranksel), so you can add
//!
//! ```toml
//! [dependencies]
//! ranksel = "0.1"
//! ```
//!
//! to your `Cargo.toml`.

#![warn(missing_docs)]

mod internal;

#[macro_use]
mod macros;

mod space_usage;
pub use crate::space_usage::SpaceUsage;

pub mod errors;
pub use crate::errors::{Error, Result};

pub mod storage;

pub mod broadword;

pub mod bit_vec;
pub use crate::bit_vec::{BitVec, BitVecMut, BitVecPush, BitVector};

pub mod int_vec;
pub use crate::int_vec::IntVector;

pub mod rank;
pub use crate::rank::{
    BitRankSupport, RankIndex, RankSupport, RankVariant, SuperblockRank, TwoLevelRank,
};

pub mod select;
pub use crate::select::{
    BinSearchSelect, HybridSelect, Select0Support, Select1Support, SelectSupport,
};
