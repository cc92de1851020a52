//! Support for fast rank queries.

mod traits;
pub use self::traits::*;

mod prim;

mod superblock;
pub use self::superblock::*;

mod two_level;
pub use self::two_level::*;

use crate::bit_vec::BitVec;
use crate::errors::Result;
use crate::space_usage::SpaceUsage;

/// Which counter layout a [`RankIndex`](enum.RankIndex.html) should use.
///
/// Both layouts answer the same queries in constant time; they differ in
/// where they sit on the space/indirection trade:
///
///   - `OneLevel`, a [`SuperblockRank`](struct.SuperblockRank.html):
///     ≈25% extra space, a single counter fetch per query;
///   - `TwoLevel`, a [`TwoLevelRank`](struct.TwoLevelRank.html):
///     ≈3% extra space, two counter fetches per query.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum RankVariant {
    /// Single-level absolute superblock counters.
    OneLevel,
    /// Superblock counters plus block counters relative to them.
    TwoLevel,
}

/// A rank structure whose counter layout is chosen at construction time.
///
/// This is the tagged union over the two concrete layouts, for callers
/// that pick a [`RankVariant`](enum.RankVariant.html) from run-time
/// configuration. Code that knows the layout it wants can use
/// [`SuperblockRank`](struct.SuperblockRank.html) or
/// [`TwoLevelRank`](struct.TwoLevelRank.html) directly and skip the
/// dispatch.
#[derive(Clone, Debug)]
pub enum RankIndex<Store> {
    /// A [`SuperblockRank`](struct.SuperblockRank.html).
    OneLevel(SuperblockRank<Store>),
    /// A [`TwoLevelRank`](struct.TwoLevelRank.html).
    TwoLevel(TwoLevelRank<Store>),
}

impl<Store: BitVec> RankIndex<Store> {
    /// Builds a rank index of the requested variant over the given bit
    /// vector.
    ///
    /// Fails with [`Error::EmptyBitVector`](../errors/enum.Error.html)
    /// if the vector has no bits.
    pub fn new(bits: Store, variant: RankVariant) -> Result<Self> {
        match variant {
            RankVariant::OneLevel => SuperblockRank::new(bits).map(RankIndex::OneLevel),
            RankVariant::TwoLevel => TwoLevelRank::new(bits).map(RankIndex::TwoLevel),
        }
    }

    /// The variant this index was built with.
    pub fn variant(&self) -> RankVariant {
        match self {
            RankIndex::OneLevel(_) => RankVariant::OneLevel,
            RankIndex::TwoLevel(_) => RankVariant::TwoLevel,
        }
    }
}

impl<Store: BitVec> RankSupport for RankIndex<Store> {
    type Over = bool;

    fn rank(&self, position: u64, value: bool) -> u64 {
        match self {
            RankIndex::OneLevel(rank) => rank.rank(position, value),
            RankIndex::TwoLevel(rank) => rank.rank(position, value),
        }
    }

    fn limit(&self) -> u64 {
        match self {
            RankIndex::OneLevel(rank) => rank.limit(),
            RankIndex::TwoLevel(rank) => rank.limit(),
        }
    }
}

impl<Store: BitVec> BitRankSupport for RankIndex<Store> {
    fn rank1(&self, position: u64) -> u64 {
        match self {
            RankIndex::OneLevel(rank) => rank.rank1(position),
            RankIndex::TwoLevel(rank) => rank.rank1(position),
        }
    }
}

impl<Store: SpaceUsage> SpaceUsage for RankIndex<Store> {
    fn is_stack_only() -> bool {
        false
    }

    fn heap_bytes(&self) -> usize {
        match self {
            RankIndex::OneLevel(rank) => rank.heap_bytes(),
            RankIndex::TwoLevel(rank) => rank.heap_bytes(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn variants_agree() {
        let vec = vec![0xF0F0_F0F0_F0F0_F0F0u64; 100];

        let one = RankIndex::new(&*vec, RankVariant::OneLevel).unwrap();
        let two = RankIndex::new(&*vec, RankVariant::TwoLevel).unwrap();

        assert_eq!(RankVariant::OneLevel, one.variant());
        assert_eq!(RankVariant::TwoLevel, two.variant());

        for position in (0..=6400).step_by(7) {
            assert_eq!(one.rank1(position), two.rank1(position));
            assert_eq!(one.rank0(position), two.rank0(position));
        }
        assert_eq!(3200, one.rank1(6400));
    }

    #[test]
    fn checked_rank_bounds() {
        let vec = vec![!0u64; 4];
        let rank = RankIndex::new(&*vec, RankVariant::TwoLevel).unwrap();

        assert_eq!(Some(256), rank.checked_rank(256, true));
        assert_eq!(None, rank.checked_rank(257, true));
    }
}
