use crate::internal::search::binary_search_function;
use crate::rank::{BitRankSupport, RankSupport};
use crate::space_usage::SpaceUsage;

use super::{Select0Support, Select1Support, SelectSupport};

/// Performs select queries by binary searching rank queries.
///
/// This needs no storage of its own, so it is the zero-space baseline
/// the bucketed [`HybridSelect`](struct.HybridSelect.html) is compared
/// against: every query costs O(lg n) rank probes instead of O(1).
pub struct BinSearchSelect<'a, Rank> {
    rank_support: &'a Rank,
}

impl<'a, Rank: RankSupport + 'a> BinSearchSelect<'a, Rank> {
    /// Creates a new binary search selection support given a rank
    /// support.
    pub fn new(rank_support: &'a Rank) -> Self {
        BinSearchSelect { rank_support }
    }

    /// Borrows a reference to the underlying rank support.
    pub fn inner(&self) -> &'a Rank {
        self.rank_support
    }
}

impl<'a, Rank: RankSupport + 'a> RankSupport for BinSearchSelect<'a, Rank> {
    type Over = Rank::Over;

    fn rank(&self, position: u64, value: Self::Over) -> u64 {
        self.rank_support.rank(position, value)
    }

    fn limit(&self) -> u64 {
        self.rank_support.limit()
    }
}

impl<'a, Rank: BitRankSupport + 'a> BitRankSupport for BinSearchSelect<'a, Rank> {
    fn rank1(&self, position: u64) -> u64 {
        self.rank_support.rank1(position)
    }
}

// Since ranks are prefix counts, the position of the `index`th
// occurrence (0-based) is one before the least position whose rank
// reaches `index + 1`; that least position is at least 1 because the
// rank of 0 is 0.
//
// If we had access to the representation of the rank structure, we
// could search level by level rather than at arbitrary bit addresses.
// But then this algorithm would be tied to that representation.

macro_rules! impl_select_support_b {
    ($select_support:ident, $select:ident, $rank: ident) => {
        impl<'a, Rank: BitRankSupport + 'a> $select_support for BinSearchSelect<'a, Rank> {
            fn $select(&self, index: u64) -> Option<u64> {
                binary_search_function(0, self.limit() + 1, index + 1, |i| self.$rank(i))
                    .map(|position| position - 1)
            }
        }
    };
}

impl_select_support_b!(Select1Support, select1, rank1);
impl_select_support_b!(Select0Support, select0, rank0);

impl<'a, Rank: RankSupport + 'a> SelectSupport for BinSearchSelect<'a, Rank> {
    type Over = Rank::Over;

    fn select(&self, index: u64, value: Rank::Over) -> Option<u64> {
        binary_search_function(0, self.limit() + 1, index + 1, |i| self.rank(i, value))
            .map(|position| position - 1)
    }
}

impl<'a, Rank: RankSupport + 'a> SpaceUsage for BinSearchSelect<'a, Rank> {
    #[inline]
    fn is_stack_only() -> bool {
        true
    }

    #[inline]
    fn heap_bytes(&self) -> usize {
        0
    }
}
