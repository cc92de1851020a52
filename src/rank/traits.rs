/// Interface for types that support rank queries.
///
/// Associated type `Over` gives the type that we can query about. For
/// example, `RankSupport<Over = bool>` lets us rank `0` and `1`.
///
/// Ranks are prefix counts over the half-open range `[0, position)`:
/// `rank(0, _)` is always 0 and `rank(limit(), value)` is the total
/// number of occurrences of `value`.
pub trait RankSupport {
    /// The type of value to rank.
    type Over: Copy;

    /// Returns the number of occurrences of `value` in positions
    /// `[0, position)`.
    ///
    /// The position may equal `self.limit()`; anything beyond that is a
    /// contract violation, checked only by debug assertions on the
    /// concrete structures. Use [`checked_rank`](#method.checked_rank)
    /// when the argument isn't already known to be in range.
    fn rank(&self, position: u64, value: Self::Over) -> u64;

    /// The length of the sequence being ranked, and thus the largest
    /// valid query position.
    fn limit(&self) -> u64;

    /// Range-checked version of [`rank`](#tymethod.rank).
    fn checked_rank(&self, position: u64, value: Self::Over) -> Option<u64> {
        if position <= self.limit() {
            Some(self.rank(position, value))
        } else {
            None
        }
    }
}

/// Convenience trait for `RankSupport` over `bool`.
pub trait BitRankSupport: RankSupport<Over = bool> {
    /// Returns the number of ones in positions `[0, position)`.
    fn rank1(&self, position: u64) -> u64 {
        self.rank(position, true)
    }

    /// Returns the number of zeroes in positions `[0, position)`.
    fn rank0(&self, position: u64) -> u64 {
        position - self.rank1(position)
    }
}
