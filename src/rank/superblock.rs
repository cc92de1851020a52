use num_traits::PrimInt;

use crate::bit_vec::BitVec;
use crate::errors::{Error, Result};
use crate::rank::{BitRankSupport, RankSupport};
use crate::space_usage::SpaceUsage;
use crate::storage::BlockType;

/// The number of bits covered by one counter of a [`SuperblockRank`].
pub const SUPERBLOCK_BITS: u64 = 256;

/// Single-level rank structure: one absolute counter per superblock.
///
/// One cumulative `u64` popcount is kept for every
/// [`SUPERBLOCK_BITS`](constant.SUPERBLOCK_BITS.html) bits of the
/// vector, so a query is one counter fetch plus popcounts over at most a
/// superblock's worth of raw words. The counters alone cost 25% of the
/// vector's size, the price of having only one level of indirection;
/// see [`TwoLevelRank`](struct.TwoLevelRank.html) for the opposite end
/// of that trade.
///
/// Construct with `SuperblockRank::new`.
#[derive(Clone, Debug)]
pub struct SuperblockRank<Store> {
    bit_store: Store,
    superblock_ranks: Vec<u64>,
}

impl<Store: BitVec> SuperblockRank<Store> {
    /// Creates a new rank structure for the given bit vector, in a
    /// single pass over its blocks.
    ///
    /// Fails with [`Error::EmptyBitVector`](../errors/enum.Error.html)
    /// if the vector has no bits.
    pub fn new(bits: Store) -> Result<Self> {
        if bits.bit_len() == 0 {
            return Err(Error::EmptyBitVector);
        }

        let blocks_per_superblock = SUPERBLOCK_BITS as usize / Store::Block::nbits();
        let mut superblock_ranks =
            Vec::with_capacity((bits.bit_len() / SUPERBLOCK_BITS) as usize + 2);

        let mut current_rank: u64 = 0;
        for i in 0..bits.block_len() {
            if i % blocks_per_superblock == 0 {
                superblock_ranks.push(current_rank);
            }
            current_rank += bits.get_block(i).count_ones() as u64;
        }
        superblock_ranks.push(current_rank);

        Ok(SuperblockRank {
            bit_store: bits,
            superblock_ranks,
        })
    }

    /// Borrows a reference to the underlying bit store.
    pub fn inner(&self) -> &Store {
        &self.bit_store
    }

    /// Returns the underlying bit store.
    pub fn into_inner(self) -> Store {
        self.bit_store
    }
}

impl<Store: BitVec> RankSupport for SuperblockRank<Store> {
    type Over = bool;

    fn rank(&self, position: u64, value: bool) -> u64 {
        if value {
            self.rank1(position)
        } else {
            self.rank0(position)
        }
    }

    fn limit(&self) -> u64 {
        self.bit_store.bit_len()
    }
}

impl<Store: BitVec> BitRankSupport for SuperblockRank<Store> {
    fn rank1(&self, position: u64) -> u64 {
        debug_assert!(
            position <= self.bit_store.bit_len(),
            "SuperblockRank::rank1: out of bounds"
        );

        let blocks_per_superblock = SUPERBLOCK_BITS as usize / Store::Block::nbits();
        let superblock = (position / SUPERBLOCK_BITS) as usize;

        let mut rank = self.superblock_ranks[superblock];

        let first_block = superblock * blocks_per_superblock;
        let last_block = Store::Block::div_nbits(position);
        for i in first_block..last_block {
            rank += self.bit_store.get_block(i).count_ones() as u64;
        }

        let bit_offset = Store::Block::mod_nbits(position);
        if bit_offset > 0 {
            rank += self.bit_store.get_block(last_block).rank1(bit_offset as u64);
        }

        rank
    }
}

impl<Store: BitVec> BitVec for SuperblockRank<Store> {
    impl_bit_vec_adapter!(Store::Block, bit_store);
}

impl<Store: SpaceUsage> SpaceUsage for SuperblockRank<Store> {
    #[inline]
    fn is_stack_only() -> bool {
        false
    }

    fn heap_bytes(&self) -> usize {
        self.superblock_ranks.heap_bytes() + self.bit_store.heap_bytes()
    }
}
