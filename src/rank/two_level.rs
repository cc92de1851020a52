use std::cmp;

use num_traits::PrimInt;

use crate::bit_vec::BitVec;
use crate::errors::{Error, Result};
use crate::int_vec::IntVector;
use crate::rank::{BitRankSupport, RankSupport};
use crate::space_usage::SpaceUsage;
use crate::storage::BlockType;

// Geometry of the counter hierarchy. Superblocks hold absolute ranks;
// blocks hold ranks relative to their superblock, so a block counter
// never needs more than lg(SUPERBLOCK_BITS) bits.
const SUPERBLOCK_BITS: u64 = 1 << 16;
const BLOCK_BITS: u64 = 512;

/// Two-level rank structure: absolute superblock counters plus small
/// block counters relative to them.
///
/// Splitting the counters over two levels lets the inner level be
/// bit-packed to 16 bits or less per 512-bit block, cutting the space
/// overhead to ≈3% of the vector at the cost of one extra memory
/// access per query compared to
/// [`SuperblockRank`](struct.SuperblockRank.html). Both levels are kept
/// in [`IntVector`](../int_vec/struct.IntVector.html)s whose element
/// width is computed from the largest value a counter can take.
///
/// Construct with `TwoLevelRank::new`.
#[derive(Clone, Debug)]
pub struct TwoLevelRank<Store> {
    bit_store: Store,
    superblock_ranks: IntVector<u64>,
    block_ranks: IntVector<u64>,
}

impl<Store: BitVec> TwoLevelRank<Store> {
    /// Creates a new rank structure for the given bit vector, in a
    /// single pass over its blocks.
    ///
    /// Fails with [`Error::EmptyBitVector`](../errors/enum.Error.html)
    /// if the vector has no bits.
    pub fn new(bits: Store) -> Result<Self> {
        if bits.bit_len() == 0 {
            return Err(Error::EmptyBitVector);
        }

        let n = bits.bit_len();

        let superblock_rank_bits = (n + 1).ceil_lg();
        let block_rank_bits = cmp::min(SUPERBLOCK_BITS, n + 1).ceil_lg();

        let storage_per_superblock = SUPERBLOCK_BITS as usize / Store::Block::nbits();
        let storage_per_block = BLOCK_BITS as usize / Store::Block::nbits();

        let mut superblock_ranks =
            IntVector::with_capacity(superblock_rank_bits, n / SUPERBLOCK_BITS + 2);
        let mut block_ranks = IntVector::with_capacity(block_rank_bits, n / BLOCK_BITS + 2);

        let mut current_rank: u64 = 0;
        let mut last_superblock_rank: u64 = 0;

        // One extra pass position past the last storage block, so the
        // counters for the final boundary get emitted too.
        for i in 0..=bits.block_len() {
            if i % storage_per_superblock == 0 {
                superblock_ranks.push(current_rank);
                last_superblock_rank = current_rank;
            }
            if i % storage_per_block == 0 {
                block_ranks.push(current_rank - last_superblock_rank);
            }
            if i < bits.block_len() {
                current_rank += bits.get_block(i).count_ones() as u64;
            }
        }

        Ok(TwoLevelRank {
            bit_store: bits,
            superblock_ranks,
            block_ranks,
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

impl<Store: BitVec> RankSupport for TwoLevelRank<Store> {
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

impl<Store: BitVec> BitRankSupport for TwoLevelRank<Store> {
    fn rank1(&self, position: u64) -> u64 {
        debug_assert!(
            position <= self.bit_store.bit_len(),
            "TwoLevelRank::rank1: out of bounds"
        );

        let superblock = position / SUPERBLOCK_BITS;
        let block = position / BLOCK_BITS;

        let mut rank = self.superblock_ranks.get(superblock) + self.block_ranks.get(block);

        let first_storage = block as usize * (BLOCK_BITS as usize / Store::Block::nbits());
        let last_storage = Store::Block::div_nbits(position);
        for i in first_storage..last_storage {
            rank += self.bit_store.get_block(i).count_ones() as u64;
        }

        let bit_offset = Store::Block::mod_nbits(position);
        if bit_offset > 0 {
            rank += self
                .bit_store
                .get_block(last_storage)
                .rank1(bit_offset as u64);
        }

        rank
    }
}

impl<Store: BitVec> BitVec for TwoLevelRank<Store> {
    impl_bit_vec_adapter!(Store::Block, bit_store);
}

impl<Store: SpaceUsage> SpaceUsage for TwoLevelRank<Store> {
    #[inline]
    fn is_stack_only() -> bool {
        false
    }

    fn heap_bytes(&self) -> usize {
        self.superblock_ranks.heap_bytes()
            + self.block_ranks.heap_bytes()
            + self.bit_store.heap_bytes()
    }
}
