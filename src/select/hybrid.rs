use crate::bit_vec::{BitVec, BitVecMut, BitVector};
use crate::broadword;
use crate::errors::{Error, Result};
use crate::int_vec::IntVector;
use crate::internal::search::binary_search_function;
use crate::rank::{BitRankSupport, RankSupport, SuperblockRank};
use crate::space_usage::SpaceUsage;
use crate::storage::BlockType;

/// The number of occurrences of the target value covered by one bucket.
pub const BUCKET_OCCURRENCES: u64 = 4096;

/// The widest position span a bucket may cover and still be stored as a
/// bitmap: 16 bits of span per occurrence.
///
/// Past this point the occurrences are so spread out that an explicit
/// position array is the smaller representation, so the bucket goes
/// sparse.
pub const DENSE_SPAN_BITS: u64 = 16 * BUCKET_OCCURRENCES;

/// Position-of-occurrence (select) index for one bit value.
///
/// Built for a fixed target value, ones or zeroes, the structure
/// partitions the occurrences of that value into runs of
/// [`BUCKET_OCCURRENCES`](constant.BUCKET_OCCURRENCES.html), so its size
/// scales with how often the target occurs, not with the length of the
/// vector. Each bucket stores its occurrences whichever way is smaller
/// for its density:
///
///   - *dense* (positions packed into a span of at most
///     [`DENSE_SPAN_BITS`](constant.DENSE_SPAN_BITS.html)): a bitmap
///     over exactly that span with an embedded
///     [`SuperblockRank`](../rank/struct.SuperblockRank.html), and the
///     k-th position inside is found by a counter binary search plus a
///     word popcount and an in-word select;
///   - *sparse*: the absolute positions themselves, bit-packed into an
///     [`IntVector`](../int_vec/struct.IntVector.html) and indexed
///     directly.
///
/// Queries are 1-based: `select(1)` is the position of the first
/// occurrence. The raw [`select`](#method.select) does not validate `k`
/// in release builds; use [`checked_select`](#method.checked_select)
/// when the argument isn't already known to be in
/// `[1, occurrences()]`.
#[derive(Clone, Debug)]
pub struct HybridSelect<Store> {
    bit_store: Store,
    target: bool,
    occurrences: u64,
    buckets: Vec<Bucket>,
}

#[derive(Clone, Debug)]
enum Bucket {
    Dense {
        first: u64,
        ones: SuperblockRank<BitVector<u64>>,
    },
    Sparse(IntVector<u64>),
}

impl Bucket {
    fn build(positions: &[u64], position_bits: usize) -> Bucket {
        let first = positions[0];
        let last = positions[positions.len() - 1];
        let span = last - first + 1;

        if span <= DENSE_SPAN_BITS {
            let mut bitmap: BitVector<u64> = BitVector::with_fill(span, false);
            for &position in positions {
                bitmap.set_bit(position - first, true);
            }
            Bucket::Dense {
                first,
                ones: SuperblockRank::new(bitmap).expect("Bucket::build: empty bitmap"),
            }
        } else {
            let mut packed = IntVector::with_capacity(position_bits, positions.len() as u64);
            for &position in positions {
                packed.push(position);
            }
            Bucket::Sparse(packed)
        }
    }
}

impl SpaceUsage for Bucket {
    fn is_stack_only() -> bool {
        false
    }

    fn heap_bytes(&self) -> usize {
        match self {
            Bucket::Dense { ones, .. } => ones.heap_bytes(),
            Bucket::Sparse(positions) => positions.heap_bytes(),
        }
    }
}

impl<Store: BitVec<Block = u64>> HybridSelect<Store> {
    /// Creates a new select structure over the given bit vector for the
    /// given target value, scanning the vector once word by word.
    ///
    /// A target that never occurs is fine: the structure builds with
    /// zero occurrences and every query argument is then out of range.
    /// A zero-length vector fails with
    /// [`Error::EmptyBitVector`](../errors/enum.Error.html).
    pub fn new(bits: Store, target: bool) -> Result<Self> {
        if bits.bit_len() == 0 {
            return Err(Error::EmptyBitVector);
        }

        let position_bits = std::cmp::max(1, bits.bit_len().ceil_lg());

        let mut buckets = Vec::new();
        let mut buffer: Vec<u64> = Vec::with_capacity(BUCKET_OCCURRENCES as usize);
        let mut occurrences: u64 = 0;

        for i in 0..bits.block_len() {
            let mut word = occurrence_word(&bits, i, target);
            while word != 0 {
                let position = (i as u64) * 64 + word.trailing_zeros() as u64;
                buffer.push(position);
                occurrences += 1;

                if buffer.len() == BUCKET_OCCURRENCES as usize {
                    buckets.push(Bucket::build(&buffer, position_bits));
                    buffer.clear();
                }

                word &= word - 1;
            }
        }

        if !buffer.is_empty() {
            buckets.push(Bucket::build(&buffer, position_bits));
        }

        Ok(HybridSelect {
            bit_store: bits,
            target,
            occurrences,
            buckets,
        })
    }

    /// The bit value this structure selects for.
    pub fn target(&self) -> bool {
        self.target
    }

    /// How many times the target value occurs in the vector, and thus
    /// the largest valid query argument.
    pub fn occurrences(&self) -> u64 {
        self.occurrences
    }

    /// Returns the position of the `k`th occurrence of the target
    /// value, 1-based.
    ///
    /// `k` outside `[1, occurrences()]` is a contract violation: debug
    /// builds assert, release builds return garbage or panic on an
    /// internal bounds check.
    pub fn select(&self, k: u64) -> u64 {
        debug_assert!(
            k >= 1 && k <= self.occurrences,
            "HybridSelect::select: out of range"
        );

        let occurrence = k - 1;
        let bucket = (occurrence / BUCKET_OCCURRENCES) as usize;
        let within = occurrence % BUCKET_OCCURRENCES + 1;

        match &self.buckets[bucket] {
            Bucket::Sparse(positions) => positions.get(within - 1),
            Bucket::Dense { first, ones } => first + dense_select(ones, within),
        }
    }

    /// Range-checked version of [`select`](#method.select).
    pub fn checked_select(&self, k: u64) -> Option<u64> {
        if k >= 1 && k <= self.occurrences {
            Some(self.select(k))
        } else {
            None
        }
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

// Reads storage word `index` with non-target bits flipped off: target
// occurrences read as ones, and bits past the end of the vector in the
// last word read as zero either way.
fn occurrence_word<Store: BitVec<Block = u64>>(bits: &Store, index: usize, target: bool) -> u64 {
    let word = bits.get_block(index);
    let word = if target { word } else { !word };

    if index + 1 == bits.block_len() {
        word & u64::low_mask(u64::last_block_bits(bits.bit_len()))
    } else {
        word
    }
}

// Position of the `k`th one (1-based) inside a dense bucket's bitmap.
//
// Probing the embedded rank at 256-bit boundaries reads a bare counter,
// so the binary search below costs one memory access per step; the
// remainder is at most four popcounts and one in-word select.
fn dense_select(ones: &SuperblockRank<BitVector<u64>>, k: u64) -> u64 {
    let span = ones.limit();
    let boundaries = span / 256;

    let chunk = match binary_search_function(0, boundaries + 1, k, |b| ones.rank1(b * 256)) {
        Some(next) => next - 1,
        None => boundaries,
    };

    let mut remaining = k - ones.rank1(chunk * 256);
    let mut word_index = (chunk * 4) as usize;

    loop {
        let word = ones.inner().get_block(word_index);
        let ones_here = broadword::count_ones(word) as u64;
        if remaining <= ones_here {
            return word_index as u64 * 64
                + broadword::select_in_word(word, (remaining - 1) as usize) as u64;
        }
        remaining -= ones_here;
        word_index += 1;
    }
}

impl<Store: SpaceUsage> SpaceUsage for HybridSelect<Store> {
    fn is_stack_only() -> bool {
        false
    }

    fn heap_bytes(&self) -> usize {
        self.buckets.heap_bytes() + self.bit_store.heap_bytes()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::bit_vec::{BitVecMut, BitVecPush, BitVector};

    fn positions_of(bits: &BitVector<u64>, target: bool) -> Vec<u64> {
        (0..bits.bit_len())
            .filter(|&i| bits.get_bit(i) == target)
            .collect()
    }

    fn check_all(bits: BitVector<u64>, target: bool) {
        let expected = positions_of(&bits, target);
        let select = HybridSelect::new(bits, target).unwrap();

        assert_eq!(expected.len() as u64, select.occurrences());
        for (index, &position) in expected.iter().enumerate() {
            assert_eq!(position, select.select(index as u64 + 1), "k = {}", index + 1);
        }
        assert_eq!(None, select.checked_select(0));
        assert_eq!(None, select.checked_select(expected.len() as u64 + 1));
    }

    #[test]
    fn small_dense() {
        let mut bits: BitVector<u64> = BitVector::new();
        for &bit in &[true, false, true, true, false, false, true, false] {
            bits.push_bit(bit);
        }

        let select = HybridSelect::new(bits.clone(), true).unwrap();
        assert_eq!(4, select.occurrences());
        assert_eq!(0, select.select(1));
        assert_eq!(2, select.select(2));
        assert_eq!(3, select.select(3));
        assert_eq!(6, select.select(4));

        check_all(bits.clone(), true);
        check_all(bits, false);
    }

    #[test]
    fn select_zeros() {
        let mut bits: BitVector<u64> = BitVector::with_fill(200, true);
        bits.set_bit(0, false);
        bits.set_bit(63, false);
        bits.set_bit(64, false);
        bits.set_bit(199, false);

        let select = HybridSelect::new(bits, false).unwrap();
        assert_eq!(4, select.occurrences());
        assert_eq!(0, select.select(1));
        assert_eq!(63, select.select(2));
        assert_eq!(64, select.select(3));
        assert_eq!(199, select.select(4));
    }

    #[test]
    fn multiple_buckets() {
        // 8320 ones: two full buckets and a partial third.
        let bits = BitVector::from_blocks(vec![!0u64; 130]);
        let select = HybridSelect::new(bits, true).unwrap();

        assert_eq!(8320, select.occurrences());
        assert_eq!(0, select.select(1));
        assert_eq!(4095, select.select(4096));
        assert_eq!(4096, select.select(4097));
        assert_eq!(8191, select.select(8192));
        assert_eq!(8192, select.select(8193));
        assert_eq!(8319, select.select(8320));
        assert_eq!(None, select.checked_select(8321));
    }

    #[test]
    fn sparse_buckets() {
        // One occurrence per word: a full bucket spans 262144 bits,
        // well past the dense limit.
        let bits = BitVector::from_blocks(vec![1u64 << 17; 5000]);
        let select = HybridSelect::new(bits, true).unwrap();

        assert_eq!(5000, select.occurrences());
        for k in &[1u64, 2, 63, 4096, 4097, 4999, 5000] {
            assert_eq!((k - 1) * 64 + 17, select.select(*k));
        }
    }

    #[test]
    fn dense_boundary_bucket() {
        // 4096 occurrences spanning exactly DENSE_SPAN_BITS.
        let mut bits: BitVector<u64> = BitVector::with_fill(DENSE_SPAN_BITS + 64, false);
        for i in 0..4095 {
            bits.set_bit(i, true);
        }
        bits.set_bit(DENSE_SPAN_BITS - 1, true);

        let select = HybridSelect::new(bits, true).unwrap();
        assert_eq!(4096, select.occurrences());
        assert_eq!(4094, select.select(4095));
        assert_eq!(DENSE_SPAN_BITS - 1, select.select(4096));
    }

    #[test]
    fn sparse_boundary_bucket() {
        // Same shape one bit wider: the bucket must flip to sparse.
        let mut bits: BitVector<u64> = BitVector::with_fill(DENSE_SPAN_BITS + 64, false);
        for i in 0..4095 {
            bits.set_bit(i, true);
        }
        bits.set_bit(DENSE_SPAN_BITS, true);

        let select = HybridSelect::new(bits, true).unwrap();
        assert_eq!(4096, select.occurrences());
        assert_eq!(4094, select.select(4095));
        assert_eq!(DENSE_SPAN_BITS, select.select(4096));
    }

    #[test]
    fn no_occurrences() {
        let bits: BitVector<u64> = BitVector::with_fill(1000, false);
        let select = HybridSelect::new(bits, true).unwrap();
        assert_eq!(0, select.occurrences());
        assert_eq!(None, select.checked_select(1));
    }

    #[test]
    fn empty_is_an_error() {
        let bits: BitVector<u64> = BitVector::new();
        assert!(HybridSelect::new(bits, true).is_err());
    }

    // The whole point of the bucket hierarchy is that its size tracks
    // the occurrence count, not the vector length.
    #[test]
    fn space_tracks_sparsity() {
        let mut dense_bits: BitVector<u64> = BitVector::with_fill(1 << 20, false);
        let mut sparse_bits: BitVector<u64> = BitVector::with_fill(1 << 20, false);
        for i in 0..(1u64 << 20) {
            if i % 2 == 0 {
                dense_bits.set_bit(i, true);
            }
            if i % 512 == 0 {
                sparse_bits.set_bit(i, true);
            }
        }

        let raw_bytes = dense_bits.total_bytes();
        let dense = HybridSelect::new(dense_bits, true).unwrap();
        let sparse = HybridSelect::new(sparse_bits, true).unwrap();

        let dense_aux = dense.total_bytes() - raw_bytes;
        let sparse_aux = sparse.total_bytes() - raw_bytes;
        assert!(sparse_aux < dense_aux / 16);
    }
}
