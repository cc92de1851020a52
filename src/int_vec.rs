//! Bit-packed vectors of fixed-width unsigned integers.

use crate::space_usage::SpaceUsage;
use crate::storage::{Address, BlockType};

/// A vector of *k*-bit unsigned integers, with *k* fixed at creation.
///
/// Elements are packed end to end with no padding, little-endian within
/// each storage block, so a vector of n elements occupies
/// `ceil(n * k / Block::nbits())` blocks. The rank structures keep their
/// counters here, sized via `ceil_lg` of the largest value a counter can
/// take, and the sparse select buckets keep their positions here.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct IntVector<Block: BlockType = u64> {
    element_bits: usize,
    len: u64,
    blocks: Vec<Block>,
}

impl<Block: BlockType> IntVector<Block> {
    // Element widths are a construction-time programming decision, so a
    // bad one fails fast rather than returning an error.
    fn check_element_bits(element_bits: usize) {
        assert!(
            element_bits != 0,
            "IntVector: cannot have zero-size elements"
        );
        assert!(
            element_bits <= Block::nbits(),
            "IntVector: element size cannot exceed block size"
        );
    }

    fn check_value(&self, element_value: Block) {
        assert!(
            element_value <= Block::low_mask(self.element_bits),
            "IntVector: value too large for element size"
        );
    }

    /// Creates a new, empty vector of `element_bits`-bit integers.
    ///
    /// # Panics
    ///
    /// Panics if `element_bits` is zero or exceeds `Block::nbits()`.
    pub fn new(element_bits: usize) -> Self {
        Self::check_element_bits(element_bits);
        IntVector {
            element_bits,
            len: 0,
            blocks: Vec::new(),
        }
    }

    /// Creates a new, empty vector of `element_bits`-bit integers with
    /// storage allocated for `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics if `element_bits` is invalid (see [`new`](#method.new)) or
    /// the required storage overflows a `usize`.
    pub fn with_capacity(element_bits: usize, capacity: u64) -> Self {
        Self::check_element_bits(element_bits);
        let block_capacity = capacity
            .checked_mul(element_bits as u64)
            .and_then(Block::checked_ceil_div_nbits)
            .expect("IntVector::with_capacity: overflow");
        IntVector {
            element_bits,
            len: 0,
            blocks: Vec::with_capacity(block_capacity),
        }
    }

    /// The size of each element in bits.
    #[inline]
    pub fn element_bits(&self) -> usize {
        self.element_bits
    }

    /// The number of elements in the vector.
    #[inline]
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Whether the vector holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    fn element_address(&self, element_index: u64) -> Address {
        debug_assert!(element_index < self.len, "IntVector: index out of bounds");
        Address::new::<Block>(element_index * self.element_bits as u64)
    }

    /// Returns the element at the given index.
    ///
    /// # Panics
    ///
    /// Debug mode only: panics if `element_index` is out of bounds; in
    /// release the underlying storage access still bounds checks.
    pub fn get(&self, element_index: u64) -> Block {
        let element_bits = self.element_bits;
        let address = self.element_address(element_index);
        let margin = Block::nbits() - address.bit_offset;

        if margin >= element_bits {
            let block = self.blocks[address.block_index];
            return block.get_bits(address.bit_offset, element_bits);
        }

        let extra = element_bits - margin;

        let block1 = self.blocks[address.block_index];
        let block2 = self.blocks[address.block_index + 1];

        let low_bits = block1.get_bits(address.bit_offset, margin);
        let high_bits = block2.get_bits(0, extra);

        (high_bits << margin) | low_bits
    }

    /// Sets the element at the given index.
    ///
    /// # Panics
    ///
    /// Panics if `element_value` doesn't fit in the element size; debug
    /// mode additionally panics if `element_index` is out of bounds.
    pub fn set(&mut self, element_index: u64, element_value: Block) {
        self.check_value(element_value);

        let element_bits = self.element_bits;
        let address = self.element_address(element_index);
        let margin = Block::nbits() - address.bit_offset;

        if margin >= element_bits {
            let old_block = self.blocks[address.block_index];
            self.blocks[address.block_index] =
                old_block.with_bits(address.bit_offset, element_bits, element_value);
            return;
        }

        let extra = element_bits - margin;

        let old_block1 = self.blocks[address.block_index];
        let old_block2 = self.blocks[address.block_index + 1];

        self.blocks[address.block_index] =
            old_block1.with_bits(address.bit_offset, margin, element_value);
        self.blocks[address.block_index + 1] =
            old_block2.with_bits(0, extra, element_value >> margin);
    }

    /// Pushes an element onto the end of the vector.
    ///
    /// # Panics
    ///
    /// Panics if `element_value` doesn't fit in the element size.
    pub fn push(&mut self, element_value: Block) {
        self.check_value(element_value);

        let bits_needed = (self.len + 1) * self.element_bits as u64;
        while (self.blocks.len() as u64) * (Block::nbits() as u64) < bits_needed {
            self.blocks.push(Block::zero());
        }

        self.len += 1;
        let index = self.len - 1;
        self.set(index, element_value);
    }
}

impl<Block: BlockType> SpaceUsage for IntVector<Block> {
    fn is_stack_only() -> bool {
        false
    }

    fn heap_bytes(&self) -> usize {
        self.blocks.heap_bytes()
    }
}
