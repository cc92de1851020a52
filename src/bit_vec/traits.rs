use crate::storage::{Address, BlockType};

/// Read-only bit vector operations.
///
/// Minimal complete definition is `get_block`; `get_bit` has a default
/// in terms of it. Index structures are generic over this trait, so they
/// can be layered over a [`BitVector`](struct.BitVector.html), a plain
/// `Vec<u64>`, or a borrowed `&[u64]`.
pub trait BitVec {
    /// The underlying block type used to store the bits of the vector.
    type Block: BlockType;

    /// The length of the vector in bits.
    fn bit_len(&self) -> u64;

    /// The length of the vector in blocks.
    fn block_len(&self) -> usize {
        Self::Block::ceil_div_nbits(self.bit_len())
    }

    /// Gets the block at `position`.
    ///
    /// The bits are laid out `Block::nbits()` per block, with the
    /// notional zeroth bit in the least significant position. If
    /// `self.bit_len()` is not a multiple of `Block::nbits()` then the
    /// last block's extra bits must read as zero, so that whole-block
    /// popcounts over the raw storage are exact.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    fn get_block(&self, position: usize) -> Self::Block;

    /// Gets the bit at `position`.
    ///
    /// The default implementation calls `get_block` and masks out the
    /// correct bit.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    fn get_bit(&self, position: u64) -> bool {
        assert!(position < self.bit_len(), "BitVec::get_bit: out of bounds");

        let address = Address::new::<Self::Block>(position);
        let block = self.get_block(address.block_index);
        block.get_bit(address.bit_offset)
    }
}

/// Mutable bit vector operations that don't affect the length.
pub trait BitVecMut: BitVec {
    /// Sets the block at `position` to `value`.
    ///
    /// Implementations must keep any extra bits in the last block zero.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    fn set_block(&mut self, position: usize, value: Self::Block);

    /// Sets the bit at `position` to `value`.
    ///
    /// The default implementation uses `get_block` and `set_block`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of bounds.
    fn set_bit(&mut self, position: u64, value: bool) {
        assert!(
            position < self.bit_len(),
            "BitVecMut::set_bit: out of bounds"
        );

        let address = Address::new::<Self::Block>(position);
        let old_block = self.get_block(address.block_index);
        let new_block = old_block.with_bit(address.bit_offset, value);
        self.set_block(address.block_index, new_block);
    }
}

/// Bit vector operations that change the length.
pub trait BitVecPush: BitVecMut {
    /// Adds the given bit to the end of the bit vector.
    fn push_bit(&mut self, value: bool);

    /// Removes and returns the last bit, if any.
    fn pop_bit(&mut self) -> Option<bool>;
}

impl<Block: BlockType> BitVec for [Block] {
    type Block = Block;

    #[inline]
    fn bit_len(&self) -> u64 {
        self.len() as u64 * Block::nbits() as u64
    }

    #[inline]
    fn block_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn get_block(&self, position: usize) -> Block {
        self[position]
    }
}

impl<Block: BlockType> BitVecMut for [Block] {
    #[inline]
    fn set_block(&mut self, position: usize, value: Block) {
        self[position] = value;
    }
}

impl<'a, T: BitVec + ?Sized> BitVec for &'a T {
    type Block = T::Block;

    #[inline]
    fn bit_len(&self) -> u64 {
        T::bit_len(*self)
    }

    #[inline]
    fn block_len(&self) -> usize {
        T::block_len(*self)
    }

    #[inline]
    fn get_block(&self, position: usize) -> T::Block {
        T::get_block(*self, position)
    }

    #[inline]
    fn get_bit(&self, position: u64) -> bool {
        T::get_bit(*self, position)
    }
}

impl<Block: BlockType> BitVec for Vec<Block> {
    type Block = Block;

    #[inline]
    fn bit_len(&self) -> u64 {
        self.len() as u64 * Block::nbits() as u64
    }

    #[inline]
    fn block_len(&self) -> usize {
        self.len()
    }

    #[inline]
    fn get_block(&self, position: usize) -> Block {
        self[position]
    }
}

impl<Block: BlockType> BitVecMut for Vec<Block> {
    #[inline]
    fn set_block(&mut self, position: usize, value: Block) {
        self[position] = value;
    }
}
