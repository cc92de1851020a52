//! A trait for computing space usage.

use std::mem;

/// Computes the space usage of an object.
///
/// Space is split into a stack portion (returned by `stack_bytes`), the
/// statically-known size of every object of the type, and a heap portion
/// (returned by `heap_bytes`), the additional owned allocation that
/// depends on run-time factors. An index structure's overhead relative to
/// the vector it indexes is `index.total_bytes()` over
/// `vector.total_bytes()`.
pub trait SpaceUsage: Sized {
    /// Computes the size of the receiver in bytes.
    ///
    /// This includes not just the immediate stack object, but any heap
    /// memory that it owns.
    ///
    /// The default implementation returns
    /// `Self::stack_bytes() + self.heap_bytes()`.
    #[inline]
    fn total_bytes(&self) -> usize {
        Self::stack_bytes() + self.heap_bytes()
    }

    /// Is the size of this type known statically?
    ///
    /// If this method returns true then `heap_bytes` should always
    /// return 0.
    fn is_stack_only() -> bool;

    /// Calculates the stack portion of the size of this type.
    ///
    /// The default implementation returns `std::mem::size_of::<Self>()`.
    #[inline]
    fn stack_bytes() -> usize {
        mem::size_of::<Self>()
    }

    /// Calculates the heap portion of the size of an object.
    ///
    /// This is the memory owned by the object beyond what is counted in
    /// `stack_bytes`, typically the backing arrays of containers.
    fn heap_bytes(&self) -> usize;
}

impl_stack_only_space_usage!(());
impl_stack_only_space_usage!(bool);
impl_stack_only_space_usage!(u8);
impl_stack_only_space_usage!(u16);
impl_stack_only_space_usage!(u32);
impl_stack_only_space_usage!(u64);
impl_stack_only_space_usage!(usize);
impl_stack_only_space_usage!(i8);
impl_stack_only_space_usage!(i16);
impl_stack_only_space_usage!(i32);
impl_stack_only_space_usage!(i64);
impl_stack_only_space_usage!(isize);

impl<'a, T> SpaceUsage for &'a T {
    fn is_stack_only() -> bool {
        true
    }
    fn heap_bytes(&self) -> usize {
        0
    }
}

impl<'a, T> SpaceUsage for &'a [T] {
    fn is_stack_only() -> bool {
        true
    }
    fn heap_bytes(&self) -> usize {
        0
    }
}

impl<A: SpaceUsage> SpaceUsage for Vec<A> {
    #[inline]
    fn is_stack_only() -> bool {
        false
    }

    fn heap_bytes(&self) -> usize {
        let mut result = self.capacity() * A::stack_bytes();

        if !A::is_stack_only() {
            for each in self {
                result += each.heap_bytes();
            }
        }

        result
    }
}

impl<A: SpaceUsage> SpaceUsage for Box<A> {
    #[inline]
    fn is_stack_only() -> bool {
        false
    }

    fn stack_bytes() -> usize {
        mem::size_of::<Self>()
    }

    fn heap_bytes(&self) -> usize {
        use std::ops::Deref;
        self.deref().total_bytes()
    }
}
