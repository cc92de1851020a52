//! Macros for export.

/// Implements `SpaceUsage` for a stack-only (`Copy`) type.
///
/// # Example
///
/// ```
/// use std::mem;
/// use ranksel::SpaceUsage;
///
/// # #[allow(dead_code)]
/// struct Point { x: u32, y: u32 }
///
/// ranksel::impl_stack_only_space_usage!(Point);
///
/// fn main() {
///     let point = Point { x: 0, y: 0 };
///     assert_eq!(point.total_bytes(), mem::size_of::<Point>());
/// }
/// ```
#[macro_export]
macro_rules! impl_stack_only_space_usage {
    ( $t:ty ) => {
        impl $crate::SpaceUsage for $t {
            #[inline]
            fn is_stack_only() -> bool {
                true
            }
            #[inline]
            fn heap_bytes(&self) -> usize {
                0
            }
        }
    };
}

/// Implements `BitVec` for a type that contains a `BitVec` field.
#[macro_export]
macro_rules! impl_bit_vec_adapter {
    ( $block:ty, $field:ident ) => {
        type Block = $block;

        fn bit_len(&self) -> u64 {
            self.$field.bit_len()
        }

        fn block_len(&self) -> usize {
            self.$field.block_len()
        }

        fn get_block(&self, index: usize) -> $block {
            self.$field.get_block(index)
        }

        fn get_bit(&self, index: u64) -> bool {
            self.$field.get_bit(index)
        }
    };
}
