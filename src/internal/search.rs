use num_traits::PrimInt;

/// Averages two `PrimInt`s without overflowing.
pub fn average<P: PrimInt>(x: P, y: P) -> P {
    let almost_average = (x >> 1) + (y >> 1);
    let extra_bit = (x & P::one()) + (y & P::one()) >> 1;

    almost_average + extra_bit
}

/// Finds the smallest `d: D` in the interval `start .. limit` such
/// that `f(d) >= value`; requires that `f` be monotonically
/// non-decreasing.
///
/// Does not call `f` on `D`s outside the specified interval.
pub fn binary_search_function<D, R, F>(mut start: D, mut limit: D, value: R, f: F) -> Option<D>
where
    D: PrimInt,
    R: Ord,
    F: Fn(D) -> R,
{
    if start >= limit {
        return None;
    }
    if f(start) >= value {
        return Some(start);
    }

    // Now we know the answer isn't `start`, which means for every
    // candidate `mid`, `mid - 1` will still be in the domain of `f`.
    start = start + D::one();

    while start < limit {
        let mid = average(start, limit);

        if f(mid) >= value {
            if f(mid - D::one()) < value {
                return Some(mid);
            } else {
                limit = mid;
            }
        } else {
            start = mid + D::one();
        }
    }

    None
}
