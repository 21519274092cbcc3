use super::{FloatT, ScalarMath};

impl<T> ScalarMath for T
where
    T: FloatT,
{
    fn clip(&self, min_thresh: T, max_thresh: T) -> T {
        T::min(T::max(*self, min_thresh), max_thresh)
    }
}
