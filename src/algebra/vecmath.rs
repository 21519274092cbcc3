use super::{FloatT, ScalarMath, VectorMath};
use std::iter::zip;

impl<T: FloatT> VectorMath<T> for [T] {
    fn copy_from(&mut self, src: &[T]) -> &mut Self {
        self.copy_from_slice(src);
        self
    }

    fn scalarop(&mut self, op: impl Fn(T) -> T) -> &mut Self {
        self.iter_mut().for_each(|x| *x = op(*x));
        self
    }

    fn scalarop_from(&mut self, op: impl Fn(T) -> T, v: &[T]) -> &mut Self {
        zip(self.iter_mut(), v).for_each(|(x, &v)| *x = op(v));
        self
    }

    fn translate(&mut self, c: T) -> &mut Self {
        self.scalarop(|x| x + c)
    }

    fn set(&mut self, c: T) -> &mut Self {
        self.scalarop(|_| c)
    }

    fn scale(&mut self, c: T) -> &mut Self {
        self.scalarop(|x| x * c)
    }

    fn recip(&mut self) -> &mut Self {
        self.scalarop(T::recip)
    }

    fn rsqrt(&mut self) -> &mut Self {
        self.scalarop(|x| T::recip(T::sqrt(x)))
    }

    fn negate(&mut self) -> &mut Self {
        self.scalarop(|x| -x)
    }

    fn hadamard(&mut self, y: &[T]) -> &mut Self {
        zip(self.iter_mut(), y).for_each(|(x, &y)| *x *= y);
        self
    }

    fn clip(&mut self, min_thresh: T, max_thresh: T) -> &mut Self {
        self.scalarop(|x| x.clip(min_thresh, max_thresh))
    }

    fn dot(&self, y: &[T]) -> T {
        zip(self, y).map(|(&x, &y)| x * y).fold(T::zero(), |a, v| a + v)
    }

    fn dot_shifted(z: &[T], s: &[T], dz: &[T], ds: &[T], α: T) -> T {
        assert_eq!(z.len(), s.len());
        assert_eq!(z.len(), dz.len());
        assert_eq!(s.len(), ds.len());

        let mut acc = T::zero();
        for i in 0..z.len() {
            acc += (s[i] + α * ds[i]) * (z[i] + α * dz[i]);
        }
        acc
    }

    fn dist(&self, y: &Self) -> T {
        let sq = zip(self, y).fold(T::zero(), |acc, (&x, &y)| {
            let d = x - y;
            acc + d * d
        });
        T::sqrt(sq)
    }

    fn sum(&self) -> T {
        self.iter().fold(T::zero(), |acc, &x| acc + x)
    }

    fn sumsq(&self) -> T {
        self.dot(self)
    }

    fn norm(&self) -> T {
        T::sqrt(self.sumsq())
    }

    fn norm_inf(&self) -> T {
        // NaN poisons the norm rather than silently comparing as false
        let mut out = T::zero();
        for &v in self {
            if v.is_nan() {
                return T::nan();
            }
            out = T::max(out, v.abs());
        }
        out
    }

    fn norm_one(&self) -> T {
        self.iter().fold(T::zero(), |acc, x| acc + x.abs())
    }

    fn norm_inf_scaled(&self, v: &Self) -> T {
        assert_eq!(self.len(), v.len());
        zip(self, v).fold(T::zero(), |acc, (&x, &v)| T::max(acc, T::abs(x * v)))
    }

    fn norm_inf_diff(&self, b: &[T]) -> T {
        zip(self, b).fold(T::zero(), |acc, (&x, &b)| T::max(acc, T::abs(x - b)))
    }

    fn minimum(&self) -> T {
        self.iter().fold(T::infinity(), |acc, &x| T::min(acc, x))
    }

    fn maximum(&self) -> T {
        self.iter().fold(-T::infinity(), |acc, &x| T::max(acc, x))
    }

    fn mean(&self) -> T {
        if self.is_empty() {
            return T::zero();
        }
        self.sum() / T::from_usize(self.len()).unwrap()
    }

    fn is_finite(&self) -> bool {
        self.iter().all(|x| x.is_finite())
    }

    fn axpby(&mut self, a: T, x: &[T], b: T) -> &mut Self {
        assert_eq!(self.len(), x.len());

        zip(self.iter_mut(), x).for_each(|(y, &x)| *y = a * x + b * (*y));
        self
    }

    fn waxpby(&mut self, a: T, x: &[T], b: T, y: &[T]) -> &mut Self {
        assert_eq!(self.len(), x.len());
        assert_eq!(self.len(), y.len());

        for (w, (&x, &y)) in zip(self.iter_mut(), zip(x, y)) {
            *w = a * x + b * y;
        }
        self
    }
}
