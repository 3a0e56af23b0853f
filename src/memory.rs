use num::{NumCast, Zero, Float};
use std::{
    fmt::{Debug, Display, LowerExp}, iter::Sum, ops::{Add, AddAssign, Sub, SubAssign}
};
use rand::distributions::uniform::SampleUniform;

pub trait Primitive: Add + AddAssign + Sum + Sub + SubAssign + Zero + Float + NumCast + SampleUniform
                + PartialOrd + Copy + Default + Display + Debug + Sync + Send + LowerExp + 'static
                + for<'a> AddAssign<&'a Self> + for<'a> Sub<&'a Self> {}
impl Primitive for f32 {}
impl Primitive for f64 {}


/// Row-major sample storage: `cnt` samples of `dims` values each.
pub(crate) fn row<T: Primitive>(data: &[T], dims: usize, idx: usize) -> &[T] {
    &data[idx * dims..(idx + 1) * dims]
}

pub(crate) fn row_mut<T: Primitive>(data: &mut [T], dims: usize, idx: usize) -> &mut [T] {
    &mut data[idx * dims..(idx + 1) * dims]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_access() {
        let mut data = vec![0.0f64, 1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(row(&data, 2, 1), &[2.0, 3.0]);
        assert_eq!(row(&data, 3, 1), &[3.0, 4.0, 5.0]);
        row_mut(&mut data, 2, 2).copy_from_slice(&[9.0, 8.0]);
        assert_eq!(data, vec![0.0, 1.0, 2.0, 3.0, 9.0, 8.0]);
    }
}
