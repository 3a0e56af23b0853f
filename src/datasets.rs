//! Small built-in datasets.

use crate::{EuclideanDistance, KMeans, Result};

/// Fisher's iris dataset [row-major]: sepal length, sepal width, petal length and petal width (cm)
/// of 150 samples, in dataset order: 50 setosa, 50 versicolor, 50 virginica.
pub const IRIS: [f64; 600] = [
    5.1, 3.5, 1.4, 0.2, 4.9, 3.0, 1.4, 0.2, 4.7, 3.2, 1.3, 0.2,
    4.6, 3.1, 1.5, 0.2, 5.0, 3.6, 1.4, 0.2, 5.4, 3.9, 1.7, 0.4,
    4.6, 3.4, 1.4, 0.3, 5.0, 3.4, 1.5, 0.2, 4.4, 2.9, 1.4, 0.2,
    4.9, 3.1, 1.5, 0.1, 5.4, 3.7, 1.5, 0.2, 4.8, 3.4, 1.6, 0.2,
    4.8, 3.0, 1.4, 0.1, 4.3, 3.0, 1.1, 0.1, 5.8, 4.0, 1.2, 0.2,
    5.7, 4.4, 1.5, 0.4, 5.4, 3.9, 1.3, 0.4, 5.1, 3.5, 1.4, 0.3,
    5.7, 3.8, 1.7, 0.3, 5.1, 3.8, 1.5, 0.3, 5.4, 3.4, 1.7, 0.2,
    5.1, 3.7, 1.5, 0.4, 4.6, 3.6, 1.0, 0.2, 5.1, 3.3, 1.7, 0.5,
    4.8, 3.4, 1.9, 0.2, 5.0, 3.0, 1.6, 0.2, 5.0, 3.4, 1.6, 0.4,
    5.2, 3.5, 1.5, 0.2, 5.2, 3.4, 1.4, 0.2, 4.7, 3.2, 1.6, 0.2,
    4.8, 3.1, 1.6, 0.2, 5.4, 3.4, 1.5, 0.4, 5.2, 4.1, 1.5, 0.1,
    5.5, 4.2, 1.4, 0.2, 4.9, 3.1, 1.5, 0.2, 5.0, 3.2, 1.2, 0.2,
    5.5, 3.5, 1.3, 0.2, 4.9, 3.6, 1.4, 0.1, 4.4, 3.0, 1.3, 0.2,
    5.1, 3.4, 1.5, 0.2, 5.0, 3.5, 1.3, 0.3, 4.5, 2.3, 1.3, 0.3,
    4.4, 3.2, 1.3, 0.2, 5.0, 3.5, 1.6, 0.6, 5.1, 3.8, 1.9, 0.4,
    4.8, 3.0, 1.4, 0.3, 5.1, 3.8, 1.6, 0.2, 4.6, 3.2, 1.4, 0.2,
    5.3, 3.7, 1.5, 0.2, 5.0, 3.3, 1.4, 0.2, 7.0, 3.2, 4.7, 1.4,
    6.4, 3.2, 4.5, 1.5, 6.9, 3.1, 4.9, 1.5, 5.5, 2.3, 4.0, 1.3,
    6.5, 2.8, 4.6, 1.5, 5.7, 2.8, 4.5, 1.3, 6.3, 3.3, 4.7, 1.6,
    4.9, 2.4, 3.3, 1.0, 6.6, 2.9, 4.6, 1.3, 5.2, 2.7, 3.9, 1.4,
    5.0, 2.0, 3.5, 1.0, 5.9, 3.0, 4.2, 1.5, 6.0, 2.2, 4.0, 1.0,
    6.1, 2.9, 4.7, 1.4, 5.6, 2.9, 3.6, 1.3, 6.7, 3.1, 4.4, 1.4,
    5.6, 3.0, 4.5, 1.5, 5.8, 2.7, 4.1, 1.0, 6.2, 2.2, 4.5, 1.5,
    5.6, 2.5, 3.9, 1.1, 5.9, 3.2, 4.8, 1.8, 6.1, 2.8, 4.0, 1.3,
    6.3, 2.5, 4.9, 1.5, 6.1, 2.8, 4.7, 1.2, 6.4, 2.9, 4.3, 1.3,
    6.6, 3.0, 4.4, 1.4, 6.8, 2.8, 4.8, 1.4, 6.7, 3.0, 5.0, 1.7,
    6.0, 2.9, 4.5, 1.5, 5.7, 2.6, 3.5, 1.0, 5.5, 2.4, 3.8, 1.1,
    5.5, 2.4, 3.7, 1.0, 5.8, 2.7, 3.9, 1.2, 6.0, 2.7, 5.1, 1.6,
    5.4, 3.0, 4.5, 1.5, 6.0, 3.4, 4.5, 1.6, 6.7, 3.1, 4.7, 1.5,
    6.3, 2.3, 4.4, 1.3, 5.6, 3.0, 4.1, 1.3, 5.5, 2.5, 4.0, 1.3,
    5.5, 2.6, 4.4, 1.2, 6.1, 3.0, 4.6, 1.4, 5.8, 2.6, 4.0, 1.2,
    5.0, 2.3, 3.3, 1.0, 5.6, 2.7, 4.2, 1.3, 5.7, 3.0, 4.2, 1.2,
    5.7, 2.9, 4.2, 1.3, 6.2, 2.9, 4.3, 1.3, 5.1, 2.5, 3.0, 1.1,
    5.7, 2.8, 4.1, 1.3, 6.3, 3.3, 6.0, 2.5, 5.8, 2.7, 5.1, 1.9,
    7.1, 3.0, 5.9, 2.1, 6.3, 2.9, 5.6, 1.8, 6.5, 3.0, 5.8, 2.2,
    7.6, 3.0, 6.6, 2.1, 4.9, 2.5, 4.5, 1.7, 7.3, 2.9, 6.3, 1.8,
    6.7, 2.5, 5.8, 1.8, 7.2, 3.6, 6.1, 2.5, 6.5, 3.2, 5.1, 2.0,
    6.4, 2.7, 5.3, 1.9, 6.8, 3.0, 5.5, 2.1, 5.7, 2.5, 5.0, 2.0,
    5.8, 2.8, 5.1, 2.4, 6.4, 3.2, 5.3, 2.3, 6.5, 3.0, 5.5, 1.8,
    7.7, 3.8, 6.7, 2.2, 7.7, 2.6, 6.9, 2.3, 6.0, 2.2, 5.0, 1.5,
    6.9, 3.2, 5.7, 2.3, 5.6, 2.8, 4.9, 2.0, 7.7, 2.8, 6.7, 2.0,
    6.3, 2.7, 4.9, 1.8, 6.7, 3.3, 5.7, 2.1, 7.2, 3.2, 6.0, 1.8,
    6.2, 2.8, 4.8, 1.8, 6.1, 3.0, 4.9, 1.8, 6.4, 2.8, 5.6, 2.1,
    7.2, 3.0, 5.8, 1.6, 7.4, 2.8, 6.1, 1.9, 7.9, 3.8, 6.4, 2.0,
    6.4, 2.8, 5.6, 2.2, 6.3, 2.8, 5.1, 1.5, 6.1, 2.6, 5.6, 1.4,
    7.7, 3.0, 6.1, 2.3, 6.3, 3.4, 5.6, 2.4, 6.4, 3.1, 5.5, 1.8,
    6.0, 3.0, 4.8, 1.8, 6.9, 3.1, 5.4, 2.1, 6.7, 3.1, 5.6, 2.4,
    6.9, 3.1, 5.1, 2.3, 5.8, 2.7, 5.1, 1.9, 6.8, 3.2, 5.9, 2.3,
    6.7, 3.3, 5.7, 2.5, 6.7, 3.0, 5.2, 2.3, 6.3, 2.5, 5.0, 1.9,
    6.5, 3.0, 5.2, 2.0, 6.2, 3.4, 5.4, 2.3, 5.9, 3.0, 5.1, 1.8,
];

/// Amount of dimensions of [`IRIS`].
pub const IRIS_DIMS: usize = 4;

/// Petal length and petal width of [`IRIS`] [row-major].
pub const IRIS_PETALS: [f64; 300] = petal_columns();

/// Amount of dimensions of [`IRIS_PETALS`].
pub const IRIS_PETALS_DIMS: usize = 2;

const fn petal_columns() -> [f64; 300] {
    let mut petals = [0.0; 300];
    let mut i = 0;
    while i < 150 {
        petals[i * IRIS_PETALS_DIMS] = IRIS[i * IRIS_DIMS + 2];
        petals[i * IRIS_PETALS_DIMS + 1] = IRIS[i * IRIS_DIMS + 3];
        i += 1;
    }
    petals
}

/// [`IRIS`] as a ready to use sample set.
pub fn iris() -> Result<KMeans<f64>> {
    KMeans::new(IRIS.to_vec(), IRIS.len() / IRIS_DIMS, IRIS_DIMS, EuclideanDistance)
}

/// [`IRIS_PETALS`] as a ready to use sample set.
pub fn iris_petals() -> Result<KMeans<f64>> {
    KMeans::new(IRIS_PETALS.to_vec(), IRIS_PETALS.len() / IRIS_PETALS_DIMS, IRIS_PETALS_DIMS, EuclideanDistance)
}

#[cfg(test)]
mod tests {
    #[test]
    fn iris_shape() {
        let kmean = super::iris().unwrap();
        assert_eq!(kmean.sample_cnt(), 150);
        assert_eq!(kmean.sample_dims(), 4);
        assert_eq!(kmean.sample(0), &[5.1, 3.5, 1.4, 0.2]);
        assert_eq!(kmean.sample(149), &[5.9, 3.0, 5.1, 1.8]);

        let column_sums: Vec<f64> = (0..4)
            .map(|d| (0..150).map(|i| kmean.sample(i)[d]).sum())
            .collect();
        for (sum, expected) in column_sums.iter().zip(&[876.5, 458.6, 563.7, 179.9]) {
            assert_approx_eq!(*sum, *expected, 1e-9);
        }
    }

    #[test]
    fn iris_petals_shape() {
        let kmean = super::iris_petals().unwrap();
        assert_eq!(kmean.sample_cnt(), 150);
        assert_eq!(kmean.sample_dims(), 2);
        assert_eq!(kmean.sample(0), &[1.4, 0.2]);
        assert_eq!(kmean.sample(149), &[5.1, 1.8]);
    }
}
