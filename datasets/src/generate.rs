//! Utility functions for randomly generating cluster datasets

use clusterview::{ClusterId, Dataset};
use ndarray::{s, Array, Array1, Array2, ArrayBase, Data, Ix1, Ix2};
use ndarray_rand::{
    rand::Rng,
    rand_distr::{Distribution, StandardNormal},
    RandomExt,
};

/// Special case of `blobs_with_distribution` with a standard normal distribution.
pub fn blobs(
    blob_size: usize,
    blob_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    rng: &mut impl Rng,
) -> Array2<f64> {
    blobs_with_distribution(blob_size, blob_centroids, StandardNormal, rng)
}

/// Given an input matrix `blob_centroids`, with shape `(n_blobs, n_features)`,
/// generate `blob_size` data points (a "blob") around each of the blob centroids.
///
/// More specifically, each blob is formed by `blob_size` points sampled from a distribution
/// centered in the blob centroid.
pub fn blobs_with_distribution(
    blob_size: usize,
    blob_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    distribution: impl Distribution<f64> + Clone,
    rng: &mut impl Rng,
) -> Array2<f64> {
    let (n_centroids, n_features) = blob_centroids.dim();
    let mut blobs: Array2<f64> = Array2::zeros((n_centroids * blob_size, n_features));

    for (blob_index, blob_centroid) in blob_centroids.rows().into_iter().enumerate() {
        let blob = make_blob(blob_size, &blob_centroid, distribution.clone(), rng);

        let indexes = s![blob_index * blob_size..(blob_index + 1) * blob_size, ..];
        blobs.slice_mut(indexes).assign(&blob);
    }
    blobs
}

/// Same as [`blobs`], but every point is labeled with the index of its centroid
///
/// Rows are grouped by blob, blob `i` carries `ClusterId::Id(i)`.
pub fn labeled_blobs(
    blob_size: usize,
    blob_centroids: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    rng: &mut impl Rng,
) -> Dataset<f64, ClusterId> {
    let records = blobs(blob_size, blob_centroids, rng);
    let targets = (0..blob_centroids.nrows())
        .flat_map(|blob| std::iter::repeat(ClusterId::Id(blob as i64)).take(blob_size))
        .collect::<Array1<_>>();

    Dataset::new(records, targets)
}

/// Generate `blob_size` data points (a "blob") around `blob_centroid` using the given distribution.
fn make_blob(
    blob_size: usize,
    blob_centroid: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    distribution: impl Distribution<f64>,
    rng: &mut impl Rng,
) -> Array2<f64> {
    let shape = (blob_size, blob_centroid.len());
    let origin_blob: Array2<f64> = Array::random_using(shape, distribution, rng);
    origin_blob + blob_centroid
}

#[cfg(test)]
mod tests {
    use super::*;
    use clusterview::dataset::Records;
    use ndarray::array;
    use rand::{rngs::SmallRng, SeedableRng};

    #[test]
    fn labeled_blobs_group_rows_by_centroid() {
        let mut rng = SmallRng::seed_from_u64(42);
        let centroids = array![[0., 0.], [100., 100.], [-100., 50.]];
        let dataset = labeled_blobs(10, &centroids, &mut rng);

        assert_eq!(dataset.nsamples(), 30);
        assert_eq!(dataset.nfeatures(), 2);
        assert_eq!(dataset.labels().len(), 3);
        assert_eq!(dataset.targets()[0], ClusterId::Id(0));
        assert_eq!(dataset.targets()[29], ClusterId::Id(2));
        // blob of centroid 1 stays well separated from the origin
        assert!(dataset.records().row(15)[0] > 50.);
    }
}
