use crate::float_trait::Float;

use ndarray::{Array3, ArrayView1, ArrayView3, s};

/// Appends two synthetic translation-deformation samples to one class's
/// transformed data.
///
/// `v1[k] = cos(theta_k)` and `v2[k] = sin(theta_k)` are broadcast over the
/// projection axis and appended along the sample axis, injecting the basis
/// directions of pure horizontal and vertical translation so the fitted
/// subspace absorbs small shifts without real deformed training images.
pub fn add_translation_samples<T>(
    features: ArrayView3<'_, T>,
    thetas_deg: ArrayView1<'_, T>,
) -> Array3<T>
where
    T: Float,
{
    let (n_samples, proj_len, n_angles) = features.dim();
    debug_assert_eq!(n_angles, thetas_deg.len());

    let mut out = Array3::zeros((n_samples + 2, proj_len, n_angles));
    out.slice_mut(s![..n_samples, .., ..]).assign(&features);
    for (k, &theta) in thetas_deg.iter().enumerate() {
        let radians = theta.to_radians();
        out.slice_mut(s![n_samples, .., k]).fill(radians.cos());
        out.slice_mut(s![n_samples + 1, .., k]).fill(radians.sin());
    }
    out
}
