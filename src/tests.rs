pub use crate::batch::Parallelism;
pub use crate::config::TransformParameters;
pub use crate::error::{FitError, PredictError};
pub use crate::float_trait::Float;
pub use crate::transform::ForwardTransform;

pub use ndarray::{Array1, Array2, Array3, ArrayView1, ArrayView2, Axis, s};
pub use rand::prelude::*;
pub use rand_distr::StandardNormal;

/// Cheap stand-in for the external forward transform: per-angle blend of
/// column and row mass profiles of the image. Deterministic, linear in the
/// image, and shaped like the real transform output
/// (projection-length × angle-count, minus two rows with edge trimming).
#[derive(Clone, Debug)]
pub struct ProjectionStub;

impl<T> ForwardTransform<T> for ProjectionStub
where
    T: Float,
{
    fn forward(
        &self,
        thetas: ArrayView1<T>,
        _x0_range: [T; 2],
        _template: ArrayView2<T>,
        _x_range: [T; 2],
        image: ArrayView2<T>,
        rm_edge: bool,
    ) -> Array2<T> {
        debug_assert_eq!(image.nrows(), image.ncols(), "stub expects square images");
        let col_mass = image.sum_axis(Axis(0));
        let row_mass = image.sum_axis(Axis(1));
        let proj_len = image.nrows();
        let mut out = Array2::zeros((proj_len, thetas.len()));
        for (k, &theta) in thetas.iter().enumerate() {
            let radians = theta.to_radians();
            let c2 = radians.cos() * radians.cos();
            let s2 = radians.sin() * radians.sin();
            for i in 0..proj_len {
                out[(i, k)] = c2 * col_mass[i] + s2 * row_mass[i];
            }
        }
        if rm_edge {
            out.slice(s![1..proj_len - 1, ..]).to_owned()
        } else {
            out
        }
    }
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(0)
}

/// Filled disk of the given radius centered in an n×n frame.
pub fn disk_image(n: usize, radius: f64) -> Array2<f64> {
    let center = (n as f64 - 1.0) / 2.0;
    Array2::from_shape_fn((n, n), |(i, j)| {
        let di = i as f64 - center;
        let dj = j as f64 - center;
        if di * di + dj * dj <= radius * radius {
            1.0
        } else {
            0.0
        }
    })
}

/// Filled axis-aligned square with the given half-side centered in an
/// n×n frame.
pub fn square_image(n: usize, half_side: f64) -> Array2<f64> {
    let center = (n as f64 - 1.0) / 2.0;
    Array2::from_shape_fn((n, n), |(i, j)| {
        let di = (i as f64 - center).abs();
        let dj = (j as f64 - center).abs();
        if di <= half_side && dj <= half_side {
            1.0
        } else {
            0.0
        }
    })
}

/// Four brightness-scaled copies of one disk, shape (4, 16, 16).
pub fn disk_batch() -> Array3<f64> {
    brightness_batch(disk_image(16, 5.0))
}

/// Four brightness-scaled copies of one square, shape (4, 16, 16).
pub fn square_batch() -> Array3<f64> {
    brightness_batch(square_image(16, 4.0))
}

fn brightness_batch(image: Array2<f64>) -> Array3<f64> {
    let n = image.nrows();
    let mut out = Array3::zeros((4, n, n));
    for sample in 0..4 {
        let scale = (sample + 1) as f64;
        out.index_axis_mut(Axis(0), sample)
            .assign(&image.mapv(|x| scale * x));
    }
    out
}

/// Batch of distinct deterministic shapes: disks and squares of growing size.
pub fn shape_batch(count: usize, n: usize) -> Array3<f64> {
    let mut out = Array3::zeros((count, n, n));
    for sample in 0..count {
        let size = 3.0 + sample as f64 * 0.7;
        let image = if sample % 2 == 0 {
            disk_image(n, size)
        } else {
            square_image(n, size)
        };
        out.index_axis_mut(Axis(0), sample).assign(&image);
    }
    out
}

/// Positive random images, strictly positive pixel values.
pub fn random_images(rng: &mut StdRng, count: usize, n: usize) -> Array3<f64> {
    Array3::from_shape_fn((count, n, n), |_| {
        let x: f64 = rng.sample(StandardNormal);
        x.abs() + 0.1
    })
}

pub fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Array2<f64> {
    Array2::from_shape_fn((rows, cols), |_| rng.sample(StandardNormal))
}
