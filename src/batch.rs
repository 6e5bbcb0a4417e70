use crate::config::TransformParameters;
use crate::error::BatchError;
use crate::float_trait::Float;
use crate::transform::TransformAdapter;

use std::num::NonZeroUsize;

use ndarray::{Array2, Array3, Axis, stack};
use rayon::ThreadPoolBuilder;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Worker-count policy for the batch transform.
///
/// The worker pool is built fresh for every batch call and torn down before
/// the call returns; no pool persists between calls. [Parallelism::Sequential]
/// never builds a pool at all, which gives a deterministic single-threaded
/// path for tests.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parallelism {
    Sequential,
    Threads(NonZeroUsize),
    #[default]
    Available,
}

impl Parallelism {
    /// Effective worker count for a batch of `batch_size` images, never more
    /// workers than images.
    pub fn workers_for(self, batch_size: usize) -> usize {
        let requested = match self {
            Self::Sequential => 1,
            Self::Threads(n) => n.get(),
            Self::Available => std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        };
        requested.min(batch_size).max(1)
    }
}

/// Transforms every image of the batch, fanning work across workers while
/// preserving the input order in the output.
///
/// Equivalent to applying the adapter sequentially to every image in order,
/// whatever the worker count: parallelism here is a throughput optimization
/// only. An empty batch yields an empty array and spawns nothing.
pub fn transform_batch<T, A>(
    adapter: &A,
    params: &TransformParameters<T>,
    images: ndarray::ArrayView3<'_, T>,
    parallelism: Parallelism,
) -> Result<Array3<T>, BatchError>
where
    T: Float,
    A: TransformAdapter<T>,
{
    let batch_size = images.len_of(Axis(0));
    if batch_size == 0 {
        return Ok(Array3::zeros((0, 0, 0)));
    }

    let workers = parallelism.workers_for(batch_size);
    let coefficients: Vec<Array2<T>> = if workers == 1 {
        images
            .axis_iter(Axis(0))
            .map(|image| adapter.coefficients(params, image))
            .collect()
    } else {
        // The pool lives for this call only.
        let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;
        pool.install(|| {
            (0..batch_size)
                .into_par_iter()
                .map(|index| adapter.coefficients(params, images.index_axis(Axis(0), index)))
                .collect()
        })
    };

    let views: Vec<_> = coefficients.iter().map(|c| c.view()).collect();
    Ok(stack(Axis(0), &views)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::*;
    use crate::transform::RcdtAdapter;

    use approx::assert_abs_diff_eq;

    #[test]
    fn empty_batch_yields_empty_result() {
        let params = TransformParameters::<f64>::rcdt_default();
        let adapter = RcdtAdapter::new(ProjectionStub);
        let images = Array3::<f64>::zeros((0, 16, 16));
        let out = transform_batch(&adapter, &params, images.view(), Parallelism::Available).unwrap();
        assert_eq!(out.len_of(Axis(0)), 0);
    }

    #[test]
    fn parallel_output_matches_sequential_for_any_worker_count() {
        let params = TransformParameters::<f64>::rcdt_default();
        let adapter = RcdtAdapter::new(ProjectionStub);
        let images = shape_batch(6, 16);

        let sequential =
            transform_batch(&adapter, &params, images.view(), Parallelism::Sequential).unwrap();
        for workers in 1..=6 {
            let parallel = transform_batch(
                &adapter,
                &params,
                images.view(),
                Parallelism::Threads(NonZeroUsize::new(workers).unwrap()),
            )
            .unwrap();
            assert_abs_diff_eq!(sequential, parallel, epsilon = 1e-12);
        }
    }

    #[test]
    fn worker_count_never_exceeds_batch_size() {
        assert_eq!(Parallelism::Available.workers_for(0), 1);
        assert_eq!(
            Parallelism::Threads(NonZeroUsize::new(16).unwrap()).workers_for(3),
            3
        );
        assert_eq!(Parallelism::Sequential.workers_for(100), 1);
    }

    #[test]
    fn output_shape_is_samples_by_projection_by_angles() {
        let params = TransformParameters::<f64>::rcdt_default();
        let adapter = RcdtAdapter::new(ProjectionStub);
        let images = shape_batch(3, 16);
        let out = transform_batch(&adapter, &params, images.view(), Parallelism::Sequential).unwrap();
        assert_eq!(out.dim(), (3, 16, params.num_angles()));
    }
}
