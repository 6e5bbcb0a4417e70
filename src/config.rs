use crate::float_trait::Float;

use conv::prelude::*;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Default offset added to every image before the forward transform.
///
/// The transform is defined over strictly positive density-like inputs, so the
/// caller shifts every pixel by this value before handing the image over.
pub const DEFAULT_EPS: f64 = 1e-6;

const DEFAULT_THETA_COUNT: usize = 45;
const DEFAULT_THETA_STEP: usize = 4;

/// Immutable forward-transform configuration shared by training and inference.
///
/// Owns the projection angle grid (degrees), the source and target coordinate
/// ranges passed through to the forward transform, the edge-trim flag and the
/// positivity offset. Constructed once and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: Float")]
pub struct TransformParameters<T>
where
    T: Float,
{
    pub thetas: Array1<T>,
    pub x0_range: [T; 2],
    pub x_range: [T; 2],
    pub rm_edge: bool,
    pub eps: T,
}

impl<T> TransformParameters<T>
where
    T: Float,
{
    pub fn new(thetas: Array1<T>) -> Self {
        Self {
            thetas,
            x0_range: [T::zero(), T::one()],
            x_range: [T::zero(), T::one()],
            rm_edge: false,
            eps: DEFAULT_EPS.approx().unwrap(),
        }
    }

    /// Default grid for the unsigned variant: `[0, 180)` degrees downsampled
    /// four-fold, i.e. 45 angles from 0 to 176 inclusive.
    pub fn rcdt_default() -> Self {
        Self::new(degree_grid(DEFAULT_THETA_COUNT, DEFAULT_THETA_STEP))
    }

    /// Default grid for the signed variant, numerically the same 45-point
    /// 0..=176 grid as [Self::rcdt_default].
    pub fn rscdt_default() -> Self {
        Self::new(degree_grid(DEFAULT_THETA_COUNT, DEFAULT_THETA_STEP))
    }

    pub fn with_thetas(mut self, thetas: Array1<T>) -> Self {
        self.thetas = thetas;
        self
    }

    pub fn with_rm_edge(mut self, rm_edge: bool) -> Self {
        self.rm_edge = rm_edge;
        self
    }

    pub fn num_angles(&self) -> usize {
        self.thetas.len()
    }
}

fn degree_grid<T>(count: usize, step: usize) -> Array1<T>
where
    T: Float,
{
    (0..count).map(|k| (step * k).approx().unwrap()).collect()
}
