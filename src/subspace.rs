use crate::error::FitError;
use crate::float_trait::Float;

use conv::prelude::*;
use nalgebra::{DMatrix, SVD};
use ndarray::Array2;

/// Fraction of total singular-value mass a truncated basis must retain.
pub const ENERGY_THRESHOLD: f64 = 0.99;

/// Orthonormal basis of one class's transformed training data.
///
/// The stored basis is the full right-singular-vector matrix of the flattened
/// class data, row count `min(samples, features)`. The energy-based rank is
/// recorded but never applied at storage time: the classifier slices every
/// basis uniformly at predict time using the global maximum rank.
#[derive(Clone, Debug)]
pub struct ClassSubspace<T>
where
    T: Float,
{
    basis: Array2<T>,
    rank: usize,
}

impl<T> ClassSubspace<T>
where
    T: Float,
{
    /// Decomposes one class's flattened (samples × features) training matrix.
    ///
    /// The effective rank is the smallest number of leading singular
    /// directions whose cumulative singular-value mass reaches
    /// [ENERGY_THRESHOLD] of the total.
    pub fn fit(label: usize, flat: &Array2<T>) -> Result<Self, FitError> {
        let (n_samples, n_features) = flat.dim();
        if n_samples == 0 || n_features == 0 {
            return Err(FitError::EmptyClass { label });
        }

        let matrix = DMatrix::from_row_iterator(n_samples, n_features, flat.iter().copied());
        let svd = SVD::try_new(matrix, false, true, T::default_epsilon(), 0)
            .ok_or(FitError::DecompositionFailed { label })?;

        let total: T = svd.singular_values.iter().copied().sum();
        if !(total > T::zero()) {
            return Err(FitError::DecompositionFailed { label });
        }
        let threshold: T = ENERGY_THRESHOLD.approx().unwrap();
        let mut cumulative = T::zero();
        let mut rank = 0;
        for &sigma in svd.singular_values.iter() {
            cumulative += sigma;
            rank += 1;
            if cumulative >= threshold * total {
                break;
            }
        }

        let v_t = svd
            .v_t
            .ok_or(FitError::DecompositionFailed { label })?;
        // Keep at most one basis row per sample; for the usual
        // samples < features case this is the whole of the thin V^T.
        let keep = n_samples.min(v_t.nrows());
        let basis = Array2::from_shape_fn((keep, n_features), |(i, j)| v_t[(i, j)]);

        Ok(Self { basis, rank })
    }

    /// Full stored basis, one orthonormal row per singular direction.
    pub fn basis(&self) -> &Array2<T> {
        &self.basis
    }

    /// Effective rank at the energy threshold.
    pub fn rank(&self) -> usize {
        self.rank
    }
}
