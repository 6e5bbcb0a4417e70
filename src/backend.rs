use crate::float_trait::Float;

use nalgebra::DMatrix;
use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// Dense-matrix execution strategy for the projection-residual arithmetic.
///
/// Selected once at classifier construction. Both paths compute the same
/// `proj = X B^T`, `recon = proj B`, per-row `‖recon − X‖` sequence and must
/// agree within floating tolerance; the alternate path exists so a different
/// numeric backend can be swapped in without touching the decision rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Backend {
    /// Reference path on ndarray dot products.
    #[default]
    Ndarray,
    /// Alternate path on nalgebra dense matrices.
    Nalgebra,
}

impl Backend {
    /// Per-sample Euclidean distance between each row of `x` and its
    /// projection onto the row space of `basis`.
    pub fn residuals<T>(self, x: &Array2<T>, basis: ArrayView2<'_, T>) -> Array1<T>
    where
        T: Float,
    {
        match self {
            Self::Ndarray => ndarray_residuals(x, basis),
            Self::Nalgebra => nalgebra_residuals(x, basis),
        }
    }
}

fn ndarray_residuals<T>(x: &Array2<T>, basis: ArrayView2<'_, T>) -> Array1<T>
where
    T: Float,
{
    let proj = x.dot(&basis.t());
    let recon = proj.dot(&basis);
    let diff = recon - x;
    diff.map_axis(Axis(1), |row| row.dot(&row).sqrt())
}

fn nalgebra_residuals<T>(x: &Array2<T>, basis: ArrayView2<'_, T>) -> Array1<T>
where
    T: Float,
{
    let xm = DMatrix::from_row_iterator(x.nrows(), x.ncols(), x.iter().copied());
    let bm = DMatrix::from_row_iterator(basis.nrows(), basis.ncols(), basis.iter().copied());
    let proj = &xm * bm.transpose();
    let recon = proj * bm;
    let diff = recon - xm;
    diff.row_iter().map(|row| row.norm()).collect()
}
