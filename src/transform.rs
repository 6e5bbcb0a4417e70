use crate::config::TransformParameters;
use crate::float_trait::Float;

use conv::prelude::*;
use macro_const::macro_const;
use ndarray::{Array2, ArrayView1, ArrayView2};

/// Forward Radon CDT transform boundary.
///
/// This crate does not implement the transform itself, it consumes it through
/// this call contract: one strictly positive image in, one
/// (projection-length × angle-count) coefficient array out. The signed
/// transform additionally produces reference and mass metadata, none of which
/// is retained downstream, so an implementation of the signed variant returns
/// its coefficient array only and discards the rest.
pub trait ForwardTransform<T>: Clone + Send + Sync
where
    T: Float,
{
    fn forward(
        &self,
        thetas: ArrayView1<T>,
        x0_range: [T; 2],
        template: ArrayView2<T>,
        x_range: [T; 2],
        image: ArrayView2<T>,
        rm_edge: bool,
    ) -> Array2<T>;
}

/// Variant-specific preprocessing in front of a [ForwardTransform].
///
/// An adapter owns the normalization and template conventions of one transform
/// variant and fixes the per-variant default for the translation-deformation
/// model used at fit time.
pub trait TransformAdapter<T>: Clone + Send + Sync
where
    T: Float,
{
    /// Transform one image into its coefficient array.
    fn coefficients(&self, params: &TransformParameters<T>, image: ArrayView2<T>) -> Array2<T>;

    /// Whether fitting augments each class with translation-deformation
    /// samples when the caller does not say otherwise.
    fn deformation_model_default(&self) -> bool;
}

macro_const! {
    const RCDT_DOC: &str = r"
Unsigned Radon CDT adapter

Shifts the image by the positivity offset, normalizes both the image and the
uniform template to unit sum, and forwards them together with the configured
edge-trim flag. The unit-sum normalization makes the input a valid
probability-density-like function, which the unsigned transform requires.
";
}

#[doc = RCDT_DOC!()]
#[derive(Clone, Debug)]
pub struct RcdtAdapter<F> {
    transform: F,
}

impl<F> RcdtAdapter<F> {
    pub fn new(transform: F) -> Self {
        Self { transform }
    }

    pub const fn doc() -> &'static str {
        RCDT_DOC
    }
}

impl<T, F> TransformAdapter<T> for RcdtAdapter<F>
where
    T: Float,
    F: ForwardTransform<T>,
{
    fn coefficients(&self, params: &TransformParameters<T>, image: ArrayView2<T>) -> Array2<T> {
        let positive = image.mapv(|x| x + params.eps);
        let mass = positive.sum();
        let normalized = positive / mass;
        let area: T = image.len().approx().unwrap();
        let template = Array2::from_elem(image.dim(), T::one() / area);
        self.transform.forward(
            params.thetas.view(),
            params.x0_range,
            template.view(),
            params.x_range,
            normalized.view(),
            params.rm_edge,
        )
    }

    fn deformation_model_default(&self) -> bool {
        true
    }
}

macro_const! {
    const RSCDT_DOC: &str = r"
Signed Radon CDT adapter

Shifts the image by the positivity offset and forwards it against an all-ones
uniform template without any normalization; the signed transform handles
positive and negative mass itself. Edge trimming is never requested from the
forward call: the signed variant ignores the configured flag at this point.
";
}

#[doc = RSCDT_DOC!()]
#[derive(Clone, Debug)]
pub struct RscdtAdapter<F> {
    transform: F,
}

impl<F> RscdtAdapter<F> {
    pub fn new(transform: F) -> Self {
        Self { transform }
    }

    pub const fn doc() -> &'static str {
        RSCDT_DOC
    }
}

impl<T, F> TransformAdapter<T> for RscdtAdapter<F>
where
    T: Float,
    F: ForwardTransform<T>,
{
    fn coefficients(&self, params: &TransformParameters<T>, image: ArrayView2<T>) -> Array2<T> {
        let positive = image.mapv(|x| x + params.eps);
        let template = Array2::from_elem(image.dim(), T::one());
        self.transform.forward(
            params.thetas.view(),
            params.x0_range,
            template.view(),
            params.x_range,
            positive.view(),
            false,
        )
    }

    fn deformation_model_default(&self) -> bool {
        false
    }
}
