use crate::augment::add_translation_samples;
use crate::backend::Backend;
use crate::batch::{Parallelism, transform_batch};
use crate::config::TransformParameters;
use crate::error::{FitError, PredictError};
use crate::float_trait::Float;
use crate::subspace::ClassSubspace;
use crate::transform::{ForwardTransform, RcdtAdapter, RscdtAdapter, TransformAdapter};

use itertools::Itertools;
use macro_const::macro_const;
use ndarray::{Array1, Array2, ArrayView3, Axis, s};
use ndarray_stats::QuantileExt;

macro_const! {
    const DOC: &str = r"
Nearest-subspace classifier in transform-coefficient space

Training transforms every image into its coefficient array, flattens each
class's samples into a (samples × features) matrix, optionally augmented with
two translation-deformation rows, and keeps the right-singular-vector basis of
every class. The shared subspace length is the largest energy-based rank seen
across classes. Prediction assigns the class minimizing the projection
residual
$$
\mathrm{arg}\min_k \| B^k (B^k)^T x - x \|_2,
$$
where $B^k$ is class $k$'s basis truncated to the shared length and $x$ is the
flattened coefficient vector of a test image.

Labels must be contiguous integers in `[0, num_classes)`. A fitted classifier
is immutable apart from refitting; fit and predict on the same instance must
be serialized by the caller.
";
}

#[doc = DOC!()]
#[derive(Clone, Debug)]
pub struct NsClassifier<T, A>
where
    T: Float,
    A: TransformAdapter<T>,
{
    num_classes: usize,
    params: TransformParameters<T>,
    adapter: A,
    parallelism: Parallelism,
    backend: Backend,
    subspaces: Vec<ClassSubspace<T>>,
    len_subspace: usize,
    num_features: usize,
}

impl<T, A> NsClassifier<T, A>
where
    T: Float,
    A: TransformAdapter<T>,
{
    pub fn new(num_classes: usize, adapter: A, params: TransformParameters<T>) -> Self {
        assert!(num_classes > 0, "at least one class is required");
        Self {
            num_classes,
            params,
            adapter,
            parallelism: Parallelism::default(),
            backend: Backend::default(),
            subspaces: Vec::new(),
            len_subspace: 0,
            num_features: 0,
        }
    }

    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.parallelism = parallelism;
        self
    }

    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    pub const fn doc() -> &'static str {
        DOC
    }

    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    pub fn parameters(&self) -> &TransformParameters<T> {
        &self.params
    }

    /// Shared subspace length, the maximum energy-based rank across classes.
    /// Zero before fitting.
    pub fn len_subspace(&self) -> usize {
        self.len_subspace
    }

    /// Per-class subspaces, index = label. Empty before fitting.
    pub fn subspaces(&self) -> &[ClassSubspace<T>] {
        &self.subspaces
    }

    /// Fits one linear subspace per class, with the adapter's default choice
    /// of the translation-deformation model.
    pub fn fit(&mut self, images: ArrayView3<'_, T>, labels: &[usize]) -> Result<(), FitError> {
        self.fit_with(images, labels, !self.adapter.deformation_model_default())
    }

    /// Fits one linear subspace per class.
    ///
    /// With `no_deform_model = false` every class's transformed data is
    /// augmented with two translation-deformation samples before the
    /// decomposition. Any failing class aborts the whole fit; previously
    /// fitted state is discarded either way.
    pub fn fit_with(
        &mut self,
        images: ArrayView3<'_, T>,
        labels: &[usize],
        no_deform_model: bool,
    ) -> Result<(), FitError> {
        let n_images = images.len_of(Axis(0));
        if n_images != labels.len() {
            return Err(FitError::LengthMismatch {
                images: n_images,
                labels: labels.len(),
            });
        }
        if let Some(&label) = labels.iter().find(|&&l| l >= self.num_classes) {
            return Err(FitError::LabelOutOfRange {
                label,
                num_classes: self.num_classes,
            });
        }

        let transformed = transform_batch(&self.adapter, &self.params, images, self.parallelism)?;
        let (_, proj_len, n_angles) = transformed.dim();

        self.subspaces.clear();
        self.len_subspace = 0;
        self.num_features = proj_len * n_angles;

        for label in 0..self.num_classes {
            let indices: Vec<_> = labels.iter().positions(|&l| l == label).collect();
            if indices.is_empty() {
                return Err(FitError::EmptyClass { label });
            }
            let class_data = transformed.select(Axis(0), &indices);
            let class_data = if no_deform_model {
                class_data
            } else {
                add_translation_samples(class_data.view(), self.params.thetas.view())
            };
            let n_rows = class_data.len_of(Axis(0));
            let flat = class_data
                .into_shape_with_order((n_rows, self.num_features))
                .expect("class data is contiguous");

            let subspace = ClassSubspace::fit(label, &flat)?;
            if subspace.rank() > self.len_subspace {
                self.len_subspace = subspace.rank();
            }
            self.subspaces.push(subspace);
        }

        Ok(())
    }

    /// Predicts one label per test image by nearest-subspace residual,
    /// ties broken towards the lowest class index.
    pub fn predict(&self, images: ArrayView3<'_, T>) -> Result<Array1<usize>, PredictError> {
        if self.subspaces.len() != self.num_classes {
            return Err(PredictError::NotFitted);
        }
        let n_images = images.len_of(Axis(0));
        if n_images == 0 {
            return Ok(Array1::from_vec(Vec::new()));
        }

        let transformed = transform_batch(&self.adapter, &self.params, images, self.parallelism)?;
        let (_, proj_len, n_angles) = transformed.dim();
        let n_features = proj_len * n_angles;
        if n_features != self.num_features {
            return Err(PredictError::FeatureMismatch {
                actual: n_features,
                expected: self.num_features,
            });
        }
        let x = transformed
            .into_shape_with_order((n_images, n_features))
            .expect("transformed batch is contiguous");

        let mut distances = Array2::<T>::zeros((self.num_classes, n_images));
        for (label, subspace) in self.subspaces.iter().enumerate() {
            let rows = subspace.basis().nrows();
            if rows < self.len_subspace {
                // A class with fewer samples than the shared subspace length
                // cannot be sliced consistently with the others.
                return Err(PredictError::BasisTooShort {
                    label,
                    rows,
                    len_subspace: self.len_subspace,
                });
            }
            let basis = subspace.basis().slice(s![..self.len_subspace, ..]);
            let residuals = self.backend.residuals(&x, basis);
            distances.row_mut(label).assign(&residuals);
        }

        distances
            .axis_iter(Axis(1))
            .map(|column| {
                column
                    .argmin()
                    .map_err(|_| PredictError::UndefinedResidualOrder)
            })
            .collect()
    }
}

impl<T, F> NsClassifier<T, RcdtAdapter<F>>
where
    T: Float,
    F: ForwardTransform<T>,
{
    /// Unsigned-variant classifier with the default angle grid.
    pub fn rcdt(num_classes: usize, transform: F) -> Self {
        Self::new(
            num_classes,
            RcdtAdapter::new(transform),
            TransformParameters::rcdt_default(),
        )
    }
}

impl<T, F> NsClassifier<T, RscdtAdapter<F>>
where
    T: Float,
    F: ForwardTransform<T>,
{
    /// Signed-variant classifier with the default angle grid.
    pub fn rscdt(num_classes: usize, transform: F) -> Self {
        Self::new(
            num_classes,
            RscdtAdapter::new(transform),
            TransformParameters::rscdt_default(),
        )
    }
}
