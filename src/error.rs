/// Error returned from the batch transform stage
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("transform produced differently-shaped coefficient arrays: {0}")]
    CoefficientShape(#[from] ndarray::ShapeError),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Error returned from [crate::NsClassifier::fit]
#[derive(Debug, thiserror::Error)]
pub enum FitError {
    #[error("training batch has {images} images but {labels} labels")]
    LengthMismatch { images: usize, labels: usize },

    #[error("label {label} is out of range for {num_classes} classes")]
    LabelOutOfRange { label: usize, num_classes: usize },

    #[error("class {label} has no training samples")]
    EmptyClass { label: usize },

    #[error("singular value decomposition failed for class {label}")]
    DecompositionFailed { label: usize },

    #[error(transparent)]
    Batch(#[from] BatchError),
}

/// Error returned from [crate::NsClassifier::predict]
#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("predict called before fit")]
    NotFitted,

    #[error("test features have length {actual}, the classifier was fitted with {expected}")]
    FeatureMismatch { actual: usize, expected: usize },

    #[error(
        "class {label} basis has {rows} rows, fewer than the shared subspace length {len_subspace}"
    )]
    BasisTooShort {
        label: usize,
        rows: usize,
        len_subspace: usize,
    },

    #[error("residual ordering is undefined, transformed features contain non-finite values")]
    UndefinedResidualOrder,

    #[error(transparent)]
    Batch(#[from] BatchError),
}
