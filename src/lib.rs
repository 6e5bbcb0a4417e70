#![doc = include_str!("../README.md")]

#[cfg(test)]
mod tests;

mod augment;
pub use augment::add_translation_samples;

mod backend;
pub use backend::Backend;

mod batch;
pub use batch::{Parallelism, transform_batch};

mod classifier;
pub use classifier::NsClassifier;

mod config;
pub use config::{DEFAULT_EPS, TransformParameters};

mod error;
pub use error::{BatchError, FitError, PredictError};

mod float_trait;
pub use float_trait::Float;

mod subspace;
pub use subspace::{ClassSubspace, ENERGY_THRESHOLD};

mod transform;
pub use transform::{ForwardTransform, RcdtAdapter, RscdtAdapter, TransformAdapter};

pub use ndarray;
