// Service exports
pub mod artifact;
pub mod dataset;

pub use artifact::{ArtifactBundle, ArtifactError, InferenceError, MlpClassifier};
pub use dataset::{DatasetError, DatasetSummary};
