// Model exports
pub mod domain;

pub use domain::{ClinicalBand, Diagnosis, FeatureValue, FeatureVector, RawPatientInput};
