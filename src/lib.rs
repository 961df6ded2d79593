//! Vida Screen - Obesity screening service for the Vida health platform
//!
//! This library provides the diagnostic core used by the Vida screening
//! form: it translates localized form input into the exact feature schema a
//! trained classification artifact expects, invokes the artifact, and maps
//! the raw class code back to a clinically meaningful category alongside an
//! independently computed body-mass index.

pub mod config;
pub mod core;
pub mod models;
pub mod services;
pub mod ui;

// Re-export commonly used types
pub use crate::core::{
    bmi_band, coarse_band, compute_bmi, interpret, translate, FeatureSchema, LabelEncoder,
};
pub use crate::models::{ClinicalBand, Diagnosis, FeatureValue, FeatureVector, RawPatientInput};
pub use crate::services::{ArtifactBundle, DatasetSummary};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let bmi = compute_bmi(70.0, 1.70).unwrap();
        assert_eq!(bmi_band(bmi), ClinicalBand::Normal);
    }
}
