use crate::models::ClinicalBand;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The seven fine-grained clinical levels the current artifact family is
/// trained against.
pub const KNOWN_LABELS: [&str; 7] = [
    "Insufficient_Weight",
    "Normal_Weight",
    "Overweight_Level_I",
    "Overweight_Level_II",
    "Obesity_Type_I",
    "Obesity_Type_II",
    "Obesity_Type_III",
];

/// Failures while mapping a class code back to a clinical category
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("class code {code} outside the encoder's known range (0..{classes})")]
    CodeOutOfRange { code: usize, classes: usize },

    #[error("label \"{0}\" is not a known clinical level")]
    UnknownLabel(String),
}

/// Fitted bidirectional mapping between class codes and label strings,
/// established at training time and shipped alongside the classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    /// Decode a class code to its label. A code outside the fitted range is
    /// an error, not a default.
    pub fn decode(&self, code: usize) -> Result<&str, DecodeError> {
        self.classes
            .get(code)
            .map(String::as_str)
            .ok_or(DecodeError::CodeOutOfRange {
                code,
                classes: self.classes.len(),
            })
    }

    /// Code for a label, when present.
    pub fn encode(&self, label: &str) -> Option<usize> {
        self.classes.iter().position(|c| c == label)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Collapse a fine-grained clinical level into one of the four coarse bands.
///
/// Total over the seven-label domain; anything else is an error rather than
/// a silently absorbed fallback.
pub fn coarse_band(label: &str) -> Result<ClinicalBand, DecodeError> {
    match label {
        "Insufficient_Weight" => Ok(ClinicalBand::Underweight),
        "Normal_Weight" => Ok(ClinicalBand::Normal),
        "Overweight_Level_I" | "Overweight_Level_II" => Ok(ClinicalBand::Overweight),
        "Obesity_Type_I" | "Obesity_Type_II" | "Obesity_Type_III" => Ok(ClinicalBand::Obese),
        other => Err(DecodeError::UnknownLabel(other.to_string())),
    }
}

/// Decoded classifier output: label plus its coarse band.
#[derive(Debug, Clone, PartialEq)]
pub struct Interpretation {
    pub class_code: usize,
    pub label: String,
    pub coarse_band: ClinicalBand,
}

/// Map a raw class code to a clinically meaningful category via the fitted
/// encoder. Deterministic: the same code against the same encoder always
/// yields the same result.
pub fn interpret(code: usize, encoder: &LabelEncoder) -> Result<Interpretation, DecodeError> {
    let label = encoder.decode(code)?;
    let band = coarse_band(label)?;

    Ok(Interpretation {
        class_code: code,
        label: label.to_string(),
        coarse_band: band,
    })
}
