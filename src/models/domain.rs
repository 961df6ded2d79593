use serde::{Deserialize, Serialize};
use validator::Validate;

/// Patient form input as entered by the operator, in the presentation locale.
///
/// Categorical fields hold the pt-BR tokens shown in the form (e.g.
/// "Masculino", "Sim", "Às vezes"); translation to the model's value domain
/// happens in [`crate::core::translate`]. Instances live for a single
/// diagnostic action and are never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RawPatientInput {
    pub gender: String,
    #[validate(range(min = 1, max = 120))]
    pub age: u8,
    /// Height in meters.
    #[validate(range(min = 0.5, max = 2.5))]
    pub height_m: f64,
    /// Weight in kilograms.
    #[validate(range(min = 10.0, max = 300.0))]
    pub weight_kg: f64,
    pub family_history: String,
    pub high_calorie_food: String,
    #[validate(range(min = 1.0, max = 3.0))]
    pub vegetable_freq: f64,
    #[validate(range(min = 1.0, max = 4.0))]
    pub main_meals: f64,
    pub between_meals: String,
    pub smoker: String,
    #[validate(range(min = 1.0, max = 3.0))]
    pub water_intake: f64,
    pub calorie_monitoring: String,
    #[validate(range(min = 0.0, max = 3.0))]
    pub activity_freq: f64,
    #[validate(range(min = 0.0, max = 2.0))]
    pub device_time: f64,
    pub alcohol: String,
    pub transport: String,
}

/// A single feature value in the model's domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    Categorical(String),
    Numeric(f64),
}

impl FeatureValue {
    pub fn as_categorical(&self) -> Option<&str> {
        match self {
            FeatureValue::Categorical(s) => Some(s),
            FeatureValue::Numeric(_) => None,
        }
    }

    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            FeatureValue::Categorical(_) => None,
            FeatureValue::Numeric(n) => Some(*n),
        }
    }
}

/// Single-row feature record under the exact column names the trained
/// artifact was fit on, in schema order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    columns: Vec<(String, FeatureValue)>,
}

impl FeatureVector {
    pub fn new(columns: Vec<(String, FeatureValue)>) -> Self {
        Self { columns }
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.columns
            .iter()
            .find(|(col, _)| col == name)
            .map(|(_, value)| value)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(col, _)| col.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Coarse clinical band, shared by the label-collapsing path and the BMI
/// path. The two bandings are presented side by side and never reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClinicalBand {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl std::fmt::Display for ClinicalBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ClinicalBand::Underweight => "underweight",
            ClinicalBand::Normal => "normal",
            ClinicalBand::Overweight => "overweight",
            ClinicalBand::Obese => "obese",
        };
        write!(f, "{}", name)
    }
}

impl ClinicalBand {
    /// Localized display text for the form output.
    pub fn pt_br(&self) -> &'static str {
        match self {
            ClinicalBand::Underweight => "Abaixo do peso",
            ClinicalBand::Normal => "Peso normal",
            ClinicalBand::Overweight => "Sobrepeso",
            ClinicalBand::Obese => "Obesidade",
        }
    }
}

/// Outcome of one diagnostic action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnosis {
    /// Class code as emitted by the classifier.
    pub class_code: usize,
    /// Decoded label, e.g. "Obesity_Type_I".
    pub label: String,
    /// The label collapsed to a coarse band.
    pub coarse_band: ClinicalBand,
    /// Body-mass index computed directly from height and weight.
    pub bmi: f64,
    /// Clinical band of the computed BMI. Independent of `coarse_band`;
    /// the two are not guaranteed to agree.
    pub bmi_band: ClinicalBand,
    /// Per-label probabilities, when requested.
    pub probabilities: Option<Vec<(String, f64)>>,
}

impl Diagnosis {
    /// Label with underscores replaced for display.
    pub fn display_label(&self) -> String {
        self.label.replace('_', " ")
    }
}
