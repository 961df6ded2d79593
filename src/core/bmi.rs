use crate::models::ClinicalBand;
use thiserror::Error;

/// Heights below this are treated as degenerate rather than divided by.
const MIN_HEIGHT_M: f64 = 1e-3;

/// Clinical band thresholds (kg/m²)
const UNDERWEIGHT_CEILING: f64 = 18.5;
const NORMAL_CEILING: f64 = 25.0;
const OVERWEIGHT_CEILING: f64 = 30.0;

/// Degenerate numeric input caught before any arithmetic
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("height must be positive, got {0} m")]
    NonPositiveHeight(f64),

    #[error("weight must be positive, got {0} kg")]
    NonPositiveWeight(f64),
}

/// Body-mass index: weight in kilograms over height in meters squared.
///
/// Zero or near-zero height fails fast instead of producing an infinite or
/// NaN index.
pub fn compute_bmi(weight_kg: f64, height_m: f64) -> Result<f64, ValidationError> {
    if !height_m.is_finite() || height_m < MIN_HEIGHT_M {
        return Err(ValidationError::NonPositiveHeight(height_m));
    }
    if !weight_kg.is_finite() || weight_kg <= 0.0 {
        return Err(ValidationError::NonPositiveWeight(weight_kg));
    }

    Ok(weight_kg / (height_m * height_m))
}

/// Band a BMI value: <18.5 underweight, <25 normal, <30 overweight,
/// >=30 obese.
#[inline]
pub fn bmi_band(bmi: f64) -> ClinicalBand {
    if bmi < UNDERWEIGHT_CEILING {
        ClinicalBand::Underweight
    } else if bmi < NORMAL_CEILING {
        ClinicalBand::Normal
    } else if bmi < OVERWEIGHT_CEILING {
        ClinicalBand::Overweight
    } else {
        ClinicalBand::Obese
    }
}
