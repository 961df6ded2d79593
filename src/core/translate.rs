use crate::core::bmi::{compute_bmi, ValidationError};
use crate::core::schema::{
    FeatureKind, FeatureSchema, FeatureSource, ValueMap, FREQUENCY_MAP, GENDER_MAP,
    TRANSPORT_MAP, YES_NO_MAP,
};
use crate::models::{FeatureValue, FeatureVector, RawPatientInput};
use thiserror::Error;

/// Failures while translating form input into the artifact's feature domain.
///
/// Every gap is surfaced; no value is ever defaulted into the output.
#[derive(Debug, Error, PartialEq)]
pub enum TranslationError {
    #[error("no mapping entry for {field}: \"{value}\"")]
    UnmappedValue { field: &'static str, value: String },

    #[error("schema column {0} has no corresponding form field")]
    UnknownColumn(String),

    #[error("column {column}: translated value \"{value}\" is outside the trained domain")]
    OutOfDomain { column: String, value: String },

    #[error("column {column}: expected a {expected} value")]
    TypeMismatch {
        column: String,
        expected: &'static str,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Translate a populated form into a single-row feature record under the
/// exact column names and value domains declared by `schema`.
///
/// Deterministic and side-effect free. The output key set equals the schema
/// key set, in schema order; derived columns are computed here. Range
/// checking of the numeric inputs is the form's responsibility and is not
/// repeated, but degenerate values that would poison derived features still
/// fail fast.
pub fn translate(
    raw: &RawPatientInput,
    schema: &FeatureSchema,
) -> Result<FeatureVector, TranslationError> {
    let mut columns = Vec::with_capacity(schema.len());

    for spec in schema.features() {
        let value = match spec.source {
            FeatureSource::Base => base_value(raw, &spec.name)?,
            FeatureSource::DerivedBmi => {
                FeatureValue::Numeric(compute_bmi(raw.weight_kg, raw.height_m)?)
            }
        };

        match (&spec.kind, &value) {
            (FeatureKind::Categorical { domain }, FeatureValue::Categorical(token)) => {
                if !domain.iter().any(|allowed| allowed == token) {
                    return Err(TranslationError::OutOfDomain {
                        column: spec.name.clone(),
                        value: token.clone(),
                    });
                }
            }
            (FeatureKind::Numeric, FeatureValue::Numeric(_)) => {}
            (FeatureKind::Categorical { .. }, FeatureValue::Numeric(_)) => {
                return Err(TranslationError::TypeMismatch {
                    column: spec.name.clone(),
                    expected: "categorical",
                });
            }
            (FeatureKind::Numeric, FeatureValue::Categorical(_)) => {
                return Err(TranslationError::TypeMismatch {
                    column: spec.name.clone(),
                    expected: "numeric",
                });
            }
        }

        columns.push((spec.name.clone(), value));
    }

    Ok(FeatureVector::new(columns))
}

/// Resolve one base column from the form fields it is sourced from.
fn base_value(raw: &RawPatientInput, column: &str) -> Result<FeatureValue, TranslationError> {
    let value = match column {
        "Genero" => lookup(&GENDER_MAP, "gender", &raw.gender)?,
        "Idade" => FeatureValue::Numeric(f64::from(raw.age)),
        "Altura" => FeatureValue::Numeric(raw.height_m),
        "Peso" => FeatureValue::Numeric(raw.weight_kg),
        "Historico_Familiar_Obesidade" => {
            lookup(&YES_NO_MAP, "family_history", &raw.family_history)?
        }
        "Frequencia_Consumo_Alimento_Calorico" => {
            lookup(&YES_NO_MAP, "high_calorie_food", &raw.high_calorie_food)?
        }
        "Frequencia_Consumo_Vegetais" => FeatureValue::Numeric(raw.vegetable_freq),
        "Numero_Refeicoes_Principais" => FeatureValue::Numeric(raw.main_meals),
        "Consumo_Alimento_Entre_Refeicoes" => {
            lookup(&FREQUENCY_MAP, "between_meals", &raw.between_meals)?
        }
        "Fumante" => lookup(&YES_NO_MAP, "smoker", &raw.smoker)?,
        "Consumo_Agua" => FeatureValue::Numeric(raw.water_intake),
        "Monitoramento_Calorico" => {
            lookup(&YES_NO_MAP, "calorie_monitoring", &raw.calorie_monitoring)?
        }
        "Frequencia_Atividade_Fisica" => FeatureValue::Numeric(raw.activity_freq),
        "Tempo_Uso_Tecnologia" => FeatureValue::Numeric(raw.device_time),
        "Consumo_Alcool" => lookup(&FREQUENCY_MAP, "alcohol", &raw.alcohol)?,
        "Meio_Transporte" => lookup(&TRANSPORT_MAP, "transport", &raw.transport)?,
        other => return Err(TranslationError::UnknownColumn(other.to_string())),
    };

    Ok(value)
}

fn lookup(
    map: &ValueMap,
    field: &'static str,
    raw: &str,
) -> Result<FeatureValue, TranslationError> {
    map.to_model(raw)
        .map(|token| FeatureValue::Categorical(token.to_string()))
        .ok_or_else(|| TranslationError::UnmappedValue {
            field,
            value: raw.to_string(),
        })
}
