// Core pipeline exports
pub mod bmi;
pub mod interpret;
pub mod schema;
pub mod translate;

pub use bmi::{bmi_band, compute_bmi, ValidationError};
pub use interpret::{coarse_band, interpret, DecodeError, Interpretation, LabelEncoder};
pub use schema::{FeatureKind, FeatureSchema, FeatureSource, FeatureSpec, SchemaError, ValueMap};
pub use translate::{translate, TranslationError};
