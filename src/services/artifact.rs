use crate::core::interpret::LabelEncoder;
use crate::core::schema::FeatureSchema;
use crate::models::{FeatureValue, FeatureVector};
use ndarray::{Array1, Array2};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading or verifying the trained artifact pair
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("layer {layer}: ragged or empty weight matrix")]
    MalformedLayer { layer: usize },

    #[error("layer {layer}: expected {expected} inputs, weight rows have {actual}")]
    LayerWidthMismatch {
        layer: usize,
        expected: usize,
        actual: usize,
    },

    #[error("standardized column {column} has non-positive std")]
    MalformedEncoding { column: String },

    #[error("label encoder has no classes")]
    EmptyEncoder,

    #[error("classifier emits {classifier} classes but the encoder was fitted on {encoder}")]
    ClassCountMismatch { classifier: usize, encoder: usize },

    #[error("artifact columns do not match the declared schema (missing: {missing:?}, unexpected: {unexpected:?})")]
    SchemaMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
}

/// Contract failures when invoking the classifier on a feature record
#[derive(Debug, Error, PartialEq)]
pub enum InferenceError {
    #[error("feature {0} missing from input record")]
    MissingFeature(String),

    #[error("column {column}: category \"{value}\" unknown to the artifact")]
    UnknownCategory { column: String, value: String },

    #[error("column {column}: expected a {expected} value")]
    WrongValueKind {
        column: String,
        expected: &'static str,
    },

    #[error("classifier produced a non-finite output")]
    NonFiniteOutput,
}

/// Per-column input encoding baked into the artifact at training time.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ColumnEncoding {
    OneHot { categories: Vec<String> },
    Standardized { mean: f64, std: f64 },
}

impl ColumnEncoding {
    fn width(&self) -> usize {
        match self {
            ColumnEncoding::OneHot { categories } => categories.len(),
            ColumnEncoding::Standardized { .. } => 1,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct ColumnSpec {
    name: String,
    encoding: ColumnEncoding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Activation {
    Relu,
    Identity,
}

/// Serialized layer as stored on disk.
#[derive(Debug, Clone, Deserialize)]
struct RawLayer {
    weights: Vec<Vec<f64>>,
    biases: Vec<f64>,
    activation: Activation,
}

#[derive(Debug, Clone, Deserialize)]
struct RawClassifier {
    feature_columns: Vec<ColumnSpec>,
    layers: Vec<RawLayer>,
}

#[derive(Debug, Clone)]
struct Layer {
    weights: Array2<f64>,
    biases: Array1<f64>,
    activation: Activation,
}

/// Pre-trained feed-forward classifier, consumed as a black box.
///
/// Input preprocessing (one-hot/standardization) travels inside the artifact
/// the same way it lived inside the original training pipeline; callers only
/// supply a correctly shaped [`FeatureVector`].
#[derive(Debug, Clone)]
pub struct MlpClassifier {
    columns: Vec<ColumnSpec>,
    layers: Vec<Layer>,
}

impl MlpClassifier {
    fn from_raw(raw: RawClassifier) -> Result<Self, ArtifactError> {
        for spec in &raw.feature_columns {
            if let ColumnEncoding::Standardized { std, .. } = &spec.encoding {
                if *std <= 0.0 || !std.is_finite() {
                    return Err(ArtifactError::MalformedEncoding {
                        column: spec.name.clone(),
                    });
                }
            }
        }

        let mut expected_width: usize =
            raw.feature_columns.iter().map(|c| c.encoding.width()).sum();

        let mut layers = Vec::with_capacity(raw.layers.len());
        for (index, raw_layer) in raw.layers.into_iter().enumerate() {
            let rows = raw_layer.weights.len();
            if rows == 0 || rows != raw_layer.biases.len() {
                return Err(ArtifactError::MalformedLayer { layer: index });
            }

            let cols = raw_layer.weights[0].len();
            if cols == 0 || raw_layer.weights.iter().any(|row| row.len() != cols) {
                return Err(ArtifactError::MalformedLayer { layer: index });
            }
            if cols != expected_width {
                return Err(ArtifactError::LayerWidthMismatch {
                    layer: index,
                    expected: expected_width,
                    actual: cols,
                });
            }

            let flat: Vec<f64> = raw_layer.weights.into_iter().flatten().collect();
            let weights = Array2::from_shape_vec((rows, cols), flat)
                .map_err(|_| ArtifactError::MalformedLayer { layer: index })?;

            layers.push(Layer {
                weights,
                biases: Array1::from_vec(raw_layer.biases),
                activation: raw_layer.activation,
            });
            expected_width = rows;
        }

        if layers.is_empty() {
            return Err(ArtifactError::MalformedLayer { layer: 0 });
        }

        Ok(Self {
            columns: raw.feature_columns,
            layers,
        })
    }

    /// Number of classes the final layer emits.
    pub fn n_classes(&self) -> usize {
        self.layers
            .last()
            .map(|layer| layer.biases.len())
            .unwrap_or(0)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Map a feature record into the network's input space using the
    /// encodings the artifact was trained with.
    fn encode(&self, features: &FeatureVector) -> Result<Array1<f64>, InferenceError> {
        let mut encoded = Vec::new();

        for spec in &self.columns {
            let value = features
                .get(&spec.name)
                .ok_or_else(|| InferenceError::MissingFeature(spec.name.clone()))?;

            match &spec.encoding {
                ColumnEncoding::OneHot { categories } => {
                    let token = match value {
                        FeatureValue::Categorical(token) => token,
                        FeatureValue::Numeric(_) => {
                            return Err(InferenceError::WrongValueKind {
                                column: spec.name.clone(),
                                expected: "categorical",
                            })
                        }
                    };
                    let hit = categories.iter().position(|c| c == token).ok_or_else(|| {
                        InferenceError::UnknownCategory {
                            column: spec.name.clone(),
                            value: token.clone(),
                        }
                    })?;
                    for i in 0..categories.len() {
                        encoded.push(if i == hit { 1.0 } else { 0.0 });
                    }
                }
                ColumnEncoding::Standardized { mean, std } => {
                    let number = match value {
                        FeatureValue::Numeric(n) => *n,
                        FeatureValue::Categorical(_) => {
                            return Err(InferenceError::WrongValueKind {
                                column: spec.name.clone(),
                                expected: "numeric",
                            })
                        }
                    };
                    encoded.push((number - mean) / std);
                }
            }
        }

        Ok(Array1::from_vec(encoded))
    }

    fn forward(&self, features: &FeatureVector) -> Result<Array1<f64>, InferenceError> {
        let mut activations = self.encode(features)?;

        for layer in &self.layers {
            let mut z = layer.weights.dot(&activations) + &layer.biases;
            if layer.activation == Activation::Relu {
                z.mapv_inplace(|v| v.max(0.0));
            }
            activations = z;
        }

        if activations.iter().any(|v| !v.is_finite()) {
            return Err(InferenceError::NonFiniteOutput);
        }

        Ok(activations)
    }

    /// Predict the class code (argmax over the output logits).
    pub fn predict(&self, features: &FeatureVector) -> Result<usize, InferenceError> {
        let logits = self.forward(features)?;

        let mut best = 0;
        for (index, value) in logits.iter().enumerate() {
            if *value > logits[best] {
                best = index;
            }
        }
        Ok(best)
    }

    /// Softmax over the output logits, by class index.
    pub fn predict_probabilities(
        &self,
        features: &FeatureVector,
    ) -> Result<Vec<f64>, InferenceError> {
        let logits = self.forward(features)?;

        let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exps: Vec<f64> = logits.iter().map(|v| (v - max).exp()).collect();
        let total: f64 = exps.iter().sum();

        Ok(exps.into_iter().map(|v| v / total).collect())
    }
}

/// The classifier and its paired label encoder, loaded once at startup and
/// shared read-only for the process lifetime.
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    classifier: MlpClassifier,
    encoder: LabelEncoder,
}

impl ArtifactBundle {
    /// Load and pair the two artifact files, verifying that the pair is
    /// mutually consistent and matches the declared feature schema.
    ///
    /// The pairing check exists because an encoder fitted on a different
    /// label ordering than the classifier was trained to emit silently
    /// produces wrong labels.
    pub fn load(
        model_path: &Path,
        encoder_path: &Path,
        schema: &FeatureSchema,
    ) -> Result<Self, ArtifactError> {
        let raw: RawClassifier = read_json(model_path)?;
        let classifier = MlpClassifier::from_raw(raw)?;
        let encoder: LabelEncoder = read_json(encoder_path)?;

        if encoder.is_empty() {
            return Err(ArtifactError::EmptyEncoder);
        }
        if classifier.n_classes() != encoder.len() {
            return Err(ArtifactError::ClassCountMismatch {
                classifier: classifier.n_classes(),
                encoder: encoder.len(),
            });
        }

        let missing: Vec<String> = schema
            .column_names()
            .filter(|name| !classifier.column_names().any(|c| c == *name))
            .map(|name| name.to_string())
            .collect();
        let unexpected: Vec<String> = classifier
            .column_names()
            .filter(|name| schema.get(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(ArtifactError::SchemaMismatch { missing, unexpected });
        }

        tracing::debug!(
            "artifact bundle loaded: {} classes, {} feature columns",
            encoder.len(),
            schema.len()
        );

        Ok(Self { classifier, encoder })
    }

    pub fn classifier(&self) -> &MlpClassifier {
        &self.classifier
    }

    pub fn encoder(&self) -> &LabelEncoder {
        &self.encoder
    }

    pub fn predict(&self, features: &FeatureVector) -> Result<usize, InferenceError> {
        self.classifier.predict(features)
    }

    /// Per-label probabilities, paired through the fitted encoder. Sums to 1.
    pub fn predict_probabilities(
        &self,
        features: &FeatureVector,
    ) -> Result<Vec<(String, f64)>, InferenceError> {
        let probabilities = self.classifier.predict_probabilities(features)?;

        Ok(self
            .encoder
            .classes()
            .iter()
            .cloned()
            .zip(probabilities)
            .collect())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
