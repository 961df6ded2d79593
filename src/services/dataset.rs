use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors while reading the auxiliary patient-records file.
///
/// All of these are non-fatal to the process: the dashboard falls back to
/// placeholder figures.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("dataset has no header row")]
    MissingHeader,

    #[error("dataset is missing required column {0}")]
    MissingColumn(&'static str),

    #[error("dataset contains no usable records")]
    NoRecords,
}

/// Display statistics for the analytics dashboard. Computed once at startup;
/// read-only afterwards.
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub records: usize,
    pub mean_age: f64,
    pub mean_height_m: f64,
    pub mean_weight_kg: f64,
    pub mean_bmi: f64,
    /// Category distribution, most frequent first. Empty when the dataset
    /// carries no outcome column.
    pub label_counts: Vec<(String, usize)>,
}

const AGE_COLUMN: &str = "Idade";
const HEIGHT_COLUMN: &str = "Altura";
const WEIGHT_COLUMN: &str = "Peso";
const LABEL_COLUMN: &str = "Nivel_Obesidade";

impl DatasetSummary {
    /// Read a comma-separated patient-records file and aggregate the
    /// dashboard figures. Malformed rows are skipped with a warning, never
    /// a failure.
    pub fn load(path: &Path) -> Result<Self, DatasetError> {
        let contents = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let mut lines = contents.lines().filter(|line| !line.trim().is_empty());
        let header = lines.next().ok_or(DatasetError::MissingHeader)?;
        let columns: Vec<&str> = header.split(',').map(str::trim).collect();

        let age_idx = find_column(&columns, AGE_COLUMN)?;
        let height_idx = find_column(&columns, HEIGHT_COLUMN)?;
        let weight_idx = find_column(&columns, WEIGHT_COLUMN)?;
        let label_idx = columns.iter().position(|c| *c == LABEL_COLUMN);

        let mut records = 0usize;
        let mut skipped = 0usize;
        let mut age_sum = 0.0;
        let mut height_sum = 0.0;
        let mut weight_sum = 0.0;
        let mut bmi_sum = 0.0;
        let mut label_counts: Vec<(String, usize)> = Vec::new();

        for line in lines {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();

            let parsed = (
                fields.get(age_idx).and_then(|v| v.parse::<f64>().ok()),
                fields.get(height_idx).and_then(|v| v.parse::<f64>().ok()),
                fields.get(weight_idx).and_then(|v| v.parse::<f64>().ok()),
            );
            let (Some(age), Some(height), Some(weight)) = parsed else {
                skipped += 1;
                continue;
            };
            if height <= 0.0 {
                skipped += 1;
                continue;
            }

            records += 1;
            age_sum += age;
            height_sum += height;
            weight_sum += weight;
            bmi_sum += weight / (height * height);

            if let Some(idx) = label_idx {
                if let Some(label) = fields.get(idx).copied().filter(|l| !l.is_empty()) {
                    match label_counts.iter_mut().find(|entry| entry.0 == label) {
                        Some(entry) => entry.1 += 1,
                        None => label_counts.push((label.to_string(), 1)),
                    }
                }
            }
        }

        if skipped > 0 {
            tracing::warn!("skipped {} malformed rows in {}", skipped, path.display());
        }
        if records == 0 {
            return Err(DatasetError::NoRecords);
        }

        label_counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        let n = records as f64;
        Ok(Self {
            records,
            mean_age: age_sum / n,
            mean_height_m: height_sum / n,
            mean_weight_kg: weight_sum / n,
            mean_bmi: bmi_sum / n,
            label_counts,
        })
    }
}

fn find_column(columns: &[&str], name: &'static str) -> Result<usize, DatasetError> {
    columns
        .iter()
        .position(|c| *c == name)
        .ok_or(DatasetError::MissingColumn(name))
}
