// Integration tests for vida-screen: end-to-end diagnosis through an
// artifact pair written to disk, the way the binary consumes it.

use serde_json::json;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use vida_screen::core::FeatureSchema;
use vida_screen::models::{ClinicalBand, RawPatientInput};
use vida_screen::services::artifact::{ArtifactBundle, ArtifactError};
use vida_screen::ui::form::{execute_diagnosis, DiagnosisError};
use vida_screen::ui::AppState;

/// Encoded input width of the canonical 16-column schema.
const INPUT_WIDTH: usize = 31;

const LABELS: [&str; 7] = [
    "Insufficient_Weight",
    "Normal_Weight",
    "Overweight_Level_I",
    "Overweight_Level_II",
    "Obesity_Type_I",
    "Obesity_Type_II",
    "Obesity_Type_III",
];

fn canonical_columns() -> serde_json::Value {
    let yes_no = ["yes", "no"];
    let frequency = ["Sometimes", "Frequently", "Always", "no"];

    json!([
        {"name": "Genero", "encoding": {"type": "one_hot", "categories": ["Male", "Female"]}},
        {"name": "Idade", "encoding": {"type": "standardized", "mean": 24.0, "std": 6.0}},
        {"name": "Altura", "encoding": {"type": "standardized", "mean": 1.70, "std": 0.09}},
        {"name": "Peso", "encoding": {"type": "standardized", "mean": 86.0, "std": 26.0}},
        {"name": "Historico_Familiar_Obesidade", "encoding": {"type": "one_hot", "categories": yes_no}},
        {"name": "Frequencia_Consumo_Alimento_Calorico", "encoding": {"type": "one_hot", "categories": yes_no}},
        {"name": "Frequencia_Consumo_Vegetais", "encoding": {"type": "standardized", "mean": 2.4, "std": 0.5}},
        {"name": "Numero_Refeicoes_Principais", "encoding": {"type": "standardized", "mean": 2.7, "std": 0.8}},
        {"name": "Consumo_Alimento_Entre_Refeicoes", "encoding": {"type": "one_hot", "categories": frequency}},
        {"name": "Fumante", "encoding": {"type": "one_hot", "categories": yes_no}},
        {"name": "Consumo_Agua", "encoding": {"type": "standardized", "mean": 2.0, "std": 0.6}},
        {"name": "Monitoramento_Calorico", "encoding": {"type": "one_hot", "categories": yes_no}},
        {"name": "Frequencia_Atividade_Fisica", "encoding": {"type": "standardized", "mean": 1.0, "std": 0.85}},
        {"name": "Tempo_Uso_Tecnologia", "encoding": {"type": "standardized", "mean": 0.65, "std": 0.6}},
        {"name": "Consumo_Alcool", "encoding": {"type": "one_hot", "categories": frequency}},
        {"name": "Meio_Transporte", "encoding": {"type": "one_hot", "categories": [
            "Public_Transportation", "Walking", "Automobile", "Motorbike", "Bike"
        ]}}
    ])
}

/// A classifier whose bias routes every input to `favored_class`; opaque to
/// the code under test, predictable for assertions.
fn model_json(favored_class: usize, n_classes: usize) -> serde_json::Value {
    let weights = vec![vec![0.0f64; INPUT_WIDTH]; n_classes];
    let mut biases = vec![0.0f64; n_classes];
    biases[favored_class] = 4.0;

    json!({
        "feature_columns": canonical_columns(),
        "layers": [
            {"weights": weights, "biases": biases, "activation": "identity"}
        ]
    })
}

fn encoder_json(labels: &[&str]) -> serde_json::Value {
    json!({ "classes": labels })
}

fn write_json(name: &str, value: &serde_json::Value) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    let writer = BufWriter::new(File::create(&path).unwrap());
    serde_json::to_writer_pretty(writer, value).unwrap();
    path
}

fn sample_input() -> RawPatientInput {
    RawPatientInput {
        gender: "Masculino".to_string(),
        age: 25,
        height_m: 1.70,
        weight_kg: 70.0,
        family_history: "Sim".to_string(),
        high_calorie_food: "Não".to_string(),
        vegetable_freq: 2.0,
        main_meals: 3.0,
        between_meals: "Às vezes".to_string(),
        smoker: "Não".to_string(),
        water_intake: 2.0,
        calorie_monitoring: "Não".to_string(),
        activity_freq: 1.0,
        device_time: 1.0,
        alcohol: "Não".to_string(),
        transport: "Transporte Público".to_string(),
    }
}

fn state_with(bundle: Option<ArtifactBundle>, show_probabilities: bool) -> AppState {
    AppState {
        bundle: bundle.map(Arc::new),
        schema: Arc::new(FeatureSchema::canonical()),
        dataset: None,
        report_url: "https://example.com/report".to_string(),
        show_probabilities,
    }
}

#[test]
fn test_end_to_end_diagnosis() {
    let model_path = write_json("vida_screen_it_model.json", &model_json(1, 7));
    let encoder_path = write_json("vida_screen_it_encoder.json", &encoder_json(&LABELS));

    let schema = FeatureSchema::canonical();
    let bundle = ArtifactBundle::load(&model_path, &encoder_path, &schema).unwrap();
    let state = state_with(Some(bundle), true);

    let diagnosis = execute_diagnosis(&sample_input(), &state).unwrap();

    assert_eq!(diagnosis.class_code, 1);
    assert_eq!(diagnosis.label, "Normal_Weight");
    assert_eq!(diagnosis.coarse_band, ClinicalBand::Normal);
    assert_eq!(format!("{:.2}", diagnosis.bmi), "24.22");
    assert_eq!(diagnosis.bmi_band, ClinicalBand::Normal);

    let probabilities = diagnosis.probabilities.unwrap();
    assert_eq!(probabilities.len(), 7);
    let total: f64 = probabilities.iter().map(|(_, p)| p).sum();
    assert!((total - 1.0).abs() < 1e-9);
    // The favored class carries the highest probability
    let best = probabilities
        .iter()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap())
        .unwrap();
    assert_eq!(best.0, "Normal_Weight");
}

#[test]
fn test_bandings_are_reported_independently() {
    // The artifact insists on Obesity_Type_I while the measured BMI is
    // normal; both must be reported as-is, with no reconciliation.
    let model_path = write_json("vida_screen_it_model_obese.json", &model_json(4, 7));
    let encoder_path = write_json("vida_screen_it_encoder_obese.json", &encoder_json(&LABELS));

    let schema = FeatureSchema::canonical();
    let bundle = ArtifactBundle::load(&model_path, &encoder_path, &schema).unwrap();
    let state = state_with(Some(bundle), false);

    let diagnosis = execute_diagnosis(&sample_input(), &state).unwrap();

    assert_eq!(diagnosis.coarse_band, ClinicalBand::Obese);
    assert_eq!(diagnosis.bmi_band, ClinicalBand::Normal);
}

#[test]
fn test_missing_artifact_path_is_load_error_and_action_disabled() {
    let schema = FeatureSchema::canonical();
    let result = ArtifactBundle::load(
        Path::new("/nonexistent/modelo_obesidade.json"),
        Path::new("/nonexistent/codificador_rotulos.json"),
        &schema,
    );
    assert!(matches!(result, Err(ArtifactError::Io { .. })));

    // The action reports unavailability instead of panicking.
    let state = state_with(None, false);
    let outcome = execute_diagnosis(&sample_input(), &state);
    assert!(matches!(outcome, Err(DiagnosisError::Unavailable)));
}

#[test]
fn test_encoder_classifier_pairing_enforced() {
    // Encoder fitted on fewer labels than the classifier emits.
    let model_path = write_json("vida_screen_it_model_pair.json", &model_json(0, 7));
    let encoder_path = write_json(
        "vida_screen_it_encoder_pair.json",
        &encoder_json(&["Insufficient_Weight", "Normal_Weight"]),
    );

    let schema = FeatureSchema::canonical();
    let result = ArtifactBundle::load(&model_path, &encoder_path, &schema);

    assert!(matches!(
        result,
        Err(ArtifactError::ClassCountMismatch {
            classifier: 7,
            encoder: 2,
        })
    ));
}

#[test]
fn test_artifact_schema_mismatch_detected() {
    // Drop one column from the artifact and rename another.
    let mut model = model_json(0, 7);
    let columns = model["feature_columns"].as_array_mut().unwrap();
    columns.remove(15); // Meio_Transporte
    columns[0]["name"] = json!("Gender");
    // Keep layer widths consistent with the reduced input (31 - 5 = 26).
    model["layers"][0]["weights"] = json!(vec![vec![0.0f64; 26]; 7]);

    let model_path = write_json("vida_screen_it_model_schema.json", &model);
    let encoder_path = write_json("vida_screen_it_encoder_schema.json", &encoder_json(&LABELS));

    let schema = FeatureSchema::canonical();
    let result = ArtifactBundle::load(&model_path, &encoder_path, &schema);

    match result {
        Err(ArtifactError::SchemaMismatch { missing, unexpected }) => {
            assert!(missing.contains(&"Genero".to_string()));
            assert!(missing.contains(&"Meio_Transporte".to_string()));
            assert_eq!(unexpected, vec!["Gender".to_string()]);
        }
        other => panic!("expected SchemaMismatch, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_unmapped_form_value_surfaces_at_the_action_boundary() {
    let model_path = write_json("vida_screen_it_model_unmapped.json", &model_json(1, 7));
    let encoder_path = write_json("vida_screen_it_encoder_unmapped.json", &encoder_json(&LABELS));

    let schema = FeatureSchema::canonical();
    let bundle = ArtifactBundle::load(&model_path, &encoder_path, &schema).unwrap();
    let state = state_with(Some(bundle), false);

    let mut input = sample_input();
    input.gender = "Outro".to_string();

    let outcome = execute_diagnosis(&input, &state);
    assert!(matches!(outcome, Err(DiagnosisError::Translation(_))));
}

#[test]
fn test_out_of_range_form_input_rejected_before_translation() {
    let state = state_with(None, false);

    let mut input = sample_input();
    input.height_m = 0.0;

    // Even with the bundle missing, unavailability wins; with a bundle the
    // validator rejects the range before translation.
    assert!(matches!(
        execute_diagnosis(&input, &state),
        Err(DiagnosisError::Unavailable)
    ));

    let model_path = write_json("vida_screen_it_model_range.json", &model_json(1, 7));
    let encoder_path = write_json("vida_screen_it_encoder_range.json", &encoder_json(&LABELS));
    let schema = FeatureSchema::canonical();
    let bundle = ArtifactBundle::load(&model_path, &encoder_path, &schema).unwrap();
    let state = state_with(Some(bundle), false);

    assert!(matches!(
        execute_diagnosis(&input, &state),
        Err(DiagnosisError::InvalidInput(_))
    ));
}
