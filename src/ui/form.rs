use crate::core::bmi::{bmi_band, compute_bmi, ValidationError};
use crate::core::interpret::{interpret, DecodeError};
use crate::core::schema::{FREQUENCY_MAP, GENDER_MAP, TRANSPORT_MAP, YES_NO_MAP};
use crate::core::translate::{translate, TranslationError};
use crate::models::{Diagnosis, RawPatientInput};
use crate::services::artifact::{ArtifactBundle, InferenceError};
use crate::ui::{prompt_line, AppState};
use std::io;
use thiserror::Error;
use validator::Validate;

/// Everything that can go wrong inside one diagnostic action. All variants
/// are caught at this boundary and rendered as an inline message; none
/// terminate the process.
#[derive(Debug, Error)]
pub enum DiagnosisError {
    #[error("model artifacts are not loaded")]
    Unavailable,

    #[error("invalid form input: {0}")]
    InvalidInput(#[from] validator::ValidationErrors),

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Inference(#[from] InferenceError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// The single diagnostic action: validate → translate → predict → interpret.
///
/// Pure with respect to the terminal; rendering happens in the caller.
pub fn execute_diagnosis(
    raw: &RawPatientInput,
    state: &AppState,
) -> Result<Diagnosis, DiagnosisError> {
    let bundle: &ArtifactBundle = state.bundle.as_deref().ok_or(DiagnosisError::Unavailable)?;

    raw.validate()?;

    let features = translate(raw, &state.schema)?;
    let code = bundle.predict(&features)?;
    let interpretation = interpret(code, bundle.encoder())?;

    // Independent BMI cross-check, computed from the form values directly.
    let bmi = compute_bmi(raw.weight_kg, raw.height_m)?;

    let probabilities = if state.show_probabilities {
        Some(bundle.predict_probabilities(&features)?)
    } else {
        None
    };

    Ok(Diagnosis {
        class_code: interpretation.class_code,
        label: interpretation.label,
        coarse_band: interpretation.coarse_band,
        bmi,
        bmi_band: bmi_band(bmi),
        probabilities,
    })
}

/// Patient form: collect input, run the diagnosis, render the outcome.
pub fn run_diagnostic_action(state: &AppState) -> io::Result<()> {
    println!();
    println!("Formulário do Paciente");
    println!("----------------------");

    if state.bundle.is_none() {
        println!("Diagnóstico indisponível: os artefatos do modelo não foram carregados.");
        return Ok(());
    }

    let raw = collect_input()?;

    match execute_diagnosis(&raw, state) {
        Ok(diagnosis) => render_diagnosis(&diagnosis),
        Err(e) => {
            tracing::warn!("diagnostic action failed: {}", e);
            println!("Erro na predição: {}", e);
        }
    }

    Ok(())
}

fn render_diagnosis(diagnosis: &Diagnosis) {
    println!();
    println!("### Resultado: {}", diagnosis.display_label());
    println!("Categoria resumida: {}", diagnosis.coarse_band.pt_br());
    println!(
        "IMC Calculado: {:.2} ({})",
        diagnosis.bmi,
        diagnosis.bmi_band.pt_br()
    );

    if let Some(probabilities) = &diagnosis.probabilities {
        let mut sorted = probabilities.clone();
        sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        println!("Probabilidades:");
        for (label, probability) in sorted {
            println!("  {:<22} {:>5.1}%", label.replace('_', " "), probability * 100.0);
        }
    }
}

fn collect_input() -> io::Result<RawPatientInput> {
    let gender_options: Vec<&str> = GENDER_MAP.form_tokens().collect();
    let yes_no_options: Vec<&str> = YES_NO_MAP.form_tokens().collect();
    let frequency_options: Vec<&str> = FREQUENCY_MAP.form_tokens().collect();
    let transport_options: Vec<&str> = TRANSPORT_MAP.form_tokens().collect();

    let gender = prompt_choice("Gênero", &gender_options)?;
    let age = prompt_number("Idade (anos)", 1.0, 120.0)? as u8;
    let height_m = prompt_number("Altura (m)", 0.5, 2.5)?;
    let weight_kg = prompt_number("Peso (kg)", 10.0, 300.0)?;
    let family_history = prompt_choice("Histórico familiar de obesidade", &yes_no_options)?;
    let high_calorie_food =
        prompt_choice("Consome alimentos calóricos com frequência", &yes_no_options)?;
    let vegetable_freq = prompt_number("Consumo de vegetais (1 a 3)", 1.0, 3.0)?;
    let main_meals = prompt_number("Refeições principais por dia (1 a 4)", 1.0, 4.0)?;
    let between_meals = prompt_choice("Come entre as refeições", &frequency_options)?;
    let smoker = prompt_choice("Fumante", &yes_no_options)?;
    let water_intake = prompt_number("Consumo de água (1 a 3)", 1.0, 3.0)?;
    let calorie_monitoring = prompt_choice("Monitora as calorias", &yes_no_options)?;
    let activity_freq = prompt_number("Atividade física semanal (0 a 3)", 0.0, 3.0)?;
    let device_time = prompt_number("Tempo de uso de telas (0 a 2)", 0.0, 2.0)?;
    let alcohol = prompt_choice("Consumo de álcool", &frequency_options)?;
    let transport = prompt_choice("Meio de transporte principal", &transport_options)?;

    Ok(RawPatientInput {
        gender,
        age,
        height_m,
        weight_kg,
        family_history,
        high_calorie_food,
        vegetable_freq,
        main_meals,
        between_meals,
        smoker,
        water_intake,
        calorie_monitoring,
        activity_freq,
        device_time,
        alcohol,
        transport,
    })
}

/// Numbered choice menu; re-prompts until a listed option is picked.
fn prompt_choice(label: &str, options: &[&str]) -> io::Result<String> {
    loop {
        println!("{}:", label);
        for (index, option) in options.iter().enumerate() {
            println!("  {}. {}", index + 1, option);
        }

        let input = prompt_line("Opção: ")?;
        match input.parse::<usize>() {
            Ok(n) if n >= 1 && n <= options.len() => return Ok(options[n - 1].to_string()),
            _ => println!("Opção inválida, tente novamente."),
        }
    }
}

/// Numeric prompt with an inclusive range; re-prompts on parse or range
/// failure.
fn prompt_number(label: &str, min: f64, max: f64) -> io::Result<f64> {
    loop {
        let input = prompt_line(&format!("{}: ", label))?;
        match input.replace(',', ".").parse::<f64>() {
            Ok(value) if value >= min && value <= max => return Ok(value),
            Ok(value) => println!(
                "Valor fora do intervalo ({} a {}): {}",
                min, max, value
            ),
            Err(_) => println!("Número inválido, tente novamente."),
        }
    }
}
