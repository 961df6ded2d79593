use crate::services::DatasetSummary;

/// Static figures shown when no patient-records file is available.
const PLACEHOLDER_RECORDS: usize = 2111;
const PLACEHOLDER_MEAN_AGE: f64 = 24.3;
const PLACEHOLDER_MEAN_HEIGHT_M: f64 = 1.70;
const PLACEHOLDER_MEAN_WEIGHT_KG: f64 = 86.6;
const PLACEHOLDER_MEAN_BMI: f64 = 29.7;

/// Analytics dashboard: aggregate figures from the patient-records file, or
/// placeholders when it is absent.
pub fn render(summary: Option<&DatasetSummary>) {
    println!();
    println!("📊 Dashboard Analítico");
    println!("----------------------");

    match summary {
        Some(summary) => {
            println!("Pacientes registrados: {}", summary.records);
            println!("Idade média:           {:.1} anos", summary.mean_age);
            println!("Altura média:          {:.2} m", summary.mean_height_m);
            println!("Peso médio:            {:.1} kg", summary.mean_weight_kg);
            println!("IMC médio:             {:.1}", summary.mean_bmi);

            if !summary.label_counts.is_empty() {
                println!();
                println!("Distribuição por categoria:");
                for (label, count) in &summary.label_counts {
                    let share = *count as f64 / summary.records as f64 * 100.0;
                    println!(
                        "  {:<22} {:>5}  ({:.1}%)",
                        label.replace('_', " "),
                        count,
                        share
                    );
                }
            }
        }
        None => {
            println!("(dados de referência — arquivo de pacientes não disponível)");
            println!("Pacientes registrados: {}", PLACEHOLDER_RECORDS);
            println!("Idade média:           {:.1} anos", PLACEHOLDER_MEAN_AGE);
            println!("Altura média:          {:.2} m", PLACEHOLDER_MEAN_HEIGHT_M);
            println!("Peso médio:            {:.1} kg", PLACEHOLDER_MEAN_WEIGHT_KG);
            println!("IMC médio:             {:.1}", PLACEHOLDER_MEAN_BMI);
        }
    }
}
