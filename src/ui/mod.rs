// Interactive surface
pub mod dashboard;
pub mod form;
pub mod report;

use crate::core::schema::FeatureSchema;
use crate::services::{ArtifactBundle, DatasetSummary};
use std::io::{self, Write};
use std::sync::Arc;

/// Shared read-only state for the interactive session.
///
/// Built once at startup and passed by reference into every action; there is
/// no ambient global lookup.
#[derive(Clone)]
pub struct AppState {
    /// None when either artifact file failed to load. The diagnostic action
    /// is disabled in that case; the rest of the UI still runs.
    pub bundle: Option<Arc<ArtifactBundle>>,
    pub schema: Arc<FeatureSchema>,
    /// None degrades the dashboard to placeholder figures.
    pub dataset: Option<Arc<DatasetSummary>>,
    pub report_url: String,
    pub show_probabilities: bool,
}

/// Main menu loop. One interaction runs to completion before the next is
/// accepted.
pub fn run(state: &AppState) -> io::Result<()> {
    loop {
        println!();
        println!("===========================================");
        println!("  Vida — Triagem de Obesidade");
        println!("===========================================");
        println!("1. Formulário do Paciente");
        println!("2. 📊 Dashboard Analítico");
        println!("3. 📝 Relatórios e Insights");
        println!("0. Sair");

        let choice = prompt_line("Escolha uma opção: ")?;
        match choice.trim() {
            "1" => form::run_diagnostic_action(state)?,
            "2" => dashboard::render(state.dataset.as_deref()),
            "3" => report::render(&state.report_url),
            "0" => {
                println!("Até logo!");
                break;
            }
            other => println!("Opção inválida: {}", other),
        }
    }

    Ok(())
}

/// Print a prompt and read one trimmed line from stdin.
pub(crate) fn prompt_line(message: &str) -> io::Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
