/// Reports tab: the external report is purely presentational, so the console
/// build just hands out the link.
pub fn render(url: &str) {
    println!();
    println!("📝 Relatórios e Insights");
    println!("------------------------");
    println!("Acesse o relatório completo no navegador:");
    println!("  {}", url);
}
