//! handlers/automation_handler.rs
//! Comandos `automate` y `automate-visible`.

use std::path::PathBuf;

use anyhow::Result;

use crate::config::app_config::AppConfig;
use crate::services::automation_service::SigninAutomator;
use crate::services::result_service::{format_summary, save_result};

/// Corre la automatización, imprime el resumen y guarda el JSON.
/// Devuelve la ruta del archivo de resultados.
pub async fn run_automation_command(config: &AppConfig, headless: bool) -> Result<PathBuf> {
    let automator = SigninAutomator::new(config.automation.clone(), headless);
    let result_log = automator.run_automation().await;

    println!("{}", format_summary(&result_log));

    let result_file = save_result(&config.results_dir, &result_log)?;
    println!("Results saved to: {}", result_file.display());
    Ok(result_file)
}
