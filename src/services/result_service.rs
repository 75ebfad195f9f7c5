//! services/result_service.rs
//! Persistencia del ResultLog en JSON y resumen para consola.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use crate::models::result_model::ResultLog;

const RESULT_FILE_PREFIX: &str = "automation_result_";

/// Nombre del archivo: automation_result_YYYYmmdd_HHMMSS.json
pub fn result_file_name(at: DateTime<Local>) -> String {
    format!("{}{}.json", RESULT_FILE_PREFIX, at.format("%Y%m%d_%H%M%S"))
}

/// Escribe el log en `dir` y devuelve la ruta final.
pub fn save_result(dir: &Path, result_log: &ResultLog) -> Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("No se pudo crear {:?}", dir))?;

    let path = dir.join(result_file_name(Local::now()));
    let json = serde_json::to_string_pretty(result_log).context("Error serializando ResultLog")?;
    fs::write(&path, json).with_context(|| format!("No se pudo escribir {:?}", path))?;

    log::info!("Resultado guardado en {:?}", path);
    Ok(path)
}

/// Resumen legible de una corrida
pub fn format_summary(result_log: &ResultLog) -> String {
    let rule = "=".repeat(60);
    let mut out = String::new();

    out.push_str(&format!("\n{}\nAUTOMATION RESULTS\n{}\n", rule, rule));
    out.push_str(&format!(
        "Success: {}\n",
        if result_log.success { "YES" } else { "NO" }
    ));
    out.push_str(&format!(
        "Final URL: {}\n",
        result_log.final_url.as_deref().unwrap_or("Unknown")
    ));
    out.push_str(&format!("Steps completed: {}\n", result_log.steps.len()));

    if !result_log.errors.is_empty() {
        out.push_str("\nErrors:\n");
        for error in &result_log.errors {
            out.push_str(&format!("  - {}\n", error));
        }
    }

    out.push_str("\nStep details:\n");
    for step in &result_log.steps {
        out.push_str(&format!(
            "  [{}] Step {}: {}\n",
            if step.success { "ok" } else { "FAIL" },
            step.step,
            step.action.as_deref().unwrap_or("N/A")
        ));
    }

    out
}
