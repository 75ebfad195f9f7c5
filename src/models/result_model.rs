//! models/result_model.rs
//! Registro de resultados de una corrida de automatización.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: u32,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub action: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub url: Option<String>,
}

impl StepRecord {
    pub fn new(step: u32, success: bool) -> Self {
        Self {
            step,
            success,
            action: None,
            url: None,
        }
    }

    pub fn with_action(mut self, action: &str) -> Self {
        self.action = Some(action.to_string());
        self
    }

    pub fn with_url(mut self, url: Option<String>) -> Self {
        self.url = url;
        self
    }
}

/// Log de una corrida. Pasos y errores sólo se agregan al final.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultLog {
    pub success: bool,
    pub steps: Vec<StepRecord>,
    pub errors: Vec<String>,
    pub final_url: Option<String>,
    pub timestamp: String,
}

impl ResultLog {
    pub fn new() -> Self {
        Self {
            success: false,
            steps: Vec::new(),
            errors: Vec::new(),
            final_url: None,
            timestamp: chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
        }
    }

    pub fn push_step(&mut self, step: StepRecord) {
        self.steps.push(step);
    }

    pub fn push_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }
}

impl Default for ResultLog {
    fn default() -> Self {
        Self::new()
    }
}
