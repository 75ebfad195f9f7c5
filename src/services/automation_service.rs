//! services/automation_service.rs
//! Automatización lineal del sign-in de GOV.UK: cuatro pasos, esperas fijas,
//! sin reintentos.

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::config::app_config::AutomationConfig;
use crate::models::result_model::{ResultLog, StepRecord};
use crate::scripts::signin_scripts::{
    enter_email_js, enter_password_js, FieldEntryState, FinalCheckState, CLICK_SIGN_IN_JS,
    FINAL_CHECK_JS,
};
use crate::services::browser_service::{BrowserPage, BrowserSession};

/// Fragmentos de URL que indican que seguimos en el flujo de login
const LOGIN_URL_MARKERS: &[&str] = &["sign-in", "login", "enter-"];

#[derive(Debug, Clone)]
pub struct SigninAutomator {
    config: AutomationConfig,
    headless: bool,
}

impl SigninAutomator {
    pub fn new(config: AutomationConfig, headless: bool) -> Self {
        log::info!("Inicializando automatización (headless={})", headless);
        log::info!("Email: {}", config.email);
        log::info!("Password: {}", mask_secret(&config.password));
        Self { config, headless }
    }

    /// Corre la automatización completa con un navegador real.
    /// Nunca falla: los errores quedan en `ResultLog::errors`.
    pub async fn run_automation(&self) -> ResultLog {
        let mut result_log = ResultLog::new();
        log::info!("Iniciando automatización de sign-in GOV.UK...");

        let session =
            match BrowserSession::launch(self.headless, self.config.chrome_path.as_ref()).await {
                Ok(s) => s,
                Err(e) => {
                    let error_msg = format!("Automation failed: {:#}", e);
                    log::error!("{}", error_msg);
                    result_log.push_error(error_msg);
                    return result_log;
                }
            };

        match session.new_page().await {
            Ok(page) => self.drive(&page, &mut result_log).await,
            Err(e) => {
                let error_msg = format!("Automation failed: {:#}", e);
                log::error!("{}", error_msg);
                result_log.push_error(error_msg);
            }
        }

        // Se cierra siempre, haya salido bien o no
        session.close().await;
        result_log
    }

    /// Ejecuta los pasos sobre una página ya abierta, capturando cualquier error.
    pub async fn drive<P: BrowserPage + ?Sized>(&self, page: &P, result_log: &mut ResultLog) {
        if let Err(e) = self.run_steps(page, result_log).await {
            let error_msg = format!("Automation failed: {:#}", e);
            log::error!("{}", error_msg);
            result_log.push_error(error_msg);
        }
    }

    async fn run_steps<P: BrowserPage + ?Sized>(
        &self,
        page: &P,
        result_log: &mut ResultLog,
    ) -> Result<()> {
        let delays = &self.config.delays;

        // 1) Cargar la página inicial
        log::info!("Paso 1: cargando {}", self.config.signin_url);
        if let Err(e) = page.navigate(&self.config.signin_url).await {
            let error_msg = format!("Failed to load initial page: {:#}", e);
            log::error!("{}", error_msg);
            result_log.push_error(error_msg);
            return Ok(());
        }
        pause(delays.page_load).await;

        let initial_url = page.current_url().await?;
        log::info!("Página inicial cargada: {:?}", initial_url);
        result_log.push_step(StepRecord::new(1, true).with_url(initial_url));

        // 2) Sign in + email
        log::info!("Paso 2: navegando al ingreso de email...");
        let clicked = page.evaluate(CLICK_SIGN_IN_JS).await?;
        if clicked.as_bool().unwrap_or(false) {
            log::info!("Se clickeó el botón de sign in");
            pause(delays.navigation).await;
        } else {
            log::warn!("No se encontró un botón de sign in, se sigue en la página actual");
        }

        let email_state: FieldEntryState = parse_state(
            page.evaluate(&enter_email_js(&self.config.email)).await?,
            "email",
        )?;
        pause(delays.email).await;
        if email_state.field_found {
            log::info!(
                "Email ingresado (submit={}, url={:?}, title={:?})",
                email_state.submitted,
                email_state.current_url,
                email_state.page_title
            );
        } else {
            log::warn!("No se encontró el campo de email");
        }
        result_log.push_step(StepRecord::new(2, email_state.field_found).with_action("email_entry"));

        // 3) Password
        log::info!("Paso 3: ingresando password y enviando...");
        let password_state: FieldEntryState = parse_state(
            page.evaluate(&enter_password_js(&self.config.password)).await?,
            "password",
        )?;
        pause(delays.password).await;
        if password_state.field_found {
            log::info!(
                "Password ingresado (submit={}, url={:?}, title={:?})",
                password_state.submitted,
                password_state.current_url,
                password_state.page_title
            );
        } else {
            log::warn!("No se encontró el campo de password");
        }
        result_log.push_step(
            StepRecord::new(3, password_state.field_found).with_action("password_entry"),
        );

        // 4) Revisión final
        log::info!("Paso 4: revisando el resultado final...");
        pause(delays.final_check).await;
        let final_state: FinalCheckState =
            parse_state(page.evaluate(FINAL_CHECK_JS).await?, "final_check")?;
        log::info!("Título final: {:?}", final_state.page_title);
        for err in &final_state.errors {
            log::warn!("Error en la página: {}", err);
        }

        let final_url = page
            .current_url()
            .await
            .ok()
            .flatten()
            .or(final_state.current_url)
            .unwrap_or_else(|| "unknown".to_string());

        apply_final_url(result_log, &final_url);
        result_log.push_step(
            StepRecord::new(4, true)
                .with_action("final_check")
                .with_url(Some(final_url)),
        );

        Ok(())
    }
}

/// true si la URL ya no parece parte del flujo de login
pub fn is_signed_in_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    !LOGIN_URL_MARKERS.iter().any(|marker| lower.contains(marker))
}

/// Decide éxito sólo por la URL final y lo registra en el log.
pub fn apply_final_url(result_log: &mut ResultLog, final_url: &str) {
    result_log.final_url = Some(final_url.to_string());
    if is_signed_in_url(final_url) {
        result_log.success = true;
        log::info!("Sign-in aparentemente exitoso. URL final: {}", final_url);
    } else {
        result_log.success = false;
        result_log.push_error(format!("Still on login page: {}", final_url));
        log::warn!("Seguimos en la página de login: {}", final_url);
    }
}

pub fn mask_secret(secret: &str) -> String {
    "*".repeat(secret.chars().count())
}

fn parse_state<T: serde::de::DeserializeOwned>(value: Value, what: &str) -> Result<T> {
    serde_json::from_value(value)
        .with_context(|| format!("Respuesta inesperada del script de {}", what))
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
