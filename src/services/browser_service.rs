//! services/browser_service.rs
//! Sesión de Chromium (CDP vía chromiumoxide) y la interfaz mínima de página
//! que usa el driver de sign-in.

use std::{fs, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures_util::StreamExt;
use serde_json::Value;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Prefijo del user-data-dir temporal
const PROFILE_DIR_PREFIX: &str = "govuk_signin_chrome";

/// Lo que el driver necesita de una página: navegar, evaluar JS y leer la URL.
#[async_trait]
pub trait BrowserPage: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Evalúa una expresión JS (se espera la promesa si la hay) y devuelve su valor JSON.
    async fn evaluate(&self, script: &str) -> Result<Value>;

    async fn current_url(&self) -> Result<Option<String>>;
}

/// Página real de Chromium
pub struct ChromePage {
    page: Page,
}

#[async_trait]
impl BrowserPage for ChromePage {
    async fn navigate(&self, url: &str) -> Result<()> {
        // goto resuelve cuando la página terminó de cargar
        self.page
            .goto(url)
            .await
            .with_context(|| format!("No se pudo navegar a {}", url))?;
        Ok(())
    }

    async fn evaluate(&self, script: &str) -> Result<Value> {
        let params = EvaluateParams::builder()
            .expression(script)
            .await_promise(true)
            .return_by_value(true)
            .build()
            .map_err(|e| anyhow!("EvaluateParams inválidos: {}", e))?;

        let result = self
            .page
            .evaluate_expression(params)
            .await
            .context("Falló la evaluación de JavaScript")?;

        Ok(result.value().cloned().unwrap_or(Value::Null))
    }

    async fn current_url(&self) -> Result<Option<String>> {
        self.page.url().await.context("No se pudo leer la URL actual")
    }
}

/// Una sesión de navegador por corrida. Se cierra con `close()`; el
/// user-data-dir se borra al soltar la sesión.
pub struct BrowserSession {
    browser: Browser,
    handler_handle: JoinHandle<()>,
    _profile: ProfileCleanup,
}

impl BrowserSession {
    pub async fn launch(headless: bool, chrome_path: Option<&PathBuf>) -> Result<Self> {
        let profile_dir =
            std::env::temp_dir().join(format!("{}_{}", PROFILE_DIR_PREFIX, Uuid::new_v4()));
        fs::create_dir_all(&profile_dir)
            .with_context(|| format!("No se pudo crear {:?}", profile_dir))?;
        let profile = ProfileCleanup {
            dir: profile_dir.clone(),
        };

        let mut builder = BrowserConfig::builder()
            .user_data_dir(&profile_dir)
            .args(vec![
                "--no-sandbox",
                "--disable-setuid-sandbox",
                "--disable-gpu",
                "--disable-dev-shm-usage",
                "--no-first-run",
                "--no-default-browser-check",
                "--disable-background-networking",
                "--disable-breakpad",
                "--disable-default-apps",
                "--disable-extensions",
                "--disable-sync",
                "--disable-translate",
            ]);
        if !headless {
            builder = builder.with_head();
        }
        if let Some(path) = chrome_path {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|e| anyhow!("BrowserConfig inválido: {}", e))?;

        log::info!(
            "Lanzando navegador (headless={}, chrome={:?})",
            headless,
            chrome_path
        );
        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("No se pudo lanzar el navegador")?;

        // El handler debe consumirse para que el navegador responda
        let handler_handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    log::debug!("Evento CDP con error: {:?}", e);
                }
            }
        });

        Ok(Self {
            browser,
            handler_handle,
            _profile: profile,
        })
    }

    pub async fn new_page(&self) -> Result<ChromePage> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .context("No se pudo abrir una pestaña")?;
        Ok(ChromePage { page })
    }

    /// Cierra el navegador. Los errores sólo se loguean.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            log::warn!("Error cerrando el navegador: {:?}", e);
        }
        if let Err(e) = self.browser.wait().await {
            log::warn!("Error esperando el proceso del navegador: {:?}", e);
        }
        self.handler_handle.abort();
        log::info!("Navegador cerrado");
    }
}

/// Borra el perfil temporal al salir de scope
struct ProfileCleanup {
    dir: PathBuf,
}

impl Drop for ProfileCleanup {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}
