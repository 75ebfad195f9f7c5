//! config/app_config.rs
//! Configuración global leída del entorno (.env incluido), con valores por defecto.

use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_SIGNIN_URL: &str = "https://signin.account.gov.uk/sign-in-or-create";
pub const DEFAULT_TWILIO_API_URL: &str = "https://api.twilio.com";
pub const DEFAULT_SENDER_PATTERN: &str = "GOV";
pub const DEFAULT_HOURS_BACK: u32 = 48;

/// Ejecutables que probamos (en orden) si no hay CHROME_PATH
const CHROME_CANDIDATES: &[&str] = &[
    "google-chrome",
    "google-chrome-stable",
    "chromium",
    "chromium-browser",
];

/// Esperas fijas entre pasos. No hay polling: se duerme y se sigue.
#[derive(Debug, Clone)]
pub struct StepDelays {
    pub page_load: Duration,
    pub navigation: Duration,
    pub email: Duration,
    pub password: Duration,
    pub final_check: Duration,
}

impl Default for StepDelays {
    fn default() -> Self {
        StepDelays {
            page_load: Duration::from_secs(3),
            navigation: Duration::from_secs(3),
            email: Duration::from_secs(5),
            password: Duration::from_secs(7),
            final_check: Duration::from_secs(2),
        }
    }
}

impl StepDelays {
    /// Sin esperas (tests)
    #[cfg(test)]
    pub fn none() -> Self {
        StepDelays {
            page_load: Duration::ZERO,
            navigation: Duration::ZERO,
            email: Duration::ZERO,
            password: Duration::ZERO,
            final_check: Duration::ZERO,
        }
    }
}

/// Credenciales de la cuenta Twilio
#[derive(Debug, Clone)]
pub struct TwilioCredentials {
    pub account_sid: String,
    pub auth_token: String,
}

#[derive(Debug, Clone)]
pub struct AutomationConfig {
    pub signin_url: String,
    pub email: String,
    pub password: String,
    pub chrome_path: Option<PathBuf>,
    pub delays: StepDelays,
}

impl Default for AutomationConfig {
    fn default() -> Self {
        AutomationConfig {
            signin_url: DEFAULT_SIGNIN_URL.to_string(),
            email: String::new(),
            password: String::new(),
            chrome_path: None,
            delays: StepDelays::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SmsConfig {
    pub api_url: String,
    pub credentials: Option<TwilioCredentials>,
    pub sender_pattern: String,
    pub hours_back: u32,
}

impl Default for SmsConfig {
    fn default() -> Self {
        SmsConfig {
            api_url: DEFAULT_TWILIO_API_URL.to_string(),
            credentials: None,
            sender_pattern: DEFAULT_SENDER_PATTERN.to_string(),
            hours_back: DEFAULT_HOURS_BACK,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub automation: AutomationConfig,
    pub sms: SmsConfig,
    pub results_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            automation: AutomationConfig::default(),
            sms: SmsConfig::default(),
            results_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Construye la config desde variables de entorno.
    /// Llamar después de `dotenv().ok()`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Igual que `from_env` pero con una función de búsqueda inyectable.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let email = get("GOVUK_EMAIL").unwrap_or_default();
        let password = get("GOVUK_PASSWORD").unwrap_or_default();
        if email.is_empty() || password.is_empty() {
            log::warn!("GOVUK_EMAIL o GOVUK_PASSWORD no están definidos");
        }

        let chrome_path = get("CHROME_PATH")
            .map(PathBuf::from)
            .or_else(find_chrome_executable);

        let credentials = match (get("TWILIO_ACCOUNT_SID"), get("TWILIO_AUTH_TOKEN")) {
            (Some(account_sid), Some(auth_token)) => Some(TwilioCredentials {
                account_sid,
                auth_token,
            }),
            _ => None,
        };

        let hours_back = match get("MESSAGES_HOURS_BACK") {
            Some(raw) => raw.trim().parse::<u32>().unwrap_or_else(|_| {
                log::warn!(
                    "MESSAGES_HOURS_BACK inválido ('{}'), usando {}",
                    raw,
                    DEFAULT_HOURS_BACK
                );
                DEFAULT_HOURS_BACK
            }),
            None => DEFAULT_HOURS_BACK,
        };

        AppConfig {
            automation: AutomationConfig {
                signin_url: get("GOVUK_SIGNIN_URL")
                    .unwrap_or_else(|| DEFAULT_SIGNIN_URL.to_string()),
                email,
                password,
                chrome_path,
                delays: StepDelays::default(),
            },
            sms: SmsConfig {
                api_url: get("TWILIO_API_URL").unwrap_or_else(|| DEFAULT_TWILIO_API_URL.to_string()),
                credentials,
                sender_pattern: get("MESSAGES_SENDER_PATTERN")
                    .unwrap_or_else(|| DEFAULT_SENDER_PATTERN.to_string()),
                hours_back,
            },
            results_dir: get("RESULTS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}

/// Busca Chrome/Chromium en el PATH
fn find_chrome_executable() -> Option<PathBuf> {
    CHROME_CANDIDATES
        .iter()
        .find_map(|name| which::which(name).ok())
}
