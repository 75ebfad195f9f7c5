//! services/sms_service.rs
//! Consulta de mensajes SMS en Twilio (Messages.json) con filtro por remitente.

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use thiserror::Error;

use crate::config::app_config::{SmsConfig, TwilioCredentials};
use crate::models::message_model::{
    MessageListResponse, MessageRecord, ProviderErrorBody, ProviderMessage,
};

/// Máximo de mensajes que se piden (una sola página)
pub const MESSAGE_PAGE_SIZE: u32 = 100;
const TWILIO_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

#[derive(Debug, Error)]
pub enum SmsError {
    #[error("Twilio credentials not configured")]
    MissingCredentials,

    #[error("HTTP error calling Twilio: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Twilio API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("failed to decode Twilio response: {0}")]
    Decode(String),
}

#[derive(Clone)]
pub struct SmsService {
    http_client: Client,
    api_url: String,
    credentials: Option<TwilioCredentials>,
}

impl SmsService {
    pub fn new(config: &SmsConfig) -> Self {
        Self {
            http_client: Client::new(),
            api_url: config.api_url.trim_end_matches('/').to_string(),
            credentials: config.credentials.clone(),
        }
    }

    /// Mensajes recientes cuyo remitente contiene `from_pattern`.
    /// Cualquier error se loguea y devuelve una lista vacía.
    pub async fn get_messages(&self, from_pattern: &str, hours_back: u32) -> Vec<MessageRecord> {
        let Some(date_after) = sent_after_bound(Utc::now(), hours_back) else {
            log::error!("Ventana de {} horas fuera de rango", hours_back);
            return vec![];
        };

        match self.list_messages(date_after).await {
            Ok(all_messages) => {
                let matching = filter_messages(all_messages, from_pattern);
                log::info!(
                    "Se encontraron {} mensajes que coinciden con '{}'",
                    matching.len(),
                    from_pattern
                );
                matching
            }
            Err(SmsError::MissingCredentials) => {
                log::error!("Credenciales de Twilio no configuradas");
                vec![]
            }
            Err(e) => {
                log::error!("Error obteniendo mensajes de Twilio: {}", e);
                vec![]
            }
        }
    }

    /// Una llamada al endpoint de listado, filtrada en el servidor por fecha.
    pub async fn list_messages(
        &self,
        date_after: DateTime<Utc>,
    ) -> Result<Vec<ProviderMessage>, SmsError> {
        let creds = self
            .credentials
            .as_ref()
            .filter(|c| !c.account_sid.is_empty() && !c.auth_token.is_empty())
            .ok_or(SmsError::MissingCredentials)?;

        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.api_url, creds.account_sid
        );
        let page_size = MESSAGE_PAGE_SIZE.to_string();
        let date_sent_after = date_after.format(TWILIO_DATE_FORMAT).to_string();

        log::info!("Consultando Twilio: {} (DateSent>{})", url, date_sent_after);
        let resp = self
            .http_client
            .get(&url)
            .basic_auth(&creds.account_sid, Some(&creds.auth_token))
            .query(&[
                ("PageSize", page_size.as_str()),
                ("DateSent>", date_sent_after.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body_txt = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ProviderErrorBody>(&body_txt)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or(body_txt);
            return Err(SmsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body_txt = resp.text().await?;
        let list: MessageListResponse =
            serde_json::from_str(&body_txt).map_err(|e| SmsError::Decode(e.to_string()))?;
        log::info!("Twilio devolvió {} mensajes", list.messages.len());
        Ok(list.messages)
    }
}

/// Límite inferior de fecha de envío: `now - hours_back`.
/// None si la resta sale del rango de chrono.
pub fn sent_after_bound(now: DateTime<Utc>, hours_back: u32) -> Option<DateTime<Utc>> {
    Duration::try_hours(i64::from(hours_back)).and_then(|delta| now.checked_sub_signed(delta))
}

/// Se queda con los mensajes cuyo `from` contiene el patrón (sin distinguir
/// mayúsculas), en el orden original.
pub fn filter_messages(messages: Vec<ProviderMessage>, from_pattern: &str) -> Vec<MessageRecord> {
    let pattern = from_pattern.to_uppercase();
    messages
        .into_iter()
        .filter(|msg| {
            msg.from
                .as_deref()
                .map(|from| from.to_uppercase().contains(&pattern))
                .unwrap_or(false)
        })
        .map(MessageRecord::from)
        .collect()
}
