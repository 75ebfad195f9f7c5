//! models/message_model.rs
//! Mensajes SMS tal como los devuelve Twilio y su proyección local.

use serde::{Deserialize, Serialize};

/// Un recurso "Message" de Twilio (sólo los campos que usamos)
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderMessage {
    pub from: Option<String>,
    pub to: Option<String>,
    pub body: Option<String>,
    pub date_sent: Option<String>, // RFC 2822, p.e. "Mon, 19 Oct 2026 10:00:00 +0000"
    pub status: Option<String>,
}

/// Página de `Messages.json`
#[derive(Debug, Clone, Deserialize)]
pub struct MessageListResponse {
    #[serde(default)]
    pub messages: Vec<ProviderMessage>,
}

/// Cuerpo de error de la API
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderErrorBody {
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageRecord {
    pub from: String,
    pub to: String,
    pub body: String,
    pub date_sent: Option<String>,
    pub status: Option<String>,
}

impl From<ProviderMessage> for MessageRecord {
    fn from(msg: ProviderMessage) -> Self {
        MessageRecord {
            from: msg.from.unwrap_or_default(),
            to: msg.to.unwrap_or_default(),
            body: msg.body.unwrap_or_default(),
            date_sent: msg.date_sent,
            status: msg.status,
        }
    }
}
