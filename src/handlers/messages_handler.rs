//! handlers/messages_handler.rs
//! Comando `messages`: busca SMS de verificación.

use crate::config::app_config::SmsConfig;
use crate::models::message_model::MessageRecord;
use crate::services::sms_service::SmsService;

pub async fn run_messages_command(config: &SmsConfig) -> Vec<MessageRecord> {
    println!(
        "Searching for verification messages from '{}' (last {}h)...",
        config.sender_pattern, config.hours_back
    );

    let sms_service = SmsService::new(config);
    let messages = sms_service
        .get_messages(&config.sender_pattern, config.hours_back)
        .await;

    print!("{}", format_messages(&messages));
    messages
}

pub fn format_messages(messages: &[MessageRecord]) -> String {
    if messages.is_empty() {
        return "No matching messages found\n".to_string();
    }

    let mut out = format!("\nFound {} messages:\n{}\n", messages.len(), "=".repeat(60));
    for msg in messages {
        out.push_str(&format!("From: {}\n", msg.from));
        out.push_str(&format!(
            "Date: {}\n",
            msg.date_sent.as_deref().unwrap_or("unknown")
        ));
        out.push_str(&format!("Body: {}\n", msg.body));
        out.push_str(&format!("{}\n", "-".repeat(40)));
    }
    out
}
