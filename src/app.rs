//! app.rs
//! Dispatcher: comando -> handler.
use anyhow::Result;

use crate::cli::{usage, Command};
use crate::config::app_config::AppConfig;
use crate::handlers::{automation_handler, messages_handler};

/// Qué terminó haciendo `run_command`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Automated,
    MessagesListed(usize),
    UsagePrinted,
}

pub async fn run_command(command: Command, config: &AppConfig) -> Result<Outcome> {
    match command {
        Command::Automate { headless } => {
            automation_handler::run_automation_command(config, headless).await?;
            Ok(Outcome::Automated)
        }
        Command::Messages => {
            let messages = messages_handler::run_messages_command(&config.sms).await;
            Ok(Outcome::MessagesListed(messages.len()))
        }
        Command::Usage => {
            print!("{}", usage());
            Ok(Outcome::UsagePrinted)
        }
        Command::Unknown(token) => {
            println!("Unknown command: {}", token);
            print!("{}", usage());
            Ok(Outcome::UsagePrinted)
        }
    }
}
