//! cli.rs
//! Parseo del único argumento de la CLI (el comando).

use clap::Parser;

#[derive(Debug, Parser)]
#[command(
    name = "govuk-signin",
    version,
    about = "GOV.UK sign-in automation and SMS verification lookup"
)]
pub struct Cli {
    /// automate | automate-visible | messages
    #[arg(allow_hyphen_values = true)]
    pub command: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Automate { headless: bool },
    Messages,
    /// Sin comando: sólo se imprime el uso
    Usage,
    Unknown(String),
}

impl Command {
    /// El token se compara sin distinguir mayúsculas
    pub fn from_token(token: Option<&str>) -> Self {
        let Some(token) = token else {
            return Command::Usage;
        };
        match token.trim().to_lowercase().as_str() {
            "automate" => Command::Automate { headless: true },
            "automate-visible" => Command::Automate { headless: false },
            "messages" => Command::Messages,
            _ => Command::Unknown(token.to_string()),
        }
    }
}

impl Cli {
    pub fn command(&self) -> Command {
        Command::from_token(self.command.as_deref())
    }
}

pub fn usage() -> &'static str {
    "Usage:\n  govuk-signin automate          # Run GOV.UK automation (headless)\n  govuk-signin messages          # Check for verification messages\n  govuk-signin automate-visible  # Run with visible browser\n"
}
