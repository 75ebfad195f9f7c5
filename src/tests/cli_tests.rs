//! tests/cli_tests.rs
//! Parseo de comandos y dispatcher.

#[cfg(test)]
mod tests {
    use clap::Parser;

    use crate::app::{run_command, Outcome};
    use crate::cli::{usage, Cli, Command};
    use crate::config::app_config::AppConfig;
    use crate::handlers::messages_handler::format_messages;
    use crate::logger::init_logger;
    use crate::models::message_model::MessageRecord;

    #[test]
    fn test_command_tokens() {
        assert_eq!(
            Command::from_token(Some("automate")),
            Command::Automate { headless: true }
        );
        assert_eq!(
            Command::from_token(Some("AUTOMATE-VISIBLE")),
            Command::Automate { headless: false }
        );
        assert_eq!(Command::from_token(Some("Messages")), Command::Messages);
        assert_eq!(Command::from_token(None), Command::Usage);
        assert_eq!(
            Command::from_token(Some("deploy")),
            Command::Unknown("deploy".to_string())
        );
    }

    #[test]
    fn test_cli_accepts_any_token() {
        let cli = Cli::try_parse_from(["govuk-signin", "bogus"]).unwrap();
        assert_eq!(cli.command(), Command::Unknown("bogus".to_string()));

        let cli = Cli::try_parse_from(["govuk-signin", "-x"]).unwrap();
        assert_eq!(cli.command(), Command::Unknown("-x".to_string()));

        let cli = Cli::try_parse_from(["govuk-signin"]).unwrap();
        assert_eq!(cli.command(), Command::Usage);
    }

    #[test]
    fn test_init_logger_can_run_twice() {
        init_logger();
        init_logger();
        log::info!("logger inicializado");
    }

    #[test]
    fn test_usage_mentions_every_command() {
        let text = usage();
        for cmd in ["automate", "automate-visible", "messages"] {
            assert!(text.contains(cmd));
        }
    }

    #[actix_rt::test]
    async fn test_unknown_command_only_prints_usage() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            results_dir: dir.path().to_path_buf(),
            ..AppConfig::default()
        };

        let outcome = run_command(Command::Unknown("bogus".to_string()), &config)
            .await
            .unwrap();
        assert_eq!(outcome, Outcome::UsagePrinted);

        // No se corrió la automatización: no hay archivo de resultados
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[actix_rt::test]
    async fn test_messages_without_credentials_lists_nothing() {
        let config = AppConfig::default();
        let outcome = run_command(Command::Messages, &config).await.unwrap();
        assert_eq!(outcome, Outcome::MessagesListed(0));
    }

    #[test]
    fn test_format_messages() {
        assert_eq!(format_messages(&[]), "No matching messages found\n");

        let out = format_messages(&[MessageRecord {
            from: "GOV.UK".to_string(),
            to: "+447700900000".to_string(),
            body: "Your code is 123456".to_string(),
            date_sent: None,
            status: Some("received".to_string()),
        }]);
        assert!(out.contains("Found 1 messages"));
        assert!(out.contains("From: GOV.UK"));
        assert!(out.contains("Date: unknown"));
        assert!(out.contains("Body: Your code is 123456"));
    }
}
