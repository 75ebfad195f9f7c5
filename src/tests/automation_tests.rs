//! tests/automation_tests.rs
//! Pruebas del driver de sign-in contra una página falsa (sin navegador).

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::config::app_config::{AutomationConfig, StepDelays};
    use crate::models::result_model::ResultLog;
    use crate::scripts::signin_scripts::{enter_email_js, enter_password_js};
    use crate::services::automation_service::{
        apply_final_url, is_signed_in_url, mask_secret, SigninAutomator,
    };
    use crate::services::browser_service::BrowserPage;

    const START_URL: &str = "https://signin.account.gov.uk/sign-in-or-create";

    // Página falsa: respuestas de scripts en orden, URL final tras el paso 3
    struct FakePage {
        fail_navigation: bool,
        responses: Mutex<VecDeque<Value>>,
        scripts: Mutex<Vec<String>>,
        final_url: Option<String>,
    }

    impl FakePage {
        fn new(responses: Vec<Value>, final_url: Option<&str>) -> Self {
            Self {
                fail_navigation: false,
                responses: Mutex::new(responses.into()),
                scripts: Mutex::new(vec![]),
                final_url: final_url.map(|u| u.to_string()),
            }
        }

        fn evaluated(&self) -> usize {
            self.scripts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl BrowserPage for FakePage {
        async fn navigate(&self, url: &str) -> Result<()> {
            if self.fail_navigation {
                return Err(anyhow!("net::ERR_NAME_NOT_RESOLVED at {}", url));
            }
            Ok(())
        }

        async fn evaluate(&self, script: &str) -> Result<Value> {
            self.scripts.lock().unwrap().push(script.to_string());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| anyhow!("Execution context was destroyed"))
        }

        async fn current_url(&self) -> Result<Option<String>> {
            // Después del password la página "navega" a la URL final
            if self.evaluated() >= 3 {
                Ok(self.final_url.clone())
            } else {
                Ok(Some(START_URL.to_string()))
            }
        }
    }

    fn automator() -> SigninAutomator {
        let config = AutomationConfig {
            email: "user@example.com".to_string(),
            password: "s3cret".to_string(),
            delays: StepDelays::none(),
            ..AutomationConfig::default()
        };
        SigninAutomator::new(config, true)
    }

    fn happy_responses() -> Vec<Value> {
        vec![
            json!(true),
            json!({"currentUrl": "https://signin.account.gov.uk/enter-email", "fieldFound": true, "submitted": true}),
            json!({"currentUrl": "https://signin.account.gov.uk/enter-password", "fieldFound": true, "submitted": true}),
            json!({"currentUrl": "https://home.account.gov.uk/", "pageTitle": "Your services", "errors": []}),
        ]
    }

    #[actix_rt::test]
    async fn test_successful_run_records_four_steps() {
        let page = FakePage::new(happy_responses(), Some("https://home.account.gov.uk/your-services"));
        let mut log = ResultLog::new();

        automator().drive(&page, &mut log).await;

        assert!(log.success);
        assert!(log.errors.is_empty(), "errores: {:?}", log.errors);
        assert_eq!(log.final_url.as_deref(), Some("https://home.account.gov.uk/your-services"));

        let numbers: Vec<u32> = log.steps.iter().map(|s| s.step).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(log.steps[0].url.as_deref(), Some(START_URL));
        assert_eq!(log.steps[1].action.as_deref(), Some("email_entry"));
        assert_eq!(log.steps[2].action.as_deref(), Some("password_entry"));
        assert_eq!(log.steps[3].action.as_deref(), Some("final_check"));
        assert!(log.steps.iter().all(|s| s.success));
        assert_eq!(page.evaluated(), 4);
    }

    #[actix_rt::test]
    async fn test_still_on_sign_in_page_is_failure() {
        let final_url = "https://signin.account.gov.uk/sign-in-or-create?error=1";
        let page = FakePage::new(happy_responses(), Some(final_url));
        let mut log = ResultLog::new();

        automator().drive(&page, &mut log).await;

        assert!(!log.success);
        assert_eq!(log.steps.len(), 4);
        assert!(log.errors.iter().any(|e| e.contains(final_url)));
    }

    #[actix_rt::test]
    async fn test_missing_email_field_does_not_stop_later_steps() {
        let responses = vec![
            json!(false),
            json!({"currentUrl": START_URL, "fieldFound": false, "submitted": false}),
            json!({"currentUrl": START_URL, "fieldFound": false, "submitted": false}),
            json!({"currentUrl": START_URL, "errors": ["There is a problem"]}),
        ];
        let page = FakePage::new(responses, Some("https://signin.account.gov.uk/enter-email"));
        let mut log = ResultLog::new();

        automator().drive(&page, &mut log).await;

        assert_eq!(log.steps.len(), 4);
        assert!(!log.steps[1].success);
        assert!(!log.steps[2].success);
        assert!(log.steps[3].success);
        assert!(!log.success);
        assert_eq!(log.errors.len(), 1);
    }

    #[actix_rt::test]
    async fn test_page_load_failure_aborts_run() {
        let mut page = FakePage::new(happy_responses(), None);
        page.fail_navigation = true;
        let mut log = ResultLog::new();

        automator().drive(&page, &mut log).await;

        assert!(!log.success);
        assert!(log.steps.is_empty());
        assert_eq!(log.errors.len(), 1);
        assert!(log.errors[0].starts_with("Failed to load initial page"));
        assert_eq!(page.evaluated(), 0);
    }

    #[actix_rt::test]
    async fn test_script_error_is_recorded_once_and_aborts() {
        // Sólo hay respuesta para el click: el script de email falla
        let page = FakePage::new(vec![json!(true)], None);
        let mut log = ResultLog::new();

        automator().drive(&page, &mut log).await;

        assert!(!log.success);
        assert_eq!(log.steps.len(), 1);
        assert_eq!(log.errors.len(), 1);
        assert!(log.errors[0].starts_with("Automation failed:"));
        assert!(log.errors[0].contains("Execution context was destroyed"));
    }

    #[actix_rt::test]
    async fn test_unknown_final_url_when_page_reports_none() {
        let mut responses = happy_responses();
        responses[3] = json!({"errors": []});
        let page = FakePage::new(responses, None);
        let mut log = ResultLog::new();

        automator().drive(&page, &mut log).await;

        assert_eq!(log.final_url.as_deref(), Some("unknown"));
        assert!(log.success);
    }

    #[test]
    fn test_injected_values_are_json_literals() {
        let email_js = enter_email_js("o'brien\"@example.com");
        assert!(email_js.contains(r#""o'brien\"@example.com""#));
        assert!(email_js.contains("#email"));
        assert!(email_js.contains(r#""next""#));
        assert!(email_js.contains(r#""continue""#));

        let password_js = enter_password_js("p\\w'd");
        assert!(password_js.contains(r#""p\\w'd""#));
        assert!(password_js.contains("sign in"));
    }

    #[test]
    fn test_success_markers() {
        assert!(is_signed_in_url("https://home.account.gov.uk/your-services"));
        assert!(!is_signed_in_url("https://signin.account.gov.uk/SIGN-IN-or-create"));
        assert!(!is_signed_in_url("https://example.gov.uk/login"));
        assert!(!is_signed_in_url("https://signin.account.gov.uk/enter-password"));
    }

    #[test]
    fn test_apply_final_url_keeps_previous_errors() {
        let mut log = ResultLog::new();
        log.push_error("previo");
        apply_final_url(&mut log, "https://signin.account.gov.uk/sign-in");

        assert!(!log.success);
        assert_eq!(log.errors[0], "previo");
        assert_eq!(log.errors[1], "Still on login page: https://signin.account.gov.uk/sign-in");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("s3cret"), "******");
        assert_eq!(mask_secret(""), "");
    }
}
