//! scripts/signin_scripts.rs
//! Scripts JS que se inyectan en la página de sign-in.
//!
//! Cada script es una expresión que devuelve un valor serializable a JSON.
//! Los valores del usuario (email, password) se insertan como literales JSON,
//! nunca interpolando texto crudo.

use serde::Deserialize;

/// Busca un enlace/botón "sign in" o "start now" y lo clickea. Devuelve bool.
pub const CLICK_SIGN_IN_JS: &str = r#"
(() => {
    const candidates = document.querySelectorAll('a, button');
    for (const element of candidates) {
        const text = (element.textContent || '').toLowerCase().trim();
        if (text.includes('sign in') || text.includes('start now')) {
            console.log('Clicking sign in affordance:', text);
            element.click();
            return true;
        }
    }
    return false;
})()
"#;

/// Revisión final: URL, título y mensajes de error visibles.
pub const FINAL_CHECK_JS: &str = r#"
(() => {
    const currentUrl = window.location.href;
    const errorSelectors = ['.govuk-error-message', '.error-message', '[role="alert"]', '.govuk-error-summary'];
    const errors = [];
    for (const selector of errorSelectors) {
        for (const el of document.querySelectorAll(selector)) {
            const text = (el.textContent || '').trim();
            if (text) {
                errors.push(text);
            }
        }
    }
    return {
        currentUrl: currentUrl,
        pageTitle: document.title,
        errors: errors
    };
})()
"#;

const EMAIL_SELECTORS: &[&str] = &["#email", "input[name=\"email\"]", "input[type=\"email\"]"];
const PASSWORD_SELECTORS: &[&str] = &[
    "#password",
    "input[name=\"password\"]",
    "input[type=\"password\"]",
];

const EMAIL_BUTTON_WORDS: &[&str] = &["continue", "next", "submit"];
const PASSWORD_BUTTON_WORDS: &[&str] = &["sign in", "continue", "submit"];

/// Resultado de `fill_field_js`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldEntryState {
    pub current_url: Option<String>,
    pub page_title: Option<String>,
    pub field_found: bool,
    pub submitted: bool,
}

/// Resultado de `FINAL_CHECK_JS`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinalCheckState {
    pub current_url: Option<String>,
    pub page_title: Option<String>,
    pub errors: Vec<String>,
}

pub fn enter_email_js(email: &str) -> String {
    fill_field_js(EMAIL_SELECTORS, email, EMAIL_BUTTON_WORDS)
}

pub fn enter_password_js(password: &str) -> String {
    fill_field_js(PASSWORD_SELECTORS, password, PASSWORD_BUTTON_WORDS)
}

/// Script genérico: primer selector que exista, setea el valor, dispara
/// input/change y clickea el primer botón que parezca "continuar".
fn fill_field_js(selectors: &[&str], value: &str, button_words: &[&str]) -> String {
    let selectors = js_literal(&selectors);
    let value = js_literal(&value);
    let words = js_literal(&button_words);

    format!(
        r#"
(() => {{
    const selectors = {selectors};
    const words = {words};
    let input = null;
    for (const selector of selectors) {{
        input = document.querySelector(selector);
        if (input) break;
    }}
    let submitted = false;
    if (input) {{
        input.focus();
        input.value = {value};
        input.dispatchEvent(new Event('input', {{ bubbles: true }}));
        input.dispatchEvent(new Event('change', {{ bubbles: true }}));

        const buttons = document.querySelectorAll('button, input[type="submit"], .govuk-button');
        for (const btn of buttons) {{
            const text = (btn.textContent || btn.value || '').toLowerCase();
            if (words.some(w => text.includes(w)) || btn.type === 'submit') {{
                btn.click();
                submitted = true;
                break;
            }}
        }}
    }} else {{
        console.error('Input not found for selectors', selectors);
    }}
    return {{
        currentUrl: window.location.href,
        pageTitle: document.title,
        fieldFound: !!input,
        submitted: submitted
    }};
}})()
"#
    )
}

/// Literal JS seguro (JSON es un subconjunto de JS para estos tipos)
fn js_literal<T: serde::Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}
