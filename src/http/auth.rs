//! Login handling for `POST /serverside/newCode.php`.
//!
//! The game posts a multipart form with four fields. They are extracted
//! and logged, then the request is accepted whatever they contain. There
//! is no credential store; the response document is the same for everyone.

use chrono::NaiveDateTime;

use crate::http::multipart::ExtractedField;
use crate::http::response::{RenderedResponse, TemplateTable};
use crate::routing::Category;

/// Form fields sent by the game client, in the order they are logged.
pub const LOGIN_FIELDS: [&str; 4] = ["username", "password", "hardware", "code"];

/// The login form as far as it could be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub username: ExtractedField,
    pub password: ExtractedField,
    pub hardware: ExtractedField,
    pub code: ExtractedField,
}

impl LoginForm {
    /// Pull the four login fields out of a raw request body.
    pub fn from_body(body: &[u8]) -> Self {
        let [username, password, hardware, code] =
            LOGIN_FIELDS.map(|name| ExtractedField::from_body(body, name));
        Self {
            username,
            password,
            hardware,
            code,
        }
    }

    /// Number of fields that were present in the body.
    pub fn present_count(&self) -> usize {
        [&self.username, &self.password, &self.hardware, &self.code]
            .iter()
            .filter(|field| field.value.is_some())
            .count()
    }

    /// Log the submitted values. The password is logged as sent.
    pub fn log(&self, request_id: &str) {
        tracing::info!(
            request_id = %request_id,
            username = %self.username.display_value(),
            password = %self.password.display_value(),
            hardware = %self.hardware.display_value(),
            code = %self.code.display_value(),
            fields_present = self.present_count(),
            "Authentication details"
        );
    }
}

/// Accept a login unconditionally and render the success document.
pub fn handle_auth_request(
    body: &[u8],
    templates: &TemplateTable,
    now: NaiveDateTime,
    request_id: &str,
) -> RenderedResponse {
    let form = LoginForm::from_body(body);
    form.log(request_id);
    templates.render(Category::AuthRequest, now)
}
