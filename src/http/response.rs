//! Canned responses.
//!
//! # Responsibilities
//! - Hold one immutable template per [`Category`], built once at startup
//! - Render a template into status, headers and body bytes
//! - Stamp timestamped bodies with a caller-supplied time
//!
//! # Design Decisions
//! - Rendering takes `now` as a parameter; nothing here reads the clock
//! - Every response is `200 OK` and carries `Access-Control-Allow-Origin: *`
//! - Bodies are plain bytes with a declared content type; XML is emitted
//!   verbatim, JSON through `serde_json`

use axum::body::{Body, Bytes};
use axum::http::{header, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{NaiveDateTime, Timelike};

use crate::routing::Category;

pub const TEXT_PLAIN: &str = "text/plain";
pub const TEXT_HTML: &str = "text/html";
pub const APPLICATION_XML: &str = "application/xml";
pub const APPLICATION_JSON: &str = "application/json";

/// Identifier reported by the status endpoint.
pub const SERVER_NAME: &str = "ben10_game_server";

const README_BODY: &str = "Ben10 Game Ready";

const FILE_LIST_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<files>
    <file>
        <name>ben10game.exe</name>
        <size>1024000</size>
        <md5>abcd1234ef567890</md5>
    </file>
    <file>
        <name>readme.txt</name>
        <size>512</size>
        <md5>1234abcd5678ef90</md5>
    </file>
</files>"#;

const UPDATE_XML: &str = r#"<?xml version="1.0"?>
<update>
    <status>no_update</status>
    <version>1.0.0</version>
    <message>Game is up to date</message>
</update>"#;

const SERVERSIDE_XML: &str = r#"<?xml version="1.0"?>
<response>
    <status>success</status>
    <message>Operation successful</message>
</response>"#;

const UNKNOWN_POST_XML: &str =
    r#"<?xml version="1.0"?><response><status>success</status></response>"#;

/// Format a local time the way the legacy server did (ISO-8601, no offset).
///
/// Microseconds are printed as six digits, or left out when they are zero.
pub fn iso_timestamp(now: NaiveDateTime) -> String {
    if now.nanosecond() / 1_000 == 0 {
        now.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        now.format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
    }
}

/// Current wall-clock time, for callers at the edge of the system.
pub fn local_now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

fn server_status_body(timestamp: &str) -> String {
    serde_json::json!({
        "status": "online",
        "server": SERVER_NAME,
        "timestamp": timestamp
    })
    .to_string()
}

fn auth_success_body(timestamp: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<response>
    <status>success</status>
    <auth>true</auth>
    <user>ben10player</user>
    <code_verified>true</code_verified>
    <game_access>granted</game_access>
    <session_id>ben10_session_123</session_id>
    <server_time>{timestamp}</server_time>
    <message>Welcome! The game can start.</message>
</response>"#
    )
}

fn game_data_body() -> String {
    serde_json::json!({
        "status": "success",
        "player_data": {
            "level": 1,
            "score": 0,
            "unlocked_levels": [1]
        }
    })
    .to_string()
}

/// How a template produces its body.
#[derive(Clone)]
pub enum TemplateBody {
    Empty,
    Fixed(Bytes),
    /// Built per request from an ISO-8601 timestamp.
    Timestamped(fn(&str) -> String),
}

impl std::fmt::Debug for TemplateBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateBody::Empty => f.write_str("Empty"),
            TemplateBody::Fixed(bytes) => f.debug_tuple("Fixed").field(bytes).finish(),
            TemplateBody::Timestamped(_) => f.write_str("Timestamped"),
        }
    }
}

/// A canned response for one category.
#[derive(Debug, Clone)]
pub struct ResponseTemplate {
    content_type: Option<&'static str>,
    headers: Vec<(HeaderName, HeaderValue)>,
    body: TemplateBody,
}

impl ResponseTemplate {
    pub fn new(content_type: Option<&'static str>, body: TemplateBody) -> Self {
        Self {
            content_type,
            headers: Vec::new(),
            body,
        }
    }

    /// Add a header sent with every rendering of this template.
    pub fn with_header(mut self, name: HeaderName, value: &'static str) -> Self {
        self.headers.push((name, HeaderValue::from_static(value)));
        self
    }

    pub fn content_type(&self) -> Option<&'static str> {
        self.content_type
    }

    /// Render the template at `now`.
    pub fn render(&self, now: NaiveDateTime) -> RenderedResponse {
        let body = match &self.body {
            TemplateBody::Empty => Bytes::new(),
            TemplateBody::Fixed(bytes) => bytes.clone(),
            TemplateBody::Timestamped(build) => Bytes::from(build(&iso_timestamp(now))),
        };

        RenderedResponse {
            content_type: self.content_type,
            headers: self.headers.clone(),
            body,
        }
    }
}

/// The standard template for a category.
fn standard_template(category: Category) -> ResponseTemplate {
    let fixed = |text: &'static str| TemplateBody::Fixed(Bytes::from_static(text.as_bytes()));

    match category {
        Category::GameReadme => {
            ResponseTemplate::new(Some(TEXT_PLAIN), fixed(README_BODY))
        }
        Category::FileList => {
            ResponseTemplate::new(Some(APPLICATION_XML), fixed(FILE_LIST_XML))
        }
        Category::UpdateCheck => {
            ResponseTemplate::new(Some(APPLICATION_XML), fixed(UPDATE_XML))
        }
        Category::ServerStatus => ResponseTemplate::new(
            Some(APPLICATION_JSON),
            TemplateBody::Timestamped(server_status_body),
        ),
        Category::UnknownGet => ResponseTemplate::new(Some(TEXT_PLAIN), fixed("OK")),
        Category::AuthRequest => ResponseTemplate::new(
            Some(APPLICATION_XML),
            TemplateBody::Timestamped(auth_success_body),
        )
        .with_header(header::CACHE_CONTROL, "no-cache"),
        Category::ServersideGeneric => {
            ResponseTemplate::new(Some(APPLICATION_XML), fixed(SERVERSIDE_XML))
        }
        Category::GameData => ResponseTemplate::new(
            Some(APPLICATION_JSON),
            TemplateBody::Fixed(Bytes::from(game_data_body())),
        ),
        Category::UnknownPost => {
            ResponseTemplate::new(Some(APPLICATION_XML), fixed(UNKNOWN_POST_XML))
        }
        Category::HeadAck => ResponseTemplate::new(Some(TEXT_HTML), TemplateBody::Empty),
        Category::CorsPreflight => ResponseTemplate::new(None, TemplateBody::Empty)
            .with_header(header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS")
            .with_header(header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type"),
    }
}

/// One template per category. Immutable once built.
#[derive(Debug, Clone)]
pub struct TemplateTable {
    templates: [ResponseTemplate; Category::COUNT],
}

impl TemplateTable {
    /// The legacy game server's responses.
    pub fn standard() -> Self {
        Self {
            templates: Category::ALL.map(standard_template),
        }
    }

    pub fn template(&self, category: Category) -> &ResponseTemplate {
        &self.templates[category as usize]
    }

    pub fn render(&self, category: Category, now: NaiveDateTime) -> RenderedResponse {
        self.template(category).render(now)
    }
}

impl Default for TemplateTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// A rendered template, ready to be written to the client.
#[derive(Debug, Clone)]
pub struct RenderedResponse {
    pub content_type: Option<&'static str>,
    pub headers: Vec<(HeaderName, HeaderValue)>,
    pub body: Bytes,
}

impl IntoResponse for RenderedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = StatusCode::OK;

        let headers = response.headers_mut();
        if let Some(content_type) = self.content_type {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        }
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        for (name, value) in self.headers {
            headers.insert(name, value);
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_micro_opt(h, m, s, 250_000)
            .unwrap()
    }

    fn body_text(rendered: &RenderedResponse) -> &str {
        std::str::from_utf8(&rendered.body).unwrap()
    }

    #[test]
    fn test_iso_timestamp() {
        assert_eq!(iso_timestamp(at(9, 5, 3)), "2024-05-17T09:05:03.250000");
    }

    #[test]
    fn test_iso_timestamp_whole_second() {
        let whole = NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap();
        assert_eq!(iso_timestamp(whole), "2024-05-17T09:05:03");

        let tiny = NaiveDate::from_ymd_opt(2024, 5, 17)
            .unwrap()
            .and_hms_micro_opt(9, 5, 3, 7)
            .unwrap();
        assert_eq!(iso_timestamp(tiny), "2024-05-17T09:05:03.000007");
    }

    #[test]
    fn test_table_order_matches_categories() {
        let table = TemplateTable::standard();
        let now = at(12, 0, 0);
        assert_eq!(body_text(&table.render(Category::GameReadme, now)), "Ben10 Game Ready");
        assert_eq!(body_text(&table.render(Category::UnknownGet, now)), "OK");
        assert_eq!(
            table.template(Category::HeadAck).content_type(),
            Some(TEXT_HTML)
        );
        assert_eq!(table.template(Category::CorsPreflight).content_type(), None);
    }

    #[test]
    fn test_file_list_has_two_entries() {
        let rendered = TemplateTable::standard().render(Category::FileList, at(0, 0, 0));
        let xml = body_text(&rendered);
        assert_eq!(rendered.content_type, Some(APPLICATION_XML));
        assert_eq!(xml.matches("<file>").count(), 2);
        assert!(xml.contains("<name>ben10game.exe</name>"));
        assert!(xml.contains("<name>readme.txt</name>"));
        assert!(xml.contains("<md5>1234abcd5678ef90</md5>"));
    }

    #[test]
    fn test_update_check() {
        let rendered = TemplateTable::standard().render(Category::UpdateCheck, at(0, 0, 0));
        let xml = body_text(&rendered);
        assert!(xml.contains("<status>no_update</status>"));
        assert!(xml.contains("<version>1.0.0</version>"));
    }

    #[test]
    fn test_server_status_differs_only_in_timestamp() {
        let table = TemplateTable::standard();
        let first: serde_json::Value =
            serde_json::from_slice(&table.render(Category::ServerStatus, at(10, 0, 0)).body).unwrap();
        let second: serde_json::Value =
            serde_json::from_slice(&table.render(Category::ServerStatus, at(10, 0, 1)).body).unwrap();

        assert_eq!(first["status"], "online");
        assert_eq!(first["server"], SERVER_NAME);
        assert_eq!(first["status"], second["status"]);
        assert_eq!(first["server"], second["server"]);
        assert_eq!(first["timestamp"], "2024-05-17T10:00:00.250000");
        assert_ne!(first["timestamp"], second["timestamp"]);
    }

    #[test]
    fn test_auth_document() {
        let rendered = TemplateTable::standard().render(Category::AuthRequest, at(8, 30, 0));
        let xml = body_text(&rendered);
        assert!(xml.contains("<auth>true</auth>"));
        assert!(xml.contains("<user>ben10player</user>"));
        assert!(xml.contains("<code_verified>true</code_verified>"));
        assert!(xml.contains("<game_access>granted</game_access>"));
        assert!(xml.contains("<session_id>ben10_session_123</session_id>"));
        assert!(xml.contains("<server_time>2024-05-17T08:30:00.250000</server_time>"));
        assert!(rendered
            .headers
            .iter()
            .any(|(name, value)| *name == header::CACHE_CONTROL && value == "no-cache"));
    }

    #[test]
    fn test_game_data_shape() {
        let rendered = TemplateTable::standard().render(Category::GameData, at(0, 0, 0));
        let json: serde_json::Value = serde_json::from_slice(&rendered.body).unwrap();
        assert_eq!(json["status"], "success");
        assert_eq!(json["player_data"]["level"], 1);
        assert_eq!(json["player_data"]["score"], 0);
        assert_eq!(json["player_data"]["unlocked_levels"], serde_json::json!([1]));
    }

    #[test]
    fn test_into_response_headers() {
        let response = TemplateTable::standard()
            .render(Category::CorsPreflight, at(0, 0, 0))
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "GET, POST, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
        assert!(headers.get(header::CONTENT_TYPE).is_none());
    }

    #[test]
    fn test_every_category_is_ok_with_cors_origin() {
        let table = TemplateTable::standard();
        for category in Category::ALL {
            let response = table.render(category, at(0, 0, 0)).into_response();
            assert_eq!(response.status(), StatusCode::OK, "{category}");
            assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        }
    }
}
