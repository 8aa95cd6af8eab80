//! Response categories and the request verbs the classifier understands.

use axum::http::Method;
use std::fmt;

/// The canned response a request is answered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// `GET */readme.txt`
    GameReadme,
    /// `GET */list.xml`
    FileList,
    /// `GET` anything mentioning "update"
    UpdateCheck,
    /// `GET /status` or `GET /ping`
    ServerStatus,
    UnknownGet,
    /// `POST /serverside/newCode.php`
    AuthRequest,
    /// `POST /serverside/*`
    ServersideGeneric,
    /// `POST` anything mentioning "data" or "gamedata"
    GameData,
    UnknownPost,
    HeadAck,
    CorsPreflight,
}

impl Category {
    pub const COUNT: usize = 11;

    /// All categories, in declaration order.
    pub const ALL: [Category; Category::COUNT] = [
        Category::GameReadme,
        Category::FileList,
        Category::UpdateCheck,
        Category::ServerStatus,
        Category::UnknownGet,
        Category::AuthRequest,
        Category::ServersideGeneric,
        Category::GameData,
        Category::UnknownPost,
        Category::HeadAck,
        Category::CorsPreflight,
    ];

    /// Stable snake_case name, used as a log field and metric label.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::GameReadme => "game_readme",
            Category::FileList => "file_list",
            Category::UpdateCheck => "update_check",
            Category::ServerStatus => "server_status",
            Category::UnknownGet => "unknown_get",
            Category::AuthRequest => "auth_request",
            Category::ServersideGeneric => "serverside_generic",
            Category::GameData => "game_data",
            Category::UnknownPost => "unknown_post",
            Category::HeadAck => "head_ack",
            Category::CorsPreflight => "cors_preflight",
        }
    }

    /// Human readable line logged when the category is chosen.
    pub fn description(self) -> &'static str {
        match self {
            Category::GameReadme => "readme.txt requested",
            Category::FileList => "list.xml requested",
            Category::UpdateCheck => "Update check",
            Category::ServerStatus => "Server status check",
            Category::UnknownGet => "Unknown GET request",
            Category::AuthRequest => "Authentication request",
            Category::ServersideGeneric => "Serverside file requested",
            Category::GameData => "Game data request",
            Category::UnknownPost => "Unknown POST request",
            Category::HeadAck => "HEAD request",
            Category::CorsPreflight => "CORS preflight",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request methods the mock answers. Anything else never reaches the
/// classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    Get,
    Post,
    Head,
    Options,
}

impl Verb {
    /// Map an HTTP method, returning `None` for methods the mock does not serve.
    pub fn from_method(method: &Method) -> Option<Self> {
        match *method {
            Method::GET => Some(Verb::Get),
            Method::POST => Some(Verb::Post),
            Method::HEAD => Some(Verb::Head),
            Method::OPTIONS => Some(Verb::Options),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Get => "GET",
            Verb::Post => "POST",
            Verb::Head => "HEAD",
            Verb::Options => "OPTIONS",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
