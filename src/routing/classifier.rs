//! Request classification.
//!
//! Each verb owns an ordered list of `(matcher, category)` rules. The first
//! rule whose matcher accepts the path wins, and every list ends with a
//! catch-all, so classification never fails.
//!
//! Order is load-bearing: `/update/list.xml` satisfies both the file-list
//! and the update rule and must resolve to the file list.

use crate::routing::category::{Category, Verb};
use crate::routing::matcher::{
    AlwaysMatcher, AnyMatcher, ContainsMatcher, ExactMatcher, Matcher, PrefixMatcher,
    SuffixMatcher,
};

/// Path that carries the login form.
pub const AUTH_PATH: &str = "/serverside/newCode.php";

/// A single classification rule.
#[derive(Debug)]
pub struct Rule {
    matcher: Box<dyn Matcher>,
    category: Category,
}

impl Rule {
    pub fn new(matcher: impl Matcher + 'static, category: Category) -> Self {
        Self {
            matcher: Box::new(matcher),
            category,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }
}

/// Immutable rule table, built once at startup.
#[derive(Debug)]
pub struct Classifier {
    get: Vec<Rule>,
    post: Vec<Rule>,
}

impl Classifier {
    /// Build a classifier from explicit rule lists.
    ///
    /// A catch-all is appended to each list, so callers only list the
    /// specific rules.
    pub fn new(mut get: Vec<Rule>, mut post: Vec<Rule>) -> Self {
        get.push(Rule::new(AlwaysMatcher, Category::UnknownGet));
        post.push(Rule::new(AlwaysMatcher, Category::UnknownPost));
        Self { get, post }
    }

    /// The rule set of the legacy game backend.
    pub fn standard() -> Self {
        let get = vec![
            Rule::new(SuffixMatcher::new("/readme.txt"), Category::GameReadme),
            Rule::new(SuffixMatcher::new("/list.xml"), Category::FileList),
            Rule::new(
                AnyMatcher::new(vec![
                    Box::new(PrefixMatcher::new("/update")),
                    Box::new(ContainsMatcher::ignore_case("update")),
                ]),
                Category::UpdateCheck,
            ),
            Rule::new(ExactMatcher::one_of(["/status", "/ping"]), Category::ServerStatus),
        ];

        let post = vec![
            Rule::new(ExactMatcher::new(AUTH_PATH), Category::AuthRequest),
            Rule::new(PrefixMatcher::new("/serverside/"), Category::ServersideGeneric),
            Rule::new(
                AnyMatcher::new(vec![
                    Box::new(ContainsMatcher::ignore_case("gamedata")),
                    Box::new(ContainsMatcher::new("data")),
                ]),
                Category::GameData,
            ),
        ];

        Self::new(get, post)
    }

    /// Classify a request by verb and raw request target.
    ///
    /// The query component is ignored for matching.
    pub fn classify(&self, verb: Verb, target: &str) -> Category {
        let path = strip_query(target);
        match verb {
            Verb::Get => first_match(&self.get, path, Category::UnknownGet),
            Verb::Post => first_match(&self.post, path, Category::UnknownPost),
            Verb::Head => Category::HeadAck,
            Verb::Options => Category::CorsPreflight,
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::standard()
    }
}

fn first_match(rules: &[Rule], path: &str, fallback: Category) -> Category {
    rules
        .iter()
        .find(|rule| rule.matcher.matches(path))
        .map(Rule::category)
        .unwrap_or(fallback)
}

/// Path part of a request target: everything before the first `?`.
pub fn strip_query(target: &str) -> &str {
    target.split_once('?').map_or(target, |(path, _)| path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get(path: &str) -> Category {
        Classifier::standard().classify(Verb::Get, path)
    }

    fn post(path: &str) -> Category {
        Classifier::standard().classify(Verb::Post, path)
    }

    #[test]
    fn test_readme_any_prefix() {
        assert_eq!(get("/readme.txt"), Category::GameReadme);
        assert_eq!(get("/ben10/files/readme.txt"), Category::GameReadme);
        assert_eq!(get("/update/readme.txt"), Category::GameReadme);
    }

    #[test]
    fn test_list_xml_beats_update() {
        assert_eq!(get("/list.xml"), Category::FileList);
        assert_eq!(get("/update/list.xml"), Category::FileList);
    }

    #[test]
    fn test_update_anywhere_case_insensitive() {
        assert_eq!(get("/update"), Category::UpdateCheck);
        assert_eq!(get("/updates.xml"), Category::UpdateCheck);
        assert_eq!(get("/game/CheckUPDATE.php"), Category::UpdateCheck);
        assert_eq!(get("/status/update"), Category::UpdateCheck);
    }

    #[test]
    fn test_status_and_ping_exact() {
        assert_eq!(get("/status"), Category::ServerStatus);
        assert_eq!(get("/ping"), Category::ServerStatus);
        assert_eq!(get("/status/"), Category::UnknownGet);
        assert_eq!(get("/api/ping"), Category::UnknownGet);
    }

    #[test]
    fn test_query_is_ignored() {
        assert_eq!(get("/status?t=123"), Category::ServerStatus);
        assert_eq!(get("/files/readme.txt?v=2"), Category::GameReadme);
        // "update" only in the query string does not count
        assert_eq!(get("/index.html?mode=update"), Category::UnknownGet);
        assert_eq!(post("/serverside/newCode.php?lang=en"), Category::AuthRequest);
    }

    #[test]
    fn test_unknown_get() {
        assert_eq!(get("/"), Category::UnknownGet);
        assert_eq!(get("/crossdomain.xml"), Category::UnknownGet);
        assert_eq!(get(""), Category::UnknownGet);
    }

    #[test]
    fn test_post_precedence() {
        assert_eq!(post(AUTH_PATH), Category::AuthRequest);
        assert_eq!(post("/serverside/newcode.php"), Category::ServersideGeneric);
        assert_eq!(post("/serverside/data.php"), Category::ServersideGeneric);
        assert_eq!(post("/serverside/"), Category::ServersideGeneric);
        assert_eq!(post("/serverside"), Category::UnknownPost);
    }

    #[test]
    fn test_post_game_data() {
        assert_eq!(post("/foo/data/bar"), Category::GameData);
        assert_eq!(post("/save/GameData"), Category::GameData);
        assert_eq!(post("/save/GAMEDATA"), Category::GameData);
        // "data" alone is case-sensitive
        assert_eq!(post("/save/DATA"), Category::UnknownPost);
        assert_eq!(post("/score/submit"), Category::UnknownPost);
    }

    #[test]
    fn test_head_and_options_ignore_path() {
        let classifier = Classifier::standard();
        for path in ["/", "/readme.txt", AUTH_PATH, "/status?x=1"] {
            assert_eq!(classifier.classify(Verb::Head, path), Category::HeadAck);
            assert_eq!(classifier.classify(Verb::Options, path), Category::CorsPreflight);
        }
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = Classifier::standard();
        let first = classifier.classify(Verb::Get, "/update/list.xml");
        for _ in 0..10 {
            assert_eq!(classifier.classify(Verb::Get, "/update/list.xml"), first);
        }
    }

    #[test]
    fn test_custom_rules_get_catch_all() {
        let classifier = Classifier::new(Vec::new(), Vec::new());
        assert_eq!(classifier.classify(Verb::Get, "/status"), Category::UnknownGet);
        assert_eq!(classifier.classify(Verb::Post, AUTH_PATH), Category::UnknownPost);
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("/a?b=c?d"), "/a");
        assert_eq!(strip_query("/a"), "/a");
        assert_eq!(strip_query("?x"), "");
    }
}
