//! Routes
//!
//! Path ↔ page mapping for history-based navigation.

use crate::api::{encode_component, with_query};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Login,
    Register,
    Home,
    Import,
    Data { database: Option<String> },
    FilteredData { database: Option<String> },
    GenerateCodebook,
    ViewCodebook { selected: Option<String> },
    ApplyCodebook,
    ViewCoding { selected: Option<String> },
    CompareCodebooks { codebook_a: Option<String> },
    Project { id: String },
    NotFound,
}

impl Route {
    /// Parse `location.pathname` plus `location.search`
    pub fn parse(path: &str, search: &str) -> Self {
        let param = |key: &str| query_param(search, key);
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Route::Landing,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/home" => Route::Home,
            "/import" => Route::Import,
            "/data" => Route::Data { database: param("database") },
            "/filtered-data" => Route::FilteredData { database: param("database") },
            "/codebook-generate" => Route::GenerateCodebook,
            "/codebook-view" => Route::ViewCodebook { selected: param("selected") },
            "/codebook-apply" => Route::ApplyCodebook,
            "/coding-view" => Route::ViewCoding { selected: param("selected") },
            "/codebook-compare" => Route::CompareCodebooks { codebook_a: param("a") },
            other => match other.strip_prefix("/project/") {
                Some(id) if !id.is_empty() && !id.contains('/') => Route::Project { id: decode(id) },
                _ => Route::NotFound,
            },
        }
    }

    /// Path with query, as pushed onto the history stack
    pub fn href(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Home => "/home".to_string(),
            Route::Import => "/import".to_string(),
            Route::Data { database } => optional_query("/data", "database", database),
            Route::FilteredData { database } => optional_query("/filtered-data", "database", database),
            Route::GenerateCodebook => "/codebook-generate".to_string(),
            Route::ViewCodebook { selected } => optional_query("/codebook-view", "selected", selected),
            Route::ApplyCodebook => "/codebook-apply".to_string(),
            Route::ViewCoding { selected } => optional_query("/coding-view", "selected", selected),
            Route::CompareCodebooks { codebook_a } => optional_query("/codebook-compare", "a", codebook_a),
            Route::Project { id } => format!("/project/{}", encode_component(id)),
            Route::NotFound => "/404".to_string(),
        }
    }

    /// The page this route renders, query parameters dropped. Routes with
    /// the same page share one mounted view.
    pub fn page(&self) -> Route {
        match self {
            Route::Data { .. } => Route::Data { database: None },
            Route::FilteredData { .. } => Route::FilteredData { database: None },
            Route::ViewCodebook { .. } => Route::ViewCodebook { selected: None },
            Route::ViewCoding { .. } => Route::ViewCoding { selected: None },
            Route::CompareCodebooks { .. } => Route::CompareCodebooks { codebook_a: None },
            other => other.clone(),
        }
    }

    /// Pages that sit behind the auth gate
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Landing | Route::Login | Route::Register | Route::NotFound)
    }
}

fn optional_query(path: &str, key: &str, value: &Option<String>) -> String {
    match value {
        Some(v) => with_query(path, key, v),
        None => path.to_string(),
    }
}

fn query_param(search: &str, key: &str) -> Option<String> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter_map(|pair| pair.split_once('=').or(Some((pair, ""))))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| decode(&v.replace('+', " ")))
        .filter(|v| !v.is_empty())
}

fn decode(value: &str) -> String {
    percent_encoding::percent_decode_str(value).decode_utf8_lossy().into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_static_paths() {
        assert_eq!(Route::parse("/", ""), Route::Landing);
        assert_eq!(Route::parse("", ""), Route::Landing);
        assert_eq!(Route::parse("/login/", ""), Route::Login);
        assert_eq!(Route::parse("/codebook-generate", ""), Route::GenerateCodebook);
        assert_eq!(Route::parse("/nope", ""), Route::NotFound);
    }

    #[test]
    fn test_parse_query_params() {
        assert_eq!(
            Route::parse("/codebook-view", "?selected=cb%201&x=2"),
            Route::ViewCodebook { selected: Some("cb 1".into()) }
        );
        assert_eq!(Route::parse("/codebook-view", "?selected="), Route::ViewCodebook { selected: None });
        assert_eq!(Route::parse("/data", "?database=proj_1"), Route::Data { database: Some("proj_1".into()) });
        assert_eq!(
            Route::parse("/filtered-data/", "?database=proj_f_2"),
            Route::FilteredData { database: Some("proj_f_2".into()) }
        );
        assert_eq!(Route::parse("/filtered-data", ""), Route::FilteredData { database: None });
    }

    #[test]
    fn test_parse_project() {
        assert_eq!(Route::parse("/project/12", ""), Route::Project { id: "12".into() });
        assert_eq!(Route::parse("/project/", ""), Route::NotFound);
        assert_eq!(Route::parse("/project/1/x", ""), Route::NotFound);
    }

    #[test]
    fn test_href_roundtrip() {
        let routes = vec![
            Route::Landing,
            Route::Home,
            Route::Data { database: Some("proj 1".into()) },
            Route::FilteredData { database: Some("proj_f 1".into()) },
            Route::ViewCodebook { selected: Some("a&b".into()) },
            Route::ViewCodebook { selected: None },
            Route::ViewCoding { selected: Some("report 1".into()) },
            Route::CompareCodebooks { codebook_a: Some("cb_1".into()) },
            Route::Project { id: "7".into() },
        ];
        for route in routes {
            let href = route.href();
            let (path, search) = href.split_once('?').map_or((href.as_str(), ""), |(p, q)| (p, q));
            assert_eq!(Route::parse(path, search), route, "href {}", href);
        }
    }

    #[test]
    fn test_protected_routes() {
        assert!(!Route::Landing.is_protected());
        assert!(!Route::Login.is_protected());
        assert!(Route::Home.is_protected());
        assert!(Route::Project { id: "1".into() }.is_protected());
    }

    #[test]
    fn test_page_ignores_query() {
        assert_eq!(
            Route::ViewCodebook { selected: Some("a".into()) }.page(),
            Route::ViewCodebook { selected: None }.page()
        );
        assert_eq!(Route::Data { database: Some("x".into()) }.page(), Route::Data { database: None });
        assert_ne!(Route::FilteredData { database: None }.page(), Route::Data { database: None }.page());
        assert_ne!(Route::Project { id: "1".into() }.page(), Route::Project { id: "2".into() }.page());
    }
}
