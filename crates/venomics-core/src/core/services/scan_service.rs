//! Sensitive-data scan over queries, cached results and dashboards.
//!
//! Matching is a case-insensitive substring test on raw text. Result payloads
//! are matched as returned by the server, so normalized or escaped values can
//! be missed and short targets can match inside longer strings.

use super::traits::ScanSource;
use crate::AppError;
use crate::api::models::{Dashboard, Query};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Queries,
    Dashboards,
}

impl ScanPhase {
    pub fn label(&self) -> &'static str {
        match self {
            ScanPhase::Queries => "Queries",
            ScanPhase::Dashboards => "Dashboards",
        }
    }
}

/// Called with `(phase, checked, total)` after each resource.
pub type ProgressCallback<'a> = &'a mut (dyn FnMut(ScanPhase, usize, usize) + Send);

/// Browser URLs of every matching resource.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScanReport {
    pub queries: Vec<String>,
    pub dashboards: Vec<String>,
}

impl ScanReport {
    pub fn is_empty(&self) -> bool {
        self.queries.is_empty() && self.dashboards.is_empty()
    }

    pub fn urls(&self) -> impl Iterator<Item = &String> {
        self.queries.iter().chain(self.dashboards.iter())
    }
}

pub struct SensitiveDataScanner<'a, S: ScanSource> {
    source: &'a S,
    targets: Vec<String>,
}

impl<'a, S: ScanSource> SensitiveDataScanner<'a, S> {
    /// Targets are lower-cased; empty targets are ignored.
    pub fn new<I, T>(source: &'a S, targets: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let targets = targets
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { source, targets }
    }

    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    pub fn matches(&self, text: &str) -> bool {
        let haystack = text.to_lowercase();
        self.targets.iter().any(|t| haystack.contains(t.as_str()))
    }

    fn matches_any<'t>(&self, mut texts: impl Iterator<Item = &'t str>) -> bool {
        texts.any(|text| self.matches(text))
    }

    /// Query text, name, description, tags, then the latest cached result.
    pub async fn check_query(&self, query: &Query) -> Result<bool, AppError> {
        let fields = [
            query.query_text.as_str(),
            query.name.as_str(),
            query.description.as_deref().unwrap_or_default(),
        ];
        if self.matches_any(fields.into_iter().chain(query.tags.iter().map(String::as_str))) {
            return Ok(true);
        }

        match query.latest_query_data_id {
            Some(result_id) => {
                let payload = self.source.query_result_text(result_id).await?;
                Ok(self.matches(&payload))
            }
            None => Ok(false),
        }
    }

    /// Slug, name, tags, then the text of widgets without a visualization.
    pub async fn check_dashboard(&self, dashboard: &Dashboard) -> Result<bool, AppError> {
        let fields = [dashboard.slug.as_str(), dashboard.name.as_str()];
        if self.matches_any(fields.into_iter().chain(dashboard.tags.iter().map(String::as_str))) {
            return Ok(true);
        }

        let detail = self.source.dashboard(&dashboard.slug).await?;
        Ok(self.matches_any(
            detail
                .widgets
                .iter()
                .filter(|w| w.is_text_only())
                .map(|w| w.text.as_str()),
        ))
    }

    pub async fn scan(&self, mut progress: Option<ProgressCallback<'_>>) -> Result<ScanReport, AppError> {
        let mut report = ScanReport::default();

        let queries = self.source.all_queries().await?;
        log::info!("Scanning {} queries", queries.len());
        for (index, query) in queries.iter().enumerate() {
            if self.check_query(query).await? {
                log::debug!("Match in query {}", query.id);
                report.queries.push(self.source.query_url(query.id));
            }
            if let Some(cb) = progress.as_deref_mut() {
                cb(ScanPhase::Queries, index + 1, queries.len());
            }
        }

        let dashboards = self.source.all_dashboards().await?;
        log::info!("Scanning {} dashboards", dashboards.len());
        for (index, dashboard) in dashboards.iter().enumerate() {
            if self.check_dashboard(dashboard).await? {
                log::debug!("Match in dashboard {}", dashboard.slug);
                report.dashboards.push(self.source.dashboard_url(&dashboard.slug));
            }
            if let Some(cb) = progress.as_deref_mut() {
                cb(ScanPhase::Dashboards, index + 1, dashboards.len());
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    // In-memory source for scanner tests
    #[derive(Default)]
    struct MockSource {
        queries: Vec<Query>,
        dashboards: Vec<Dashboard>,
        details: HashMap<String, Dashboard>,
        results: HashMap<u64, String>,
        result_fetches: Mutex<Vec<u64>>,
    }

    #[async_trait]
    impl ScanSource for MockSource {
        async fn all_queries(&self) -> Result<Vec<Query>, AppError> {
            Ok(self.queries.clone())
        }

        async fn all_dashboards(&self) -> Result<Vec<Dashboard>, AppError> {
            Ok(self.dashboards.clone())
        }

        async fn dashboard(&self, slug: &str) -> Result<Dashboard, AppError> {
            Ok(self
                .details
                .get(slug)
                .cloned()
                .unwrap_or_else(|| dashboard(slug, &[], json!([]))))
        }

        async fn query_result_text(&self, result_id: u64) -> Result<String, AppError> {
            self.result_fetches.lock().unwrap().push(result_id);
            Ok(self.results.get(&result_id).cloned().unwrap_or_default())
        }

        fn query_url(&self, query_id: u64) -> String {
            format!("https://bi.example.test/queries/{}", query_id)
        }

        fn dashboard_url(&self, slug: &str) -> String {
            format!("https://bi.example.test/dashboards/{}", slug)
        }
    }

    fn query(id: u64, text: &str, tags: &[&str], result_id: Option<u64>) -> Query {
        serde_json::from_value(json!({
            "id": id,
            "name": format!("Query {}", id),
            "description": null,
            "query": text,
            "tags": tags,
            "latest_query_data_id": result_id
        }))
        .unwrap()
    }

    fn dashboard(slug: &str, tags: &[&str], widgets: serde_json::Value) -> Dashboard {
        serde_json::from_value(json!({
            "id": 1,
            "slug": slug,
            "name": slug.to_uppercase(),
            "tags": tags,
            "widgets": widgets
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_tag_match_is_case_insensitive() {
        let source = MockSource {
            queries: vec![query(1, "select 1", &["A@X.COM"], None)],
            ..Default::default()
        };
        let scanner = SensitiveDataScanner::new(&source, ["a@x.com"]);

        let report = scanner.scan(None).await.unwrap();
        assert_eq!(report.queries, vec!["https://bi.example.test/queries/1"]);
    }

    #[tokio::test]
    async fn test_query_without_match_is_not_reported() {
        let mut results = HashMap::new();
        results.insert(10, r#"{"rows": [{"email": "b@y.com"}]}"#.to_string());
        let source = MockSource {
            queries: vec![query(2, "select * from users", &["pii"], Some(10))],
            results,
            ..Default::default()
        };
        let scanner = SensitiveDataScanner::new(&source, vec!["a@x.com".to_string()]);

        let report = scanner.scan(None).await.unwrap();
        assert!(report.is_empty());
        assert_eq!(*source.result_fetches.lock().unwrap(), vec![10]);
    }

    #[tokio::test]
    async fn test_cached_result_payload_is_matched_as_raw_text() {
        let mut results = HashMap::new();
        results.insert(10, r#"{"rows": [{"email": "A@x.com"}]}"#.to_string());
        let source = MockSource {
            queries: vec![query(3, "select email from users", &[], Some(10))],
            results,
            ..Default::default()
        };
        let scanner = SensitiveDataScanner::new(&source, ["a@x.com"]);

        assert!(scanner.check_query(&source.queries[0]).await.unwrap());
    }

    #[tokio::test]
    async fn test_field_match_skips_result_fetch() {
        let source = MockSource {
            queries: vec![query(4, "where email = 'a@x.com'", &[], Some(10))],
            ..Default::default()
        };
        let scanner = SensitiveDataScanner::new(&source, ["a@x.com"]);

        assert!(scanner.check_query(&source.queries[0]).await.unwrap());
        assert!(source.result_fetches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_text_widget_is_scanned() {
        let listed = dashboard("ops", &[], json!([]));
        let mut details = HashMap::new();
        details.insert(
            "ops".to_string(),
            dashboard(
                "ops",
                &[],
                json!([
                    {"text": "Owner: A@X.com", "options": {}},
                    {"text": "", "options": {}, "visualization": {"id": 3}}
                ]),
            ),
        );
        let source = MockSource {
            dashboards: vec![listed, dashboard("sales", &["quarterly"], json!([]))],
            details,
            ..Default::default()
        };
        let scanner = SensitiveDataScanner::new(&source, ["a@x.com"]);

        let report = scanner.scan(None).await.unwrap();
        assert_eq!(
            report.dashboards,
            vec!["https://bi.example.test/dashboards/ops"]
        );
    }

    #[tokio::test]
    async fn test_visualization_widget_text_is_ignored() {
        let mut details = HashMap::new();
        details.insert(
            "ops".to_string(),
            dashboard(
                "ops",
                &[],
                json!([{"text": "a@x.com", "options": {}, "visualization": {"id": 3}}]),
            ),
        );
        let source = MockSource {
            details,
            ..Default::default()
        };
        let scanner = SensitiveDataScanner::new(&source, ["a@x.com"]);

        let listed = dashboard("ops", &[], json!([]));
        assert!(!scanner.check_dashboard(&listed).await.unwrap());
    }

    #[tokio::test]
    async fn test_progress_reports_each_resource() {
        let source = MockSource {
            queries: vec![query(1, "", &[], None), query(2, "", &[], None)],
            dashboards: vec![dashboard("ops", &[], json!([]))],
            ..Default::default()
        };
        let scanner = SensitiveDataScanner::new(&source, ["a@x.com"]);

        let mut seen = Vec::new();
        let mut record = |phase: ScanPhase, done: usize, total: usize| seen.push((phase, done, total));
        scanner.scan(Some(&mut record)).await.unwrap();

        assert_eq!(
            seen,
            vec![
                (ScanPhase::Queries, 1, 2),
                (ScanPhase::Queries, 2, 2),
                (ScanPhase::Dashboards, 1, 1),
            ]
        );
    }

    #[test]
    fn test_empty_targets_are_dropped() {
        let source = MockSource::default();
        let scanner = SensitiveDataScanner::new(&source, ["", "  ", "Ada@Example.test"]);
        assert_eq!(scanner.targets(), ["ada@example.test".to_string()]);
        assert!(scanner.matches("contact ADA@example.TEST"));
        assert!(!scanner.matches("contact bob@example.test"));
    }
}
