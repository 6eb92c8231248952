//! Multi-candidate location search
//!
//! Queries the provider's text-search endpoint once per candidate, in order,
//! merging results by provider ID until enough have been collected.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::models::SearchResult;
use crate::{Result, ThoiTietError};

/// Number of results a search collects unless configured otherwise
pub const DEFAULT_TARGET_COUNT: usize = 10;

/// Free-text location search against an external provider
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search for places matching `query`.
    ///
    /// # Errors
    /// Transport failures, timeouts, non-success statuses and malformed bodies.
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>>;
}

/// A candidate whose provider query failed
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFailure {
    pub candidate: String,
    pub error: ThoiTietError,
}

/// Result of dispatching a candidate list
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchOutcome {
    /// Unique results in first-seen order, at most the target count
    pub results: Vec<SearchResult>,
    /// Candidates that failed and were skipped
    pub failures: Vec<CandidateFailure>,
    /// Number of provider queries issued
    pub queries_issued: usize,
}

impl SearchOutcome {
    /// True if some candidates failed but results were still returned
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Issues candidate queries sequentially and stops once the target is reached
#[derive(Clone)]
pub struct QueryDispatcher {
    provider: Arc<dyn SearchProvider>,
    target_count: usize,
}

impl QueryDispatcher {
    #[must_use]
    pub fn new(provider: Arc<dyn SearchProvider>) -> Self {
        Self {
            provider,
            target_count: DEFAULT_TARGET_COUNT,
        }
    }

    /// Collect up to `target_count` results (at least one).
    #[must_use]
    pub fn with_target_count(mut self, target_count: usize) -> Self {
        self.target_count = target_count.max(1);
        self
    }

    #[must_use]
    pub fn target_count(&self) -> usize {
        self.target_count
    }

    /// Query each candidate in order and merge unique results.
    ///
    /// A failing candidate is skipped. Earlier candidates win on ID
    /// collisions. No further candidate is queried once the target count is
    /// reached.
    ///
    /// # Errors
    /// - [`ThoiTietError::EmptyQuery`] if there is no non-empty candidate
    /// - the aggregate provider failure if candidates failed and nothing was
    ///   collected
    pub async fn dispatch(&self, candidates: &[String]) -> Result<SearchOutcome> {
        let candidates: Vec<&str> = candidates
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();
        if candidates.is_empty() {
            return Err(ThoiTietError::EmptyQuery);
        }

        let mut seen = HashSet::new();
        let mut outcome = SearchOutcome::default();

        for candidate in candidates {
            debug!("Searching with candidate '{}'", candidate);
            outcome.queries_issued += 1;

            match self.provider.search(candidate).await {
                Ok(batch) => {
                    let before = outcome.results.len();
                    outcome
                        .results
                        .extend(batch.into_iter().filter(|r| seen.insert(r.id)));
                    debug!(
                        "Candidate '{}' added {} new results ({} total)",
                        candidate,
                        outcome.results.len() - before,
                        outcome.results.len()
                    );
                }
                Err(error) => {
                    warn!("Search candidate '{}' failed: {}", candidate, error);
                    outcome.failures.push(CandidateFailure {
                        candidate: candidate.to_string(),
                        error,
                    });
                }
            }

            if outcome.results.len() >= self.target_count {
                debug!("Target of {} results reached, stopping", self.target_count);
                break;
            }
        }

        outcome.results.truncate(self.target_count);

        if outcome.results.is_empty() && !outcome.failures.is_empty() {
            return Err(aggregate_failure(&outcome.failures));
        }

        info!(
            "Search collected {} results from {} queries ({} failed)",
            outcome.results.len(),
            outcome.queries_issued,
            outcome.failures.len()
        );
        Ok(outcome)
    }
}

/// Single error for a dispatch where every attempted query came back empty-handed.
///
/// A rejected API key is surfaced as-is, and all-timeouts stays a timeout.
fn aggregate_failure(failures: &[CandidateFailure]) -> ThoiTietError {
    if let Some(key_error) = failures
        .iter()
        .find(|f| matches!(f.error, ThoiTietError::ApiKey { .. }))
    {
        return key_error.error.clone();
    }

    let summary = failures
        .iter()
        .map(|f| format!("'{}': {}", f.candidate, f.error))
        .collect::<Vec<_>>()
        .join("; ");

    if failures
        .iter()
        .all(|f| matches!(f.error, ThoiTietError::UpstreamTimeout { .. }))
    {
        ThoiTietError::timeout(summary)
    } else {
        ThoiTietError::upstream(format!(
            "all {} search queries failed: {}",
            failures.len(),
            summary
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn place(id: u64, name: &str) -> SearchResult {
        SearchResult {
            id,
            name: name.to_string(),
            region: String::new(),
            country: "Vietnam".to_string(),
            lat: 0.0,
            lon: 0.0,
            url: None,
        }
    }

    #[derive(Default)]
    struct ScriptedProvider {
        responses: HashMap<String, Result<Vec<SearchResult>>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedProvider {
        fn with(mut self, query: &str, response: Result<Vec<SearchResult>>) -> Self {
            self.responses.insert(query.to_string(), response);
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SearchProvider for ScriptedProvider {
        async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
            self.calls.lock().unwrap().push(query.to_string());
            self.responses
                .get(query)
                .cloned()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn candidates(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[tokio::test]
    async fn test_stops_once_target_reached() {
        let provider = Arc::new(
            ScriptedProvider::default()
                .with("hanoi", Ok(vec![place(1, "Hanoi"), place(2, "Ha Dong"), place(3, "Soc Son")]))
                .with("ha noi", Ok(vec![place(2, "Ha Dong"), place(4, "Gia Lam")])),
        );
        let dispatcher = QueryDispatcher::new(provider.clone()).with_target_count(3);

        let outcome = dispatcher
            .dispatch(&candidates(&["hanoi", "ha noi", "Hà Nội"]))
            .await
            .unwrap();

        let ids: Vec<u64> = outcome.results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(provider.calls(), vec!["hanoi"]);
        assert_eq!(outcome.queries_issued, 1);
    }

    #[tokio::test]
    async fn test_first_seen_wins_and_order_preserved() {
        let provider = Arc::new(
            ScriptedProvider::default()
                .with("hanoi", Ok(vec![place(1, "Hanoi"), place(2, "Ha Dong")]))
                .with("ha noi", Ok(vec![place(2, "Ha Dong (duplicate)"), place(5, "Dong Anh")])),
        );
        let dispatcher = QueryDispatcher::new(provider.clone());

        let outcome = dispatcher
            .dispatch(&candidates(&["hanoi", "ha noi", "Hà Nội"]))
            .await
            .unwrap();

        let names: Vec<&str> = outcome.results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Hanoi", "Ha Dong", "Dong Anh"]);
        assert_eq!(provider.calls(), vec!["hanoi", "ha noi", "Hà Nội"]);
    }

    #[tokio::test]
    async fn test_truncates_to_target() {
        let batch = (1..=8).map(|id| place(id, "x")).collect();
        let provider = Arc::new(ScriptedProvider::default().with("saigon", Ok(batch)));
        let dispatcher = QueryDispatcher::new(provider).with_target_count(5);

        let outcome = dispatcher.dispatch(&candidates(&["saigon"])).await.unwrap();

        let ids: Vec<u64> = outcome.results.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[tokio::test]
    async fn test_failed_candidate_is_skipped() {
        let provider = Arc::new(
            ScriptedProvider::default()
                .with("hanoi", Err(ThoiTietError::upstream("503 Service Unavailable")))
                .with("ha noi", Ok(vec![place(1, "Hanoi")])),
        );
        let dispatcher = QueryDispatcher::new(provider.clone());

        let outcome = dispatcher
            .dispatch(&candidates(&["hanoi", "ha noi"]))
            .await
            .unwrap();

        assert_eq!(outcome.results.len(), 1);
        assert!(outcome.is_degraded());
        assert_eq!(outcome.failures[0].candidate, "hanoi");
        assert_eq!(provider.calls(), vec!["hanoi", "ha noi"]);
    }

    #[tokio::test]
    async fn test_partial_results_survive_later_failure() {
        let provider = Arc::new(
            ScriptedProvider::default()
                .with("hanoi", Ok(vec![place(1, "Hanoi")]))
                .with("ha noi", Err(ThoiTietError::timeout("10s elapsed"))),
        );
        let dispatcher = QueryDispatcher::new(provider);

        let outcome = dispatcher
            .dispatch(&candidates(&["hanoi", "ha noi"]))
            .await
            .unwrap();

        assert_eq!(outcome.results, vec![place(1, "Hanoi")]);
        assert_eq!(outcome.failures.len(), 1);
    }

    #[tokio::test]
    async fn test_all_failures_are_aggregated() {
        let provider = Arc::new(
            ScriptedProvider::default()
                .with("hanoi", Err(ThoiTietError::upstream("502")))
                .with("ha noi", Err(ThoiTietError::timeout("10s"))),
        );
        let dispatcher = QueryDispatcher::new(provider);

        let error = dispatcher
            .dispatch(&candidates(&["hanoi", "ha noi"]))
            .await
            .unwrap_err();

        assert!(matches!(error, ThoiTietError::UpstreamUnavailable { .. }));
        assert!(error.to_string().contains("'hanoi'"));
        assert!(error.to_string().contains("'ha noi'"));
    }

    #[tokio::test]
    async fn test_all_timeouts_stay_timeout() {
        let provider = Arc::new(
            ScriptedProvider::default().with("hue", Err(ThoiTietError::timeout("10s"))),
        );
        let error = QueryDispatcher::new(provider)
            .dispatch(&candidates(&["hue"]))
            .await
            .unwrap_err();

        assert!(matches!(error, ThoiTietError::UpstreamTimeout { .. }));
    }

    #[tokio::test]
    async fn test_api_key_error_is_not_masked() {
        let provider = Arc::new(
            ScriptedProvider::default()
                .with("hanoi", Err(ThoiTietError::upstream("502")))
                .with("ha noi", Err(ThoiTietError::api_key("401 Unauthorized"))),
        );
        let error = QueryDispatcher::new(provider)
            .dispatch(&candidates(&["hanoi", "ha noi"]))
            .await
            .unwrap_err();

        assert_eq!(error, ThoiTietError::api_key("401 Unauthorized"));
    }

    #[tokio::test]
    async fn test_no_results_without_failures_is_empty_success() {
        let provider = Arc::new(ScriptedProvider::default());
        let outcome = QueryDispatcher::new(provider)
            .dispatch(&candidates(&["atlantis", "Atlantis"]))
            .await
            .unwrap();

        assert!(outcome.results.is_empty());
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.queries_issued, 2);
    }

    #[tokio::test]
    async fn test_empty_candidates_never_reach_provider() {
        let provider = Arc::new(ScriptedProvider::default());
        let dispatcher = QueryDispatcher::new(provider.clone());

        let error = dispatcher
            .dispatch(&candidates(&["", "   "]))
            .await
            .unwrap_err();

        assert_eq!(error, ThoiTietError::EmptyQuery);
        assert!(provider.calls().is_empty());
    }

    #[test]
    fn test_zero_target_is_clamped() {
        let provider = Arc::new(ScriptedProvider::default());
        let dispatcher = QueryDispatcher::new(provider).with_target_count(0);
        assert_eq!(dispatcher.target_count(), 1);
    }
}
