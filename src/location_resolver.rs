//! Location Resolution Module
//!
//! Turns a free-text city query into provider search results. Vietnamese
//! queries are expanded into several candidates by the normalizer; anything
//! else is searched once, verbatim.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::dispatcher::{QueryDispatcher, SearchOutcome, SearchProvider};
use crate::normalizer;
use crate::{Result, ThoiTietError};

/// Service for resolving city name queries
#[derive(Clone)]
pub struct CityNameResolver {
    dispatcher: QueryDispatcher,
}

impl CityNameResolver {
    #[must_use]
    pub fn new(provider: Arc<dyn SearchProvider>, max_results: usize) -> Self {
        Self {
            dispatcher: QueryDispatcher::new(provider).with_target_count(max_results),
        }
    }

    /// Search candidates for a query, in the order they will be tried.
    ///
    /// # Errors
    /// [`ThoiTietError::EmptyQuery`] for blank input.
    pub fn candidates_for(query: &str) -> Result<Vec<String>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(ThoiTietError::EmptyQuery);
        }

        if normalizer::is_vietnamese_query(trimmed) {
            let candidates = normalizer::generate_candidates(trimmed)?;
            debug!("Vietnamese query '{}' expanded to {:?}", trimmed, candidates);
            Ok(candidates)
        } else {
            Ok(vec![trimmed.to_string()])
        }
    }

    /// Resolve a query into unique search results.
    ///
    /// # Errors
    /// [`ThoiTietError::EmptyQuery`] for blank input, or the aggregate
    /// provider failure when every candidate failed.
    #[instrument(skip(self))]
    pub async fn resolve(&self, query: &str) -> Result<SearchOutcome> {
        let candidates = Self::candidates_for(query)?;
        let outcome = self.dispatcher.dispatch(&candidates).await?;

        info!(
            "Resolved '{}' to {} locations",
            query.trim(),
            outcome.results.len()
        );
        Ok(outcome)
    }
}
