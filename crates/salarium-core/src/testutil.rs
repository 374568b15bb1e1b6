//! Test utilities: mock implementations of the core traits.
//!
//! Handwritten mocks for dependency injection in unit tests. State sits
//! behind `Arc<Mutex<_>>` so cloned handles share one request log and
//! tests can assert on everything a run issued.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::AppError;
use crate::source::SearchQuery;
use crate::traits::{PageFetcher, VacancyPage};

// ---------------------------------------------------------------------------
// TestPage
// ---------------------------------------------------------------------------

/// Minimal result page: a match count plus one estimate slot per listing.
#[derive(Debug, Clone)]
pub struct TestPage {
    found: u64,
    estimates: Vec<Option<f64>>,
}

impl TestPage {
    pub fn new(found: u64, estimates: Vec<Option<f64>>) -> Self {
        Self { found, estimates }
    }
}

impl VacancyPage for TestPage {
    fn found(&self) -> u64 {
        self.found
    }

    fn estimates(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.estimates.iter().copied()
    }
}

// ---------------------------------------------------------------------------
// MockFetcher
// ---------------------------------------------------------------------------

/// One recorded `fetch_page` call.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub term: String,
    pub page: u64,
    pub per_page: u64,
}

/// Mock page fetcher with a scripted response queue per term.
///
/// Each call pops the front of the calling term's queue; an exhausted or
/// missing queue yields an empty zero-match page. An optional per-term
/// delay makes completion order controllable in runner tests.
#[derive(Clone, Default)]
pub struct MockFetcher {
    pages: Arc<Mutex<HashMap<String, VecDeque<Result<TestPage, AppError>>>>>,
    delays: Arc<Mutex<HashMap<String, Duration>>>,
    requests: Arc<Mutex<Vec<PageRequest>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next response for `term`.
    pub fn with_page(self, term: &str, page: Result<TestPage, AppError>) -> Self {
        self.pages
            .lock()
            .unwrap()
            .entry(term.to_string())
            .or_default()
            .push_back(page);
        self
    }

    /// Sleep this long before answering any request for `term`.
    pub fn with_delay(self, term: &str, delay: Duration) -> Self {
        self.delays.lock().unwrap().insert(term.to_string(), delay);
        self
    }

    /// Every request issued so far, in arrival order.
    pub fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl PageFetcher<TestPage> for MockFetcher {
    async fn fetch_page(
        &self,
        query: &SearchQuery,
        page: u64,
        per_page: u64,
    ) -> Result<TestPage, AppError> {
        self.requests.lock().unwrap().push(PageRequest {
            term: query.term.clone(),
            page,
            per_page,
        });

        let delay = self.delays.lock().unwrap().get(&query.term).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let next = self
            .pages
            .lock()
            .unwrap()
            .get_mut(&query.term)
            .and_then(|queue| queue.pop_front());

        match next {
            Some(result) => result,
            None => Ok(TestPage::new(0, vec![])),
        }
    }
}
