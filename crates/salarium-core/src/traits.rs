use std::future::Future;

use crate::error::AppError;
use crate::source::SearchQuery;

/// One page of vacancy search results, as a provider reports it.
///
/// Implementations are the per-provider wire models; the aggregation loop
/// only ever sees this view of them.
pub trait VacancyPage: Send {
    /// Total number of matches the provider claims for the whole search,
    /// not the number of listings on this page.
    fn found(&self) -> u64;

    /// Ruble salary estimate for each listing on this page, in page order.
    /// `None` marks listings priced in other currencies or not priced at all.
    fn estimates(&self) -> impl Iterator<Item = Option<f64>> + '_;
}

/// Fetches one page of search results for a query.
pub trait PageFetcher<P: VacancyPage>: Send + Sync + Clone {
    fn fetch_page(
        &self,
        query: &SearchQuery,
        page: u64,
        per_page: u64,
    ) -> impl Future<Output = Result<P, AppError>> + Send;
}
