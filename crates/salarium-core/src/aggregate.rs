use serde::Serialize;

use crate::error::AppError;
use crate::source::{SearchQuery, SourceDescriptor};
use crate::traits::{PageFetcher, VacancyPage};

/// Salary statistics for one search term against one provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermAggregate {
    pub term: String,
    /// Total matches the provider reported for the search.
    pub found: u64,
    /// Listings that yielded a ruble estimate.
    pub processed: u64,
    /// Floor of the mean estimate, `0` when nothing was processed.
    pub average_salary: u64,
}

/// Walks every reachable page for `query` and reduces the listings to a
/// [`TermAggregate`].
///
/// The first page is requested at the provider's maximum page size and
/// doubles as the match count; its listings are consumed by the same loop
/// that walks the remaining pages, so no page is fetched twice. The match
/// count is fixed by that first response and never revised mid-run, which
/// bounds the walk at `ceil(effective_cap / page_size)` requests.
pub async fn aggregate<P, F>(
    descriptor: &SourceDescriptor,
    query: &SearchQuery,
    fetcher: &F,
) -> Result<TermAggregate, AppError>
where
    P: VacancyPage,
    F: PageFetcher<P>,
{
    let mut per_page = descriptor.max_page_size;

    tracing::debug!(source = %descriptor.kind, term = %query.term, "requesting first page");
    let first = fetcher
        .fetch_page(query, descriptor.first_page, per_page)
        .await?;

    let found = first.found();
    let effective_cap = found.min(descriptor.result_cap);
    if effective_cap < per_page {
        per_page = effective_cap;
    }

    let mut prefetched = Some(first);
    let mut page = descriptor.first_page;
    let mut seen: u64 = 0;
    let mut processed: u64 = 0;
    let mut sum = 0.0_f64;

    while page * per_page < effective_cap {
        let current = match prefetched.take() {
            Some(ready) => ready,
            None => {
                tracing::debug!(source = %descriptor.kind, term = %query.term, page, "requesting page");
                fetcher.fetch_page(query, page, per_page).await?
            }
        };

        // Listings past the effective cap are never considered, even if a
        // page carries more entries than the match count admits.
        let remaining = (effective_cap - seen) as usize;
        for estimate in current.estimates().take(remaining) {
            seen += 1;
            if let Some(value) = estimate {
                processed += 1;
                sum += value;
            }
        }

        page += 1;
    }

    let average_salary = if processed > 0 {
        (sum / processed as f64).floor() as u64
    } else {
        0
    };

    tracing::debug!(
        source = %descriptor.kind,
        term = %query.term,
        found,
        processed,
        average_salary,
        "aggregation complete"
    );

    Ok(TermAggregate {
        term: query.term.clone(),
        found,
        processed,
        average_salary,
    })
}
