use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::aggregate::{TermAggregate, aggregate};
use crate::captcha::{CaptchaChallenge, classify};
use crate::error::AppError;
use crate::source::{SearchQuery, SourceDescriptor};
use crate::traits::{PageFetcher, VacancyPage};

/// Limits for one batch run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// In-flight term limit against one provider. At least 1.
    pub concurrency: usize,
    /// Deadline for one term's full pagination walk, counted from the
    /// moment the term gets a slot.
    pub task_timeout: Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            concurrency: 4,
            task_timeout: Duration::from_secs(90),
        }
    }
}

impl RunnerConfig {
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_task_timeout(mut self, timeout: Duration) -> Self {
        self.task_timeout = timeout;
        self
    }
}

/// How one term's aggregation ended.
///
/// A batch never collapses because of one term: challenges and failures
/// stay attached to the term that hit them.
#[derive(Debug)]
pub enum TermOutcome {
    /// Full pagination walk finished.
    Complete(TermAggregate),
    /// Provider demanded human verification.
    Captcha(CaptchaChallenge),
    /// Transport, decode, or deadline failure.
    Failed(AppError),
    /// Shut down before the walk finished.
    Cancelled,
}

impl TermOutcome {
    pub fn as_aggregate(&self) -> Option<&TermAggregate> {
        match self {
            TermOutcome::Complete(aggregate) => Some(aggregate),
            _ => None,
        }
    }
}

/// Fans a batch of term queries out against one provider.
///
/// Generic over the page fetcher via traits, so batches run in tests
/// against scripted pages instead of real HTTP.
pub struct BatchRunner<F> {
    fetcher: F,
    descriptor: SourceDescriptor,
    config: RunnerConfig,
}

impl<F> BatchRunner<F> {
    pub fn new(fetcher: F, descriptor: SourceDescriptor) -> Self {
        Self {
            fetcher,
            descriptor,
            config: RunnerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    /// Aggregate every query concurrently and return one outcome per
    /// query, in input order.
    ///
    /// Each term waits for a semaphore slot, then runs its whole walk
    /// under the configured deadline. Cancellation is checked before the
    /// slot and ahead of every poll of the walk; terms that already
    /// finished keep their results.
    pub async fn run<P>(
        &self,
        queries: Vec<SearchQuery>,
        cancel: CancellationToken,
    ) -> Vec<TermOutcome>
    where
        P: VacancyPage + 'static,
        F: PageFetcher<P> + 'static,
    {
        // A zero limit would never let any term start.
        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let mut slots: Vec<Option<TermOutcome>> =
            (0..queries.len()).map(|_| None).collect();

        let mut tasks = JoinSet::new();
        for (index, query) in queries.into_iter().enumerate() {
            let fetcher = self.fetcher.clone();
            let descriptor = self.descriptor;
            let config = self.config.clone();
            let semaphore = Arc::clone(&semaphore);
            let cancel = cancel.clone();

            tasks.spawn(async move {
                let _permit = tokio::select! {
                    biased;
                    () = cancel.cancelled() => return (index, TermOutcome::Cancelled),
                    permit = semaphore.acquire_owned() => match permit {
                        Ok(permit) => permit,
                        Err(_) => return (index, TermOutcome::Cancelled),
                    },
                };

                let outcome = tokio::select! {
                    biased;
                    () = cancel.cancelled() => TermOutcome::Cancelled,
                    result = tokio::time::timeout(
                        config.task_timeout,
                        aggregate(&descriptor, &query, &fetcher),
                    ) => match result {
                        Ok(Ok(aggregate)) => TermOutcome::Complete(aggregate),
                        Ok(Err(error)) => match classify(error) {
                            Ok(challenge) => TermOutcome::Captcha(challenge),
                            Err(error) => TermOutcome::Failed(error),
                        },
                        Err(_) => {
                            TermOutcome::Failed(AppError::Timeout(config.task_timeout.as_secs()))
                        }
                    },
                };

                match &outcome {
                    TermOutcome::Complete(aggregate) => tracing::info!(
                        source = %descriptor.kind,
                        term = %aggregate.term,
                        found = aggregate.found,
                        processed = aggregate.processed,
                        average_salary = aggregate.average_salary,
                        "Term aggregated"
                    ),
                    TermOutcome::Captcha(challenge) => tracing::warn!(
                        source = %descriptor.kind,
                        term = %query.term,
                        url = %challenge.action_url(),
                        "Verification required"
                    ),
                    TermOutcome::Failed(error) => tracing::warn!(
                        source = %descriptor.kind,
                        term = %query.term,
                        %error,
                        "Term failed"
                    ),
                    TermOutcome::Cancelled => tracing::info!(
                        source = %descriptor.kind,
                        term = %query.term,
                        "Term cancelled"
                    ),
                }

                (index, outcome)
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(join_error) => {
                    tracing::error!(source = %self.descriptor.kind, error = %join_error, "Aggregation task aborted");
                }
            }
        }

        slots
            .into_iter()
            .map(|slot| slot.unwrap_or(TermOutcome::Cancelled))
            .collect()
    }
}
