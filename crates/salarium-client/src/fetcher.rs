use std::time::Duration;

use reqwest::Client;
use salarium_core::error::AppError;
use salarium_core::source::{SearchQuery, SourceDescriptor};
use salarium_core::traits::{PageFetcher, VacancyPage};
use serde::de::DeserializeOwned;

/// Header SuperJob reads the application key from.
pub const SUPERJOB_API_KEY_HEADER: &str = "X-Api-App-Id";

pub(crate) const USER_AGENT: &str = "Salarium/0.1 (vacancy statistics)";

/// HTTP page fetcher using reqwest.
///
/// One implementation covers both providers: the descriptor carries the
/// endpoint and pagination parameter names, the query carries everything
/// else, and the response deserializes into the caller's page type.
#[derive(Clone)]
pub struct HttpPageFetcher {
    client: Client,
    descriptor: SourceDescriptor,
    api_key: Option<String>,
    timeout_secs: u64,
}

impl HttpPageFetcher {
    pub fn new(descriptor: SourceDescriptor) -> Result<Self, AppError> {
        Self::with_timeout(descriptor, Duration::from_secs(30))
    }

    pub fn with_timeout(descriptor: SourceDescriptor, timeout: Duration) -> Result<Self, AppError> {
        let timeout_secs = timeout.as_secs();
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            descriptor,
            api_key: None,
            timeout_secs,
        })
    }

    /// Send this application key with every request.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    fn build_request(&self, query: &SearchQuery, page: u64, per_page: u64) -> reqwest::RequestBuilder {
        let mut request = self
            .client
            .get(self.descriptor.endpoint)
            .query(&query.filters)
            .query(&[
                (self.descriptor.page_param, page.to_string()),
                (self.descriptor.per_page_param, per_page.to_string()),
            ]);

        if let Some(key) = &self.api_key {
            request = request.header(SUPERJOB_API_KEY_HEADER, key);
        }

        request
    }
}

impl<P> PageFetcher<P> for HttpPageFetcher
where
    P: VacancyPage + DeserializeOwned,
{
    async fn fetch_page(
        &self,
        query: &SearchQuery,
        page: u64,
        per_page: u64,
    ) -> Result<P, AppError> {
        let response = self
            .build_request(query, page, per_page)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout(self.timeout_secs)
                } else if e.is_connect() {
                    AppError::NetworkError(format!("Connection failed: {e}"))
                } else {
                    AppError::HttpError(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let url = response.url().to_string();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::StatusError {
                status_code: status.as_u16(),
                url,
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::HttpError(e.to_string()))?;
        Ok(serde_json::from_str(&body)?)
    }
}
