use std::time::Duration;

use reqwest::Client;
use salarium_core::error::AppError;
use serde::Deserialize;

use crate::fetcher::USER_AGENT;

/// HeadHunter region directory endpoint.
pub const AREAS_ENDPOINT: &str = "https://api.hh.ru/areas";

const AREAS_TIMEOUT_SECS: u64 = 30;

/// One node of the region directory tree.
#[derive(Debug, Clone, Deserialize)]
pub struct Area {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub areas: Vec<Area>,
}

/// Resolve a region name to HeadHunter's numeric id.
///
/// Downloads the directory once and scans two levels: countries, then
/// their immediate regions. English display names are requested so the
/// defaults do not depend on the API's locale.
pub async fn resolve_area_id(country: &str, area: &str) -> Result<Option<String>, AppError> {
    let client = Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(AREAS_TIMEOUT_SECS))
        .build()
        .map_err(|e| AppError::HttpError(e.to_string()))?;

    let response = client
        .get(AREAS_ENDPOINT)
        .query(&[("locale", "EN")])
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(AREAS_TIMEOUT_SECS)
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
    let countries: Vec<Area> = serde_json::from_str(&body)?;

    Ok(find_area(&countries, country, area))
}

/// Two-level scan of the directory: a country by name, then one of its
/// immediate regions by name.
pub fn find_area(countries: &[Area], country: &str, area: &str) -> Option<String> {
    countries
        .iter()
        .find(|candidate| candidate.name == country)?
        .areas
        .iter()
        .find(|candidate| candidate.name == area)
        .map(|found| found.id.clone())
}
