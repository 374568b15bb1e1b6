use serde::Deserialize;
use url::Url;

use crate::error::AppError;

/// Landing page a solved challenge sends the user back to.
pub const DEFAULT_BACKURL: &str = "https://hh.ru";

/// Error-entry discriminant providers use for verification challenges.
const CAPTCHA_REQUIRED: &str = "captcha_required";

/// A human-verification challenge extracted from a rejected request.
#[derive(Debug, Clone)]
pub struct CaptchaChallenge {
    pub challenge_url: Url,
    pub backurl: String,
}

impl CaptchaChallenge {
    /// Challenge URL with the return address attached, ready to open in a
    /// browser.
    pub fn action_url(&self) -> Url {
        let mut url = self.challenge_url.clone();
        url.query_pairs_mut().append_pair("backurl", &self.backurl);
        url
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Debug, Deserialize)]
struct ErrorEntry {
    value: Option<String>,
    captcha_url: Option<String>,
}

/// Splits a failed request into "needs a human" and everything else.
///
/// Returns a challenge when the response body carries a `captcha_required`
/// error entry with a parseable challenge URL; every other failure passes
/// through unchanged, including challenge entries whose URL is unusable.
pub fn classify(error: AppError) -> Result<CaptchaChallenge, AppError> {
    let AppError::StatusError { body, .. } = &error else {
        return Err(error);
    };

    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        return Err(error);
    };

    for entry in &parsed.errors {
        if entry.value.as_deref() != Some(CAPTCHA_REQUIRED) {
            continue;
        }
        if let Some(challenge_url) = entry.captcha_url.as_deref().and_then(|raw| Url::parse(raw).ok())
        {
            return Ok(CaptchaChallenge {
                challenge_url,
                backurl: DEFAULT_BACKURL.to_string(),
            });
        }
    }

    Err(error)
}
