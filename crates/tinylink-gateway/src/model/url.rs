use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use tinylink_core::ShortLink;
use url::Url;

use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    pub original_url: Option<String>,
}

impl CreateUrlRequest {
    /// Returns the submitted URL, unchanged, if it is an absolute http(s) URL.
    ///
    /// The string is checked by parsing it, but the parsed form is thrown
    /// away: links store and redirect to exactly what the client sent.
    pub fn into_validated(self) -> Result<String, AppError> {
        let Some(raw) = self.original_url else {
            return Err(AppError::BadRequest("originalUrl is required".to_string()));
        };

        if raw.is_empty() {
            return Err(AppError::BadRequest("originalUrl must not be empty".to_string()));
        }

        // The url parser silently strips these, which would make the stored
        // value differ from the one that was validated.
        if raw.trim() != raw || raw.chars().any(char::is_control) {
            return Err(AppError::BadRequest(
                "originalUrl must not contain whitespace padding or control characters"
                    .to_string(),
            ));
        }

        // http and https are special schemes, so a successful parse already
        // guarantees a non-empty host.
        let parsed = Url::parse(&raw)
            .map_err(|e| AppError::BadRequest(format!("originalUrl must be a URL: {e}")))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::BadRequest(format!(
                "originalUrl scheme must be http or https, got '{}'",
                parsed.scheme()
            )));
        }

        // The parser also accepts forms like `http:example.com` or
        // `https:/\host`, which a client following the redirect would
        // resolve against our own origin. Require the authority as written.
        let authority_prefix = format!("{}://", parsed.scheme());
        let written_prefix = raw.get(..authority_prefix.len()).unwrap_or_default();
        if !written_prefix.eq_ignore_ascii_case(&authority_prefix) || raw.contains('\\') {
            return Err(AppError::BadRequest(
                "originalUrl must be an absolute URL of the form scheme://host".to_string(),
            ));
        }

        Ok(raw)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLinkResponse {
    pub id: u64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: Timestamp,
}

impl From<ShortLink> for ShortLinkResponse {
    fn from(link: ShortLink) -> Self {
        Self {
            id: link.id,
            original_url: link.original_url,
            short_code: link.short_code.into(),
            created_at: link.created_at,
        }
    }
}
