//! Shared HTTP response checks for the classifier client.

use crate::error::ClassifierError;

/// Map 429 to [`ClassifierError::RateLimited`] and any other non-success
/// status to [`ClassifierError::Api`]. Successful responses pass through.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClassifierError> {
    if resp.status() == 429 {
        let retry_after = parse_retry_after(&resp);
        return Err(ClassifierError::RateLimited {
            retry_after_secs: retry_after,
        });
    }
    if !resp.status().is_success() {
        return Err(ClassifierError::Api {
            status: resp.status().as_u16(),
            message: resp.text().await.unwrap_or_default(),
        });
    }
    Ok(resp)
}

/// `Retry-After` in seconds, defaulting to 60.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}

/// Distinguish timeouts from other transport failures.
pub fn transport_error(error: reqwest::Error) -> ClassifierError {
    if error.is_timeout() {
        ClassifierError::Timeout
    } else {
        ClassifierError::Http(error)
    }
}
