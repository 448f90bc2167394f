//! Classification of provider failures.
//!
//! Maps HTTP statuses and transport errors onto [`ProviderError`] variants.
//! Classification is for reporting only; ingestion never retries.

use std::path::Path;

use crate::error::ProviderError;

/// Classify a non-success HTTP response.
///
/// 401/403 are credential problems, 429 is quota, 400 means the provider
/// refused the image, 5xx is a provider outage. Anything else is reported
/// as an unexpected response.
pub fn from_status(provider: &str, path: &Path, status: u16, body: &str) -> ProviderError {
    let message = format!("HTTP {status}: {}", truncate(body, 300));
    let provider = provider.to_string();
    match status {
        401 | 403 => ProviderError::Auth { provider, message },
        429 => ProviderError::Quota { provider, message },
        400 | 413 | 415 => ProviderError::MalformedImage {
            provider,
            path: path.to_path_buf(),
            message,
        },
        500..=599 => ProviderError::Unavailable {
            provider,
            status_code: status,
            message,
        },
        _ => ProviderError::Response { provider, message },
    }
}

/// Classify a transport-level failure from the HTTP client.
///
/// Timeouts are enforced by the caller, so a client-side timeout here is
/// just another network failure.
pub fn from_transport(provider: &str, path: &Path, error: &reqwest::Error) -> ProviderError {
    if let Some(status) = error.status() {
        return from_status(provider, path, status.as_u16(), &error.to_string());
    }
    ProviderError::Network {
        provider: provider.to_string(),
        message: error.to_string(),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(max_chars).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(status: u16) -> ProviderError {
        from_status("google-vision", Path::new("mug.jpg"), status, "details")
    }

    #[test]
    fn test_auth_statuses() {
        assert!(matches!(classify(401), ProviderError::Auth { .. }));
        assert!(matches!(classify(403), ProviderError::Auth { .. }));
    }

    #[test]
    fn test_rate_limit_is_quota() {
        assert!(matches!(classify(429), ProviderError::Quota { .. }));
    }

    #[test]
    fn test_bad_request_is_malformed_image() {
        match classify(400) {
            ProviderError::MalformedImage { path, message, .. } => {
                assert_eq!(path, Path::new("mug.jpg"));
                assert!(message.contains("HTTP 400"));
            }
            other => panic!("Expected MalformedImage, got {other:?}"),
        }
    }

    #[test]
    fn test_server_errors_are_unavailable() {
        match classify(503) {
            ProviderError::Unavailable { status_code, .. } => assert_eq!(status_code, 503),
            other => panic!("Expected Unavailable, got {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_status_is_response_error() {
        assert!(matches!(classify(418), ProviderError::Response { .. }));
    }

    #[test]
    fn test_long_bodies_are_truncated() {
        let body = "x".repeat(1000);
        let err = from_status("google-vision", Path::new("a.jpg"), 500, &body);
        assert!(err.to_string().len() < 500);
        assert!(err.to_string().ends_with("..."));
    }
}
