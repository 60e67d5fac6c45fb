//! HTTP client for the user service

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{BookingError, BookingResult, IdentityCheck, IdentityVerifier};

/// Identity verification against `GET {base}/users/{id}/verify`.
pub struct HttpIdentityClient {
    client: Client,
    base_url: String,
}

impl HttpIdentityClient {
    pub fn new(base_url: &str, timeout: Duration) -> BookingResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BookingError::Internal(format!("identity client init: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    is_valid: bool,
    #[serde(default)]
    role: String,
}

fn transport_error(e: reqwest::Error) -> BookingError {
    BookingError::UpstreamUnavailable {
        service: "user-service",
        reason: e.to_string(),
    }
}

#[async_trait]
impl IdentityVerifier for HttpIdentityClient {
    async fn verify_requester(&self, user_id: &str) -> BookingResult<IdentityCheck> {
        let url = format!("{}/users/{}/verify", self.base_url, user_id);
        debug!(url = %url, "Verifying requester");

        let response = self.client.get(&url).send().await.map_err(transport_error)?;

        match response.status() {
            s if s.is_success() => {
                let body: VerifyResponse = response.json().await.map_err(transport_error)?;
                Ok(IdentityCheck {
                    is_valid: body.is_valid,
                    role: body.role,
                })
            }
            // The user service answers 404 for unknown users and 403 for
            // users without a valid driving credential
            StatusCode::NOT_FOUND | StatusCode::FORBIDDEN => {
                Err(BookingError::RequesterIneligible {
                    user_id: user_id.to_string(),
                    reason: "user service rejected the requester".to_string(),
                })
            }
            s => Err(BookingError::UpstreamUnavailable {
                service: "user-service",
                reason: format!("HTTP {s}"),
            }),
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let c = HttpIdentityClient::new("http://users.internal/", Duration::from_secs(5)).unwrap();
        assert_eq!(c.base_url, "http://users.internal");
    }

    #[test]
    fn verify_response_tolerates_missing_role() {
        let body: VerifyResponse = serde_json::from_str(r#"{"is_valid": true}"#).unwrap();
        assert!(body.is_valid);
        assert_eq!(body.role, "");

        let body: VerifyResponse =
            serde_json::from_str(r#"{"is_valid": false, "role": "customer"}"#).unwrap();
        assert!(!body.is_valid);
        assert_eq!(body.role, "customer");
    }
}
