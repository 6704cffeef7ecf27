use crate::config::ProxyConfig;
use crate::error::{ProxyError, Result};
use crate::translate::address_types::{AddressInput, AddressValidationResponse};
use crate::translate::google_types::{ValidateAddressRequest, ValidateAddressResponse};
use crate::translate::request::address_to_google;
use crate::translate::response::{google_error_message, google_to_validation};

use async_trait::async_trait;
use std::error::Error as _;
use std::fmt;

/// The upstream validation call. Implementations return the parsed result,
/// `ProxyError::UpstreamRejected` for non-success statuses, or any other
/// `ProxyError` for transport and decoding failures.
#[async_trait]
pub trait AddressValidator: Send + Sync {
    async fn validate(&self, request: &ValidateAddressRequest) -> Result<ValidateAddressResponse>;
}

/// Calls the Google Address Validation API over HTTPS.
///
/// Without an API key every call fails with `ProxyError::Config` before any
/// request is sent.
#[derive(Clone)]
pub struct GoogleValidator {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl GoogleValidator {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        }
    }

    /// Build a validator with its own HTTP client using the configured timeouts.
    pub fn from_config(config: &ProxyConfig, api_key: Option<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self::new(client, config.upstream.base_url.clone(), api_key))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl fmt::Debug for GoogleValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GoogleValidator")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl AddressValidator for GoogleValidator {
    async fn validate(&self, request: &ValidateAddressRequest) -> Result<ValidateAddressResponse> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ProxyError::config("Google API key is not configured"))?;

        tracing::info!(
            url = %self.endpoint,
            region = %request.address.region_code,
            "POST validateAddress"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", api_key)])
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ProxyError::upstream(format!("Request failed: {}", describe(e))))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ProxyError::upstream(format!("Failed to read response body: {}", describe(e)))
        })?;

        tracing::debug!(status = status.as_u16(), body_len = body.len(), "Upstream response");

        if !status.is_success() {
            let message = google_error_message(&body);
            tracing::warn!(status = status.as_u16(), error_message = %message, "Upstream rejected request");
            return Err(ProxyError::upstream_rejected(status.as_u16(), message));
        }

        serde_json::from_str(&body).map_err(|e| {
            ProxyError::translation(format!(
                "Failed to parse validation response: {}. Body: {}",
                e,
                truncate(&body, 300)
            ))
        })
    }
}

/// Validate one address: translate, call upstream once, interpret.
pub async fn validate_address(
    input: &AddressInput,
    validator: &dyn AddressValidator,
) -> Result<AddressValidationResponse> {
    let request = address_to_google(input);
    let response = validator.validate(&request).await?;

    if let Some(ref id) = response.response_id {
        tracing::debug!(response_id = %id, "Upstream response id");
    }

    let result = google_to_validation(&response);

    tracing::info!(
        is_valid = result.is_valid,
        granularity = result.message.as_deref().unwrap_or_default(),
        "Address validated"
    );

    Ok(result)
}

/// Render a transport error with its cause chain. The URL is stripped so the
/// `key` query parameter never reaches logs or callers.
fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    text
}

fn truncate(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::google_types::{ValidatedAddress, ValidationResult, Verdict};
    use std::sync::Mutex;

    enum Outcome {
        Success(ValidateAddressResponse),
        Rejected(u16, &'static str),
        Network(&'static str),
    }

    struct StubValidator {
        outcome: Outcome,
        seen: Mutex<Vec<ValidateAddressRequest>>,
    }

    impl StubValidator {
        fn new(outcome: Outcome) -> Self {
            Self {
                outcome,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AddressValidator for StubValidator {
        async fn validate(&self, request: &ValidateAddressRequest) -> Result<ValidateAddressResponse> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.outcome {
                Outcome::Success(resp) => Ok(resp.clone()),
                Outcome::Rejected(status, msg) => Err(ProxyError::upstream_rejected(*status, *msg)),
                Outcome::Network(msg) => Err(ProxyError::upstream(*msg)),
            }
        }
    }

    fn googleplex() -> AddressInput {
        AddressInput {
            street: "1600 Amphitheatre Pkwy".to_string(),
            city: "Mountain View".to_string(),
            state: Some("CA".to_string()),
            postal_code: Some("94043".to_string()),
            country: "us".to_string(),
        }
    }

    fn formatted(address: &str, verdict: Verdict) -> ValidateAddressResponse {
        ValidateAddressResponse {
            result: Some(ValidationResult {
                address: Some(ValidatedAddress {
                    formatted_address: Some(address.to_string()),
                }),
                verdict: Some(verdict),
            }),
            response_id: Some("resp-1".to_string()),
        }
    }

    #[tokio::test]
    async fn test_end_to_end_example() {
        let stub = StubValidator::new(Outcome::Success(formatted(
            "1600 Amphitheatre Parkway, Mountain View, CA 94043, USA",
            Verdict::default(),
        )));

        let result = validate_address(&googleplex(), &stub).await.unwrap();

        assert_eq!(
            result,
            AddressValidationResponse {
                formatted_address: "1600 Amphitheatre Parkway, Mountain View, CA 94043, USA"
                    .to_string(),
                is_valid: true,
                message: Some("Validated".to_string()),
            }
        );

        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].address.region_code, "US");
        assert_eq!(seen[0].address.address_lines, vec!["1600 Amphitheatre Pkwy"]);
    }

    #[tokio::test]
    async fn test_granularity_label_passed_through() {
        let verdict = Verdict {
            validation_granularity: Some("PREMISE".to_string()),
            ..Verdict::default()
        };
        let stub = StubValidator::new(Outcome::Success(formatted("x", verdict)));

        let result = validate_address(&googleplex(), &stub).await.unwrap();
        assert_eq!(result.message.as_deref(), Some("PREMISE"));
    }

    #[tokio::test]
    async fn test_rejection_propagates_unchanged() {
        let stub = StubValidator::new(Outcome::Rejected(400, "Invalid request"));

        let err = validate_address(&googleplex(), &stub).await.unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.detail(), "Invalid request");
    }

    #[tokio::test]
    async fn test_network_failure_is_internal() {
        let stub = StubValidator::new(Outcome::Network("Request failed: connection refused"));

        let err = validate_address(&googleplex(), &stub).await.unwrap_err();
        assert_eq!(err.status_code(), 500);
        assert!(err.detail().contains("connection refused"));
        assert_eq!(stub.seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_debug_redacts_key() {
        let validator = GoogleValidator::new(
            reqwest::Client::new(),
            "https://example.test/v1:validateAddress",
            Some("secret-key".to_string()),
        );

        let debug = format!("{validator:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("example.test"));
    }

    #[tokio::test]
    async fn test_missing_key_fails_before_sending() {
        // Nothing listens on the discard port; reaching the network would give an Upstream error.
        let validator = GoogleValidator::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9/v1/validateAddress",
            None,
        );
        assert!(!validator.has_api_key());

        let err = validate_address(&googleplex(), &validator).await.unwrap_err();
        assert!(matches!(err, ProxyError::Config { .. }));
        assert_eq!(err.status_code(), 500);
        assert_eq!(
            err.detail(),
            "Internal server error: Configuration error: Google API key is not configured"
        );
    }

    #[test]
    fn test_truncate_respects_char_boundaries() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("abc", 10), "abc");
        assert_eq!(truncate("ßßßß", 2), "ßß");
    }
}
