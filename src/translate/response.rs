use super::address_types::AddressValidationResponse;
use super::google_types::{GoogleErrorResponse, ValidateAddressResponse};

pub const UNKNOWN_ADDRESS: &str = "Unknown";
pub const DEFAULT_MESSAGE: &str = "Validated";
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Translate a Google validation result into the proxy's response.
/// Pure function: missing sections fall back to the documented defaults.
pub fn google_to_validation(resp: &ValidateAddressResponse) -> AddressValidationResponse {
    let result = resp.result.as_ref();
    let address = result.and_then(|r| r.address.as_ref());
    let verdict = result.and_then(|r| r.verdict.as_ref());

    let formatted_address = address
        .and_then(|a| a.formatted_address.clone())
        .unwrap_or_else(|| UNKNOWN_ADDRESS.to_string());

    // Only the coarse-input flag decides validity.
    let too_coarse = verdict
        .and_then(|v| v.input_granularity_too_coarse)
        .unwrap_or(false);

    let message = verdict
        .and_then(|v| v.validation_granularity.clone())
        .unwrap_or_else(|| DEFAULT_MESSAGE.to_string());

    AddressValidationResponse {
        formatted_address,
        is_valid: !too_coarse,
        message: Some(message),
    }
}

/// Extract the caller-facing message from a Google error body.
/// Bodies that are not JSON, or carry no `error.message`, yield "Unknown error".
pub fn google_error_message(body: &str) -> String {
    serde_json::from_str::<GoogleErrorResponse>(body)
        .ok()
        .and_then(|e| e.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| UNKNOWN_ERROR.to_string())
}
