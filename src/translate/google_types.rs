//! Type definitions for the [Google Address Validation API](https://developers.google.com/maps/documentation/address-validation/reference/rest/v1/TopLevel/validateAddress).
//!
//! Only the fields the proxy sends or reads are modelled. Every response field
//! is optional so partial or `null` sections deserialize as empty.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request types (what we send TO the provider)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidateAddressRequest {
    pub address: PostalAddress,
    pub enable_usps_cass: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    pub region_code: String,
    pub locality: String,
    pub address_lines: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub administrative_area: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
}

// ---------------------------------------------------------------------------
// Response types (what the provider sends back)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidateAddressResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ValidationResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<ValidatedAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formatted_address: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_granularity_too_coarse: Option<bool>,
    /// e.g. `PREMISE`, `ROUTE`, `OTHER`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_granularity: Option<String>,
    /// Wire-format only, never consulted; likewise the two flags below.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_granularity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_complete: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_unconfirmed_components: Option<bool>,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GoogleErrorResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<GoogleErrorBody>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GoogleErrorBody {
    /// Wire-format only; the HTTP status is what gets forwarded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// gRPC-style status name, e.g. `INVALID_ARGUMENT`. Wire-format only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
