//! Translate a caller's address into a Google `validateAddress` request.
//!
//! Only the street goes into `addressLines`; secondary lines (suite, unit)
//! have no input field and are never sent.

use super::address_types::AddressInput;
use super::google_types::{PostalAddress, ValidateAddressRequest};

/// Build the upstream payload for an address.
/// Pure function: the country is upper-cased, nothing else is normalized.
pub fn address_to_google(input: &AddressInput) -> ValidateAddressRequest {
    ValidateAddressRequest {
        address: PostalAddress {
            region_code: input.country.to_uppercase(),
            locality: input.city.clone(),
            address_lines: vec![input.street.clone()],
            administrative_area: input.state.clone(),
            postal_code: input.postal_code.clone(),
        },
        // USPS CASS is requested for every country; Google ignores it outside the US.
        enable_usps_cass: true,
    }
}
