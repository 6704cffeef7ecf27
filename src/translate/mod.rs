//! Translation between the proxy's address API and Google's `validateAddress` format.
//!
//! All translation functions are pure (no I/O).

pub mod address_types;
pub mod google_types;
pub mod request;
pub mod response;
