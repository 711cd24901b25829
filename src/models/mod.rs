//! Wire models for the Amadeus API
//!
//! Defines the DTOs used to serialize outbound query parameters and to
//! deserialize token endpoint and error response bodies.

pub mod errors;
pub mod params;
pub mod token;

// Re-export commonly used types
pub use errors::{ApiErrorBody, ApiErrorDetail};
pub use params::Params;
pub use token::{TokenErrorResponse, TokenResponse};
