//! Auth Module
//!
//! OAuth2 client-credentials token lifecycle: one bearer credential per
//! store, refreshed before expiry and replaced wholesale.

mod credential;
mod store;

pub use credential::{Credential, CredentialInfo};
pub use store::{TokenStats, TokenStore, TOKEN_EXPIRY_SKEW};
