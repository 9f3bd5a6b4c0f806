//! Authentication module
//!
//! Acquires the bearer credential once per connector lifetime using the
//! client-credentials grant, and attaches it to every later request.
//!
//! There is no expiry tracking and no refresh: a rejected token request is a
//! hard `Error::Auth`, and a 401 on a data call is a plain backend failure.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::{ClientCredentials, Credential};
