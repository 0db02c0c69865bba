//! Authentication module
//!
//! Client-credentials token lifecycle: acquisition, local expiry
//! evaluation, caching, and invalidation.
//!
//! The `Authenticator` owns the in-memory token and the on-disk
//! `TokenStore`; callers drive it through `authenticate`,
//! `get_access_token`, `refresh_token` and `clear_token`.

mod authenticator;
mod expiry;
mod store;
mod types;

pub use authenticator::Authenticator;
pub use expiry::{evaluate_token, is_token_expired, TOKEN_EXPIRY_BUFFER_SECS};
pub use store::{TokenStore, DEFAULT_TOKEN_FILE};
pub use types::{TokenRecord, TokenValidity};
