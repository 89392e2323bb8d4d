//! Credential loading
//!
//! Reads the secret file that carries the OAuth client registration, the
//! long-lived refresh token and the target view.

pub mod loader;

// Re-export commonly used items
pub use loader::{load_secret, parse_secret, VIEW_ID_ENV};
