//! Client of the signup API.
//!
//! - [`SignupApi`]: the trait every consumer depends on
//! - [`HttpSignupClient`]: the `reqwest` implementation
//! - [`load_reference_lists`]: concurrent fetch of the reference lists

pub mod api;
pub mod http;
pub mod loader;

pub use api::SignupApi;
pub use http::HttpSignupClient;
pub use loader::{load_reference_lists, ReferenceKind, ReferenceLoad};

#[cfg(any(test, feature = "test-utils"))]
pub use api::MockSignupApi;
