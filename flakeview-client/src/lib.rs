//! flakeview API client
//!
//! Thin `reqwest` wrapper over the CI server's project and flaky test
//! endpoints. Responses are decoded into the `flakeview-common` data model.

pub mod client;
pub mod error;

pub use crate::client::ChangesClient;
pub use crate::error::{ClientError, ClientResult};
