//! Infrastructure layer: product backends the gateway can forward to.
//!
//! - `downstream`: a remote product API reached over HTTP
//! - `read_model`: an in-process store for dev/test

pub mod downstream;
pub mod error;
pub mod read_model;

pub use downstream::{HttpProductService, map_downstream_response};
pub use error::BackendError;
pub use read_model::InMemoryProductStore;
