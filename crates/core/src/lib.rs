//! `prodgate-core` — shared building blocks for the product gateway.
//!
//! This crate is pure: no HTTP, no IO. It holds the [`Outcome`] type every
//! operation returns, strongly-typed identifiers, and the domain error model.

pub mod error;
pub mod id;
pub mod outcome;
pub mod resource;

pub use error::{DomainError, DomainResult, FieldErrors};
pub use id::ProductId;
pub use outcome::Outcome;
pub use resource::Resource;
