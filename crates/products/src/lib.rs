//! Products domain module.
//!
//! This crate contains the product entity and the rules a create request must
//! satisfy, implemented purely as deterministic domain logic (no IO, no HTTP,
//! no storage).

pub mod product;

pub use product::{NewProduct, Product};
