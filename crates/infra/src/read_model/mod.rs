//! In-process product storage.

pub mod products;

pub use products::InMemoryProductStore;
