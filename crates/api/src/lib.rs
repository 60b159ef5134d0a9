//! HTTP API: server, routing, and Outcome-to-response mapping.

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod middleware;
