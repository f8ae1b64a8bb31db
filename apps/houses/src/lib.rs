//! # Houses - Cusp Calculation Server
//!
//! Library half of the `houses` binary: the HTTP API, the CLI, configuration
//! loading and the remote house engine client. Exposed as a library so the
//! integration tests can build routers and configurations directly.

pub mod api;
pub mod cli;
pub mod config;
pub mod engine;
