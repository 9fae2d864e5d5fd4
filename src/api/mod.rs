//! Ratio Forge API Server module
//!
//! Provides an HTTP REST API for generating ratio workbooks.
//! Run with `ratio-forge-server`.

pub mod handlers;
pub mod server;

pub use server::{build_router, run_api_server};
