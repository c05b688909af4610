//! Common test infrastructure
//!
//! Tests should only import from this module, not from internal submodules.

mod client;
mod server;

pub use client::{TestClient, WsClient};
pub use server::{TestServer, ADMIN_PASSWORD, ADMIN_USER};
