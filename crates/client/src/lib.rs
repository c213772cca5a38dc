//! profilesync_client - HTTP backend and CLI for profilesync.

pub mod accounts;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod memory;
pub mod output;

pub use client::ProfileClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use memory::InMemoryProfileBackend;
