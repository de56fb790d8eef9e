//! Core module: configuration, domain errors, shared state, server loop.

pub mod config;
pub mod error;
pub mod server;
pub mod state;

pub use config::Config;
pub use error::{DomainError, DomainResult};
pub use server::Server;
pub use state::ServerState;
