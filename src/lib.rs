//! # gamestack
//!
//! Client for the GameStack game-library gateway: session storage, the
//! authenticated HTTP pipeline, auth/catalog/collection clients, and the
//! client-side router whose guard decides which views a session may reach.
//!
//! The `gamestack` binary exposes every operation as a CLI subcommand.

pub mod app;
pub mod config;
pub mod error;
pub mod net;
pub mod router;
pub mod services;
pub mod session;

pub use app::GameStack;
pub use config::ClientConfig;
pub use error::ApiError;
