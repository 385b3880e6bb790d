//! Gateway clients used by the CLI views.
//!
//! ARCHITECTURE
//! ============
//! Each client is a thin wrapper over the shared `ApiClient`: one HTTP call
//! per method, decoded body on success, errors forwarded unchanged. Only
//! `auth` writes the session.

pub mod auth;
pub mod collection;
pub mod games;
