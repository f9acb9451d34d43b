//! Chat proxy library.
//!
//! Exposes the router that forwards `POST /api/chat` to the upstream
//! chat-completions API with the server-owned credential.

pub mod config;
pub mod http;
pub mod state;

pub use config::Config;
pub use state::AppState;
