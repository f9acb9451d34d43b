pub mod client;
pub mod config;

pub use client::{Forwarded, NvidiaClient};
pub use config::NvidiaConfig;
