pub mod config;
mod error;
pub mod nvidia;
pub mod tutor;

pub use nvidia::NvidiaClient;
pub use tutor::{ProxyClient, TutorService};
