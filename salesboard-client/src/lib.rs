//! Salesboard Client - HTTP client for the hosted record gateway
//!
//! Network calls to the two transaction tables and the auth endpoints the
//! gateway forwards.

pub mod config;
pub mod error;
pub mod http;
pub mod source;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use source::RecordSource;

// Re-export shared types for convenience
pub use shared::{AuthSession, LoginRequest, UserInfo};
