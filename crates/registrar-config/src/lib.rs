//! # Registrar Config
//!
//! Configuration structures loaded from environment variables:
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`server`]: Bind address, storage backend and metrics switch
//! - [`session`]: Session key namespace, lifetime and request header
//!
//! # Example
//!
//! ```ignore
//! use registrar_config::{CorsConfig, ServerConfig, SessionConfig};
//!
//! let cors_config = CorsConfig::from_env();
//! let server_config = ServerConfig::from_env();
//! let session_config = SessionConfig::from_env();
//! ```

pub mod cors;
pub mod server;
pub mod session;

pub use cors::CorsConfig;
pub use server::{ServerConfig, StoreBackend};
pub use session::SessionConfig;
