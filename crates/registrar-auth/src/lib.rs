//! # Registrar Auth
//!
//! Server-side sessions for the Registrar API.
//!
//! - [`role`]: The closed set of principal roles
//! - [`session`]: Minting, resolving and revoking opaque session keys
//!
//! A session key has the form `<namespace>:<uuid>` and maps to a JSON
//! payload `{"user_id": ..., "role": ...}` held in a [`TokenStore`] with a
//! fixed time-to-live. Expiry is not renewed on use.
//!
//! # Example
//!
//! ```ignore
//! use registrar_auth::{Role, SessionManager};
//! use registrar_cache::MemoryTokenStore;
//! use registrar_config::SessionConfig;
//!
//! let sessions = SessionManager::new(Arc::new(MemoryTokenStore::new()), SessionConfig::default());
//! let key = sessions.store(user_id, Role::Student).await?;
//! let session = sessions.resolve(&key).await?;
//! assert_eq!(session.role, Role::Student);
//! ```
//!
//! [`TokenStore`]: registrar_cache::TokenStore

pub mod role;
pub mod session;

pub use role::Role;
pub use session::{SessionData, SessionError, SessionManager};
