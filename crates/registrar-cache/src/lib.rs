//! # Registrar Cache
//!
//! Expiring key-value storage for the Registrar API.
//!
//! This crate provides:
//! - The [`TokenStore`] trait consumed by the session layer
//! - [`RedisCache`], the production implementation
//! - [`MemoryTokenStore`], an in-process implementation for tests and local runs
//! - Cache configuration from environment variables
//!
//! # Example
//!
//! ```ignore
//! use registrar_cache::{CacheConfig, RedisCache, TokenStore};
//!
//! let config = CacheConfig::from_env();
//! let cache = RedisCache::new(&config.redis_url).await?;
//! cache.set_with_expiry("USER_SESSION:abc", "{}", Duration::from_secs(60)).await?;
//! ```

pub mod config;
pub mod memory;
pub mod redis;
pub mod store;

pub use config::CacheConfig;
pub use memory::MemoryTokenStore;
pub use redis::RedisCache;
pub use store::{CacheError, TokenStore};
