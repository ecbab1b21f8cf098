//! # Registrar Core
//!
//! Core types, errors, and utilities shared by the Registrar API crates.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`envelope`]: The `{data, errors}` response wrapper every endpoint returns
//! - [`pagination`]: List query parameters
//! - [`password`]: Password hashing and verification
//!
//! # Example
//!
//! ```ignore
//! use registrar_core::errors::AppError;
//! use registrar_core::password::{hash_password, verify_password};
//!
//! let error = AppError::not_found(anyhow::anyhow!("Enrollment not found"));
//! let hash = hash_password("secure_password")?;
//! ```

pub mod envelope;
pub mod errors;
pub mod pagination;
pub mod password;

pub use envelope::Envelope;
pub use errors::AppError;
pub use pagination::{PaginationParams, SortDirection};
pub use password::{hash_password, verify_password};
