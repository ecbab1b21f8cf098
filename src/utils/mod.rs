//! Helpers shared by the feature modules.
//!
//! - [`auth_helpers`]: Lecturer ownership checks over session offerings
//! - [`errors`]: Mapping record store failures onto HTTP errors

pub mod auth_helpers;
pub mod errors;
