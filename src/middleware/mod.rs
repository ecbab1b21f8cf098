//! Request authentication and authorization.
//!
//! - [`auth`]: Session requirement and the [`CurrentUser`](auth::CurrentUser) extractor
//! - [`role`]: Role requirement layered outside the session requirement
//! - [`basic`]: Legacy HTTP basic authentication for a single admin route
//!
//! Protected routers attach both layers with `route_layer`; the role layer is
//! added last so it runs first:
//!
//! ```ignore
//! Router::new()
//!     .route("/student-enrolls/{id}", delete(withdraw))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_session))
//!     .route_layer(middleware::from_fn_with_state(state.clone(), require_admin))
//! ```
//!
//! An invalid or expired session is always 401, a valid session with a
//! disallowed role is always 403.

pub mod auth;
pub mod basic;
pub mod role;
