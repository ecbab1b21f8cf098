//! # Registrar API
//!
//! An academic-records API built with Axum. Admins, lecturers and students log
//! in for an opaque session token, students enroll into session offerings,
//! admins schedule class meetings, and lecturers record attendance and marks.
//!
//! ## Architecture
//!
//! ```text
//! src/
//! ├── middleware/       # Session, role and basic-auth layers
//! ├── modules/          # Feature modules
//! │   ├── auth/         # Login, logout, password updates
//! │   ├── enrollments/  # Enrollment engine
//! │   ├── results/      # Marks and grades
//! │   ├── classes/      # Class meetings and attendance fan-out
//! │   └── attendance/   # Marking attendance
//! └── utils/            # Store error mapping, ownership checks
//! ```
//!
//! Each feature module has a `controller.rs` (HTTP handlers), a `service.rs`
//! (business rules over a [`registrar_db::RecordStore`]) and a `router.rs`.
//!
//! ## Authentication
//!
//! Logins mint a session key of the form `USER_SESSION:<uuid>`, stored in the
//! token store with a fixed TTL. Clients send it back in the `session` header.
//! Role-gated routes return 401 for a missing or expired session and 403 for a
//! valid session with the wrong role.
//!
//! ### API Documentation
//!
//! - Swagger UI: `http://localhost:3000/swagger-ui`
//! - Scalar: `http://localhost:3000/scalar`

pub mod demo;
pub mod docs;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod utils;
pub mod validator;

pub use registrar_auth;
pub use registrar_cache;
pub use registrar_config;
pub use registrar_core;
pub use registrar_db;
pub use registrar_models;
