//! # Registrar Models
//!
//! Records, request payloads and response shapes for the Registrar API.
//!
//! # Modules
//!
//! - [`ids`]: Typed identifiers
//! - [`people`]: Admins, lecturers and students
//! - [`catalog`]: Programs, intakes and session offerings
//! - [`enrollments`]: Enrollments and the enroll payload
//! - [`results`]: Result placeholders and grade derivation
//! - [`classes`]: Class meetings and attendance
//! - [`auth`]: Login and password-update payloads

pub mod auth;
pub mod catalog;
pub mod classes;
pub mod enrollments;
pub mod ids;
pub mod people;
pub mod results;

pub use catalog::{Classroom, Faculty, Intake, Program, SessionOffering, Subject};
pub use classes::{Attendance, ClassMeeting, ClassResponse, CreateClassDto, UpdateAttendanceDto};
pub use enrollments::{EnrollDto, Enrollment, EnrollmentResponse};
pub use ids::*;
pub use people::{Admin, Lecturer, Student};
pub use results::{Grade, ResultRecord, UpdateResultDto};
