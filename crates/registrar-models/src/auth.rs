//! Login and password-update payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::people::{Admin, Lecturer, Student};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AdminLoginDto {
    #[validate(length(min = 1, max = 50, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, max = 50, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LecturerLoginDto {
    #[validate(email(message = "email is invalid"))]
    pub email: String,
    #[validate(length(min = 1, max = 50, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StudentLoginDto {
    #[validate(length(min = 1, max = 50, message = "student_code is required"))]
    pub student_code: String,
    #[validate(length(min = 1, max = 50, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PasswordUpdateDto {
    #[validate(length(min = 1, message = "current_password is required"))]
    pub current_password: String,
    #[validate(length(min = 5, max = 50, message = "new_password must be 5 to 50 characters"))]
    pub new_password: String,
    #[validate(length(min = 1, message = "confirm_new_password is required"))]
    pub confirm_new_password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminLoginResponse {
    pub admin: Admin,
    pub session: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LecturerLoginResponse {
    pub lecturer: Lecturer,
    pub session: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentLoginResponse {
    pub student: Student,
    pub session: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
