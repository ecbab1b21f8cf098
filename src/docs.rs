use utoipa::openapi::security::{ApiKey, ApiKeyValue, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use registrar_auth::Role;
use registrar_core::PaginationParams;
use registrar_models::auth::{
    AdminLoginDto, AdminLoginResponse, LecturerLoginDto, LecturerLoginResponse, MessageResponse,
    PasswordUpdateDto, StudentLoginDto, StudentLoginResponse,
};
use registrar_models::{
    Admin, Attendance, ClassMeeting, ClassResponse, CreateClassDto, EnrollDto, Enrollment,
    EnrollmentResponse, Grade, Lecturer, ResultRecord, SessionOffering, Student,
    UpdateAttendanceDto, UpdateResultDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::admin_login,
        crate::modules::auth::controller::lecturer_login,
        crate::modules::auth::controller::student_login,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::admin_password_update,
        crate::modules::auth::controller::lecturer_password_update,
        crate::modules::auth::controller::student_password_update,
        crate::modules::auth::controller::admin_me,
        crate::modules::enrollments::controller::enroll,
        crate::modules::enrollments::controller::withdraw,
        crate::modules::enrollments::controller::get_enrollment,
        crate::modules::enrollments::controller::list_my_enrollments,
        crate::modules::enrollments::controller::list_offering_enrollments,
        crate::modules::results::controller::get_result,
        crate::modules::results::controller::update_result,
        crate::modules::results::controller::list_my_results,
        crate::modules::results::controller::list_enrollment_results,
        crate::modules::classes::controller::create_class,
        crate::modules::classes::controller::get_class,
        crate::modules::classes::controller::list_offering_classes,
        crate::modules::classes::controller::list_lecturer_sessions,
        crate::modules::attendance::controller::list_class_attendances,
        crate::modules::attendance::controller::update_attendance,
    ),
    components(
        schemas(
            Role,
            Admin,
            Lecturer,
            Student,
            AdminLoginDto,
            AdminLoginResponse,
            LecturerLoginDto,
            LecturerLoginResponse,
            StudentLoginDto,
            StudentLoginResponse,
            PasswordUpdateDto,
            MessageResponse,
            SessionOffering,
            EnrollDto,
            Enrollment,
            EnrollmentResponse,
            Grade,
            ResultRecord,
            UpdateResultDto,
            ClassMeeting,
            Attendance,
            ClassResponse,
            CreateClassDto,
            UpdateAttendanceDto,
            PaginationParams,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Login, logout and password updates"),
        (name = "Enrollments", description = "Student enrollment into session offerings"),
        (name = "Results", description = "Marks and grades"),
        (name = "Classes", description = "Class meetings and their attendance sheets"),
        (name = "Attendance", description = "Marking attendance"),
    ),
    info(
        title = "Registrar API",
        version = "0.1.0",
        description = "Academic records API with session-token authentication, enrollment and attendance.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("session"))),
            );
            components.add_security_scheme(
                "basic_auth",
                SecurityScheme::Http(HttpBuilder::new().scheme(HttpAuthScheme::Basic).build()),
            );
        }
    }
}
