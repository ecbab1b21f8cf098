use anyhow::anyhow;
use registrar_auth::{Role, SessionManager};
use registrar_core::{AppError, hash_password, verify_password};
use registrar_db::{Account, RecordStore};
use registrar_models::auth::{
    AdminLoginDto, AdminLoginResponse, LecturerLoginDto, LecturerLoginResponse, MessageResponse,
    PasswordUpdateDto, StudentLoginDto, StudentLoginResponse,
};
use tracing::instrument;
use uuid::Uuid;

use crate::metrics::{track_login, track_password_update};
use crate::utils::errors::{store_failure, store_internal};

const COMPONENT: &str = "module/auth";

pub const INCORRECT_USERNAME: &str = "Incorrect username";
pub const INCORRECT_EMAIL: &str = "Incorrect email";
pub const INCORRECT_STUDENT_CODE: &str = "Incorrect student code";
pub const INCORRECT_PASSWORD: &str = "Incorrect password";
pub const CURRENT_PASSWORD_INCORRECT: &str = "Current Password Is Incorrect";
pub const NEW_PASSWORD_SAME: &str = "New Password Cannot Be Same With Current Password";
pub const NEW_PASSWORD_MISMATCH: &str = "New Password Does Not Match";
pub const PASSWORD_CHANGED: &str = "Password Successfully Changed";

pub struct AuthService;

impl AuthService {
    #[instrument(skip(store, sessions, dto), fields(username = %dto.username))]
    pub async fn login_admin(
        store: &dyn RecordStore,
        sessions: &SessionManager,
        dto: AdminLoginDto,
    ) -> Result<AdminLoginResponse, AppError> {
        let admin = store
            .find_admin_by_username(&dto.username)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "AdminLogin/GetOneAdmin"))?
            .ok_or_else(|| rejected(Role::Admin, INCORRECT_USERNAME))?;

        check_password(Role::Admin, &dto.password, &admin.password)?;
        let session = mint(sessions, admin.id.into_inner(), Role::Admin).await?;

        Ok(AdminLoginResponse { admin, session })
    }

    #[instrument(skip(store, sessions, dto), fields(email = %dto.email))]
    pub async fn login_lecturer(
        store: &dyn RecordStore,
        sessions: &SessionManager,
        dto: LecturerLoginDto,
    ) -> Result<LecturerLoginResponse, AppError> {
        let lecturer = store
            .find_lecturer_by_email(&dto.email)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "LecturerLogin/GetOneLecturer"))?
            .ok_or_else(|| rejected(Role::Lecturer, INCORRECT_EMAIL))?;

        check_password(Role::Lecturer, &dto.password, &lecturer.password)?;
        let session = mint(sessions, lecturer.id.into_inner(), Role::Lecturer).await?;

        Ok(LecturerLoginResponse { lecturer, session })
    }

    #[instrument(skip(store, sessions, dto), fields(student_code = %dto.student_code))]
    pub async fn login_student(
        store: &dyn RecordStore,
        sessions: &SessionManager,
        dto: StudentLoginDto,
    ) -> Result<StudentLoginResponse, AppError> {
        let student = store
            .find_student_by_code(&dto.student_code)
            .await
            .map_err(|e| store_internal(e, COMPONENT, "StudentLogin/GetOneStudent"))?
            .ok_or_else(|| rejected(Role::Student, INCORRECT_STUDENT_CODE))?;

        check_password(Role::Student, &dto.password, &student.password)?;
        let session = mint(sessions, student.id.into_inner(), Role::Student).await?;

        Ok(StudentLoginResponse { student, session })
    }

    /// Changes the password of `account` after checking the current one.
    #[instrument(skip(store, dto))]
    pub async fn update_password(
        store: &dyn RecordStore,
        account: Account,
        dto: PasswordUpdateDto,
    ) -> Result<MessageResponse, AppError> {
        let current_hash = match account {
            Account::Admin(id) => store.get_admin(id).await.map(|a| a.password),
            Account::Lecturer(id) => store.get_lecturer(id).await.map(|l| l.password),
            Account::Student(id) => store.get_student(id).await.map(|s| s.password),
        }
        .map_err(|e| store_internal(e, COMPONENT, "PasswordUpdate/GetOne"))?;

        if !verify_password(&dto.current_password, &current_hash)? {
            return Err(AppError::bad_request(anyhow!(CURRENT_PASSWORD_INCORRECT))
                .tagged(COMPONENT, "PasswordUpdate/CompareHashAndPassword"));
        }

        if dto.new_password == dto.current_password {
            return Err(AppError::bad_request(anyhow!(NEW_PASSWORD_SAME))
                .tagged(COMPONENT, "PasswordUpdate/CurrentPasswordComparison"));
        }

        if dto.new_password != dto.confirm_new_password {
            return Err(AppError::bad_request(anyhow!(NEW_PASSWORD_MISMATCH))
                .tagged(COMPONENT, "PasswordUpdate/NewPassword"));
        }

        let new_hash = hash_password(&dto.new_password)?;
        store
            .update_password(account, &new_hash)
            .await
            .map_err(|e| store_failure(e, "Account not found", COMPONENT, "PasswordUpdate/Update"))?;

        track_password_update();

        Ok(MessageResponse {
            message: PASSWORD_CHANGED.to_string(),
        })
    }

    #[instrument(skip(sessions, session_key))]
    pub async fn logout(
        sessions: &SessionManager,
        session_key: &str,
    ) -> Result<MessageResponse, AppError> {
        sessions
            .revoke(session_key)
            .await
            .map_err(|e| AppError::internal(e).tagged(COMPONENT, "Logout/Revoke"))?;

        Ok(MessageResponse {
            message: "Logged out".to_string(),
        })
    }
}

fn rejected(role: Role, message: &'static str) -> AppError {
    track_login(role.as_str(), false);
    AppError::unauthorized(anyhow!(message)).tagged(COMPONENT, "Login/GetOne")
}

fn check_password(role: Role, password: &str, hash: &str) -> Result<(), AppError> {
    if verify_password(password, hash)? {
        Ok(())
    } else {
        Err(rejected(role, INCORRECT_PASSWORD))
    }
}

async fn mint(sessions: &SessionManager, user_id: Uuid, role: Role) -> Result<String, AppError> {
    let key = sessions
        .store(user_id, role)
        .await
        .map_err(|e| AppError::internal(e).tagged(COMPONENT, "Login/StoreSession"))?;
    track_login(role.as_str(), true);
    Ok(key)
}
