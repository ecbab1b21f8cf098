use registrar_core::hash_password;
use registrar_models::AdminId;
use sqlx::PgPool;

use crate::CliResult;

/// Inserts an admin account. Fails if the username is taken.
pub async fn create_admin(db: &PgPool, username: &str, password: &str) -> CliResult<AdminId> {
    let hashed_password =
        hash_password(password).map_err(|e| format!("Failed to hash password: {}", e.error))?;

    let id = sqlx::query_scalar::<_, AdminId>(
        "INSERT INTO admins (id, username, password)
         VALUES ($1, $2, $3)
         ON CONFLICT (username) DO NOTHING
         RETURNING id",
    )
    .bind(AdminId::new())
    .bind(username)
    .bind(&hashed_password)
    .fetch_optional(db)
    .await?;

    id.ok_or_else(|| "Admin with this username already exists".into())
}
