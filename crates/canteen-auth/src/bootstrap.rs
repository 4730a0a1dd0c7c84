//! First-run administrator seeding.

use tracing::info;

use canteen_core::config::AdminAccountConfig;
use canteen_core::error::AppError;
use canteen_database::AccountRepository;
use canteen_entity::user::{CreateUser, User};

use crate::password::PasswordHasher;

/// Creates the configured administrator unless the username is already taken.
///
/// Returns the created user, or `None` when an account with that name
/// already exists.
pub async fn ensure_admin(
    accounts: &dyn AccountRepository,
    hasher: &PasswordHasher,
    admin: &AdminAccountConfig,
) -> Result<Option<User>, AppError> {
    if accounts.find_by_username(&admin.username).await?.is_some() {
        return Ok(None);
    }

    let role = accounts
        .find_role_by_name(&admin.role)
        .await?
        .ok_or_else(|| AppError::role_not_found(format!("Role '{}' does not exist", admin.role)))?;

    let user = accounts
        .create_user(&CreateUser {
            role_id: role.id,
            username: admin.username.clone(),
            password_hash: hasher.hash(&admin.password)?,
            email: admin.email.clone(),
            first_name: admin.first_name.clone(),
            last_name: admin.last_name.clone(),
        })
        .await?;

    info!(user_id = %user.id, role = %role.name, "Bootstrap administrator created");
    Ok(Some(user))
}
