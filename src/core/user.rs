//! Review authors.

use crate::{
    entities::{User, user},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::{info, instrument};

/// Creates a user with a unique username.
///
/// # Errors
/// Returns `Error::Validation` for a blank username and `Error::UniqueViolation` when
/// the username is taken.
#[instrument(skip(db, email))]
pub async fn create_user(db: &DatabaseConnection, username: &str, email: &str) -> Result<user::Model> {
    let username = username.trim();
    if username.is_empty() {
        return Err(Error::validation("Username cannot be empty"));
    }

    let user = user::ActiveModel {
        username: Set(username.to_string()),
        email: Set(email.trim().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Created user '{}' (ID: {})", user.username, user.id);
    Ok(user)
}

/// Finds a user by id.
pub async fn get_user_by_id(db: &DatabaseConnection, user_id: i64) -> Result<Option<user::Model>> {
    User::find_by_id(user_id).one(db).await.map_err(Into::into)
}

/// Finds a user by username.
pub async fn get_user_by_username(
    db: &DatabaseConnection,
    username: &str,
) -> Result<Option<user::Model>> {
    User::find()
        .filter(user::Column::Username.eq(username))
        .one(db)
        .await
        .map_err(Into::into)
}
