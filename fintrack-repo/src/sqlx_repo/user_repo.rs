use crate::sqlx_repo::is_unique_violation;
use crate::user_repo::{NewUser, Role, User, UserId, UserRepo, UserRepoError, UserUpdate};
use anyhow::{anyhow, Context};
use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct UserEntry {
    id: UserId,
    name: String,
    email: String,
    password_hash: String,
    role_id: i32,
}

impl UserEntry {
    fn into_user(self) -> Result<User, UserRepoError> {
        let role =
            Role::from_id(self.role_id).ok_or_else(|| anyhow!("Unknown role id {}", self.role_id))?;
        Ok(User {
            id: self.id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role,
        })
    }
}

pub struct SQLxUserRepo {
    pool: Pool<Postgres>,
}

impl SQLxUserRepo {
    pub fn new(pool: Pool<Postgres>) -> SQLxUserRepo {
        SQLxUserRepo { pool }
    }
}

#[async_trait]
impl UserRepo for SQLxUserRepo {
    #[instrument(skip(self, new_user))]
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRepoError> {
        let id: Option<UserId> = sqlx::query_scalar(
            "INSERT INTO users(name, email, password_hash, role_id) VALUES ($1, $2, $3, $4) ON CONFLICT (email) DO NOTHING RETURNING id",
        )
        .bind(&new_user.name)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role.id())
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to create user {}", new_user.email))?;
        match id {
            Some(id) => Ok(new_user.into_user(id)),
            None => Err(UserRepoError::EmailTaken(new_user.email)),
        }
    }

    #[instrument(skip(self))]
    async fn get_user(&self, user_id: UserId) -> Result<User, UserRepoError> {
        let entry: Option<UserEntry> = sqlx::query_as(
            "SELECT id, name, email, password_hash, role_id FROM users WHERE id = $1",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to get user {}", user_id))?;
        entry
            .ok_or(UserRepoError::UserNotFound(user_id))?
            .into_user()
    }

    #[instrument(skip(self))]
    async fn get_user_by_email(&self, email: &str) -> Result<User, UserRepoError> {
        let entry: Option<UserEntry> = sqlx::query_as(
            "SELECT id, name, email, password_hash, role_id FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to get user with email {}", email))?;
        entry
            .ok_or_else(|| UserRepoError::UserEmailNotFound(email.to_owned()))?
            .into_user()
    }

    #[instrument(skip(self))]
    async fn get_all_users(&self) -> Result<Vec<User>, UserRepoError> {
        let entries: Vec<UserEntry> =
            sqlx::query_as("SELECT id, name, email, password_hash, role_id FROM users ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .context("Unable to get users")?;
        entries.into_iter().map(UserEntry::into_user).collect()
    }

    #[instrument(skip(self, update))]
    async fn update_user(
        &self,
        user_id: UserId,
        update: UserUpdate,
    ) -> Result<User, UserRepoError> {
        let user = self.get_user(user_id).await?;
        let updated = update.apply(user);

        let result =
            sqlx::query("UPDATE users SET name = $1, email = $2, password_hash = $3, role_id = $4 WHERE id = $5")
                .bind(&updated.name)
                .bind(&updated.email)
                .bind(&updated.password_hash)
                .bind(updated.role.id())
                .bind(user_id)
                .execute(&self.pool)
                .await;
        match result {
            Ok(r) if r.rows_affected() == 0 => Err(UserRepoError::UserNotFound(user_id)),
            Ok(_) => Ok(updated),
            Err(e) if is_unique_violation(&e) => Err(UserRepoError::EmailTaken(updated.email)),
            Err(e) => Err(UserRepoError::Other(
                anyhow::Error::new(e).context(format!("Unable to update user {}", user_id)),
            )),
        }
    }

    #[instrument(skip(self))]
    async fn delete_user(&self, user_id: UserId) -> Result<(), UserRepoError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Unable to delete user {}", user_id))?;
        if result.rows_affected() == 1 {
            Ok(())
        } else {
            Err(UserRepoError::UserNotFound(user_id))
        }
    }
}
