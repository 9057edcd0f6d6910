use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type UserId = i32;

#[async_trait]
pub trait UserRepo: Sync + Send {
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRepoError>;

    async fn get_user(&self, user_id: UserId) -> Result<User, UserRepoError>;

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserRepoError>;

    async fn get_all_users(&self) -> Result<Vec<User>, UserRepoError>;

    async fn update_user(&self, user_id: UserId, update: UserUpdate)
        -> Result<User, UserRepoError>;

    async fn delete_user(&self, user_id: UserId) -> Result<(), UserRepoError>;
}

#[derive(Error, Debug)]
pub enum UserRepoError {
    #[error("User {0} not found")]
    UserNotFound(UserId),
    #[error("User with email {0} not found")]
    UserEmailNotFound(String),
    #[error("Email {0} already in use")]
    EmailTaken(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Static reference data, seeded at deployment as role ids 1 and 2.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn id(self) -> i32 {
        match self {
            Role::User => 1,
            Role::Admin => 2,
        }
    }

    pub fn from_id(id: i32) -> Option<Role> {
        match id {
            1 => Some(Role::User),
            2 => Some(Role::Admin),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

impl NewUser {
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role,
        }
    }
}

/// Absent fields are left unchanged.
#[derive(Clone, Debug, Default)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
    pub role: Option<Role>,
}

impl UserUpdate {
    pub fn apply(self, user: User) -> User {
        User {
            id: user.id,
            name: self.name.unwrap_or(user.name),
            email: self.email.unwrap_or(user.email),
            password_hash: self.password_hash.unwrap_or(user.password_hash),
            role: self.role.unwrap_or(user.role),
        }
    }
}
