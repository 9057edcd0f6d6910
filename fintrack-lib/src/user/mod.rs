use crate::error::ValidationErrors;
use actix_web::{web, Scope};
use email_address::EmailAddress;
use fintrack_repo::user_repo::{Role, User};
use serde::{Deserialize, Serialize};

pub mod handlers;

pub type UserId = fintrack_repo::user_repo::UserId;

pub fn user_service() -> Scope {
    web::scope("/users")
        .service(handlers::update_profile)
        .service(handlers::delete_profile)
}

/// Wire form of a user; the password hash never leaves the repo layer.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
        }
    }
}

/// Shared field checks for registration, profile updates and the admin
/// surface. `None` means the field was not supplied.
pub(crate) fn validate_profile(
    name: Option<&str>,
    email: Option<&str>,
    password: Option<&str>,
    errors: &mut ValidationErrors,
) {
    if let Some(name) = name {
        if name.trim().is_empty() {
            errors.add("name", "The name field is required.");
        } else if name.chars().count() > 255 {
            errors.add("name", "The name may not be greater than 255 characters.");
        }
    }
    if let Some(email) = email {
        if !EmailAddress::is_valid(email) {
            errors.add("email", "The email must be a valid email address.");
        }
    }
    if let Some(password) = password {
        if password.chars().count() < 8 {
            errors.add("password", "The password must be at least 8 characters.");
        }
    }
}
