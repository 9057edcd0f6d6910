use crate::auth::jwt::JWTAuth;
use crate::auth::password;
use crate::error::{HandlerError, ValidationErrors};
use crate::user::{validate_profile, UserResponse};
use actix_web::web::Data;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use anyhow::Context;
use fintrack_repo::category_repo::{CategoryRepo, NewCategory};
use fintrack_repo::user_repo::{NewUser, Role, UserRepo, UserRepoError};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Starter set created for every new account.
pub const DEFAULT_CATEGORIES: [&str; 5] = [
    "Groceries",
    "Utilities",
    "Entertainment",
    "Healthcare",
    "Transportation",
];

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[post("/register")]
pub async fn register(
    user_repo: Data<Arc<dyn UserRepo>>,
    category_repo: Data<Arc<dyn CategoryRepo>>,
    request: web::Json<RegisterRequest>,
    req: HttpRequest,
) -> Result<impl Responder, HandlerError> {
    let request = request.into_inner();

    let mut errors = ValidationErrors::new();
    validate_profile(
        Some(&request.name),
        Some(&request.email),
        Some(&request.password),
        &mut errors,
    );
    errors.into_result()?;

    let password_hash =
        password::encode_password(request.password).context("Unable to hash password")?;
    let user = user_repo
        .create_user(NewUser {
            name: request.name,
            email: request.email,
            password_hash,
            role: Role::User,
        })
        .await?;

    for name in DEFAULT_CATEGORIES {
        category_repo
            .create_category(user.id, NewCategory::new(name.to_string(), None))
            .await?;
    }
    info!(user_id = user.id, "Registered user");

    let jwt_auth = req.app_data::<JWTAuth>().unwrap();
    let token = jwt_auth.create_token(user.id);
    Ok(HttpResponse::Created().json(serde_json::json!({
        "user": UserResponse::from(user),
        "token": token,
    })))
}

#[post("/login")]
pub async fn login(
    user_repo: Data<Arc<dyn UserRepo>>,
    request: web::Json<LoginRequest>,
    req: HttpRequest,
) -> Result<impl Responder, HandlerError> {
    let request = request.into_inner();

    // an unknown email and a wrong password are indistinguishable
    let user = match user_repo.get_user_by_email(&request.email).await {
        Ok(user) => user,
        Err(UserRepoError::UserNotFound(_)) | Err(UserRepoError::UserEmailNotFound(_)) => {
            return Err(HandlerError::InvalidCredentials)
        }
        Err(e) => return Err(e.into()),
    };

    let matched = password::verify_password(request.password, user.password_hash)
        .context("Unable to verify password")?;
    if !matched {
        return Err(HandlerError::InvalidCredentials);
    }

    let jwt_auth = req.app_data::<JWTAuth>().unwrap();
    Ok(HttpResponse::Ok().json(serde_json::json!({ "token": jwt_auth.create_token(user.id) })))
}
