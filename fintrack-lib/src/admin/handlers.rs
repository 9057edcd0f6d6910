use crate::auth::password;
use crate::error::{HandlerError, ValidationErrors};
use crate::user::{validate_profile, UserId, UserResponse};
use actix_web::web::Data;
use actix_web::{web, HttpResponse, Responder};
use anyhow::Context;
use fintrack_repo::user_repo::{Role, UserRepo, UserUpdate};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct AdminUserUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
}

#[get("")]
pub async fn get_all_users(
    user_repo: Data<Arc<dyn UserRepo>>,
) -> Result<impl Responder, HandlerError> {
    let users: Vec<UserResponse> = user_repo
        .get_all_users()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(users))
}

#[get("/{user_id}")]
pub async fn get_user(
    user_repo: Data<Arc<dyn UserRepo>>,
    user_id: web::Path<UserId>,
) -> Result<impl Responder, HandlerError> {
    let user = user_repo.get_user(user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[put("/{user_id}")]
pub async fn update_user(
    user_repo: Data<Arc<dyn UserRepo>>,
    user_id: web::Path<UserId>,
    update: web::Json<AdminUserUpdate>,
) -> Result<impl Responder, HandlerError> {
    let update = update.into_inner();

    let mut errors = ValidationErrors::new();
    validate_profile(
        update.name.as_deref(),
        update.email.as_deref(),
        update.password.as_deref(),
        &mut errors,
    );
    errors.into_result()?;

    let password_hash = match update.password {
        Some(password) => {
            Some(password::encode_password(password).context("Unable to hash password")?)
        }
        None => None,
    };
    let user = user_repo
        .update_user(
            user_id.into_inner(),
            UserUpdate {
                name: update.name,
                email: update.email,
                password_hash,
                role: update.role,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[delete("/{user_id}")]
pub async fn delete_user(
    user_repo: Data<Arc<dyn UserRepo>>,
    user_id: web::Path<UserId>,
) -> Result<impl Responder, HandlerError> {
    user_repo.delete_user(user_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
