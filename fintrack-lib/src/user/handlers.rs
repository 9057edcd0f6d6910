use crate::auth::password;
use crate::error::{HandlerError, ValidationErrors};
use crate::user::{validate_profile, UserId, UserResponse};
use actix_web::web::Data;
use actix_web::{web, HttpResponse, Responder};
use anyhow::Context;
use fintrack_repo::user_repo::{UserRepo, UserUpdate};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[put("/profile")]
pub async fn update_profile(
    user_repo: Data<Arc<dyn UserRepo>>,
    user_id: web::ReqData<UserId>,
    update: web::Json<ProfileUpdate>,
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
                role: None,
            },
        )
        .await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

#[delete("/profile")]
pub async fn delete_profile(
    user_repo: Data<Arc<dyn UserRepo>>,
    user_id: web::ReqData<UserId>,
) -> Result<impl Responder, HandlerError> {
    user_repo.delete_user(user_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
