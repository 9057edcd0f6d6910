use crate::error::HandlerError;
use crate::user::UserId;
use actix_web::dev::ServiceRequest;
use actix_web::web::Data;
use actix_web::{web, Error, HttpMessage, Scope};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use actix_web_httpauth::extractors::{bearer, AuthenticationError};
use actix_web_httpauth::headers::www_authenticate::bearer::Bearer;
use fintrack_repo::user_repo::{Role, UserRepo};
use self::jwt::JWTAuth;
use std::sync::Arc;
use tracing_actix_web::RootSpan;

pub mod handlers;
pub mod jwt;
pub mod password;

pub fn auth_service(signups_enabled: bool) -> Scope {
    let scope = web::scope("").service(handlers::login);
    if signups_enabled {
        scope.service(handlers::register)
    } else {
        scope
    }
}

/// Validates credentials using [JWTAuth]. If valid, injects the user id
/// into the request and into the [RootSpan]
pub async fn credentials_validator(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let jwt_auth = req.app_data::<JWTAuth>().unwrap();
    if let Ok(user) = jwt_auth.validate_token(credentials.token()) {
        if let Some(root_span) = req.extensions().get::<RootSpan>() {
            root_span.record("user_id", user);
        }
        req.extensions_mut().insert::<UserId>(user);
        Ok(req)
    } else {
        let challenge = Bearer::build().error(bearer::Error::InvalidToken).finish();
        Err((AuthenticationError::new(challenge).into(), req))
    }
}

/// Variant of [credentials_validator] for the admin surface: the token
/// must additionally resolve to a user with [Role::Admin]. This role
/// gate is independent of the row-ownership policy.
pub async fn admin_validator(
    req: ServiceRequest,
    credentials: BearerAuth,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let jwt_auth = req.app_data::<JWTAuth>().unwrap();
    let Ok(user) = jwt_auth.validate_token(credentials.token()) else {
        let challenge = Bearer::build().error(bearer::Error::InvalidToken).finish();
        return Err((AuthenticationError::new(challenge).into(), req));
    };

    let user_repo = req
        .app_data::<Data<Arc<dyn UserRepo>>>()
        .expect("user repo should be registered")
        .clone();
    match user_repo.get_user(user).await {
        Ok(u) if u.role == Role::Admin => {
            if let Some(root_span) = req.extensions().get::<RootSpan>() {
                root_span.record("user_id", user);
            }
            req.extensions_mut().insert::<UserId>(user);
            Ok(req)
        }
        _ => Err((HandlerError::Forbidden.into(), req)),
    }
}
