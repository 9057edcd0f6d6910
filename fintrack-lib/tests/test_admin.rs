use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use actix_web::test::TestRequest;
use actix_web::web::Data;
use actix_web::{http, App};
use actix_web_httpauth::middleware::HttpAuthentication;
use fintrack_lib::auth::jwt::JWTAuth;
use fintrack_lib::user::UserResponse;
use fintrack_repo::category_repo::CategoryRepo;
use fintrack_repo::transaction_repo::TransactionRepo;
use fintrack_repo::user_repo::{Role, UserRepo};
use rstest::rstest;
use serde_json::json;
use utils::repos;
use utils::tracing_setup;
use utils::TestUser;

mod utils;

macro_rules! build_admin_app {
    ($user_repo:expr, $jwt_auth:expr) => {{
        App::new()
            .app_data($jwt_auth)
            .app_data(Data::new($user_repo))
            .wrap(fintrack_lib::tracing::create_middleware())
            .service(
                fintrack_lib::admin::admin_service().wrap(HttpAuthentication::bearer(
                    fintrack_lib::auth::admin_validator,
                )),
            )
    }};
}

macro_rules! authed {
    ($request:expr, $token:expr) => {
        $request.insert_header((http::header::AUTHORIZATION, format!("Bearer {}", $token)))
    };
}

fn new_jwt_auth() -> JWTAuth {
    let secret: [u8; 32] = rand::random();
    JWTAuth::from_secret(secret.to_vec())
}

#[rstest]
#[actix_rt::test]
async fn test_admin_can_list_and_get_users(
    _tracing_setup: &(),
    repos: (
        Arc<dyn UserRepo>,
        Arc<dyn CategoryRepo>,
        Arc<dyn TransactionRepo>,
    ),
) {
    let (user_repo, _category_repo, _transaction_repo) = repos;
    let admin = TestUser::with_role(user_repo.clone(), Role::Admin).await;
    let user = TestUser::new(user_repo.clone()).await;

    let jwt_auth = new_jwt_auth();
    let token = jwt_auth.create_token(admin.user_id);
    let service = test::init_service(build_admin_app!(user_repo.clone(), jwt_auth)).await;

    let request = authed!(TestRequest::get().uri("/admin/users"), token).to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let users: Vec<UserResponse> = test::read_body_json(response).await;
    assert!(users.iter().any(|u| u.id == admin.user_id));
    assert!(users.iter().any(|u| u.id == user.user_id));

    let request = authed!(
        TestRequest::get().uri(format!("/admin/users/{}", user.user_id).as_str()),
        token
    )
    .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: UserResponse = test::read_body_json(response).await;
    assert_eq!(fetched.id, user.user_id);
    assert_eq!(fetched.email, user.email);

    let request = authed!(TestRequest::get().uri("/admin/users/0"), token).to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    admin.delete().await;
    user.delete().await
}

#[rstest]
#[actix_rt::test]
async fn test_admin_routes_reject_non_admins(
    _tracing_setup: &(),
    repos: (
        Arc<dyn UserRepo>,
        Arc<dyn CategoryRepo>,
        Arc<dyn TransactionRepo>,
    ),
) {
    let (user_repo, _category_repo, _transaction_repo) = repos;
    let user = TestUser::new(user_repo.clone()).await;

    let jwt_auth = new_jwt_auth();
    let token = jwt_auth.create_token(user.user_id);
    let service = test::init_service(build_admin_app!(user_repo.clone(), jwt_auth)).await;

    // valid token, wrong role
    let request = authed!(TestRequest::get().uri("/admin/users"), token).to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // no token at all
    let request = TestRequest::get().uri("/admin/users").to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // garbage token
    let request = authed!(TestRequest::get().uri("/admin/users"), "not-a-token").to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    user.delete().await
}

#[rstest]
#[actix_rt::test]
async fn test_admin_can_update_users(
    _tracing_setup: &(),
    repos: (
        Arc<dyn UserRepo>,
        Arc<dyn CategoryRepo>,
        Arc<dyn TransactionRepo>,
    ),
) {
    let (user_repo, _category_repo, _transaction_repo) = repos;
    let admin = TestUser::with_role(user_repo.clone(), Role::Admin).await;
    let user = TestUser::new(user_repo.clone()).await;

    let jwt_auth = new_jwt_auth();
    let token = jwt_auth.create_token(admin.user_id);
    let service = test::init_service(build_admin_app!(user_repo.clone(), jwt_auth)).await;

    let request = authed!(
        TestRequest::put().uri(format!("/admin/users/{}", user.user_id).as_str()),
        token
    )
    .set_json(json!({"name": "Renamed", "role": "admin"}))
    .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: UserResponse = test::read_body_json(response).await;
    assert_eq!(updated.name, "Renamed");
    assert_eq!(updated.role, Role::Admin);

    let stored = user_repo.get_user(user.user_id).await.unwrap();
    assert_eq!(stored.role, Role::Admin);

    // duplicate email is rejected
    let request = authed!(
        TestRequest::put().uri(format!("/admin/users/{}", user.user_id).as_str()),
        token
    )
    .set_json(json!({"email": admin.email}))
    .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    admin.delete().await;
    user.delete().await
}

#[rstest]
#[actix_rt::test]
async fn test_admin_can_delete_users(
    _tracing_setup: &(),
    repos: (
        Arc<dyn UserRepo>,
        Arc<dyn CategoryRepo>,
        Arc<dyn TransactionRepo>,
    ),
) {
    let (user_repo, _category_repo, _transaction_repo) = repos;
    let admin = TestUser::with_role(user_repo.clone(), Role::Admin).await;
    let user = TestUser::new(user_repo.clone()).await;

    let jwt_auth = new_jwt_auth();
    let token = jwt_auth.create_token(admin.user_id);
    let service = test::init_service(build_admin_app!(user_repo.clone(), jwt_auth)).await;

    let request = authed!(
        TestRequest::delete().uri(format!("/admin/users/{}", user.user_id).as_str()),
        token
    )
    .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    assert!(user_repo.get_user(user.user_id).await.is_err());

    let request = authed!(
        TestRequest::delete().uri(format!("/admin/users/{}", user.user_id).as_str()),
        token
    )
    .to_request();
    let response = test::call_service(&service, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    admin.delete().await
}
