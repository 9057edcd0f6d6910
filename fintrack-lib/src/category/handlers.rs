use crate::error::{HandlerError, ValidationErrors};
use crate::policy;
use crate::policy::Action;
use crate::user::UserId;
use actix_web::web::Data;
use actix_web::{web, HttpResponse, Responder};
use fintrack_repo::category_repo::{CategoryRepo, CategoryUpdate, NewCategory};
use fintrack_repo::transaction_repo::TransactionRepo;
use std::sync::Arc;

fn validate_name(name: &str, errors: &mut ValidationErrors) {
    if name.trim().is_empty() {
        errors.add("name", "The name field is required.");
    } else if name.chars().count() > 255 {
        errors.add("name", "The name may not be greater than 255 characters.");
    }
}

#[post("")]
pub async fn create_category(
    category_repo: Data<Arc<dyn CategoryRepo>>,
    user_id: web::ReqData<UserId>,
    new_category: web::Json<NewCategory>,
) -> Result<impl Responder, HandlerError> {
    let new_category = new_category.into_inner();

    let mut errors = ValidationErrors::new();
    validate_name(&new_category.name, &mut errors);
    errors.into_result()?;

    let category = category_repo
        .create_category(user_id.into_inner(), new_category)
        .await?;
    Ok(HttpResponse::Created().json(category))
}

#[get("")]
pub async fn get_all_categories(
    category_repo: Data<Arc<dyn CategoryRepo>>,
    user_id: web::ReqData<UserId>,
) -> Result<impl Responder, HandlerError> {
    let categories = category_repo.get_categories(user_id.into_inner()).await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[get("/{category_id}")]
pub async fn get_category(
    category_repo: Data<Arc<dyn CategoryRepo>>,
    user_id: web::ReqData<UserId>,
    category_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let user_id = user_id.into_inner();
    let category = category_repo
        .get_category(user_id, category_id.into_inner())
        .await?;
    // the lookup is already owner-scoped; the policy check is a second fence
    policy::authorize(user_id, &category, Action::View)?;
    Ok(HttpResponse::Ok().json(category))
}

#[put("/{category_id}")]
pub async fn update_category(
    category_repo: Data<Arc<dyn CategoryRepo>>,
    user_id: web::ReqData<UserId>,
    category_id: web::Path<i32>,
    update: web::Json<CategoryUpdate>,
) -> Result<impl Responder, HandlerError> {
    let user_id = user_id.into_inner();
    let category_id = category_id.into_inner();
    let update = update.into_inner();

    let mut errors = ValidationErrors::new();
    if let Some(name) = &update.name {
        validate_name(name, &mut errors);
    }
    errors.into_result()?;

    let category = category_repo.get_category(user_id, category_id).await?;
    policy::authorize(user_id, &category, Action::Update)?;

    let category = category_repo
        .update_category(user_id, category_id, update)
        .await?;
    Ok(HttpResponse::Ok().json(category))
}

#[delete("/{category_id}")]
pub async fn delete_category(
    category_repo: Data<Arc<dyn CategoryRepo>>,
    transaction_repo: Data<Arc<dyn TransactionRepo>>,
    user_id: web::ReqData<UserId>,
    category_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let user_id = user_id.into_inner();
    let category_id = category_id.into_inner();

    let category = category_repo.get_category(user_id, category_id).await?;
    policy::authorize(user_id, &category, Action::Delete)?;

    category_repo.delete_category(user_id, category_id).await?;
    // dependent transactions survive, only the reference is dropped
    transaction_repo.clear_category(category_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
