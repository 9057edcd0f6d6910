use crate::error::{HandlerError, ValidationErrors};
use crate::policy;
use crate::policy::Action;
use crate::user::UserId;
use actix_web::web::Data;
use actix_web::{web, HttpResponse, Responder};
use fintrack_repo::category_repo::{CategoryRepo, CategoryRepoError};
use fintrack_repo::transaction_repo::{NewTransaction, TransactionRepo, TransactionUpdate};
use std::sync::Arc;

/// A category reference must point at one of the caller's own
/// categories; a foreign id is indistinguishable from a missing one.
async fn check_category(
    category_repo: &Arc<dyn CategoryRepo>,
    user: UserId,
    category_id: i32,
    errors: &mut ValidationErrors,
) -> Result<(), HandlerError> {
    match category_repo.get_category(user, category_id).await {
        Ok(_) => Ok(()),
        Err(CategoryRepoError::CategoryNotFound(_)) => {
            errors.add("category_id", "The selected category id is invalid.");
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

#[post("")]
pub async fn create_transaction(
    transaction_repo: Data<Arc<dyn TransactionRepo>>,
    category_repo: Data<Arc<dyn CategoryRepo>>,
    user_id: web::ReqData<UserId>,
    new_transaction: web::Json<NewTransaction>,
) -> Result<impl Responder, HandlerError> {
    let user_id = user_id.into_inner();
    let mut new_transaction = new_transaction.into_inner();

    let mut errors = ValidationErrors::new();
    if new_transaction.transaction_type.trim().is_empty() {
        errors.add("type", "The type field is required.");
    }
    if let Some(category_id) = new_transaction.category_id {
        check_category(category_repo.get_ref(), user_id, category_id, &mut errors).await?;
    }
    errors.into_result()?;

    // amounts are stored at two-decimal precision
    new_transaction.amount = new_transaction.amount.round_dp(2);
    let transaction = transaction_repo
        .create_transaction(user_id, new_transaction)
        .await?;
    Ok(HttpResponse::Created().json(transaction))
}

#[get("")]
pub async fn get_all_transactions(
    transaction_repo: Data<Arc<dyn TransactionRepo>>,
    user_id: web::ReqData<UserId>,
) -> Result<impl Responder, HandlerError> {
    let transactions = transaction_repo
        .get_transactions(user_id.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(transactions))
}

#[put("/{transaction_id}")]
pub async fn update_transaction(
    transaction_repo: Data<Arc<dyn TransactionRepo>>,
    category_repo: Data<Arc<dyn CategoryRepo>>,
    user_id: web::ReqData<UserId>,
    transaction_id: web::Path<i32>,
    update: web::Json<TransactionUpdate>,
) -> Result<impl Responder, HandlerError> {
    let user_id = user_id.into_inner();
    let transaction_id = transaction_id.into_inner();
    let mut update = update.into_inner();

    // resolved by id alone; a missing id is a plain 404, a foreign
    // owner is a 403 from the policy
    let transaction = transaction_repo.get_transaction(transaction_id).await?;
    policy::authorize(user_id, &transaction, Action::Update)?;

    let mut errors = ValidationErrors::new();
    if let Some(transaction_type) = &update.transaction_type {
        if transaction_type.trim().is_empty() {
            errors.add("type", "The type field is required.");
        }
    }
    if let Some(category_id) = update.category_id {
        check_category(category_repo.get_ref(), user_id, category_id, &mut errors).await?;
    }
    errors.into_result()?;

    if let Some(amount) = update.amount {
        update.amount = Some(amount.round_dp(2));
    }
    let transaction = transaction_repo
        .update_transaction(transaction_id, update)
        .await?;
    Ok(HttpResponse::Ok().json(transaction))
}

#[delete("/{transaction_id}")]
pub async fn delete_transaction(
    transaction_repo: Data<Arc<dyn TransactionRepo>>,
    user_id: web::ReqData<UserId>,
    transaction_id: web::Path<i32>,
) -> Result<impl Responder, HandlerError> {
    let user_id = user_id.into_inner();
    let transaction_id = transaction_id.into_inner();

    let transaction = transaction_repo.get_transaction(transaction_id).await?;
    policy::authorize(user_id, &transaction, Action::Delete)?;

    transaction_repo.delete_transaction(transaction_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
