use fintrack_repo::category_repo::CategoryRepo;
use fintrack_repo::transaction_repo::TransactionRepo;
use fintrack_repo::user_repo::{NewUser, Role, User, UserRepo};
use rstest::fixture;
use std::sync::Arc;
use uuid::Uuid;

pub mod generator;

#[fixture]
pub fn repos() -> (
    Arc<dyn UserRepo>,
    Arc<dyn CategoryRepo>,
    Arc<dyn TransactionRepo>,
) {
    fintrack_repo::mem_repo::create_repos()
}

pub async fn create_test_user(user_repo: &Arc<dyn UserRepo>) -> User {
    user_repo
        .create_user(NewUser {
            name: "Test User".to_string(),
            email: format!("test-{}@example.com", Uuid::new_v4()),
            password_hash: "not a real hash".to_string(),
            role: Role::User,
        })
        .await
        .unwrap()
}
