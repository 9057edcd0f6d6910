use std::sync::Arc;

use fintrack_lib::user::UserId;
use fintrack_repo::category_repo::CategoryRepo;
use fintrack_repo::transaction_repo::TransactionRepo;
use fintrack_repo::user_repo::{NewUser, Role, UserRepo};
use rstest::*;
use tracing::info;
use tracing::Level;
use uuid::Uuid;

pub mod mock;

pub struct TestUser {
    pub user_id: UserId,
    pub email: String,
    pub password: String,
    repo: Arc<dyn UserRepo>,
}

impl TestUser {
    pub async fn new(user_repo: Arc<dyn UserRepo>) -> TestUser {
        Self::with_role(user_repo, Role::User).await
    }

    pub async fn with_role(user_repo: Arc<dyn UserRepo>, role: Role) -> TestUser {
        let email = format!("test-{}@example.com", Uuid::new_v4());
        let password = "password123".to_string();
        let user = user_repo
            .create_user(NewUser {
                name: "Test User".to_string(),
                email: email.clone(),
                password_hash: fintrack_lib::auth::password::encode_password(password.clone())
                    .unwrap(),
                role,
            })
            .await
            .unwrap();
        info!(user_id = user.id, "Created user");
        TestUser {
            user_id: user.id,
            email,
            password,
            repo: user_repo,
        }
    }

    pub async fn delete(&self) {
        self.repo.delete_user(self.user_id).await.unwrap()
    }
}

#[fixture]
#[once]
pub fn tracing_setup() -> () {
    tracing_subscriber::fmt()
        .pretty()
        .with_max_level(Level::DEBUG)
        .init();
    info!("tracing initialized");
}

#[fixture]
pub fn repos() -> (
    Arc<dyn UserRepo>,
    Arc<dyn CategoryRepo>,
    Arc<dyn TransactionRepo>,
) {
    fintrack_repo::mem_repo::create_repos()
}
