mod category_repo;
mod transaction_repo;
mod user_repo;

use crate::category_repo::CategoryRepo;
use crate::transaction_repo::TransactionRepo;
use crate::user_repo::UserRepo;
use crate::HealthCheck;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::Arc;

pub async fn create_repos(
    database_url: String,
    max_pool_size: u32,
) -> (
    Arc<dyn UserRepo>,
    Arc<dyn CategoryRepo>,
    Arc<dyn TransactionRepo>,
    Arc<dyn HealthCheck>,
) {
    let pool = PgPoolOptions::new()
        .max_connections(max_pool_size)
        .connect(&database_url)
        .await
        .unwrap();

    let user_repo = user_repo::SQLxUserRepo::new(pool.clone());
    let category_repo = category_repo::SQLxCategoryRepo::new(pool.clone());
    let transaction_repo = transaction_repo::SQLxTransactionRepo::new(pool.clone());
    let health_check = SQLxHealthCheck { pool };

    (
        Arc::new(user_repo),
        Arc::new(category_repo),
        Arc::new(transaction_repo),
        Arc::new(health_check),
    )
}

struct SQLxHealthCheck {
    pool: Pool<Postgres>,
}

#[async_trait]
impl HealthCheck for SQLxHealthCheck {
    async fn check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Database(db_err) => {
            matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation)
        }
        _ => false,
    }
}
