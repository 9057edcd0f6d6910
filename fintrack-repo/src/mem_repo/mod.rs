use crate::category_repo::CategoryRepo;
use crate::transaction_repo::TransactionRepo;
use crate::user_repo::UserRepo;
use std::sync::Arc;

mod category_repo;
mod transaction_repo;
mod user_repo;

pub fn create_repos() -> (
    Arc<dyn UserRepo>,
    Arc<dyn CategoryRepo>,
    Arc<dyn TransactionRepo>,
) {
    let user_repo = user_repo::MemUserRepo::new();
    let category_repo = category_repo::MemCategoryRepo::new();
    let transaction_repo = transaction_repo::MemTransactionRepo::new();

    (
        Arc::new(user_repo),
        Arc::new(category_repo),
        Arc::new(transaction_repo),
    )
}
