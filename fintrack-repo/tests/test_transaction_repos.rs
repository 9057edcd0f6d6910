mod utils;

use fintrack_repo::category_repo::{CategoryRepo, NewCategory};
use fintrack_repo::transaction_repo::{TransactionRepo, TransactionRepoError, TransactionUpdate};
use fintrack_repo::user_repo::UserRepo;
use rstest::rstest;
use rust_decimal::Decimal;
use std::str::FromStr;
use std::sync::Arc;
use utils::create_test_user;
use utils::generator::{new_transaction, new_transaction_with_category};
use utils::repos;

#[rstest]
#[actix_rt::test]
async fn test_create_and_get_transaction(
    repos: (
        Arc<dyn UserRepo>,
        Arc<dyn CategoryRepo>,
        Arc<dyn TransactionRepo>,
    ),
) {
    let (user_repo, _category_repo, transaction_repo) = repos;
    let user = create_test_user(&user_repo).await;

    let new_transaction = new_transaction();
    let transaction = transaction_repo
        .create_transaction(user.id, new_transaction.clone())
        .await
        .unwrap();
    assert_eq!(transaction.user_id, user.id);
    assert_eq!(transaction.transaction_type, new_transaction.transaction_type);
    assert_eq!(transaction.amount, new_transaction.amount);
    assert_eq!(transaction.description, new_transaction.description);
    assert_eq!(transaction.date, new_transaction.date);

    let stored = transaction_repo
        .get_transaction(transaction.id)
        .await
        .unwrap();
    assert_eq!(transaction, stored);
}

#[rstest]
#[actix_rt::test]
async fn test_get_invalid_transaction(
    repos: (
        Arc<dyn UserRepo>,
        Arc<dyn CategoryRepo>,
        Arc<dyn TransactionRepo>,
    ),
) {
    let (_user_repo, _category_repo, transaction_repo) = repos;

    let result = transaction_repo.get_transaction(1234).await;
    assert!(matches!(
        result,
        Err(TransactionRepoError::TransactionNotFound(1234))
    ));
}

#[rstest]
#[actix_rt::test]
async fn test_get_transactions_is_owner_scoped(
    repos: (
        Arc<dyn UserRepo>,
        Arc<dyn CategoryRepo>,
        Arc<dyn TransactionRepo>,
    ),
) {
    let (user_repo, _category_repo, transaction_repo) = repos;
    let user1 = create_test_user(&user_repo).await;
    let user2 = create_test_user(&user_repo).await;

    let mine = transaction_repo
        .create_transaction(user1.id, new_transaction())
        .await
        .unwrap();
    transaction_repo
        .create_transaction(user2.id, new_transaction())
        .await
        .unwrap();

    let transactions = transaction_repo.get_transactions(user1.id).await.unwrap();
    assert_eq!(transactions, vec![mine]);
}

#[rstest]
#[actix_rt::test]
async fn test_partial_update(
    repos: (
        Arc<dyn UserRepo>,
        Arc<dyn CategoryRepo>,
        Arc<dyn TransactionRepo>,
    ),
) {
    let (user_repo, _category_repo, transaction_repo) = repos;
    let user = create_test_user(&user_repo).await;

    let transaction = transaction_repo
        .create_transaction(user.id, new_transaction())
        .await
        .unwrap();

    let updated = transaction_repo
        .update_transaction(
            transaction.id,
            TransactionUpdate {
                amount: Some(Decimal::from_str("55.55").unwrap()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.id, transaction.id);
    assert_eq!(updated.amount, Decimal::from_str("55.55").unwrap());
    // everything else carries over
    assert_eq!(updated.transaction_type, transaction.transaction_type);
    assert_eq!(updated.description, transaction.description);
    assert_eq!(updated.date, transaction.date);
    assert_eq!(updated.user_id, transaction.user_id);

    let result = transaction_repo
        .update_transaction(1234, TransactionUpdate::default())
        .await;
    assert!(matches!(
        result,
        Err(TransactionRepoError::TransactionNotFound(1234))
    ));
}

#[rstest]
#[actix_rt::test]
async fn test_delete_transaction(
    repos: (
        Arc<dyn UserRepo>,
        Arc<dyn CategoryRepo>,
        Arc<dyn TransactionRepo>,
    ),
) {
    let (user_repo, _category_repo, transaction_repo) = repos;
    let user = create_test_user(&user_repo).await;

    let transaction = transaction_repo
        .create_transaction(user.id, new_transaction())
        .await
        .unwrap();

    let deleted = transaction_repo
        .delete_transaction(transaction.id)
        .await
        .unwrap();
    assert_eq!(deleted, transaction);

    let result = transaction_repo.delete_transaction(transaction.id).await;
    assert!(matches!(
        result,
        Err(TransactionRepoError::TransactionNotFound(_))
    ));
}

#[rstest]
#[actix_rt::test]
async fn test_clear_category(
    repos: (
        Arc<dyn UserRepo>,
        Arc<dyn CategoryRepo>,
        Arc<dyn TransactionRepo>,
    ),
) {
    let (user_repo, category_repo, transaction_repo) = repos;
    let user = create_test_user(&user_repo).await;

    let category = category_repo
        .create_category(user.id, NewCategory::new("Bills".to_string(), None))
        .await
        .unwrap();
    let other_category = category_repo
        .create_category(user.id, NewCategory::new("Fun".to_string(), None))
        .await
        .unwrap();

    let tagged = transaction_repo
        .create_transaction(user.id, new_transaction_with_category(Some(category.id)))
        .await
        .unwrap();
    let other = transaction_repo
        .create_transaction(
            user.id,
            new_transaction_with_category(Some(other_category.id)),
        )
        .await
        .unwrap();

    transaction_repo.clear_category(category.id).await.unwrap();

    let cleared = transaction_repo.get_transaction(tagged.id).await.unwrap();
    assert_eq!(cleared.category_id, None);

    // unrelated references are untouched
    let untouched = transaction_repo.get_transaction(other.id).await.unwrap();
    assert_eq!(untouched.category_id, Some(other_category.id));
}
