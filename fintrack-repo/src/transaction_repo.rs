use crate::user_repo::UserId;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[async_trait]
pub trait TransactionRepo: Sync + Send {
    async fn create_transaction(
        &self,
        user: UserId,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError>;

    async fn get_transactions(&self, user: UserId)
        -> Result<Vec<Transaction>, TransactionRepoError>;

    /// Lookup is not scoped by owner; callers run the ownership policy
    /// against the returned record.
    async fn get_transaction(&self, transaction_id: i32)
        -> Result<Transaction, TransactionRepoError>;

    async fn update_transaction(
        &self,
        transaction_id: i32,
        update: TransactionUpdate,
    ) -> Result<Transaction, TransactionRepoError>;

    async fn delete_transaction(
        &self,
        transaction_id: i32,
    ) -> Result<Transaction, TransactionRepoError>;

    /// Drops the category reference from every transaction pointing at
    /// `category_id`. The transactions themselves are kept.
    async fn clear_category(&self, category_id: i32) -> Result<(), TransactionRepoError>;
}

#[derive(Error, Debug)]
pub enum TransactionRepoError {
    #[error("Transaction with id {0} not found")]
    TransactionNotFound(i32),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Transaction {
    pub id: i32,
    pub user_id: UserId,
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub category_id: Option<i32>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewTransaction {
    #[serde(rename = "type")]
    pub transaction_type: String,
    pub amount: Decimal,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub category_id: Option<i32>,
}

impl NewTransaction {
    pub fn new(
        transaction_type: String,
        amount: Decimal,
        description: Option<String>,
        date: NaiveDate,
        category_id: Option<i32>,
    ) -> NewTransaction {
        NewTransaction {
            transaction_type,
            amount,
            description,
            date,
            category_id,
        }
    }

    pub fn into_transaction(self, id: i32, user: UserId) -> Transaction {
        Transaction {
            id,
            user_id: user,
            transaction_type: self.transaction_type,
            amount: self.amount,
            description: self.description,
            date: self.date,
            category_id: self.category_id,
        }
    }
}

/// Absent fields are left unchanged.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct TransactionUpdate {
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub amount: Option<Decimal>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub category_id: Option<i32>,
}

impl TransactionUpdate {
    pub fn apply(self, transaction: Transaction) -> Transaction {
        Transaction {
            id: transaction.id,
            user_id: transaction.user_id,
            transaction_type: self.transaction_type.unwrap_or(transaction.transaction_type),
            amount: self.amount.unwrap_or(transaction.amount),
            description: self.description.or(transaction.description),
            date: self.date.unwrap_or(transaction.date),
            category_id: self.category_id.or(transaction.category_id),
        }
    }
}
