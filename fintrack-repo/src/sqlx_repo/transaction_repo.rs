use crate::transaction_repo::TransactionRepoError::TransactionNotFound;
use crate::transaction_repo::{
    NewTransaction, Transaction, TransactionRepo, TransactionRepoError, TransactionUpdate,
};
use crate::user_repo::UserId;
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Pool, Postgres};
use tracing::instrument;

const COLUMNS: &str = "id, user_id, type, amount, description, date, category_id";

#[derive(sqlx::FromRow)]
struct TransactionEntry {
    id: i32,
    user_id: UserId,
    #[sqlx(rename = "type")]
    transaction_type: String,
    amount: Decimal,
    description: Option<String>,
    date: NaiveDate,
    category_id: Option<i32>,
}

impl From<TransactionEntry> for Transaction {
    fn from(value: TransactionEntry) -> Self {
        Transaction {
            id: value.id,
            user_id: value.user_id,
            transaction_type: value.transaction_type,
            amount: value.amount,
            description: value.description,
            date: value.date,
            category_id: value.category_id,
        }
    }
}

pub struct SQLxTransactionRepo {
    pool: Pool<Postgres>,
}

impl SQLxTransactionRepo {
    pub fn new(pool: Pool<Postgres>) -> SQLxTransactionRepo {
        SQLxTransactionRepo { pool }
    }

    async fn get_transaction_entry(
        &self,
        transaction_id: i32,
    ) -> Result<Option<TransactionEntry>, TransactionRepoError> {
        let entry: Option<TransactionEntry> = sqlx::query_as(&format!(
            "SELECT {} FROM transactions WHERE id = $1",
            COLUMNS
        ))
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to get transaction {}", transaction_id))?;
        Ok(entry)
    }
}

#[async_trait]
impl TransactionRepo for SQLxTransactionRepo {
    #[instrument(skip(self, new_transaction))]
    async fn create_transaction(
        &self,
        user: UserId,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, TransactionRepoError> {
        let id: i32 = sqlx::query_scalar(
            "INSERT INTO transactions(user_id, type, amount, description, date, category_id) VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(user)
        .bind(&new_transaction.transaction_type)
        .bind(new_transaction.amount)
        .bind(&new_transaction.description)
        .bind(new_transaction.date)
        .bind(new_transaction.category_id)
        .fetch_one(&self.pool)
        .await
        .context("Unable to insert transaction")?;
        Ok(new_transaction.into_transaction(id, user))
    }

    #[instrument(skip(self))]
    async fn get_transactions(
        &self,
        user: UserId,
    ) -> Result<Vec<Transaction>, TransactionRepoError> {
        let entries: Vec<TransactionEntry> = sqlx::query_as(&format!(
            "SELECT {} FROM transactions WHERE user_id = $1 ORDER BY id",
            COLUMNS
        ))
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Unable to get transactions for user {}", user))?;
        Ok(entries.into_iter().map(|entry| entry.into()).collect())
    }

    #[instrument(skip(self))]
    async fn get_transaction(
        &self,
        transaction_id: i32,
    ) -> Result<Transaction, TransactionRepoError> {
        self.get_transaction_entry(transaction_id)
            .await?
            .map(|entry| entry.into())
            .ok_or(TransactionNotFound(transaction_id))
    }

    #[instrument(skip(self, update))]
    async fn update_transaction(
        &self,
        transaction_id: i32,
        update: TransactionUpdate,
    ) -> Result<Transaction, TransactionRepoError> {
        let transaction: Transaction = self
            .get_transaction_entry(transaction_id)
            .await?
            .map(|entry| entry.into())
            .ok_or(TransactionNotFound(transaction_id))?;
        let updated = update.apply(transaction);

        let result = sqlx::query(
            "UPDATE transactions SET type = $1, amount = $2, description = $3, date = $4, category_id = $5 WHERE id = $6",
        )
        .bind(&updated.transaction_type)
        .bind(updated.amount)
        .bind(&updated.description)
        .bind(updated.date)
        .bind(updated.category_id)
        .bind(transaction_id)
        .execute(&self.pool)
        .await
        .with_context(|| format!("Unable to update transaction {}", transaction_id))?;
        if result.rows_affected() == 0 {
            Err(TransactionNotFound(transaction_id))
        } else {
            Ok(updated)
        }
    }

    #[instrument(skip(self))]
    async fn delete_transaction(
        &self,
        transaction_id: i32,
    ) -> Result<Transaction, TransactionRepoError> {
        let entry: Option<TransactionEntry> = sqlx::query_as(&format!(
            "DELETE FROM transactions WHERE id = $1 RETURNING {}",
            COLUMNS
        ))
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to delete transaction {}", transaction_id))?;
        entry
            .map(|entry| entry.into())
            .ok_or(TransactionNotFound(transaction_id))
    }

    #[instrument(skip(self))]
    async fn clear_category(&self, category_id: i32) -> Result<(), TransactionRepoError> {
        sqlx::query("UPDATE transactions SET category_id = NULL WHERE category_id = $1")
            .bind(category_id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Unable to clear category {} from transactions", category_id))?;
        Ok(())
    }
}
