use crate::category_repo::CategoryRepoError::{CategoryNameTaken, CategoryNotFound};
use crate::category_repo::{
    Category, CategoryRepo, CategoryRepoError, CategoryUpdate, NewCategory,
};
use crate::sqlx_repo::is_unique_violation;
use crate::user_repo::UserId;
use anyhow::Context;
use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use tracing::instrument;

#[derive(sqlx::FromRow)]
struct CategoryEntry {
    id: i32,
    name: String,
    icon: Option<String>,
    user_id: UserId,
}

impl From<CategoryEntry> for Category {
    fn from(value: CategoryEntry) -> Self {
        Category {
            id: value.id,
            name: value.name,
            icon: value.icon,
            user_id: value.user_id,
        }
    }
}

pub struct SQLxCategoryRepo {
    pool: Pool<Postgres>,
}

impl SQLxCategoryRepo {
    pub fn new(pool: Pool<Postgres>) -> SQLxCategoryRepo {
        SQLxCategoryRepo { pool }
    }
}

#[async_trait]
impl CategoryRepo for SQLxCategoryRepo {
    #[instrument(skip(self, new_category))]
    async fn create_category(
        &self,
        user: UserId,
        new_category: NewCategory,
    ) -> Result<Category, CategoryRepoError> {
        let id: Option<i32> = sqlx::query_scalar(
            "INSERT INTO categories(name, icon, user_id) VALUES ($1, $2, $3) ON CONFLICT (user_id, name) DO NOTHING RETURNING id",
        )
        .bind(&new_category.name)
        .bind(&new_category.icon)
        .bind(user)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to create category for user {}", user))?;
        match id {
            Some(id) => Ok(new_category.into_category(id, user)),
            None => Err(CategoryNameTaken(new_category.name)),
        }
    }

    #[instrument(skip(self))]
    async fn get_categories(&self, user: UserId) -> Result<Vec<Category>, CategoryRepoError> {
        let entries: Vec<CategoryEntry> = sqlx::query_as(
            "SELECT id, name, icon, user_id FROM categories WHERE user_id = $1 ORDER BY id",
        )
        .bind(user)
        .fetch_all(&self.pool)
        .await
        .with_context(|| format!("Unable to get categories for user {}", user))?;
        Ok(entries.into_iter().map(|entry| entry.into()).collect())
    }

    #[instrument(skip(self))]
    async fn get_category(
        &self,
        user: UserId,
        category_id: i32,
    ) -> Result<Category, CategoryRepoError> {
        let entry: Option<CategoryEntry> = sqlx::query_as(
            "SELECT id, name, icon, user_id FROM categories WHERE id = $1 AND user_id = $2",
        )
        .bind(category_id)
        .bind(user)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to get category {}", category_id))?;
        entry
            .map(|entry| entry.into())
            .ok_or(CategoryNotFound(category_id))
    }

    #[instrument(skip(self, update))]
    async fn update_category(
        &self,
        user: UserId,
        category_id: i32,
        update: CategoryUpdate,
    ) -> Result<Category, CategoryRepoError> {
        let category = self.get_category(user, category_id).await?;
        let updated = update.apply(category);

        let result =
            sqlx::query("UPDATE categories SET name = $1, icon = $2 WHERE id = $3 AND user_id = $4")
                .bind(&updated.name)
                .bind(&updated.icon)
                .bind(category_id)
                .bind(user)
                .execute(&self.pool)
                .await;
        match result {
            Ok(r) if r.rows_affected() == 0 => Err(CategoryNotFound(category_id)),
            Ok(_) => Ok(updated),
            Err(e) if is_unique_violation(&e) => Err(CategoryNameTaken(updated.name)),
            Err(e) => Err(CategoryRepoError::Other(
                anyhow::Error::new(e).context(format!("Unable to update category {}", category_id)),
            )),
        }
    }

    #[instrument(skip(self))]
    async fn delete_category(
        &self,
        user: UserId,
        category_id: i32,
    ) -> Result<Category, CategoryRepoError> {
        let entry: Option<CategoryEntry> = sqlx::query_as(
            "DELETE FROM categories WHERE id = $1 AND user_id = $2 RETURNING id, name, icon, user_id",
        )
        .bind(category_id)
        .bind(user)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Unable to delete category {}", category_id))?;
        entry
            .map(|entry| entry.into())
            .ok_or(CategoryNotFound(category_id))
    }
}
