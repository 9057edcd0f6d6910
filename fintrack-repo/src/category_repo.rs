use crate::user_repo::UserId;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[async_trait]
pub trait CategoryRepo: Sync + Send {
    async fn create_category(
        &self,
        user: UserId,
        new_category: NewCategory,
    ) -> Result<Category, CategoryRepoError>;

    async fn get_categories(&self, user: UserId) -> Result<Vec<Category>, CategoryRepoError>;

    /// Lookup is scoped by owner: another user's category id behaves
    /// like a missing one.
    async fn get_category(
        &self,
        user: UserId,
        category_id: i32,
    ) -> Result<Category, CategoryRepoError>;

    async fn update_category(
        &self,
        user: UserId,
        category_id: i32,
        update: CategoryUpdate,
    ) -> Result<Category, CategoryRepoError>;

    async fn delete_category(
        &self,
        user: UserId,
        category_id: i32,
    ) -> Result<Category, CategoryRepoError>;
}

#[derive(Error, Debug)]
pub enum CategoryRepoError {
    #[error("Category with id {0} not found")]
    CategoryNotFound(i32),
    #[error("Category named {0} already exists")]
    CategoryNameTaken(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub icon: Option<String>,
    pub user_id: UserId,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct NewCategory {
    pub name: String,
    pub icon: Option<String>,
}

impl NewCategory {
    pub fn new(name: String, icon: Option<String>) -> NewCategory {
        NewCategory { name, icon }
    }

    pub fn into_category(self, id: i32, user: UserId) -> Category {
        Category {
            id,
            name: self.name,
            icon: self.icon,
            user_id: user,
        }
    }
}

/// Absent fields are left unchanged.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub icon: Option<String>,
}

impl CategoryUpdate {
    pub fn apply(self, category: Category) -> Category {
        Category {
            id: category.id,
            name: self.name.unwrap_or(category.name),
            icon: self.icon.or(category.icon),
            user_id: category.user_id,
        }
    }
}
