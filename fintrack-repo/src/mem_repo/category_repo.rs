use crate::category_repo::CategoryRepoError::{CategoryNameTaken, CategoryNotFound};
use crate::category_repo::{
    Category, CategoryRepo, CategoryRepoError, CategoryUpdate, NewCategory,
};
use crate::user_repo::UserId;
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct State {
    categories: HashMap<i32, Category>,
    next_id: i32,
}

impl State {
    fn name_taken(&self, user: UserId, name: &str, excluding: Option<i32>) -> bool {
        self.categories
            .values()
            .any(|c| c.user_id == user && c.name == name && Some(c.id) != excluding)
    }
}

pub struct MemCategoryRepo {
    state: RwLock<State>,
}

impl MemCategoryRepo {
    pub fn new() -> MemCategoryRepo {
        let state = State {
            categories: HashMap::new(),
            next_id: 1,
        };
        MemCategoryRepo {
            state: RwLock::new(state),
        }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<State>, anyhow::Error> {
        self.state
            .read()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<State>, anyhow::Error> {
        self.state
            .write()
            .map_err(|_| anyhow!("Unable to acquire lock"))
    }
}

#[async_trait]
impl CategoryRepo for MemCategoryRepo {
    async fn create_category(
        &self,
        user: UserId,
        new_category: NewCategory,
    ) -> Result<Category, CategoryRepoError> {
        let mut write_guard = self.write_lock()?;

        if write_guard.name_taken(user, &new_category.name, None) {
            return Err(CategoryNameTaken(new_category.name));
        }

        let id = write_guard.next_id;
        write_guard.next_id += 1;

        let category = new_category.into_category(id, user);
        write_guard.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn get_categories(&self, user: UserId) -> Result<Vec<Category>, CategoryRepoError> {
        let read_guard = self.read_lock()?;

        let mut categories: Vec<Category> = read_guard
            .categories
            .values()
            .filter(|c| c.user_id == user)
            .cloned()
            .collect();
        categories.sort_by_key(|c| c.id);
        Ok(categories)
    }

    async fn get_category(
        &self,
        user: UserId,
        category_id: i32,
    ) -> Result<Category, CategoryRepoError> {
        let read_guard = self.read_lock()?;

        read_guard
            .categories
            .get(&category_id)
            .filter(|c| c.user_id == user)
            .cloned()
            .ok_or(CategoryNotFound(category_id))
    }

    async fn update_category(
        &self,
        user: UserId,
        category_id: i32,
        update: CategoryUpdate,
    ) -> Result<Category, CategoryRepoError> {
        let mut write_guard = self.write_lock()?;

        if let Some(name) = &update.name {
            if write_guard.name_taken(user, name, Some(category_id)) {
                return Err(CategoryNameTaken(name.clone()));
            }
        }

        let category = write_guard
            .categories
            .get(&category_id)
            .filter(|c| c.user_id == user)
            .cloned()
            .ok_or(CategoryNotFound(category_id))?;
        let updated = update.apply(category);
        write_guard.categories.insert(category_id, updated.clone());
        Ok(updated)
    }

    async fn delete_category(
        &self,
        user: UserId,
        category_id: i32,
    ) -> Result<Category, CategoryRepoError> {
        let mut write_guard = self.write_lock()?;

        match write_guard.categories.get(&category_id) {
            Some(c) if c.user_id == user => {}
            _ => return Err(CategoryNotFound(category_id)),
        }
        Ok(write_guard
            .categories
            .remove(&category_id)
            .expect("presence checked above"))
    }
}
