use crate::user_repo::UserRepoError::{EmailTaken, UserEmailNotFound, UserNotFound};
use crate::user_repo::{NewUser, User, UserId, UserRepo, UserRepoError, UserUpdate};
use anyhow::anyhow;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

struct State {
    users: HashMap<UserId, User>,
    next_id: UserId,
}

pub struct MemUserRepo {
    state: RwLock<State>,
}

impl MemUserRepo {
    pub fn new() -> MemUserRepo {
        let state = State {
            users: HashMap::new(),
            next_id: 1,
        };
        MemUserRepo {
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
impl UserRepo for MemUserRepo {
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserRepoError> {
        let mut write_guard = self.write_lock()?;

        if write_guard.users.values().any(|u| u.email == new_user.email) {
            return Err(EmailTaken(new_user.email));
        }

        let id = write_guard.next_id;
        write_guard.next_id += 1;

        let user = new_user.into_user(id);
        write_guard.users.insert(id, user.clone());
        Ok(user)
    }

    async fn get_user(&self, user_id: UserId) -> Result<User, UserRepoError> {
        let read_guard = self.read_lock()?;

        read_guard
            .users
            .get(&user_id)
            .cloned()
            .ok_or(UserNotFound(user_id))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User, UserRepoError> {
        let read_guard = self.read_lock()?;

        read_guard
            .users
            .values()
            .find(|u| u.email == email)
            .cloned()
            .ok_or_else(|| UserEmailNotFound(email.to_owned()))
    }

    async fn get_all_users(&self) -> Result<Vec<User>, UserRepoError> {
        let read_guard = self.read_lock()?;

        let mut users: Vec<User> = read_guard.users.values().cloned().collect();
        users.sort_by_key(|u| u.id);
        Ok(users)
    }

    async fn update_user(
        &self,
        user_id: UserId,
        update: UserUpdate,
    ) -> Result<User, UserRepoError> {
        let mut write_guard = self.write_lock()?;

        if let Some(email) = &update.email {
            if write_guard
                .users
                .values()
                .any(|u| u.id != user_id && &u.email == email)
            {
                return Err(EmailTaken(email.clone()));
            }
        }

        let user = write_guard
            .users
            .get(&user_id)
            .cloned()
            .ok_or(UserNotFound(user_id))?;
        let updated = update.apply(user);
        write_guard.users.insert(user_id, updated.clone());
        Ok(updated)
    }

    async fn delete_user(&self, user_id: UserId) -> Result<(), UserRepoError> {
        let mut write_guard = self.write_lock()?;

        if write_guard.users.remove(&user_id).is_some() {
            Ok(())
        } else {
            Err(UserNotFound(user_id))
        }
    }
}
