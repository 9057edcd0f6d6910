//! Row-ownership checks for categories and transactions.
//!
//! A pure predicate: a record may be viewed, updated or deleted only by
//! the user whose id it carries. Admin routes are gated by a separate
//! role check and never consult this policy.

use crate::error::HandlerError;
use crate::user::UserId;
use fintrack_repo::category_repo::Category;
use fintrack_repo::transaction_repo::Transaction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    View,
    Update,
    Delete,
}

pub trait Owned {
    fn owner_id(&self) -> UserId;
}

impl Owned for Category {
    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

impl Owned for Transaction {
    fn owner_id(&self) -> UserId {
        self.user_id
    }
}

/// The rule is the same for every action. Callers resolve the record
/// first, so a missing id surfaces as `NotFound` before this runs.
pub fn allows<R: Owned>(user: UserId, resource: &R, _action: Action) -> bool {
    user == resource.owner_id()
}

pub fn authorize<R: Owned>(user: UserId, resource: &R, action: Action) -> Result<(), HandlerError> {
    if allows(user, resource, action) {
        Ok(())
    } else {
        Err(HandlerError::Forbidden)
    }
}
