//! User record storage.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use userhub_core::{DomainError, DomainResult, Entity, UserId};

use crate::user::{User, UserDraft};

/// Record store abstraction for user records.
///
/// Implementations own id assignment: ids are strictly increasing and never
/// reused, even after the record holding one is removed.
pub trait UserStore: Send + Sync {
    /// All records in ascending id (= creation) order.
    fn list(&self) -> DomainResult<Vec<User>>;
    fn get(&self, id: UserId) -> DomainResult<Option<User>>;
    /// Append a record under the next free id.
    fn insert(&self, draft: UserDraft) -> DomainResult<User>;
    /// Replace the attributes of an existing record; the id is kept.
    ///
    /// Returns `None` (and changes nothing) when no record has that id.
    fn replace(&self, id: UserId, draft: UserDraft) -> DomainResult<Option<User>>;
    /// Returns the removed record, or `None` when no record has that id.
    fn remove(&self, id: UserId) -> DomainResult<Option<User>>;
}

impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    fn list(&self) -> DomainResult<Vec<User>> {
        (**self).list()
    }

    fn get(&self, id: UserId) -> DomainResult<Option<User>> {
        (**self).get(id)
    }

    fn insert(&self, draft: UserDraft) -> DomainResult<User> {
        (**self).insert(draft)
    }

    fn replace(&self, id: UserId, draft: UserDraft) -> DomainResult<Option<User>> {
        (**self).replace(id, draft)
    }

    fn remove(&self, id: UserId) -> DomainResult<Option<User>> {
        (**self).remove(id)
    }
}

#[derive(Debug)]
struct Records {
    users: BTreeMap<UserId, User>,
    next_id: UserId,
}

/// In-memory user store; contents are lost when the process exits.
///
/// All access goes through one `RwLock`: reads share it, mutations are
/// serialized.
#[derive(Debug)]
pub struct InMemoryUserStore {
    inner: RwLock<Records>,
}

impl InMemoryUserStore {
    /// An empty store whose first record will get id 1.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Records {
                users: BTreeMap::new(),
                next_id: UserId::new(1),
            }),
        }
    }

    /// Store pre-populated with the given drafts, assigned ids 1, 2, ...
    pub fn with_users(drafts: impl IntoIterator<Item = UserDraft>) -> Self {
        let mut records = Records {
            users: BTreeMap::new(),
            next_id: UserId::new(1),
        };
        for draft in drafts {
            let user = User::from_draft(records.next_id, draft);
            records.next_id = user.id().next();
            records.users.insert(user.id(), user);
        }
        Self {
            inner: RwLock::new(records),
        }
    }

    /// The two demo accounts the service boots with.
    pub fn seeded() -> Self {
        Self::with_users([
            UserDraft::new("Juan Pérez", "juan@example.com"),
            UserDraft::new("María García", "maria@example.com"),
        ])
    }

    fn read(&self) -> DomainResult<RwLockReadGuard<'_, Records>> {
        self.inner
            .read()
            .map_err(|_| DomainError::storage("user store lock poisoned"))
    }

    fn write(&self) -> DomainResult<RwLockWriteGuard<'_, Records>> {
        self.inner
            .write()
            .map_err(|_| DomainError::storage("user store lock poisoned"))
    }
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore for InMemoryUserStore {
    fn list(&self) -> DomainResult<Vec<User>> {
        Ok(self.read()?.users.values().cloned().collect())
    }

    fn get(&self, id: UserId) -> DomainResult<Option<User>> {
        Ok(self.read()?.users.get(&id).cloned())
    }

    fn insert(&self, draft: UserDraft) -> DomainResult<User> {
        let mut records = self.write()?;
        let id = records.next_id;
        let user = User::from_draft(id, draft);
        records.users.insert(user.id(), user.clone());
        records.next_id = id.next();
        tracing::debug!(user_id = %id, "user inserted");
        Ok(user)
    }

    fn replace(&self, id: UserId, draft: UserDraft) -> DomainResult<Option<User>> {
        let mut records = self.write()?;
        let Some(slot) = records.users.get_mut(&id) else {
            return Ok(None);
        };
        *slot = User::from_draft(id, draft);
        tracing::debug!(user_id = %id, "user replaced");
        Ok(Some(slot.clone()))
    }

    fn remove(&self, id: UserId) -> DomainResult<Option<User>> {
        let removed = self.write()?.users.remove(&id);
        if removed.is_some() {
            tracing::debug!(user_id = %id, "user removed");
        }
        Ok(removed)
    }
}
