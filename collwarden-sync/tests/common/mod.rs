//! In-memory stand-in for the bookmark service.

#![allow(dead_code)]

use std::collections::BTreeSet;
use std::sync::Mutex;

use collwarden_core::{
    Collection, CollectionId, CollectionSource, Membership, RemoteError, RosterSource, UserId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListUsers,
    ListCollections,
    Get(CollectionId),
    Put(CollectionId),
}

#[derive(Debug, Default)]
struct Inner {
    users: BTreeSet<UserId>,
    collections: Vec<Collection>,
    calls: Vec<Call>,
    successful_puts: usize,
    fail_put_at: Option<usize>,
    roster_down: bool,
}

#[derive(Debug, Default)]
pub struct FakeRemote {
    inner: Mutex<Inner>,
}

impl FakeRemote {
    pub fn new(users: &[i64], collections: Vec<Collection>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                users: users.iter().copied().map(UserId).collect(),
                collections,
                ..Inner::default()
            }),
        }
    }

    /// Fail the `n`th (1-based) PUT from now on with a 503.
    pub fn fail_put_at(&self, n: usize) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_put_at = Some(inner.successful_puts + n);
    }

    pub fn clear_failures(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_put_at = None;
        inner.roster_down = false;
    }

    pub fn set_roster_down(&self, down: bool) {
        self.inner.lock().unwrap().roster_down = down;
    }

    pub fn add_user(&self, id: i64) {
        self.inner.lock().unwrap().users.insert(UserId(id));
    }

    pub fn remove_user(&self, id: i64) {
        self.inner.lock().unwrap().users.remove(&UserId(id));
    }

    pub fn remove_collection(&self, id: i64) {
        self.inner
            .lock()
            .unwrap()
            .collections
            .retain(|c| c.id != CollectionId(id));
    }

    pub fn collection(&self, id: i64) -> Collection {
        self.inner
            .lock()
            .unwrap()
            .collections
            .iter()
            .find(|c| c.id == CollectionId(id))
            .cloned()
            .expect("collection present")
    }

    pub fn members(&self, id: i64) -> Vec<Membership> {
        self.collection(id).members
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn puts(&self) -> Vec<CollectionId> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Put(id) => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn reset_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }
}

impl RosterSource for FakeRemote {
    fn list_user_ids(&self) -> Result<BTreeSet<UserId>, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::ListUsers);
        if inner.roster_down {
            return Err(RemoteError::Unavailable {
                op: "GET /users".into(),
                detail: "connection refused".into(),
            });
        }
        Ok(inner.users.clone())
    }
}

impl CollectionSource for FakeRemote {
    fn list_collections(&self) -> Result<Vec<Collection>, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::ListCollections);
        Ok(inner.collections.clone())
    }

    fn get_collection(&self, id: CollectionId) -> Result<Collection, RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Get(id));
        inner
            .collections
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(RemoteError::NotFound {
                op: format!("GET /collections/{id}"),
                collection: id,
            })
    }

    fn replace_collection(&self, collection: &Collection) -> Result<(), RemoteError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Put(collection.id));
        if inner.fail_put_at == Some(inner.successful_puts + 1) {
            return Err(RemoteError::Unavailable {
                op: format!("PUT /collections/{}", collection.id),
                detail: "HTTP 503: maintenance".into(),
            });
        }
        let Some(slot) = inner.collections.iter_mut().find(|c| c.id == collection.id) else {
            return Err(RemoteError::NotFound {
                op: format!("PUT /collections/{}", collection.id),
                collection: collection.id,
            });
        };
        *slot = collection.clone();
        inner.successful_puts += 1;
        Ok(())
    }
}

pub fn collection(id: i64, parent: Option<i64>) -> Collection {
    Collection::new(CollectionId(id), format!("collection-{id}"), parent.map(CollectionId))
}

pub fn member(user: i64, flag: bool) -> Membership {
    Membership {
        user_id: UserId(user),
        can_create: flag,
        can_update: flag,
        can_delete: flag,
    }
}
