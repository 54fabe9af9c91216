//! Domain types for the bookmark manager's users and collections.
//!
//! Field names follow the remote service's camelCase JSON. Unknown fields are
//! ignored on read, which is what strips the extra member data the service
//! attaches before a record is written back.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Identifier of a user account, assigned by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for UserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Identifier of a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(pub i64);

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for CollectionId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Every user the agent has already processed.
pub type KnownUsers = BTreeSet<UserId>;

// ---------------------------------------------------------------------------
// Access profile
// ---------------------------------------------------------------------------

/// Permission level granted on a single collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Create, update and delete.
    Full,
    /// None of the three flags.
    ReadOnly,
}

impl Access {
    /// Value written to each of `canCreate`, `canUpdate` and `canDelete`.
    pub fn flag(self) -> bool {
        matches!(self, Access::Full)
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::Full => write!(f, "full"),
            Access::ReadOnly => write!(f, "read-only"),
        }
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Per-user permission triple scoped to one collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub user_id: UserId,
    pub can_create: bool,
    pub can_update: bool,
    pub can_delete: bool,
}

impl Membership {
    pub fn with_access(user_id: UserId, access: Access) -> Self {
        let flag = access.flag();
        Self {
            user_id,
            can_create: flag,
            can_update: flag,
            can_delete: flag,
        }
    }

    pub fn set_access(&mut self, access: Access) {
        let flag = access.flag();
        self.can_create = flag;
        self.can_update = flag;
        self.can_delete = flag;
    }
}

/// A collection record as read from and written back to the remote service.
///
/// The service has no partial update for members, so every scalar field here
/// is resent unchanged on write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub icon_weight: Option<String>,
    #[serde(default)]
    pub parent_id: Option<CollectionId>,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub members: Vec<Membership>,
}

impl Collection {
    /// Bare record with no members, mostly useful for building fixtures.
    pub fn new(id: CollectionId, name: impl Into<String>, parent_id: Option<CollectionId>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            color: None,
            icon: None,
            icon_weight: None,
            parent_id,
            is_public: false,
            members: Vec::new(),
        }
    }
}
