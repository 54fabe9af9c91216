//! Membership merge applied by every grant.

use crate::types::{Access, Membership, UserId};

/// Apply `access` for `user` to a collection's member list.
///
/// Entries for `user` are updated in place and keep their position; if there
/// is none, one is appended. Other members are untouched. Applying the same
/// grant twice yields the same list.
pub fn merge_grant(mut members: Vec<Membership>, user: UserId, access: Access) -> Vec<Membership> {
    let mut found = false;
    for member in members.iter_mut().filter(|m| m.user_id == user) {
        member.set_access(access);
        found = true;
    }
    if !found {
        members.push(Membership::with_access(user, access));
    }
    members
}
