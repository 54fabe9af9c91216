//! Descendant resolution over the flat collection list.

use std::collections::{HashMap, HashSet};

use crate::types::{Collection, CollectionId};

/// Every collection reachable from `root` through `parentId` links, excluding
/// `root` itself.
///
/// Children are visited depth-first in the order they appear in
/// `collections`, so the result is deterministic for a given listing.
/// Already-visited ids are skipped, which keeps the walk finite even when the
/// service hands back cyclic parent links.
pub fn descendants_of(collections: &[Collection], root: CollectionId) -> Vec<CollectionId> {
    let mut children: HashMap<CollectionId, Vec<CollectionId>> = HashMap::new();
    for collection in collections {
        if let Some(parent) = collection.parent_id {
            children.entry(parent).or_default().push(collection.id);
        }
    }

    let mut visited = HashSet::from([root]);
    let mut descendants = Vec::new();
    walk(&children, root, &mut visited, &mut descendants);
    descendants
}

fn walk(
    children: &HashMap<CollectionId, Vec<CollectionId>>,
    node: CollectionId,
    visited: &mut HashSet<CollectionId>,
    out: &mut Vec<CollectionId>,
) {
    let Some(kids) = children.get(&node) else {
        return;
    };
    for &child in kids {
        if !visited.insert(child) {
            continue;
        }
        out.push(child);
        walk(children, child, visited, out);
    }
}
