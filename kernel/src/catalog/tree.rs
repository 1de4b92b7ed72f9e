// Catalog Tree
//
// Unbalanced binary search tree of catalog entries keyed by food id.
// Nodes live in an arena and refer to their children by handle; freed
// slots are recycled through a free list.

use std::cmp::Ordering;

use super::{CatalogEntry, FoodId};

/// Handle to a slot in the node arena.
pub(crate) type NodeId = usize;

#[derive(Debug, Clone)]
struct Node {
    entry: CatalogEntry,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// Which child link of a parent leads to a node.
#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

#[derive(Debug, Default)]
pub(crate) struct CatalogTree {
    slots: Vec<Option<Node>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    len: usize,
}

impl CatalogTree {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Insert an entry at its key position.
    ///
    /// Returns `false` and leaves the tree untouched when the key exists.
    pub(crate) fn insert(&mut self, entry: CatalogEntry) -> bool {
        let Some(mut current) = self.root else {
            self.root = Some(self.alloc(entry));
            self.len += 1;
            return true;
        };

        loop {
            let node = self.node(current);
            let goes_left = match entry.id.cmp(&node.entry.id) {
                Ordering::Less => true,
                Ordering::Greater => false,
                Ordering::Equal => return false,
            };
            let next = if goes_left { node.left } else { node.right };

            match next {
                Some(child) => current = child,
                None => {
                    let child = self.alloc(entry);
                    let parent = self.node_mut(current);
                    if goes_left {
                        parent.left = Some(child);
                    } else {
                        parent.right = Some(child);
                    }
                    self.len += 1;
                    return true;
                }
            }
        }
    }

    pub(crate) fn get(&self, id: FoodId) -> Option<&CatalogEntry> {
        self.locate(id).map(|handle| &self.node(handle).entry)
    }

    pub(crate) fn get_mut(&mut self, id: FoodId) -> Option<&mut CatalogEntry> {
        let handle = self.locate(id)?;
        Some(&mut self.node_mut(handle).entry)
    }

    /// Entries in ascending key order.
    pub(crate) fn in_order(&self) -> Vec<&CatalogEntry> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut cursor = self.root;

        while cursor.is_some() || !stack.is_empty() {
            while let Some(handle) = cursor {
                stack.push(handle);
                cursor = self.node(handle).left;
            }
            if let Some(handle) = stack.pop() {
                let node = self.node(handle);
                out.push(&node.entry);
                cursor = node.right;
            }
        }

        out
    }

    /// Remove the entry with the given key.
    ///
    /// Returns the entry of the node that was physically unlinked. When the
    /// target has two children its slot is refilled from the in-order
    /// successor, so the returned entry is the successor's.
    pub(crate) fn remove(&mut self, id: FoodId) -> Option<CatalogEntry> {
        let mut parent: Option<(NodeId, Side)> = None;
        let mut cursor = self.root;
        let target = loop {
            let handle = cursor?;
            let node = self.node(handle);
            match id.cmp(&node.entry.id) {
                Ordering::Equal => break handle,
                Ordering::Less => {
                    parent = Some((handle, Side::Left));
                    cursor = node.left;
                }
                Ordering::Greater => {
                    parent = Some((handle, Side::Right));
                    cursor = node.right;
                }
            }
        };

        let (left, right) = {
            let node = self.node(target);
            (node.left, node.right)
        };

        let detached = match (left, right) {
            (None, child) | (child, None) => {
                self.relink(parent, child);
                self.release(target)
            }
            (Some(_), Some(right)) => {
                let mut successor_parent = (target, Side::Right);
                let mut successor = right;
                while let Some(next) = self.node(successor).left {
                    successor_parent = (successor, Side::Left);
                    successor = next;
                }

                let successor_right = self.node(successor).right;
                self.relink(Some(successor_parent), successor_right);
                let entry = self.release(successor);
                self.node_mut(target).entry = entry.clone();
                entry
            }
        };

        self.len -= 1;
        Some(detached)
    }

    /// Point the link at `parent` (or the root) to `child`.
    fn relink(&mut self, parent: Option<(NodeId, Side)>, child: Option<NodeId>) {
        match parent {
            None => self.root = child,
            Some((handle, Side::Left)) => self.node_mut(handle).left = child,
            Some((handle, Side::Right)) => self.node_mut(handle).right = child,
        }
    }

    fn locate(&self, id: FoodId) -> Option<NodeId> {
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = self.node(handle);
            cursor = match id.cmp(&node.entry.id) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    fn alloc(&mut self, entry: CatalogEntry) -> NodeId {
        let node = Node {
            entry,
            left: None,
            right: None,
        };
        match self.free.pop() {
            Some(handle) => {
                self.slots[handle] = Some(node);
                handle
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    fn release(&mut self, handle: NodeId) -> CatalogEntry {
        let node = match self.slots[handle].take() {
            Some(node) => node,
            None => unreachable!("released vacant slot {handle}"),
        };
        self.free.push(handle);
        node.entry
    }

    fn node(&self, handle: NodeId) -> &Node {
        match &self.slots[handle] {
            Some(node) => node,
            None => unreachable!("dangling node handle {handle}"),
        }
    }

    fn node_mut(&mut self, handle: NodeId) -> &mut Node {
        match &mut self.slots[handle] {
            Some(node) => node,
            None => unreachable!("dangling node handle {handle}"),
        }
    }

    #[cfg(test)]
    fn root_key(&self) -> Option<FoodId> {
        self.root.map(|handle| self.node(handle).entry.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: FoodId) -> CatalogEntry {
        CatalogEntry::new(id, format!("item-{id}"), 1.0, 1, "test")
    }

    fn tree_of(ids: &[FoodId]) -> CatalogTree {
        let mut tree = CatalogTree::new();
        for &id in ids {
            assert!(tree.insert(entry(id)));
        }
        tree
    }

    fn keys(tree: &CatalogTree) -> Vec<FoodId> {
        tree.in_order().iter().map(|e| e.id).collect()
    }

    #[test]
    fn in_order_is_ascending() {
        let tree = tree_of(&[5, 2, 8, 1, 3, 9, 7]);
        assert_eq!(keys(&tree), vec![1, 2, 3, 5, 7, 8, 9]);
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn duplicate_insert_is_rejected() {
        let mut tree = tree_of(&[4, 2]);
        assert!(!tree.insert(CatalogEntry::new(2, "other", 9.0, 9, "x")));
        assert_eq!(tree.get(2).unwrap().name, "item-2");
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn remove_leaf() {
        let mut tree = tree_of(&[5, 2, 8]);
        let removed = tree.remove(8).unwrap();
        assert_eq!(removed.id, 8);
        assert_eq!(keys(&tree), vec![2, 5]);
    }

    #[test]
    fn remove_node_with_only_right_child() {
        let mut tree = tree_of(&[5, 2, 3]);
        let removed = tree.remove(2).unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(keys(&tree), vec![3, 5]);
    }

    #[test]
    fn remove_node_with_only_left_child() {
        let mut tree = tree_of(&[5, 2, 1]);
        let removed = tree.remove(2).unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(keys(&tree), vec![1, 5]);
    }

    #[test]
    fn remove_node_with_two_children_promotes_successor() {
        let mut tree = tree_of(&[5, 2, 8, 1, 3, 7, 9]);
        let detached = tree.remove(5).unwrap();

        assert_eq!(detached.id, 7);
        assert_eq!(tree.root_key(), Some(7));
        assert_eq!(keys(&tree), vec![1, 2, 3, 7, 8, 9]);
        assert!(tree.get(5).is_none());
    }

    #[test]
    fn remove_splices_successor_right_child() {
        let mut tree = tree_of(&[5, 2, 10, 7, 8, 12]);
        let detached = tree.remove(5).unwrap();

        assert_eq!(detached.id, 7);
        assert_eq!(tree.root_key(), Some(7));
        assert_eq!(keys(&tree), vec![2, 7, 8, 10, 12]);
        assert_eq!(tree.get(8).unwrap().name, "item-8");
    }

    #[test]
    fn remove_root_until_empty() {
        let mut tree = tree_of(&[3, 1, 2]);
        for id in [3, 1, 2] {
            assert!(tree.remove(id).is_some());
        }
        assert_eq!(tree.len(), 0);
        assert!(tree.in_order().is_empty());
        assert_eq!(tree.root_key(), None);
    }

    #[test]
    fn remove_missing_key_is_noop() {
        let mut tree = tree_of(&[2, 1, 3]);
        assert!(tree.remove(42).is_none());
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut tree = tree_of(&[2, 1, 3]);
        tree.remove(1).unwrap();
        tree.insert(entry(4));
        assert_eq!(tree.slots.len(), 3);
        assert_eq!(keys(&tree), vec![2, 3, 4]);
    }
}
