use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;

use crate::observer::{NoTrace, Observer, Rotation, TreeEvent};

/// AVL tree holding a multiset of keys.
///
/// Equal keys are kept as separate nodes; on insert a key equal to the
/// node's key descends to the right.
#[derive(Clone)]
pub struct AvlTree<K> {
    pub(crate) root: Link<K>,
    len: usize,
}

pub(crate) type Link<K> = Option<Box<Node<K>>>;

#[derive(Clone)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    height: i16,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

/// Outcome of [`AvlTree::delete`].
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeleteStatus {
    Deleted,
    /// The key is not in the tree; nothing changed.
    NotFound,
    /// The tree has no nodes.
    EmptyTree,
}

impl DeleteStatus {
    pub fn is_deleted(self) -> bool {
        self == Self::Deleted
    }
}

impl<K> Node<K> {
    fn new(key: K) -> Self {
        Self {
            key,
            height: 1,
            left: None,
            right: None,
        }
    }

    fn height(node: &Link<K>) -> i16 {
        node.as_ref().map(|n| n.height).unwrap_or(0)
    }

    fn recalc(&mut self) {
        let hl = Self::height(&self.left);
        let hr = Self::height(&self.right);
        self.height = 1 + hl.max(hr);
    }

    /// Left height minus right height.
    fn balance_factor(&self) -> i16 {
        Self::height(&self.left) - Self::height(&self.right)
    }
}

impl<K> AvlTree<K> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Number of keys, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the root; 0 for an empty tree, 1 for a single node.
    pub fn height(&self) -> usize {
        Node::height(&self.root) as usize
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Smallest key.
    pub fn min(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.key)
    }

    /// Largest key.
    pub fn max(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.key)
    }

    /// In-order iterator; duplicates are yielded once per insertion.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self.root.as_deref(), self.len)
    }
}

impl<K: Ord> AvlTree<K> {
    pub fn insert(&mut self, key: K) {
        self.insert_observed(key, &mut NoTrace);
    }

    /// Inserts `key`, reporting the insert and every rotation to `observer`.
    pub fn insert_observed<O: Observer<K>>(&mut self, key: K, observer: &mut O) {
        observer.observe(TreeEvent::Insert(&key));
        self.root = Some(Self::insert_node(self.root.take(), key, observer));
        self.len += 1;
        #[cfg(feature = "tracing")]
        tracing::trace!(len = self.len, height = self.height(), "inserted key");
    }

    /// Removes one node holding `key`.
    pub fn delete(&mut self, key: &K) -> DeleteStatus {
        self.delete_observed(key, &mut NoTrace)
    }

    /// Removes one node holding `key`, reporting the delete, every rotation
    /// and a miss to `observer`.
    pub fn delete_observed<O: Observer<K>>(&mut self, key: &K, observer: &mut O) -> DeleteStatus {
        let Some(root) = self.root.take() else {
            observer.observe(TreeEvent::EmptyTree);
            #[cfg(feature = "tracing")]
            tracing::debug!("delete on empty tree");
            return DeleteStatus::EmptyTree;
        };

        observer.observe(TreeEvent::Delete(key));
        let (root, deleted) = Self::delete_node(root, key, observer);
        self.root = root;
        if !deleted {
            observer.observe(TreeEvent::NotFound(key));
            #[cfg(feature = "tracing")]
            tracing::debug!(len = self.len, "delete: key not found");
            return DeleteStatus::NotFound;
        }
        self.len -= 1;
        DeleteStatus::Deleted
    }

    pub fn contains(&self, key: &K) -> bool {
        let mut cur = self.root.as_deref();
        while let Some(node) = cur {
            match key.cmp(&node.key) {
                Ordering::Less => cur = node.left.as_deref(),
                Ordering::Greater => cur = node.right.as_deref(),
                Ordering::Equal => return true,
            }
        }
        false
    }

    fn rotate_right<O: Observer<K>>(mut root: Box<Node<K>>, observer: &mut O) -> Box<Node<K>> {
        let mut left = match root.left.take() {
            Some(node) => node,
            None => return root,
        };
        observer.observe(TreeEvent::Rotate {
            rotation: Rotation::Right,
            pivot: &root.key,
        });
        #[cfg(feature = "tracing")]
        tracing::trace!(height = root.height, "rotate right");
        root.left = left.right.take();
        root.recalc();
        left.right = Some(root);
        left.recalc();
        left
    }

    fn rotate_left<O: Observer<K>>(mut root: Box<Node<K>>, observer: &mut O) -> Box<Node<K>> {
        let mut right = match root.right.take() {
            Some(node) => node,
            None => return root,
        };
        observer.observe(TreeEvent::Rotate {
            rotation: Rotation::Left,
            pivot: &root.key,
        });
        #[cfg(feature = "tracing")]
        tracing::trace!(height = root.height, "rotate left");
        root.right = right.left.take();
        root.recalc();
        right.left = Some(root);
        right.recalc();
        right
    }

    fn rotate_left_right<O: Observer<K>>(mut root: Box<Node<K>>, observer: &mut O) -> Box<Node<K>> {
        if let Some(left) = root.left.take() {
            root.left = Some(Self::rotate_left(left, observer));
        }
        Self::rotate_right(root, observer)
    }

    fn rotate_right_left<O: Observer<K>>(mut root: Box<Node<K>>, observer: &mut O) -> Box<Node<K>> {
        if let Some(right) = root.right.take() {
            root.right = Some(Self::rotate_right(right, observer));
        }
        Self::rotate_left(root, observer)
    }

    fn insert_node<O: Observer<K>>(root: Link<K>, key: K, observer: &mut O) -> Box<Node<K>> {
        let Some(mut node) = root else {
            return Box::new(Node::new(key));
        };

        // An insert that rotates somewhere below leaves that subtree's height
        // unchanged, so an imbalance seen here always comes with the same
        // child that is compared against `key` before descending.
        if key < node.key {
            let outer = node.left.as_ref().is_none_or(|left| key < left.key);
            node.left = Some(Self::insert_node(node.left.take(), key, observer));
            if node.balance_factor() == 2 {
                return if outer {
                    Self::rotate_right(node, observer)
                } else {
                    Self::rotate_left_right(node, observer)
                };
            }
        } else {
            let outer = node.right.as_ref().is_none_or(|right| key >= right.key);
            node.right = Some(Self::insert_node(node.right.take(), key, observer));
            if node.balance_factor() == -2 {
                return if outer {
                    Self::rotate_left(node, observer)
                } else {
                    Self::rotate_right_left(node, observer)
                };
            }
        }
        node.recalc();
        node
    }

    /// Unlike insert, which picks the rotation by comparing the new key with
    /// the child's key, deletion picks it from the child's subtree heights.
    /// A child whose subtrees are equally tall takes the single rotation.
    fn rebalance_after_delete<O: Observer<K>>(
        mut node: Box<Node<K>>,
        observer: &mut O,
    ) -> Box<Node<K>> {
        let bf = node.balance_factor();
        if bf < -1 {
            let single = node
                .right
                .as_ref()
                .is_some_and(|right| Node::height(&right.right) >= Node::height(&right.left));
            return if single {
                Self::rotate_left(node, observer)
            } else {
                Self::rotate_right_left(node, observer)
            };
        }
        if bf > 1 {
            let single = node
                .left
                .as_ref()
                .is_some_and(|left| Node::height(&left.left) >= Node::height(&left.right));
            return if single {
                Self::rotate_right(node, observer)
            } else {
                Self::rotate_left_right(node, observer)
            };
        }
        node.recalc();
        node
    }

    /// Detaches the leftmost node of `node`'s subtree and returns its key.
    fn take_min<O: Observer<K>>(mut node: Box<Node<K>>, observer: &mut O) -> (Link<K>, K) {
        match node.left.take() {
            Some(left) => {
                let (left, min) = Self::take_min(left, observer);
                node.left = left;
                (Some(Self::rebalance_after_delete(node, observer)), min)
            }
            None => {
                let Node { key, right, .. } = *node;
                (right, key)
            }
        }
    }

    fn delete_node<O: Observer<K>>(
        mut node: Box<Node<K>>,
        key: &K,
        observer: &mut O,
    ) -> (Link<K>, bool) {
        let deleted = match key.cmp(&node.key) {
            Ordering::Less => match node.left.take() {
                Some(left) => {
                    let (left, deleted) = Self::delete_node(left, key, observer);
                    node.left = left;
                    deleted
                }
                None => false,
            },
            Ordering::Greater => match node.right.take() {
                Some(right) => {
                    let (right, deleted) = Self::delete_node(right, key, observer);
                    node.right = right;
                    deleted
                }
                None => false,
            },
            Ordering::Equal => match (node.left.take(), node.right.take()) {
                (Some(left), Some(right)) => {
                    let (right, successor) = Self::take_min(right, observer);
                    node.key = successor;
                    node.left = Some(left);
                    node.right = right;
                    true
                }
                (left, right) => return (left.or(right), true),
            },
        };
        (Some(Self::rebalance_after_delete(node, observer)), deleted)
    }
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for AvlTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over an [`AvlTree`].
pub struct Iter<'a, K> {
    stack: Vec<&'a Node<K>>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    fn new(root: Option<&'a Node<K>>, len: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining: len,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut cur: Option<&'a Node<K>>) {
        while let Some(node) = cur {
            self.stack.push(node);
            cur = node.left.as_deref();
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}
