//! An ordered symbol table backed by a size-augmented BST. Every node knows
//! how many nodes live in its subtree which lets the tree answer
//! order-statistic queries ([`rank`][Tree::rank], [`select`][Tree::select],
//! range counts) in `O(height)`.
//!
//! The tree does not rebalance itself. Random insertions give an expected
//! height of `O(lg N)` but sorted insertions degrade it to a list. Deleting a
//! node with two children uses Hibbard deletion: the node is replaced by the
//! minimum of its right subtree. Over many deletions this skews the tree and
//! its height drifts towards `O(sqrt N)`.
//!
//! # Examples
//!
//! ```
//! use ordered_bst::hibbard::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.put(key, key * 10);
//! }
//!
//! assert_eq!(tree.get(&4), Some(&40));
//! assert_eq!(tree.min(), Some(&1));
//! assert_eq!(tree.rank(&7), 4);
//! assert_eq!(tree.select(2), Some(&4));
//! assert_eq!(tree.floor(&6), Some(&5));
//! assert_eq!(tree.ceiling(&6), Some(&7));
//!
//! // Deleting a node with two children promotes its successor.
//! assert_eq!(tree.delete(&5), Some(50));
//! assert_eq!(tree.keys().into_iter().collect::<Vec<_>>(), vec![&1, &3, &4, &7, &8, &9]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

use log::{debug, trace};

use crate::error::{Error, Result};
use crate::queue::Queue;

type Link<K, V> = Option<Box<Node<K, V>>>;

/// The number of nodes in the subtree hanging off `link`.
fn size<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |n| n.size)
}

/// A Binary Search Tree where each node tracks the size of its subtree.
/// This can be used for inserting, finding, and deleting keys and values
/// as well as asking where a key sits in the sorted order of all keys.
pub struct Tree<K, V> {
    root: Link<K, V>,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Drop for Tree<K, V> {
    fn drop(&mut self) {
        // Unlink nodes one at a time so a list-shaped tree doesn't recurse
        // once per level.
        let mut stack: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K, V> Clone for Tree<K, V>
where
    K: Clone,
    V: Clone,
{
    // TODO stack based Clone
    fn clone(&self) -> Self {
        Self {
            root: self.root.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Tree<K, V> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None }
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The number of keys in the tree. This is read off the root so it
    /// takes constant time.
    pub fn size(&self) -> usize {
        size(&self.root)
    }

    /// How many levels are in the tree. An empty tree has a height of 0 and
    /// a tree with just a root has a height of 1.
    ///
    /// Unlike [`size`][Tree::size] this isn't cached so it visits every node.
    pub fn height(&self) -> usize {
        self.root.as_deref().map_or(0, Node::height)
    }

    /// Iterates over the keys and values of the tree in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::hibbard::Tree;
    ///
    /// let tree: Tree<_, _> = vec![(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    ///
    /// assert_eq!(
    ///     tree.iter().collect::<Vec<_>>(),
    ///     vec![(&1, &'a'), (&2, &'b'), (&3, &'c')]
    /// );
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self.root.as_deref(), self.size())
    }

    /// The smallest key in the tree or `None` if the tree is empty.
    pub fn min(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some(&node.key)
    }

    /// The largest key in the tree or `None` if the tree is empty.
    pub fn max(&self) -> Option<&K> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some(&node.key)
    }

    /// All keys of the tree in ascending order.
    ///
    /// The keys are borrowed from the tree so the tree can't be modified
    /// while the returned queue is alive.
    pub fn keys(&self) -> Queue<&K> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Potentially finds the value associated with the given key in this
    /// tree. If no node has the corresponding key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::hibbard::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.put(1, 2);
    ///
    /// assert_eq!(tree.get(&1), Some(&2));
    /// assert_eq!(tree.get(&42), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V>
    where
        K: Ord,
    {
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            match key.cmp(&n.key) {
                Ordering::Less => node = n.left.as_deref(),
                Ordering::Equal => return Some(&n.value),
                Ordering::Greater => node = n.right.as_deref(),
            }
        }
        None
    }

    /// Like [`get`][Tree::get] but the value can be modified in place.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V>
    where
        K: Ord,
    {
        let mut node = self.root.as_deref_mut();
        while let Some(n) = node {
            match key.cmp(&n.key) {
                Ordering::Less => node = n.left.as_deref_mut(),
                Ordering::Equal => return Some(&mut n.value),
                Ordering::Greater => node = n.right.as_deref_mut(),
            }
        }
        None
    }

    /// Whether the tree has a node for `key`.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.get(key).is_some()
    }

    /// Inserts the given value into the tree stored at the given key.
    /// Inserting a new value for an existing key overwrites its value and
    /// leaves the shape of the tree alone.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::hibbard::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// tree.put(1, 2);
    /// assert_eq!(tree.get(&1), Some(&2));
    ///
    /// tree.put(1, 3);
    /// assert_eq!(tree.get(&1), Some(&3));
    /// assert_eq!(tree.size(), 1);
    /// ```
    pub fn put(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        let root = self.root.take();
        self.root = Some(Node::put(root, key, value));
    }

    /// Deletes the node containing the given key from the tree and returns
    /// its value. If the tree does not contain a node with the key, nothing
    /// happens.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::hibbard::Tree;
    ///
    /// let mut tree = Tree::new();
    /// tree.put(1, 2);
    ///
    /// assert_eq!(tree.delete(&1), Some(2));
    /// assert_eq!(tree.get(&1), None);
    /// assert_eq!(tree.delete(&1), None);
    /// ```
    pub fn delete(&mut self, key: &K) -> Option<V>
    where
        K: Ord,
    {
        let root = self.root.take()?;
        let (root, deleted) = root.delete(key);
        self.root = root;
        if deleted.is_some() {
            trace!("delete: removed a node, {} left", self.size());
        }
        deleted
    }

    /// Removes the smallest key and returns it with its value. Does nothing
    /// on an empty tree.
    pub fn delete_min(&mut self) -> Option<(K, V)> {
        let root = self.root.take()?;
        let (min, rest) = root.delete_min();
        self.root = rest;
        trace!("delete_min: {} left", self.size());
        Some(min.into_entry())
    }

    /// Removes the largest key and returns it with its value. Does nothing
    /// on an empty tree.
    pub fn delete_max(&mut self) -> Option<(K, V)> {
        let root = self.root.take()?;
        let (max, rest) = root.delete_max();
        self.root = rest;
        trace!("delete_max: {} left", self.size());
        Some(max.into_entry())
    }

    /// The largest key in the tree that is less than or equal to `key`.
    pub fn floor(&self, key: &K) -> Option<&K>
    where
        K: Ord,
    {
        let mut floor = None;
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            match key.cmp(&n.key) {
                Ordering::Less => node = n.left.as_deref(),
                Ordering::Equal => return Some(&n.key),
                Ordering::Greater => {
                    floor = Some(&n.key);
                    node = n.right.as_deref();
                }
            }
        }
        floor
    }

    /// The smallest key in the tree that is greater than or equal to `key`.
    pub fn ceiling(&self, key: &K) -> Option<&K>
    where
        K: Ord,
    {
        let mut ceiling = None;
        let mut node = self.root.as_deref();
        while let Some(n) = node {
            match key.cmp(&n.key) {
                Ordering::Less => {
                    ceiling = Some(&n.key);
                    node = n.left.as_deref();
                }
                Ordering::Equal => return Some(&n.key),
                Ordering::Greater => node = n.right.as_deref(),
            }
        }
        ceiling
    }

    /// The number of keys in the tree strictly less than `key`. `key` itself
    /// doesn't need to be in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::hibbard::Tree;
    ///
    /// let tree: Tree<_, _> = vec![(10, ()), (20, ()), (30, ())].into_iter().collect();
    ///
    /// assert_eq!(tree.rank(&5), 0);
    /// assert_eq!(tree.rank(&20), 1);
    /// assert_eq!(tree.rank(&25), 2);
    /// assert_eq!(tree.rank(&99), 3);
    /// ```
    pub fn rank(&self, key: &K) -> usize
    where
        K: Ord,
    {
        self.root.as_deref().map_or(0, |n| n.rank(key))
    }

    /// The key with exactly `index` smaller keys in the tree, i.e. the
    /// `index`th key in sorted order counting from 0. Returns `None` when
    /// `index` is not less than [`size`][Tree::size].
    pub fn select(&self, index: usize) -> Option<&K> {
        self.root.as_deref().and_then(|n| n.select(index))
    }

    /// The number of keys in the closed range `[lo, hi]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] if `hi` is less than `lo`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_bst::{hibbard::Tree, Error};
    ///
    /// let tree: Tree<_, _> = (1..=9).map(|k| (k, ())).collect();
    ///
    /// assert_eq!(tree.size_range(&3, &5), Ok(3));
    /// assert_eq!(tree.size_range(&20, &30), Ok(0));
    /// assert_eq!(tree.size_range(&5, &3), Err(Error::InvalidRange));
    /// ```
    pub fn size_range(&self, lo: &K, hi: &K) -> Result<usize>
    where
        K: Ord,
    {
        if hi < lo {
            debug!("size_range: rejecting a range whose upper bound is below its lower bound");
            return Err(Error::InvalidRange);
        }

        match (self.ceiling(lo), self.floor(hi)) {
            (Some(from), Some(to)) => Ok((self.rank(to) + 1).saturating_sub(self.rank(from))),
            _ => Ok(0),
        }
    }

    /// The keys in the closed range `[lo, hi]` in ascending order. An
    /// inverted range (`hi < lo`) holds no keys.
    pub fn keys_range(&self, lo: &K, hi: &K) -> Queue<&K>
    where
        K: Ord,
    {
        let mut queue = Queue::new();
        if let (Some(root), Some(from), Some(to)) =
            (self.root.as_deref(), self.ceiling(lo), self.floor(hi))
        {
            root.enqueue_keys(&mut queue, from, to);
        }
        queue
    }
}

impl<K, V> Extend<(K, V)> for Tree<K, V>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Tree<K, V>
where
    K: Ord,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<'a, K, V> IntoIterator for &'a Tree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An in-order iterator over the entries of a [`Tree`]. It keeps the path
/// to the next node on a stack rather than recursing.
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(root: Option<&'a Node<K, V>>, remaining: usize) -> Self {
        let mut iter = Self {
            stack: Vec::new(),
            remaining,
        };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// A `Node` has a key that is used for searching/sorting and a value that
/// is associated with that key. Missing children are `None`.
#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,

    /// How many nodes are in the subtree rooted at this node, including
    /// itself.
    size: usize,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            size: 1,
        }
    }

    fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Recomputes `size` from the children. Must be called on every node
    /// whose children changed, bottom up.
    fn fix_size(&mut self) {
        self.size = size(&self.left) + size(&self.right) + 1;
    }

    fn height(&self) -> usize {
        let left_height = self.left().map_or(0, Self::height);
        let right_height = self.right().map_or(0, Self::height);
        left_height.max(right_height) + 1
    }

    fn into_entry(self: Box<Self>) -> (K, V) {
        let Node { key, value, .. } = *self;
        (key, value)
    }

    /// Inserts into the subtree at `link` and returns the new root of that
    /// subtree.
    fn put(link: Link<K, V>, key: K, value: V) -> Box<Self>
    where
        K: Ord,
    {
        let mut node = match link {
            Some(node) => node,
            None => {
                trace!("put: creating a new leaf");
                return Box::new(Self::new(key, value));
            }
        };

        match key.cmp(&node.key) {
            Ordering::Less => node.left = Some(Self::put(node.left.take(), key, value)),
            Ordering::Equal => node.value = value,
            Ordering::Greater => node.right = Some(Self::put(node.right.take(), key, value)),
        }
        node.fix_size();

        if cfg!(debug_assertions) {
            if let Some(left) = node.left() {
                assert!(node.key > left.key);
            }
            if let Some(right) = node.right() {
                assert!(node.key < right.key);
            }
        }
        node
    }

    /// Deletes `key` from this subtree. Returns the new root of the subtree
    /// and the deleted value if `key` was found.
    fn delete(mut self: Box<Self>, key: &K) -> (Link<K, V>, Option<V>)
    where
        K: Ord,
    {
        let deleted = match key.cmp(&self.key) {
            Ordering::Less => {
                let (left, deleted) = match self.left.take() {
                    Some(left) => left.delete(key),
                    None => (None, None),
                };
                self.left = left;
                deleted
            }
            Ordering::Equal => return self.remove(),
            Ordering::Greater => {
                let (right, deleted) = match self.right.take() {
                    Some(right) => right.delete(key),
                    None => (None, None),
                };
                self.right = right;
                deleted
            }
        };

        self.fix_size();
        (Some(self), deleted)
    }

    /// Unlinks this node and returns whatever takes its place along with
    /// its value.
    fn remove(self: Box<Self>) -> (Link<K, V>, Option<V>) {
        let Node {
            value, left, right, ..
        } = *self;

        let replacement = match (left, right) {
            (None, right) => right,
            (left, None) => left,
            // If we have two children we promote this node's successor.
            // That is, the smallest node in this node's right subtree.
            (Some(left), Some(right)) => {
                trace!("delete: promoting the minimum of the right subtree");
                let (mut successor, rest) = right.delete_min();
                successor.left = Some(left);
                successor.right = rest;
                successor.fix_size();
                Some(successor)
            }
        };

        (replacement, Some(value))
    }

    /// Detaches the smallest node of this subtree. Returns that node
    /// (without children) and the remaining subtree.
    fn delete_min(mut self: Box<Self>) -> (Box<Self>, Link<K, V>) {
        match self.left.take() {
            None => {
                let rest = self.right.take();
                self.size = 1;
                (self, rest)
            }
            Some(left) => {
                let (min, rest) = left.delete_min();
                self.left = rest;
                self.fix_size();
                (min, Some(self))
            }
        }
    }

    /// Detaches the largest node of this subtree. Returns that node
    /// (without children) and the remaining subtree.
    fn delete_max(mut self: Box<Self>) -> (Box<Self>, Link<K, V>) {
        match self.right.take() {
            None => {
                let rest = self.left.take();
                self.size = 1;
                (self, rest)
            }
            Some(right) => {
                let (max, rest) = right.delete_max();
                self.right = rest;
                self.fix_size();
                (max, Some(self))
            }
        }
    }

    fn rank(&self, key: &K) -> usize
    where
        K: Ord,
    {
        match key.cmp(&self.key) {
            Ordering::Less => self.left().map_or(0, |n| n.rank(key)),
            Ordering::Equal => size(&self.left),
            Ordering::Greater => size(&self.left) + 1 + self.right().map_or(0, |n| n.rank(key)),
        }
    }

    fn select(&self, index: usize) -> Option<&K> {
        let left_size = size(&self.left);
        match index.cmp(&left_size) {
            Ordering::Less => self.left().and_then(|n| n.select(index)),
            Ordering::Equal => Some(&self.key),
            Ordering::Greater => self.right().and_then(|n| n.select(index - left_size - 1)),
        }
    }

    /// Enqueues, in order, every key of this subtree within `[lo, hi]`.
    /// Children that can't hold keys in the range are skipped.
    fn enqueue_keys<'a>(&'a self, queue: &mut Queue<&'a K>, lo: &K, hi: &K)
    where
        K: Ord,
    {
        if *lo < self.key {
            if let Some(left) = self.left() {
                left.enqueue_keys(queue, lo, hi);
            }
        }
        if *lo <= self.key && self.key <= *hi {
            queue.enqueue(&self.key);
        }
        if self.key < *hi {
            if let Some(right) = self.right() {
                right.enqueue_keys(queue, lo, hi);
            }
        }
    }
}

#[cfg(test)]
impl<K, V> Tree<K, V>
where
    K: Ord,
{
    /// Walks the whole tree checking that keys are strictly ordered and
    /// every cached size matches its subtree.
    pub(crate) fn assert_invariants(&self) {
        if let Some(root) = self.root.as_deref() {
            root.assert_invariants(None, None);
        }
    }
}

#[cfg(test)]
impl<K, V> Node<K, V>
where
    K: Ord,
{
    fn assert_invariants(&self, lo: Option<&K>, hi: Option<&K>) -> usize {
        if let Some(lo) = lo {
            assert!(*lo < self.key);
        }
        if let Some(hi) = hi {
            assert!(self.key < *hi);
        }

        let left_size = self
            .left()
            .map_or(0, |n| n.assert_invariants(lo, Some(&self.key)));
        let right_size = self
            .right()
            .map_or(0, |n| n.assert_invariants(Some(&self.key), hi));
        assert_eq!(self.size, left_size + right_size + 1);

        self.size
    }
}
