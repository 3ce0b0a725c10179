//! The symbol table abstractions. A [`SymbolTable`] maps unique keys to
//! values. An [`OrderedSymbolTable`] additionally knows the total order of
//! its keys and can answer questions about it.
//!
//! Code that only needs the contract can be written against these traits
//! instead of a concrete tree:
//!
//! ```
//! use ordered_bst::hibbard::Tree;
//! use ordered_bst::symbol_table::OrderedSymbolTable;
//!
//! fn median<T: OrderedSymbolTable<i32, ()>>(table: &T) -> Option<&i32> {
//!     table.select(table.size() / 2)
//! }
//!
//! let mut tree = Tree::new();
//! for key in [4, 1, 3, 5, 2] {
//!     tree.put(key, ());
//! }
//!
//! assert_eq!(median(&tree), Some(&3));
//! ```

use crate::error::Result;
use crate::hibbard;
use crate::queue::Queue;

/// A mapping from unique keys to values.
pub trait SymbolTable<K, V> {
    /// Associates `value` with `key`, replacing any previous value.
    fn put(&mut self, key: K, value: V);

    /// The value associated with `key`, if any.
    fn get(&self, key: &K) -> Option<&V>;

    /// Removes `key` and returns its value. Removing a missing key does
    /// nothing.
    fn delete(&mut self, key: &K) -> Option<V>;

    /// The number of keys in the table.
    fn size(&self) -> usize;

    /// Every key in the table.
    fn keys(&self) -> Queue<&K>;

    /// Whether the table holds a value for `key`.
    fn contains(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Whether the table holds no keys.
    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}

/// A [`SymbolTable`] whose keys are kept in ascending order.
pub trait OrderedSymbolTable<K, V>: SymbolTable<K, V>
where
    K: Ord,
{
    /// The smallest key.
    fn min(&self) -> Option<&K>;

    /// The largest key.
    fn max(&self) -> Option<&K>;

    /// The largest key less than or equal to `key`.
    fn floor(&self, key: &K) -> Option<&K>;

    /// The smallest key greater than or equal to `key`.
    fn ceiling(&self, key: &K) -> Option<&K>;

    /// The number of keys strictly less than `key`.
    fn rank(&self, key: &K) -> usize;

    /// The key with `index` smaller keys in the table.
    fn select(&self, index: usize) -> Option<&K>;

    /// Removes the smallest key.
    fn delete_min(&mut self) -> Option<(K, V)>;

    /// Removes the largest key.
    fn delete_max(&mut self) -> Option<(K, V)>;

    /// The number of keys in `[lo, hi]`. Fails if `hi < lo`.
    fn size_range(&self, lo: &K, hi: &K) -> Result<usize>;

    /// The keys in `[lo, hi]` in ascending order.
    fn keys_range(&self, lo: &K, hi: &K) -> Queue<&K>;
}

impl<K, V> SymbolTable<K, V> for hibbard::Tree<K, V>
where
    K: Ord,
{
    fn put(&mut self, key: K, value: V) {
        hibbard::Tree::put(self, key, value)
    }

    fn get(&self, key: &K) -> Option<&V> {
        hibbard::Tree::get(self, key)
    }

    fn delete(&mut self, key: &K) -> Option<V> {
        hibbard::Tree::delete(self, key)
    }

    fn size(&self) -> usize {
        hibbard::Tree::size(self)
    }

    fn keys(&self) -> Queue<&K> {
        hibbard::Tree::keys(self)
    }

    fn contains(&self, key: &K) -> bool {
        hibbard::Tree::contains(self, key)
    }

    fn is_empty(&self) -> bool {
        hibbard::Tree::is_empty(self)
    }
}

impl<K, V> OrderedSymbolTable<K, V> for hibbard::Tree<K, V>
where
    K: Ord,
{
    fn min(&self) -> Option<&K> {
        hibbard::Tree::min(self)
    }

    fn max(&self) -> Option<&K> {
        hibbard::Tree::max(self)
    }

    fn floor(&self, key: &K) -> Option<&K> {
        hibbard::Tree::floor(self, key)
    }

    fn ceiling(&self, key: &K) -> Option<&K> {
        hibbard::Tree::ceiling(self, key)
    }

    fn rank(&self, key: &K) -> usize {
        hibbard::Tree::rank(self, key)
    }

    fn select(&self, index: usize) -> Option<&K> {
        hibbard::Tree::select(self, index)
    }

    fn delete_min(&mut self) -> Option<(K, V)> {
        hibbard::Tree::delete_min(self)
    }

    fn delete_max(&mut self) -> Option<(K, V)> {
        hibbard::Tree::delete_max(self)
    }

    fn size_range(&self, lo: &K, hi: &K) -> Result<usize> {
        hibbard::Tree::size_range(self, lo, hi)
    }

    fn keys_range(&self, lo: &K, hi: &K) -> Queue<&K> {
        hibbard::Tree::keys_range(self, lo, hi)
    }
}
