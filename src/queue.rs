//! A first-in, first-out queue. Traversals of a symbol table materialize
//! their results into a `Queue` so callers get the keys in the order they
//! were visited.
//!
//! # Examples
//!
//! ```
//! use ordered_bst::queue::Queue;
//!
//! let mut queue = Queue::new();
//! queue.enqueue(1);
//! queue.enqueue(2);
//!
//! // Iterating doesn't consume anything.
//! assert_eq!(queue.iter().collect::<Vec<_>>(), vec![&1, &2]);
//!
//! // Dequeuing does.
//! assert_eq!(queue.dequeue(), Some(1));
//! assert_eq!(queue.dequeue(), Some(2));
//! assert_eq!(queue.dequeue(), None);
//! ```

use std::collections::vec_deque;
use std::collections::VecDeque;
use std::fmt;
use std::iter::FromIterator;

/// A FIFO sequence. Items are enqueued at the tail and dequeued from the
/// head.
#[derive(Clone, PartialEq, Eq)]
pub struct Queue<T> {
    items: VecDeque<T>,
}

impl<T> Default for Queue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Queue<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Queue<T> {
    /// Generates a new, empty `Queue`.
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Adds `item` to the tail of the queue.
    pub fn enqueue(&mut self, item: T) {
        self.items.push_back(item);
    }

    /// Removes and returns the item at the head of the queue, if any.
    pub fn dequeue(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// The item that the next [`dequeue`][Queue::dequeue] would return.
    pub fn peek(&self) -> Option<&T> {
        self.items.front()
    }

    /// How many items are waiting in the queue.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates over the queued items, head first, without removing them.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter(self.items.iter())
    }
}

impl<T> Extend<T> for Queue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.enqueue(item);
        }
    }
}

impl<T> FromIterator<T> for Queue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::new();
        queue.extend(iter);
        queue
    }
}

/// Borrowing iterator over a [`Queue`], head first.
pub struct Iter<'a, T>(vec_deque::Iter<'a, T>);

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

/// Draining iterator over a [`Queue`]. Each item is dequeued as it is
/// yielded, so the queue cannot be replayed.
pub struct IntoIter<T>(Queue<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.dequeue()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> IntoIterator for Queue<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a Queue<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
