//! A general-purpose indexable binary heap.
//!
//! [`IndexHeap`] is an array-backed binary heap ordered by a
//! caller-supplied strict "should be above" comparator. Besides the
//! usual push/pop/peek it supports in-place key updates, arbitrary
//! removal and membership tests, all locating items by identity
//! (`PartialEq`) with a linear scan; the open list of a grid search
//! stays small enough that the scan needs no extra bookkeeping.

/// Array-backed binary heap with update/remove/contains by identity.
///
/// The comparator is fixed for the heap's lifetime. Ordering across
/// items that compare as ties is unspecified, but deterministic for a
/// fixed sequence of operations: the sift-down picks the later-compared
/// (right) child on an exact tie.
pub struct IndexHeap<T, F = fn(&T, &T) -> bool> {
    items: Vec<T>,
    before: F,
}

impl<T: PartialEq, F: Fn(&T, &T) -> bool> IndexHeap<T, F> {
    /// Create an empty heap with the given initial capacity and strict
    /// "a should be above b" comparator.
    pub fn with_capacity(cap: usize, before: F) -> Self {
        Self {
            items: Vec::with_capacity(cap),
            before,
        }
    }

    /// Number of items currently on the heap.
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the heap holds no items.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop all items but keep the backing storage, so repeated
    /// searches reuse the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Push an item and restore heap order.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
        self.sift_up(self.items.len() - 1);
    }

    /// Remove and return the top item, or `None` if the heap is empty.
    pub fn pop(&mut self) -> Option<T> {
        match self.items.len() {
            0 => None,
            1 => self.items.pop(),
            n => {
                self.items.swap(0, n - 1);
                let top = self.items.pop();
                self.sift_down(0);
                top
            }
        }
    }

    /// The top item without removing it.
    #[inline]
    pub fn peek(&self) -> Option<&T> {
        self.items.first()
    }

    /// Re-position an item whose ordering key changed.
    ///
    /// The item is located by identity (`==`), overwritten with the
    /// given value and sifted in both directions. Returns `false` if it
    /// is not on the heap.
    pub fn update(&mut self, item: T) -> bool {
        let Some(i) = self.items.iter().position(|x| *x == item) else {
            return false;
        };
        self.items[i] = item;
        self.sift_up(i);
        self.sift_down(i);
        true
    }

    /// Remove an arbitrary item, located by identity.
    ///
    /// The last element is swapped into the hole and re-sifted in both
    /// directions. Returns the removed item, or `None` if absent.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        let i = self.items.iter().position(|x| x == item)?;
        let removed = self.items.swap_remove(i);
        if i < self.items.len() {
            self.sift_up(i);
            self.sift_down(i);
        }
        Some(removed)
    }

    /// Whether an item with this identity is on the heap.
    pub fn contains(&self, item: &T) -> bool {
        self.items.iter().any(|x| x == item)
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if (self.before)(&self.items[i], &self.items[parent]) {
                self.items.swap(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.items.len();
        loop {
            let left = 2 * i + 1;
            if left >= len {
                break;
            }
            let right = left + 1;
            // On an exact tie between children the right one wins.
            let child = if right < len && !(self.before)(&self.items[left], &self.items[right]) {
                right
            } else {
                left
            };
            if (self.before)(&self.items[child], &self.items[i]) {
                self.items.swap(i, child);
                i = child;
            } else {
                break;
            }
        }
    }
}
