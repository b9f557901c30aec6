//! The index/sequence set engine.
//!
//! [`OrderedSet`] owns two collections that always describe the same
//! elements:
//!
//! - an **index** (`HashMap<T, usize>`) from each element to its position,
//!   giving O(1) expected membership and removal targeting;
//! - a dense **sequence** (`Vec<T>`) holding the elements in policy order,
//!   consumed by iteration, scans and encoding.
//!
//! Neither collection is reachable for mutation from outside the type. Every
//! mutating method restores the following before it returns:
//!
//! - the index and the sequence hold the same elements, and
//!   `sequence[index[e]] == e` for every element `e`;
//! - no element appears twice;
//! - positions are exactly `0..len()`;
//! - under a sorted policy the sequence is non-decreasing per the
//!   comparator, and under the insertion policy it is first-insertion order.
//!
//! Debug builds re-check all of this after each mutation.
//!
//! # Time Complexity
//!
//! | Operation     | Unordered | Insertion | Sorted          |
//! |---------------|-----------|-----------|-----------------|
//! | `contains`    | O(1)      | O(1)      | O(1)            |
//! | `insert`      | O(1)      | O(1)      | O(log n) + O(n) |
//! | `remove`      | O(1)      | O(n - p)  | O(n - p)        |
//! | `len`         | O(1)      | O(1)      | O(1)            |
//! | `clone`       | O(n)      | O(n)      | O(n)            |
//!
//! where `p` is the position of the removed element.
//!
//! # Examples
//!
//! ```rust
//! use ordset::OrderedSet;
//!
//! let mut set = OrderedSet::new();
//! set.insert("a");
//! set.insert("b");
//! set.insert("c");
//! set.insert("a"); // already present: no change
//!
//! set.remove(&"b");
//! assert_eq!(set.to_vec(), vec!["a", "c"]);
//! ```

mod algebra;
mod iter;
mod read;

pub use iter::{IntoIter, Iter};
pub use read::SetRead;

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::hash::{BuildHasher, Hash, RandomState};

use crate::policy::{Comparator, Compaction, Policy};
use crate::SetError;

/// A set that keeps a membership index and a dense ordered sequence in step.
///
/// The ordering discipline is a [`Policy`] chosen at construction:
/// unordered, insertion order, or sorted by a [`Comparator`].
///
/// # Type Parameters
///
/// * `T` - The element type. Must implement `Eq`, `Hash` and `Clone`
///   (each element is held by both the index and the sequence).
/// * `S` - The hasher used by the index.
///
/// # Examples
///
/// ```rust
/// use ordset::OrderedSet;
///
/// let mut set = OrderedSet::ascending();
/// for value in [5, 1, 3] {
///     set.insert(value);
/// }
/// assert_eq!(set.to_vec(), vec![1, 3, 5]);
/// assert!(!set.insert(3));
/// assert_eq!(set.len(), 3);
/// ```
#[derive(Clone)]
pub struct OrderedSet<T, S = RandomState> {
    index: HashMap<T, usize, S>,
    sequence: Vec<T>,
    policy: Policy<T>,
}

impl<T: Eq + Hash + Clone> OrderedSet<T, RandomState> {
    /// Creates an empty insertion-ordered set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::{OrderedSet, PolicyKind};
    ///
    /// let set: OrderedSet<i32> = OrderedSet::new();
    /// assert!(set.is_empty());
    /// assert_eq!(set.policy().kind(), PolicyKind::Insertion);
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_policy(Policy::insertion())
    }

    /// Creates an empty unordered set.
    #[inline]
    #[must_use]
    pub fn unordered() -> Self {
        Self::with_policy(Policy::unordered())
    }

    /// Creates an empty set under `policy`.
    #[inline]
    #[must_use]
    pub fn with_policy(policy: Policy<T>) -> Self {
        Self::with_capacity_and_policy(0, policy)
    }

    /// Creates an empty set under `policy` with room for `capacity`
    /// elements.
    #[must_use]
    pub fn with_capacity_and_policy(capacity: usize, policy: Policy<T>) -> Self {
        Self::with_capacity_hasher_and_policy(capacity, RandomState::new(), policy)
    }

    /// Creates a set under `policy` from `items`, inserted in list order.
    ///
    /// Duplicates collapse to their first occurrence.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::{OrderedSet, Policy};
    ///
    /// let set = OrderedSet::from_vec_with_policy(vec![3, 1, 3, 2, 1], Policy::insertion());
    /// assert_eq!(set.to_vec(), vec![3, 1, 2]);
    /// ```
    #[must_use]
    pub fn from_vec_with_policy(items: Vec<T>, policy: Policy<T>) -> Self {
        let mut set = Self::with_capacity_and_policy(items.len(), policy);
        set.extend(items);
        set
    }
}

impl<T: Eq + Hash + Clone + Ord + 'static> OrderedSet<T, RandomState> {
    /// Creates an empty set sorted in ascending natural order.
    #[inline]
    #[must_use]
    pub fn ascending() -> Self {
        Self::with_policy(Policy::sorted(Comparator::ascending()))
    }

    /// Creates an empty set sorted in descending natural order.
    #[inline]
    #[must_use]
    pub fn descending() -> Self {
        Self::with_policy(Policy::sorted(Comparator::descending()))
    }

    /// Creates an ascending set from `items`.
    #[must_use]
    pub fn from_vec_ascending(items: Vec<T>) -> Self {
        Self::from_vec_with_policy(items, Policy::sorted(Comparator::ascending()))
    }

    /// Creates a descending set from `items`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::OrderedSet;
    ///
    /// let set = OrderedSet::from_vec_descending(vec![2, 9, 4]);
    /// assert_eq!(set.to_vec(), vec![9, 4, 2]);
    /// ```
    #[must_use]
    pub fn from_vec_descending(items: Vec<T>) -> Self {
        Self::from_vec_with_policy(items, Policy::sorted(Comparator::descending()))
    }
}

impl<T, S> OrderedSet<T, S> {
    /// Returns the number of elements.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sequence.len()
    }

    /// Returns `true` if the set holds no elements.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }

    /// Returns the policy this set was built with.
    #[inline]
    #[must_use]
    pub const fn policy(&self) -> &Policy<T> {
        &self.policy
    }

    /// Returns an iterator over the elements in policy order.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.sequence.iter())
    }

    /// Returns the element at `position` in policy order.
    #[inline]
    #[must_use]
    pub fn get_index(&self, position: usize) -> Option<&T> {
        self.sequence.get(position)
    }

    /// Returns the first element in policy order.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.sequence.first()
    }

    /// Returns the last element in policy order.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.sequence.last()
    }

    /// Returns a read-only view of the backing sequence without copying.
    ///
    /// The view reflects the set as it is now and is only meaningful until
    /// the next mutation: removal compacts and sorted insertion shifts an
    /// arbitrary suffix of the sequence in place. The borrow checker keeps
    /// the view and a mutation from overlapping within one thread. Use
    /// [`to_vec`](Self::to_vec) for a snapshot that outlives mutations.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::OrderedSet;
    ///
    /// let set = OrderedSet::from_vec_ascending(vec![3, 1, 2]);
    /// let view = set.borrow_sequence();
    /// assert_eq!(view, &[1, 2, 3]);
    /// ```
    #[inline]
    #[must_use]
    pub fn borrow_sequence(&self) -> &[T] {
        &self.sequence
    }

    /// Visits every element once, in policy order.
    pub fn for_each<F>(&self, visit: F)
    where
        F: FnMut(&T),
    {
        self.sequence.iter().for_each(visit);
    }

    /// Returns the position of the first element satisfying `predicate`.
    ///
    /// # Errors
    ///
    /// [`SetError::OrderNotObservable`] on an unordered set, where a
    /// position carries no meaning.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::OrderedSet;
    ///
    /// let set = OrderedSet::from_vec_ascending(vec![10, 20, 30]);
    /// assert_eq!(set.scan_until(|value| *value > 15), Ok(Some(1)));
    /// assert_eq!(set.scan_until(|value| *value > 99), Ok(None));
    /// ```
    pub fn scan_until<F>(&self, predicate: F) -> Result<Option<usize>, SetError>
    where
        F: FnMut(&T) -> bool,
    {
        self.ensure_ordered()?;
        Ok(self.sequence.iter().position(predicate))
    }

    /// Returns the position of the first element that does not satisfy
    /// `predicate`.
    ///
    /// # Errors
    ///
    /// [`SetError::OrderNotObservable`] on an unordered set.
    pub fn scan_while<F>(&self, mut predicate: F) -> Result<Option<usize>, SetError>
    where
        F: FnMut(&T) -> bool,
    {
        self.ensure_ordered()?;
        Ok(self.sequence.iter().position(|element| !predicate(element)))
    }

    /// Removes every element, keeping the policy and allocated capacity.
    ///
    /// Snapshots taken with [`to_vec`](Self::to_vec) are unaffected.
    pub fn clear(&mut self) {
        self.index.clear();
        self.sequence.clear();
    }

    const fn ensure_ordered(&self) -> Result<(), SetError> {
        if self.policy.kind().is_ordered() {
            Ok(())
        } else {
            Err(SetError::OrderNotObservable)
        }
    }
}

impl<T: Clone, S> OrderedSet<T, S> {
    /// Returns an independent copy of the elements in policy order.
    ///
    /// Mutating the returned vector never affects the set.
    #[inline]
    #[must_use]
    pub fn to_vec(&self) -> Vec<T> {
        self.sequence.clone()
    }
}

impl<T: Eq + Hash + Clone, S: BuildHasher> OrderedSet<T, S> {
    /// Creates an empty set under `policy` using `hasher` for the index.
    #[must_use]
    pub fn with_hasher_and_policy(hasher: S, policy: Policy<T>) -> Self {
        Self::with_capacity_hasher_and_policy(0, hasher, policy)
    }

    /// Creates an empty set under `policy` with room for `capacity` elements,
    /// using `hasher` for the index.
    #[must_use]
    pub fn with_capacity_hasher_and_policy(capacity: usize, hasher: S, policy: Policy<T>) -> Self {
        Self {
            index: HashMap::with_capacity_and_hasher(capacity, hasher),
            sequence: Vec::with_capacity(capacity),
            policy,
        }
    }

    /// Returns `true` if the set contains `element`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::OrderedSet;
    ///
    /// let set: OrderedSet<String> = ["hello".to_string()].into_iter().collect();
    /// assert!(set.contains("hello"));
    /// assert!(!set.contains("world"));
    /// ```
    #[inline]
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(element)
    }

    /// Returns the position of `element` in policy order.
    #[inline]
    #[must_use]
    pub fn position_of<Q>(&self, element: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.get(element).copied()
    }

    /// Returns `true` if any of `keys` is in the set.
    ///
    /// An empty `keys` yields `false`.
    pub fn contains_any<'a, Q, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'a Q>,
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        keys.into_iter().any(|key| self.contains(key))
    }

    /// Returns `true` if every one of `keys` is in the set.
    ///
    /// An empty `keys` yields `true`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::OrderedSet;
    ///
    /// let set = OrderedSet::from_vec_ascending(vec![1, 2, 3]);
    /// assert!(set.contains_all(&[1, 3]));
    /// assert!(!set.contains_all(&[1, 4]));
    /// assert!(set.contains_any(&[4, 3]));
    /// ```
    pub fn contains_all<'a, Q, I>(&self, keys: I) -> bool
    where
        I: IntoIterator<Item = &'a Q>,
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized + 'a,
    {
        keys.into_iter().all(|key| self.contains(key))
    }

    /// Inserts `element`, returning `true` if it was not already present.
    ///
    /// Re-inserting an element is a no-op: its position does not change.
    /// A new element is placed according to the policy; under a sorted
    /// policy every later element shifts up by one.
    pub fn insert(&mut self, element: T) -> bool {
        if self.index.contains_key(&element) {
            return false;
        }
        let position = self.policy.insertion_point(&self.sequence, &element);
        self.sequence.insert(position, element.clone());
        self.index.insert(element, position);
        self.reindex_from(position + 1);
        self.debug_check_invariants();
        true
    }

    /// Removes `element`, returning `true` if it was present.
    ///
    /// Ordered policies shift every later element down by one, preserving
    /// relative order. The unordered policy moves the last element into the
    /// hole instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::OrderedSet;
    ///
    /// let mut set: OrderedSet<&str> = OrderedSet::new();
    /// set.extend(["a", "b", "c"]);
    /// assert!(set.remove(&"b"));
    /// assert!(!set.remove(&"b"));
    /// assert_eq!(set.to_vec(), vec!["a", "c"]);
    /// ```
    pub fn remove<Q>(&mut self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(position) = self.index.remove(element) else {
            return false;
        };
        match self.policy.compaction() {
            Compaction::Swap => {
                self.sequence.swap_remove(position);
                self.reindex_range(position, (position + 1).min(self.sequence.len()));
            }
            Compaction::Shift => {
                self.sequence.remove(position);
                self.reindex_from(position);
            }
        }
        self.debug_check_invariants();
        true
    }

    /// Rewrites the index entries of every element from `start` onwards.
    fn reindex_from(&mut self, start: usize) {
        self.reindex_range(start, self.sequence.len());
    }

    fn reindex_range(&mut self, start: usize, end: usize) {
        for (position, element) in self.sequence.iter().enumerate().take(end).skip(start) {
            if let Some(slot) = self.index.get_mut(element) {
                *slot = position;
            }
        }
    }

    #[cfg(debug_assertions)]
    fn debug_check_invariants(&self) {
        debug_assert_eq!(
            self.index.len(),
            self.sequence.len(),
            "index and sequence disagree on size"
        );
        for (position, element) in self.sequence.iter().enumerate() {
            debug_assert_eq!(
                self.index.get(element),
                Some(&position),
                "index entry out of step with sequence"
            );
        }
        if let Policy::Sorted(comparator) = &self.policy {
            debug_assert!(
                self.sequence
                    .windows(2)
                    .all(|pair| comparator.compare(&pair[0], &pair[1]).is_le()),
                "sorted sequence out of order"
            );
        }
    }

    #[cfg(not(debug_assertions))]
    #[inline(always)]
    const fn debug_check_invariants(&self) {}
}

impl<T: Eq + Hash + Clone, S: BuildHasher + Clone> OrderedSet<T, S> {
    /// Creates an empty set sharing this set's policy and hasher.
    pub(crate) fn empty_like(&self, capacity: usize) -> Self {
        Self::with_capacity_hasher_and_policy(
            capacity,
            self.index.hasher().clone(),
            self.policy.clone(),
        )
    }

    /// Returns a new set with the same policy holding exactly the elements
    /// that satisfy `predicate`, in their current relative order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::OrderedSet;
    ///
    /// let set = OrderedSet::from_vec_descending(vec![1, 2, 3, 4, 5]);
    /// let even = set.filter(|value| value % 2 == 0);
    /// assert_eq!(even.to_vec(), vec![4, 2]);
    /// ```
    #[must_use]
    pub fn filter<F>(&self, mut predicate: F) -> Self
    where
        F: FnMut(&T) -> bool,
    {
        let mut filtered = self.empty_like(0);
        for element in &self.sequence {
            if predicate(element) {
                filtered.insert(element.clone());
            }
        }
        filtered
    }
}

impl<T: Eq + Hash + Clone, S: BuildHasher> Extend<T> for OrderedSet<T, S> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, items: I) {
        for item in items {
            self.insert(item);
        }
    }
}

/// Collects into an insertion-ordered set.
impl<T: Eq + Hash + Clone, S: BuildHasher + Default> FromIterator<T> for OrderedSet<T, S> {
    fn from_iter<I: IntoIterator<Item = T>>(items: I) -> Self {
        let mut set = Self::with_hasher_and_policy(S::default(), Policy::insertion());
        set.extend(items);
        set
    }
}

impl<T: Eq + Hash + Clone> Default for OrderedSet<T, RandomState> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> fmt::Debug for OrderedSet<T, S>
where
    T: fmt::Debug,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.sequence.iter()).finish()
    }
}

/// Renders the elements in policy order as `{a, b, c}`.
impl<T, S> fmt::Display for OrderedSet<T, S>
where
    T: fmt::Display,
{
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for element in &self.sequence {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

impl<'a, T, S> IntoIterator for &'a OrderedSet<T, S> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, S> IntoIterator for OrderedSet<T, S> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.sequence.into_iter())
    }
}
