//! Read-only access that treats an absent set as empty.
//!
//! Code that holds an `Option<OrderedSet<T>>` (or an `Option<&OrderedSet<T>>`)
//! can query it without first checking whether a set was ever built: an
//! absent set has length zero, contains nothing and iterates nothing.
//! Mutation still needs a realized set, which `Option` does not hand out
//! through this trait.
//!
//! # Examples
//!
//! ```rust
//! use ordset::{OrderedSet, SetRead};
//!
//! let absent: Option<OrderedSet<i32>> = None;
//! assert_eq!(absent.len(), 0);
//! assert!(absent.is_empty());
//! assert!(!absent.contains(&7));
//! assert!(absent.to_vec().is_empty());
//!
//! let present = Some(OrderedSet::from_vec_ascending(vec![2, 1]));
//! assert_eq!(present.as_ref().to_vec(), vec![1, 2]);
//! ```

use std::borrow::Borrow;
use std::hash::{BuildHasher, Hash};

use super::OrderedSet;

/// Read-only set queries, total over absent sets.
pub trait SetRead {
    /// The element type.
    type Item;

    /// Number of elements; `0` for an absent set.
    fn len(&self) -> usize;

    /// `true` if there are no elements or no set at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Membership test; always `false` for an absent set.
    fn contains<Q>(&self, element: &Q) -> bool
    where
        Self::Item: Borrow<Q>,
        Q: Hash + Eq + ?Sized;

    /// The elements in policy order; empty for an absent set.
    fn elements(&self) -> &[Self::Item];

    /// An independent copy of the elements in policy order.
    fn to_vec(&self) -> Vec<Self::Item>
    where
        Self::Item: Clone,
    {
        self.elements().to_vec()
    }

    /// Visits every element once, in policy order.
    fn for_each<F>(&self, visit: F)
    where
        F: FnMut(&Self::Item),
    {
        self.elements().iter().for_each(visit);
    }
}

impl<T: Eq + Hash + Clone, S: BuildHasher> SetRead for OrderedSet<T, S> {
    type Item = T;

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        Self::contains(self, element)
    }

    fn elements(&self) -> &[T] {
        self.borrow_sequence()
    }
}

impl<R: SetRead + ?Sized> SetRead for &R {
    type Item = R::Item;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn contains<Q>(&self, element: &Q) -> bool
    where
        Self::Item: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        (**self).contains(element)
    }

    fn elements(&self) -> &[Self::Item] {
        (**self).elements()
    }
}

impl<R: SetRead> SetRead for Option<R> {
    type Item = R::Item;

    fn len(&self) -> usize {
        self.as_ref().map_or(0, SetRead::len)
    }

    fn contains<Q>(&self, element: &Q) -> bool
    where
        Self::Item: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.as_ref().is_some_and(|set| set.contains(element))
    }

    fn elements(&self) -> &[Self::Item] {
        match self {
            Some(set) => set.elements(),
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_absent_owned_set_reads_as_empty() {
        let absent: Option<OrderedSet<i32>> = None;
        assert_eq!(SetRead::len(&absent), 0);
        assert!(SetRead::is_empty(&absent));
        assert!(!SetRead::contains(&absent, &1));
        assert!(SetRead::to_vec(&absent).is_empty());
        let mut visited = 0;
        SetRead::for_each(&absent, |_| visited += 1);
        assert_eq!(visited, 0);
    }

    #[rstest]
    fn test_absent_borrowed_set_reads_as_empty() {
        let absent: Option<&OrderedSet<String>> = None;
        assert_eq!(absent.len(), 0);
        assert!(!absent.contains("anything"));
        assert!(absent.elements().is_empty());
    }

    #[rstest]
    fn test_present_set_delegates() {
        let set = OrderedSet::from_vec_descending(vec![1, 2, 3]);
        let present = Some(&set);
        assert_eq!(present.len(), 3);
        assert!(present.contains(&2));
        assert_eq!(present.to_vec(), vec![3, 2, 1]);
    }
}
