//! Set algebra over [`OrderedSet`].
//!
//! Every binary operation builds its result with the **first** operand's
//! policy (comparator included) and goes through `insert`, so the result
//! satisfies the same invariants as any other set under that policy.
//!
//! # Examples
//!
//! ```rust
//! use ordset::OrderedSet;
//!
//! let left = OrderedSet::from_vec_ascending(vec![1, 2, 3]);
//! let right = OrderedSet::from_vec_ascending(vec![2, 3, 4]);
//!
//! assert_eq!(left.union(&right).to_vec(), vec![1, 2, 3, 4]);
//! assert_eq!(left.intersection(&right).to_vec(), vec![2, 3]);
//! assert_eq!(left.difference(&right).to_vec(), vec![1]);
//! ```

use std::hash::{BuildHasher, Hash};

use super::OrderedSet;
use crate::PolicyKind;

impl<T: Eq + Hash + Clone, S: BuildHasher + Clone> OrderedSet<T, S> {
    /// Returns a set holding every element of `self` and `other`.
    ///
    /// Under the insertion policy the result lists `self`'s elements in
    /// their order, followed by `other`'s new elements in `other`'s order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::OrderedSet;
    ///
    /// let left: OrderedSet<i32> = [1, 2].into_iter().collect();
    /// let right: OrderedSet<i32> = [3, 2].into_iter().collect();
    /// assert_eq!(left.union(&right).to_vec(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn union<S2: BuildHasher>(&self, other: &OrderedSet<T, S2>) -> Self {
        let mut union = self.clone();
        union.union_in_place(other);
        union
    }

    /// Returns a set holding the elements present in both `self` and `other`.
    ///
    /// Membership is probed from the smaller operand when order does not
    /// depend on which side is walked (unordered and sorted policies). The
    /// insertion policy always walks `self`, keeping `self`'s relative order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::OrderedSet;
    ///
    /// let left: OrderedSet<i32> = [3, 2, 1].into_iter().collect();
    /// let right: OrderedSet<i32> = [1, 2, 4].into_iter().collect();
    /// assert_eq!(left.intersection(&right).to_vec(), vec![2, 1]);
    /// ```
    #[must_use]
    pub fn intersection<S2: BuildHasher>(&self, other: &OrderedSet<T, S2>) -> Self {
        let mut intersection = self.empty_like(self.len().min(other.len()));
        let walk_other =
            self.policy().kind() != PolicyKind::Insertion && other.len() < self.len();
        if walk_other {
            for element in other {
                if self.contains(element) {
                    intersection.insert(element.clone());
                }
            }
        } else {
            for element in self {
                if other.contains(element) {
                    intersection.insert(element.clone());
                }
            }
        }
        intersection
    }

    /// Returns the elements of `self` that are not in `other`, in `self`'s
    /// order.
    #[must_use]
    pub fn difference<S2: BuildHasher>(&self, other: &OrderedSet<T, S2>) -> Self {
        let mut difference = self.empty_like(0);
        for element in self {
            if !other.contains(element) {
                difference.insert(element.clone());
            }
        }
        difference
    }
}

impl<T: Eq + Hash + Clone, S: BuildHasher> OrderedSet<T, S> {
    /// Inserts every element of `other` into `self`, in `other`'s order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::OrderedSet;
    ///
    /// let mut set = OrderedSet::from_vec_descending(vec![1, 5]);
    /// set.union_in_place(&OrderedSet::from_vec_ascending(vec![3, 5, 7]));
    /// assert_eq!(set.to_vec(), vec![7, 5, 3, 1]);
    /// ```
    pub fn union_in_place<S2>(&mut self, other: &OrderedSet<T, S2>) {
        for element in other {
            self.insert(element.clone());
        }
    }

    /// Returns `true` if both sets hold the same elements, regardless of
    /// order or policy.
    #[must_use]
    pub fn set_eq<S2: BuildHasher>(&self, other: &OrderedSet<T, S2>) -> bool {
        self.len() == other.len() && self.iter().all(|element| other.contains(element))
    }

    /// Returns `true` if every element of `self` is in `other`.
    #[must_use]
    pub fn is_subset_of<S2: BuildHasher>(&self, other: &OrderedSet<T, S2>) -> bool {
        self.len() <= other.len() && self.iter().all(|element| other.contains(element))
    }

    /// Returns `true` if every element of `other` is in `self`.
    #[must_use]
    pub fn is_superset_of<S2: BuildHasher>(&self, other: &OrderedSet<T, S2>) -> bool {
        other.is_subset_of(self)
    }

    /// Returns `true` if `self` is a subset of `other` and the two are not
    /// equal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::OrderedSet;
    ///
    /// let small: OrderedSet<i32> = [1, 2].into_iter().collect();
    /// let large: OrderedSet<i32> = [1, 2, 3].into_iter().collect();
    /// assert!(small.is_proper_subset_of(&large));
    /// assert!(!small.is_proper_subset_of(&small.clone()));
    /// ```
    #[must_use]
    pub fn is_proper_subset_of<S2: BuildHasher>(&self, other: &OrderedSet<T, S2>) -> bool {
        self.len() < other.len() && self.is_subset_of(other)
    }

    /// Returns `true` if `self` is a superset of `other` and the two are not
    /// equal.
    #[must_use]
    pub fn is_proper_superset_of<S2: BuildHasher>(&self, other: &OrderedSet<T, S2>) -> bool {
        other.is_proper_subset_of(self)
    }
}

/// Set equality: same elements, order and policy ignored.
impl<T, S, S2> PartialEq<OrderedSet<T, S2>> for OrderedSet<T, S>
where
    T: Eq + Hash + Clone,
    S: BuildHasher,
    S2: BuildHasher,
{
    fn eq(&self, other: &OrderedSet<T, S2>) -> bool {
        self.set_eq(other)
    }
}

impl<T: Eq + Hash + Clone, S: BuildHasher> Eq for OrderedSet<T, S> {}

#[cfg(test)]
mod tests {
    use crate::{Comparator, OrderedSet, Policy};
    use rstest::rstest;

    fn insertion(items: &[i32]) -> OrderedSet<i32> {
        OrderedSet::from_vec_with_policy(items.to_vec(), Policy::insertion())
    }

    #[rstest]
    fn test_union_absorbs_duplicates() {
        let union = insertion(&[1, 2]).union(&insertion(&[2, 3]));
        assert_eq!(union, insertion(&[1, 2, 3]));
        assert_eq!(union.to_vec(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_union_insertion_order_appends_new_elements_of_other() {
        let union = insertion(&[5, 1]).union(&insertion(&[9, 1, 7]));
        assert_eq!(union.to_vec(), vec![5, 1, 9, 7]);
    }

    #[rstest]
    fn test_union_leaves_operands_untouched() {
        let left = insertion(&[1]);
        let right = insertion(&[2]);
        let _ = left.union(&right);
        assert_eq!(left.to_vec(), vec![1]);
        assert_eq!(right.to_vec(), vec![2]);
    }

    #[rstest]
    fn test_intersection_values() {
        let intersection = insertion(&[1, 2, 3]).intersection(&insertion(&[2, 3, 4]));
        assert_eq!(intersection, insertion(&[2, 3]));
    }

    #[rstest]
    fn test_intersection_insertion_keeps_first_operand_order() {
        let intersection = insertion(&[4, 3, 2, 1]).intersection(&insertion(&[1, 2]));
        assert_eq!(intersection.to_vec(), vec![2, 1]);
    }

    #[rstest]
    fn test_intersection_sorted_walks_smaller_side_and_stays_sorted() {
        let large = OrderedSet::from_vec_descending((1..=20).collect());
        let small = OrderedSet::from_vec_ascending(vec![3, 15, 40]);
        let intersection = large.intersection(&small);
        assert_eq!(intersection.to_vec(), vec![15, 3]);
    }

    #[rstest]
    fn test_intersection_is_commutative_as_sets() {
        let left = insertion(&[1, 2, 3, 4, 5]);
        let right = insertion(&[4, 5, 6]);
        assert_eq!(left.intersection(&right), right.intersection(&left));
    }

    #[rstest]
    fn test_intersection_with_empty() {
        let empty = insertion(&[]);
        assert!(insertion(&[1, 2]).intersection(&empty).is_empty());
        assert!(empty.intersection(&insertion(&[1, 2])).is_empty());
    }

    #[rstest]
    fn test_difference_preserves_first_operand_order() {
        let difference = insertion(&[1, 2, 3]).difference(&insertion(&[2]));
        assert_eq!(difference.to_vec(), vec![1, 3]);
    }

    #[rstest]
    fn test_result_inherits_first_operand_policy() {
        let descending = OrderedSet::from_vec_descending(vec![1, 2]);
        let ascending = OrderedSet::from_vec_ascending(vec![3, 4]);
        let mut union = descending.union(&ascending);
        assert_eq!(union.to_vec(), vec![4, 3, 2, 1]);
        union.insert(10);
        assert_eq!(union.first(), Some(&10));
    }

    #[rstest]
    fn test_equality_ignores_order_and_policy() {
        let ascending = OrderedSet::from_vec_ascending(vec![1, 2, 3]);
        let custom = OrderedSet::from_vec_with_policy(
            vec![3, 1, 2],
            Policy::sorted(Comparator::custom(|left: &i32, right: &i32| {
                (left % 2).cmp(&(right % 2)).then(left.cmp(right))
            })),
        );
        assert_eq!(ascending, custom);
        assert_ne!(ascending, insertion(&[1, 2]));
        assert_ne!(insertion(&[1, 2]), insertion(&[1, 3]));
    }

    #[rstest]
    #[case(&[1, 2], &[1, 2, 3], true, true)]
    #[case(&[1, 2], &[1, 2], true, false)]
    #[case(&[1, 4], &[1, 2, 3], false, false)]
    #[case(&[], &[1], true, true)]
    #[case(&[], &[], true, false)]
    fn test_subset_relations(
        #[case] left: &[i32],
        #[case] right: &[i32],
        #[case] subset: bool,
        #[case] proper_subset: bool,
    ) {
        let left = insertion(left);
        let right = insertion(right);
        assert_eq!(left.is_subset_of(&right), subset);
        assert_eq!(left.is_proper_subset_of(&right), proper_subset);
        assert_eq!(right.is_superset_of(&left), subset);
        assert_eq!(right.is_proper_superset_of(&left), proper_subset);
    }

    #[rstest]
    fn test_union_in_place_uses_receiver_policy() {
        let mut set = OrderedSet::unordered();
        set.extend([1, 2]);
        set.union_in_place(&insertion(&[2, 3]));
        assert_eq!(set.len(), 3);
        assert!(set.contains_all(&[1, 2, 3]));
    }
}
