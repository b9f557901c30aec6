//! Ordering policies.
//!
//! A [`Policy`] decides where a newly inserted element lands in a set's
//! backing sequence and how removal keeps that sequence dense:
//!
//! | Policy              | Placement                         | Removal            |
//! |---------------------|-----------------------------------|--------------------|
//! | `Unordered`         | appended (position not stable)    | swap with last, O(1) |
//! | `Insertion`         | appended at `len()`               | shift-compact, O(n) |
//! | `Sorted(comparator)`| upper bound by binary search      | shift-compact, O(n) |
//!
//! The comparator of a sorted policy is a runtime strategy value rather than
//! a compile-time parameter: two sets over the same element type can sort in
//! different directions, and the choice is made when the set is built.
//!
//! # Examples
//!
//! ```rust
//! use ordset::{Comparator, OrderedSet, Policy};
//!
//! let mut by_length = OrderedSet::with_policy(Policy::sorted(Comparator::custom(
//!     |left: &&str, right: &&str| left.len().cmp(&right.len()),
//! )));
//! by_length.insert("three");
//! by_length.insert("a");
//! by_length.insert("of");
//! assert_eq!(by_length.to_vec(), vec!["a", "of", "three"]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use crate::SetError;

/// The shape of a policy, without its comparator.
///
/// This is the part of a policy that can travel as data: it appears in
/// policy descriptors and is what a decoder is asked to rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PolicyKind {
    /// Arbitrary order, O(1) insert and remove.
    Unordered,
    /// First-insertion order.
    Insertion,
    /// Total order defined by a comparator.
    Sorted,
}

impl PolicyKind {
    /// Returns `true` if iteration order is observable under this policy.
    #[inline]
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        !matches!(self, Self::Unordered)
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unordered => "unordered",
            Self::Insertion => "insertion",
            Self::Sorted => "sorted",
        };
        formatter.write_str(name)
    }
}

/// Where a comparator came from.
///
/// Natural-order comparators are derived from the element type's [`Ord`]
/// implementation and can be rebuilt from nothing but the type. Custom
/// comparators are arbitrary behavior and cannot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ComparatorKind {
    /// `Ord::cmp`.
    Ascending,
    /// `Ord::cmp`, reversed.
    Descending,
    /// A caller-supplied function.
    Custom,
}

type CompareFn<T> = dyn Fn(&T, &T) -> Ordering + Send + Sync + 'static;

/// A total order over `T`, held by a sorted set.
///
/// Cloning a comparator is cheap: the function is shared behind an [`Arc`]
/// and never mutated.
///
/// The comparator must define a strict total order that agrees with `T`'s
/// equality. Two distinct elements that compare `Equal` are tolerated (the
/// later one is placed after the earlier one) but equality, not the
/// comparator, decides identity.
pub struct Comparator<T> {
    kind: ComparatorKind,
    compare: Arc<CompareFn<T>>,
}

impl<T: Ord + 'static> Comparator<T> {
    /// The natural ascending order of `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::Comparator;
    /// use std::cmp::Ordering;
    ///
    /// let comparator = Comparator::<i32>::ascending();
    /// assert_eq!(comparator.compare(&1, &2), Ordering::Less);
    /// ```
    #[must_use]
    pub fn ascending() -> Self {
        Self {
            kind: ComparatorKind::Ascending,
            compare: Arc::new(|left: &T, right: &T| left.cmp(right)),
        }
    }

    /// The natural descending order of `T`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::Comparator;
    /// use std::cmp::Ordering;
    ///
    /// let comparator = Comparator::<i32>::descending();
    /// assert_eq!(comparator.compare(&1, &2), Ordering::Greater);
    /// ```
    #[must_use]
    pub fn descending() -> Self {
        Self {
            kind: ComparatorKind::Descending,
            compare: Arc::new(|left: &T, right: &T| right.cmp(left)),
        }
    }

    /// Rebuilds a natural-order comparator from its kind.
    ///
    /// Returns `None` for [`ComparatorKind::Custom`].
    #[must_use]
    pub fn natural(kind: ComparatorKind) -> Option<Self> {
        match kind {
            ComparatorKind::Ascending => Some(Self::ascending()),
            ComparatorKind::Descending => Some(Self::descending()),
            ComparatorKind::Custom => None,
        }
    }
}

impl<T> Comparator<T> {
    /// Wraps a caller-supplied ordering function.
    ///
    /// Sets sorted by a custom comparator cannot be decoded from their list
    /// encoding, since the function itself is not part of the data.
    pub fn custom<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            kind: ComparatorKind::Custom,
            compare: Arc::new(compare),
        }
    }

    /// Compares two elements.
    #[inline]
    pub fn compare(&self, left: &T, right: &T) -> Ordering {
        (self.compare)(left, right)
    }

    /// Returns the comparator's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ComparatorKind {
        self.kind
    }

    /// Returns `true` if this comparator can be rebuilt from the element
    /// type alone.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self.kind, ComparatorKind::Custom)
    }
}

impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            compare: Arc::clone(&self.compare),
        }
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Comparator")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}

/// How removal keeps the backing sequence dense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Compaction {
    /// Move the last element into the hole.
    Swap,
    /// Shift every later element down by one.
    Shift,
}

/// The ordering discipline of a set, fixed at construction.
///
/// # Examples
///
/// ```rust
/// use ordset::{Comparator, Policy, PolicyKind};
///
/// assert_eq!(Policy::<i32>::insertion().kind(), PolicyKind::Insertion);
/// assert_eq!(Policy::sorted(Comparator::<i32>::ascending()).kind(), PolicyKind::Sorted);
/// ```
pub enum Policy<T> {
    /// Arbitrary order, swap-based removal.
    Unordered,
    /// Append order, shift-compacting removal.
    Insertion,
    /// Comparator order, binary-search placement.
    Sorted(Comparator<T>),
}

impl<T> Policy<T> {
    /// The unordered policy.
    #[inline]
    #[must_use]
    pub const fn unordered() -> Self {
        Self::Unordered
    }

    /// The insertion-order policy.
    #[inline]
    #[must_use]
    pub const fn insertion() -> Self {
        Self::Insertion
    }

    /// A sorted policy using `comparator`.
    #[inline]
    #[must_use]
    pub const fn sorted(comparator: Comparator<T>) -> Self {
        Self::Sorted(comparator)
    }

    /// Builds a policy from a descriptor, checking its preconditions.
    ///
    /// # Errors
    ///
    /// - [`SetError::MissingComparator`] if the descriptor asks for a sorted
    ///   policy without supplying a comparator.
    /// - [`SetError::UnexpectedComparator`] if a comparator is supplied for
    ///   a policy that does not sort.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::{Comparator, Policy, PolicyKind, SetDescriptor};
    ///
    /// let descriptor = SetDescriptor::new(PolicyKind::Sorted)
    ///     .with_comparator(Comparator::<u8>::descending());
    /// let policy = Policy::try_from_descriptor(descriptor).unwrap();
    /// assert_eq!(policy.kind(), PolicyKind::Sorted);
    /// ```
    pub fn try_from_descriptor(descriptor: SetDescriptor<T>) -> Result<Self, SetError> {
        let SetDescriptor { kind, comparator } = descriptor;
        let result = match (kind, comparator) {
            (PolicyKind::Unordered, None) => Ok(Self::Unordered),
            (PolicyKind::Insertion, None) => Ok(Self::Insertion),
            (PolicyKind::Sorted, Some(comparator)) => Ok(Self::Sorted(comparator)),
            (PolicyKind::Sorted, None) => Err(SetError::MissingComparator),
            (kind, Some(_)) => Err(SetError::UnexpectedComparator(kind)),
        };
        match &result {
            Ok(_) => tracing::debug!(%kind, "built policy from descriptor"),
            Err(error) => tracing::debug!(%kind, %error, "rejected policy descriptor"),
        }
        result
    }

    /// Returns the policy's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> PolicyKind {
        match self {
            Self::Unordered => PolicyKind::Unordered,
            Self::Insertion => PolicyKind::Insertion,
            Self::Sorted(_) => PolicyKind::Sorted,
        }
    }

    /// Returns the comparator of a sorted policy.
    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> Option<&Comparator<T>> {
        match self {
            Self::Sorted(comparator) => Some(comparator),
            Self::Unordered | Self::Insertion => None,
        }
    }

    /// Returns `true` if a set under this policy can be rebuilt from its
    /// list encoding alone.
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        match self {
            Self::Sorted(comparator) => comparator.is_recoverable(),
            Self::Unordered | Self::Insertion => true,
        }
    }

    /// Position at which `element` enters `sequence`.
    ///
    /// For a sorted policy this is the upper bound: the first position whose
    /// element compares greater than `element`, so ties land after existing
    /// equals. Every other policy appends.
    pub(crate) fn insertion_point(&self, sequence: &[T], element: &T) -> usize {
        match self {
            Self::Sorted(comparator) => sequence
                .partition_point(|existing| comparator.compare(existing, element) != Ordering::Greater),
            Self::Unordered | Self::Insertion => sequence.len(),
        }
    }

    pub(crate) const fn compaction(&self) -> Compaction {
        match self {
            Self::Unordered => Compaction::Swap,
            Self::Insertion | Self::Sorted(_) => Compaction::Shift,
        }
    }
}

impl<T> Clone for Policy<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Unordered => Self::Unordered,
            Self::Insertion => Self::Insertion,
            Self::Sorted(comparator) => Self::Sorted(comparator.clone()),
        }
    }
}

impl<T> fmt::Debug for Policy<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unordered => formatter.write_str("Unordered"),
            Self::Insertion => formatter.write_str("Insertion"),
            Self::Sorted(comparator) => formatter
                .debug_tuple("Sorted")
                .field(&comparator.kind())
                .finish(),
        }
    }
}

impl<T> Default for Policy<T> {
    fn default() -> Self {
        Self::Insertion
    }
}

/// The per-instantiation request a generator front end hands to the engine.
///
/// A descriptor pairs a [`PolicyKind`] with an optional comparator; the
/// comparator is required if and only if the kind is
/// [`PolicyKind::Sorted`]. [`Policy::try_from_descriptor`] enforces this.
pub struct SetDescriptor<T> {
    /// Requested ordering.
    pub kind: PolicyKind,
    /// Comparator for a sorted ordering.
    pub comparator: Option<Comparator<T>>,
}

impl<T> SetDescriptor<T> {
    /// A descriptor without a comparator.
    #[must_use]
    pub const fn new(kind: PolicyKind) -> Self {
        Self {
            kind,
            comparator: None,
        }
    }

    /// Attaches a comparator.
    #[must_use]
    pub fn with_comparator(self, comparator: Comparator<T>) -> Self {
        Self {
            comparator: Some(comparator),
            ..self
        }
    }
}

impl<T> fmt::Debug for SetDescriptor<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SetDescriptor")
            .field("kind", &self.kind)
            .field("comparator", &self.comparator)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_ascending_and_descending_are_mirrored() {
        let ascending = Comparator::<i32>::ascending();
        let descending = Comparator::<i32>::descending();
        for (left, right) in [(1, 2), (2, 1), (3, 3)] {
            assert_eq!(
                ascending.compare(&left, &right),
                descending.compare(&left, &right).reverse()
            );
        }
    }

    #[rstest]
    #[case(ComparatorKind::Ascending, true)]
    #[case(ComparatorKind::Descending, true)]
    #[case(ComparatorKind::Custom, false)]
    fn test_natural_rebuilds_only_recoverable_kinds(
        #[case] kind: ComparatorKind,
        #[case] rebuilt: bool,
    ) {
        let comparator = Comparator::<i32>::natural(kind);
        assert_eq!(comparator.is_some(), rebuilt);
        if let Some(comparator) = comparator {
            assert_eq!(comparator.kind(), kind);
        }
    }

    #[rstest]
    fn test_custom_comparator_is_not_recoverable() {
        let comparator = Comparator::custom(|left: &i32, right: &i32| left.abs().cmp(&right.abs()));
        assert!(!comparator.is_recoverable());
        assert!(!Policy::sorted(comparator).is_recoverable());
    }

    #[rstest]
    fn test_descriptor_sorted_without_comparator_is_rejected() {
        let descriptor: SetDescriptor<i32> = SetDescriptor::new(PolicyKind::Sorted);
        assert_eq!(
            Policy::try_from_descriptor(descriptor).unwrap_err(),
            SetError::MissingComparator
        );
    }

    #[rstest]
    #[case(PolicyKind::Unordered)]
    #[case(PolicyKind::Insertion)]
    fn test_descriptor_comparator_on_unsorted_policy_is_rejected(#[case] kind: PolicyKind) {
        let descriptor = SetDescriptor::new(kind).with_comparator(Comparator::<i32>::ascending());
        assert_eq!(
            Policy::try_from_descriptor(descriptor).unwrap_err(),
            SetError::UnexpectedComparator(kind)
        );
    }

    #[rstest]
    #[case(PolicyKind::Unordered)]
    #[case(PolicyKind::Insertion)]
    fn test_descriptor_without_comparator_builds(#[case] kind: PolicyKind) {
        let descriptor: SetDescriptor<i32> = SetDescriptor::new(kind);
        let policy = Policy::try_from_descriptor(descriptor).unwrap();
        assert_eq!(policy.kind(), kind);
        assert!(policy.comparator().is_none());
    }

    #[rstest]
    fn test_sorted_insertion_point_is_upper_bound() {
        let policy = Policy::sorted(Comparator::<i32>::ascending());
        let sequence = [1, 3, 3, 5];
        assert_eq!(policy.insertion_point(&sequence, &0), 0);
        assert_eq!(policy.insertion_point(&sequence, &3), 3);
        assert_eq!(policy.insertion_point(&sequence, &4), 3);
        assert_eq!(policy.insertion_point(&sequence, &9), 4);
    }

    #[rstest]
    #[case(Policy::<i32>::unordered())]
    #[case(Policy::<i32>::insertion())]
    fn test_unsorted_policies_append(#[case] policy: Policy<i32>) {
        assert_eq!(policy.insertion_point(&[9, 1, 5], &3), 3);
    }

    #[rstest]
    fn test_compaction_strategy_per_policy() {
        assert_eq!(Policy::<i32>::unordered().compaction(), Compaction::Swap);
        assert_eq!(Policy::<i32>::insertion().compaction(), Compaction::Shift);
        assert_eq!(
            Policy::sorted(Comparator::<i32>::ascending()).compaction(),
            Compaction::Shift
        );
    }

    #[rstest]
    fn test_policy_debug_hides_function() {
        let policy = Policy::sorted(Comparator::<i32>::descending());
        assert_eq!(format!("{policy:?}"), "Sorted(Descending)");
    }

    #[rstest]
    fn test_policy_kind_display() {
        assert_eq!(PolicyKind::Sorted.to_string(), "sorted");
        assert!(PolicyKind::Insertion.is_ordered());
        assert!(!PolicyKind::Unordered.is_ordered());
    }
}
