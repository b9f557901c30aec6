//! Error types for set construction, ordered scans and decoding.
//!
//! Reading an absent set is not an error (see [`SetRead`](crate::SetRead)),
//! and none of the engine's mutating operations can fail. The errors below
//! cover the remaining cases: a policy descriptor that breaks its own
//! preconditions, an order-sensitive query against an unordered set, and a
//! decode whose target ordering cannot be rebuilt from data alone.

use thiserror::Error;

/// Errors raised while building a policy or querying an order-sensitive view.
///
/// # Examples
///
/// ```rust
/// use ordset::{Policy, PolicyKind, SetDescriptor, SetError};
///
/// let descriptor: SetDescriptor<i32> = SetDescriptor::new(PolicyKind::Sorted);
/// let error = Policy::try_from_descriptor(descriptor).unwrap_err();
/// assert_eq!(error, SetError::MissingComparator);
/// assert_eq!(
///     format!("{error}"),
///     "sorted policy requires a comparator"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SetError {
    /// A sorted policy was requested without a comparator.
    #[error("sorted policy requires a comparator")]
    MissingComparator,
    /// A comparator was supplied for a policy that does not sort.
    #[error("comparator supplied for the {0} policy, which does not sort")]
    UnexpectedComparator(crate::PolicyKind),
    /// An order-sensitive scan was requested on an unordered set.
    #[error("iteration order is not observable under the unordered policy")]
    OrderNotObservable,
}

/// Errors raised while rebuilding a set from its ordered-list encoding.
///
/// # Examples
///
/// ```rust
/// use ordset::{Comparator, DecodeError, OrderedSet, Policy};
///
/// let policy = Policy::sorted(Comparator::custom(|left: &i32, right: &i32| {
///     (left % 10).cmp(&(right % 10))
/// }));
/// let result = OrderedSet::decode(policy, vec![1, 2, 3]);
/// assert_eq!(result.unwrap_err(), DecodeError::UnsupportedComparator);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The target policy sorts with a custom comparator, which is behavior
    /// rather than data and therefore cannot be recovered from the encoding.
    #[error("unsupported: a custom comparator cannot be recovered from encoded data")]
    UnsupportedComparator,
    /// The requested policy kind and comparator do not describe a valid
    /// policy.
    #[error(transparent)]
    InvalidDescriptor(#[from] SetError),
}
