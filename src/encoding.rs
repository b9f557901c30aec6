//! Ordered-list encoding of sets.
//!
//! A set encodes to the list of its elements in iteration order. Decoding
//! re-inserts that list, first occurrence winning, into a fresh set of the
//! requested policy.
//!
//! The policy is not part of the encoding. Unordered and insertion policies
//! carry no behavior, and a natural-order comparator can be rebuilt from the
//! element type, so all of these decode. A custom comparator is a function,
//! not data: decoding into a set sorted by one fails with
//! [`DecodeError::UnsupportedComparator`] rather than guessing an order.
//!
//! With the `serde` feature, [`OrderedSet`] serializes as a sequence, and
//! [`PolicySeed`] deserializes one back into a chosen policy.
//!
//! # Examples
//!
//! ```rust
//! use ordset::{OrderedSet, Policy};
//!
//! let set = OrderedSet::from_vec_with_policy(vec!["b", "a", "c"], Policy::insertion());
//! let encoded = set.encode();
//! assert_eq!(encoded, vec!["b", "a", "c"]);
//!
//! let decoded = OrderedSet::decode(Policy::insertion(), encoded).unwrap();
//! assert_eq!(decoded, set);
//! ```

use std::hash::{BuildHasher, Hash, RandomState};

use crate::{Comparator, ComparatorKind, DecodeError, OrderedSet, Policy, PolicyKind, SetDescriptor};

impl<T: Clone, S> OrderedSet<T, S> {
    /// Encodes the set as a list in iteration order.
    ///
    /// Deterministic for insertion and sorted policies; the order of an
    /// unordered set is unspecified.
    #[inline]
    #[must_use]
    pub fn encode(&self) -> Vec<T> {
        self.to_vec()
    }
}

impl<T: Eq + Hash + Clone> OrderedSet<T, RandomState> {
    /// Rebuilds a set under `policy` from an encoded list.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnsupportedComparator`] if `policy` sorts with a custom
    /// comparator.
    pub fn decode(policy: Policy<T>, items: Vec<T>) -> Result<Self, DecodeError> {
        Self::decode_with_hasher(policy, items, RandomState::new())
    }
}

impl<T: Eq + Hash + Clone + Ord + 'static> OrderedSet<T, RandomState> {
    /// Rebuilds a set from an encoded list, naming the policy by its kind
    /// and, for a sorted set, the natural comparator it was sorted with.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::UnsupportedComparator`] if `comparator` is
    ///   [`ComparatorKind::Custom`].
    /// - [`DecodeError::InvalidDescriptor`] if a sorted kind comes without a
    ///   comparator, or another kind comes with one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::{ComparatorKind, OrderedSet, PolicyKind};
    ///
    /// let original = OrderedSet::from_vec_descending(vec![1, 3, 2]);
    /// let decoded = OrderedSet::decode_kind(
    ///     PolicyKind::Sorted,
    ///     Some(ComparatorKind::Descending),
    ///     original.encode(),
    /// )
    /// .unwrap();
    /// assert_eq!(decoded.to_vec(), vec![3, 2, 1]);
    /// ```
    pub fn decode_kind(
        kind: PolicyKind,
        comparator: Option<ComparatorKind>,
        items: Vec<T>,
    ) -> Result<Self, DecodeError> {
        let comparator = comparator
            .map(|comparator| {
                Comparator::natural(comparator).ok_or(DecodeError::UnsupportedComparator)
            })
            .transpose()?;
        let policy = Policy::try_from_descriptor(SetDescriptor { kind, comparator })?;
        Ok(Self::from_vec_with_policy(items, policy))
    }
}

impl<T: Eq + Hash + Clone, S: BuildHasher> OrderedSet<T, S> {
    /// Rebuilds a set under `policy` from an encoded list, indexing with
    /// `hasher`.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnsupportedComparator`] if `policy` sorts with a custom
    /// comparator.
    pub fn decode_with_hasher(
        policy: Policy<T>,
        items: Vec<T>,
        hasher: S,
    ) -> Result<Self, DecodeError> {
        ensure_recoverable(&policy)?;
        let mut set = Self::with_capacity_hasher_and_policy(items.len(), hasher, policy);
        set.extend(items);
        Ok(set)
    }

    /// Replaces the contents of this set with an encoded list, keeping the
    /// set's own policy.
    ///
    /// On error the set is left unchanged.
    ///
    /// # Errors
    ///
    /// [`DecodeError::UnsupportedComparator`] if this set sorts with a custom
    /// comparator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::OrderedSet;
    ///
    /// let mut set = OrderedSet::descending();
    /// set.insert(100);
    /// set.decode_into(vec![1, 3, 2]).unwrap();
    /// assert_eq!(set.to_vec(), vec![3, 2, 1]);
    /// ```
    pub fn decode_into(&mut self, items: Vec<T>) -> Result<(), DecodeError> {
        ensure_recoverable(self.policy())?;
        self.clear();
        self.extend(items);
        Ok(())
    }
}

fn ensure_recoverable<T>(policy: &Policy<T>) -> Result<(), DecodeError> {
    if policy.is_recoverable() {
        Ok(())
    } else {
        tracing::debug!(?policy, "refusing to decode into a custom comparator");
        Err(DecodeError::UnsupportedComparator)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt;
    use std::hash::{BuildHasher, Hash, RandomState};

    use serde::de::{DeserializeSeed, SeqAccess, Visitor};
    use serde::ser::SerializeSeq;

    use crate::{OrderedSet, Policy};

    impl<T: serde::Serialize, S> serde::Serialize for OrderedSet<T, S> {
        fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
        where
            Ser: serde::Serializer,
        {
            let mut seq = serializer.serialize_seq(Some(self.len()))?;
            for element in self {
                seq.serialize_element(element)?;
            }
            seq.end()
        }
    }

    /// Deserializes a sequence into an [`OrderedSet`] under a given policy.
    ///
    /// The policy cannot come from the data, so it is supplied up front.
    /// Deserializing with a custom-comparator policy fails with the
    /// message of [`DecodeError::UnsupportedComparator`](crate::DecodeError).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::{Comparator, OrderedSet, Policy, PolicySeed};
    /// use serde::de::DeserializeSeed;
    ///
    /// let mut deserializer = serde_json::Deserializer::from_str("[3, 1, 2]");
    /// let set: OrderedSet<i32> = PolicySeed::new(Policy::sorted(Comparator::descending()))
    ///     .deserialize(&mut deserializer)
    ///     .unwrap();
    /// assert_eq!(set.to_vec(), vec![3, 2, 1]);
    /// ```
    pub struct PolicySeed<T, S = RandomState> {
        policy: Policy<T>,
        hasher: S,
    }

    impl<T> PolicySeed<T, RandomState> {
        /// A seed producing sets under `policy`.
        #[must_use]
        pub fn new(policy: Policy<T>) -> Self {
            Self::with_hasher(policy, RandomState::new())
        }
    }

    impl<T, S> PolicySeed<T, S> {
        /// A seed producing sets under `policy`, indexed with `hasher`.
        #[must_use]
        pub const fn with_hasher(policy: Policy<T>, hasher: S) -> Self {
            Self { policy, hasher }
        }
    }

    impl<'de, T, S> DeserializeSeed<'de> for PolicySeed<T, S>
    where
        T: serde::Deserialize<'de> + Eq + Hash + Clone,
        S: BuildHasher,
    {
        type Value = OrderedSet<T, S>;

        fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: serde::Deserializer<'de>,
        {
            super::ensure_recoverable(&self.policy)
                .map_err(<D::Error as serde::de::Error>::custom)?;
            deserializer.deserialize_seq(OrderedSetVisitor {
                set: OrderedSet::with_hasher_and_policy(self.hasher, self.policy),
            })
        }
    }

    struct OrderedSetVisitor<T, S> {
        set: OrderedSet<T, S>,
    }

    impl<'de, T, S> Visitor<'de> for OrderedSetVisitor<T, S>
    where
        T: serde::Deserialize<'de> + Eq + Hash + Clone,
        S: BuildHasher,
    {
        type Value = OrderedSet<T, S>;

        fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
            formatter.write_str("a sequence")
        }

        fn visit_seq<A>(mut self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            while let Some(element) = seq.next_element()? {
                self.set.insert(element);
            }
            Ok(self.set)
        }
    }
}

#[cfg(feature = "serde")]
pub use serde_impl::PolicySeed;
