//! # ordset
//!
//! A set engine that keeps a hash index and a dense element sequence in
//! step, parameterized by an ordering policy chosen at construction.
//!
//! ## Overview
//!
//! - **Engine**: [`OrderedSet`] maps each element to its position and holds
//!   the elements in a contiguous sequence, so membership is O(1) and
//!   iteration follows a well-defined order.
//! - **Policies**: [`Policy`] selects unordered, insertion-order or
//!   comparator-sorted placement. Comparators are runtime values
//!   ([`Comparator`]), so one element type can back sets sorted in different
//!   directions.
//! - **Set algebra**: union, intersection, difference, equality and
//!   (proper) subset/superset relations.
//! - **Encoding**: sets encode to ordered lists and decode back into a
//!   chosen policy, refusing custom comparators that cannot be recovered.
//! - **Absent sets**: [`SetRead`] lets `Option<OrderedSet<T>>` be queried as
//!   an empty set.
//!
//! ## Feature Flags
//!
//! - `serde` (default): `Serialize` for [`OrderedSet`] and the
//!   [`PolicySeed`] deserializer
//! - `fxhash`: [`FxOrderedSet`] indexed with `rustc-hash`
//! - `ahash`: [`AOrderedSet`] indexed with `ahash`
//!
//! ## Concurrency
//!
//! No operation locks. An `OrderedSet` is `Send` and `Sync` when its element
//! and hasher types are, but concurrent mutation needs external exclusion;
//! clone the set to hand independent copies to readers.
//!
//! ## Example
//!
//! ```rust
//! use ordset::prelude::*;
//!
//! let mut tags = OrderedSet::new();
//! tags.extend(["beta", "alpha", "beta", "gamma"]);
//! assert_eq!(tags.to_vec(), vec!["beta", "alpha", "gamma"]);
//!
//! let sorted = OrderedSet::from_vec_ascending(tags.encode());
//! assert_eq!(sorted.to_vec(), vec!["alpha", "beta", "gamma"]);
//! assert_eq!(tags, sorted);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```rust
/// use ordset::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Comparator, ComparatorKind, DecodeError, OrderedSet, Policy, PolicyKind, SetDescriptor,
        SetError, SetRead,
    };

    #[cfg(feature = "serde")]
    pub use crate::PolicySeed;
}

mod encoding;
mod error;
mod policy;
mod set;

pub use error::{DecodeError, SetError};
pub use policy::{Comparator, ComparatorKind, Policy, PolicyKind, SetDescriptor};
pub use set::{IntoIter, Iter, OrderedSet, SetRead};

#[cfg(feature = "serde")]
pub use encoding::PolicySeed;

/// An [`OrderedSet`] indexed with `rustc-hash`'s Fx hasher.
#[cfg(feature = "fxhash")]
pub type FxOrderedSet<T> = OrderedSet<T, rustc_hash::FxBuildHasher>;

/// An [`OrderedSet`] indexed with `ahash`.
#[cfg(feature = "ahash")]
pub type AOrderedSet<T> = OrderedSet<T, ahash::RandomState>;

static_assertions::assert_impl_all!(OrderedSet<i32>: Send, Sync, Clone);
static_assertions::assert_impl_all!(Policy<String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(SetError: std::error::Error, Send, Sync, Copy);
static_assertions::assert_impl_all!(DecodeError: std::error::Error, Send, Sync, Copy);
