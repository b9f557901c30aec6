//! # ordset-codegen
//!
//! Emits [`ordset::OrderedSet`] type definitions from textual type
//! descriptors.
//!
//! A front end (a build script, an annotation scanner) collects one
//! [`TypeDescriptor`] per element type that wants a set, hands them to
//! [`emit_all`], and writes the result into the target file. This crate does
//! no file system or network access of its own.
//!
//! ## Example
//!
//! ```rust
//! use ordset::PolicyKind;
//! use ordset_codegen::{TypeDescriptor, emit_all};
//!
//! let descriptors = TypeDescriptor::list_from_json(
//!     r#"[
//!         { "element_type": "u32", "ordering": "unordered" },
//!         { "element_type": "String", "ordering": "insertion", "rename": "TagLog" }
//!     ]"#,
//! )
//! .unwrap();
//!
//! let batch = emit_all(&descriptors).unwrap();
//! assert_eq!(batch.emissions[0].type_name, "U32Set");
//! assert_eq!(batch.emissions[1].type_name, "TagLog");
//! assert!(batch.render().starts_with("use ordset::OrderedSet;\n"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod descriptor;
mod emit;
mod error;

pub use descriptor::{ComparatorSpec, TypeDescriptor};
pub use emit::{Emission, EmissionBatch, emit, emit_all};
pub use error::EmitError;
