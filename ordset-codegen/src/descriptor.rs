//! Type descriptors: the emitter's input.
//!
//! A descriptor names an element type, the ordering its set keeps, and how
//! the generated items are named and exposed. Descriptors are plain data and
//! usually arrive as JSON:
//!
//! ```json
//! { "element_type": "u32", "ordering": "sorted", "comparator": "descending" }
//! ```

use ordset::PolicyKind;
use serde::{Deserialize, Serialize};
use syn::{Ident, Path, Type};

use crate::EmitError;

/// The comparator a sorted set is generated with.
///
/// In JSON, `"ascending"`, `"descending"` or `{ "custom": "path::to::function" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparatorSpec {
    /// The element type's natural order.
    Ascending,
    /// The reverse of the natural order.
    Descending,
    /// A function `fn(&T, &T) -> Ordering` at the given path.
    Custom(String),
}

impl ComparatorSpec {
    /// Whether sets built with this comparator can be decoded from a plain
    /// list.
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Custom(_))
    }
}

const fn exported_by_default() -> bool {
    true
}

/// Describes one set type to emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeDescriptor {
    /// The element type, as Rust source text.
    pub element_type: String,
    /// The ordering the set keeps.
    pub ordering: PolicyKind,
    /// Required for, and only allowed with, the sorted ordering.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparator: Option<ComparatorSpec>,
    /// `pub` when set, `pub(crate)` otherwise.
    #[serde(default = "exported_by_default")]
    pub exported: bool,
    /// Overrides the derived type name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rename: Option<String>,
}

impl TypeDescriptor {
    /// An exported descriptor with no comparator and the derived name.
    pub fn new(element_type: impl Into<String>, ordering: PolicyKind) -> Self {
        Self {
            element_type: element_type.into(),
            ordering,
            comparator: None,
            exported: true,
            rename: None,
        }
    }

    /// Sets the comparator.
    #[must_use]
    pub fn with_comparator(mut self, comparator: ComparatorSpec) -> Self {
        self.comparator = Some(comparator);
        self
    }

    /// Overrides the generated type name.
    #[must_use]
    pub fn with_rename(mut self, name: impl Into<String>) -> Self {
        self.rename = Some(name.into());
        self
    }

    /// Marks the generated items `pub(crate)`.
    #[must_use]
    pub const fn crate_private(mut self) -> Self {
        self.exported = false;
        self
    }

    /// Parses a single descriptor from JSON.
    ///
    /// The descriptor is not validated; see [`TypeDescriptor::validate`].
    ///
    /// # Errors
    ///
    /// [`EmitError::Json`] if the text is not a descriptor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::PolicyKind;
    /// use ordset_codegen::{ComparatorSpec, TypeDescriptor};
    ///
    /// let descriptor = TypeDescriptor::from_json(
    ///     r#"{ "element_type": "String", "ordering": "sorted", "comparator": { "custom": "crate::by_len" } }"#,
    /// )
    /// .unwrap();
    /// assert_eq!(descriptor.ordering, PolicyKind::Sorted);
    /// assert_eq!(descriptor.comparator, Some(ComparatorSpec::Custom("crate::by_len".into())));
    /// assert!(descriptor.exported);
    /// ```
    pub fn from_json(json: &str) -> Result<Self, EmitError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a list of descriptors from a JSON array.
    ///
    /// # Errors
    ///
    /// [`EmitError::Json`] if the text is not an array of descriptors.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, EmitError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Checks that the descriptor can be emitted.
    ///
    /// # Errors
    ///
    /// - [`EmitError::MissingComparator`] for a sorted ordering without a
    ///   comparator.
    /// - [`EmitError::UnexpectedComparator`] for a comparator on any other
    ///   ordering.
    /// - [`EmitError::InvalidSyntax`] if the element type, rename or custom
    ///   comparator path does not parse.
    /// - [`EmitError::UnnamedType`] if no name can be derived and none is
    ///   given.
    pub fn validate(&self) -> Result<(), EmitError> {
        self.resolve().map(|_| ())
    }

    pub(crate) fn resolve(&self) -> Result<Resolved, EmitError> {
        let comparator = match (self.ordering, &self.comparator) {
            (PolicyKind::Sorted, None) => {
                tracing::debug!(element_type = %self.element_type, "sorted descriptor without comparator");
                return Err(EmitError::MissingComparator {
                    element_type: self.element_type.clone(),
                });
            }
            (PolicyKind::Sorted, Some(comparator)) => Some(comparator),
            (ordering, Some(_)) => {
                tracing::debug!(element_type = %self.element_type, %ordering, "comparator on a non-sorted descriptor");
                return Err(EmitError::UnexpectedComparator {
                    element_type: self.element_type.clone(),
                    ordering,
                });
            }
            (_, None) => None,
        };

        let element: Type = syn::parse_str(&self.element_type)
            .map_err(|error| EmitError::invalid_syntax("element type", &self.element_type, &error))?;

        let name = match &self.rename {
            Some(rename) => syn::parse_str::<Ident>(rename)
                .map_err(|error| EmitError::invalid_syntax("type name", rename, &error))?,
            None => derived_name(&element).ok_or_else(|| EmitError::UnnamedType {
                element_type: self.element_type.clone(),
            })?,
        };

        let comparator = match comparator {
            None => None,
            Some(ComparatorSpec::Ascending) => Some(ResolvedComparator::Ascending),
            Some(ComparatorSpec::Descending) => Some(ResolvedComparator::Descending),
            Some(ComparatorSpec::Custom(path)) => Some(ResolvedComparator::Custom(
                syn::parse_str::<Path>(path)
                    .map_err(|error| EmitError::invalid_syntax("comparator path", path, &error))?,
            )),
        };

        Ok(Resolved {
            element_text: self.element_type.trim().to_owned(),
            element,
            name,
            ordering: self.ordering,
            comparator,
            exported: self.exported,
        })
    }
}

/// A descriptor whose text has been parsed.
pub(crate) struct Resolved {
    pub(crate) element_text: String,
    pub(crate) element: Type,
    pub(crate) name: Ident,
    pub(crate) ordering: PolicyKind,
    pub(crate) comparator: Option<ResolvedComparator>,
    pub(crate) exported: bool,
}

pub(crate) enum ResolvedComparator {
    Ascending,
    Descending,
    Custom(Path),
}

impl Resolved {
    pub(crate) const fn is_recoverable(&self) -> bool {
        !matches!(self.comparator, Some(ResolvedComparator::Custom(_)))
    }
}

/// `<LastSegment>Set`, with the segment in UpperCamel case.
fn derived_name(element: &Type) -> Option<Ident> {
    let Type::Path(type_path) = element else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    let base = upper_camel(&segment.ident.to_string());
    syn::parse_str(&format!("{base}Set")).ok()
}

fn upper_camel(identifier: &str) -> String {
    identifier
        .trim_start_matches("r#")
        .split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut characters = part.chars();
            characters.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(characters).collect()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn name_of(element_type: &str) -> String {
        TypeDescriptor::new(element_type, PolicyKind::Unordered)
            .resolve()
            .unwrap()
            .name
            .to_string()
    }

    #[rstest]
    #[case("u32", "U32Set")]
    #[case("String", "StringSet")]
    #[case("std::time::Instant", "InstantSet")]
    #[case("crate::model::order_id", "OrderIdSet")]
    #[case("Vec<u8>", "VecSet")]
    fn test_derived_name(#[case] element_type: &str, #[case] expected: &str) {
        assert_eq!(name_of(element_type), expected);
    }

    #[rstest]
    fn test_rename_overrides_derived_name() {
        let resolved = TypeDescriptor::new("u8", PolicyKind::Insertion)
            .with_rename("ByteLog")
            .resolve()
            .unwrap();
        assert_eq!(resolved.name.to_string(), "ByteLog");
    }

    #[rstest]
    fn test_sorted_without_comparator_is_rejected() {
        let error = TypeDescriptor::new("u8", PolicyKind::Sorted)
            .validate()
            .unwrap_err();
        assert!(matches!(error, EmitError::MissingComparator { .. }));
    }

    #[rstest]
    #[case(PolicyKind::Unordered)]
    #[case(PolicyKind::Insertion)]
    fn test_comparator_without_sorting_is_rejected(#[case] ordering: PolicyKind) {
        let error = TypeDescriptor::new("u8", ordering)
            .with_comparator(ComparatorSpec::Ascending)
            .validate()
            .unwrap_err();
        assert!(matches!(
            error,
            EmitError::UnexpectedComparator { ordering: rejected, .. } if rejected == ordering
        ));
    }

    #[rstest]
    #[case(TypeDescriptor::new("Vec<", PolicyKind::Unordered), "element type")]
    #[case(TypeDescriptor::new("u8", PolicyKind::Unordered).with_rename("two words"), "type name")]
    #[case(
        TypeDescriptor::new("u8", PolicyKind::Sorted).with_comparator(ComparatorSpec::Custom("not a path".into())),
        "comparator path"
    )]
    fn test_invalid_syntax(#[case] descriptor: TypeDescriptor, #[case] field: &str) {
        let error = descriptor.validate().unwrap_err();
        assert!(matches!(error, EmitError::InvalidSyntax { what, .. } if what == field));
    }

    #[rstest]
    #[case("(u8, u8)")]
    #[case("&'static str")]
    #[case("[u8; 4]")]
    fn test_pathless_type_without_rename_is_unnamed(#[case] element_type: &str) {
        let error = TypeDescriptor::new(element_type, PolicyKind::Unordered)
            .validate()
            .unwrap_err();
        assert!(matches!(
            error,
            EmitError::UnnamedType { element_type: ref rejected } if rejected == element_type
        ));
    }

    #[rstest]
    fn test_tuple_with_rename_is_valid() {
        let descriptor = TypeDescriptor::new("(u8, u8)", PolicyKind::Insertion).with_rename("PairSet");
        assert!(descriptor.validate().is_ok());
    }

    #[rstest]
    fn test_json_defaults() {
        let descriptor =
            TypeDescriptor::from_json(r#"{ "element_type": "i64", "ordering": "insertion" }"#).unwrap();
        assert_eq!(descriptor, TypeDescriptor::new("i64", PolicyKind::Insertion));
    }

    #[rstest]
    fn test_json_rejects_unknown_fields() {
        let result = TypeDescriptor::from_json(
            r#"{ "element_type": "i64", "ordering": "insertion", "order": "key" }"#,
        );
        assert!(matches!(result, Err(EmitError::Json(_))));
    }

    #[rstest]
    fn test_json_list() {
        let descriptors = TypeDescriptor::list_from_json(
            r#"[
                { "element_type": "u8", "ordering": "unordered", "exported": false },
                { "element_type": "u8", "ordering": "sorted", "comparator": "descending", "rename": "Desc" }
            ]"#,
        )
        .unwrap();
        assert_eq!(
            descriptors,
            vec![
                TypeDescriptor::new("u8", PolicyKind::Unordered).crate_private(),
                TypeDescriptor::new("u8", PolicyKind::Sorted)
                    .with_comparator(ComparatorSpec::Descending)
                    .with_rename("Desc"),
            ]
        );
    }

    #[rstest]
    fn test_recoverable_comparators() {
        assert!(ComparatorSpec::Ascending.is_recoverable());
        assert!(ComparatorSpec::Descending.is_recoverable());
        assert!(!ComparatorSpec::Custom("f".into()).is_recoverable());
    }
}
