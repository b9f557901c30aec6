//! Rendering descriptors into Rust source.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use ordset::{OrderedSet, PolicyKind};
use proc_macro2::TokenStream;
use quote::{format_ident, quote};

use crate::EmitError;
use crate::descriptor::{Resolved, ResolvedComparator, TypeDescriptor};

const ORDERED_SET: &str = "ordset::OrderedSet";
const POLICY: &str = "ordset::Policy";
const COMPARATOR: &str = "ordset::Comparator";
const DECODE_ERROR: &str = "ordset::DecodeError";

/// The generated definition for one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    /// Name of the generated type alias.
    pub type_name: String,
    /// The alias and its constructor functions, as Rust source.
    pub definition: String,
    /// `use` paths the definition needs in scope, without the `use` keyword.
    pub prerequisites: Vec<String>,
}

/// The generated definitions for a batch of descriptors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmissionBatch {
    /// One emission per descriptor, in input order.
    pub emissions: Vec<Emission>,
    /// Every emission's prerequisites, each listed once, in first-seen order.
    pub prerequisites: Vec<String>,
}

impl EmissionBatch {
    /// Renders a complete source fragment: the merged `use` lines followed by
    /// every definition.
    pub fn render(&self) -> String {
        let mut source = String::new();
        for path in &self.prerequisites {
            source.push_str("use ");
            source.push_str(path);
            source.push_str(";\n");
        }
        for emission in &self.emissions {
            source.push('\n');
            source.push_str(&emission.definition);
            source.push('\n');
        }
        source
    }
}

/// Emits the set definition for one descriptor.
///
/// The definition is a type alias `<Name> = OrderedSet<Element>` plus:
///
/// - `new_<name>(capacity)`, an empty set with the descriptor's policy;
/// - `<name>_from_vec(items)`, a set built from a list, first occurrence
///   winning;
/// - `decode_<name>(items)`, only when the comparator can be rebuilt.
///
/// # Errors
///
/// Any error [`TypeDescriptor::validate`] reports.
///
/// # Examples
///
/// ```rust
/// use ordset::PolicyKind;
/// use ordset_codegen::{ComparatorSpec, TypeDescriptor, emit};
///
/// let descriptor = TypeDescriptor::new("u32", PolicyKind::Sorted)
///     .with_comparator(ComparatorSpec::Descending);
/// let emission = emit(&descriptor).unwrap();
///
/// assert_eq!(emission.type_name, "U32Set");
/// assert!(emission.definition.contains("fn decode_u32_set"));
/// assert!(emission.prerequisites.contains(&"ordset::Comparator".to_string()));
/// ```
pub fn emit(descriptor: &TypeDescriptor) -> Result<Emission, EmitError> {
    let resolved = descriptor.resolve()?;
    Ok(emission(&resolved))
}

/// Emits every descriptor and merges their prerequisites.
///
/// The batch renders into one file, so every set name (and the functions
/// named after it) and every imported comparator name must be unique across
/// it. Repeating the same comparator path is fine.
///
/// # Errors
///
/// - The first descriptor that fails validation stops the batch.
/// - [`EmitError::DuplicateName`] if two descriptors yield the same set
///   name, or import different comparators under the same name.
pub fn emit_all(descriptors: &[TypeDescriptor]) -> Result<EmissionBatch, EmitError> {
    let mut merged: OrderedSet<String> = OrderedSet::new();
    let mut stems = HashSet::with_capacity(descriptors.len());
    let mut imports: HashMap<String, String> = HashMap::new();
    let mut emissions = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        let resolved = descriptor.resolve()?;
        let type_name = resolved.name.to_string();
        if !stems.insert(snake_case(&type_name)) {
            tracing::debug!(%type_name, "set name emitted twice");
            return Err(EmitError::DuplicateName {
                what: "set name",
                name: type_name,
            });
        }
        if let Some(ResolvedComparator::Custom(path)) = &resolved.comparator
            && let Some(function) = path.segments.last()
        {
            match imports.entry(function.ident.to_string()) {
                Entry::Occupied(entry) if *entry.get() != path_text(path) => {
                    tracing::debug!(name = %entry.key(), "comparator name imported twice");
                    return Err(EmitError::DuplicateName {
                        what: "comparator",
                        name: entry.key().clone(),
                    });
                }
                Entry::Occupied(_) => {}
                Entry::Vacant(entry) => {
                    entry.insert(path_text(path));
                }
            }
        }

        let emission = emission(&resolved);
        tracing::trace!(
            type_name = %emission.type_name,
            count = emission.prerequisites.len(),
            "merging prerequisites"
        );
        merged.extend(emission.prerequisites.iter().cloned());
        emissions.push(emission);
    }
    Ok(EmissionBatch {
        emissions,
        prerequisites: merged.into_iter().collect(),
    })
}

fn emission(resolved: &Resolved) -> Emission {
    let type_name = resolved.name.to_string();
    tracing::debug!(%type_name, ordering = %resolved.ordering, "emitting set definition");
    Emission {
        definition: definition(resolved).to_string(),
        prerequisites: prerequisites(resolved),
        type_name,
    }
}

fn definition(resolved: &Resolved) -> TokenStream {
    let element = &resolved.element;
    let name = &resolved.name;
    let visibility = if resolved.exported {
        quote!(pub)
    } else {
        quote!(pub(crate))
    };
    let snake = snake_case(&name.to_string());
    let new_fn = format_ident!("new_{}", snake);
    let from_vec_fn = format_ident!("{}_from_vec", snake);
    let policy = policy(resolved);

    let alias_doc = format!(
        "Set of `{}` with the {} ordering.",
        resolved.element_text, resolved.ordering
    );
    let new_doc = format!("Creates an empty [`{name}`] with room for `capacity` elements.");
    let from_vec_doc = format!("Builds a [`{name}`] from `items`, keeping the first occurrence of each.");

    let decode = resolved.is_recoverable().then(|| {
        let decode_fn = format_ident!("decode_{}", snake);
        let decode_doc = format!("Rebuilds a [`{name}`] from its encoded element list.");
        quote! {
            #[doc = #decode_doc]
            #visibility fn #decode_fn(items: Vec<#element>) -> Result<#name, DecodeError> {
                OrderedSet::decode(#policy, items)
            }
        }
    });

    quote! {
        #[doc = #alias_doc]
        #visibility type #name = OrderedSet<#element>;

        #[doc = #new_doc]
        #[must_use]
        #visibility fn #new_fn(capacity: usize) -> #name {
            OrderedSet::with_capacity_and_policy(capacity, #policy)
        }

        #[doc = #from_vec_doc]
        #[must_use]
        #visibility fn #from_vec_fn(items: Vec<#element>) -> #name {
            OrderedSet::from_vec_with_policy(items, #policy)
        }

        #decode
    }
}

fn policy(resolved: &Resolved) -> TokenStream {
    match (&resolved.ordering, &resolved.comparator) {
        (PolicyKind::Unordered, _) => quote!(Policy::unordered()),
        (PolicyKind::Insertion, _) => quote!(Policy::insertion()),
        (PolicyKind::Sorted, Some(ResolvedComparator::Descending)) => {
            quote!(Policy::sorted(Comparator::descending()))
        }
        (PolicyKind::Sorted, Some(ResolvedComparator::Custom(path))) => {
            let function = path.segments.last().map(|segment| &segment.ident);
            quote!(Policy::sorted(Comparator::custom(#function)))
        }
        (PolicyKind::Sorted, Some(ResolvedComparator::Ascending) | None) => {
            quote!(Policy::sorted(Comparator::ascending()))
        }
    }
}

fn prerequisites(resolved: &Resolved) -> Vec<String> {
    let mut paths = vec![ORDERED_SET.to_owned(), POLICY.to_owned()];
    if resolved.ordering == PolicyKind::Sorted {
        paths.push(COMPARATOR.to_owned());
    }
    if resolved.is_recoverable() {
        paths.push(DECODE_ERROR.to_owned());
    }
    if let Some(ResolvedComparator::Custom(path)) = &resolved.comparator
        && path.segments.len() > 1
    {
        paths.push(path_text(path));
    }
    paths
}

fn path_text(path: &syn::Path) -> String {
    quote!(#path).to_string().replace(' ', "")
}

fn snake_case(identifier: &str) -> String {
    let characters: Vec<char> = identifier.chars().collect();
    let mut snake = String::with_capacity(identifier.len() + 4);
    for (position, &character) in characters.iter().enumerate() {
        if character.is_uppercase() && position > 0 {
            let previous = characters[position - 1];
            let next_is_lower = characters
                .get(position + 1)
                .is_some_and(|next| next.is_lowercase());
            if previous.is_lowercase()
                || previous.is_ascii_digit()
                || (previous.is_uppercase() && next_is_lower)
            {
                snake.push('_');
            }
        }
        snake.extend(character.to_lowercase());
    }
    snake
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ComparatorSpec;
    use rstest::rstest;

    #[rstest]
    #[case("U32Set", "u32_set")]
    #[case("StringSet", "string_set")]
    #[case("HTTPHandlerSet", "http_handler_set")]
    #[case("Desc", "desc")]
    #[case("byte_log", "byte_log")]
    fn test_snake_case(#[case] identifier: &str, #[case] expected: &str) {
        assert_eq!(snake_case(identifier), expected);
    }

    #[rstest]
    fn test_unordered_prerequisites() {
        let emission = emit(&TypeDescriptor::new("u8", PolicyKind::Unordered)).unwrap();
        assert_eq!(
            emission.prerequisites,
            vec!["ordset::OrderedSet", "ordset::Policy", "ordset::DecodeError"]
        );
    }

    #[rstest]
    fn test_custom_comparator_prerequisites() {
        let descriptor = TypeDescriptor::new("String", PolicyKind::Sorted)
            .with_comparator(ComparatorSpec::Custom("crate::order::by_len".into()));
        let emission = emit(&descriptor).unwrap();
        assert_eq!(
            emission.prerequisites,
            vec![
                "ordset::OrderedSet",
                "ordset::Policy",
                "ordset::Comparator",
                "crate::order::by_len",
            ]
        );
        assert!(!emission.definition.contains("decode_"));
    }

    #[rstest]
    fn test_local_comparator_needs_no_import() {
        let descriptor = TypeDescriptor::new("String", PolicyKind::Sorted)
            .with_comparator(ComparatorSpec::Custom("by_len".into()));
        let emission = emit(&descriptor).unwrap();
        assert!(!emission.prerequisites.iter().any(|path| path == "by_len"));
    }

    #[rstest]
    fn test_crate_private_visibility() {
        let emission =
            emit(&TypeDescriptor::new("u8", PolicyKind::Insertion).crate_private()).unwrap();
        let file = syn::parse_file(&emission.definition).unwrap();
        assert!(file.items.iter().all(|item| match item {
            syn::Item::Type(alias) => matches!(alias.vis, syn::Visibility::Restricted(_)),
            syn::Item::Fn(function) => matches!(function.vis, syn::Visibility::Restricted(_)),
            _ => false,
        }));
    }

    #[rstest]
    fn test_emit_all_dedups_prerequisites_in_first_seen_order() {
        let batch = emit_all(&[
            TypeDescriptor::new("u8", PolicyKind::Insertion),
            TypeDescriptor::new("u16", PolicyKind::Sorted).with_comparator(ComparatorSpec::Ascending),
            TypeDescriptor::new("u32", PolicyKind::Unordered),
        ])
        .unwrap();
        assert_eq!(batch.emissions.len(), 3);
        assert_eq!(
            batch.prerequisites,
            vec![
                "ordset::OrderedSet",
                "ordset::Policy",
                "ordset::DecodeError",
                "ordset::Comparator",
            ]
        );
    }

    #[rstest]
    fn test_emit_all_rejects_same_set_name_from_different_paths() {
        let result = emit_all(&[
            TypeDescriptor::new("std::time::Instant", PolicyKind::Unordered),
            TypeDescriptor::new("my::Instant", PolicyKind::Insertion),
        ]);
        assert!(matches!(
            result,
            Err(EmitError::DuplicateName { what: "set name", ref name }) if name == "InstantSet"
        ));
    }

    #[rstest]
    fn test_emit_all_rename_resolves_set_name_clash() {
        let batch = emit_all(&[
            TypeDescriptor::new("std::time::Instant", PolicyKind::Unordered),
            TypeDescriptor::new("my::Instant", PolicyKind::Insertion).with_rename("MyInstantSet"),
        ])
        .unwrap();
        let names: Vec<&str> = batch
            .emissions
            .iter()
            .map(|emission| emission.type_name.as_str())
            .collect();
        assert_eq!(names, vec!["InstantSet", "MyInstantSet"]);
    }

    #[rstest]
    fn test_emit_all_rejects_two_comparators_with_one_name() {
        let by_len = |path: &str, rename: &str| {
            TypeDescriptor::new("String", PolicyKind::Sorted)
                .with_comparator(ComparatorSpec::Custom(path.into()))
                .with_rename(rename)
        };
        let result = emit_all(&[by_len("a::by_len", "ShortFirst"), by_len("b::by_len", "LongFirst")]);
        assert!(matches!(
            result,
            Err(EmitError::DuplicateName { what: "comparator", ref name }) if name == "by_len"
        ));
    }

    #[rstest]
    fn test_emit_all_shares_one_comparator_import() {
        let by_len = |rename: &str| {
            TypeDescriptor::new("String", PolicyKind::Sorted)
                .with_comparator(ComparatorSpec::Custom("crate::order::by_len".into()))
                .with_rename(rename)
        };
        let batch = emit_all(&[by_len("Words"), by_len("Tags")]).unwrap();
        let imports = batch
            .prerequisites
            .iter()
            .filter(|path| path.as_str() == "crate::order::by_len")
            .count();
        assert_eq!(imports, 1);
    }

    #[rstest]
    fn test_emit_all_stops_at_first_invalid() {
        let result = emit_all(&[
            TypeDescriptor::new("u8", PolicyKind::Insertion),
            TypeDescriptor::new("u8", PolicyKind::Sorted),
        ]);
        assert!(matches!(result, Err(EmitError::MissingComparator { .. })));
    }
}
