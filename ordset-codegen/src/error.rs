//! Errors raised while validating descriptors and emitting definitions.

use ordset::PolicyKind;

/// Why a descriptor could not be turned into a set definition.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// A sorted ordering was requested without naming a comparator.
    #[error("`{element_type}`: sorted ordering requires a comparator")]
    MissingComparator {
        /// The element type of the offending descriptor.
        element_type: String,
    },

    /// A comparator was named for an ordering that does not sort.
    #[error("`{element_type}`: comparator given for the {ordering} ordering, which does not sort")]
    UnexpectedComparator {
        /// The element type of the offending descriptor.
        element_type: String,
        /// The ordering that was requested.
        ordering: PolicyKind,
    },

    /// A type, identifier or path in the descriptor does not parse as Rust.
    #[error("invalid {what} `{text}`: {reason}")]
    InvalidSyntax {
        /// Which descriptor field was being parsed.
        what: &'static str,
        /// The text that failed to parse.
        text: String,
        /// The parser's explanation.
        reason: String,
    },

    /// The element type has no path to derive a set name from, and no
    /// `rename` was given.
    #[error("`{element_type}`: no set name can be derived from this type; set `rename`")]
    UnnamedType {
        /// The element type of the offending descriptor.
        element_type: String,
    },

    /// Two descriptors in one batch would define or import the same name.
    #[error("{what} `{name}` would be emitted twice in one batch")]
    DuplicateName {
        /// Which kind of item clashes: a set name or a comparator import.
        what: &'static str,
        /// The clashing name.
        name: String,
    },

    /// The descriptor JSON is malformed.
    #[error("malformed descriptor: {0}")]
    Json(#[from] serde_json::Error),
}

impl EmitError {
    pub(crate) fn invalid_syntax(what: &'static str, text: &str, error: &syn::Error) -> Self {
        Self::InvalidSyntax {
            what,
            text: text.to_owned(),
            reason: error.to_string(),
        }
    }
}
