use crate::edit_buffer::EditError;
use dcf_parser::{NodeIndex, ParseError};

/// Errors surfaced by the patch pipeline.
///
/// The rewrite rules themselves never fail on well-formed trees; these cover
/// malformed input, buffer misuse and framework invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatchError {
    Parse(ParseError),
    Edit(EditError),
    /// A node index that does not belong to the arena being patched.
    MissingNode(NodeIndex),
    /// A rule was asked to emit twice for the same node.
    AlreadyPatched(NodeIndex),
    NestedTooDeeply(NodeIndex),
    /// Every candidate temporary name derived from `base` is taken.
    BindingNamesExhausted { base: String },
}

impl std::fmt::Display for PatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatchError::Parse(err) => write!(f, "parse error: {err}"),
            PatchError::Edit(err) => write!(f, "edit error: {err}"),
            PatchError::MissingNode(node) => write!(f, "node {node} is not in the arena"),
            PatchError::AlreadyPatched(node) => write!(f, "node {node} was already patched"),
            PatchError::NestedTooDeeply(node) => {
                write!(f, "expression at node {node} is nested too deeply")
            }
            PatchError::BindingNamesExhausted { base } => {
                write!(f, "no free binding name derived from '{base}'")
            }
        }
    }
}

impl std::error::Error for PatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatchError::Parse(err) => Some(err),
            PatchError::Edit(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ParseError> for PatchError {
    fn from(err: ParseError) -> Self {
        PatchError::Parse(err)
    }
}

impl From<EditError> for PatchError {
    fn from(err: EditError) -> Self {
        PatchError::Edit(err)
    }
}

pub type PatchResult<T> = Result<T, PatchError>;
