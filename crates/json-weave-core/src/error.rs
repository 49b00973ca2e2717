use json_weave_dom::DomError;
use json_weave_path::PathError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BindError {
    /// Content could not be read, parsed, or lacked its `data` member.
    /// Initialization aborts; nothing is rendered.
    #[error("failed to load content from `{source_id}`: {reason}")]
    LoadFailure { source_id: String, reason: String },
    /// A repeated container's path, or an array operation's target,
    /// resolved to something other than a sequence.
    #[error("value at `{path}` is not an array")]
    NotAnArray { path: String },
    /// A repeated container has no usable template child.
    #[error("repeated container at `{path}` has no template child")]
    MissingTemplate { path: String },
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Dom(#[from] DomError),
}
