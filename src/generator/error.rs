use crate::overlay::FileSystemError;
use std::fmt;

/// Rendering error
///
/// Any of these aborts the generation call; no partial output is kept.
#[derive(Debug)]
pub enum TemplateError {
    /// A field or argument refers to a type missing from the schema
    UnresolvedType {
        /// Type that owns the member
        owner: String,
        /// Field (or `field.arg`) holding the reference
        member: String,
        /// The name that could not be resolved
        reference: String,
    },
    /// No fragment is registered for a construct kind
    UndefinedFragment {
        /// Fragment name, e.g. `type.object`
        name: String,
    },
    /// A fragment failed to parse when registered
    Syntax {
        name: String,
        source: minijinja::Error,
    },
    /// A fragment failed while rendering
    Render {
        name: String,
        source: minijinja::Error,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::UnresolvedType {
                owner,
                member,
                reference,
            } => write!(
                f,
                "template error: {}.{} refers to unknown type '{}'",
                owner, member, reference
            ),
            TemplateError::UndefinedFragment { name } => {
                write!(f, "template error: fragment '{}' is not defined", name)
            }
            TemplateError::Syntax { name, source } => {
                write!(f, "template error: fragment '{}' does not parse: {}", name, source)
            }
            TemplateError::Render { name, source } => {
                write!(f, "template error: fragment '{}' failed to render: {}", name, source)
            }
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TemplateError::Syntax { source, .. } | TemplateError::Render { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

/// Error returned by a [`Generator`](super::Generator)
#[derive(Debug)]
pub enum GeneratorError {
    /// Rendering failed
    Template(TemplateError),
    /// Staging into the overlay failed
    FileSystem(FileSystemError),
    /// The cancellation token was set before generation started
    Canceled,
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::Template(err) => err.fmt(f),
            GeneratorError::FileSystem(err) => write!(f, "file system error: {}", err),
            GeneratorError::Canceled => f.write_str("generation canceled"),
        }
    }
}

impl std::error::Error for GeneratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeneratorError::Template(err) => Some(err),
            GeneratorError::FileSystem(err) => Some(err),
            GeneratorError::Canceled => None,
        }
    }
}

impl From<TemplateError> for GeneratorError {
    fn from(err: TemplateError) -> Self {
        GeneratorError::Template(err)
    }
}

impl From<FileSystemError> for GeneratorError {
    fn from(err: FileSystemError) -> Self {
        GeneratorError::FileSystem(err)
    }
}
