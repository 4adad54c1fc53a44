use crate::property::FieldInfo;
use crate::schema::DataType;
use thiserror::Error;

/// Core error type for codec operations
#[derive(Error, Debug)]
pub enum CodecError {
    /// An untyped input does not have the runtime type the property expects
    #[error("Type mismatch on '{field}': expected {expected}, got {actual}")]
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// A value could not be turned into its wire representation
    #[error("Encoding error on '{field}': {message}")]
    Encoding { field: String, message: String },

    /// A wire cell does not have the shape the property expects
    #[error("Decoding error on '{field}': {message}")]
    Decoding { field: String, message: String },

    /// A wire composite does not carry the expected number of components
    #[error("Arity mismatch on '{field}': expected {expected} components, got {actual}")]
    ArityMismatch {
        field: String,
        expected: usize,
        actual: usize,
    },

    /// The store reports a component type that differs from the mapped one
    #[error(
        "Schema mismatch on '{field}' at position {position}: mapped as {expected} but the store reports {actual}"
    )]
    SchemaMismatch {
        field: String,
        position: usize,
        expected: DataType,
        actual: DataType,
    },

    /// A tuple component failed to encode
    #[error("Failed to encode component {position} of '{field}': {source}")]
    ComponentEncoding {
        field: String,
        position: usize,
        #[source]
        source: Box<CodecError>,
    },

    /// A tuple component failed to decode
    #[error("Failed to decode component {position} of '{field}': {source}")]
    ComponentDecoding {
        field: String,
        position: usize,
        #[source]
        source: Box<CodecError>,
    },

    /// Scalar conversion errors, before a field identity is attached
    #[error("Conversion error: {0}")]
    Conversion(String),

    /// Invalid argument errors
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// JSON errors from the JSON scalar codec and config loading
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arrow errors from column conversion
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, CodecError>;

/// Coarse classification of a [`CodecError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TypeMismatch,
    Encoding,
    Decoding,
    Other,
}

impl CodecError {
    /// Create a new type mismatch error
    pub fn type_mismatch<E: Into<String>, A: Into<String>>(
        field: &FieldInfo,
        expected: E,
        actual: A,
    ) -> Self {
        CodecError::TypeMismatch {
            field: field.field_name().to_string(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a new encoding error
    pub fn encoding<S: Into<String>>(field: &FieldInfo, msg: S) -> Self {
        CodecError::Encoding {
            field: field.field_name().to_string(),
            message: msg.into(),
        }
    }

    /// Create a new decoding error
    pub fn decoding<S: Into<String>>(field: &FieldInfo, msg: S) -> Self {
        CodecError::Decoding {
            field: field.field_name().to_string(),
            message: msg.into(),
        }
    }

    /// Create a new conversion error
    pub fn conversion<S: Into<String>>(msg: S) -> Self {
        CodecError::Conversion(msg.into())
    }

    /// Create a new invalid argument error
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        CodecError::InvalidArgument(msg.into())
    }

    pub fn component_encoding(field: &FieldInfo, position: usize, source: CodecError) -> Self {
        CodecError::ComponentEncoding {
            field: field.field_name().to_string(),
            position,
            source: Box::new(source),
        }
    }

    pub fn component_decoding(field: &FieldInfo, position: usize, source: CodecError) -> Self {
        CodecError::ComponentDecoding {
            field: field.field_name().to_string(),
            position,
            source: Box::new(source),
        }
    }

    /// Attach a field identity to a scalar-level error raised while encoding.
    /// Errors that already carry a field pass through unchanged.
    pub fn into_encoding(self, field: &FieldInfo) -> Self {
        match self {
            CodecError::Conversion(msg) | CodecError::InvalidArgument(msg) => {
                CodecError::encoding(field, msg)
            }
            CodecError::Json(e) => CodecError::encoding(field, e.to_string()),
            other => other,
        }
    }

    /// Decoding counterpart of [`CodecError::into_encoding`]
    pub fn into_decoding(self, field: &FieldInfo) -> Self {
        match self {
            CodecError::Conversion(msg) | CodecError::InvalidArgument(msg) => {
                CodecError::decoding(field, msg)
            }
            CodecError::Json(e) => CodecError::decoding(field, e.to_string()),
            other => other,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            CodecError::Encoding { .. } | CodecError::ComponentEncoding { .. } => {
                ErrorKind::Encoding
            }
            CodecError::Decoding { .. }
            | CodecError::ArityMismatch { .. }
            | CodecError::SchemaMismatch { .. }
            | CodecError::ComponentDecoding { .. } => ErrorKind::Decoding,
            CodecError::Conversion(_)
            | CodecError::InvalidArgument(_)
            | CodecError::Json(_)
            | CodecError::Arrow(_) => ErrorKind::Other,
        }
    }

    /// Follow component wrappers down to the error raised by the failing leaf
    pub fn root_cause(&self) -> &CodecError {
        match self {
            CodecError::ComponentEncoding { source, .. }
            | CodecError::ComponentDecoding { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Extension trait to add context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context<S: Into<String>>(self, ctx: S) -> Result<T>;

    /// Add context with a closure that's only called on error
    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, f: F) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<CodecError>,
{
    fn context<S: Into<String>>(self, ctx: S) -> Result<T> {
        self.map_err(|e| {
            let base_error = e.into();
            CodecError::Conversion(format!("{}: {}", ctx.into(), base_error))
        })
    }

    fn with_context<S: Into<String>, F: FnOnce() -> S>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let base_error = e.into();
            CodecError::Conversion(format!("{}: {}", f().into(), base_error))
        })
    }
}
