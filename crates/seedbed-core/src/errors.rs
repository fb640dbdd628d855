use seedbed_core_types::{RequestContext, RequestId, TraceId};
use thiserror::Error;

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// This taxonomy provides a stable, structured classification of all errors
/// raised while seeding or serving content. Each kind maps to a stable error
/// code that can be used for programmatic error handling, testing, and
/// external API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    AlreadyExists,
    ConstraintViolation,

    // Content schema
    UnknownContentType,
    UnknownRelation,

    // Seed dataset
    InvalidSeed,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Upload,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::AlreadyExists => "ERR_ALREADY_EXISTS",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::UnknownContentType => "ERR_UNKNOWN_CONTENT_TYPE",
            ExErrorKind::UnknownRelation => "ERR_UNKNOWN_RELATION",
            ExErrorKind::InvalidSeed => "ERR_INVALID_SEED",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Upload => "ERR_UPLOAD",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// This error type provides a structured representation of errors with
/// classification fields for programmatic handling and rich context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    content_type: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            content_type: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (document id, slug or file name)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add content type context
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Attach the ids of the HTTP request that hit this error
    pub fn with_request_context(self, context: &RequestContext) -> Self {
        let err = self.with_request_id(context.request_id.clone());
        match &context.trace_id {
            Some(trace_id) => err.with_trace_id(trace_id.clone()),
            None => err,
        }
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the entity ID context, if any
    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    /// Get the content type context, if any
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the trace ID context, if any
    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(content_type) = &self.content_type {
            write!(f, " (content_type: {})", content_type)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for the content schema and seed pipeline
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SeedError {
    /// Content type is not declared in the schema registry
    #[error("Unknown content type: {content_type}")]
    UnknownContentType { content_type: String },

    /// Relation attribute is not declared on the content type
    #[error("Content type {content_type} has no relation named {attribute}")]
    UnknownRelation {
        content_type: String,
        attribute: String,
    },

    /// Required attribute absent or blank
    #[error("Missing required attribute {attribute} on {content_type}")]
    MissingAttribute {
        content_type: String,
        attribute: String,
    },

    /// Single type already holds its one entry
    #[error("Single type {content_type} already has an entry")]
    SingleTypeOccupied { content_type: String },

    /// Slug already used within the content type
    #[error("Slug {slug} already exists for {content_type}")]
    DuplicateSlug { content_type: String, slug: String },

    /// Entry referenced by id does not exist
    #[error("Entry not found: {content_type} {entry_id}")]
    EntryNotFound {
        content_type: String,
        entry_id: String,
    },

    /// Block or record field has the wrong shape
    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// Upload produced no asset record
    #[error("Upload of {file_name} returned no asset")]
    EmptyUpload { file_name: String },

    /// Serialization error
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<SeedError> for ExError {
    fn from(err: SeedError) -> Self {
        let message = err.to_string();
        match err {
            SeedError::UnknownContentType { content_type } => {
                ExError::new(ExErrorKind::UnknownContentType)
                    .with_content_type(content_type)
                    .with_message(message)
            }
            SeedError::UnknownRelation { content_type, .. } => {
                ExError::new(ExErrorKind::UnknownRelation)
                    .with_content_type(content_type)
                    .with_message(message)
            }
            SeedError::MissingAttribute { content_type, .. } => {
                ExError::new(ExErrorKind::InvalidInput)
                    .with_content_type(content_type)
                    .with_message(message)
            }
            SeedError::SingleTypeOccupied { content_type } => {
                ExError::new(ExErrorKind::AlreadyExists)
                    .with_content_type(content_type)
                    .with_message(message)
            }
            SeedError::DuplicateSlug { content_type, slug } => {
                ExError::new(ExErrorKind::AlreadyExists)
                    .with_content_type(content_type)
                    .with_entity_id(slug)
                    .with_message(message)
            }
            SeedError::EntryNotFound {
                content_type,
                entry_id,
            } => ExError::new(ExErrorKind::NotFound)
                .with_content_type(content_type)
                .with_entity_id(entry_id)
                .with_message(message),
            SeedError::InvalidField { .. } => {
                ExError::new(ExErrorKind::InvalidInput).with_message(message)
            }
            SeedError::EmptyUpload { file_name } => ExError::new(ExErrorKind::Upload)
                .with_entity_id(file_name)
                .with_message(message),
            SeedError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(err: serde_json::Error) -> Self {
        SeedError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        SeedError::from(err).into()
    }
}

/// Create an IO error for a local file operation
pub fn io_error(operation: &str, path: &std::path::Path, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_entity_id(path.display().to_string())
        .with_message(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_unique() {
        let kinds = [
            ExErrorKind::InvalidInput,
            ExErrorKind::NotFound,
            ExErrorKind::AlreadyExists,
            ExErrorKind::ConstraintViolation,
            ExErrorKind::UnknownContentType,
            ExErrorKind::UnknownRelation,
            ExErrorKind::InvalidSeed,
            ExErrorKind::Io,
            ExErrorKind::Serialization,
            ExErrorKind::Persistence,
            ExErrorKind::Upload,
            ExErrorKind::Internal,
        ];
        let codes: std::collections::HashSet<_> = kinds.iter().map(|k| k.code()).collect();
        assert_eq!(codes.len(), kinds.len());
        for code in codes {
            assert!(code.starts_with("ERR_"));
        }
    }

    #[test]
    fn test_display_includes_code_op_and_message() {
        let err = ExError::new(ExErrorKind::NotFound)
            .with_op("connect")
            .with_content_type("knowledge-base-article")
            .with_message("Entry not found");

        let s = err.to_string();
        assert!(s.starts_with("[ERR_NOT_FOUND]"));
        assert!(s.contains("connect"));
        assert!(s.contains("knowledge-base-article"));
    }

    #[test]
    fn test_request_context_is_attached() {
        let context = RequestContext::with_request_id(RequestId::from_string("req-9".into()))
            .with_trace_id(TraceId::from_string("trace-9".into()));

        let err = ExError::new(ExErrorKind::Persistence).with_request_context(&context);

        assert_eq!(err.request_id().map(RequestId::as_str), Some("req-9"));
        assert_eq!(err.trace_id().map(TraceId::as_str), Some("trace-9"));
        assert!(err.to_string().contains("(request_id: req-9)"));
    }

    #[test]
    fn test_source_chain_is_exposed() {
        let inner = ExError::new(ExErrorKind::Io).with_message("disk gone");
        let outer = ExError::new(ExErrorKind::Upload).with_source(inner);

        assert_eq!(outer.source_error().map(|e| e.kind()), Some(ExErrorKind::Io));
        assert!(std::error::Error::source(&outer).is_some());
    }
}
