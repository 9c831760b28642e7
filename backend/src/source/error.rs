//! Error types for record source operations.
//!
//! Source errors never reach the filter pipeline: [`load_snapshot`](super::load_snapshot)
//! logs them and hands the caller an empty collection. They do surface from
//! configuration and health checks.

use std::fmt;

/// Result type for record source operations
pub type SourceResult<T> = Result<T, SourceError>;

/// Structured context for source errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// The operation being performed (e.g., "fetch_sales", "read_file")
    pub operation: Option<String>,
    /// The record kind involved (e.g., "sales", "clients")
    pub entity: Option<String>,
    /// Additional details, such as a file path
    pub details: Option<String>,
    /// Whether a later attempt may succeed
    pub retryable: bool,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: Some(operation.into()),
            ..Default::default()
        }
    }

    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(ref op) = self.operation {
            parts.push(format!("operation={}", op));
        }
        if let Some(ref entity) = self.entity {
            parts.push(format!("entity={}", entity));
        }
        if let Some(ref details) = self.details {
            parts.push(format!("details={}", details));
        }
        if self.retryable {
            parts.push("retryable=true".to_string());
        }
        write!(f, "[{}]", parts.join(", "))
    }
}

/// Error type for record source operations
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The backing store could not be reached or is marked unhealthy.
    #[error("Unavailable: {message} {context}")]
    Unavailable {
        message: String,
        context: ErrorContext,
    },

    /// Reading the backing store failed.
    #[error("I/O error: {message} {context}")]
    Io {
        message: String,
        context: ErrorContext,
    },

    /// The data could not be decoded into records.
    #[error("Parse error: {message} {context}")]
    Parse {
        message: String,
        context: ErrorContext,
    },

    /// Invalid source configuration.
    #[error("Configuration error: {message} {context}")]
    Configuration {
        message: String,
        context: ErrorContext,
    },
}

impl SourceError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            context: ErrorContext::default().retryable(),
        }
    }

    pub fn unavailable_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Unavailable {
            message: message.into(),
            context: context.retryable(),
        }
    }

    pub fn io_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Io {
            message: message.into(),
            context,
        }
    }

    pub fn parse_with_context(message: impl Into<String>, context: ErrorContext) -> Self {
        Self::Parse {
            message: message.into(),
            context,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.context().retryable
    }

    /// Get the error context.
    pub fn context(&self) -> &ErrorContext {
        match self {
            Self::Unavailable { context, .. }
            | Self::Io { context, .. }
            | Self::Parse { context, .. }
            | Self::Configuration { context, .. } => context,
        }
    }

    /// Add or update the operation in the error context.
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        match &mut self {
            Self::Unavailable { context, .. }
            | Self::Io { context, .. }
            | Self::Parse { context, .. }
            | Self::Configuration { context, .. } => {
                context.operation = Some(operation.into());
            }
        }
        self
    }
}
