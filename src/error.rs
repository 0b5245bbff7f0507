use aws_sdk_dynamodb::error::DisplayErrorContext;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Boxed error as returned by the underlying service SDKs
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for cryptctl operations
pub type Result<T> = std::result::Result<T, Error>;

/// External service a request was sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    /// AWS Key Management Service
    Kms,
    /// Amazon DynamoDB
    DynamoDb,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Kms => f.write_str("KMS"),
            Service::DynamoDb => f.write_str("DynamoDB"),
        }
    }
}

/// External resource the envelope provider depends on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    /// The DynamoDB table holding encrypted data keys
    Table,
    /// The KMS alias naming the master key
    KmsAlias,
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Table => f.write_str("DynamoDB table"),
            Dependency::KmsAlias => f.write_str("KMS key alias"),
        }
    }
}

/// Coarse classification of an [`Error`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad or missing input; fix the command line or environment
    Configuration,
    /// A named external resource does not exist; create it
    DependencyMissing,
    /// The service call itself failed
    Infrastructure,
}

/// Errors that can occur while initializing a provider
#[derive(Error, Debug)]
pub enum Error {
    /// A required flag, field or environment variable is missing or invalid.
    /// Always detected before any network call.
    #[error("{0}")]
    Configuration(String),

    /// The KMS alias or DynamoDB table does not exist
    #[error("{dependency} '{name}' does not exist")]
    DependencyMissing {
        /// Which resource is missing
        dependency: Dependency,
        /// The name that was looked up
        name: String,
    },

    /// Any other failure reported by a service call, kept verbatim as the source.
    /// The message includes the whole source chain, so SDK errors show the AWS
    /// error code rather than just "service error".
    #[error("{service} request failed: {}", DisplayErrorContext(.source.as_ref()))]
    Infrastructure {
        /// Service that failed
        service: Service,
        /// The error returned by the client
        #[source]
        source: BoxError,
    },

    /// A service call did not complete within its deadline
    #[error("{service} request timed out after {after:?}")]
    Timeout {
        /// Service that did not answer
        service: Service,
        /// The deadline that expired
        after: Duration,
    },
}

impl Error {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    pub(crate) fn missing(dependency: Dependency, name: impl Into<String>) -> Self {
        Error::DependencyMissing {
            dependency,
            name: name.into(),
        }
    }

    /// Returns the class this error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::DependencyMissing { .. } => ErrorKind::DependencyMissing,
            Error::Infrastructure { .. } | Error::Timeout { .. } => ErrorKind::Infrastructure,
        }
    }
}

/// Failure reported by a service client
///
/// Clients only sort errors into "the named resource does not exist" and
/// everything else. Whether a missing resource is fatal is decided by the caller.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The service answered that the named resource does not exist
    #[error("resource not found: {0}")]
    ResourceNotFound(#[source] BoxError),

    /// Any other failure
    #[error(transparent)]
    Other(BoxError),
}

impl ServiceError {
    /// Wraps any error as [`ServiceError::Other`]
    pub fn other<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ServiceError::Other(Box::new(err))
    }

    /// Returns the original error reported by the client
    pub fn into_source(self) -> BoxError {
        match self {
            ServiceError::ResourceNotFound(source) | ServiceError::Other(source) => source,
        }
    }

    pub(crate) fn into_error(self, service: Service) -> Error {
        Error::Infrastructure {
            service,
            source: self.into_source(),
        }
    }
}
