//! # cryptctl
//!
//! Provider initialization for the encrypted-secrets CLI.
//!
//! Before anything is encrypted or decrypted, one of three backends is selected
//! and checked:
//!
//! - `k8s`: secrets kept in a Kubernetes namespace
//! - `aws-kms`: secrets encrypted directly with AWS KMS
//! - `aws-kms-envelope`: envelope encryption with a KMS master key and a
//!   DynamoDB table of data keys
//!
//! The envelope backend is only handed out once its DynamoDB table and KMS alias
//! are known to exist. With `debug` set, every AWS call goes to the local
//! emulator named by `LOCALSTACK_ENDPOINT` instead of the production endpoints.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cryptctl::{InitConfig, Initializer, Provider};
//! use std::time::Duration;
//!
//! # async fn example() -> cryptctl::Result<()> {
//! let config = InitConfig::new("aws-kms-envelope")
//!     .with_kms_key_alias("alias/my-key")
//!     .with_dynamodb_table("secrets");
//!
//! let provider = Initializer::new()
//!     .with_timeout(Duration::from_secs(5))
//!     .initialize(config)
//!     .await?;
//!
//! if let Provider::AwsKmsEnvelope(envelope) = provider {
//!     println!("using table {}", envelope.table_name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod endpoint;
pub mod error;
pub mod init;
pub mod metrics;
pub mod plugins;
pub mod provider;
pub mod validate;

pub use crate::config::{BackendVariant, InitConfig, ProviderConfig};
pub use crate::endpoint::{EndpointMode, LOCALSTACK_ENDPOINT_VAR};
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::init::{initialize, Initializer};
pub use crate::provider::{EnvelopeProvider, K8sProvider, KmsProvider, Provider};
