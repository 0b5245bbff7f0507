//! Initialization configuration and its precondition checks
//!
//! [`InitConfig`] holds the raw values as given on the command line.
//! [`InitConfig::validate`] turns it into a [`ProviderConfig`] that carries only
//! the fields the selected backend needs, or fails before anything touches the
//! network.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// The mutually exclusive secret backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendVariant {
    /// Secrets stored in a Kubernetes namespace
    K8s,
    /// Secrets encrypted directly with AWS KMS
    AwsKms,
    /// Envelope encryption: KMS master key, data keys tracked in DynamoDB
    AwsKmsEnvelope,
}

impl BackendVariant {
    /// All variants, in the order they are listed on the command line
    pub const ALL: [BackendVariant; 3] = [
        BackendVariant::K8s,
        BackendVariant::AwsKms,
        BackendVariant::AwsKmsEnvelope,
    ];

    /// The name used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendVariant::K8s => "k8s",
            BackendVariant::AwsKms => "aws-kms",
            BackendVariant::AwsKmsEnvelope => "aws-kms-envelope",
        }
    }
}

impl fmt::Display for BackendVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BackendVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        BackendVariant::ALL
            .into_iter()
            .find(|variant| variant.as_str() == s)
            .ok_or_else(|| Error::configuration(format!("unsupported provider '{s}'")))
    }
}

/// Raw initialization input
///
/// Built once from caller input and consumed by [`InitConfig::validate`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InitConfig {
    provider: String,
    namespace: String,
    kms_key_alias: String,
    dynamodb_table: String,
    debug: bool,
}

impl InitConfig {
    /// Creates a configuration for the named provider
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Self::default()
        }
    }

    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    pub fn with_kms_key_alias(mut self, alias: impl Into<String>) -> Self {
        self.kms_key_alias = alias.into();
        self
    }

    pub fn with_dynamodb_table(mut self, table: impl Into<String>) -> Self {
        self.dynamodb_table = table.into();
        self
    }

    /// Routes AWS calls to the local emulator (envelope provider only)
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Checks the fields the selected provider requires.
    ///
    /// Values are trimmed; a blank value counts as missing.
    pub fn validate(self) -> Result<ProviderConfig> {
        let provider = self.provider.trim();
        if provider.is_empty() {
            return Err(Error::configuration("provider is required"));
        }

        let namespace = non_blank(self.namespace);
        match provider.parse::<BackendVariant>()? {
            BackendVariant::K8s => {
                let namespace = namespace.ok_or_else(|| {
                    Error::configuration("namespace is required for k8s provider")
                })?;
                Ok(ProviderConfig::K8s { namespace })
            }
            BackendVariant::AwsKms => Ok(ProviderConfig::AwsKms { namespace }),
            BackendVariant::AwsKmsEnvelope => {
                let kms_key_alias = non_blank(self.kms_key_alias).ok_or_else(|| {
                    Error::configuration("KMS key alias is required for aws-kms-envelope provider")
                })?;
                let dynamodb_table = non_blank(self.dynamodb_table).ok_or_else(|| {
                    Error::configuration("DynamoDB table is required for aws-kms-envelope provider")
                })?;
                Ok(ProviderConfig::AwsKmsEnvelope {
                    kms_key_alias,
                    dynamodb_table,
                    debug: self.debug,
                })
            }
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A configuration whose required fields are known to be present
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderConfig {
    K8s {
        namespace: String,
    },
    AwsKms {
        namespace: Option<String>,
    },
    AwsKmsEnvelope {
        kms_key_alias: String,
        dynamodb_table: String,
        debug: bool,
    },
}

impl ProviderConfig {
    pub fn variant(&self) -> BackendVariant {
        match self {
            ProviderConfig::K8s { .. } => BackendVariant::K8s,
            ProviderConfig::AwsKms { .. } => BackendVariant::AwsKms,
            ProviderConfig::AwsKmsEnvelope { .. } => BackendVariant::AwsKmsEnvelope,
        }
    }
}
