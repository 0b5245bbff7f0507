//! Provider handles
//!
//! A [`Provider`] is what initialization hands to the encrypt/decrypt path. Each
//! variant is only constructed once its preconditions have been checked.

mod envelope;
mod k8s;
mod kms;

pub use envelope::{EnvelopeProvider, EnvelopeProviderBuilder};
pub use k8s::K8sProvider;
pub use kms::KmsProvider;

use crate::config::BackendVariant;

/// A ready-to-use secrets backend
#[derive(Debug, Clone)]
pub enum Provider {
    K8s(K8sProvider),
    AwsKms(KmsProvider),
    AwsKmsEnvelope(EnvelopeProvider),
}

impl Provider {
    pub fn variant(&self) -> BackendVariant {
        match self {
            Provider::K8s(_) => BackendVariant::K8s,
            Provider::AwsKms(_) => BackendVariant::AwsKms,
            Provider::AwsKmsEnvelope(_) => BackendVariant::AwsKmsEnvelope,
        }
    }

    pub fn as_envelope(&self) -> Option<&EnvelopeProvider> {
        match self {
            Provider::AwsKmsEnvelope(provider) => Some(provider),
            _ => None,
        }
    }
}
