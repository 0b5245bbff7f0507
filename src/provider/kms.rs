use crate::endpoint::EndpointMode;
use crate::error::Result;
use crate::plugins::aws_v2::{AwsKmsClient, ClientFactory, ClientSettings};
use std::fmt;
use std::sync::Arc;

/// Secrets encrypted directly with AWS KMS
#[derive(Clone)]
pub struct KmsProvider {
    kms: Arc<dyn AwsKmsClient>,
    endpoint: EndpointMode,
    namespace: Option<String>,
}

impl fmt::Debug for KmsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KmsProvider")
            .field("endpoint", &self.endpoint)
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl KmsProvider {
    /// Builds the KMS client for `settings`. No key is known for this backend,
    /// so nothing is looked up.
    pub async fn connect(
        factory: &dyn ClientFactory,
        settings: &ClientSettings,
        namespace: Option<String>,
    ) -> Result<Self> {
        let kms = factory.kms_client(settings).await?;
        log::debug!("KMS client ready ({} endpoint)", settings.endpoint);

        Ok(Self {
            kms,
            endpoint: settings.endpoint.clone(),
            namespace,
        })
    }

    pub fn kms_client(&self) -> &Arc<dyn AwsKmsClient> {
        &self.kms
    }

    pub fn endpoint(&self) -> &EndpointMode {
        &self.endpoint
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }
}
