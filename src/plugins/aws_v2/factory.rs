use crate::endpoint::EndpointMode;
use crate::error::Result;
use crate::plugins::aws_v2::dynamodb::{DynamoDbClient, StandardDynamoDbClient};
use crate::plugins::aws_v2::kms::{AwsKmsClient, StandardAwsKmsClient};
use crate::validate::DEFAULT_TIMEOUT;
use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::timeout::TimeoutConfig;
use aws_config::{BehaviorVersion, SdkConfig};
use std::sync::Arc;
use std::time::Duration;

/// Region used when neither the environment nor a profile names one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Everything a [`ClientFactory`] needs to build service clients
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    /// Production endpoints or a local emulator URL
    pub endpoint: EndpointMode,

    /// Upper bound for a single service call
    pub timeout: Duration,
}

impl ClientSettings {
    pub fn new(endpoint: EndpointMode, timeout: Duration) -> Self {
        Self { endpoint, timeout }
    }
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self::new(EndpointMode::Production, DEFAULT_TIMEOUT)
    }
}

/// KMS and DynamoDB clients built from the same settings
pub type ClientPair = (Arc<dyn AwsKmsClient>, Arc<dyn DynamoDbClient>);

/// Builds the service clients a provider owns
///
/// The standard implementation is [`AwsClientFactory`]. Tests supply their own to
/// count calls and inspect the settings clients were built with.
#[async_trait]
pub trait ClientFactory: Send + Sync {
    /// Builds a KMS client bound to `settings.endpoint`
    async fn kms_client(&self, settings: &ClientSettings) -> Result<Arc<dyn AwsKmsClient>>;

    /// Builds a DynamoDB client bound to `settings.endpoint`
    async fn dynamodb_client(&self, settings: &ClientSettings) -> Result<Arc<dyn DynamoDbClient>>;

    /// Builds both clients for the envelope provider.
    ///
    /// Defaults to one call of each builder. Implementations that can share
    /// setup between the two should override it.
    async fn clients(&self, settings: &ClientSettings) -> Result<ClientPair> {
        let kms = self.kms_client(settings).await?;
        let dynamodb = self.dynamodb_client(settings).await?;
        Ok((kms, dynamodb))
    }
}

/// Client factory backed by the AWS SDK
#[derive(Debug, Clone, Copy, Default)]
pub struct AwsClientFactory;

impl AwsClientFactory {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ClientFactory for AwsClientFactory {
    async fn kms_client(&self, settings: &ClientSettings) -> Result<Arc<dyn AwsKmsClient>> {
        let config = load_sdk_config(settings).await;
        Ok(Arc::new(StandardAwsKmsClient::from_conf(&config)))
    }

    async fn dynamodb_client(&self, settings: &ClientSettings) -> Result<Arc<dyn DynamoDbClient>> {
        let config = load_sdk_config(settings).await;
        Ok(Arc::new(StandardDynamoDbClient::from_conf(&config)))
    }

    // Region and credentials are resolved once and shared by both clients
    async fn clients(&self, settings: &ClientSettings) -> Result<ClientPair> {
        let config = load_sdk_config(settings).await;
        Ok((
            Arc::new(StandardAwsKmsClient::from_conf(&config)),
            Arc::new(StandardDynamoDbClient::from_conf(&config)),
        ))
    }
}

/// Loads the shared AWS SDK configuration for the given settings
///
/// Credentials and region come from the default provider chain. A local emulator
/// URL is set on the loader itself, so every client built from the result uses
/// it.
pub async fn load_sdk_config(settings: &ClientSettings) -> SdkConfig {
    let region = RegionProviderChain::default_provider().or_else(DEFAULT_REGION);

    let timeout_config = TimeoutConfig::builder()
        .operation_timeout(settings.timeout)
        .operation_attempt_timeout(settings.timeout)
        .build();

    let mut config_loader = aws_config::defaults(BehaviorVersion::latest())
        .region(region)
        .timeout_config(timeout_config);

    if let Some(url) = settings.endpoint.endpoint_url() {
        config_loader = config_loader.endpoint_url(url);
    }

    log::debug!("Loading AWS configuration for {} endpoint", settings.endpoint);
    config_loader.load().await
}
