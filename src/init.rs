//! Provider selection
//!
//! [`Initializer::initialize`] checks the configuration, then dispatches to the
//! initializer for the selected backend. Each call is independent: nothing is
//! cached and a failure is final for that call.

use crate::config::{InitConfig, ProviderConfig};
use crate::endpoint::EndpointMode;
use crate::error::Result;
use crate::metrics;
use crate::plugins::aws_v2::{AwsClientFactory, ClientFactory, ClientSettings};
use crate::provider::{EnvelopeProviderBuilder, K8sProvider, KmsProvider, Provider};
use crate::validate::DEFAULT_TIMEOUT;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Reads an environment variable by name
pub type EnvLookup = dyn Fn(&str) -> Option<String> + Send + Sync;

/// Selects and builds the provider for an [`InitConfig`]
///
/// Defaults to the process environment, the AWS SDK and [`DEFAULT_TIMEOUT`];
/// each can be replaced.
pub struct Initializer {
    env: Arc<EnvLookup>,
    factory: Arc<dyn ClientFactory>,
    timeout: Duration,
}

impl fmt::Debug for Initializer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Initializer")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for Initializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Initializer {
    pub fn new() -> Self {
        Self {
            env: Arc::new(|name: &str| std::env::var(name).ok()),
            factory: Arc::new(AwsClientFactory::new()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Replaces the environment used to resolve the emulator endpoint
    pub fn with_env_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        self.env = Arc::new(lookup);
        self
    }

    /// Replaces the AWS SDK client factory
    pub fn with_client_factory(mut self, factory: Arc<dyn ClientFactory>) -> Self {
        self.factory = factory;
        self
    }

    /// Deadline for each individual service call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Validates `config` and builds the selected provider.
    ///
    /// Configuration problems are reported before any client is built.
    pub async fn initialize(&self, config: InitConfig) -> Result<Provider> {
        let config = config.validate()?;
        let variant = config.variant();
        log::debug!("Initializing {} provider", variant);

        let result = self.dispatch(config).await;
        metrics::record_init(variant.as_str(), result.is_ok());
        match &result {
            Ok(_) => log::info!("{} provider initialized", variant),
            Err(err) => log::debug!("{} provider failed to initialize: {}", variant, err),
        }
        result
    }

    async fn dispatch(&self, config: ProviderConfig) -> Result<Provider> {
        match config {
            ProviderConfig::K8s { namespace } => K8sProvider::new(namespace).map(Provider::K8s),
            ProviderConfig::AwsKms { namespace } => {
                let settings = ClientSettings::new(EndpointMode::Production, self.timeout);
                KmsProvider::connect(self.factory.as_ref(), &settings, namespace)
                    .await
                    .map(Provider::AwsKms)
            }
            ProviderConfig::AwsKmsEnvelope {
                kms_key_alias,
                dynamodb_table,
                debug,
            } => {
                let endpoint = EndpointMode::resolve(debug, |name| (self.env)(name))?;
                EnvelopeProviderBuilder::new(kms_key_alias, dynamodb_table)
                    .with_endpoint_mode(endpoint)
                    .with_timeout(self.timeout)
                    .with_client_factory(self.factory.clone())
                    .build()
                    .await
                    .map(Provider::AwsKmsEnvelope)
            }
        }
    }
}

/// Initializes a provider with the default [`Initializer`]
pub async fn initialize(config: InitConfig) -> Result<Provider> {
    Initializer::new().initialize(config).await
}
