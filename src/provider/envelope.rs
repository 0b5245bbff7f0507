use crate::endpoint::EndpointMode;
use crate::error::{Dependency, Error, Result};
use crate::plugins::aws_v2::{
    AwsClientFactory, AwsKmsClient, ClientFactory, ClientSettings, DynamoDbClient,
};
use crate::validate::{self, DEFAULT_TIMEOUT};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

/// Validated envelope-encryption provider
///
/// Only obtainable through [`EnvelopeProviderBuilder::build`], which confirms
/// the table and the alias exist first. Cloning shares the underlying clients.
#[derive(Clone)]
pub struct EnvelopeProvider {
    kms: Arc<dyn AwsKmsClient>,
    dynamodb: Arc<dyn DynamoDbClient>,
    endpoint: EndpointMode,
    kms_key_alias: String,
    table_name: String,
    timeout: Duration,
}

impl fmt::Debug for EnvelopeProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvelopeProvider")
            .field("endpoint", &self.endpoint)
            .field("kms_key_alias", &self.kms_key_alias)
            .field("table_name", &self.table_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl EnvelopeProvider {
    pub fn kms_client(&self) -> &Arc<dyn AwsKmsClient> {
        &self.kms
    }

    pub fn dynamodb_client(&self) -> &Arc<dyn DynamoDbClient> {
        &self.dynamodb
    }

    /// The endpoint both clients were built against
    pub fn endpoint(&self) -> &EndpointMode {
        &self.endpoint
    }

    pub fn kms_key_alias(&self) -> &str {
        &self.kms_key_alias
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Re-runs the startup checks against the owned clients.
    ///
    /// Never called implicitly; for long-lived callers that want to confirm the
    /// dependencies are still there.
    pub async fn verify(&self) -> Result<()> {
        check_dependencies(
            self.kms.as_ref(),
            self.dynamodb.as_ref(),
            &self.kms_key_alias,
            &self.table_name,
            self.timeout,
        )
        .await
    }
}

// Table first, then alias. The alias listing is only paid for once the table
// is known to exist.
async fn check_dependencies(
    kms: &dyn AwsKmsClient,
    dynamodb: &dyn DynamoDbClient,
    kms_key_alias: &str,
    table_name: &str,
    timeout: Duration,
) -> Result<()> {
    if !validate::table_exists(dynamodb, table_name, timeout).await? {
        return Err(Error::missing(Dependency::Table, table_name));
    }

    if !validate::alias_exists(kms, kms_key_alias, timeout).await? {
        return Err(Error::missing(Dependency::KmsAlias, kms_key_alias));
    }

    Ok(())
}

/// Builder for [`EnvelopeProvider`]
///
/// ```no_run
/// use cryptctl::endpoint::EndpointMode;
/// use cryptctl::provider::EnvelopeProviderBuilder;
/// use std::time::Duration;
///
/// # async fn example() -> cryptctl::Result<()> {
/// let provider = EnvelopeProviderBuilder::new("alias/my-key", "secrets")
///     .with_endpoint_mode(EndpointMode::LocalEmulator("http://localhost:4566".into()))
///     .with_timeout(Duration::from_secs(5))
///     .build()
///     .await?;
/// assert_eq!(provider.table_name(), "secrets");
/// # Ok(())
/// # }
/// ```
pub struct EnvelopeProviderBuilder {
    kms_key_alias: String,
    table_name: String,
    endpoint: Option<EndpointMode>,
    debug: bool,
    timeout: Option<Duration>,
    factory: Option<Arc<dyn ClientFactory>>,
}

impl fmt::Debug for EnvelopeProviderBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvelopeProviderBuilder")
            .field("kms_key_alias", &self.kms_key_alias)
            .field("table_name", &self.table_name)
            .field("endpoint", &self.endpoint)
            .field("debug", &self.debug)
            .field("timeout", &self.timeout)
            .field("custom_factory", &self.factory.is_some())
            .finish()
    }
}

impl EnvelopeProviderBuilder {
    pub fn new(kms_key_alias: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            kms_key_alias: kms_key_alias.into(),
            table_name: table_name.into(),
            endpoint: None,
            debug: false,
            timeout: None,
            factory: None,
        }
    }

    /// Uses an already resolved endpoint mode
    pub fn with_endpoint_mode(mut self, endpoint: EndpointMode) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Resolves the endpoint from the process environment at build time.
    /// Ignored when an endpoint mode was set explicitly.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Deadline for each individual service call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Replaces the AWS SDK client factory, mainly for tests
    pub fn with_client_factory(mut self, factory: Arc<dyn ClientFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Builds the clients, confirms the table and the alias exist, and returns
    /// the provider.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] if the alias or table name is blank, or debug
    ///   mode is requested without an emulator URL
    /// - [`Error::DependencyMissing`] if the table or alias does not exist; a
    ///   missing table is reported without looking at the alias
    /// - [`Error::Infrastructure`] / [`Error::Timeout`] if a service call fails
    pub async fn build(self) -> Result<EnvelopeProvider> {
        if self.kms_key_alias.trim().is_empty() {
            return Err(Error::configuration(
                "KMS key alias is required for aws-kms-envelope provider",
            ));
        }
        if self.table_name.trim().is_empty() {
            return Err(Error::configuration(
                "DynamoDB table is required for aws-kms-envelope provider",
            ));
        }

        let endpoint = match self.endpoint {
            Some(endpoint) => endpoint,
            None => EndpointMode::from_env(self.debug)?,
        };
        let timeout = self.timeout.unwrap_or(DEFAULT_TIMEOUT);
        let factory: Arc<dyn ClientFactory> = match self.factory {
            Some(factory) => factory,
            None => Arc::new(AwsClientFactory::new()),
        };

        let settings = ClientSettings::new(endpoint, timeout);
        let (kms, dynamodb) = factory.clients(&settings).await?;

        check_dependencies(
            kms.as_ref(),
            dynamodb.as_ref(),
            &self.kms_key_alias,
            &self.table_name,
            timeout,
        )
        .await?;

        log::info!(
            "Envelope provider ready: table {}, alias {}, {} endpoint",
            self.table_name,
            self.kms_key_alias,
            settings.endpoint
        );

        Ok(EnvelopeProvider {
            kms,
            dynamodb,
            endpoint: settings.endpoint,
            kms_key_alias: self.kms_key_alias,
            table_name: self.table_name,
            timeout,
        })
    }
}
