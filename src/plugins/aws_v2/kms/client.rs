use crate::error::ServiceError;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_kms::Client as AwsSdkKmsClient;

/// One page of a ListAliases response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasPage {
    /// Alias names on this page, e.g. `alias/my-key`
    pub aliases: Vec<String>,

    /// Continuation marker; `None` when this was the last page
    pub next_marker: Option<String>,
}

/// AWS KMS client trait
#[async_trait]
pub trait AwsKmsClient: Send + Sync {
    /// Fetches one page of key aliases starting at `marker`
    async fn list_aliases(
        &self,
        marker: Option<String>,
        limit: i32,
    ) -> Result<AliasPage, ServiceError>;
}

/// Standard implementation of AwsKmsClient using AWS SDK v2
#[derive(Debug, Clone)]
pub struct StandardAwsKmsClient {
    client: AwsSdkKmsClient,
}

impl StandardAwsKmsClient {
    /// Creates a new StandardAwsKmsClient
    pub fn new(client: AwsSdkKmsClient) -> Self {
        Self { client }
    }

    /// Creates a client from a loaded SDK configuration, endpoint override included
    pub fn from_conf(config: &SdkConfig) -> Self {
        Self::new(AwsSdkKmsClient::new(config))
    }

    /// The wrapped SDK client
    pub fn inner(&self) -> &AwsSdkKmsClient {
        &self.client
    }
}

#[async_trait]
impl AwsKmsClient for StandardAwsKmsClient {
    async fn list_aliases(
        &self,
        marker: Option<String>,
        limit: i32,
    ) -> Result<AliasPage, ServiceError> {
        let output = self
            .client
            .list_aliases()
            .limit(limit)
            .set_marker(marker)
            .send()
            .await
            .map_err(ServiceError::other)?;

        let aliases = output
            .aliases()
            .iter()
            .filter_map(|entry| entry.alias_name().map(str::to_string))
            .collect();

        let next_marker = if output.truncated() {
            output.next_marker().map(str::to_string)
        } else {
            None
        };

        Ok(AliasPage {
            aliases,
            next_marker,
        })
    }
}
