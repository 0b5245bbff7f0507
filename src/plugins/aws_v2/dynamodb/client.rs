use crate::error::ServiceError;
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::Client as AwsDynamoDbClient;

/// DynamoDB client interface for the secrets table
#[async_trait]
pub trait DynamoDbClient: Send + Sync {
    /// Describes the named table.
    ///
    /// A missing table must be reported as [`ServiceError::ResourceNotFound`];
    /// every other failure as [`ServiceError::Other`].
    async fn describe_table(&self, table_name: &str) -> Result<(), ServiceError>;
}

/// Standard DynamoDB client implementation using AWS SDK v2
#[derive(Debug, Clone)]
pub struct StandardDynamoDbClient {
    client: AwsDynamoDbClient,
}

impl StandardDynamoDbClient {
    /// Creates a new StandardDynamoDbClient
    pub fn new(client: AwsDynamoDbClient) -> Self {
        Self { client }
    }

    /// Creates a client from a loaded SDK configuration, endpoint override included
    pub fn from_conf(config: &SdkConfig) -> Self {
        Self::new(AwsDynamoDbClient::new(config))
    }

    /// The wrapped SDK client
    pub fn inner(&self) -> &AwsDynamoDbClient {
        &self.client
    }
}

#[async_trait]
impl DynamoDbClient for StandardDynamoDbClient {
    async fn describe_table(&self, table_name: &str) -> Result<(), ServiceError> {
        match self
            .client
            .describe_table()
            .table_name(table_name)
            .send()
            .await
        {
            Ok(_) => Ok(()),
            Err(err) => {
                let not_found = matches!(
                    &err,
                    SdkError::ServiceError(service_err)
                        if service_err.err().is_resource_not_found_exception()
                );
                if not_found {
                    Err(ServiceError::ResourceNotFound(Box::new(err)))
                } else {
                    Err(ServiceError::Other(Box::new(err)))
                }
            }
        }
    }
}
