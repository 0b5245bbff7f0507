//! AWS SDK v2 plugin implementations
//!
//! Thin wrappers around `aws-sdk-kms` and `aws-sdk-dynamodb`, plus the
//! [`ClientFactory`] that builds them for a resolved
//! [`EndpointMode`](crate::endpoint::EndpointMode).

pub mod dynamodb;
mod factory;
pub mod kms;

pub use dynamodb::{DynamoDbClient, StandardDynamoDbClient};
pub use factory::{
    load_sdk_config, AwsClientFactory, ClientFactory, ClientPair, ClientSettings, DEFAULT_REGION,
};
pub use kms::{AliasPage, AwsKmsClient, StandardAwsKmsClient};
