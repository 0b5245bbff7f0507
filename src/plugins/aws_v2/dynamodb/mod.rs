//! DynamoDB client using AWS SDK v2

mod client;

pub use client::{DynamoDbClient, StandardDynamoDbClient};
