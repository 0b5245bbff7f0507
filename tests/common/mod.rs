// Fake AWS clients and a recording client factory for integration tests

#![allow(dead_code)]

pub mod fake_aws;

use async_trait::async_trait;
use cryptctl::error::ServiceError;
use cryptctl::plugins::aws_v2::{
    AliasPage, AwsKmsClient, ClientFactory, ClientSettings, DynamoDbClient,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, thiserror::Error)]
#[error("User is not authorized to perform: dynamodb:DescribeTable")]
pub struct AccessDenied;

/// DynamoDB fake that knows a fixed set of tables
pub struct FakeDynamoDbClient {
    tables: Vec<String>,
    deny: bool,
    pub calls: AtomicUsize,
}

impl FakeDynamoDbClient {
    pub fn with_tables(tables: &[&str]) -> Self {
        Self {
            tables: tables.iter().map(|t| t.to_string()).collect(),
            deny: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn denying() -> Self {
        Self {
            deny: true,
            ..Self::with_tables(&[])
        }
    }
}

#[async_trait]
impl DynamoDbClient for FakeDynamoDbClient {
    async fn describe_table(&self, table_name: &str) -> Result<(), ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.deny {
            return Err(ServiceError::other(AccessDenied));
        }
        if self.tables.iter().any(|t| t == table_name) {
            Ok(())
        } else {
            Err(ServiceError::ResourceNotFound(
                format!("Cannot do operations on a non-existent table: {table_name}").into(),
            ))
        }
    }
}

/// KMS fake serving aliases in pages of a fixed size
pub struct FakeKmsClient {
    aliases: Vec<String>,
    page_size: usize,
    pub calls: AtomicUsize,
}

impl FakeKmsClient {
    pub fn with_aliases(aliases: &[&str]) -> Self {
        Self {
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            page_size: 2,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl AwsKmsClient for FakeKmsClient {
    async fn list_aliases(
        &self,
        marker: Option<String>,
        _limit: i32,
    ) -> Result<AliasPage, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let start = marker
            .map(|m| m.parse::<usize>().map_err(ServiceError::other))
            .transpose()?
            .unwrap_or(0);
        let end = (start + self.page_size).min(self.aliases.len());
        let next_marker = (end < self.aliases.len()).then(|| end.to_string());

        Ok(AliasPage {
            aliases: self.aliases[start..end].to_vec(),
            next_marker,
        })
    }
}

/// Hands out the given fakes and records every request for a client
pub struct RecordingFactory {
    pub kms: Arc<FakeKmsClient>,
    pub dynamodb: Arc<FakeDynamoDbClient>,
    pub requests: Mutex<Vec<(&'static str, ClientSettings)>>,
}

impl RecordingFactory {
    pub fn new(kms: FakeKmsClient, dynamodb: FakeDynamoDbClient) -> Arc<Self> {
        Arc::new(Self {
            kms: Arc::new(kms),
            dynamodb: Arc::new(dynamodb),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Factory whose table and alias both exist
    pub fn ready(alias: &str, table: &str) -> Arc<Self> {
        Self::new(
            FakeKmsClient::with_aliases(&["alias/aws/s3", "alias/other", alias]),
            FakeDynamoDbClient::with_tables(&[table]),
        )
    }

    pub fn clients_built(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Service calls made by the fakes so far
    pub fn network_calls(&self) -> usize {
        self.kms.calls.load(Ordering::SeqCst) + self.dynamodb.calls.load(Ordering::SeqCst)
    }

    pub fn settings(&self) -> Vec<(&'static str, ClientSettings)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClientFactory for RecordingFactory {
    async fn kms_client(
        &self,
        settings: &ClientSettings,
    ) -> cryptctl::Result<Arc<dyn AwsKmsClient>> {
        self.requests.lock().unwrap().push(("kms", settings.clone()));
        Ok(self.kms.clone())
    }

    async fn dynamodb_client(
        &self,
        settings: &ClientSettings,
    ) -> cryptctl::Result<Arc<dyn DynamoDbClient>> {
        self.requests
            .lock()
            .unwrap()
            .push(("dynamodb", settings.clone()));
        Ok(self.dynamodb.clone())
    }
}
