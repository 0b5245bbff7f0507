//! Existence checks for the envelope provider's external dependencies
//!
//! Both checks are read-only and can be called any number of times, in any
//! order. A `false` result always means the service said the resource is not
//! there; failures to ask are errors.

use crate::error::{Error, Result, Service, ServiceError};
use crate::plugins::aws_v2::{AwsKmsClient, DynamoDbClient};
use crate::timer;
use std::future::Future;
use std::time::Duration;

/// Aliases requested per ListAliases page
pub const ALIAS_PAGE_SIZE: i32 = 100;

/// Default deadline for a single service call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

// Only the deadline is turned into an `Error` here; classifying the client's
// answer is left to the caller.
async fn with_deadline<T, F>(
    service: Service,
    deadline: Duration,
    call: F,
) -> Result<std::result::Result<T, ServiceError>>
where
    F: Future<Output = std::result::Result<T, ServiceError>>,
{
    tokio::time::timeout(deadline, call)
        .await
        .map_err(|_| Error::Timeout {
            service,
            after: deadline,
        })
}

/// Checks whether a DynamoDB table exists.
///
/// Only a resource-not-found answer yields `Ok(false)`. Access denied,
/// throttling, network failures and the like are returned as
/// [`Error::Infrastructure`] with the client's error as source.
pub async fn table_exists(
    client: &dyn DynamoDbClient,
    table_name: &str,
    deadline: Duration,
) -> Result<bool> {
    let _timer = timer!("dynamodb");

    match with_deadline(Service::DynamoDb, deadline, client.describe_table(table_name)).await? {
        Ok(()) => Ok(true),
        Err(ServiceError::ResourceNotFound(_)) => {
            log::debug!("DynamoDB table {} not found", table_name);
            Ok(false)
        }
        Err(err) => Err(err.into_error(Service::DynamoDb)),
    }
}

/// Checks whether a KMS alias exists.
///
/// Walks ListAliases pages of [`ALIAS_PAGE_SIZE`] until the alias turns up or
/// the service reports no further pages. Each page fetch gets its own deadline.
pub async fn alias_exists(
    client: &dyn AwsKmsClient,
    alias_name: &str,
    deadline: Duration,
) -> Result<bool> {
    let _timer = timer!("kms");

    let mut marker = None;
    let mut pages = 0usize;

    loop {
        let page = with_deadline(
            Service::Kms,
            deadline,
            client.list_aliases(marker.take(), ALIAS_PAGE_SIZE),
        )
        .await?
        .map_err(|err| err.into_error(Service::Kms))?;
        pages += 1;

        if page.aliases.iter().any(|name| name == alias_name) {
            log::debug!("KMS alias {} found on page {}", alias_name, pages);
            return Ok(true);
        }

        match page.next_marker {
            Some(next) if !next.is_empty() => marker = Some(next),
            _ => {
                log::debug!("KMS alias {} not found in {} page(s)", alias_name, pages);
                return Ok(false);
            }
        }
    }
}
