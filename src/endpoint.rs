//! Endpoint resolution for AWS service clients
//!
//! In production the clients use the ambient AWS configuration chain. In debug
//! mode every client is pointed at a local emulator (LocalStack) whose base URL
//! comes from [`LOCALSTACK_ENDPOINT_VAR`].

use crate::error::{Error, Result};
use std::fmt;

/// Environment variable naming the local emulator's base URL
pub const LOCALSTACK_ENDPOINT_VAR: &str = "LOCALSTACK_ENDPOINT";

/// Where service clients send their requests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EndpointMode {
    /// Default AWS endpoints, region and credentials from the environment chain
    #[default]
    Production,
    /// Every request goes to this base URL
    LocalEmulator(String),
}

impl EndpointMode {
    /// Resolves the mode for the given debug flag.
    ///
    /// `lookup` reads a variable by name. Outside debug mode it is never called.
    /// In debug mode a missing or blank emulator URL is an error; there is no
    /// fallback to production.
    pub fn resolve<F>(debug: bool, lookup: F) -> Result<Self>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        if !debug {
            return Ok(EndpointMode::Production);
        }

        let url = lookup(LOCALSTACK_ENDPOINT_VAR)
            .map(|value| value.trim().to_string())
            .unwrap_or_default();
        if url.is_empty() {
            return Err(Error::configuration(format!(
                "{LOCALSTACK_ENDPOINT_VAR} environment variable is not set"
            )));
        }

        log::debug!("Routing AWS requests to local emulator at {}", url);
        Ok(EndpointMode::LocalEmulator(url))
    }

    /// Resolves the mode from the process environment
    pub fn from_env(debug: bool) -> Result<Self> {
        Self::resolve(debug, |name| std::env::var(name).ok())
    }

    /// The override URL, if any
    pub fn endpoint_url(&self) -> Option<&str> {
        match self {
            EndpointMode::Production => None,
            EndpointMode::LocalEmulator(url) => Some(url),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, EndpointMode::LocalEmulator(_))
    }
}

impl fmt::Display for EndpointMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointMode::Production => f.write_str("production"),
            EndpointMode::LocalEmulator(url) => write!(f, "local emulator ({url})"),
        }
    }
}
