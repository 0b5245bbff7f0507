use crate::error::{Error, Result};
use regex::Regex;
use std::sync::OnceLock;

const MAX_NAMESPACE_LEN: usize = 63;
const NAMESPACE_PATTERN: &str = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";

static NAMESPACE_REGEX: OnceLock<Regex> = OnceLock::new();

fn namespace_regex() -> &'static Regex {
    NAMESPACE_REGEX.get_or_init(|| {
        Regex::new(NAMESPACE_PATTERN).expect("Failed to create regex pattern for namespaces")
    })
}

/// Secrets kept in a Kubernetes namespace
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct K8sProvider {
    namespace: String,
}

impl K8sProvider {
    /// Creates the provider for `namespace`, which must be a valid RFC 1123 label
    pub fn new(namespace: impl Into<String>) -> Result<Self> {
        let namespace = namespace.into();
        validate_namespace(&namespace)?;
        log::debug!("Using Kubernetes namespace {}", namespace);
        Ok(Self { namespace })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

fn validate_namespace(namespace: &str) -> Result<()> {
    if namespace.len() > MAX_NAMESPACE_LEN {
        return Err(Error::configuration(format!(
            "invalid namespace '{namespace}': must be no more than {MAX_NAMESPACE_LEN} characters"
        )));
    }

    if !namespace_regex().is_match(namespace) {
        return Err(Error::configuration(format!(
            "invalid namespace '{namespace}': must consist of lower case alphanumeric \
             characters or '-', and must start and end with an alphanumeric character"
        )));
    }

    Ok(())
}
