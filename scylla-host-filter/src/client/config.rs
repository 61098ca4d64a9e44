//! Configuration of host admission.

use std::sync::Arc;
use std::time::Duration;

use crate::errors::AllowListError;
use crate::policies::address_resolver::DnsAddressResolver;
use crate::policies::host_filter::{AllowListHostFilter, HostFilter};

/// Configuration options for [`PeerAdmission`](crate::cluster::admission::PeerAdmission).
/// Can be created manually, but usually it's easier to use
/// [AdmissionConfigBuilder].
#[derive(Clone)]
#[non_exhaustive]
pub struct AdmissionConfig {
    /// The host filter decides whether any connections should be opened
    /// to the node or not. If [None], all discovered nodes are accepted.
    pub host_filter: Option<Arc<dyn HostFilter>>,

    /// Timeout for a single hostname lookup done while building
    /// an allow list. If [None], lookups are not bounded.
    pub hostname_resolution_timeout: Option<Duration>,
}

impl AdmissionConfig {
    /// Creates a [`AdmissionConfig`] with default configuration
    /// # Default configuration
    /// * Host filter: None
    /// * Hostname resolution timeout: 5 seconds
    pub fn new() -> Self {
        Self {
            host_filter: None,
            hostname_resolution_timeout: Some(Duration::from_secs(5)),
        }
    }
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AdmissionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdmissionConfig")
            .field("host_filter", &self.host_filter.is_some())
            .field(
                "hostname_resolution_timeout",
                &self.hostname_resolution_timeout,
            )
            .finish()
    }
}

/// AdmissionConfigBuilder is used to create new [`AdmissionConfig`]s.
///
/// # Example
///
/// ```
/// # use scylla_host_filter::client::config::{AdmissionConfig, AdmissionConfigBuilder};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config: AdmissionConfig = AdmissionConfigBuilder::new()
///     .allow_list(["127.0.0.1", "127.0.0.2"])
///     .await?
///     .build();
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct AdmissionConfigBuilder {
    /// The configuration being built.
    pub config: AdmissionConfig,
}

impl AdmissionConfigBuilder {
    /// Creates new AdmissionConfigBuilder with default configuration
    pub fn new() -> Self {
        Self {
            config: AdmissionConfig::new(),
        }
    }

    /// Sets the host filter. The host filter decides whether any connections
    /// should be opened to the node or not. The driver will also avoid
    /// those nodes when re-establishing the control connection.
    ///
    /// See the [host filter](crate::policies::host_filter) module for a list
    /// of pre-defined filters. It is also possible to provide a custom filter
    /// by implementing the HostFilter trait.
    ///
    /// # Example
    /// ```
    /// # use std::sync::Arc;
    /// # use scylla_host_filter::client::config::AdmissionConfigBuilder;
    /// # use scylla_host_filter::policies::host_filter::DcHostFilter;
    /// let config = AdmissionConfigBuilder::new()
    ///     .host_filter(Arc::new(DcHostFilter::new("my-local-dc")))
    ///     .build();
    /// ```
    pub fn host_filter(mut self, filter: Arc<dyn HostFilter>) -> Self {
        self.config.host_filter = Some(filter);
        self
    }

    /// Changes DNS hostname resolution timeout.
    /// The default is 5 seconds.
    /// Using `None` disables the timeout.
    ///
    /// The timeout only affects allow lists built with
    /// [`allow_list`](Self::allow_list), so it must be set before.
    pub fn hostname_resolution_timeout(mut self, duration: Option<Duration>) -> Self {
        self.config.hostname_resolution_timeout = duration;
        self
    }

    /// Resolves `addresses` and installs an [`AllowListHostFilter`] accepting only them.
    ///
    /// Fails if any of the addresses can't be resolved; nothing is installed then.
    pub async fn allow_list<I, A>(mut self, addresses: I) -> Result<Self, AllowListError>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let resolver = DnsAddressResolver::new()
            .with_hostname_resolution_timeout(self.config.hostname_resolution_timeout);
        let filter = AllowListHostFilter::new(&resolver, addresses).await?;
        self.config.host_filter = Some(Arc::new(filter));
        Ok(self)
    }

    /// Finishes building.
    pub fn build(self) -> AdmissionConfig {
        self.config
    }
}
