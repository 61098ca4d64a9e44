use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use async_trait::async_trait;
use itertools::Itertools;
use tokio::net::{lookup_host, ToSocketAddrs};
use tracing::{debug, warn};

use crate::cluster::node::{HostSpec, ResolvedContactPoint, DEFAULT_PORT};
use crate::errors::{DnsLookupError, FailedResolution, ResolutionError};

/// Translates host specifications supplied by the user into resolved addresses.
///
/// Resolution happens once, when a filter that needs it is constructed
/// (see [`AllowListHostFilter`](crate::policies::host_filter::AllowListHostFilter)),
/// never on the path that decides whether a node is accepted.
///
/// A batch is resolved as a whole: if any of the specs cannot be resolved,
/// the resolver returns an error describing every failed spec instead of
/// a partial result. Results are not required to follow the order of `specs`,
/// and a single spec may yield several addresses.
///
/// The resolver owns any timeout policy. Callers do not retry.
#[async_trait]
pub trait AddressResolver: Send + Sync {
    /// Resolves all `specs`, or fails.
    async fn resolve(
        &self,
        specs: &[HostSpec],
    ) -> Result<Vec<ResolvedContactPoint>, ResolutionError>;
}

/// Resolves hosts with the system resolver.
///
/// IP literals are used as they are. Other strings are looked up in DNS,
/// first as `host:port` and then as a bare hostname with the default port.
/// All addresses returned for a hostname are kept.
#[derive(Debug, Clone)]
pub struct DnsAddressResolver {
    hostname_resolution_timeout: Option<Duration>,
    default_port: u16,
}

impl Default for DnsAddressResolver {
    fn default() -> Self {
        Self {
            hostname_resolution_timeout: Some(Duration::from_secs(5)),
            default_port: DEFAULT_PORT,
        }
    }
}

impl DnsAddressResolver {
    /// Creates a resolver with a 5 second lookup timeout and the CQL default port.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the timeout for a single lookup. [None] disables the timeout.
    pub fn with_hostname_resolution_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.hostname_resolution_timeout = timeout;
        self
    }

    /// Sets the port used for specs that don't carry one.
    pub fn with_default_port(mut self, port: u16) -> Self {
        self.default_port = port;
        self
    }

    async fn resolve_spec(&self, spec: &HostSpec) -> Result<Vec<SocketAddr>, DnsLookupError> {
        let host = spec.address.as_str();
        if host.is_empty() {
            return Err(DnsLookupError::EmptyAddress);
        }

        let port = spec.port.unwrap_or(self.default_port);
        if let Ok(ip) = host.parse::<IpAddr>() {
            return Ok(vec![SocketAddr::new(ip, port)]);
        }

        let addrs: Vec<SocketAddr> = match spec.port {
            Some(port) => {
                lookup_host_with_timeout((host, port), self.hostname_resolution_timeout)
                    .await?
                    .collect()
            }
            // A string passed to `lookup_host` must be in the form "hostname:port",
            // otherwise it fails immediately. In that case retry with the default port,
            // unless the first attempt timed out.
            None => match lookup_host_with_timeout(host, self.hostname_resolution_timeout).await {
                Ok(addrs) => addrs.collect(),
                Err(DnsLookupError::Timeout(t)) => return Err(DnsLookupError::Timeout(t)),
                Err(e) => lookup_host_with_timeout((host, port), self.hostname_resolution_timeout)
                    .await
                    .or(Err(e))?
                    .collect(),
            },
        };

        if addrs.is_empty() {
            return Err(DnsLookupError::EmptyAddressListForHost(host.to_owned()));
        }
        Ok(addrs)
    }
}

#[async_trait]
impl AddressResolver for DnsAddressResolver {
    async fn resolve(
        &self,
        specs: &[HostSpec],
    ) -> Result<Vec<ResolvedContactPoint>, ResolutionError> {
        let resolve_futures = specs.iter().map(|spec| async move {
            self.resolve_spec(spec)
                .await
                .map_err(|error| FailedResolution {
                    host: spec.to_string(),
                    error,
                })
        });
        let results = futures::future::join_all(resolve_futures).await;
        collect_batch(results)
    }
}

/// A static address table, keyed by hostname.
///
/// IP and `ip:port` literals resolve to themselves; names missing from the table fail.
/// Specs without a port get [`DEFAULT_PORT`].
#[async_trait]
impl AddressResolver for HashMap<String, Vec<IpAddr>> {
    async fn resolve(
        &self,
        specs: &[HostSpec],
    ) -> Result<Vec<ResolvedContactPoint>, ResolutionError> {
        let results = specs.iter().map(|spec| {
            let port = spec.port.unwrap_or(DEFAULT_PORT);
            let host = spec.address.as_str();
            let addrs = if host.is_empty() {
                Err(DnsLookupError::EmptyAddress)
            } else if let Ok(ip) = host.parse::<IpAddr>() {
                Ok(vec![SocketAddr::new(ip, port)])
            } else if let Ok(addr) = host.parse::<SocketAddr>() {
                Ok(vec![addr])
            } else {
                match self.get(host) {
                    Some(ips) if !ips.is_empty() => {
                        Ok(ips.iter().map(|&ip| SocketAddr::new(ip, port)).collect())
                    }
                    _ => Err(DnsLookupError::EmptyAddressListForHost(host.to_owned())),
                }
            };
            addrs.map_err(|error| FailedResolution {
                host: spec.to_string(),
                error,
            })
        });
        collect_batch(results)
    }
}

/// Performs a DNS lookup with provided optional timeout.
async fn lookup_host_with_timeout(
    host: impl ToSocketAddrs,
    hostname_resolution_timeout: Option<Duration>,
) -> Result<impl Iterator<Item = SocketAddr>, DnsLookupError> {
    if let Some(timeout) = hostname_resolution_timeout {
        match tokio::time::timeout(timeout, lookup_host(host)).await {
            Ok(res) => res.map_err(Into::into),
            // Elapsed error from tokio library does not provide any context.
            Err(_) => Err(DnsLookupError::Timeout(timeout.as_millis())),
        }
    } else {
        lookup_host(host).await.map_err(Into::into)
    }
}

// Fails the whole batch if any entry failed, logging each failure.
fn collect_batch(
    results: impl IntoIterator<Item = Result<Vec<SocketAddr>, FailedResolution>>,
) -> Result<Vec<ResolvedContactPoint>, ResolutionError> {
    let (resolved, failed): (Vec<_>, Vec<_>) = results.into_iter().partition_result();

    if !failed.is_empty() {
        for failure in &failed {
            warn!(
                host = %failure.host,
                error = %failure.error,
                "Hostname resolution failed"
            );
        }
        return Err(ResolutionError::FailedToResolve(failed));
    }

    let contact_points: Vec<ResolvedContactPoint> = resolved
        .into_iter()
        .flatten()
        .unique()
        .map(|address| ResolvedContactPoint { address })
        .collect();
    debug!(
        resolved = contact_points.len(),
        "Resolved host specifications"
    );
    Ok(contact_points)
}
