//! Host filters.
//!
//! Host filters are essentially just a predicate over
//! [`Peer`]s. They are used by
//! [`PeerAdmission`](crate::cluster::admission::PeerAdmission) to determine whether
//! a discovered node should be added to the pool of connectable nodes or not.
//!
//! A filter decides based only on the peer and on state frozen at construction,
//! so a single instance can be shared between threads without locking.

use std::collections::HashSet;
use std::fmt;
use std::net::IpAddr;

use tracing::debug;

use crate::cluster::node::{HostSpec, Peer, ResolvedContactPoint};
use crate::errors::AllowListError;
use crate::policies::address_resolver::{AddressResolver, DnsAddressResolver};

/// The `HostFilter` trait.
///
/// Implementations must be pure: the same peer always yields the same answer,
/// and `accept` performs no I/O. There is no way to report an error from
/// `accept`; a filter that cannot decide should reject the peer.
pub trait HostFilter: Send + Sync {
    /// Returns whether a peer should be accepted or not.
    fn accept(&self, peer: &Peer) -> bool;
}

/// Unconditionally accepts all nodes.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllHostFilter;

impl HostFilter for AcceptAllHostFilter {
    fn accept(&self, _peer: &Peer) -> bool {
        true
    }
}

/// Unconditionally rejects all nodes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DenyAllHostFilter;

impl HostFilter for DenyAllHostFilter {
    fn accept(&self, _peer: &Peer) -> bool {
        false
    }
}

/// Accepts nodes whose broadcast addresses were present in the allow list
/// provided during filter's construction.
///
/// The allow list is resolved once, when the filter is created.
/// Nodes are compared by [`Peer::canonical_peer`], so ports are ignored.
pub struct AllowListHostFilter {
    allowed: HashSet<IpAddr>,
}

impl AllowListHostFilter {
    /// Creates a new `AllowListHostFilter` which only accepts nodes from the
    /// list, resolving the addresses with `resolver`.
    ///
    /// Each address may be an IP, a hostname or a `host:port` string.
    /// If any of them fails to resolve, no filter is created.
    pub async fn new<I, A>(
        resolver: &dyn AddressResolver,
        addresses: I,
    ) -> Result<Self, AllowListError>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let specs: Vec<HostSpec> = addresses.into_iter().map(HostSpec::new).collect();
        let resolved = resolver.resolve(&specs).await?;
        let filter = Self::from_contact_points(resolved);

        debug!(
            requested = specs.len(),
            allowed = filter.allowed.len(),
            "Built allow list host filter"
        );
        Ok(filter)
    }

    /// Same as [`AllowListHostFilter::new`], using a default [`DnsAddressResolver`].
    pub async fn with_dns<I, A>(addresses: I) -> Result<Self, AllowListError>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        Self::new(&DnsAddressResolver::default(), addresses).await
    }

    /// Creates a new `AllowListHostFilter` from already resolved addresses.
    pub fn from_contact_points(
        contact_points: impl IntoIterator<Item = ResolvedContactPoint>,
    ) -> Self {
        let allowed = contact_points
            .into_iter()
            .map(|cp| cp.canonical_peer())
            .collect();
        Self { allowed }
    }

    /// The set of accepted node identities.
    pub fn allowed(&self) -> &HashSet<IpAddr> {
        &self.allowed
    }
}

impl fmt::Debug for AllowListHostFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut allowed: Vec<&IpAddr> = self.allowed.iter().collect();
        allowed.sort_unstable();
        f.debug_struct("AllowListHostFilter")
            .field("allowed", &allowed)
            .finish()
    }
}

impl HostFilter for AllowListHostFilter {
    fn accept(&self, peer: &Peer) -> bool {
        self.allowed.contains(&peer.canonical_peer())
    }
}

/// Accepts nodes from given DC.
///
/// Datacenter names are compared exactly. A node with an unknown datacenter
/// is treated as having an empty datacenter name, so it is only accepted
/// if the filter was created with `""`.
#[derive(Debug, Clone)]
pub struct DcHostFilter {
    local_dc: String,
}

impl DcHostFilter {
    /// Creates a new `DcHostFilter` that accepts nodes only from the
    /// `local_dc`.
    pub fn new(local_dc: impl Into<String>) -> Self {
        Self {
            local_dc: local_dc.into(),
        }
    }
}

impl HostFilter for DcHostFilter {
    fn accept(&self, peer: &Peer) -> bool {
        peer.datacenter_or_empty() == self.local_dc
    }
}

/// Turns a closure into a [`HostFilter`], for ad hoc policies.
///
/// ```rust
/// # use scylla_host_filter::policies::host_filter::{FnHostFilter, HostFilter};
/// let filter = FnHostFilter::new(|peer| peer.rack.as_deref() == Some("rack1"));
/// ```
#[derive(Clone)]
pub struct FnHostFilter<F> {
    f: F,
}

impl<F> FnHostFilter<F>
where
    F: Fn(&Peer) -> bool + Send + Sync,
{
    /// Wraps `f`.
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> fmt::Debug for FnHostFilter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnHostFilter").finish_non_exhaustive()
    }
}

impl<F> HostFilter for FnHostFilter<F>
where
    F: Fn(&Peer) -> bool + Send + Sync,
{
    fn accept(&self, peer: &Peer) -> bool {
        (self.f)(peer)
    }
}

/// Shorthand for [`FnHostFilter::new`].
pub fn host_filter_fn<F>(f: F) -> FnHostFilter<F>
where
    F: Fn(&Peer) -> bool + Send + Sync,
{
    FnHostFilter::new(f)
}
