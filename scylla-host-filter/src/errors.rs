//! Errors that can occur while setting up host filters.
//!
//! Note that [`HostFilter::accept`](crate::policies::host_filter::HostFilter::accept)
//! itself never fails; all fallible work happens when a filter is constructed.

use std::fmt::Display;
use std::sync::Arc;

use itertools::Itertools;
use thiserror::Error;

/// An error that occurred while looking up a single host.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum DnsLookupError {
    /// The lookup did not finish within the configured timeout.
    #[error("Failed to perform DNS lookup within {0}ms")]
    Timeout(u128),

    /// The lookup succeeded, but returned no addresses.
    #[error("Empty address list returned by DNS for {0}")]
    EmptyAddressListForHost(String),

    /// An empty string was passed as the address.
    #[error("Empty address string")]
    EmptyAddress,

    /// The underlying resolver failed.
    #[error("IO Error: {0}")]
    IoError(Arc<std::io::Error>),
}

impl From<std::io::Error> for DnsLookupError {
    fn from(err: std::io::Error) -> Self {
        DnsLookupError::IoError(Arc::new(err))
    }
}

/// Describes a single entry of a batch that could not be resolved.
#[derive(Debug, Clone)]
pub struct FailedResolution {
    /// The address string as supplied by the user.
    pub host: String,
    /// Why the lookup failed.
    pub error: DnsLookupError,
}

impl Display for FailedResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.host, self.error)
    }
}

/// An error returned by an [`AddressResolver`](crate::policies::address_resolver::AddressResolver).
///
/// A batch is resolved either completely or not at all, so this error
/// means that none of the results of the batch are usable.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum ResolutionError {
    /// One or more entries of the batch failed to resolve.
    #[error("Failed to resolve hosts: [{}]", .0.iter().format(", "))]
    FailedToResolve(Vec<FailedResolution>),
}

/// An error that occurred while constructing an
/// [`AllowListHostFilter`](crate::policies::host_filter::AllowListHostFilter).
///
/// If this error is returned, no filter is created. In particular, the filter
/// never falls back to accepting or rejecting every node.
#[derive(Error, Debug, Clone)]
#[non_exhaustive]
pub enum AllowListError {
    /// Addresses from the allow list could not be resolved.
    #[error("Unable to look up host info from allow list addresses: {0}")]
    Resolution(#[from] ResolutionError),
}
