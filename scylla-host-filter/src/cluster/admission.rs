use std::sync::Arc;

use itertools::Itertools;
use tracing::{debug, error, trace};

use crate::client::config::AdmissionConfig;
use crate::cluster::node::Peer;
use crate::policies::host_filter::HostFilter;

/// Peers split by the host filter's decision.
#[derive(Debug, Default, Clone)]
pub struct AdmittedPeers {
    /// Peers that should be added to the connection pool.
    pub accepted: Vec<Peer>,
    /// Peers that were filtered out. The driver opens no connections to them.
    pub rejected: Vec<Peer>,
}

/// The point where discovered peers meet the configured [`HostFilter`].
///
/// Each discovered peer is checked once. A rejected peer is dropped silently,
/// without an error being reported to the discovery side.
#[derive(Clone)]
pub struct PeerAdmission {
    host_filter: Option<Arc<dyn HostFilter>>,
}

impl std::fmt::Debug for PeerAdmission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PeerAdmission")
            .field(
                "host_filter",
                &self.host_filter.as_ref().map(|_| "<dyn HostFilter>"),
            )
            .finish()
    }
}

impl PeerAdmission {
    /// Creates an admission point using the filter from `config`.
    pub fn new(config: &AdmissionConfig) -> Self {
        Self {
            host_filter: config.host_filter.clone(),
        }
    }

    /// Returns whether the peer should be connected to.
    ///
    /// Without a configured filter every peer is accepted.
    pub fn accepts(&self, peer: &Peer) -> bool {
        self.host_filter.as_ref().is_none_or(|f| f.accept(peer))
    }

    /// Runs the filter over a batch of discovered peers.
    pub fn admit(&self, peers: impl IntoIterator<Item = Peer>) -> AdmittedPeers {
        let (accepted, rejected): (Vec<Peer>, Vec<Peer>) =
            peers.into_iter().partition(|peer| self.accepts(peer));

        for peer in &rejected {
            trace!(peer = %peer, "Peer rejected by the host filter");
        }

        // Check if the host filter isn't accidentally too restrictive,
        // and print an error message about this fact
        if accepted.is_empty() && !rejected.is_empty() {
            error!(
                node_ips = %rejected.iter().map(|peer| peer.address).join(", "),
                "The host filter rejected all nodes in the cluster, \
                no connections that can serve user queries will be \
                established. The session cannot serve any queries!"
            )
        }

        debug!(
            accepted = accepted.len(),
            rejected = rejected.len(),
            "Applied host filter to discovered peers"
        );

        AdmittedPeers { accepted, rejected }
    }
}
