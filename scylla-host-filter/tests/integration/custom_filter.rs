use std::collections::HashSet;
use std::sync::Arc;

use scylla_host_filter::cluster::{Peer, PeerAdmission, Token};
use scylla_host_filter::policies::host_filter::{host_filter_fn, DcHostFilter, HostFilter};
use scylla_host_filter::AdmissionConfigBuilder;

use crate::utils::{peer_in_dc, setup_tracing};

/// Accepts nodes from a set of racks, within a datacenter.
struct RackHostFilter {
    dc: DcHostFilter,
    racks: HashSet<String>,
}

impl HostFilter for RackHostFilter {
    fn accept(&self, peer: &Peer) -> bool {
        self.dc.accept(peer)
            && peer
                .rack
                .as_ref()
                .is_some_and(|rack| self.racks.contains(rack))
    }
}

#[test]
fn user_defined_filter() {
    setup_tracing();
    let filter = RackHostFilter {
        dc: DcHostFilter::new("dc1"),
        racks: HashSet::from(["r1".to_owned(), "r2".to_owned()]),
    };
    let config = AdmissionConfigBuilder::new()
        .host_filter(Arc::new(filter))
        .build();
    let admission = PeerAdmission::new(&config);

    assert!(admission.accepts(&peer_in_dc([10, 0, 0, 1], "dc1").with_rack("r1")));
    assert!(!admission.accepts(&peer_in_dc([10, 0, 0, 2], "dc1").with_rack("r3")));
    assert!(!admission.accepts(&peer_in_dc([10, 0, 0, 3], "dc2").with_rack("r1")));
    assert!(!admission.accepts(&peer_in_dc([10, 0, 0, 4], "dc1")));
}

#[test]
fn closure_filter() {
    setup_tracing();
    let config = AdmissionConfigBuilder::new()
        .host_filter(Arc::new(host_filter_fn(|peer: &Peer| peer.tokens.len() >= 2)))
        .build();
    let admission = PeerAdmission::new(&config);

    let with_tokens = peer_in_dc([10, 0, 0, 1], "dc1")
        .with_tokens(vec![Token::new(-10), Token::new(10)]);
    assert!(admission.accepts(&with_tokens));
    assert!(!admission.accepts(&peer_in_dc([10, 0, 0, 2], "dc1")));
}
