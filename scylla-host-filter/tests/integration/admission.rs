use std::sync::Arc;

use scylla_host_filter::cluster::{PeerAdmission, ResolvedContactPoint};
use scylla_host_filter::policies::host_filter::{
    AcceptAllHostFilter, AllowListHostFilter, DcHostFilter,
};
use scylla_host_filter::AdmissionConfigBuilder;

use crate::utils::{peer, peer_in_dc, setup_tracing};

#[test]
fn dc_filter_admission() {
    setup_tracing();
    let config = AdmissionConfigBuilder::new()
        .host_filter(Arc::new(DcHostFilter::new("us-east")))
        .build();
    let admission = PeerAdmission::new(&config);

    let admitted = admission.admit([
        peer_in_dc([10, 0, 0, 1], "us-east"),
        peer_in_dc([10, 0, 0, 2], "us-west"),
        peer([10, 0, 0, 3]),
    ]);

    assert_eq!(admitted.accepted.len(), 1);
    assert_eq!(admitted.accepted[0].datacenter.as_deref(), Some("us-east"));
    assert_eq!(admitted.rejected.len(), 2);
}

#[test]
fn accept_all_admits_empty_peer() {
    setup_tracing();
    let config = AdmissionConfigBuilder::new()
        .host_filter(Arc::new(AcceptAllHostFilter))
        .build();
    let admission = PeerAdmission::new(&config);
    assert!(admission.accepts(&peer([0, 0, 0, 0])));
}

#[tokio::test]
async fn allow_list_admission_from_config() {
    setup_tracing();
    let config = AdmissionConfigBuilder::new()
        .allow_list(["10.0.0.1", "10.0.0.2"])
        .await
        .unwrap()
        .build();
    let admission = PeerAdmission::new(&config);

    let admitted = admission.admit((1..=4).map(|i| peer([10, 0, 0, i])));
    let accepted: Vec<_> = admitted.accepted.iter().map(|p| p.peer.to_string()).collect();
    assert_eq!(accepted, vec!["10.0.0.1", "10.0.0.2"]);
}

#[test]
fn prebuilt_allow_list_from_contact_points() {
    setup_tracing();
    let filter = AllowListHostFilter::from_contact_points(Vec::<ResolvedContactPoint>::new());
    let config = AdmissionConfigBuilder::new()
        .host_filter(Arc::new(filter))
        .build();

    let admitted = PeerAdmission::new(&config).admit([peer([10, 0, 0, 1])]);
    assert!(admitted.accepted.is_empty());
    assert_eq!(admitted.rejected.len(), 1);
}
