use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;

use assert_matches::assert_matches;
use scylla_host_filter::errors::{AllowListError, ResolutionError};
use scylla_host_filter::policies::address_resolver::DnsAddressResolver;
use scylla_host_filter::policies::host_filter::{AllowListHostFilter, HostFilter};

use crate::utils::{peer, setup_tracing};

fn resolver() -> HashMap<String, Vec<IpAddr>> {
    HashMap::from([
        ("node1.dc1".to_owned(), vec![IpAddr::from([10, 0, 0, 1])]),
        ("node2.dc1".to_owned(), vec![IpAddr::from([10, 0, 0, 2])]),
        (
            "dual.dc1".to_owned(),
            vec![
                IpAddr::from([10, 0, 0, 7]),
                "fd00::7".parse::<IpAddr>().unwrap(),
            ],
        ),
    ])
}

#[tokio::test]
async fn identity_resolution() {
    setup_tracing();
    let filter = AllowListHostFilter::new(&resolver(), ["10.0.0.1", "10.0.0.2"])
        .await
        .unwrap();

    assert!(filter.accept(&peer([10, 0, 0, 1])));
    assert!(filter.accept(&peer([10, 0, 0, 2])));
    assert!(!filter.accept(&peer([10, 0, 0, 3])));
}

#[tokio::test]
async fn hostname_with_several_addresses() {
    setup_tracing();
    let filter = AllowListHostFilter::new(&resolver(), ["dual.dc1"])
        .await
        .unwrap();

    assert_eq!(filter.allowed().len(), 2);
    assert!(filter.accept(&peer([10, 0, 0, 7])));
    assert!(filter.accept(&peer([10, 0, 0, 8]).with_peer("fd00::7".parse().unwrap())));
}

#[tokio::test]
async fn unresolvable_host_fails_construction() {
    setup_tracing();
    let res = AllowListHostFilter::new(&resolver(), ["node1.dc1", "not-a-real-host"]).await;

    // The resolvable subset is not used either.
    assert_matches!(
        res,
        Err(AllowListError::Resolution(ResolutionError::FailedToResolve(failed))) => {
            assert_eq!(failed.len(), 1);
            assert_eq!(failed[0].host, "not-a-real-host");
        }
    );
}

#[tokio::test]
#[ntest::timeout(30000)]
async fn dns_resolution_failure_fails_construction() {
    setup_tracing();
    let resolver = DnsAddressResolver::new();
    let res =
        AllowListHostFilter::new(&resolver, ["127.0.0.1", "not-a-real-host.invalid"]).await;
    assert_matches!(res, Err(AllowListError::Resolution(_)));
}

#[tokio::test]
async fn shared_between_threads() {
    setup_tracing();
    let filter: Arc<dyn HostFilter> = Arc::new(
        AllowListHostFilter::new(&resolver(), ["node1.dc1", "node2.dc1", "10.0.0.5"])
            .await
            .unwrap(),
    );
    let peers: Vec<_> = (0..10u8).map(|i| peer([10, 0, 0, i])).collect();
    let sequential: Vec<bool> = peers.iter().map(|p| filter.accept(p)).collect();

    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let filter = Arc::clone(&filter);
            let peers = peers.clone();
            tokio::task::spawn_blocking(move || {
                peers.iter().map(|p| filter.accept(p)).collect::<Vec<_>>()
            })
        })
        .collect();

    for task in tasks {
        assert_eq!(task.await.unwrap(), sequential);
    }
    assert_eq!(
        sequential,
        vec![false, true, true, false, false, true, false, false, false, false]
    );
}
