use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use scylla_host_filter::cluster::{Peer, PeerAdmission};
use scylla_host_filter::policies::host_filter::DcHostFilter;
use scylla_host_filter::AdmissionConfigBuilder;
use tracing::info;
use uuid::Uuid;

// To view messages logged by the filters, RUST_LOG env var needs to be set
// RUST_LOG=debug cargo run --example host_filter
fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let local_dc = std::env::var("LOCAL_DC").unwrap_or_else(|_| "dc1".to_string());
    info!("Accepting only nodes from {}", local_dc);

    let config = AdmissionConfigBuilder::new()
        .host_filter(Arc::new(DcHostFilter::new(local_dc)))
        .build();
    let admission = PeerAdmission::new(&config);

    let discovered = vec![
        Peer::new(Uuid::new_v4(), "10.0.0.1:9042".parse::<SocketAddr>()?).with_datacenter("dc1"),
        Peer::new(Uuid::new_v4(), "10.0.0.2:9042".parse::<SocketAddr>()?).with_datacenter("dc2"),
        Peer::new(Uuid::new_v4(), "10.0.0.3:9042".parse::<SocketAddr>()?),
    ];

    let admitted = admission.admit(discovered);
    for peer in &admitted.accepted {
        println!("connecting to {}", peer);
    }
    for peer in &admitted.rejected {
        println!("skipping {}", peer);
    }

    Ok(())
}
