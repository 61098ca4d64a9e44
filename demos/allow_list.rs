use std::env;
use std::net::SocketAddr;

use anyhow::Result;
use scylla_host_filter::cluster::{Peer, PeerAdmission};
use scylla_host_filter::AdmissionConfigBuilder;
use tracing::info;
use uuid::Uuid;

// Builds an allow list from the command line arguments and checks
// a few local addresses against it.
// RUST_LOG=debug cargo run --example allow_list -- 127.0.0.1 localhost
#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut hosts: Vec<String> = env::args().skip(1).collect();
    if hosts.is_empty() {
        hosts.push("127.0.0.1".to_string());
    }
    info!("Resolving allow list {:?}", hosts);

    // Fails before anything is connected if any host can't be resolved.
    let config = AdmissionConfigBuilder::new()
        .allow_list(hosts)
        .await?
        .build();
    let admission = PeerAdmission::new(&config);

    for addr in ["127.0.0.1:9042", "127.0.0.2:9042", "[::1]:9042"] {
        let peer = Peer::new(Uuid::new_v4(), addr.parse::<SocketAddr>()?);
        println!("{}: accepted = {}", addr, admission.accepts(&peer));
    }

    Ok(())
}
