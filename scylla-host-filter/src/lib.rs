//! Host admission policies for the [Scylla](https://scylladb.com) Rust driver.
//!
//! When the driver discovers nodes of the cluster, either from the initial
//! contact points or from server-pushed topology events, each node is checked
//! against a [`HostFilter`](policies::host_filter::HostFilter) before any
//! connection is opened to it.
//!
//! # Filters
//! * [AcceptAllHostFilter](policies::host_filter::AcceptAllHostFilter) - accepts every node
//! * [DenyAllHostFilter](policies::host_filter::DenyAllHostFilter) - rejects every node
//! * [DcHostFilter](policies::host_filter::DcHostFilter) - accepts nodes from one datacenter
//! * [AllowListHostFilter](policies::host_filter::AllowListHostFilter) - accepts nodes
//!   from a list of addresses, resolved once when the filter is built
//! * [FnHostFilter](policies::host_filter::FnHostFilter) - wraps a closure
//!
//! # Example
//! ```rust,no_run
//! use std::error::Error;
//! use scylla_host_filter::client::config::AdmissionConfigBuilder;
//! use scylla_host_filter::cluster::PeerAdmission;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn Error>> {
//!     let config = AdmissionConfigBuilder::new()
//!         .allow_list(["10.0.0.1", "db2.example.com:9042"])
//!         .await?
//!         .build();
//!
//!     let admission = PeerAdmission::new(&config);
//!     # let discovered: Vec<scylla_host_filter::cluster::Peer> = Vec::new();
//!     let admitted = admission.admit(discovered);
//!     println!("{} nodes to connect to", admitted.accepted.len());
//!     Ok(())
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod client;
pub mod cluster;
pub mod errors;
pub mod policies;

pub(crate) mod utils;

pub use client::config::{AdmissionConfig, AdmissionConfigBuilder};
pub use cluster::{Peer, PeerAdmission};
pub use policies::host_filter::HostFilter;
