//! This module holds entities that represent the cluster as seen by the driver:
//! - [Peer] - a discovered node, with its identity and topology labels,
//! - [HostSpec] and [ResolvedContactPoint] - hosts given by the user, before and after resolution,
//! - [PeerAdmission] - the point where discovered nodes are checked against the host filter.

pub mod admission;
pub mod node;

pub use admission::{AdmittedPeers, PeerAdmission};
pub use node::{HostSpec, Peer, ResolvedContactPoint, Token, DEFAULT_PORT};
