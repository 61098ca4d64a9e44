use std::fmt::Display;
use std::net::{IpAddr, SocketAddr};

use uuid::Uuid;

/// The CQL native transport port, used when a [`HostSpec`] has no port.
pub const DEFAULT_PORT: u16 = 9042;

#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]

/// Token is a result of computing a hash of a primary key
///
/// It is basically an i64 with one caveat: i64::MIN is not
/// a valid token. It is used to represent infinity.
/// For this reason tokens are normalized - i64::MIN
/// is replaced with i64::MAX.
pub struct Token {
    value: i64,
}

impl Token {
    /// Creates a new token with given value, normalizing the value if necessary
    #[inline]
    pub fn new(value: i64) -> Self {
        Self {
            value: if value == i64::MIN { i64::MAX } else { value },
        }
    }

    /// Returns the normalized value of the token.
    #[inline]
    pub fn value(&self) -> i64 {
        self.value
    }
}

/// A node of the cluster, as seen by the driver upon discovery.
///
/// Peers are produced by cluster discovery (topology events or the initial
/// contact points) and handed to the host filter, which only reads them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive] // <- so that we can add more fields in a backwards-compatible way
pub struct Peer {
    /// Unique identifier of the node.
    pub host_id: Uuid,
    /// The address the node broadcasts as its own identity.
    pub peer: IpAddr,
    /// The address the node was discovered at, used to connect to it.
    pub address: SocketAddr,
    /// Tokens owned by the node.
    pub tokens: Vec<Token>,
    /// Datacenter of the node, if known.
    pub datacenter: Option<String>,
    /// Rack of the node, if known.
    pub rack: Option<String>,
}

impl Peer {
    /// Creates a peer discovered at `address`, whose broadcast identity is the address' IP.
    ///
    /// Datacenter, rack and tokens are unknown and may be filled in with the
    /// `with_*` methods.
    pub fn new(host_id: Uuid, address: SocketAddr) -> Self {
        Self {
            host_id,
            peer: address.ip(),
            address,
            tokens: Vec::new(),
            datacenter: None,
            rack: None,
        }
    }

    /// Sets the broadcast identity, if it differs from the connect address.
    pub fn with_peer(mut self, peer: IpAddr) -> Self {
        self.peer = peer;
        self
    }

    /// Sets the datacenter of the node.
    pub fn with_datacenter(mut self, datacenter: impl Into<String>) -> Self {
        self.datacenter = Some(datacenter.into());
        self
    }

    /// Sets the rack of the node.
    pub fn with_rack(mut self, rack: impl Into<String>) -> Self {
        self.rack = Some(rack.into());
        self
    }

    /// Sets the tokens owned by the node.
    pub fn with_tokens(mut self, tokens: Vec<Token>) -> Self {
        self.tokens = tokens;
        self
    }

    /// The identity under which the node is compared against allow lists.
    ///
    /// IPv4-mapped IPv6 addresses are folded into plain IPv4, so that
    /// `::ffff:10.0.0.1` and `10.0.0.1` denote the same node.
    /// The port is not part of the identity.
    pub fn canonical_peer(&self) -> IpAddr {
        self.peer.to_canonical()
    }

    /// Datacenter of the node, with an unknown datacenter reported as `""`.
    pub fn datacenter_or_empty(&self) -> &str {
        self.datacenter.as_deref().unwrap_or_default()
    }
}

impl Display for Peer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.address, self.host_id)
    }
}

/// A host supplied by the user, not resolved yet.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Hash)]
pub struct HostSpec {
    /// IP address, hostname, or `host:port` string.
    pub address: String,
    /// Port to use. If [None], the resolver's default port is used.
    pub port: Option<u16>,
}

impl HostSpec {
    /// Creates a spec with no explicit port.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            port: None,
        }
    }

    /// Creates a spec with an explicit port.
    pub fn with_port(address: impl Into<String>, port: u16) -> Self {
        Self {
            address: address.into(),
            port: Some(port),
        }
    }
}

impl Display for HostSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{}", self.address, port),
            None => write!(f, "{}", self.address),
        }
    }
}

/// Describes a host known on startup, with already resolved address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResolvedContactPoint {
    /// The resolved address.
    pub address: SocketAddr,
}

impl ResolvedContactPoint {
    /// The identity of the resolved host, canonicalized the same way as
    /// [`Peer::canonical_peer`].
    pub fn canonical_peer(&self) -> IpAddr {
        self.address.ip().to_canonical()
    }
}
