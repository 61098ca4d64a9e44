//! This module holds policies, which are entities that allow configuring
//! the driver's behaviour in various aspects. The common feature of all policies
//! is that users can implement a policy on their own (because they simply need
//! to implement a certain trait), allowing flexible customizability of the driver.
//!
//! This includes:
//! - HostFilter, which decides whether a discovered node should be connected to,
//! - AddressResolver, which resolves user-supplied hosts for the filters that need it.

pub mod address_resolver;
pub mod host_filter;
