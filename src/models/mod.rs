//! Domain models for VPC subnet planning.
//!
//! This module contains the core data structures used throughout the crate:
//! - [`AddressBlock`] - aligned IPv4 CIDR block
//! - [`SubnetRecord`] and [`ZoneAssignment`] - per-zone subnets
//! - [`BaseTags`] - tag set construction
//! - [`NetworkTopology`] - routing graph handed to the provisioning engine

mod ipv4;
mod subnet;
mod tags;
mod topology;

// Re-export public types
pub use ipv4::{block_size, broadcast_addr, network_addr, prefix_mask, AddressBlock, MAX_LENGTH};
pub use subnet::{SubnetRecord, SubnetRole, ZoneAssignment};
pub use tags::{BaseTags, Tags, CLUSTER_TAG_PREFIX, EXTERNAL_ELB_TAG, INTERNAL_ELB_TAG};
pub use topology::{
    NatGateway, NetworkTopology, ResourceDeclaration, ResourceKind, Route, RouteTable,
    RouteTableAssociation, RouteTarget, TaggedResource, Vpc,
};
