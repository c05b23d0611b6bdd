//! VPC subnet planning.
//!
//! Computes non-overlapping private/public subnet assignments per
//! availability zone from a parent block, and the routing topology that
//! connects them. The result is a plan for an external provisioning engine.
//!
//! # Module Organization
//!
//! - [`models`] - Core data types (AddressBlock, SubnetRecord, NetworkTopology)
//! - [`processing`] - Partitioning, zone assignment, and topology assembly
//! - [`output`] - Terminal and JSON plan output
//! - [`config`] - Build configuration
//! - [`error`] - Allocation errors

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod processing;

pub use config::NetworkConfig;
pub use error::PlanError;

use models::{AddressBlock, NetworkTopology};
use processing::{assign_zones, build_topology, partition_with_existing, validate_zones};

/// Build the full network plan for `config`.
///
/// Any error aborts the build before a plan exists, so nothing partial ever
/// reaches the provisioning engine.
pub fn build_network(config: &NetworkConfig) -> Result<NetworkTopology, PlanError> {
    log::info!(
        "#Start build_network() {} /{} over {} zone(s)",
        config.vpc_cidr,
        config.subnet_prefix,
        config.availability_zones.len()
    );

    let parent = AddressBlock::parse(&config.vpc_cidr)?;
    let reserved = config
        .reserved_cidrs
        .iter()
        .map(|c| AddressBlock::parse(c))
        .collect::<Result<Vec<_>, _>>()?;
    validate_zones(&config.availability_zones)?;

    let ctx = config.build_context();
    let plan = partition_with_existing(parent, config.subnet_prefix, &reserved)?;
    let zones = assign_zones(&plan, &config.availability_zones, &ctx)?;
    plan.ensure_no_overlap(2 * zones.len() as u64)?;

    build_topology(&ctx, parent, zones)
}
