//! Error types for subnet planning.
//!
//! Every variant is a deterministic input-validation failure. None of them is
//! retried, and all of them abort the network build before a plan is emitted.

use crate::models::AddressBlock;
use thiserror::Error;

/// Errors produced while parsing, partitioning, or assigning address space.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    /// Target prefix is shorter than the parent's or longer than 32 bits.
    #[error("invalid prefix /{target} for parent {parent}")]
    InvalidPrefix { parent: AddressBlock, target: u8 },

    /// The plan has fewer entries than the zones need.
    #[error("insufficient address space: {zones} zone(s) need {needed} subnets, plan has {available}")]
    InsufficientAddressSpace {
        zones: usize,
        needed: u64,
        available: u64,
    },

    /// A computed block collides with a caller-supplied reservation.
    #[error("subnet {block} (plan index {index}) overlaps reserved block {existing}")]
    OverlapDetected {
        index: u64,
        block: AddressBlock,
        existing: AddressBlock,
    },

    /// CIDR text could not be parsed or is not aligned to its prefix.
    #[error("invalid CIDR: {0}")]
    InvalidCidr(String),

    /// Availability zone list is empty, or an identifier is malformed or repeated.
    #[error("invalid availability zone: {0}")]
    InvalidZone(String),
}
