//! IPv4 CIDR block arithmetic.
//!
//! Provides [`AddressBlock`], an aligned IPv4 network, along with the mask
//! helpers the partitioner is built on.

use crate::error::PlanError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 prefix (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a prefix length to a netmask as u32.
///
/// # Examples
/// ```
/// use vpc_subnet_planner::models::prefix_mask;
/// assert_eq!(prefix_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn prefix_mask(len: u8) -> Result<u32, PlanError> {
    if len > MAX_LENGTH {
        return Err(PlanError::InvalidCidr(format!("prefix /{len} is too long")));
    }
    let right_len = MAX_LENGTH - len;
    let all_bits = u32::MAX as u64;
    Ok(((all_bits >> right_len) << right_len) as u32)
}

/// Number of addresses in a block of the given prefix length.
pub fn block_size(len: u8) -> Result<u64, PlanError> {
    if len > MAX_LENGTH {
        return Err(PlanError::InvalidCidr(format!("prefix /{len} is too long")));
    }
    Ok(1u64 << (MAX_LENGTH - len))
}

/// Get the network address for a given IP and prefix length.
pub fn network_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, PlanError> {
    let mask = prefix_mask(len)?;
    Ok(Ipv4Addr::from(u32::from(addr) & mask))
}

/// Calculate the broadcast (highest) address for a given IP and prefix length.
pub fn broadcast_addr(addr: Ipv4Addr, len: u8) -> Result<Ipv4Addr, PlanError> {
    let mask = prefix_mask(len)?;
    Ok(Ipv4Addr::from((u32::from(addr) & mask) | !mask))
}

/// An aligned IPv4 CIDR block.
///
/// The low `32 - prefix` bits of the base address are always zero.
#[derive(Eq, Ord, PartialEq, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct AddressBlock {
    base: Ipv4Addr,
    prefix: u8,
}

impl AddressBlock {
    /// `0.0.0.0/0`
    pub const DEFAULT_ROUTE: AddressBlock = AddressBlock {
        base: Ipv4Addr::UNSPECIFIED,
        prefix: 0,
    };

    /// Build a block from a base address and prefix, rejecting misaligned bases.
    pub fn new(base: Ipv4Addr, prefix: u8) -> Result<AddressBlock, PlanError> {
        let network = network_addr(base, prefix)?;
        if network != base {
            return Err(PlanError::InvalidCidr(format!(
                "{base}/{prefix} is not aligned (network address is {network})"
            )));
        }
        Ok(AddressBlock { base, prefix })
    }

    /// Parse a block from CIDR text (e.g., "10.0.0.0/16").
    pub fn parse(addr_cidr: &str) -> Result<AddressBlock, PlanError> {
        let addr_cidr = addr_cidr.trim();
        let (addr, prefix) = addr_cidr
            .split_once('/')
            .ok_or_else(|| PlanError::InvalidCidr(addr_cidr.to_string()))?;
        let addr = Ipv4Addr::from_str(addr)
            .map_err(|_| PlanError::InvalidCidr(format!("invalid address in {addr_cidr}")))?;
        let prefix = u8::from_str(prefix)
            .map_err(|_| PlanError::InvalidCidr(format!("invalid prefix in {addr_cidr}")))?;
        AddressBlock::new(addr, prefix)
    }

    pub fn base(&self) -> Ipv4Addr {
        self.base
    }

    pub fn prefix(&self) -> u8 {
        self.prefix
    }

    /// Number of addresses covered, including network and broadcast.
    pub fn size(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.prefix)
    }

    /// Lowest (network) address in the block.
    pub fn first(&self) -> Ipv4Addr {
        self.base
    }

    /// Highest (broadcast) address in the block.
    pub fn last(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.last_bits() as u32)
    }

    /// Dotted-quad netmask for this block.
    pub fn netmask(&self) -> Ipv4Addr {
        // prefix is bounded by construction
        Ipv4Addr::from(prefix_mask(self.prefix).unwrap_or(u32::MAX))
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        let bits = u32::from(addr) as u64;
        bits >= self.first_bits() && bits <= self.last_bits()
    }

    /// True when the two address ranges share at least one address.
    pub fn overlaps(&self, other: &AddressBlock) -> bool {
        self.first_bits() <= other.last_bits() && other.first_bits() <= self.last_bits()
    }

    fn first_bits(&self) -> u64 {
        u32::from(self.base) as u64
    }

    fn last_bits(&self) -> u64 {
        self.first_bits() + self.size() - 1
    }
}

impl FromStr for AddressBlock {
    type Err = PlanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AddressBlock::parse(s)
    }
}

impl std::fmt::Display for AddressBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix)
    }
}

impl Serialize for AddressBlock {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AddressBlock {
    fn deserialize<D>(deserializer: D) -> Result<AddressBlock, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        AddressBlock::parse(&s).map_err(de::Error::custom)
    }
}
