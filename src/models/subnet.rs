//! Zone subnet data model.

use super::{AddressBlock, Tags};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether a subnet routes through the NAT gateway or the internet gateway.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SubnetRole {
    Private,
    Public,
}

impl fmt::Display for SubnetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubnetRole::Private => write!(f, "private"),
            SubnetRole::Public => write!(f, "public"),
        }
    }
}

/// A subnet ready to hand to the provisioning engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SubnetRecord {
    /// Zone-qualified resource name.
    pub name: String,
    /// Full availability zone identifier (e.g., "us-west-2a").
    pub zone: String,
    pub role: SubnetRole,
    pub cidr: AddressBlock,
    /// Position of `cidr` in the subnet plan it was taken from.
    pub plan_index: u64,
    pub tags: Tags,
}

/// One availability zone bound to its private and public subnets.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ZoneAssignment {
    pub zone: String,
    /// Short zone suffix used in resource names (e.g., "2a").
    pub zone_suffix: String,
    pub private: SubnetRecord,
    pub public: SubnetRecord,
}

impl fmt::Display for ZoneAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} private={} public={}",
            self.zone, self.private.cidr, self.public.cidr
        )
    }
}
