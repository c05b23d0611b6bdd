//! Resource naming for one network build.

use crate::models::{BaseTags, SubnetRole};

/// Base name, tags, and tagging mode shared by every resource of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    pub base_name: String,
    pub tags: BaseTags,
    /// Attach cluster discovery tags to subnets.
    pub cluster_tags: bool,
}

impl BuildContext {
    pub fn vpc(&self) -> String {
        format!("{}/vpc", self.base_name)
    }

    pub fn subnet(&self, role: SubnetRole, zone_suffix: &str) -> String {
        format!("{}/subnet-{role}-{zone_suffix}", self.base_name)
    }

    pub fn elastic_ip(&self) -> String {
        format!("{}/nat/eip", self.base_name)
    }

    pub fn nat_gateway(&self) -> String {
        format!("{}/nat", self.base_name)
    }

    pub fn internet_gateway(&self) -> String {
        format!("{}/igw", self.base_name)
    }

    pub fn private_route_table(&self, zone_suffix: &str) -> String {
        format!("{}/rt-private-{zone_suffix}", self.base_name)
    }

    pub fn public_route_table(&self) -> String {
        format!("{}/rt-public", self.base_name)
    }

    pub fn association(&self, role: SubnetRole, zone_suffix: &str) -> String {
        format!("{}/rtacc-{role}-{zone_suffix}", self.base_name)
    }

    /// Cluster name for discovery tags, when enabled.
    pub fn cluster(&self) -> Option<&str> {
        self.cluster_tags.then_some(self.base_name.as_str())
    }
}

/// Short zone suffix: the last `-` separated segment ("us-west-2a" -> "2a").
pub fn zone_suffix(zone: &str) -> &str {
    zone.rsplit('-').next().unwrap_or(zone)
}
