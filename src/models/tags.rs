//! Resource tag sets.
//!
//! Tags are built whole for each resource from a shared, read-only
//! [`BaseTags`]. Nothing mutates a tag map after it is returned.

use super::SubnetRole;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Key/value tags attached to a single resource, sorted by key.
pub type Tags = BTreeMap<String, String>;

pub const CLUSTER_TAG_PREFIX: &str = "kubernetes.io/cluster/";
pub const INTERNAL_ELB_TAG: &str = "kubernetes.io/role/internal-elb";
pub const EXTERNAL_ELB_TAG: &str = "kubernetes.io/role/elb";

/// Tags shared by every resource of one network build.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BaseTags {
    pub project: String,
    pub owner: String,
    pub environment: String,
    pub project_id: String,
    pub cluster_name: String,
}

impl BaseTags {
    /// Tags for a resource that carries only the base set and its name.
    pub fn for_resource(&self, name: &str) -> Tags {
        self.entries(name).collect()
    }

    /// Tags for a subnet.
    ///
    /// `cluster` is the cluster base name when discovery tags are enabled.
    pub fn for_subnet(&self, name: &str, role: SubnetRole, cluster: Option<&str>) -> Tags {
        let discovery = cluster.into_iter().flat_map(|cluster| {
            let elb_key = match role {
                SubnetRole::Private => INTERNAL_ELB_TAG,
                SubnetRole::Public => EXTERNAL_ELB_TAG,
            };
            [
                (format!("{CLUSTER_TAG_PREFIX}{cluster}"), "shared".to_string()),
                (elb_key.to_string(), "1".to_string()),
            ]
        });
        self.entries(name).chain(discovery).collect()
    }

    fn entries(&self, name: &str) -> impl Iterator<Item = (String, String)> {
        [
            ("Project", self.project.clone()),
            ("Owner", self.owner.clone()),
            ("Environment", self.environment.clone()),
            ("ProjectId", self.project_id.clone()),
            ("ClusterName", self.cluster_name.clone()),
            ("Name", name.to_string()),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
    }
}
