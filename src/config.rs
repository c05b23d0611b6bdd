//! Network build configuration.
//!
//! Everything the build needs is carried in [`NetworkConfig`]. It is read
//! once, from the environment or from a JSON file, and passed explicitly.

use crate::models::BaseTags;
use crate::processing::BuildContext;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;

/// Default subnet prefix length.
pub const DEFAULT_SUBNET_PREFIX: u8 = 24;

fn default_stack_name() -> String {
    "dev".to_string()
}

fn default_project_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn default_subnet_prefix() -> u8 {
    DEFAULT_SUBNET_PREFIX
}

/// Inputs of one network build.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkConfig {
    pub project_name: String,
    #[serde(default = "default_stack_name")]
    pub stack_name: String,
    pub owner: String,
    #[serde(default = "default_project_id")]
    pub project_id: String,
    /// Parent network block in CIDR notation.
    pub vpc_cidr: String,
    #[serde(default = "default_subnet_prefix")]
    pub subnet_prefix: u8,
    /// Ordered availability zone identifiers.
    pub availability_zones: Vec<String>,
    /// Attach cluster discovery tags to subnets.
    #[serde(default)]
    pub cluster_tags: bool,
    /// Existing blocks that planned subnets must not overlap.
    #[serde(default)]
    pub reserved_cidrs: Vec<String>,
}

impl NetworkConfig {
    /// Read configuration from process environment variables.
    pub fn from_env() -> Result<NetworkConfig, Box<dyn Error>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<NetworkConfig, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String, Box<dyn Error>> {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| format!("Missing required environment variable {key}").into())
        };
        let list = |key: &str| -> Vec<String> {
            lookup(key)
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default()
        };

        let subnet_prefix = match lookup("SUBNET_NETMASK") {
            Some(v) => v
                .trim()
                .trim_start_matches('/')
                .parse::<u8>()
                .map_err(|e| format!("Invalid SUBNET_NETMASK '{v}': {e}"))?,
            None => DEFAULT_SUBNET_PREFIX,
        };
        let cluster_tags = match lookup("CLUSTER_TAGS") {
            Some(v) => v
                .trim()
                .parse::<bool>()
                .map_err(|e| format!("Invalid CLUSTER_TAGS '{v}': {e}"))?,
            None => false,
        };

        let config = NetworkConfig {
            project_name: required("PROJECT_NAME")?,
            stack_name: lookup("STACK_NAME").unwrap_or_else(default_stack_name),
            owner: required("OWNER")?,
            project_id: lookup("PROJECT_ID").unwrap_or_else(default_project_id),
            vpc_cidr: required("VPC_CIDR")?,
            subnet_prefix,
            availability_zones: list("AVAILABILITY_ZONES"),
            cluster_tags,
            reserved_cidrs: list("RESERVED_CIDRS"),
        };
        log::debug!("config from environment: {:?}", config);
        Ok(config)
    }

    /// Read configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<NetworkConfig, Box<dyn Error>> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Error reading config file {}: {e}", path.display()))?;
        let config: NetworkConfig = serde_json::from_str(&json)
            .map_err(|e| format!("Error parsing config file {}: {e}", path.display()))?;
        log::info!("Using config file: {}", path.display());
        Ok(config)
    }

    /// `"{stack}-{project}"`, the prefix of every resource name.
    pub fn base_name(&self) -> String {
        format!("{}-{}", self.stack_name, self.project_name)
    }

    pub fn base_tags(&self) -> BaseTags {
        BaseTags {
            project: self.project_name.clone(),
            owner: self.owner.clone(),
            environment: self.stack_name.clone(),
            project_id: self.project_id.clone(),
            cluster_name: format!("{}-cluster", self.base_name()),
        }
    }

    pub fn build_context(&self) -> BuildContext {
        BuildContext {
            base_name: self.base_name(),
            tags: self.base_tags(),
            cluster_tags: self.cluster_tags,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_defaults() {
        let config = NetworkConfig::from_lookup(lookup(&[
            ("PROJECT_NAME", "opal"),
            ("OWNER", "corpeng"),
            ("VPC_CIDR", "10.0.0.0/16"),
            ("AVAILABILITY_ZONES", "us-west-2a, us-west-2b,"),
        ]))
        .unwrap();
        assert_eq!(config.stack_name, "dev");
        assert_eq!(config.subnet_prefix, 24);
        assert!(!config.cluster_tags);
        assert!(config.reserved_cidrs.is_empty());
        assert_eq!(config.availability_zones, vec!["us-west-2a", "us-west-2b"]);
        assert_eq!(config.project_id.len(), 36, "random uuid project id");
        assert_eq!(config.base_name(), "dev-opal");
    }

    #[test]
    fn test_from_lookup_all_set() {
        let config = NetworkConfig::from_lookup(lookup(&[
            ("PROJECT_NAME", "opal"),
            ("STACK_NAME", "prod"),
            ("OWNER", "corpeng"),
            ("PROJECT_ID", "p-1"),
            ("VPC_CIDR", "10.1.0.0/16"),
            ("SUBNET_NETMASK", "/20"),
            ("AVAILABILITY_ZONES", "us-west-2a"),
            ("CLUSTER_TAGS", "true"),
            ("RESERVED_CIDRS", "10.1.0.0/24,10.1.16.0/20"),
        ]))
        .unwrap();
        assert_eq!(config.subnet_prefix, 20);
        assert!(config.cluster_tags);
        assert_eq!(config.reserved_cidrs.len(), 2);

        let tags = config.base_tags();
        assert_eq!(tags.environment, "prod");
        assert_eq!(tags.project_id, "p-1");
        assert_eq!(tags.cluster_name, "prod-opal-cluster");
        assert_eq!(config.build_context().cluster(), Some("prod-opal"));
    }

    #[test]
    fn test_from_lookup_missing_required() {
        let err = NetworkConfig::from_lookup(lookup(&[("PROJECT_NAME", "opal")])).unwrap_err();
        assert_eq!(err.to_string(), "Missing required environment variable OWNER");
    }

    #[test]
    fn test_from_lookup_bad_netmask() {
        let err = NetworkConfig::from_lookup(lookup(&[
            ("PROJECT_NAME", "opal"),
            ("OWNER", "corpeng"),
            ("VPC_CIDR", "10.0.0.0/16"),
            ("SUBNET_NETMASK", "big"),
        ]))
        .unwrap_err();
        assert!(err.to_string().starts_with("Invalid SUBNET_NETMASK 'big'"));
    }

    #[test]
    fn test_from_json_defaults() {
        let json = r#"{
            "project_name": "opal",
            "owner": "corpeng",
            "vpc_cidr": "10.0.0.0/16",
            "availability_zones": ["us-west-2a"]
        }"#;
        let config: NetworkConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.stack_name, "dev");
        assert_eq!(config.subnet_prefix, DEFAULT_SUBNET_PREFIX);
        assert!(!config.cluster_tags);
    }
}
