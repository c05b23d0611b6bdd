//! JSON plan document.
//!
//! The document is the handoff to the provisioning engine: the topology plus
//! its flattened, dependency-ordered resource list.

use crate::models::{NetworkTopology, ResourceDeclaration};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PlanDocument {
    pub generated: String,
    pub topology: NetworkTopology,
    pub resources: Vec<ResourceDeclaration>,
}

impl PlanDocument {
    pub fn new(topology: &NetworkTopology) -> PlanDocument {
        PlanDocument {
            generated: chrono::Utc::now().to_rfc3339(),
            resources: topology.resources(),
            topology: topology.clone(),
        }
    }
}

/// `network_plan_{stack}_{YYYY-MM-DD}.json` for today (UTC).
pub fn plan_file_name(stack_name: &str) -> String {
    let now = chrono::Utc::now();
    format!("network_plan_{stack_name}_{}.json", now.format("%Y-%m-%d"))
}

/// Write the plan document into `dir` (current directory if None).
///
/// # Returns
/// * `Ok(PathBuf)` - The path written
pub fn write_plan(
    topology: &NetworkTopology,
    stack_name: &str,
    dir: Option<&Path>,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = dir
        .unwrap_or_else(|| Path::new("."))
        .join(plan_file_name(stack_name));
    let json = serde_json::to_string_pretty(&PlanDocument::new(topology))
        .map_err(|e| format!("Error serializing plan JSON: {e}"))?;
    std::fs::write(&path, json)
        .map_err(|e| format!("Error writing plan file {}: {e}", path.display()))?;
    log::warn!("Wrote network plan to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_network, NetworkConfig};

    fn topology() -> NetworkTopology {
        build_network(&NetworkConfig {
            project_name: "opal".to_string(),
            stack_name: "dev".to_string(),
            owner: "corpeng".to_string(),
            project_id: "42".to_string(),
            vpc_cidr: "10.0.0.0/16".to_string(),
            subnet_prefix: 24,
            availability_zones: vec!["us-west-2a".to_string()],
            cluster_tags: true,
            reserved_cidrs: vec![],
        })
        .unwrap()
    }

    #[test]
    fn test_plan_file_name() {
        let name = plan_file_name("dev");
        assert!(name.starts_with("network_plan_dev_"));
        assert!(name.ends_with(".json"));
        assert_eq!(name.len(), "network_plan_dev_2026-01-01.json".len());
    }

    #[test]
    fn test_write_plan() {
        let dir = tempfile::tempdir().unwrap();
        let topology = topology();
        let path = write_plan(&topology, "dev", Some(dir.path())).unwrap();
        assert!(path.starts_with(dir.path()));

        let json = std::fs::read_to_string(&path).unwrap();
        let doc: PlanDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc.topology, topology);
        assert_eq!(doc.resources, topology.resources());
        assert!(json.contains("\"10.0.1.0/24\""));
        assert!(json.contains("\"kubernetes.io/role/elb\""));
    }

    #[test]
    fn test_write_plan_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let err = write_plan(&topology(), "dev", Some(&missing)).unwrap_err();
        assert!(err.to_string().starts_with("Error writing plan file"));
    }
}
