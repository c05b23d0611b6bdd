//! Terminal output of a network topology.

use crate::models::{NetworkTopology, SubnetRole};
use colored::Colorize;

/// One subnet line of the printed table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetPrintRow {
    pub zone: String,
    pub role: SubnetRole,
    pub cidr: String,
    pub hosts: u64,
    pub name: String,
    pub route_table: String,
}

/// Format a value as a quoted, right-aligned field.
///
/// # Arguments
/// * `value` - The value to format
/// * `width` - The minimum width of the field
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    if quoted.len() >= width {
        quoted
    } else {
        format!("{quoted:>width$}")
    }
}

/// Table rows in zone order, private subnet before public.
pub fn subnet_rows(topology: &NetworkTopology) -> Vec<SubnetPrintRow> {
    topology
        .zones
        .iter()
        .flat_map(|z| [&z.private, &z.public])
        .map(|s| SubnetPrintRow {
            zone: s.zone.clone(),
            role: s.role,
            cidr: s.cidr.to_string(),
            hosts: s.cidr.size(),
            name: s.name.clone(),
            route_table: topology
                .route_table_for(&s.name)
                .map(|rt| rt.name.clone())
                .unwrap_or_else(|| "None".to_string()),
        })
        .collect()
}

/// Print the subnet table and gateways to stdout.
pub fn print_topology(topology: &NetworkTopology) {
    log::info!(
        "#Start print_topology() {} with {} zones",
        topology.parent,
        topology.zones.len()
    );

    println!(
        "VPC: '{}' - {}",
        topology.vpc.name,
        topology.vpc.cidr.to_string().on_blue()
    );
    println!(
        r#""zone",             "role",  "subnet_cidr",     "addrs",  "subnet_name",                         "route_table""#
    );
    for row in subnet_rows(topology) {
        let role = match row.role {
            SubnetRole::Private => format_field(row.role, 9).yellow(),
            SubnetRole::Public => format_field(row.role, 9).green(),
        };
        println!(
            "{zone},{role},{cidr},{hosts},{name},{route_table}",
            zone = format_field(&row.zone, 18),
            cidr = format_field(&row.cidr, 18),
            hosts = format_field(row.hosts, 8),
            name = format_field(&row.name, 40),
            route_table = format_field(&row.route_table, 30),
        );
    }
    println!(
        "NAT: '{}' in {} ({}), IGW: '{}'",
        topology.nat_gateway.name,
        topology.nat_gateway.subnet,
        topology.nat_gateway.subnet_cidr.to_string().on_green(),
        topology.internet_gateway.name
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{build_network, NetworkConfig};

    #[test]
    fn test_format_field_short() {
        assert_eq!(format_field("test", 10), "    \"test\"");
    }

    #[test]
    fn test_format_field_long() {
        assert_eq!(format_field("long_value", 5), "\"long_value\"");
    }

    #[test]
    fn test_format_field_number() {
        assert_eq!(format_field(42, 6), "  \"42\"");
    }

    #[test]
    fn test_subnet_rows() {
        let config = NetworkConfig {
            project_name: "opal".to_string(),
            stack_name: "dev".to_string(),
            owner: "corpeng".to_string(),
            project_id: "42".to_string(),
            vpc_cidr: "10.0.0.0/16".to_string(),
            subnet_prefix: 24,
            availability_zones: vec!["us-west-2a".to_string(), "us-west-2b".to_string()],
            cluster_tags: false,
            reserved_cidrs: vec![],
        };
        let topology = build_network(&config).unwrap();
        let rows = subnet_rows(&topology);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].role, SubnetRole::Private);
        assert_eq!(rows[0].cidr, "10.0.0.0/24");
        assert_eq!(rows[0].route_table, "dev-opal/rt-private-2a");
        assert_eq!(rows[3].cidr, "10.0.3.0/24");
        assert_eq!(rows[3].route_table, "dev-opal/rt-public");
        assert_eq!(rows[3].hosts, 256);
    }
}
