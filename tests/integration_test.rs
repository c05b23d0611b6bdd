//! Integration tests for vpc-subnet-planner
//!
//! These tests run the complete build from configuration to topology.

use vpc_subnet_planner::models::{
    AddressBlock, ResourceKind, RouteTarget, EXTERNAL_ELB_TAG, INTERNAL_ELB_TAG,
};
use vpc_subnet_planner::output::PlanDocument;
use vpc_subnet_planner::processing::{assign_zones, partition};
use vpc_subnet_planner::{build_network, NetworkConfig, PlanError};

fn config(cidr: &str, prefix: u8, zones: &[&str], cluster_tags: bool) -> NetworkConfig {
    NetworkConfig {
        project_name: "opal".to_string(),
        stack_name: "dev".to_string(),
        owner: "corpeng".to_string(),
        project_id: "0000-1111".to_string(),
        vpc_cidr: cidr.to_string(),
        subnet_prefix: prefix,
        availability_zones: zones.iter().map(|z| z.to_string()).collect(),
        cluster_tags,
        reserved_cidrs: vec![],
    }
}

fn block(s: &str) -> AddressBlock {
    AddressBlock::parse(s).unwrap()
}

#[test]
fn test_end_to_end_two_zones() {
    let cfg = config("10.0.0.0/16", 24, &["us-west-2a", "us-west-2b"], false);
    let plan = partition(block("10.0.0.0/16"), 24).unwrap();
    assert_eq!(plan.len(), 256, "Expected 256 candidate /24 blocks");

    let topo = build_network(&cfg).expect("Failed to build network");

    assert_eq!(topo.zones.len(), 2);
    assert_eq!(topo.zones[0].private.cidr, block("10.0.0.0/24"));
    assert_eq!(topo.zones[0].public.cidr, block("10.0.1.0/24"));
    assert_eq!(topo.zones[1].private.cidr, block("10.0.2.0/24"));
    assert_eq!(topo.zones[1].public.cidr, block("10.0.3.0/24"));

    // NAT in the first public subnet
    assert_eq!(topo.nat_gateway.subnet_cidr, block("10.0.1.0/24"));
    assert_eq!(topo.nat_gateway.subnet, topo.zones[0].public.name);

    // one private route table per zone, each defaulting to the NAT
    assert_eq!(topo.private_route_tables.len(), 2);
    for (zone, rt) in topo.zones.iter().zip(&topo.private_route_tables) {
        assert_eq!(
            rt.default_route().unwrap().target,
            RouteTarget::NatGateway(topo.nat_gateway.name.clone())
        );
        assert_eq!(topo.route_table_for(&zone.private.name), Some(rt));
    }

    // one public route table to the IGW, shared by both public subnets
    assert_eq!(
        topo.public_route_table.default_route().unwrap().target,
        RouteTarget::InternetGateway(topo.internet_gateway.name.clone())
    );
    let public_cidrs: Vec<AddressBlock> = topo
        .public_subnets()
        .filter(|s| topo.route_table_for(&s.name) == Some(&topo.public_route_table))
        .map(|s| s.cidr)
        .collect();
    assert_eq!(public_cidrs, vec![block("10.0.1.0/24"), block("10.0.3.0/24")]);
}

#[test]
fn test_zone_assignment_indexing() {
    let cfg = config("10.0.0.0/16", 24, &["a", "b", "c"], false);
    let plan = partition(block("10.0.0.0/21"), 24).unwrap();
    let p: Vec<AddressBlock> = plan.iter().take(6).map(|e| e.block).collect();

    let zones = assign_zones(&plan, &cfg.availability_zones, &cfg.build_context()).unwrap();
    let got: Vec<(&str, AddressBlock, AddressBlock)> = zones
        .iter()
        .map(|z| (z.zone.as_str(), z.private.cidr, z.public.cidr))
        .collect();
    assert_eq!(
        got,
        vec![("a", p[0], p[1]), ("b", p[2], p[3]), ("c", p[4], p[5])]
    );
}

#[test]
fn test_insufficient_space() {
    let cfg = config("10.0.0.0/23", 24, &["a", "b"], false);
    assert_eq!(
        build_network(&cfg).unwrap_err(),
        PlanError::InsufficientAddressSpace {
            zones: 2,
            needed: 4,
            available: 2
        }
    );
}

#[test]
fn test_invalid_prefix() {
    let cfg = config("10.0.0.0/24", 16, &["a"], false);
    assert!(matches!(
        build_network(&cfg),
        Err(PlanError::InvalidPrefix { target: 16, .. })
    ));
}

#[test]
fn test_determinism() {
    let cfg = config("172.16.0.0/12", 20, &["eu-west-1a", "eu-west-1b", "eu-west-1c"], true);
    let a = build_network(&cfg).unwrap();
    let b = build_network(&cfg).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.resources(), b.resources());
}

#[test]
fn test_tag_attachment() {
    let zones = ["us-west-2a", "us-west-2b", "us-west-2c"];

    let tagged = build_network(&config("10.0.0.0/16", 24, &zones, true)).unwrap();
    for s in tagged.private_subnets() {
        assert_eq!(s.tags.get(INTERNAL_ELB_TAG).map(String::as_str), Some("1"));
        assert!(!s.tags.contains_key(EXTERNAL_ELB_TAG));
        assert_eq!(s.tags["kubernetes.io/cluster/dev-opal"], "shared");
    }
    for s in tagged.public_subnets() {
        assert_eq!(s.tags.get(EXTERNAL_ELB_TAG).map(String::as_str), Some("1"));
        assert!(!s.tags.contains_key(INTERNAL_ELB_TAG));
    }

    let plain = build_network(&config("10.0.0.0/16", 24, &zones, false)).unwrap();
    for s in plain.private_subnets().chain(plain.public_subnets()) {
        assert!(!s.tags.contains_key(INTERNAL_ELB_TAG));
        assert!(!s.tags.contains_key(EXTERNAL_ELB_TAG));
        assert_eq!(s.tags["Name"], s.name);
        assert_eq!(s.tags["ProjectId"], "0000-1111");
    }
}

#[test]
fn test_all_resources_named_and_ordered() {
    let topo = build_network(&config("10.0.0.0/16", 24, &["us-west-2a", "us-west-2b"], true))
        .unwrap();
    let resources = topo.resources();
    assert_eq!(resources[0].kind, ResourceKind::Vpc);
    assert_eq!(resources[0].name, "dev-opal/vpc");

    let assocs: Vec<_> = resources
        .iter()
        .filter(|r| r.kind == ResourceKind::RouteTableAssociation)
        .collect();
    assert_eq!(assocs.len(), 4);
    for a in assocs {
        assert_eq!(a.depends_on.len(), 2);
        let pos = |name: &str| resources.iter().position(|r| r.name == name).unwrap();
        let me = pos(a.name.as_str());
        assert!(a.depends_on.iter().all(|d| pos(d.as_str()) < me));
    }
}

#[test]
fn test_plan_document_round_trip() {
    let topo = build_network(&config("10.0.0.0/16", 24, &["us-west-2a"], false)).unwrap();
    let doc = PlanDocument::new(&topo);
    let json = serde_json::to_string(&doc).unwrap();
    let back: PlanDocument = serde_json::from_str(&json).unwrap();
    assert_eq!(back.topology, topo);
}
