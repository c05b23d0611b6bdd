//! Network topology data model.
//!
//! A [`NetworkTopology`] is the complete, immutable result of one network
//! build. Resources refer to each other by name only.

use super::{AddressBlock, SubnetRecord, Tags, ZoneAssignment};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The parent network.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Vpc {
    pub name: String,
    pub cidr: AddressBlock,
    pub enable_dns_hostnames: bool,
    pub tags: Tags,
}

/// A named resource that only carries tags (internet gateway, elastic IP).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TaggedResource {
    pub name: String,
    pub tags: Tags,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NatGateway {
    pub name: String,
    /// Name of the public subnet hosting the gateway.
    pub subnet: String,
    pub subnet_cidr: AddressBlock,
    /// Name of the elastic IP allocated to the gateway.
    pub allocation: String,
    pub tags: Tags,
}

/// Next hop of a route.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum RouteTarget {
    InternetGateway(String),
    NatGateway(String),
}

impl RouteTarget {
    pub fn name(&self) -> &str {
        match self {
            RouteTarget::InternetGateway(name) | RouteTarget::NatGateway(name) => name,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub destination: AddressBlock,
    pub target: RouteTarget,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    pub name: String,
    pub routes: Vec<Route>,
    pub tags: Tags,
}

impl RouteTable {
    /// The route for `0.0.0.0/0`, if present.
    pub fn default_route(&self) -> Option<&Route> {
        self.routes.iter().find(|r| r.destination.prefix() == 0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RouteTableAssociation {
    pub name: String,
    pub subnet: String,
    pub route_table: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Vpc,
    Subnet,
    InternetGateway,
    ElasticIp,
    NatGateway,
    RouteTable,
    RouteTableAssociation,
}

/// A resource-creation request with its explicit dependency edges.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ResourceDeclaration {
    pub name: String,
    pub kind: ResourceKind,
    pub depends_on: Vec<String>,
}

/// The complete routing graph of one network.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NetworkTopology {
    pub parent: AddressBlock,
    pub vpc: Vpc,
    pub zones: Vec<ZoneAssignment>,
    /// Zone whose public subnet hosts the NAT gateway.
    pub nat_zone: String,
    pub internet_gateway: TaggedResource,
    pub elastic_ip: TaggedResource,
    pub nat_gateway: NatGateway,
    pub public_route_table: RouteTable,
    /// One per zone, in zone order.
    pub private_route_tables: Vec<RouteTable>,
    pub associations: Vec<RouteTableAssociation>,
}

impl NetworkTopology {
    pub fn private_subnets(&self) -> impl Iterator<Item = &SubnetRecord> {
        self.zones.iter().map(|z| &z.private)
    }

    pub fn public_subnets(&self) -> impl Iterator<Item = &SubnetRecord> {
        self.zones.iter().map(|z| &z.public)
    }

    /// The route table associated with the named subnet.
    pub fn route_table_for(&self, subnet: &str) -> Option<&RouteTable> {
        let association = self.associations.iter().find(|a| a.subnet == subnet)?;
        std::iter::once(&self.public_route_table)
            .chain(self.private_route_tables.iter())
            .find(|rt| rt.name == association.route_table)
    }

    /// Flatten the topology into creation requests.
    ///
    /// Every entry appears after all of its `depends_on` entries.
    pub fn resources(&self) -> Vec<ResourceDeclaration> {
        let decl = |name: &str, kind: ResourceKind, depends_on: &[&str]| ResourceDeclaration {
            name: name.to_string(),
            kind,
            depends_on: depends_on.iter().map(|d| d.to_string()).collect(),
        };
        let vpc = self.vpc.name.as_str();

        let mut out = vec![decl(vpc, ResourceKind::Vpc, &[])];
        for zone in &self.zones {
            out.push(decl(&zone.private.name, ResourceKind::Subnet, &[vpc]));
            out.push(decl(&zone.public.name, ResourceKind::Subnet, &[vpc]));
        }
        out.push(decl(
            &self.internet_gateway.name,
            ResourceKind::InternetGateway,
            &[vpc],
        ));
        out.push(decl(&self.elastic_ip.name, ResourceKind::ElasticIp, &[vpc]));
        out.push(decl(
            &self.nat_gateway.name,
            ResourceKind::NatGateway,
            &[
                self.nat_gateway.subnet.as_str(),
                self.nat_gateway.allocation.as_str(),
            ],
        ));
        for rt in std::iter::once(&self.public_route_table).chain(&self.private_route_tables) {
            let mut deps = vec![vpc];
            deps.extend(rt.routes.iter().map(|r| r.target.name()));
            out.push(decl(&rt.name, ResourceKind::RouteTable, &deps));
        }
        for assoc in &self.associations {
            out.push(decl(
                &assoc.name,
                ResourceKind::RouteTableAssociation,
                &[assoc.subnet.as_str(), assoc.route_table.as_str()],
            ));
        }
        out
    }
}

impl fmt::Display for NetworkTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Network {} ({} zones):", self.parent, self.zones.len())?;
        for zone in &self.zones {
            writeln!(f, "  - {zone}")?;
        }
        write!(
            f,
            "  nat={} in {} igw={}",
            self.nat_gateway.name, self.nat_gateway.subnet_cidr, self.internet_gateway.name
        )
    }
}
