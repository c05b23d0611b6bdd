//! Routing graph assembly.
//!
//! One internet gateway and one NAT gateway serve the whole network. The NAT
//! gateway sits in the first zone's public subnet. Public subnets share one
//! route table; each private subnet gets its own.

use super::naming::BuildContext;
use crate::error::PlanError;
use crate::models::{
    AddressBlock, NatGateway, NetworkTopology, Route, RouteTable, RouteTableAssociation,
    RouteTarget, SubnetRole, TaggedResource, Vpc, ZoneAssignment,
};

/// Assemble the routing graph for already-assigned zones.
pub fn build_topology(
    ctx: &BuildContext,
    parent: AddressBlock,
    zones: Vec<ZoneAssignment>,
) -> Result<NetworkTopology, PlanError> {
    let nat_zone = zones
        .first()
        .ok_or_else(|| PlanError::InvalidZone("no availability zones given".to_string()))?;

    let vpc_name = ctx.vpc();
    let vpc = Vpc {
        tags: ctx.tags.for_resource(&vpc_name),
        name: vpc_name,
        cidr: parent,
        enable_dns_hostnames: true,
    };

    let eip_name = ctx.elastic_ip();
    let elastic_ip = TaggedResource {
        tags: ctx.tags.for_resource(&eip_name),
        name: eip_name,
    };

    let nat_name = ctx.nat_gateway();
    let nat_gateway = NatGateway {
        tags: ctx.tags.for_resource(&nat_name),
        name: nat_name,
        subnet: nat_zone.public.name.clone(),
        subnet_cidr: nat_zone.public.cidr,
        allocation: elastic_ip.name.clone(),
    };

    let igw_name = ctx.internet_gateway();
    let internet_gateway = TaggedResource {
        tags: ctx.tags.for_resource(&igw_name),
        name: igw_name,
    };

    let private_route_tables: Vec<RouteTable> = zones
        .iter()
        .map(|z| {
            route_table(
                ctx,
                ctx.private_route_table(&z.zone_suffix),
                RouteTarget::NatGateway(nat_gateway.name.clone()),
            )
        })
        .collect();

    let public_route_table = route_table(
        ctx,
        ctx.public_route_table(),
        RouteTarget::InternetGateway(internet_gateway.name.clone()),
    );

    let private_assocs = zones
        .iter()
        .zip(&private_route_tables)
        .map(|(z, rt)| RouteTableAssociation {
            name: ctx.association(SubnetRole::Private, &z.zone_suffix),
            subnet: z.private.name.clone(),
            route_table: rt.name.clone(),
        });
    let public_assocs = zones.iter().map(|z| RouteTableAssociation {
        name: ctx.association(SubnetRole::Public, &z.zone_suffix),
        subnet: z.public.name.clone(),
        route_table: public_route_table.name.clone(),
    });
    let associations: Vec<RouteTableAssociation> = private_assocs.chain(public_assocs).collect();

    log::info!(
        "topology: {} zones, nat in {} ({}), {} route tables, {} associations",
        zones.len(),
        nat_gateway.subnet,
        nat_gateway.subnet_cidr,
        private_route_tables.len() + 1,
        associations.len()
    );

    Ok(NetworkTopology {
        parent,
        vpc,
        nat_zone: nat_zone.zone.clone(),
        zones,
        internet_gateway,
        elastic_ip,
        nat_gateway,
        public_route_table,
        private_route_tables,
        associations,
    })
}

fn route_table(ctx: &BuildContext, name: String, target: RouteTarget) -> RouteTable {
    RouteTable {
        tags: ctx.tags.for_resource(&name),
        name,
        routes: vec![Route {
            destination: AddressBlock::DEFAULT_ROUTE,
            target,
        }],
    }
}
