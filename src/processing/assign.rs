//! Zone subnet assignment.
//!
//! Zone `i` takes plan entry `2i` as its private subnet and `2i + 1` as its
//! public subnet.

use super::naming::{zone_suffix, BuildContext};
use super::partition::{PlanEntry, SubnetPlan};
use crate::error::PlanError;
use crate::models::{SubnetRecord, SubnetRole, ZoneAssignment};
use itertools::Itertools;
use regex::Regex;
use std::sync::OnceLock;

/// Allowed availability zone identifier characters.
static ZONE_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_zone_regex() -> &'static Regex {
    ZONE_REGEX.get_or_init(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").expect("Invalid Regex"))
}

/// Check that `zones` is non-empty, well formed, and free of repeats.
pub fn validate_zones(zones: &[String]) -> Result<(), PlanError> {
    if zones.is_empty() {
        return Err(PlanError::InvalidZone("no availability zones given".to_string()));
    }
    if let Some(bad) = zones.iter().find(|z| !get_zone_regex().is_match(z)) {
        return Err(PlanError::InvalidZone(format!("malformed zone id '{bad}'")));
    }
    if let Some(dup) = zones.iter().duplicates().next() {
        return Err(PlanError::InvalidZone(format!("zone '{dup}' listed twice")));
    }
    if let Some(dup) = zones.iter().map(|z| zone_suffix(z)).duplicates().next() {
        return Err(PlanError::InvalidZone(format!(
            "zone suffix '{dup}' is shared by more than one zone"
        )));
    }
    Ok(())
}

/// Bind each zone to its private and public plan entries.
pub fn assign_zones(
    plan: &SubnetPlan,
    zones: &[String],
    ctx: &BuildContext,
) -> Result<Vec<ZoneAssignment>, PlanError> {
    let needed = 2 * zones.len() as u64;
    if plan.len() < needed {
        return Err(PlanError::InsufficientAddressSpace {
            zones: zones.len(),
            needed,
            available: plan.len(),
        });
    }

    let assignments: Vec<ZoneAssignment> = plan
        .iter()
        .tuples::<(_, _)>()
        .zip(zones)
        .map(|((private, public), zone)| ZoneAssignment {
            zone: zone.clone(),
            zone_suffix: zone_suffix(zone).to_string(),
            private: subnet_record(ctx, zone, SubnetRole::Private, private),
            public: subnet_record(ctx, zone, SubnetRole::Public, public),
        })
        .collect();

    for a in &assignments {
        log::debug!("assign {a}");
    }
    Ok(assignments)
}

fn subnet_record(
    ctx: &BuildContext,
    zone: &str,
    role: SubnetRole,
    entry: PlanEntry,
) -> SubnetRecord {
    let name = ctx.subnet(role, zone_suffix(zone));
    SubnetRecord {
        tags: ctx.tags.for_subnet(&name, role, ctx.cluster()),
        name,
        zone: zone.to_string(),
        role,
        cidr: entry.block,
        plan_index: entry.index,
    }
}
