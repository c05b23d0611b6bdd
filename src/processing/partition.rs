//! CIDR partitioning.
//!
//! Splits a parent block into every equally sized sub-block at a target
//! prefix, in ascending address order. Entries are computed from their index
//! rather than stored, so a `/8` split into `/30`s costs nothing until read.

use super::overlap::{find_conflicts, first_collision, log_conflicts};
use crate::error::PlanError;
use crate::models::{block_size, AddressBlock, MAX_LENGTH};
use std::net::Ipv4Addr;

/// One sub-block of a [`SubnetPlan`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanEntry {
    /// Position in carving order.
    pub index: u64,
    pub block: AddressBlock,
    /// True when `block` intersects a reserved block of the plan.
    pub overlap: bool,
}

/// All sub-blocks of `parent` at `target_prefix`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubnetPlan {
    parent: AddressBlock,
    target_prefix: u8,
    existing: Vec<AddressBlock>,
}

/// Partition `parent` into `2^(target_prefix - parent.prefix)` blocks.
pub fn partition(parent: AddressBlock, target_prefix: u8) -> Result<SubnetPlan, PlanError> {
    partition_with_existing(parent, target_prefix, &[])
}

/// Partition `parent`, flagging entries that intersect any `existing` block.
pub fn partition_with_existing(
    parent: AddressBlock,
    target_prefix: u8,
    existing: &[AddressBlock],
) -> Result<SubnetPlan, PlanError> {
    if target_prefix < parent.prefix() || target_prefix > MAX_LENGTH {
        return Err(PlanError::InvalidPrefix {
            parent,
            target: target_prefix,
        });
    }
    let plan = SubnetPlan {
        parent,
        target_prefix,
        existing: existing.to_vec(),
    };
    log::debug!(
        "partition({parent} -> /{target_prefix}) = {} blocks, {} reserved",
        plan.len(),
        existing.len()
    );
    Ok(plan)
}

impl SubnetPlan {
    pub fn parent(&self) -> AddressBlock {
        self.parent
    }

    pub fn target_prefix(&self) -> u8 {
        self.target_prefix
    }

    pub fn existing(&self) -> &[AddressBlock] {
        &self.existing
    }

    /// Number of entries, `2^(target_prefix - parent.prefix)`.
    pub fn len(&self) -> u64 {
        1u64 << (self.target_prefix - self.parent.prefix())
    }

    /// A plan always holds at least one entry.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The entry at position `index`, or None past the end.
    pub fn get(&self, index: u64) -> Option<PlanEntry> {
        if index >= self.len() {
            return None;
        }
        // target_prefix is validated, so the size lookup cannot fail
        let step = block_size(self.target_prefix).ok()?;
        let base = u32::from(self.parent.base()) as u64 + index * step;
        let block = AddressBlock::new(Ipv4Addr::from(base as u32), self.target_prefix).ok()?;
        Some(PlanEntry {
            index,
            block,
            overlap: first_collision(&block, &self.existing).is_some(),
        })
    }

    /// Entries in ascending address order.
    pub fn iter(&self) -> impl Iterator<Item = PlanEntry> + '_ {
        (0..self.len()).filter_map(move |k| self.get(k))
    }

    /// Fail on the first overlapping entry among the first `count`.
    pub fn ensure_no_overlap(&self, count: u64) -> Result<(), PlanError> {
        if self.existing.is_empty() {
            return Ok(());
        }
        let take = usize::try_from(count).unwrap_or(usize::MAX);
        let conflicts = find_conflicts(
            self.iter().take(take).map(|e| (e.index, e.block)),
            &self.existing,
        );
        log_conflicts(&conflicts);
        match conflicts.into_iter().next() {
            Some(conflict) => Err(PlanError::OverlapDetected {
                index: conflict.index,
                block: conflict.block,
                existing: conflict.existing[0],
            }),
            None => Ok(()),
        }
    }
}
