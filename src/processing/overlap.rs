//! Collision detection against caller-supplied reservations.
//!
//! Reserved blocks are address ranges that already exist in the network
//! (peered ranges, hand-made subnets) and must not be handed out again.

use crate::models::AddressBlock;

/// A planned block that collides with one or more reserved blocks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapConflict {
    pub index: u64,
    pub block: AddressBlock,
    pub existing: Vec<AddressBlock>,
}

/// First reserved block whose range intersects `block`, in `existing` order.
pub fn first_collision(block: &AddressBlock, existing: &[AddressBlock]) -> Option<AddressBlock> {
    existing.iter().find(|e| e.overlaps(block)).copied()
}

/// Collect every conflict among the indexed `blocks`.
pub fn find_conflicts<I>(blocks: I, existing: &[AddressBlock]) -> Vec<OverlapConflict>
where
    I: IntoIterator<Item = (u64, AddressBlock)>,
{
    blocks
        .into_iter()
        .filter_map(|(index, block)| {
            let hits: Vec<AddressBlock> = existing
                .iter()
                .filter(|e| e.overlaps(&block))
                .copied()
                .collect();
            (!hits.is_empty()).then_some(OverlapConflict {
                index,
                block,
                existing: hits,
            })
        })
        .collect()
}

/// Log conflicts as warnings.
pub fn log_conflicts(conflicts: &[OverlapConflict]) {
    if conflicts.is_empty() {
        log::debug!("No planned subnet overlaps a reserved block.");
        return;
    }

    log::warn!(
        "Found {} planned subnet(s) overlapping reserved blocks:",
        conflicts.len()
    );
    for conflict in conflicts {
        let existing: Vec<String> = conflict.existing.iter().map(|e| e.to_string()).collect();
        log::warn!(
            "  plan[{}] {} overlaps {}",
            conflict.index,
            conflict.block,
            existing.join(", ")
        );
    }
}
