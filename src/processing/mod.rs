//! Subnet allocation logic.
//!
//! This module contains the allocation pipeline:
//! - [`partition`] - splitting the parent block at the target prefix
//! - [`overlap`] - collision checks against reserved blocks
//! - [`assign`] - binding zones to private/public plan entries
//! - [`topology`] - routing graph assembly
//! - [`naming`] - resource names shared by the steps above

pub mod assign;
pub mod naming;
pub mod overlap;
pub mod partition;
pub mod topology;

// Re-export public functions
pub use assign::{assign_zones, validate_zones};
pub use naming::{zone_suffix, BuildContext};
pub use overlap::{find_conflicts, first_collision, OverlapConflict};
pub use partition::{partition, partition_with_existing, PlanEntry, SubnetPlan};
pub use topology::build_topology;
