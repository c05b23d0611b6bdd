//! Output formatting for network plans.
//!
//! This module handles presenting a built topology:
//! - [`terminal`] - colored subnet table on stdout
//! - [`json`] - JSON plan document for the provisioning engine

mod json;
mod terminal;

pub use json::{plan_file_name, write_plan, PlanDocument};
pub use terminal::{format_field, print_topology, subnet_rows, SubnetPrintRow};
