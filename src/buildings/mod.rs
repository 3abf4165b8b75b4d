//! Building tiles, payment validation and the building stacks.

pub mod building;
pub mod catalog;

pub use building::{Building, BuildingRule};
pub use catalog::{build_building_stacks, building_catalog, BUILDING_STACKS, STACK_SIZE};
