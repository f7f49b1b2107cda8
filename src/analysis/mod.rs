//! Batch analysis over flattened record sets: culling, cycle
//! detection, host lookup. All functions here are pure computations
//! over immutable snapshots and return new lists.

pub mod cycles;
pub mod dedup;
pub mod hosts;

pub use cycles::{
    check_components_have_circular_references, find_circular_references, has_circular_nesting,
    witnesses_for, CircularReference, CycleWitness,
};
pub use dedup::cull;
pub use hosts::{find_all_direct_hosts, find_direct_hosts};
