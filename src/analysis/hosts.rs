//! Direct Host Lookup
//!
//! Given a component identity, find every distinct component that
//! directly hosts it anywhere in the record set: wherever the identity
//! appears at a non-root position of an ancestry chain, the segment one
//! level up is a direct host. Rename and missing-component workflows
//! use this to decide which hosts need re-saving.
//!
//! @module analysis/hosts

use std::collections::HashMap;

use crate::model::{ComponentIdentity, NestedComponentRecord};

/// Distinct direct hosts of one component, in first-seen order
pub fn find_direct_hosts(
    identity: &ComponentIdentity,
    records: &[NestedComponentRecord],
) -> Vec<ComponentIdentity> {
    let mut hosts: Vec<ComponentIdentity> = Vec::new();

    for record in records {
        let segments = record.ancestry.segments();
        for (index, segment) in segments.iter().enumerate() {
            // a match at the root has no parent
            if index == 0 {
                continue;
            }
            if segment.name != identity.name || segment.category != identity.category {
                continue;
            }
            let parent = &segments[index - 1];
            let host = ComponentIdentity::new(parent.name.clone(), parent.category.clone());
            if !hosts.contains(&host) {
                hosts.push(host);
            }
        }
    }

    hosts
}

/// Direct hosts for a batch of components
pub fn find_all_direct_hosts(
    identities: &[ComponentIdentity],
    records: &[NestedComponentRecord],
) -> HashMap<ComponentIdentity, Vec<ComponentIdentity>> {
    identities
        .iter()
        .map(|identity| (identity.clone(), find_direct_hosts(identity, records)))
        .collect()
}
