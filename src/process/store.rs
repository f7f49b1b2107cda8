//! Record Store
//!
//! Ordered, processor-owned collection of everything one walk produced.
//! Each processor instance has exclusive ownership of its store; there
//! is no process-wide shared accumulator.
//!
//! @module process/store

use serde::{Deserialize, Serialize};

use crate::model::{FactRecord, NestedComponentRecord};

/// All records collected during one walk over one root document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordStore {
    components: Vec<NestedComponentRecord>,
    facts: Vec<FactRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one visited-document record
    pub fn add_component(&mut self, record: NestedComponentRecord) {
        self.components.push(record);
    }

    /// Append one fact record
    pub fn add_fact(&mut self, record: FactRecord) {
        self.facts.push(record);
    }

    /// Append a batch of fact records, preserving order
    pub fn extend_facts(&mut self, records: Vec<FactRecord>) {
        self.facts.extend(records);
    }

    pub fn components(&self) -> &[NestedComponentRecord] {
        &self.components
    }

    pub fn facts(&self) -> &[FactRecord] {
        &self.facts
    }

    /// Mutable access for post-actions (aggregation updates roots in place)
    pub fn facts_mut(&mut self) -> &mut [FactRecord] {
        &mut self.facts
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn fact_count(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty() && self.facts.is_empty()
    }

    /// Consume the store, handing both collections to the caller
    pub fn into_parts(self) -> (Vec<NestedComponentRecord>, Vec<FactRecord>) {
        (self.components, self.facts)
    }
}
