// src/domain/catalog.rs
//
// The catalog: the full ordered collection of product records, read and
// written by the store as one snapshot. Insertion order is preserved;
// queries re-sort their own working copies.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

use super::product::ProductRecord;

/// Ordered collection of product records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub records: Vec<ProductRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of the record carrying the given product code, if any
    pub fn find_index_by_code(&self, code: &str) -> Option<usize> {
        self.records.iter().position(|r| r.product_code == code)
    }

    pub fn find_by_id(&self, id: Uuid) -> Option<&ProductRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn find_by_id_mut(&mut self, id: Uuid) -> Option<&mut ProductRecord> {
        self.records.iter_mut().find(|r| r.id == id)
    }

    /// Code → position map over the current records.
    /// Built once per merge so repeated codes within a batch resolve
    /// against the latest in-batch state.
    pub fn code_index(&self) -> HashMap<String, usize> {
        self.records
            .iter()
            .enumerate()
            .map(|(idx, r)| (r.product_code.clone(), idx))
            .collect()
    }

    pub fn push(&mut self, record: ProductRecord) {
        self.records.push(record);
    }

    /// Remove a record by id. Returns whether a record was removed.
    pub fn remove_by_id(&mut self, id: Uuid) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id != id);
        self.records.len() != before
    }
}
