// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::collections::BTreeSet;

use crate::{Classification, CoreError, CoreResult, Record, RecordId};

/// Session-scoped collection of records in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordStore<C> {
    records: Vec<Record<C>>,
}

impl<C> Default for RecordStore<C> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<C> RecordStore<C> {
    pub fn new(records: Vec<Record<C>>) -> CoreResult<Self> {
        let mut seen = BTreeSet::new();
        for record in &records {
            if !seen.insert(&record.id) {
                return Err(CoreError::DuplicateRecordId {
                    record_id: record.id.clone(),
                });
            }

            let mut action_ids = BTreeSet::new();
            for action in &record.actions {
                if !action_ids.insert(&action.id) {
                    return Err(CoreError::DuplicateActionId {
                        record_id: record.id.clone(),
                        action_id: action.id.clone(),
                    });
                }
            }
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[Record<C>] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record<C>> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, record_id: &RecordId) -> Option<&Record<C>> {
        self.records.iter().find(|record| &record.id == record_id)
    }

    pub(crate) fn get_mut(&mut self, record_id: &RecordId) -> CoreResult<&mut Record<C>> {
        self.records
            .iter_mut()
            .find(|record| &record.id == record_id)
            .ok_or_else(|| CoreError::RecordNotFound {
                record_id: record_id.clone(),
            })
    }

    /// Distinct categories in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = BTreeSet::new();
        self.records
            .iter()
            .map(|record| record.category.as_str())
            .filter(|category| seen.insert(*category))
            .collect()
    }
}

impl<C: Classification> RecordStore<C> {
    /// Record count per classification label, in vocabulary order.
    pub fn summary(&self) -> Vec<(&'static str, usize)> {
        C::VOCABULARY
            .iter()
            .map(|label| {
                let count = self
                    .records
                    .iter()
                    .filter(|record| record.classification.matches_label(label))
                    .count();
                (*label, count)
            })
            .collect()
    }
}

impl<'a, C> IntoIterator for &'a RecordStore<C> {
    type Item = &'a Record<C>;
    type IntoIter = std::slice::Iter<'a, Record<C>>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
