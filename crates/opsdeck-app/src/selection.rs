// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Classification, Criteria, Record, RecordId, RecordStore};

/// Tracks the one record open for inspection. Only the id is held; every
/// read goes back to the store, so a vanished record reads as no selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    selected: Option<RecordId>,
}

/// Resolved selection plus whether the current criteria would show it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionView<'a, C> {
    pub record: &'a Record<C>,
    pub visible: bool,
}

impl SelectionController {
    pub fn select(&mut self, record_id: RecordId) {
        self.selected = Some(record_id);
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&RecordId> {
        self.selected.as_ref()
    }

    pub fn resolve<'a, C>(&self, store: &'a RecordStore<C>) -> Option<&'a Record<C>> {
        self.selected
            .as_ref()
            .and_then(|record_id| store.get(record_id))
    }

    pub fn view<'a, C: Classification>(
        &self,
        store: &'a RecordStore<C>,
        criteria: &Criteria,
    ) -> Option<SelectionView<'a, C>> {
        self.resolve(store).map(|record| SelectionView {
            record,
            visible: criteria.matches(record),
        })
    }
}
