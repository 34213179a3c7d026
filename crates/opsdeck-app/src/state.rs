// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::filter;
use crate::insight::{self, InsightView};
use crate::{
    ActionDispatcher, ActionId, AlertClass, Classification, CoreResult, Criteria,
    DEFAULT_TEAM, DispatchConfirmation, KpiStatus, Lifecycle, Record, RecordId, RecordStore,
    SelectionController, SelectionView, StatusChange,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    SetClassificationFilter(String),
    SetCategoryFilter(String),
    SetSearchText(String),
    ResetFilters,
    Select(RecordId),
    ClearSelection,
    Dispatch {
        record_id: RecordId,
        action_id: ActionId,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    CriteriaChanged(Criteria),
    SelectionChanged(Option<RecordId>),
    ActionDispatched(DispatchConfirmation),
    DispatchRepeated(DispatchConfirmation),
    StatusChanged(StatusChange),
}

/// Everything one operator works with: the record snapshot, the active
/// criteria and the current selection. Commands run to completion in the
/// order they are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Session<C> {
    store: RecordStore<C>,
    criteria: Criteria,
    selection: SelectionController,
    default_team: String,
}

pub type AlertSession = Session<AlertClass>;
pub type KpiSession = Session<KpiStatus>;

impl<C> Session<C> {
    pub fn new(store: RecordStore<C>) -> Self {
        Self {
            store,
            criteria: Criteria::default(),
            selection: SelectionController::default(),
            default_team: DEFAULT_TEAM.to_owned(),
        }
    }

    pub fn with_default_team(mut self, team: impl Into<String>) -> Self {
        self.default_team = team.into();
        self
    }

    pub fn store(&self) -> &RecordStore<C> {
        &self.store
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn default_team(&self) -> &str {
        &self.default_team
    }

    pub fn selected_record(&self) -> Option<&Record<C>> {
        self.selection.resolve(&self.store)
    }

    pub fn insight_view(&self) -> Option<InsightView> {
        self.selected_record().and_then(insight::present)
    }

    /// Swaps in a fresh snapshot. The selected id is kept and simply stops
    /// resolving if the new snapshot no longer carries it.
    pub fn reload(&mut self, store: RecordStore<C>) {
        self.store = store;
        if self.selection.selected_id().is_some() && self.selected_record().is_none() {
            tracing::debug!(
                selected = ?self.selection.selected_id(),
                "selected record missing after reload"
            );
        }
    }

    fn dispatcher(&mut self) -> ActionDispatcher<'_, C> {
        ActionDispatcher::with_default_team(&mut self.store, &self.default_team)
    }
}

impl<C: Classification + Clone> Session<C> {
    pub fn apply(&mut self, command: SessionCommand) -> CoreResult<Vec<SessionEvent>> {
        let events = match command {
            SessionCommand::SetClassificationFilter(value) => {
                self.criteria.classification = value;
                vec![self.criteria_changed()]
            }
            SessionCommand::SetCategoryFilter(value) => {
                self.criteria.category = value;
                vec![self.criteria_changed()]
            }
            SessionCommand::SetSearchText(value) => {
                self.criteria.search_text = value;
                vec![self.criteria_changed()]
            }
            SessionCommand::ResetFilters => {
                self.criteria = Criteria::default();
                vec![self.criteria_changed()]
            }
            SessionCommand::Select(record_id) => {
                tracing::debug!(record = %record_id, "select");
                self.selection.select(record_id.clone());
                vec![SessionEvent::SelectionChanged(Some(record_id))]
            }
            SessionCommand::ClearSelection => {
                self.selection.clear();
                vec![SessionEvent::SelectionChanged(None)]
            }
            SessionCommand::Dispatch {
                record_id,
                action_id,
            } => {
                let result = self.dispatcher().dispatch(&record_id, &action_id)?;
                if result.newly_dispatched {
                    vec![SessionEvent::ActionDispatched(result.confirmation)]
                } else {
                    vec![SessionEvent::DispatchRepeated(result.confirmation)]
                }
            }
        };
        Ok(events)
    }

    fn criteria_changed(&self) -> SessionEvent {
        tracing::debug!(
            classification = %self.criteria.classification,
            category = %self.criteria.category,
            search = %self.criteria.search_text,
            "criteria changed"
        );
        SessionEvent::CriteriaChanged(self.criteria.clone())
    }
}

impl<C: Classification> Session<C> {
    pub fn filtered(&self) -> Vec<&Record<C>> {
        filter::apply(&self.store, &self.criteria)
    }

    pub fn selected_view(&self) -> Option<SelectionView<'_, C>> {
        self.selection.view(&self.store, &self.criteria)
    }

    pub fn summary(&self) -> Vec<(&'static str, usize)> {
        self.store.summary()
    }
}

impl<C: Classification + Lifecycle> Session<C> {
    pub fn acknowledge(&mut self, record_id: &RecordId) -> CoreResult<Vec<SessionEvent>> {
        let change = self.dispatcher().acknowledge(record_id)?;
        Ok(vec![SessionEvent::StatusChanged(change)])
    }

    pub fn resolve(&mut self, record_id: &RecordId) -> CoreResult<Vec<SessionEvent>> {
        let change = self.dispatcher().resolve(record_id)?;
        Ok(vec![SessionEvent::StatusChanged(change)])
    }
}
