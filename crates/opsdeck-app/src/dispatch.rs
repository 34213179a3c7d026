// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{
    Action, ActionId, ActionKind, AlertStatus, CoreError, CoreResult, DispatchState, Lifecycle,
    Priority, Record, RecordId, RecordStore,
};

pub const DEFAULT_TEAM: &str = "operations";

/// Payload handed to the presentation layer after every successful dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfirmation {
    pub record_id: RecordId,
    pub record_title: String,
    pub action_id: ActionId,
    pub action_title: String,
    pub kind: ActionKind,
    pub priority: Priority,
    pub eta_label: String,
    pub target: String,
}

/// `record` and `action` reflect the state after the call.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchResult<C> {
    pub record: Record<C>,
    pub action: Action,
    pub newly_dispatched: bool,
    pub confirmation: DispatchConfirmation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusTransition {
    Acknowledge,
    Resolve,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub record_id: RecordId,
    pub transition: StatusTransition,
    pub from: AlertStatus,
    pub to: AlertStatus,
}

impl StatusChange {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

pub struct ActionDispatcher<'a, C> {
    store: &'a mut RecordStore<C>,
    default_team: &'a str,
}

impl<'a, C> ActionDispatcher<'a, C> {
    pub fn new(store: &'a mut RecordStore<C>) -> Self {
        Self::with_default_team(store, DEFAULT_TEAM)
    }

    /// `default_team` is the dispatch target for records without an assignee.
    pub fn with_default_team(store: &'a mut RecordStore<C>, default_team: &'a str) -> Self {
        Self {
            store,
            default_team,
        }
    }

    pub fn pending_actions(&self, record_id: &RecordId) -> CoreResult<Vec<&Action>> {
        let record = self
            .store
            .get(record_id)
            .ok_or_else(|| CoreError::RecordNotFound {
                record_id: record_id.clone(),
            })?;
        Ok(record.pending_actions().collect())
    }
}

impl<C: Clone> ActionDispatcher<'_, C> {
    /// Marks an action dispatched. Repeating the call on a dispatched action
    /// succeeds with `newly_dispatched == false` and changes nothing.
    pub fn dispatch(
        &mut self,
        record_id: &RecordId,
        action_id: &ActionId,
    ) -> CoreResult<DispatchResult<C>> {
        let default_team = self.default_team;
        let record = self.store.get_mut(record_id)?;
        let target = dispatch_target(record, default_team);
        let action = record
            .action_mut(action_id)
            .ok_or_else(|| CoreError::ActionNotFound {
                record_id: record_id.clone(),
                action_id: action_id.clone(),
            })?;

        let newly_dispatched = action.dispatch_state == DispatchState::Pending;
        if newly_dispatched {
            action.dispatch_state = DispatchState::Dispatched;
            tracing::info!(
                record = %record_id,
                action = %action_id,
                target = %target,
                "action dispatched"
            );
        } else {
            tracing::debug!(
                record = %record_id,
                action = %action_id,
                "action already dispatched"
            );
        }

        let action = action.clone();
        let confirmation = DispatchConfirmation {
            record_id: record_id.clone(),
            record_title: record.title().to_owned(),
            action_id: action.id.clone(),
            action_title: action.title.clone(),
            kind: action.kind,
            priority: action.priority,
            eta_label: action.eta_label.clone(),
            target,
        };

        Ok(DispatchResult {
            record: record.clone(),
            action,
            newly_dispatched,
            confirmation,
        })
    }
}

impl<C: Lifecycle> ActionDispatcher<'_, C> {
    /// Active alerts move to acknowledged; any other status is left alone.
    pub fn acknowledge(&mut self, record_id: &RecordId) -> CoreResult<StatusChange> {
        self.transition(record_id, StatusTransition::Acknowledge)
    }

    /// Resolves an active or acknowledged alert. Resolving twice is a no-op.
    pub fn resolve(&mut self, record_id: &RecordId) -> CoreResult<StatusChange> {
        self.transition(record_id, StatusTransition::Resolve)
    }

    fn transition(
        &mut self,
        record_id: &RecordId,
        transition: StatusTransition,
    ) -> CoreResult<StatusChange> {
        let record = self.store.get_mut(record_id)?;
        let from = record.classification.status();
        let to = match transition {
            StatusTransition::Acknowledge => from.after_acknowledge(),
            StatusTransition::Resolve => from.after_resolve(),
        };
        record.classification.set_status(to);

        let change = StatusChange {
            record_id: record_id.clone(),
            transition,
            from,
            to,
        };
        if change.changed() {
            tracing::info!(
                record = %record_id,
                from = from.as_str(),
                to = to.as_str(),
                "alert status changed"
            );
        } else {
            tracing::debug!(record = %record_id, status = from.as_str(), ?transition, "status unchanged");
        }
        Ok(change)
    }
}

fn dispatch_target<C>(record: &Record<C>, default_team: &str) -> String {
    record
        .assignee
        .as_deref()
        .map(str::trim)
        .filter(|assignee| !assignee.is_empty())
        .unwrap_or(default_team)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::{ActionDispatcher, StatusTransition};
    use crate::{
        Action, ActionId, ActionKind, AlertClass, AlertStatus, CoreError, DispatchState,
        KpiStatus, Priority, Record, RecordId, RecordStore, Severity,
    };

    fn action(id: &str, kind: ActionKind) -> Action {
        Action {
            id: ActionId::new(id),
            title: format!("Run {id}"),
            kind,
            priority: Priority::High,
            eta_label: "15 min".to_owned(),
            dispatch_state: DispatchState::Pending,
        }
    }

    fn alert(id: &str, status: AlertStatus, assignee: Option<&str>) -> Record<AlertClass> {
        Record {
            id: RecordId::new(id),
            classification: AlertClass {
                severity: Severity::High,
                status,
            },
            category: "compressors".to_owned(),
            tags: Vec::new(),
            text_fields: vec![format!("alert {id}")],
            assignee: assignee.map(str::to_owned),
            insight: None,
            actions: vec![
                action("inspect", ActionKind::Maintenance),
                action("throttle", ActionKind::Control),
            ],
            observed_at: None,
            reading: None,
        }
    }

    fn store() -> RecordStore<AlertClass> {
        RecordStore::new(vec![
            alert("A1", AlertStatus::Active, Some("Line 2 crew")),
            alert("A2", AlertStatus::Resolved, None),
            alert("A3", AlertStatus::Acknowledged, Some("  ")),
        ])
        .expect("valid store")
    }

    fn state_of(store: &RecordStore<AlertClass>, record: &str, action: &str) -> DispatchState {
        store
            .get(&RecordId::new(record))
            .and_then(|record| record.action(&ActionId::new(action)))
            .map(|action| action.dispatch_state)
            .expect("action exists")
    }

    #[test]
    fn dispatch_is_idempotent() {
        let mut store = store();
        let mut dispatcher = ActionDispatcher::new(&mut store);
        let record_id = RecordId::new("A1");
        let action_id = ActionId::new("inspect");

        let first = dispatcher
            .dispatch(&record_id, &action_id)
            .expect("first dispatch");
        assert!(first.newly_dispatched);
        assert_eq!(first.action.dispatch_state, DispatchState::Dispatched);
        assert_eq!(first.record.id, record_id);
        assert_eq!(first.confirmation.record_title, "alert A1");
        assert_eq!(
            first.record.action(&action_id).map(|action| action.dispatch_state),
            Some(DispatchState::Dispatched)
        );
        assert_eq!(first.record.pending_actions().count(), 1);

        let second = dispatcher
            .dispatch(&record_id, &action_id)
            .expect("second dispatch");
        assert!(!second.newly_dispatched);
        assert_eq!(second.action.dispatch_state, DispatchState::Dispatched);
        assert_eq!(first.confirmation, second.confirmation);
    }

    #[test]
    fn dispatching_second_action_leaves_first_pending() {
        let mut store = store();
        ActionDispatcher::new(&mut store)
            .dispatch(&RecordId::new("A1"), &ActionId::new("throttle"))
            .expect("dispatch throttle");

        assert_eq!(state_of(&store, "A1", "inspect"), DispatchState::Pending);
        assert_eq!(state_of(&store, "A1", "throttle"), DispatchState::Dispatched);
        assert_eq!(state_of(&store, "A2", "throttle"), DispatchState::Pending);
    }

    #[test]
    fn confirmation_targets_assignee_or_default_team() {
        let mut store = store();
        let mut dispatcher = ActionDispatcher::with_default_team(&mut store, "night shift");

        let assigned = dispatcher
            .dispatch(&RecordId::new("A1"), &ActionId::new("inspect"))
            .expect("dispatch");
        assert_eq!(assigned.confirmation.target, "Line 2 crew");
        assert_eq!(assigned.confirmation.action_title, "Run inspect");
        assert_eq!(assigned.confirmation.kind, ActionKind::Maintenance);
        assert_eq!(assigned.confirmation.eta_label, "15 min");

        let unassigned = dispatcher
            .dispatch(&RecordId::new("A2"), &ActionId::new("inspect"))
            .expect("dispatch");
        assert_eq!(unassigned.confirmation.target, "night shift");

        let blank = dispatcher
            .dispatch(&RecordId::new("A3"), &ActionId::new("inspect"))
            .expect("dispatch");
        assert_eq!(blank.confirmation.target, "night shift");
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let mut store = store();
        let mut dispatcher = ActionDispatcher::new(&mut store);

        let missing_record = dispatcher
            .dispatch(&RecordId::new("A5"), &ActionId::new("inspect"))
            .expect_err("unknown record");
        assert!(missing_record.is_not_found());

        let missing_action = dispatcher
            .dispatch(&RecordId::new("A1"), &ActionId::new("reboot"))
            .expect_err("unknown action");
        assert_eq!(
            missing_action,
            CoreError::ActionNotFound {
                record_id: RecordId::new("A1"),
                action_id: ActionId::new("reboot"),
            }
        );

        assert!(dispatcher.acknowledge(&RecordId::new("A5")).is_err());
        let err = dispatcher
            .resolve(&RecordId::new("B2"))
            .expect_err("unknown record");
        assert!(err.is_not_found());
    }

    #[test]
    fn acknowledge_then_resolve() {
        let mut store = store();
        let mut dispatcher = ActionDispatcher::new(&mut store);
        let record_id = RecordId::new("A1");

        let ack = dispatcher.acknowledge(&record_id).expect("acknowledge");
        assert_eq!(ack.transition, StatusTransition::Acknowledge);
        assert_eq!((ack.from, ack.to), (AlertStatus::Active, AlertStatus::Acknowledged));
        assert!(ack.changed());

        let repeated = dispatcher.acknowledge(&record_id).expect("acknowledge again");
        assert!(!repeated.changed());

        let resolved = dispatcher.resolve(&record_id).expect("resolve");
        assert_eq!(resolved.to, AlertStatus::Resolved);
        assert!(resolved.changed());

        let again = dispatcher.resolve(&record_id).expect("resolve again");
        assert!(!again.changed());
    }

    #[test]
    fn acknowledging_resolved_alert_is_a_noop() {
        let mut store = store();
        let change = ActionDispatcher::new(&mut store)
            .acknowledge(&RecordId::new("A2"))
            .expect("acknowledge resolved alert");
        assert!(!change.changed());
        assert_eq!(change.to, AlertStatus::Resolved);
        let record = store.get(&RecordId::new("A2")).expect("A2 exists");
        assert_eq!(record.classification.status, AlertStatus::Resolved);
    }

    #[test]
    fn pending_actions_shrink_as_actions_dispatch() {
        let mut store = store();
        let mut dispatcher = ActionDispatcher::new(&mut store);
        let record_id = RecordId::new("A1");
        assert_eq!(dispatcher.pending_actions(&record_id).expect("A1").len(), 2);

        dispatcher
            .dispatch(&record_id, &ActionId::new("inspect"))
            .expect("dispatch");
        let pending = dispatcher.pending_actions(&record_id).expect("A1");
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, ActionId::new("throttle"));

        assert!(dispatcher.pending_actions(&RecordId::new("A9")).is_err());
    }

    #[test]
    fn kpi_actions_dispatch_without_lifecycle() {
        let mut store = RecordStore::new(vec![Record {
            id: RecordId::new("K1"),
            classification: KpiStatus::Warning,
            category: "energy".to_owned(),
            tags: Vec::new(),
            text_fields: vec!["kWh per unit".to_owned()],
            assignee: None,
            insight: None,
            actions: vec![action("rebalance", ActionKind::Workflow)],
            observed_at: None,
            reading: None,
        }])
        .expect("valid store");
        let result = ActionDispatcher::new(&mut store)
            .dispatch(&RecordId::new("K1"), &ActionId::new("rebalance"))
            .expect("dispatch");
        assert!(result.newly_dispatched);
        assert_eq!(result.confirmation.target, super::DEFAULT_TEAM);
    }
}
