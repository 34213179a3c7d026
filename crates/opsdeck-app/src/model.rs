// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ids::*;

/// Classification vocabulary shared by the filter engine and the dashboard
/// counters. Alerts and KPIs implement this with different label sets.
pub trait Classification {
    /// Every label the classification can report, in display order.
    const VOCABULARY: &'static [&'static str];

    /// Labels this value answers to when filtering.
    fn filter_labels(&self) -> Vec<&'static str>;

    fn matches_label(&self, label: &str) -> bool {
        self.filter_labels()
            .iter()
            .any(|candidate| *candidate == label)
    }
}

/// Classifications that carry an acknowledge/resolve lifecycle.
pub trait Lifecycle {
    fn status(&self) -> AlertStatus;
    fn set_status(&mut self, status: AlertStatus);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub const ALL: [Self; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "critical" => Some(Self::Critical),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            "low" => Some(Self::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Active,
    Acknowledged,
    Resolved,
}

impl AlertStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Acknowledged, Self::Resolved];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Acknowledged => "acknowledged",
            Self::Resolved => "resolved",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "active" => Some(Self::Active),
            "acknowledged" => Some(Self::Acknowledged),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }

    /// Only an active alert can be acknowledged; every other status is kept.
    pub const fn after_acknowledge(self) -> Self {
        match self {
            Self::Active => Self::Acknowledged,
            other => other,
        }
    }

    /// Resolved is terminal and reachable from every status.
    pub const fn after_resolve(self) -> Self {
        Self::Resolved
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertClass {
    pub severity: Severity,
    pub status: AlertStatus,
}

impl Classification for AlertClass {
    const VOCABULARY: &'static [&'static str] = &[
        "critical",
        "high",
        "medium",
        "low",
        "active",
        "acknowledged",
        "resolved",
    ];

    fn filter_labels(&self) -> Vec<&'static str> {
        vec![self.severity.as_str(), self.status.as_str()]
    }

    fn matches_label(&self, label: &str) -> bool {
        self.severity.as_str() == label || self.status.as_str() == label
    }
}

impl Lifecycle for AlertClass {
    fn status(&self) -> AlertStatus {
        self.status
    }

    fn set_status(&mut self, status: AlertStatus) {
        self.status = status;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KpiStatus {
    Good,
    Warning,
    Critical,
}

impl KpiStatus {
    pub const ALL: [Self; 3] = [Self::Good, Self::Warning, Self::Critical];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "good" => Some(Self::Good),
            "warning" => Some(Self::Warning),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }
}

impl Classification for KpiStatus {
    const VOCABULARY: &'static [&'static str] = &["good", "warning", "critical"];

    fn filter_labels(&self) -> Vec<&'static str> {
        vec![self.as_str()]
    }

    fn matches_label(&self, label: &str) -> bool {
        self.as_str() == label
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Maintenance,
    Workflow,
    Control,
}

impl ActionKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Maintenance => "maintenance",
            Self::Workflow => "workflow",
            Self::Control => "control",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchState {
    #[default]
    Pending,
    Dispatched,
}

impl DispatchState {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Dispatched => "dispatched",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    pub title: String,
    pub kind: ActionKind,
    pub priority: Priority,
    #[serde(default)]
    pub eta_label: String,
    #[serde(default)]
    pub dispatch_state: DispatchState,
}

impl Action {
    pub fn is_dispatched(&self) -> bool {
        self.dispatch_state == DispatchState::Dispatched
    }
}

/// Diagnostic payload produced upstream. `confidence_score` is nominally a
/// percentage but is not trusted by the presenter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub root_cause: String,
    pub impact: String,
    pub recommendation: String,
    pub confidence_score: f64,
}

/// Current value of a KPI plus its externally computed trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReading {
    pub value: f64,
    #[serde(default)]
    pub target: Option<f64>,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub trend: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<C> {
    pub id: RecordId,
    pub classification: C,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub text_fields: Vec<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub insight: Option<Insight>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub observed_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub reading: Option<MetricReading>,
}

impl<C> Record<C> {
    /// First text field, falling back to the id for records without text.
    pub fn title(&self) -> &str {
        self.text_fields
            .first()
            .map_or_else(|| self.id.as_str(), String::as_str)
    }

    pub fn action(&self, action_id: &ActionId) -> Option<&Action> {
        self.actions.iter().find(|action| &action.id == action_id)
    }

    /// Actions not yet dispatched, in source order.
    pub fn pending_actions(&self) -> impl Iterator<Item = &Action> {
        self.actions.iter().filter(|action| !action.is_dispatched())
    }

    pub(crate) fn action_mut(&mut self, action_id: &ActionId) -> Option<&mut Action> {
        self.actions.iter_mut().find(|action| &action.id == action_id)
    }

    pub fn in_category(&self, category: &str) -> bool {
        self.category == category || self.tags.iter().any(|tag| tag == category)
    }
}

pub type AlertRecord = Record<AlertClass>;
pub type KpiRecord = Record<KpiStatus>;

#[cfg(test)]
mod tests {
    use super::{
        Action, ActionKind, AlertClass, AlertStatus, Classification, DispatchState, KpiStatus,
        Priority, Record, Severity,
    };
    use crate::{ActionId, RecordId};

    fn bare_record(text_fields: Vec<String>) -> Record<KpiStatus> {
        Record {
            id: RecordId::new("K1"),
            classification: KpiStatus::Good,
            category: "throughput".to_owned(),
            tags: vec!["line-2".to_owned()],
            text_fields,
            assignee: None,
            insight: None,
            actions: Vec::new(),
            observed_at: None,
            reading: None,
        }
    }

    #[test]
    fn severity_parse_matches_as_str() {
        for severity in Severity::ALL {
            assert_eq!(Severity::parse(severity.as_str()), Some(severity));
        }
        assert_eq!(Severity::parse("Critical"), None);
    }

    #[test]
    fn acknowledge_only_moves_active_alerts() {
        assert_eq!(
            AlertStatus::Active.after_acknowledge(),
            AlertStatus::Acknowledged
        );
        assert_eq!(
            AlertStatus::Acknowledged.after_acknowledge(),
            AlertStatus::Acknowledged
        );
        assert_eq!(
            AlertStatus::Resolved.after_acknowledge(),
            AlertStatus::Resolved
        );
    }

    #[test]
    fn alert_class_matches_severity_or_status() {
        let class = AlertClass {
            severity: Severity::High,
            status: AlertStatus::Acknowledged,
        };
        assert!(class.matches_label("high"));
        assert!(class.matches_label("acknowledged"));
        assert!(!class.matches_label("critical"));
        assert!(!class.matches_label("HIGH"));
        for label in class.filter_labels() {
            assert!(AlertClass::VOCABULARY.contains(&label));
        }
    }

    #[test]
    fn title_falls_back_to_id() {
        assert_eq!(bare_record(Vec::new()).title(), "K1");
        assert_eq!(
            bare_record(vec!["OEE".to_owned(), "line 2".to_owned()]).title(),
            "OEE"
        );
    }

    #[test]
    fn category_match_includes_tags() {
        let record = bare_record(Vec::new());
        assert!(record.in_category("throughput"));
        assert!(record.in_category("line-2"));
        assert!(!record.in_category("Throughput"));
    }

    #[test]
    fn action_dispatch_state_defaults_to_pending_on_decode() {
        let action: super::Action = serde_json::from_str(
            r#"{"id":"a1","title":"Swap bearing","kind":"maintenance","priority":"high"}"#,
        )
        .expect("decode action");
        assert_eq!(action.dispatch_state, DispatchState::Pending);
        assert!(action.eta_label.is_empty());
    }

    #[test]
    fn pending_actions_skip_dispatched_ones() {
        let mut record = bare_record(vec!["Scrap rate".to_owned()]);
        record.actions = ["audit", "retrain", "recalibrate"]
            .into_iter()
            .map(|id| Action {
                id: ActionId::new(id),
                title: format!("Run {id}"),
                kind: ActionKind::Workflow,
                priority: Priority::Low,
                eta_label: String::new(),
                dispatch_state: DispatchState::Pending,
            })
            .collect();
        record.actions[1].dispatch_state = DispatchState::Dispatched;

        let pending: Vec<_> = record
            .pending_actions()
            .map(|action| action.id.as_str())
            .collect();
        assert_eq!(pending, vec!["audit", "recalibrate"]);
    }
}
