// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use opsdeck_app::{
    Action, ActionId, ActionKind, AlertClass, AlertRecord, AlertStatus, DispatchState, Insight,
    KpiRecord, KpiStatus, MetricReading, Priority, Record, RecordId, Severity,
};
use time::macros::datetime;
use time::{Duration, OffsetDateTime};

use crate::SnapshotFile;

const DEMO_GENERATED_AT: OffsetDateTime = datetime!(2026-10-19 08:00 UTC);

fn action(
    id: &str,
    title: &str,
    kind: ActionKind,
    priority: Priority,
    eta_label: &str,
) -> Action {
    Action {
        id: ActionId::new(id),
        title: title.to_owned(),
        kind,
        priority,
        eta_label: eta_label.to_owned(),
        dispatch_state: DispatchState::Pending,
    }
}

fn insight(root_cause: &str, impact: &str, recommendation: &str, confidence: f64) -> Insight {
    Insight {
        root_cause: root_cause.to_owned(),
        impact: impact.to_owned(),
        recommendation: recommendation.to_owned(),
        confidence_score: confidence,
    }
}

struct AlertSeed {
    id: &'static str,
    severity: Severity,
    status: AlertStatus,
    category: &'static str,
    title: &'static str,
    description: &'static str,
    location: &'static str,
    assignee: Option<&'static str>,
    minutes_ago: i64,
}

fn alert(seed: AlertSeed, insight: Option<Insight>, actions: Vec<Action>) -> AlertRecord {
    Record {
        id: RecordId::new(seed.id),
        classification: AlertClass {
            severity: seed.severity,
            status: seed.status,
        },
        category: seed.category.to_owned(),
        tags: vec![seed.location.to_ascii_lowercase().replace(' ', "-")],
        text_fields: vec![
            seed.title.to_owned(),
            seed.description.to_owned(),
            seed.location.to_owned(),
        ],
        assignee: seed.assignee.map(str::to_owned),
        insight,
        actions,
        observed_at: Some(DEMO_GENERATED_AT - Duration::minutes(seed.minutes_ago)),
        reading: None,
    }
}

#[allow(clippy::too_many_arguments)]
fn kpi(
    id: &str,
    status: KpiStatus,
    category: &str,
    name: &str,
    value: f64,
    target: f64,
    unit: &str,
    trend: &[f64],
    insight: Option<Insight>,
    actions: Vec<Action>,
) -> KpiRecord {
    Record {
        id: RecordId::new(id),
        classification: status,
        category: category.to_owned(),
        tags: Vec::new(),
        text_fields: vec![name.to_owned()],
        assignee: None,
        insight,
        actions,
        observed_at: Some(DEMO_GENERATED_AT),
        reading: Some(MetricReading {
            value,
            target: Some(target),
            unit: unit.to_owned(),
            trend: trend.to_vec(),
        }),
    }
}

fn demo_alerts() -> Vec<AlertRecord> {
    vec![
        alert(
            AlertSeed {
                id: "A1",
                severity: Severity::Critical,
                status: AlertStatus::Active,
                category: "compressors",
                title: "Compressor C-3 vibration above threshold",
                description: "Overall velocity 11.2 mm/s against a 7.1 mm/s alarm limit",
                location: "Utility block",
                assignee: Some("Maintenance"),
                minutes_ago: 12,
            },
            Some(insight(
                "Outer race defect on the drive-end bearing",
                "Compressed air supply to lines 1-3 at risk within 48 h",
                "Replace drive-end bearing at next planned stop",
                91.0,
            )),
            vec![
                action(
                    "swap-bearing",
                    "Replace drive-end bearing",
                    ActionKind::Maintenance,
                    Priority::High,
                    "4 h",
                ),
                action(
                    "standby",
                    "Switch load to standby compressor C-4",
                    ActionKind::Control,
                    Priority::High,
                    "10 min",
                ),
            ],
        ),
        alert(
            AlertSeed {
                id: "A2",
                severity: Severity::High,
                status: AlertStatus::Acknowledged,
                category: "conveyors",
                title: "Conveyor B-12 motor current imbalance",
                description: "Phase B draws 18% more current than phases A and C",
                location: "Line 2",
                assignee: Some("Line 2 crew"),
                minutes_ago: 47,
            },
            Some(insight(
                "Loose terminal on phase B",
                "Motor overheating and unplanned stop",
                "Re-torque terminals and thermograph the junction box",
                68.0,
            )),
            vec![action(
                "electrician",
                "Open work order for electrician",
                ActionKind::Workflow,
                Priority::Medium,
                "next shift",
            )],
        ),
        alert(
            AlertSeed {
                id: "A3",
                severity: Severity::Medium,
                status: AlertStatus::Active,
                category: "boilers",
                title: "Boiler 2 feedwater pH drifting",
                description: "pH 8.1 and falling over the last six hours",
                location: "Utility block",
                assignee: None,
                minutes_ago: 95,
            },
            None,
            vec![action(
                "dosing",
                "Check chemical dosing pump",
                ActionKind::Maintenance,
                Priority::Medium,
                "1 h",
            )],
        ),
        alert(
            AlertSeed {
                id: "A4",
                severity: Severity::Medium,
                status: AlertStatus::Resolved,
                category: "packaging",
                title: "Labeler L-3 misfeeds",
                description: "Seven misfeeds in the last hour",
                location: "Line 3",
                assignee: Some("Line 3 crew"),
                minutes_ago: 240,
            },
            Some(insight(
                "Worn peel plate",
                "Rework of mislabeled cases",
                "Replace peel plate",
                57.0,
            )),
            Vec::new(),
        ),
        alert(
            AlertSeed {
                id: "A5",
                severity: Severity::Critical,
                status: AlertStatus::Active,
                category: "electrical",
                title: "Main switchboard phase voltage sag",
                description: "Phase L2 dipped to 88% nominal three times this shift",
                location: "North hall",
                assignee: None,
                minutes_ago: 5,
            },
            Some(insight(
                "Upstream utility disturbance coinciding with chiller start",
                "Drive trips across the north hall",
                "Stagger chiller starts and notify the utility",
                74.0,
            )),
            vec![
                action(
                    "stagger",
                    "Stagger chiller start sequence",
                    ActionKind::Control,
                    Priority::High,
                    "30 min",
                ),
                action(
                    "utility",
                    "Notify utility account manager",
                    ActionKind::Workflow,
                    Priority::Low,
                    "24 h",
                ),
            ],
        ),
    ]
}

fn demo_kpis() -> Vec<KpiRecord> {
    vec![
        kpi(
            "K1",
            KpiStatus::Warning,
            "availability",
            "Overall equipment effectiveness",
            71.5,
            80.0,
            "%",
            &[78.0, 77.2, 76.1, 74.8, 73.0, 72.4, 71.5],
            Some(insight(
                "Short stops on filler F-1",
                "About 340 cases per shift below plan",
                "Review filler jam log with the line 1 crew",
                82.0,
            )),
            vec![action(
                "jam-review",
                "Schedule jam log review",
                ActionKind::Workflow,
                Priority::Medium,
                "next shift",
            )],
        ),
        kpi(
            "K2",
            KpiStatus::Good,
            "quality",
            "First pass yield",
            98.4,
            97.5,
            "%",
            &[97.9, 98.1, 98.0, 98.3, 98.4],
            None,
            Vec::new(),
        ),
        kpi(
            "K3",
            KpiStatus::Critical,
            "energy",
            "Compressed air leakage",
            212.0,
            120.0,
            "m3/h",
            &[130.0, 151.0, 170.0, 188.0, 212.0],
            Some(insight(
                "Leaks on the line 2 distribution header",
                "Roughly 9 MWh per month of wasted compressor energy",
                "Run an ultrasonic leak survey on line 2",
                77.0,
            )),
            vec![
                action(
                    "survey",
                    "Run ultrasonic leak survey",
                    ActionKind::Maintenance,
                    Priority::High,
                    "2 h",
                ),
                action(
                    "pressure",
                    "Lower header pressure by 0.3 bar",
                    ActionKind::Control,
                    Priority::Medium,
                    "10 min",
                ),
            ],
        ),
    ]
}

/// Built-in snapshot used by `--demo` and as a format example.
pub fn demo_snapshot_file() -> SnapshotFile {
    SnapshotFile {
        version: crate::SNAPSHOT_VERSION,
        generated_at: Some(DEMO_GENERATED_AT),
        alerts: demo_alerts(),
        kpis: demo_kpis(),
    }
}
