// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use opsdeck_app::{
    Action, ActionId, ActionKind, AlertClass, AlertRecord, AlertStatus, DispatchState, Insight,
    KpiRecord, KpiStatus, MetricReading, Priority, Record, RecordId, Severity,
};
use time::{Duration, OffsetDateTime};

const ALERT_CATEGORIES: [&str; 6] = [
    "compressors",
    "conveyors",
    "boilers",
    "packaging",
    "chillers",
    "electrical",
];

const KPI_CATEGORIES: [&str; 4] = ["availability", "quality", "energy", "throughput"];

const ASSETS: [&str; 12] = [
    "Compressor C-3",
    "Conveyor B-12",
    "Boiler 2",
    "Filler F-1",
    "Chiller CH-4",
    "Main switchboard",
    "Palletizer P-2",
    "Pump P-101",
    "Cooling tower CT-1",
    "Mixer M-7",
    "Labeler L-3",
    "Air dryer AD-2",
];

const SYMPTOMS: [&str; 10] = [
    "vibration above threshold",
    "bearing temperature rising",
    "discharge pressure low",
    "motor current imbalance",
    "unplanned stop",
    "flow rate drifting",
    "seal leak detected",
    "cycle time degraded",
    "phase voltage sag",
    "condensate backing up",
];

const LOCATIONS: [&str; 8] = [
    "North hall",
    "South hall",
    "Utility block",
    "Line 1",
    "Line 2",
    "Line 3",
    "Warehouse dock",
    "Roof plant",
];

const KPI_NAMES: [(&str, &str); 8] = [
    ("Overall equipment effectiveness", "%"),
    ("First pass yield", "%"),
    ("Energy per unit", "kWh"),
    ("Units per hour", "u/h"),
    ("Scrap rate", "%"),
    ("Mean time between failures", "h"),
    ("Changeover time", "min"),
    ("Compressed air leakage", "m3/h"),
];

const ACTION_TEMPLATES: [(&str, ActionKind); 8] = [
    ("Inspect and lubricate bearings", ActionKind::Maintenance),
    ("Replace worn seal kit", ActionKind::Maintenance),
    ("Open work order for electrician", ActionKind::Workflow),
    ("Escalate to reliability engineer", ActionKind::Workflow),
    ("Reduce line speed by 10%", ActionKind::Control),
    ("Switch to standby unit", ActionKind::Control),
    ("Recalibrate flow sensor", ActionKind::Maintenance),
    ("Notify shift supervisor", ActionKind::Workflow),
];

const ETA_LABELS: [&str; 6] = ["10 min", "30 min", "1 h", "2 h", "next shift", "24 h"];

const TEAMS: [&str; 5] = [
    "Line 1 crew",
    "Line 2 crew",
    "Maintenance",
    "Utilities",
    "Reliability",
];

const SEVERITIES: [Severity; 4] = Severity::ALL;
const ALERT_STATUSES: [AlertStatus; 3] = AlertStatus::ALL;
const KPI_STATUSES: [KpiStatus; 3] = KpiStatus::ALL;
const PRIORITIES: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

const REFERENCE_UNIX: i64 = 1_792_800_000;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        self.next_u64() & 1 == 1
    }
}

pub fn reference_now() -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(REFERENCE_UNIX).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}

pub fn alert_categories() -> &'static [&'static str] {
    &ALERT_CATEGORIES
}

pub fn kpi_categories() -> &'static [&'static str] {
    &KPI_CATEGORIES
}

/// Seeded generator for alert and KPI records. The same seed always yields
/// the same records, and ids are unique within one faker.
#[derive(Debug, Clone)]
pub struct OpsFaker {
    rng: DeterministicRng,
    seed: u64,
    next_alert: usize,
    next_kpi: usize,
}

impl OpsFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
            next_alert: 1,
            next_kpi: 1,
        }
    }

    pub const fn seed(&self) -> u64 {
        self.seed
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn alert(&mut self) -> AlertRecord {
        let id = RecordId::new(format!("A{}", self.next_alert));
        self.next_alert += 1;

        let asset = self.pick(&ASSETS);
        let symptom = self.pick(&SYMPTOMS);
        let location = self.pick(&LOCATIONS);
        let category = self.pick(&ALERT_CATEGORIES);
        let classification = AlertClass {
            severity: *self.pick(&SEVERITIES),
            status: *self.pick(&ALERT_STATUSES),
        };

        Record {
            id,
            classification,
            category: (*category).to_owned(),
            tags: vec![location.to_ascii_lowercase().replace(' ', "-")],
            text_fields: vec![
                format!("{asset} {symptom}"),
                format!("{asset} reported {symptom} during the last polling window"),
                (*location).to_owned(),
            ],
            assignee: self.maybe_team(),
            insight: self.maybe_insight(asset),
            actions: self.actions(),
            observed_at: Some(self.observed_at()),
            reading: None,
        }
    }

    pub fn kpi(&mut self) -> KpiRecord {
        let id = RecordId::new(format!("K{}", self.next_kpi));
        self.next_kpi += 1;

        let (name, unit) = *self.pick(&KPI_NAMES);
        let category = self.pick(&KPI_CATEGORIES);
        let location = self.pick(&LOCATIONS);
        let target = (self.rng.int_n(900) + 100) as f64;
        let value = target * (0.6 + (self.rng.int_n(60) as f64) / 100.0);
        let trend = (0..8)
            .map(|step| value * (0.9 + (step as f64) * 0.02))
            .collect();

        Record {
            id,
            classification: *self.pick(&KPI_STATUSES),
            category: (*category).to_owned(),
            tags: Vec::new(),
            text_fields: vec![name.to_owned(), (*location).to_owned()],
            assignee: self.maybe_team(),
            insight: self.maybe_insight(name),
            actions: self.actions(),
            observed_at: Some(self.observed_at()),
            reading: Some(MetricReading {
                value,
                target: Some(target),
                unit: unit.to_owned(),
                trend,
            }),
        }
    }

    pub fn alerts(&mut self, count: usize) -> Vec<AlertRecord> {
        (0..count).map(|_| self.alert()).collect()
    }

    pub fn kpis(&mut self, count: usize) -> Vec<KpiRecord> {
        (0..count).map(|_| self.kpi()).collect()
    }

    /// Between one and three actions with record-local ids.
    pub fn actions(&mut self) -> Vec<Action> {
        let count = self.rng.int_n(3) + 1;
        (0..count)
            .map(|index| {
                let (title, kind) = *self.pick(&ACTION_TEMPLATES);
                Action {
                    id: ActionId::new(format!("act-{}", index + 1)),
                    title: title.to_owned(),
                    kind,
                    priority: *self.pick(&PRIORITIES),
                    eta_label: (*self.pick(&ETA_LABELS)).to_owned(),
                    dispatch_state: DispatchState::Pending,
                }
            })
            .collect()
    }

    fn maybe_team(&mut self) -> Option<String> {
        if self.rng.bool() {
            Some((*self.pick(&TEAMS)).to_owned())
        } else {
            None
        }
    }

    fn maybe_insight(&mut self, subject: &str) -> Option<Insight> {
        if self.rng.int_n(4) == 0 {
            return None;
        }
        let symptom = self.pick(&SYMPTOMS);
        Some(Insight {
            root_cause: format!("{subject}: {symptom}"),
            impact: format!("Estimated {}% output loss", self.rng.int_n(12) + 1),
            recommendation: (*self.pick(&ACTION_TEMPLATES)).0.to_owned(),
            confidence_score: (self.rng.int_n(101)) as f64,
        })
    }

    fn observed_at(&mut self) -> OffsetDateTime {
        let minutes = self.rng.int_n(24 * 60) as i64;
        reference_now() - Duration::minutes(minutes)
    }

    fn pick<'a, T>(&mut self, values: &'a [T]) -> &'a T {
        &values[self.rng.int_n(values.len())]
    }
}
