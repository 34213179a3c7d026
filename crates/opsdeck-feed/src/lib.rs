// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

mod demo;
mod validation;

pub use demo::demo_snapshot_file;
pub use validation::{
    MAX_CONFIDENCE, MIN_CONFIDENCE, NormalizeReport, normalize_record, validate_snapshot_path,
};

use anyhow::{Context, Result, anyhow, bail};
use opsdeck_app::{AlertClass, AlertRecord, KpiRecord, KpiStatus, Record, RecordStore};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;

pub const APP_NAME: &str = "opsdeck";
pub const SNAPSHOT_VERSION: u64 = 1;
pub const SNAPSHOT_PATH_ENV: &str = "OPSDECK_SNAPSHOT_PATH";

/// On-disk snapshot as produced by the upstream exporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotFile {
    pub version: u64,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub generated_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub alerts: Vec<AlertRecord>,
    #[serde(default)]
    pub kpis: Vec<KpiRecord>,
}

/// Validated snapshot ready to back review sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub generated_at: Option<OffsetDateTime>,
    pub alerts: RecordStore<AlertClass>,
    pub kpis: RecordStore<KpiStatus>,
}

impl Snapshot {
    pub fn demo() -> Result<Self> {
        ingest(demo_snapshot_file())
    }
}

pub fn default_snapshot_path() -> Result<PathBuf> {
    if let Some(override_path) = env::var_os(SNAPSHOT_PATH_ENV) {
        return Ok(PathBuf::from(override_path));
    }

    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set {SNAPSHOT_PATH_ENV} to a snapshot file")
    })?;
    Ok(data_root.join(APP_NAME).join("snapshot.json"))
}

pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("read snapshot file {}", path.display()))?;
    let snapshot = parse_snapshot(&raw).with_context(|| format!("load snapshot {}", path.display()))?;
    tracing::info!(
        path = %path.display(),
        alerts = snapshot.alerts.len(),
        kpis = snapshot.kpis.len(),
        "snapshot loaded"
    );
    Ok(snapshot)
}

pub fn parse_snapshot(raw: &str) -> Result<Snapshot> {
    let value: serde_json::Value = serde_json::from_str(raw).context("parse snapshot JSON")?;

    let version = value
        .get("version")
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| {
            anyhow!("snapshot is not versioned; add `\"version\": {SNAPSHOT_VERSION}` at the top level")
        })?;
    if version != SNAPSHOT_VERSION {
        bail!("unsupported snapshot version {version}; expected {SNAPSHOT_VERSION}");
    }

    let file: SnapshotFile = serde_json::from_value(value).context("decode snapshot records")?;
    ingest(file)
}

pub fn ingest(file: SnapshotFile) -> Result<Snapshot> {
    if file.version != SNAPSHOT_VERSION {
        bail!(
            "unsupported snapshot version {}; expected {SNAPSHOT_VERSION}",
            file.version
        );
    }

    let alerts = build_store(file.alerts, "alerts")?;
    let kpis = build_store(file.kpis, "kpis")?;
    Ok(Snapshot {
        generated_at: file.generated_at,
        alerts,
        kpis,
    })
}

pub fn export_snapshot(file: &SnapshotFile) -> Result<String> {
    serde_json::to_string_pretty(file).context("encode snapshot JSON")
}

fn build_store<C>(mut records: Vec<Record<C>>, section: &str) -> Result<RecordStore<C>> {
    for (index, record) in records.iter_mut().enumerate() {
        let report = normalize_record(record)
            .with_context(|| format!("{section}[{index}] failed validation"))?;
        if report.confidence_clamped {
            tracing::warn!(
                section,
                record = %record.id,
                "insight confidence outside 0..=100; clamped"
            );
        }
    }
    RecordStore::new(records).with_context(|| format!("invalid {section} section"))
}
