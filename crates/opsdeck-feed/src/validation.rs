// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use opsdeck_app::{ActionId, Record, RecordId};

pub const MIN_CONFIDENCE: f64 = 0.0;
pub const MAX_CONFIDENCE: f64 = 100.0;

pub fn validate_snapshot_path(path: &str) -> Result<()> {
    if path.trim().is_empty() {
        bail!("snapshot path must not be empty");
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "snapshot path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("snapshot path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    Ok(())
}

/// Outcome of normalising one record on ingestion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub confidence_clamped: bool,
}

/// Trims identifiers and clamps the insight confidence into 0..=100.
/// Empty identifiers are rejected.
pub fn normalize_record<C>(record: &mut Record<C>) -> Result<NormalizeReport> {
    let record_id = record.id.as_str().trim();
    if record_id.is_empty() {
        bail!("record id must not be empty");
    }
    record.id = RecordId::new(record_id);

    for action in &mut record.actions {
        let action_id = action.id.as_str().trim();
        if action_id.is_empty() {
            bail!("record {} has an action with an empty id", record.id);
        }
        action.id = ActionId::new(action_id);
    }

    let mut report = NormalizeReport::default();
    if let Some(insight) = &mut record.insight {
        let score = insight.confidence_score;
        let clamped = if score.is_nan() {
            MIN_CONFIDENCE
        } else {
            score.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
        };
        if clamped.to_bits() != score.to_bits() {
            insight.confidence_score = clamped;
            report.confidence_clamped = true;
        }
    }

    Ok(report)
}
