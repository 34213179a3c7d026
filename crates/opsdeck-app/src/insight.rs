// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceBand {
    High,
    Medium,
    Low,
}

impl ConfidenceBand {
    pub const fn for_percent(percent: u8) -> Self {
        if percent >= 80 {
            Self::High
        } else if percent >= 50 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "high confidence",
            Self::Medium => "medium confidence",
            Self::Low => "low confidence",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsightView {
    pub root_cause: String,
    pub impact: String,
    pub recommendation: String,
    pub confidence_percent: u8,
    pub confidence_band: ConfidenceBand,
}

pub fn present<C>(record: &Record<C>) -> Option<InsightView> {
    let insight = record.insight.as_ref()?;
    let confidence_percent = clamp_confidence(insight.confidence_score);
    Some(InsightView {
        root_cause: insight.root_cause.clone(),
        impact: insight.impact.clone(),
        recommendation: insight.recommendation.clone(),
        confidence_percent,
        confidence_band: ConfidenceBand::for_percent(confidence_percent),
    })
}

/// Rounds to a whole percentage inside 0..=100. NaN reads as zero.
pub fn clamp_confidence(score: f64) -> u8 {
    if score.is_nan() {
        return 0;
    }
    score.round().clamp(0.0, 100.0) as u8
}
