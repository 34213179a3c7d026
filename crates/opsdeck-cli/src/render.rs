// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use opsdeck_app::{
    Classification, InsightView, MetricReading, Record, SelectionView, SessionEvent,
    StatusTransition,
};
use time::OffsetDateTime;

pub fn render_summary(summary: &[(&str, usize)]) -> String {
    summary
        .iter()
        .map(|(label, count)| format!("{label} {count}"))
        .collect::<Vec<_>>()
        .join(" | ")
}

pub fn render_record_line<C: Classification>(record: &Record<C>, now: OffsetDateTime) -> String {
    let pending = record.pending_actions().count();
    let mut line = format!(
        "{:<6} [{}] {:<14} {}",
        record.id.as_str(),
        record.classification.filter_labels().join("/"),
        record.category,
        record.title(),
    );
    if let Some(reading) = &record.reading {
        line.push_str(&format!("  {}", render_reading(reading)));
    }
    if let Some(observed_at) = record.observed_at {
        line.push_str(&format!("  {}", format_age(observed_at, now)));
    }
    if !record.actions.is_empty() {
        line.push_str(&format!(
            "  ({} actions, {pending} pending)",
            record.actions.len()
        ));
    }
    line
}

pub fn render_reading(reading: &MetricReading) -> String {
    let mut text = format!("{} {}", format_value(reading.value), reading.unit);
    if let Some(target) = reading.target {
        text.push_str(&format!(" (target {} {})", format_value(target), reading.unit));
    }
    if let (Some(first), Some(last)) = (reading.trend.first(), reading.trend.last())
        && reading.trend.len() > 1
    {
        let direction = if last > first {
            "rising"
        } else if last < first {
            "falling"
        } else {
            "flat"
        };
        text.push_str(&format!(", {direction}"));
    }
    text
}

pub fn render_selection<C: Classification>(
    view: Option<SelectionView<'_, C>>,
    insight: Option<&InsightView>,
    now: OffsetDateTime,
) -> String {
    let Some(view) = view else {
        return "no record selected".to_owned();
    };

    let record = view.record;
    let mut lines = vec![render_record_line(record, now)];
    if !view.visible {
        lines.push("  (hidden by current filters)".to_owned());
    }
    for field in record.text_fields.iter().skip(1) {
        lines.push(format!("  {field}"));
    }
    lines.push(format!(
        "  assignee: {}",
        record.assignee.as_deref().unwrap_or("unassigned")
    ));

    match insight {
        Some(insight) => {
            lines.push(format!(
                "  insight ({}%, {}):",
                insight.confidence_percent,
                insight.confidence_band.label()
            ));
            lines.push(format!("    root cause: {}", insight.root_cause));
            lines.push(format!("    impact: {}", insight.impact));
            lines.push(format!("    recommendation: {}", insight.recommendation));
        }
        None => lines.push("  no diagnostic insight".to_owned()),
    }

    for action in &record.actions {
        lines.push(format!(
            "  - {} {} [{}, {}] eta {} ({})",
            action.id.as_str(),
            action.title,
            action.kind.as_str(),
            action.priority.as_str(),
            if action.eta_label.is_empty() {
                "n/a"
            } else {
                action.eta_label.as_str()
            },
            action.dispatch_state.as_str(),
        ));
    }
    lines.join("\n")
}

pub fn render_event(event: &SessionEvent) -> String {
    match event {
        SessionEvent::CriteriaChanged(criteria) => format!(
            "filters: classification={} category={} search={:?}",
            criteria.classification, criteria.category, criteria.search_text
        ),
        SessionEvent::SelectionChanged(Some(record_id)) => format!("selected {record_id}"),
        SessionEvent::SelectionChanged(None) => "selection cleared".to_owned(),
        SessionEvent::ActionDispatched(confirmation) => format!(
            "dispatched {} [{}, {} priority] to {} (eta {}) for {}: {}",
            confirmation.action_title,
            confirmation.kind.as_str(),
            confirmation.priority.as_str(),
            confirmation.target,
            confirmation.eta_label,
            confirmation.record_id,
            confirmation.record_title,
        ),
        SessionEvent::DispatchRepeated(confirmation) => format!(
            "already dispatched {} to {}",
            confirmation.action_title, confirmation.target
        ),
        SessionEvent::StatusChanged(change) if change.changed() => format!(
            "{} {} -> {}",
            change.record_id,
            change.from.as_str(),
            change.to.as_str()
        ),
        SessionEvent::StatusChanged(change) => {
            let verb = match change.transition {
                StatusTransition::Acknowledge => "acknowledge",
                StatusTransition::Resolve => "resolve",
            };
            format!(
                "{} already {}; {verb} ignored",
                change.record_id,
                change.from.as_str()
            )
        }
    }
}

pub fn format_age(observed_at: OffsetDateTime, now: OffsetDateTime) -> String {
    let minutes = (now - observed_at).whole_minutes();
    if minutes < 1 {
        "just now".to_owned()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if minutes < 24 * 60 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / (24 * 60))
    }
}

fn format_value(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::{format_age, render_event, render_reading, render_summary};
    use opsdeck_app::{
        ActionId, ActionKind, AlertStatus, DispatchConfirmation, MetricReading, Priority,
        RecordId, SessionEvent, StatusChange, StatusTransition,
    };
    use time::Duration;
    use time::macros::datetime;

    #[test]
    fn summary_joins_counts() {
        assert_eq!(
            render_summary(&[("critical", 2), ("high", 0)]),
            "critical 2 | high 0"
        );
    }

    #[test]
    fn ages_scale_with_distance() {
        let now = datetime!(2026-10-19 08:00 UTC);
        assert_eq!(format_age(now, now), "just now");
        assert_eq!(format_age(now - Duration::minutes(12), now), "12m ago");
        assert_eq!(format_age(now - Duration::hours(5), now), "5h ago");
        assert_eq!(format_age(now - Duration::days(3), now), "3d ago");
    }

    #[test]
    fn reading_shows_target_and_direction() {
        let reading = MetricReading {
            value: 71.5,
            target: Some(80.0),
            unit: "%".to_owned(),
            trend: vec![78.0, 74.0, 71.5],
        };
        assert_eq!(render_reading(&reading), "71.5 % (target 80 %), falling");
    }

    #[test]
    fn dispatch_events_name_target() {
        let confirmation = DispatchConfirmation {
            record_id: RecordId::new("A1"),
            record_title: "Compressor C-3 vibration".to_owned(),
            action_id: ActionId::new("standby"),
            action_title: "Switch to standby".to_owned(),
            kind: ActionKind::Control,
            priority: Priority::High,
            eta_label: "10 min".to_owned(),
            target: "Maintenance".to_owned(),
        };
        assert_eq!(
            render_event(&SessionEvent::ActionDispatched(confirmation.clone())),
            "dispatched Switch to standby [control, high priority] to Maintenance (eta 10 min) for A1: Compressor C-3 vibration"
        );
        assert_eq!(
            render_event(&SessionEvent::DispatchRepeated(confirmation)),
            "already dispatched Switch to standby to Maintenance"
        );
    }

    #[test]
    fn ignored_status_change_is_explained() {
        let change = StatusChange {
            record_id: RecordId::new("A4"),
            transition: StatusTransition::Acknowledge,
            from: AlertStatus::Resolved,
            to: AlertStatus::Resolved,
        };
        assert_eq!(
            render_event(&SessionEvent::StatusChanged(change)),
            "A4 already resolved; acknowledge ignored"
        );
    }
}
