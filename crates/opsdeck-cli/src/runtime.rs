// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::render;
use anyhow::{Result, bail};
use opsdeck_app::{
    ActionId, Classification, CoreResult, RecordId, Session, SessionCommand, SessionEvent,
};
use opsdeck_feed::Snapshot;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Board {
    #[default]
    Alerts,
    Kpis,
}

impl Board {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alerts => "alerts",
            Self::Kpis => "kpis",
        }
    }
}

/// One step of a review turn, kept in the order the operator gave it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewStep {
    Command(SessionCommand),
    Acknowledge(RecordId),
    Resolve(RecordId),
}

impl ReviewStep {
    fn changes_status(&self) -> bool {
        matches!(self, Self::Acknowledge(_) | Self::Resolve(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewScript {
    pub board: Board,
    pub steps: Vec<ReviewStep>,
}

impl ReviewScript {
    pub fn push(&mut self, step: ReviewStep) {
        self.steps.push(step);
    }

    pub fn push_command(&mut self, command: SessionCommand) {
        self.push(ReviewStep::Command(command));
    }

    pub fn changes_status(&self) -> bool {
        self.steps.iter().any(ReviewStep::changes_status)
    }
}

/// Accepts `<record>/<action>`.
pub fn parse_dispatch_target(value: &str) -> Result<(RecordId, ActionId)> {
    let Some((record, action)) = value.split_once('/') else {
        bail!("--dispatch expects <record>/<action>, got {value:?}");
    };
    let (record, action) = (record.trim(), action.trim());
    if record.is_empty() || action.is_empty() {
        bail!("--dispatch expects <record>/<action>, got {value:?}");
    }
    Ok((RecordId::new(record), ActionId::new(action)))
}

pub fn run_review(snapshot: Snapshot, script: &ReviewScript, default_team: &str) -> Result<String> {
    let now = snapshot.generated_at.unwrap_or_else(OffsetDateTime::now_utc);
    let mut log = Vec::new();

    match script.board {
        Board::Alerts => {
            let mut session = Session::new(snapshot.alerts).with_default_team(default_team);
            for step in &script.steps {
                let outcome = match step {
                    ReviewStep::Command(command) => session.apply(command.clone()),
                    ReviewStep::Acknowledge(record_id) => session.acknowledge(record_id),
                    ReviewStep::Resolve(record_id) => session.resolve(record_id),
                };
                record_outcome(outcome, &mut log)?;
            }
            Ok(render_report(&session, script.board, &log, now))
        }
        Board::Kpis => {
            if script.changes_status() {
                bail!("kpi records have no status to acknowledge or resolve");
            }
            let mut session = Session::new(snapshot.kpis).with_default_team(default_team);
            for step in &script.steps {
                if let ReviewStep::Command(command) = step {
                    record_outcome(session.apply(command.clone()), &mut log)?;
                }
            }
            Ok(render_report(&session, script.board, &log, now))
        }
    }
}

// Unknown ids are reported inline and the turn carries on.
fn record_outcome(outcome: CoreResult<Vec<SessionEvent>>, log: &mut Vec<String>) -> Result<()> {
    match outcome {
        Ok(events) => {
            log.extend(events.iter().map(render::render_event));
            Ok(())
        }
        Err(error) if error.is_not_found() => {
            tracing::warn!(%error, "review command skipped");
            log.push(format!("error: {error}"));
            Ok(())
        }
        Err(error) => Err(error.into()),
    }
}

fn render_report<C: Classification>(
    session: &Session<C>,
    board: Board,
    log: &[String],
    now: OffsetDateTime,
) -> String {
    let filtered = session.filtered();
    let mut out = vec![
        format!(
            "{}: {}",
            board.as_str(),
            render::render_summary(&session.summary())
        ),
        format!(
            "showing {} of {} ({}={}, category={}, search={:?})",
            filtered.len(),
            session.store().len(),
            match board {
                Board::Alerts => "alert",
                Board::Kpis => "status",
            },
            session.criteria().classification,
            session.criteria().category,
            session.criteria().search_text,
        ),
    ];
    out.extend(
        filtered
            .iter()
            .map(|record| format!("  {}", render::render_record_line(record, now))),
    );

    out.push(String::new());
    let insight = session.insight_view();
    match (session.selection().selected_id(), session.selected_view()) {
        (Some(record_id), None) => {
            out.push(format!("selected {record_id} is not in this snapshot"));
        }
        (_, view) => out.push(render::render_selection(view, insight.as_ref(), now)),
    }

    if !log.is_empty() {
        out.push(String::new());
        out.push("events:".to_owned());
        out.extend(log.iter().map(|line| format!("  {line}")));
    }

    let mut report = out.join("\n");
    report.push('\n');
    report
}
