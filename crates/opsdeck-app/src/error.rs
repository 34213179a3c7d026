// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{ActionId, RecordId};

/// Caller errors raised by the review engine. Redundant transitions are
/// reported through return values and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("record not found: {record_id}")]
    RecordNotFound { record_id: RecordId },

    #[error("action not found: {record_id}/{action_id}")]
    ActionNotFound {
        record_id: RecordId,
        action_id: ActionId,
    },

    #[error("duplicate record id {record_id} in snapshot")]
    DuplicateRecordId { record_id: RecordId },

    #[error("duplicate action id {action_id} on record {record_id}")]
    DuplicateActionId {
        record_id: RecordId,
        action_id: ActionId,
    },
}

impl CoreError {
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::RecordNotFound { .. } | Self::ActionNotFound { .. }
        )
    }
}

pub type CoreResult<T> = std::result::Result<T, CoreError>;
