// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{Classification, Record};

/// Sentinel that disables the classification and category tests.
pub const MATCH_ALL: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    pub classification: String,
    pub category: String,
    pub search_text: String,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            classification: MATCH_ALL.to_owned(),
            category: MATCH_ALL.to_owned(),
            search_text: String::new(),
        }
    }
}

impl Criteria {
    pub fn is_unfiltered(&self) -> bool {
        self.classification == MATCH_ALL
            && self.category == MATCH_ALL
            && self.search_text.is_empty()
    }

    pub fn matches<C: Classification>(&self, record: &Record<C>) -> bool {
        self.matches_with_query(record, &self.search_text.to_lowercase())
    }

    fn matches_with_query<C: Classification>(&self, record: &Record<C>, query: &str) -> bool {
        if self.classification != MATCH_ALL
            && !record.classification.matches_label(&self.classification)
        {
            return false;
        }
        if self.category != MATCH_ALL && !record.in_category(&self.category) {
            return false;
        }
        query.is_empty()
            || record
                .text_fields
                .iter()
                .any(|field| field.to_lowercase().contains(query))
    }
}

/// Records passing every active criterion, in their original order.
pub fn apply<'a, C, I>(records: I, criteria: &Criteria) -> Vec<&'a Record<C>>
where
    C: Classification + 'a,
    I: IntoIterator<Item = &'a Record<C>>,
{
    let query = criteria.search_text.to_lowercase();
    records
        .into_iter()
        .filter(|record| criteria.matches_with_query(record, &query))
        .collect()
}
