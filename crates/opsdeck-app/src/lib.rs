// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod dispatch;
pub mod error;
pub mod filter;
pub mod ids;
pub mod insight;
pub mod model;
pub mod selection;
pub mod state;
pub mod store;

pub use dispatch::*;
pub use error::*;
pub use filter::{Criteria, MATCH_ALL};
pub use ids::*;
pub use insight::{ConfidenceBand, InsightView};
pub use model::*;
pub use selection::*;
pub use state::*;
pub use store::*;
