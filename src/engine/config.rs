//! Engine configuration options.

use crate::config::LeagueConfig;
use serde::{Deserialize, Serialize};

/// Engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cap size and near-cap buffer.
    #[serde(default)]
    pub league: LeagueConfig,
    /// Log every violation at info level, not just the verdict.
    #[serde(default)]
    pub verbose: bool,
}

impl EngineConfig {
    pub fn new(league: LeagueConfig) -> Self {
        Self { league, verbose: false }
    }
}
