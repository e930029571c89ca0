// 8.0.2: result types and errors for trade evaluation.

use crate::cap::TeamCap;
use crate::config::ConfigError;
use crate::contract::ContractSnapshot;
use crate::fines::FinesTable;
use crate::ledger::SkippedRecord;
use crate::proposal::TradeProposal;
use crate::resolver::{AssetMove, ResolvedFlow, UnresolvedAsset};
use crate::simulator::TeamImpact;
use crate::types::{BudgetYear, TeamId};
use crate::validation::{Advisory, ValidationState, Violation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything one evaluation needs, as a single serializable value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub snapshot: ContractSnapshot,
    #[serde(default)]
    pub fines: FinesTable,
    pub proposal: TradeProposal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub state: ValidationState,
    pub teams: BTreeMap<TeamId, TeamImpact>,
    pub violations: Vec<Violation>,
    pub advisories: Vec<Advisory>,
    pub flows: Vec<ResolvedFlow>,
    pub moves: Vec<AssetMove>,
    pub unresolved: Vec<UnresolvedAsset>,
    pub skipped_records: Vec<SkippedRecord>,
    /// League year that Y1 refers to, when the snapshot was dated.
    pub season: Option<i32>,
}

impl ValidationResult {
    /// Cap numbers are only meaningful once every asset has a destination.
    pub fn is_authoritative(&self) -> bool {
        self.state != ValidationState::Incomplete
    }

    pub fn team(&self, team: &TeamId) -> Option<&TeamImpact> {
        self.teams.get(team)
    }

    pub fn before(&self, team: &TeamId) -> Option<&TeamCap> {
        self.team(team).map(|t| &t.before)
    }

    pub fn after(&self, team: &TeamId) -> Option<&TeamCap> {
        self.team(team).map(|t| &t.after)
    }

    pub fn flow(&self, team: &TeamId) -> Option<&ResolvedFlow> {
        self.flows.iter().find(|f| &f.team == team)
    }

    pub fn violations_for<'a>(&'a self, team: &'a TeamId) -> impl Iterator<Item = &'a Violation> {
        self.violations.iter().filter(move |v| v.team.as_ref() == Some(team))
    }

    pub fn year_label(&self, year: BudgetYear) -> String {
        match self.season {
            Some(season) => format!("{year} ({})", season + year.index() as i32),
            None => year.to_string(),
        }
    }

    /// One line per violation, ready to show to a user.
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum EngineError {
    #[error("Proposal has no parties")]
    EmptyProposal,

    #[error("Contract snapshot is empty")]
    EmptySnapshot,

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
