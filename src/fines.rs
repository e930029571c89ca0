// 3.1 fines.rs: league penalty ledger keyed by team. a team with no entry owes nothing.
// negative fines pass through untouched; the provider is expected to send non-negative values.

use crate::types::{Amount, BudgetYear, TeamId, YearAmounts};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FinesTable {
    by_team: HashMap<TeamId, YearAmounts>,
}

impl FinesTable {
    pub fn new() -> Self {
        Self::default()
    }

    // later entries for the same team replace earlier ones
    pub fn insert(&mut self, team: impl Into<TeamId>, fines: YearAmounts) {
        self.by_team.insert(team.into(), fines);
    }

    pub fn with(mut self, team: impl Into<TeamId>, fines: YearAmounts) -> Self {
        self.insert(team, fines);
        self
    }

    pub fn for_team(&self, team: &TeamId) -> YearAmounts {
        self.by_team.get(team).copied().unwrap_or_default()
    }

    pub fn get(&self, team: &TeamId, year: BudgetYear) -> Amount {
        self.for_team(team).get(year)
    }

    pub fn len(&self) -> usize {
        self.by_team.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_team.is_empty()
    }
}

impl FromIterator<(TeamId, YearAmounts)> for FinesTable {
    fn from_iter<I: IntoIterator<Item = (TeamId, YearAmounts)>>(iter: I) -> Self {
        Self {
            by_team: iter.into_iter().collect(),
        }
    }
}
