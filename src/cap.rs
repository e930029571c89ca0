//! Salary cap calculation.
//!
//! A team's cap position for one budget year is the league-wide total minus
//! active salary, dead money, and fines. The calculator works on any row set,
//! not just a team's real rows, which is what lets the simulator compare a
//! before and an after picture of the same team.
//!
//! Remaining may go negative. That is the signal of an illegal position, not
//! an error.

use crate::contract::Contract;
use crate::fines::FinesTable;
use crate::types::{Amount, BudgetYear, TeamId, YearAmounts};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapParams {
    pub total_cap: Amount,
    /// Year-one headroom below this is flagged as close to the cap.
    pub near_cap_threshold: Amount,
}

impl Default for CapParams {
    fn default() -> Self {
        Self {
            total_cap: Amount::new(dec!(300)),
            near_cap_threshold: Amount::new(dec!(50)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCap {
    pub year: BudgetYear,
    pub total: Amount,
    pub active: Amount,
    pub dead: Amount,
    pub fines: Amount,
    pub remaining: Amount,
}

impl YearCap {
    fn empty(year: BudgetYear, total: Amount) -> Self {
        Self {
            year,
            total,
            active: Amount::zero(),
            dead: Amount::zero(),
            fines: Amount::zero(),
            remaining: total,
        }
    }

    pub fn used(&self) -> Amount {
        self.active.add(self.dead).add(self.fines)
    }
}

/// Four-year cap picture for one team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamCap {
    pub team: TeamId,
    pub years: [YearCap; 4],
}

impl TeamCap {
    pub fn year(&self, year: BudgetYear) -> &YearCap {
        &self.years[year.index()]
    }

    pub fn remaining(&self, year: BudgetYear) -> Amount {
        self.year(year).remaining
    }

    pub fn remaining_by_year(&self) -> YearAmounts {
        YearAmounts::new(self.years.map(|y| y.remaining))
    }

    pub fn is_over_cap(&self, year: BudgetYear) -> bool {
        self.remaining(year).is_negative()
    }
}

pub fn calculate_team_cap(
    team: &TeamId,
    contracts: &[&Contract],
    fines: &FinesTable,
    params: &CapParams,
) -> TeamCap {
    let team_fines = fines.for_team(team);

    let years = BudgetYear::ALL.map(|year| {
        let mut cap = YearCap::empty(year, params.total_cap);
        cap.active = contracts.iter().map(|c| c.active_charge(year)).sum();
        cap.dead = contracts.iter().map(|c| c.dead_charge(year)).sum();
        cap.fines = team_fines.get(year);
        cap.remaining = cap.total.sub(cap.used());
        cap
    });

    TeamCap {
        team: team.clone(),
        years,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapStatus {
    Clear,
    NearCap,
    OverCap,
}

pub fn evaluate_cap_status(remaining: Amount, params: &CapParams) -> CapStatus {
    if remaining.is_negative() {
        CapStatus::OverCap
    } else if remaining < params.near_cap_threshold {
        CapStatus::NearCap
    } else {
        CapStatus::Clear
    }
}
