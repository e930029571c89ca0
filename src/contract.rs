//! Contract and draft-pick records.
//!
//! A contract is one row of a team's financial obligations: per-year active
//! salary plus per-year dead money. Rows are immutable inputs. The engine
//! builds hypothetical row sets from them but never edits a row in place.

use crate::types::{Amount, BudgetYear, ContractId, PickId, TeamId, YearAmounts};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractStatus {
    Active,
    /// Released or traded away. Only dead money remains.
    Expired,
    /// Signed but not yet started. Charged like an active contract.
    Future,
}

impl ContractStatus {
    pub fn charges_salary(&self) -> bool {
        matches!(self, ContractStatus::Active | ContractStatus::Future)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub team: TeamId,
    pub status: ContractStatus,
    #[serde(default)]
    pub player_name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub contract_type: String,
    #[serde(default)]
    pub final_year: Option<u16>,
    pub salary: YearAmounts,
    #[serde(default)]
    pub dead_money: YearAmounts,
    // external valuation score, opaque to the engine
    #[serde(default)]
    pub trade_value: Option<Decimal>,
}

impl Contract {
    pub fn new(
        id: impl Into<ContractId>,
        team: impl Into<TeamId>,
        status: ContractStatus,
        salary: YearAmounts,
    ) -> Self {
        Self {
            id: id.into(),
            team: team.into(),
            status,
            player_name: String::new(),
            position: String::new(),
            contract_type: String::new(),
            final_year: None,
            salary,
            dead_money: YearAmounts::zero(),
            trade_value: None,
        }
    }

    pub fn with_dead_money(mut self, dead_money: YearAmounts) -> Self {
        self.dead_money = dead_money;
        self
    }

    pub fn with_player(mut self, name: impl Into<String>, position: impl Into<String>) -> Self {
        self.player_name = name.into();
        self.position = position.into();
        self
    }

    pub fn with_trade_value(mut self, value: Decimal) -> Self {
        self.trade_value = Some(value);
        self
    }

    /// Salary counted against the cap for `year`. Zero for expired rows.
    pub fn active_charge(&self, year: BudgetYear) -> Amount {
        if self.status.charges_salary() {
            self.salary.get(year)
        } else {
            Amount::zero()
        }
    }

    /// Dead money for `year`. Counted for every status.
    pub fn dead_charge(&self, year: BudgetYear) -> Amount {
        self.dead_money.get(year)
    }

    pub fn total_charge(&self, year: BudgetYear) -> Amount {
        self.active_charge(year).add(self.dead_charge(year))
    }

    pub fn is_indexable(&self) -> bool {
        !self.id.is_blank() && !self.team.is_blank()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftPick {
    pub id: PickId,
    pub season: u16,
    pub round: u8,
    pub original_team: TeamId,
    pub owner: TeamId,
}

impl DraftPick {
    pub fn new(id: impl Into<PickId>, season: u16, round: u8, original_team: impl Into<TeamId>) -> Self {
        let original_team = original_team.into();
        Self {
            id: id.into(),
            season,
            round,
            owner: original_team.clone(),
            original_team,
        }
    }

    pub fn owned_by(mut self, owner: impl Into<TeamId>) -> Self {
        self.owner = owner.into();
        self
    }

    pub fn is_indexable(&self) -> bool {
        !self.id.is_blank() && !self.owner.is_blank()
    }
}

/// Read-only view of the league's books at one point in time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContractSnapshot {
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    #[serde(default)]
    pub contracts: Vec<Contract>,
    #[serde(default)]
    pub picks: Vec<DraftPick>,
}

impl ContractSnapshot {
    pub fn new(contracts: Vec<Contract>) -> Self {
        Self {
            as_of: None,
            contracts,
            picks: Vec::new(),
        }
    }

    pub fn with_picks(mut self, picks: Vec<DraftPick>) -> Self {
        self.picks = picks;
        self
    }

    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    // league year that Y1 refers to, when the snapshot is dated
    pub fn season(&self) -> Option<i32> {
        self.as_of.map(|d| d.year())
    }

    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty() && self.picks.is_empty()
    }
}
