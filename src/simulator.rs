//! Trade simulation.
//!
//! For every active team: the before picture is the team's real rows, the
//! after picture is those rows minus what leaves plus what arrives (plus any
//! dead money the policy charges the sender). Both run through the same cap
//! calculator. Pure and deterministic, no I/O.

use crate::cap::{calculate_team_cap, CapParams, TeamCap};
use crate::contract::Contract;
use crate::dead_money::DeadMoneyPolicy;
use crate::fines::FinesTable;
use crate::ledger::LedgerIndex;
use crate::resolver::{FlowResolution, ResolvedFlow};
use crate::types::{Amount, BudgetYear, ContractId, TeamId, YearAmounts};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Cap charge (salary plus dead money) and value moving through one team.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TradeTotals {
    pub incoming_charge: YearAmounts,
    pub outgoing_charge: YearAmounts,
    pub value_in: Amount,
    pub value_out: Amount,
}

impl TradeTotals {
    /// Cap charge added per year. Negative means the team frees space.
    pub fn net_cap_delta(&self) -> YearAmounts {
        self.incoming_charge.sub(&self.outgoing_charge)
    }

    pub fn net_value(&self) -> Amount {
        self.value_in.sub(self.value_out)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamImpact {
    pub team: TeamId,
    pub before: TeamCap,
    pub after: TeamCap,
    pub totals: TradeTotals,
    /// Dead-money rows the policy added to this team's after picture.
    pub generated_dead_money: Vec<ContractId>,
}

impl TeamImpact {
    pub fn remaining_delta(&self, year: BudgetYear) -> Amount {
        self.after.remaining(year).sub(self.before.remaining(year))
    }
}

pub fn simulate_trade(
    resolution: &FlowResolution,
    ledger: &LedgerIndex<'_>,
    fines: &FinesTable,
    params: &CapParams,
    dead_money: &dyn DeadMoneyPolicy,
) -> Vec<TeamImpact> {
    resolution
        .active_teams
        .iter()
        .map(|team| {
            let flow = resolution.flow(team);
            simulate_team(team, flow, resolution, ledger, fines, params, dead_money)
        })
        .collect()
}

fn simulate_team(
    team: &TeamId,
    flow: Option<&ResolvedFlow>,
    resolution: &FlowResolution,
    ledger: &LedgerIndex<'_>,
    fines: &FinesTable,
    params: &CapParams,
    dead_money: &dyn DeadMoneyPolicy,
) -> TeamImpact {
    let current = ledger.team_contracts(team);
    let before = calculate_team_cap(team, current, fines, params);

    let leaving: HashSet<&ContractId> = flow
        .map(|f| f.outgoing.iter().filter_map(|a| a.as_contract()).collect())
        .unwrap_or_default();

    let generated: Vec<Contract> = resolution
        .moves
        .iter()
        .filter(|m| &m.from == team)
        .filter_map(|m| m.asset.as_contract().and_then(|id| ledger.contract(id)).map(|c| (m, c)))
        .filter_map(|(m, c)| dead_money.on_trade(c, &m.from, &m.to))
        .collect();

    let mut after_rows: Vec<&Contract> = current.iter().copied().filter(|c| !leaving.contains(&c.id)).collect();
    if let Some(flow) = flow {
        after_rows.extend(flow.incoming_contracts());
    }
    after_rows.extend(generated.iter());
    let after = calculate_team_cap(team, &after_rows, fines, params);

    let totals = flow
        .map(|f| trade_totals(f, current, ledger))
        .unwrap_or_default();

    tracing::debug!(
        team = %team,
        before_y1 = %before.remaining(BudgetYear::Y1),
        after_y1 = %after.remaining(BudgetYear::Y1),
        "team simulated"
    );

    TeamImpact {
        team: team.clone(),
        before,
        after,
        totals,
        generated_dead_money: generated.into_iter().map(|c| c.id).collect(),
    }
}

fn trade_totals(flow: &ResolvedFlow, current: &[&Contract], ledger: &LedgerIndex<'_>) -> TradeTotals {
    let charge = |c: &Contract| -> YearAmounts {
        let mut out = YearAmounts::zero();
        for year in BudgetYear::ALL {
            out.set(year, c.total_charge(year));
        }
        out
    };
    let value = |c: &Contract| c.trade_value.map(Amount::new).unwrap_or_default();

    let outgoing: Vec<&Contract> = flow
        .outgoing
        .iter()
        .filter_map(|a| a.as_contract())
        .filter_map(|id| current.iter().copied().find(|c| &c.id == id).or_else(|| ledger.contract(id)))
        .collect();

    TradeTotals {
        incoming_charge: flow.incoming_contracts().map(charge).sum(),
        outgoing_charge: outgoing.iter().map(|c| charge(c)).sum(),
        value_in: flow.incoming_contracts().map(value).sum(),
        value_out: outgoing.iter().map(|c| value(c)).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::{ContractSnapshot, ContractStatus};
    use crate::dead_money::{AggregateOnly, RetainedShare};
    use crate::proposal::{TradeParty, TradeProposal};
    use crate::resolver::resolve_flows;
    use crate::types::AssetRef;
    use rust_decimal_macros::dec;

    fn y1(amount: rust_decimal::Decimal) -> YearAmounts {
        YearAmounts::from_decimals([amount, dec!(0), dec!(0), dec!(0)])
    }

    fn snapshot() -> ContractSnapshot {
        ContractSnapshot::new(vec![
            Contract::new("a-big", "Alpha", ContractStatus::Active, y1(dec!(180))),
            Contract::new("a1", "Alpha", ContractStatus::Active, y1(dec!(20))).with_trade_value(dec!(3000)),
            Contract::new("b-big", "Beta", ContractStatus::Active, y1(dec!(195))),
            Contract::new("b1", "Beta", ContractStatus::Active, y1(dec!(15))).with_trade_value(dec!(4500)),
            Contract::new("b-dead", "Beta", ContractStatus::Expired, y1(dec!(99))).with_dead_money(y1(dec!(0))),
        ])
    }

    fn proposal() -> TradeProposal {
        TradeProposal::two_team(
            TradeParty::new("Alpha").sends(AssetRef::contract("a1")),
            TradeParty::new("Beta").sends(AssetRef::contract("b1")),
        )
    }

    #[test]
    fn before_and_after_swap() {
        let snap = snapshot();
        let ledger = LedgerIndex::build(&snap);
        let res = resolve_flows(&proposal(), &ledger);
        let impacts = simulate_trade(&res, &ledger, &FinesTable::new(), &CapParams::default(), &AggregateOnly);

        let alpha = &impacts[0];
        assert_eq!(alpha.before.remaining(BudgetYear::Y1).value(), dec!(100));
        assert_eq!(alpha.after.remaining(BudgetYear::Y1).value(), dec!(105));
        assert_eq!(alpha.remaining_delta(BudgetYear::Y1).value(), dec!(5));

        let beta = &impacts[1];
        assert_eq!(beta.before.remaining(BudgetYear::Y1).value(), dec!(90));
        assert_eq!(beta.after.remaining(BudgetYear::Y1).value(), dec!(85));
    }

    #[test]
    fn totals_track_charge_and_value() {
        let snap = snapshot();
        let ledger = LedgerIndex::build(&snap);
        let res = resolve_flows(&proposal(), &ledger);
        let impacts = simulate_trade(&res, &ledger, &FinesTable::new(), &CapParams::default(), &AggregateOnly);

        let alpha = &impacts[0].totals;
        assert_eq!(alpha.incoming_charge.get(BudgetYear::Y1).value(), dec!(15));
        assert_eq!(alpha.outgoing_charge.get(BudgetYear::Y1).value(), dec!(20));
        assert_eq!(alpha.net_cap_delta().get(BudgetYear::Y1).value(), dec!(-5));
        assert_eq!(alpha.net_value().value(), dec!(1500));
    }

    #[test]
    fn policy_dead_money_hits_sender() {
        let snap = snapshot();
        let ledger = LedgerIndex::build(&snap);
        let res = resolve_flows(&proposal(), &ledger);
        let policy = RetainedShare::new(dec!(0.5));
        let impacts = simulate_trade(&res, &ledger, &FinesTable::new(), &CapParams::default(), &policy);

        let alpha = &impacts[0];
        // 100 + 20 out - 15 in - 10 retained
        assert_eq!(alpha.after.remaining(BudgetYear::Y1).value(), dec!(95));
        assert_eq!(alpha.after.year(BudgetYear::Y1).dead.value(), dec!(10));
        assert_eq!(alpha.generated_dead_money, vec![ContractId::new("a1-dead")]);
    }

    #[test]
    fn team_without_rows_starts_at_total() {
        let snap = snapshot();
        let ledger = LedgerIndex::build(&snap);
        let proposal = TradeProposal::two_team(
            TradeParty::new("Alpha").sends(AssetRef::contract("a1")),
            TradeParty::new("Expansion"),
        );
        let res = resolve_flows(&proposal, &ledger);
        let impacts = simulate_trade(&res, &ledger, &FinesTable::new(), &CapParams::default(), &AggregateOnly);

        let expansion = &impacts[1];
        assert_eq!(expansion.before.remaining(BudgetYear::Y1).value(), dec!(300));
        assert_eq!(expansion.after.remaining(BudgetYear::Y1).value(), dec!(280));
    }
}
