//! Dead money on trade.
//!
//! The league snapshot already carries every dead-money row that exists. Whether
//! moving a contract should create a new obligation for the sending team is a
//! league rule, so the simulator asks a [`DeadMoneyPolicy`] for each contract
//! that leaves a team. The default policy adds nothing.

use crate::contract::{Contract, ContractStatus};
use crate::types::{ContractId, TeamId, YearAmounts};
use rust_decimal::Decimal;
use std::fmt::Debug;

pub trait DeadMoneyPolicy: Debug + Send + Sync {
    /// Extra dead-money row charged to `from` when `contract` is traded to `to`.
    fn on_trade(&self, contract: &Contract, from: &TeamId, to: &TeamId) -> Option<Contract>;
}

/// Only the dead money already in the snapshot counts.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateOnly;

impl DeadMoneyPolicy for AggregateOnly {
    fn on_trade(&self, _contract: &Contract, _from: &TeamId, _to: &TeamId) -> Option<Contract> {
        None
    }
}

/// Sender keeps a fixed share of the traded contract's remaining salary as dead money.
#[derive(Debug, Clone, Copy)]
pub struct RetainedShare {
    pub share: Decimal,
}

impl RetainedShare {
    pub fn new(share: Decimal) -> Self {
        Self {
            share: share.clamp(Decimal::ZERO, Decimal::ONE),
        }
    }
}

impl DeadMoneyPolicy for RetainedShare {
    fn on_trade(&self, contract: &Contract, from: &TeamId, _to: &TeamId) -> Option<Contract> {
        if !contract.status.charges_salary() || self.share.is_zero() {
            return None;
        }
        let mut dead = YearAmounts::zero();
        for (year, salary) in contract.salary.iter() {
            dead.set(year, salary.mul(self.share).round_to_scale());
        }
        if dead.is_zero() {
            return None;
        }

        let mut row = Contract::new(
            ContractId::new(format!("{}-dead", contract.id)),
            from.clone(),
            ContractStatus::Expired,
            YearAmounts::zero(),
        )
        .with_dead_money(dead)
        .with_player(contract.player_name.clone(), contract.position.clone());
        row.contract_type = "Dead Money".to_string();
        Some(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BudgetYear;
    use rust_decimal_macros::dec;

    fn contract() -> Contract {
        Contract::new(
            "c1",
            "Alpha",
            ContractStatus::Active,
            YearAmounts::from_decimals([dec!(40), dec!(30), dec!(0), dec!(0)]),
        )
    }

    #[test]
    fn aggregate_only_adds_nothing() {
        assert!(AggregateOnly.on_trade(&contract(), &"Alpha".into(), &"Beta".into()).is_none());
    }

    #[test]
    fn retained_share_charges_sender() {
        let policy = RetainedShare::new(dec!(0.25));
        let row = policy.on_trade(&contract(), &"Alpha".into(), &"Beta".into()).unwrap();

        assert_eq!(row.team, TeamId::new("Alpha"));
        assert_eq!(row.status, ContractStatus::Expired);
        assert_eq!(row.dead_charge(BudgetYear::Y1).value(), dec!(10));
        assert_eq!(row.dead_charge(BudgetYear::Y2).value(), dec!(7.5));
        assert!(row.active_charge(BudgetYear::Y1).is_zero());
    }

    #[test]
    fn retained_share_skips_expired_rows() {
        let mut c = contract();
        c.status = ContractStatus::Expired;
        assert!(RetainedShare::new(dec!(0.5)).on_trade(&c, &"Alpha".into(), &"Beta".into()).is_none());
    }
}
