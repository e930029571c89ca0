//! Trade validation.
//!
//! Classifies a simulated trade into one state, checked in strict order:
//!
//! 1. `Incomplete`: some asset has no settled destination, or fewer than two
//!    teams are involved. Cap numbers are not trusted, nothing else is checked.
//! 2. `Invalid`: some team ends year one over the cap.
//! 3. `Warning`: some team ends a future year over the cap, or ends year one
//!    with less headroom than the near-cap threshold.
//! 4. `Valid`: none of the above.
//!
//! Every finding is a [`Violation`] that names the team, year and amount, so a
//! caller can explain the verdict without recomputing anything.

use crate::cap::{evaluate_cap_status, CapParams, CapStatus};
use crate::resolver::{FlowResolution, UnresolvedReason};
use crate::simulator::TeamImpact;
use crate::types::{Amount, AssetRef, BudgetYear, TeamId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ValidationState {
    Incomplete,
    Invalid,
    Warning,
    Valid,
}

impl ValidationState {
    /// Valid or Warning. The trade may go through.
    pub fn is_legal(&self) -> bool {
        matches!(self, ValidationState::Valid | ValidationState::Warning)
    }
}

impl fmt::Display for ValidationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ValidationState::Incomplete => "incomplete",
            ValidationState::Invalid => "invalid",
            ValidationState::Warning => "warning",
            ValidationState::Valid => "valid",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    Unresolved(UnresolvedReason),
    FewerThanTwoParties { teams: usize },
    CurrentYearOverCap,
    FutureYearOverCap,
    NearCap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub team: Option<TeamId>,
    pub year: Option<BudgetYear>,
    pub kind: ViolationKind,
    /// After-trade remaining for cap findings. Negative is the size of the breach.
    pub remaining: Option<Amount>,
    pub asset: Option<AssetRef>,
}

impl Violation {
    fn cap(team: &TeamId, year: BudgetYear, kind: ViolationKind, remaining: Amount) -> Self {
        Self {
            team: Some(team.clone()),
            year: Some(year),
            kind,
            remaining: Some(remaining),
            asset: None,
        }
    }

    /// Amount over the cap, zero when the finding is not a breach.
    pub fn overage(&self) -> Amount {
        match self.remaining {
            Some(r) if r.is_negative() => r.abs(),
            _ => Amount::zero(),
        }
    }

    pub fn state(&self) -> ValidationState {
        match self.kind {
            ViolationKind::Unresolved(_) | ViolationKind::FewerThanTwoParties { .. } => ValidationState::Incomplete,
            ViolationKind::CurrentYearOverCap => ValidationState::Invalid,
            ViolationKind::FutureYearOverCap | ViolationKind::NearCap => ValidationState::Warning,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let team = self.team.as_ref().map(TeamId::as_str).unwrap_or("trade");
        let year = self.year.map(|y| format!(" {y}")).unwrap_or_default();
        let remaining = self.remaining.unwrap_or_default();
        match &self.kind {
            ViolationKind::Unresolved(reason) => match &self.asset {
                Some(asset) => write!(f, "{team}: {asset} {reason}"),
                None => write!(f, "{team}: {reason}"),
            },
            ViolationKind::FewerThanTwoParties { teams } => {
                write!(f, "fewer than two parties: {teams} team(s) in the proposal")
            }
            ViolationKind::CurrentYearOverCap | ViolationKind::FutureYearOverCap => {
                write!(f, "{team}{year}: {} over the cap", self.overage())
            }
            ViolationKind::NearCap => write!(f, "{team}{year}: only {remaining} remaining"),
        }
    }
}

/// A future year left close to the cap. Reported, never changes the state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub team: TeamId,
    pub year: BudgetYear,
    pub remaining: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub state: ValidationState,
    pub violations: Vec<Violation>,
    pub advisories: Vec<Advisory>,
}

pub fn classify(resolution: &FlowResolution, impacts: &[TeamImpact], params: &CapParams) -> Classification {
    let mut violations = incomplete_violations(resolution);
    if !violations.is_empty() {
        return Classification {
            state: ValidationState::Incomplete,
            violations,
            advisories: Vec::new(),
        };
    }

    let mut advisories = Vec::new();
    for impact in impacts {
        let team = &impact.team;
        let y1 = impact.after.remaining(BudgetYear::Y1);
        match evaluate_cap_status(y1, params) {
            CapStatus::OverCap => violations.push(Violation::cap(team, BudgetYear::Y1, ViolationKind::CurrentYearOverCap, y1)),
            CapStatus::NearCap => violations.push(Violation::cap(team, BudgetYear::Y1, ViolationKind::NearCap, y1)),
            CapStatus::Clear => {}
        }

        for year in BudgetYear::future() {
            let remaining = impact.after.remaining(year);
            match evaluate_cap_status(remaining, params) {
                CapStatus::OverCap => {
                    violations.push(Violation::cap(team, year, ViolationKind::FutureYearOverCap, remaining))
                }
                CapStatus::NearCap => advisories.push(Advisory {
                    team: team.clone(),
                    year,
                    remaining,
                }),
                CapStatus::Clear => {}
            }
        }
    }

    // the worst finding decides; ordering of the enum is the precedence
    let state = violations
        .iter()
        .map(Violation::state)
        .min()
        .unwrap_or(ValidationState::Valid);

    Classification {
        state,
        violations,
        advisories,
    }
}

fn incomplete_violations(resolution: &FlowResolution) -> Vec<Violation> {
    let mut violations = Vec::new();

    if resolution.active_teams.len() < 2 {
        violations.push(Violation {
            team: None,
            year: None,
            kind: ViolationKind::FewerThanTwoParties {
                teams: resolution.active_teams.len(),
            },
            remaining: None,
            asset: None,
        });
    }

    // with no counterparty, a missing destination only restates the party count
    let too_few = !violations.is_empty();
    let relevant = resolution
        .unresolved
        .iter()
        .filter(|u| !(too_few && u.reason == UnresolvedReason::MissingDestination));

    violations.extend(relevant.map(|u| Violation {
        team: (!u.from.is_blank()).then(|| u.from.clone()),
        year: None,
        kind: ViolationKind::Unresolved(u.reason.clone()),
        remaining: None,
        asset: Some(u.asset.clone()),
    }));

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cap::{calculate_team_cap, TeamCap};
    use crate::contract::{Contract, ContractStatus};
    use crate::fines::FinesTable;
    use crate::resolver::UnresolvedAsset;
    use crate::simulator::TradeTotals;
    use crate::types::YearAmounts;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    // team cap whose after-remaining is `remaining` per year
    fn cap_with_remaining(team: &str, remaining: [Decimal; 4]) -> TeamCap {
        let used = remaining.map(|r| dec!(300) - r);
        let row = Contract::new("x", team, ContractStatus::Active, YearAmounts::from_decimals(used));
        calculate_team_cap(&team.into(), &[&row], &FinesTable::new(), &CapParams::default())
    }

    fn impact(team: &str, remaining: [Decimal; 4]) -> TeamImpact {
        let cap = cap_with_remaining(team, remaining);
        TeamImpact {
            team: team.into(),
            before: cap.clone(),
            after: cap,
            totals: TradeTotals::default(),
            generated_dead_money: Vec::new(),
        }
    }

    fn resolution(teams: &[&str]) -> FlowResolution {
        FlowResolution {
            active_teams: teams.iter().map(|t| TeamId::new(t)).collect(),
            flows: Vec::new(),
            moves: Vec::new(),
            unresolved: Vec::new(),
        }
    }

    #[test]
    fn valid_when_all_clear() {
        let impacts = vec![
            impact("Alpha", [dec!(125), dec!(200), dec!(200), dec!(300)]),
            impact("Beta", [dec!(85), dec!(100), dec!(300), dec!(300)]),
        ];
        let out = classify(&resolution(&["Alpha", "Beta"]), &impacts, &CapParams::default());
        assert_eq!(out.state, ValidationState::Valid);
        assert!(out.violations.is_empty());
    }

    #[test]
    fn current_year_breach_is_invalid() {
        let impacts = vec![
            impact("Alpha", [dec!(-15), dec!(200), dec!(200), dec!(200)]),
            impact("Beta", [dec!(30), dec!(-5), dec!(200), dec!(200)]),
        ];
        let out = classify(&resolution(&["Alpha", "Beta"]), &impacts, &CapParams::default());

        assert_eq!(out.state, ValidationState::Invalid);
        let first = &out.violations[0];
        assert_eq!(first.kind, ViolationKind::CurrentYearOverCap);
        assert_eq!(first.remaining, Some(Amount::new(dec!(-15))));
        assert_eq!(first.to_string(), "Alpha Y1: $15.0 over the cap");
        // lower-precedence findings are still listed
        assert_eq!(out.violations.len(), 3);
    }

    #[test]
    fn future_breach_is_warning() {
        let impacts = vec![impact("Alpha", [dec!(120), dec!(-1), dec!(0), dec!(200)])];
        let out = classify(&resolution(&["Alpha", "Beta"]), &impacts, &CapParams::default());

        assert_eq!(out.state, ValidationState::Warning);
        assert_eq!(out.violations[0].kind, ViolationKind::FutureYearOverCap);
        assert_eq!(out.violations[0].year, Some(BudgetYear::Y2));
        assert_eq!(out.advisories.len(), 1);
        assert_eq!(out.advisories[0].year, BudgetYear::Y3);
    }

    #[test]
    fn near_cap_year_one_is_warning() {
        let impacts = vec![impact("Alpha", [dec!(30), dec!(200), dec!(200), dec!(200)])];
        let out = classify(&resolution(&["Alpha", "Beta"]), &impacts, &CapParams::default());

        assert_eq!(out.state, ValidationState::Warning);
        assert_eq!(out.violations[0].kind, ViolationKind::NearCap);
        assert_eq!(out.violations[0].to_string(), "Alpha Y1: only $30.0 remaining");
    }

    #[test]
    fn unresolved_short_circuits() {
        let mut res = resolution(&["Alpha", "Beta", "Gamma"]);
        res.unresolved.push(UnresolvedAsset {
            from: "Alpha".into(),
            asset: AssetRef::contract("a1"),
            requested: None,
            reason: UnresolvedReason::MissingDestination,
        });
        let impacts = vec![impact("Alpha", [dec!(-100), dec!(0), dec!(0), dec!(0)])];
        let out = classify(&res, &impacts, &CapParams::default());

        assert_eq!(out.state, ValidationState::Incomplete);
        assert_eq!(out.violations.len(), 1);
        assert_eq!(out.violations[0].asset, Some(AssetRef::contract("a1")));
        assert!(out.advisories.is_empty());
    }

    #[test]
    fn single_team_is_incomplete() {
        let out = classify(&resolution(&["Alpha"]), &[], &CapParams::default());
        assert_eq!(out.state, ValidationState::Incomplete);
        assert_eq!(out.violations[0].kind, ViolationKind::FewerThanTwoParties { teams: 1 });
    }

    #[test]
    fn single_team_reports_party_count_not_destination() {
        let mut res = resolution(&["Alpha"]);
        res.unresolved.push(UnresolvedAsset {
            from: "Alpha".into(),
            asset: AssetRef::contract("a1"),
            requested: None,
            reason: UnresolvedReason::MissingDestination,
        });
        let out = classify(&res, &[], &CapParams::default());

        assert_eq!(out.state, ValidationState::Incomplete);
        assert_eq!(out.violations.len(), 1);
        assert_eq!(out.violations[0].kind, ViolationKind::FewerThanTwoParties { teams: 1 });
    }

    #[test]
    fn state_precedence_follows_enum_order() {
        assert!(ValidationState::Incomplete < ValidationState::Invalid);
        assert!(ValidationState::Invalid < ValidationState::Warning);
        assert!(ValidationState::Warning < ValidationState::Valid);
        assert!(ValidationState::Warning.is_legal());
        assert!(!ValidationState::Invalid.is_legal());
    }
}
