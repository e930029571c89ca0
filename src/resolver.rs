//! Flow resolution for multi-team trades.
//!
//! Turns the parties of a proposal into, per team, the assets leaving and the
//! full records of the assets arriving. Every outgoing asset gets exactly one
//! [`Destination`]:
//!
//! - `Explicit` when the party named an active team other than itself,
//! - `Inferred` when no team was named and the trade has exactly two teams,
//! - `Unresolved` otherwise.
//!
//! Unresolved assets never abort resolution. They are collected so the
//! classifier can report the proposal as incomplete, and they are left out of
//! both sides of the flows so a partial picture never double counts.

use crate::contract::{Contract, DraftPick};
use crate::ledger::LedgerIndex;
use crate::proposal::TradeProposal;
use crate::types::{AssetRef, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedReason {
    /// No destination given and more than two teams are involved.
    MissingDestination,
    /// Destination names a team that is not part of the trade.
    UnknownDestination(TeamId),
    /// Destination is the sending team.
    SelfDestination,
    UnknownAsset,
    NotOwnedBySender { owner: TeamId },
    /// Asset already listed earlier in the proposal.
    DuplicateAsset,
    /// The party has a blank team.
    MissingOrigin,
}

impl fmt::Display for UnresolvedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnresolvedReason::MissingDestination => {
                write!(f, "no destination team; one can only be inferred in a two-team trade")
            }
            UnresolvedReason::UnknownDestination(team) => write!(f, "destination {team} is not in this trade"),
            UnresolvedReason::SelfDestination => write!(f, "destination is the sending team"),
            UnresolvedReason::UnknownAsset => write!(f, "not found in the contract snapshot"),
            UnresolvedReason::NotOwnedBySender { owner } => write!(f, "owned by {owner}, not the sending team"),
            UnresolvedReason::DuplicateAsset => write!(f, "listed more than once"),
            UnresolvedReason::MissingOrigin => write!(f, "sending team is blank"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Destination {
    Explicit(TeamId),
    Inferred(TeamId),
    Unresolved(UnresolvedReason),
}

impl Destination {
    pub fn team(&self) -> Option<&TeamId> {
        match self {
            Destination::Explicit(team) | Destination::Inferred(team) => Some(team),
            Destination::Unresolved(_) => None,
        }
    }
}

/// Pick a destination for one outgoing asset given the trade's active teams.
pub fn resolve_destination(origin: &TeamId, requested: Option<&TeamId>, active_teams: &[TeamId]) -> Destination {
    match requested {
        Some(dest) if dest.is_blank() => infer_destination(origin, active_teams),
        Some(dest) if dest == origin => Destination::Unresolved(UnresolvedReason::SelfDestination),
        Some(dest) if !active_teams.contains(dest) => {
            Destination::Unresolved(UnresolvedReason::UnknownDestination(dest.clone()))
        }
        Some(dest) => Destination::Explicit(dest.clone()),
        None => infer_destination(origin, active_teams),
    }
}

// only a strict two-team trade has an unambiguous "other side"
fn infer_destination(origin: &TeamId, active_teams: &[TeamId]) -> Destination {
    if active_teams.len() != 2 {
        return Destination::Unresolved(UnresolvedReason::MissingDestination);
    }
    match active_teams.iter().find(|t| *t != origin) {
        Some(other) => Destination::Inferred(other.clone()),
        None => Destination::Unresolved(UnresolvedReason::MissingDestination),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomingAsset {
    Contract(Contract),
    Pick(DraftPick),
}

impl IncomingAsset {
    pub fn asset_ref(&self) -> AssetRef {
        match self {
            IncomingAsset::Contract(c) => AssetRef::Contract(c.id.clone()),
            IncomingAsset::Pick(p) => AssetRef::Pick(p.id.clone()),
        }
    }

    pub fn as_contract(&self) -> Option<&Contract> {
        match self {
            IncomingAsset::Contract(c) => Some(c),
            IncomingAsset::Pick(_) => None,
        }
    }
}

/// One asset with a settled route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMove {
    pub asset: AssetRef,
    pub from: TeamId,
    pub to: TeamId,
    pub inferred: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedAsset {
    pub from: TeamId,
    pub asset: AssetRef,
    pub requested: Option<TeamId>,
    pub reason: UnresolvedReason,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFlow {
    pub team: TeamId,
    pub outgoing: Vec<AssetRef>,
    pub incoming: Vec<IncomingAsset>,
}

impl ResolvedFlow {
    fn new(team: TeamId) -> Self {
        Self {
            team,
            outgoing: Vec::new(),
            incoming: Vec::new(),
        }
    }

    pub fn incoming_contracts(&self) -> impl Iterator<Item = &Contract> {
        self.incoming.iter().filter_map(IncomingAsset::as_contract)
    }

    pub fn incoming_refs(&self) -> Vec<AssetRef> {
        self.incoming.iter().map(IncomingAsset::asset_ref).collect()
    }

    pub fn sends(&self, asset: &AssetRef) -> bool {
        self.outgoing.contains(asset)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowResolution {
    pub active_teams: Vec<TeamId>,
    pub flows: Vec<ResolvedFlow>,
    pub moves: Vec<AssetMove>,
    pub unresolved: Vec<UnresolvedAsset>,
}

impl FlowResolution {
    pub fn flow(&self, team: &TeamId) -> Option<&ResolvedFlow> {
        self.flows.iter().find(|f| &f.team == team)
    }

    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

pub fn resolve_flows(proposal: &TradeProposal, ledger: &LedgerIndex<'_>) -> FlowResolution {
    let active_teams = proposal.active_teams();
    let mut flows: Vec<ResolvedFlow> = active_teams.iter().cloned().map(ResolvedFlow::new).collect();
    let mut moves = Vec::new();
    let mut unresolved = Vec::new();
    let mut seen: HashSet<&AssetRef> = HashSet::new();

    for party in proposal.parties() {
        for outgoing in &party.outgoing {
            let asset = &outgoing.asset;
            let mark = |reason: UnresolvedReason| UnresolvedAsset {
                from: party.team.clone(),
                asset: asset.clone(),
                requested: outgoing.destination.clone(),
                reason,
            };

            if party.team.is_blank() {
                unresolved.push(mark(UnresolvedReason::MissingOrigin));
                continue;
            }
            if !seen.insert(asset) {
                unresolved.push(mark(UnresolvedReason::DuplicateAsset));
                continue;
            }

            let incoming = match lookup(asset, ledger) {
                Some(record) => record,
                None => {
                    unresolved.push(mark(UnresolvedReason::UnknownAsset));
                    continue;
                }
            };
            if let Some(owner) = ledger.owner_of(asset) {
                if owner != &party.team {
                    unresolved.push(mark(UnresolvedReason::NotOwnedBySender { owner: owner.clone() }));
                    continue;
                }
            }

            let destination = resolve_destination(&party.team, outgoing.destination.as_ref(), &active_teams);
            let (to, inferred) = match destination {
                Destination::Explicit(team) => (team, false),
                Destination::Inferred(team) => (team, true),
                Destination::Unresolved(reason) => {
                    unresolved.push(mark(reason));
                    continue;
                }
            };

            tracing::debug!(%asset, from = %party.team, to = %to, inferred, "asset resolved");

            if let Some(flow) = flows.iter_mut().find(|f| f.team == party.team) {
                flow.outgoing.push(asset.clone());
            }
            if let Some(flow) = flows.iter_mut().find(|f| f.team == to) {
                flow.incoming.push(incoming);
            }
            moves.push(AssetMove {
                asset: asset.clone(),
                from: party.team.clone(),
                to,
                inferred,
            });
        }
    }

    for u in &unresolved {
        tracing::warn!(asset = %u.asset, from = %u.from, reason = %u.reason, "asset left unresolved");
    }

    FlowResolution {
        active_teams,
        flows,
        moves,
        unresolved,
    }
}

fn lookup(asset: &AssetRef, ledger: &LedgerIndex<'_>) -> Option<IncomingAsset> {
    match asset {
        AssetRef::Contract(id) => ledger.contract(id).cloned().map(IncomingAsset::Contract),
        AssetRef::Pick(id) => ledger.pick(id).cloned().map(IncomingAsset::Pick),
    }
}
