// 4.0 proposal.rs: an immutable trade proposal. built once by whatever authoring surface
// the caller has, then handed to the engine whole.

use crate::types::{AssetRef, TeamId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingAsset {
    pub asset: AssetRef,
    /// Explicit receiving team. Optional only in a two-team trade.
    #[serde(default)]
    pub destination: Option<TeamId>,
}

impl OutgoingAsset {
    pub fn new(asset: AssetRef) -> Self {
        Self {
            asset,
            destination: None,
        }
    }

    pub fn to(mut self, team: impl Into<TeamId>) -> Self {
        self.destination = Some(team.into());
        self
    }
}

/// One team's side of a trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeParty {
    pub team: TeamId,
    #[serde(default)]
    pub outgoing: Vec<OutgoingAsset>,
}

impl TradeParty {
    pub fn new(team: impl Into<TeamId>) -> Self {
        Self {
            team: team.into(),
            outgoing: Vec::new(),
        }
    }

    pub fn sends(mut self, asset: AssetRef) -> Self {
        self.outgoing.push(OutgoingAsset::new(asset));
        self
    }

    pub fn sends_to(mut self, asset: AssetRef, destination: impl Into<TeamId>) -> Self {
        self.outgoing.push(OutgoingAsset::new(asset).to(destination));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TradeProposal {
    parties: Vec<TradeParty>,
}

impl TradeProposal {
    pub fn new(parties: Vec<TradeParty>) -> Self {
        Self { parties }
    }

    pub fn two_team(a: TradeParty, b: TradeParty) -> Self {
        Self { parties: vec![a, b] }
    }

    pub fn with_party(mut self, party: TradeParty) -> Self {
        self.parties.push(party);
        self
    }

    pub fn parties(&self) -> &[TradeParty] {
        &self.parties
    }

    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    /// Distinct non-blank teams, in first-seen order.
    pub fn active_teams(&self) -> Vec<TeamId> {
        let mut teams: Vec<TeamId> = Vec::new();
        for party in &self.parties {
            if !party.team.is_blank() && !teams.contains(&party.team) {
                teams.push(party.team.clone());
            }
        }
        teams
    }

    pub fn asset_count(&self) -> usize {
        self.parties.iter().map(|p| p.outgoing.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_teams_are_distinct_and_ordered() {
        let proposal = TradeProposal::new(vec![
            TradeParty::new("Beta").sends(AssetRef::contract("b1")),
            TradeParty::new("Alpha"),
            TradeParty::new("Beta").sends(AssetRef::contract("b2")),
            TradeParty::new(""),
        ]);

        assert_eq!(proposal.active_teams(), vec![TeamId::new("Beta"), TeamId::new("Alpha")]);
        assert_eq!(proposal.asset_count(), 2);
    }

    #[test]
    fn builder_sets_destinations() {
        let party = TradeParty::new("Alpha")
            .sends(AssetRef::contract("a1"))
            .sends_to(AssetRef::pick("2026-1-alpha"), "Gamma");

        assert_eq!(party.outgoing[0].destination, None);
        assert_eq!(party.outgoing[1].destination, Some(TeamId::new("Gamma")));
    }
}
