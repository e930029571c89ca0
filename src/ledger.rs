//! Contract ledger index.
//!
//! Built once per evaluation from the snapshot. Gives team → rows and
//! id → row lookups for contracts, and id → record for draft picks.
//! Rows with a blank team or id are skipped and counted, never fatal.

use crate::contract::{Contract, ContractSnapshot, DraftPick};
use crate::types::{AssetRef, ContractId, PickId, TeamId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkippedRecord {
    Contract { index: usize, id: ContractId },
    Pick { index: usize, id: PickId },
    /// Same contract id appeared twice. The first row wins.
    DuplicateContract { index: usize, id: ContractId },
    DuplicatePick { index: usize, id: PickId },
}

#[derive(Debug, Clone, Default)]
pub struct LedgerIndex<'a> {
    by_team: BTreeMap<TeamId, Vec<&'a Contract>>,
    by_id: HashMap<ContractId, &'a Contract>,
    picks: HashMap<PickId, &'a DraftPick>,
    skipped: Vec<SkippedRecord>,
}

impl<'a> LedgerIndex<'a> {
    pub fn build(snapshot: &'a ContractSnapshot) -> Self {
        let mut index = LedgerIndex::default();

        for (i, contract) in snapshot.contracts.iter().enumerate() {
            if !contract.is_indexable() {
                tracing::warn!(row = i, id = %contract.id, "skipping contract row with blank team or id");
                index.skipped.push(SkippedRecord::Contract {
                    index: i,
                    id: contract.id.clone(),
                });
                continue;
            }
            if index.by_id.contains_key(&contract.id) {
                tracing::warn!(row = i, id = %contract.id, "duplicate contract id, keeping first row");
                index.skipped.push(SkippedRecord::DuplicateContract {
                    index: i,
                    id: contract.id.clone(),
                });
                continue;
            }
            index.by_id.insert(contract.id.clone(), contract);
            index.by_team.entry(contract.team.clone()).or_default().push(contract);
        }

        for (i, pick) in snapshot.picks.iter().enumerate() {
            if !pick.is_indexable() {
                tracing::warn!(row = i, id = %pick.id, "skipping pick row with blank owner or id");
                index.skipped.push(SkippedRecord::Pick {
                    index: i,
                    id: pick.id.clone(),
                });
                continue;
            }
            if index.picks.contains_key(&pick.id) {
                index.skipped.push(SkippedRecord::DuplicatePick {
                    index: i,
                    id: pick.id.clone(),
                });
                continue;
            }
            index.picks.insert(pick.id.clone(), pick);
        }

        tracing::debug!(
            contracts = index.by_id.len(),
            teams = index.by_team.len(),
            picks = index.picks.len(),
            skipped = index.skipped.len(),
            "ledger index built"
        );

        index
    }

    pub fn contract(&self, id: &ContractId) -> Option<&'a Contract> {
        self.by_id.get(id).copied()
    }

    pub fn pick(&self, id: &PickId) -> Option<&'a DraftPick> {
        self.picks.get(id).copied()
    }

    /// Current owner of an asset, if the asset is known.
    pub fn owner_of(&self, asset: &AssetRef) -> Option<&'a TeamId> {
        match asset {
            AssetRef::Contract(id) => self.contract(id).map(|c| &c.team),
            AssetRef::Pick(id) => self.pick(id).map(|p| &p.owner),
        }
    }

    pub fn team_contracts(&self, team: &TeamId) -> &[&'a Contract] {
        self.by_team.get(team).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn team_picks(&self, team: &TeamId) -> Vec<&'a DraftPick> {
        let mut picks: Vec<_> = self.picks.values().copied().filter(|p| &p.owner == team).collect();
        picks.sort_by(|a, b| (a.season, a.round, &a.id).cmp(&(b.season, b.round, &b.id)));
        picks
    }

    pub fn teams(&self) -> impl Iterator<Item = &TeamId> {
        self.by_team.keys()
    }

    pub fn contract_count(&self) -> usize {
        self.by_id.len()
    }

    pub fn pick_count(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty() && self.picks.is_empty()
    }

    pub fn skipped(&self) -> &[SkippedRecord] {
        &self.skipped
    }
}
