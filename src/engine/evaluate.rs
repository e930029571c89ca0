//! Proposal evaluation.

use super::core::TradeEngine;
use super::results::{EngineError, EvaluationRequest, ValidationResult};
use crate::contract::ContractSnapshot;
use crate::fines::FinesTable;
use crate::ledger::LedgerIndex;
use crate::proposal::TradeProposal;
use crate::resolver::resolve_flows;
use crate::simulator::simulate_trade;
use crate::validation::classify;

impl TradeEngine {
    /// Evaluate one proposal against a snapshot.
    ///
    /// Only a proposal with no parties or a snapshot with nothing in it is an
    /// error. Cap breaches and unresolved assets come back as data.
    pub fn evaluate(
        &self,
        snapshot: &ContractSnapshot,
        fines: &FinesTable,
        proposal: &TradeProposal,
    ) -> Result<ValidationResult, EngineError> {
        if proposal.is_empty() {
            return Err(EngineError::EmptyProposal);
        }

        let ledger = LedgerIndex::build(snapshot);
        if ledger.is_empty() {
            return Err(EngineError::EmptySnapshot);
        }

        let params = self.cap_params();
        let resolution = resolve_flows(proposal, &ledger);
        let impacts = simulate_trade(&resolution, &ledger, fines, params, self.dead_money.as_ref());
        let classification = classify(&resolution, &impacts, params);

        tracing::info!(
            state = %classification.state,
            teams = resolution.active_teams.len(),
            assets = proposal.asset_count(),
            violations = classification.violations.len(),
            "trade evaluated"
        );
        if self.config.verbose {
            for violation in &classification.violations {
                tracing::info!(%violation, "violation");
            }
        }

        Ok(ValidationResult {
            state: classification.state,
            teams: impacts.into_iter().map(|i| (i.team.clone(), i)).collect(),
            violations: classification.violations,
            advisories: classification.advisories,
            flows: resolution.flows,
            moves: resolution.moves,
            unresolved: resolution.unresolved,
            skipped_records: ledger.skipped().to_vec(),
            season: snapshot.season(),
        })
    }

    pub fn evaluate_request(&self, request: &EvaluationRequest) -> Result<ValidationResult, EngineError> {
        self.evaluate(&request.snapshot, &request.fines, &request.proposal)
    }
}
