// capx-core: salary-cap trade settlement engine.
// cap-first architecture: every trade is judged by each team's cap picture after it settles.
// all computation is deterministic with no external I/O.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: TeamId, ContractId, AssetRef, Amount, BudgetYear
//   2.x  contract.rs: contract rows, draft picks, the snapshot
//   2.1  ledger.rs: snapshot index by team and by id
//   3.x  cap.rs: four-year cap summary, near-cap bands
//   3.1  fines.rs: per-team penalty ledger
//   4.x  proposal.rs: trade parties and outgoing assets
//   5.x  resolver.rs: destination resolution, per-team flows
//   6.x  simulator.rs: before/after cap pictures, trade totals
//   6.1  dead_money.rs: dead-money policy hook
//   7.x  config.rs: league cap settings and presets
//   8.x  engine/: evaluation pipeline, results, errors
//   9.x  validation.rs: state classification and violations

pub mod cap;
pub mod config;
pub mod contract;
pub mod dead_money;
pub mod engine;
pub mod fines;
pub mod ledger;
pub mod proposal;
pub mod resolver;
pub mod simulator;
pub mod types;
pub mod validation;

// re exports for convenience
pub use cap::*;
pub use config::{ConfigError, LeagueConfig, LeaguePreset};
pub use contract::*;
pub use dead_money::*;
pub use engine::*;
pub use fines::*;
pub use ledger::*;
pub use proposal::*;
pub use resolver::*;
pub use simulator::*;
pub use types::*;
pub use validation::*;
