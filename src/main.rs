//! Salary-cap trade engine simulation.
//!
//! With no arguments, runs the scripted league scenarios. With a path, reads an
//! evaluation request (snapshot, fines, proposal) as JSON and prints the result.

use capx_core::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::process::ExitCode;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let engine = match TradeEngine::new(EngineConfig::default()) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("engine setup failed: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = std::env::args().nth(1) {
        return evaluate_file(&engine, &path);
    }

    println!("Salary Cap Trade Engine Simulation");
    println!("Cap $300.0 per team per year, near-cap buffer $50.0\n");

    scenario_1_valid_swap(&engine);
    scenario_2_current_year_breach(&engine);
    scenario_3_three_team_missing_destination(&engine);
    scenario_4_near_cap_warning(&engine);
    scenario_5_three_team_with_picks(&engine);

    println!("\nAll simulations completed successfully.");
    ExitCode::SUCCESS
}

fn evaluate_file(engine: &TradeEngine, path: &str) -> ExitCode {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("cannot read {path}: {e}");
            return ExitCode::FAILURE;
        }
    };
    let request: EvaluationRequest = match serde_json::from_str(&text) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("cannot parse {path}: {e}");
            return ExitCode::FAILURE;
        }
    };
    match engine.evaluate_request(&request) {
        Ok(result) => match serde_json::to_string_pretty(&result) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("cannot encode result: {e}");
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            eprintln!("evaluation failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn y1(amount: Decimal) -> YearAmounts {
    YearAmounts::from_decimals([amount, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO])
}

fn active(id: &str, team: &str, salary: YearAmounts) -> Contract {
    Contract::new(id, team, ContractStatus::Active, salary)
}

fn print_result(result: &ValidationResult) {
    println!("  State: {}", result.state);
    for (team, impact) in &result.teams {
        let before = impact.before.remaining_by_year();
        let after = impact.after.remaining_by_year();
        let line = |v: YearAmounts| {
            v.iter()
                .map(|(y, a)| format!("{y} {a}"))
                .collect::<Vec<_>>()
                .join(", ")
        };
        println!("  {team}");
        println!("    before: {}", line(before));
        println!("    after:  {}", line(after));
    }
    for message in result.messages() {
        println!("  - {message}");
    }
    for advisory in &result.advisories {
        println!("  note: {} {} at {}", advisory.team, advisory.year, advisory.remaining);
    }
    println!();
}

/// Two teams swap one contract each, both stay well under the cap.
fn scenario_1_valid_swap(engine: &TradeEngine) {
    println!("Scenario 1: Valid Two-Team Swap\n");

    let snapshot = ContractSnapshot::new(vec![
        active("a-core", "Alpha", y1(dec!(160))),
        active("a-wr", "Alpha", y1(dec!(20))).with_player("Alpha WR", "WR"),
        active("b-core", "Beta", y1(dec!(195))),
        active("b-rb", "Beta", y1(dec!(15))).with_player("Beta RB", "RB"),
    ]);
    let proposal = TradeProposal::two_team(
        TradeParty::new("Alpha").sends(AssetRef::contract("a-wr")),
        TradeParty::new("Beta").sends(AssetRef::contract("b-rb")),
    );

    let result = engine.evaluate(&snapshot, &FinesTable::new(), &proposal).unwrap();
    print_result(&result);
}

/// A team absorbs salary it cannot afford this year.
fn scenario_2_current_year_breach(engine: &TradeEngine) {
    println!("Scenario 2: Current-Year Cap Breach\n");

    let snapshot = ContractSnapshot::new(vec![
        active("a-core", "Alpha", y1(dec!(290))),
        active("b-qb", "Beta", y1(dec!(25))).with_player("Beta QB", "QB"),
    ]);
    let proposal = TradeProposal::two_team(
        TradeParty::new("Alpha"),
        TradeParty::new("Beta").sends(AssetRef::contract("b-qb")),
    );

    let result = engine.evaluate(&snapshot, &FinesTable::new(), &proposal).unwrap();
    print_result(&result);
}

/// Three teams, one asset with no destination.
fn scenario_3_three_team_missing_destination(engine: &TradeEngine) {
    println!("Scenario 3: Three-Team Trade, Missing Destination\n");

    let snapshot = ContractSnapshot::new(vec![
        active("a1", "Alpha", y1(dec!(10))),
        active("b1", "Beta", y1(dec!(10))),
        active("g1", "Gamma", y1(dec!(10))),
    ]);
    let proposal = TradeProposal::new(vec![
        TradeParty::new("Alpha").sends(AssetRef::contract("a1")),
        TradeParty::new("Beta").sends_to(AssetRef::contract("b1"), "Gamma"),
        TradeParty::new("Gamma").sends_to(AssetRef::contract("g1"), "Alpha"),
    ]);

    let result = engine.evaluate(&snapshot, &FinesTable::new(), &proposal).unwrap();
    println!("  Cap numbers authoritative: {}", result.is_authoritative());
    print_result(&result);
}

/// Fines push a team close to the line.
fn scenario_4_near_cap_warning(engine: &TradeEngine) {
    println!("Scenario 4: Near-Cap Warning\n");

    let snapshot = ContractSnapshot::new(vec![
        active("a-core", "Alpha", y1(dec!(240))),
        active("a-te", "Alpha", y1(dec!(5))),
        active("b-te", "Beta", y1(dec!(15))),
    ]);
    let fines = FinesTable::new().with("Alpha", y1(dec!(20)));
    let proposal = TradeProposal::two_team(
        TradeParty::new("Alpha").sends(AssetRef::contract("a-te")),
        TradeParty::new("Beta").sends(AssetRef::contract("b-te")),
    );

    let result = engine.evaluate(&snapshot, &fines, &proposal).unwrap();
    print_result(&result);
}

/// Contracts and draft picks moving between three teams, future-year breach.
fn scenario_5_three_team_with_picks(engine: &TradeEngine) {
    println!("Scenario 5: Three-Team Trade With Picks\n");

    let snapshot = ContractSnapshot::new(vec![
        active("a-core", "Alpha", YearAmounts::from_decimals([dec!(150), dec!(260), dec!(100), dec!(0)])),
        active("b-wr", "Beta", YearAmounts::from_decimals([dec!(30), dec!(45), dec!(45), dec!(0)])),
        active("g-rb", "Gamma", YearAmounts::from_decimals([dec!(12), dec!(12), dec!(0), dec!(0)])),
        Contract::new("g-old", "Gamma", ContractStatus::Expired, YearAmounts::zero())
            .with_dead_money(y1(dec!(8))),
    ])
    .with_picks(vec![
        DraftPick::new("2026-1-alpha", 2026, 1, "Alpha"),
        DraftPick::new("2026-2-gamma", 2026, 2, "Gamma"),
    ]);
    let proposal = TradeProposal::new(vec![
        TradeParty::new("Alpha").sends_to(AssetRef::pick("2026-1-alpha"), "Beta"),
        TradeParty::new("Beta").sends_to(AssetRef::contract("b-wr"), "Alpha"),
        TradeParty::new("Gamma")
            .sends_to(AssetRef::contract("g-rb"), "Beta")
            .sends_to(AssetRef::pick("2026-2-gamma"), "Alpha"),
    ]);

    let result = engine.evaluate(&snapshot, &FinesTable::new(), &proposal).unwrap();
    for mv in &result.moves {
        println!("  {} : {} -> {}", mv.asset, mv.from, mv.to);
    }
    print_result(&result);
}
