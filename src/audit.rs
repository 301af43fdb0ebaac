//! The audit pipeline: load, group, replay, report, write

use crate::config::AuditConfig;
use crate::error::AuditError;
use crate::ledger::ActionLedger;
use crate::loader;
use crate::match_registry::MatchRegistry;
use crate::replay_engine::ReplayEngine;
use crate::report::{AuditReport, ReportBuilder};

/// Replay every player in the ledger and build the report
pub fn audit(ledger: &ActionLedger, registry: MatchRegistry, parallel: bool) -> AuditReport {
    let engine = ReplayEngine::standard(registry).in_parallel(parallel);
    let replays = engine.replay_all(ledger.players());
    log::info!("replayed {} players", replays.len());
    ReportBuilder::new().build(&replays)
}

/// Run the full audit described by `config` and write the results file
pub fn run(config: &AuditConfig) -> Result<AuditReport, AuditError> {
    let registry = loader::load_registry(&config.match_data)?;
    let ledger = loader::load_ledger(&config.player_data)?;
    let report = audit(&ledger, registry, config.parallel);
    loader::write_report(&config.output, &report)?;
    Ok(report)
}
