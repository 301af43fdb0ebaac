use std::process::ExitCode;

use casino_audit::{run, AuditConfig};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = AuditConfig::default();
    match run(&config) {
        Ok(report) => {
            log::info!(
                "audit complete: {} legitimate, {} illegitimate players",
                report.legitimate.len(),
                report.illegitimate.len()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("audit failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
