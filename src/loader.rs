//! Reading action and match records and writing the report

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use csv::{ReaderBuilder, StringRecord};
use crate::error::{AuditError, ParseError};
use crate::ledger::{ActionLedger, ActionRecord};
use crate::match_registry::MatchRegistry;
use crate::report::AuditReport;
use crate::types::{Action, ActionKind, Match, Outcome, Side};

fn csv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader)
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map_or(0, |pos| pos.line())
}

fn required<'r>(
    record: &'r StringRecord,
    index: usize,
    field: &'static str,
) -> Result<&'r str, ParseError> {
    record.get(index).ok_or(ParseError::MissingField {
        line: line_of(record),
        field,
    })
}

/// Parse one `playerId,KIND,matchId,amount[,side]` record
pub fn parse_action_record(record: &StringRecord) -> Result<ActionRecord, ParseError> {
    let line = line_of(record);
    let player_id = required(record, 0, "playerId")?;
    let token = required(record, 1, "action")?;
    let kind = ActionKind::from_token(token).ok_or_else(|| ParseError::UnknownActionKind {
        line,
        token: token.to_string(),
    })?;

    let match_id = record
        .get(2)
        .filter(|id| !id.is_empty())
        .map(str::to_string);

    let amount = match record.get(3).unwrap_or("") {
        "" => 0,
        value => value
            .parse::<i32>()
            .map(i64::from)
            .map_err(|_| ParseError::InvalidAmount {
                line,
                value: value.to_string(),
            })?,
    };

    let side = match record.get(4).unwrap_or("") {
        "" => None,
        value => Some(Side::from_token(value).ok_or_else(|| ParseError::InvalidSide {
            line,
            value: value.to_string(),
        })?),
    };

    Ok(ActionRecord::new(
        player_id,
        Action {
            kind,
            match_id,
            amount,
            side,
        },
    ))
}

/// Parse one `matchId,rateA,rateB,result` record
pub fn parse_match_record(record: &StringRecord) -> Result<Match, ParseError> {
    let line = line_of(record);
    let id = required(record, 0, "matchId")?;
    let rate = |index: usize, field: &'static str| -> Result<f64, ParseError> {
        let value = required(record, index, field)?;
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|rate| rate.is_finite() && *rate >= 0.0)
            .ok_or_else(|| ParseError::InvalidRate {
                line,
                value: value.to_string(),
            })
    };
    let rate_a = rate(1, "rateSideA")?;
    let rate_b = rate(2, "rateSideB")?;

    let result = required(record, 3, "result")?;
    let outcome = result
        .chars()
        .next()
        .and_then(Outcome::from_char)
        .ok_or_else(|| ParseError::InvalidOutcome {
            line,
            value: result.to_string(),
        })?;

    Ok(Match::new(id, rate_a, rate_b, outcome))
}

/// Parse every action record from a reader, in input order
pub fn parse_actions<R: Read>(reader: R) -> Result<Vec<ActionRecord>, ParseError> {
    let mut records = Vec::new();
    for record in csv_reader(reader).records() {
        records.push(parse_action_record(&record?)?);
    }
    Ok(records)
}

/// Parse every match record from a reader, in input order
pub fn parse_matches<R: Read>(reader: R) -> Result<Vec<Match>, ParseError> {
    let mut matches = Vec::new();
    for record in csv_reader(reader).records() {
        matches.push(parse_match_record(&record?)?);
    }
    Ok(matches)
}

fn open(path: &Path) -> Result<File, AuditError> {
    File::open(path).map_err(|e| AuditError::io(path.display().to_string(), e))
}

/// Load and group the action file into a ledger
pub fn load_ledger(path: &Path) -> Result<ActionLedger, AuditError> {
    let records = parse_actions(open(path)?)?;
    log::info!("loaded {} action records from {}", records.len(), path.display());
    Ok(ActionLedger::from_records(records))
}

/// Load the match file into a registry
pub fn load_registry(path: &Path) -> Result<MatchRegistry, AuditError> {
    let matches = parse_matches(open(path)?)?;
    log::info!("loaded {} match records from {}", matches.len(), path.display());
    Ok(MatchRegistry::new(matches))
}

/// Write the rendered report, replacing any previous file
pub fn write_report(path: &Path, report: &AuditReport) -> Result<(), AuditError> {
    let io_err = |e| AuditError::io(path.display().to_string(), e);
    let mut file = File::create(path).map_err(io_err)?;
    file.write_all(report.render().as_bytes()).map_err(io_err)?;
    file.flush().map_err(io_err)?;
    log::info!("report written to {}", path.display());
    Ok(())
}
