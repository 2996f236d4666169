//! Audit record persistence.

use std::path::Path;

use lottery_engine::AuditRecord;
use tracing::info;

use crate::errors::CliError;

pub fn write_audit(path: &Path, record: &AuditRecord) -> Result<(), CliError> {
    let json = record.to_json_pretty()?;
    std::fs::write(path, json).map_err(|e| CliError::io(path, e))?;
    info!(path = %path.display(), entrants = record.all_entrants.len(), "wrote audit record");
    Ok(())
}

pub fn read_audit(path: &Path) -> Result<AuditRecord, CliError> {
    let json = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
    Ok(AuditRecord::from_json(&json)?)
}
