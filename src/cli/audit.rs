//! Audit log command

use crate::error::AtlasResult;
use crate::storage::Storage;

/// Handle `atlas audit`, newest entry first
pub fn handle_audit_command(storage: &Storage, limit: usize) -> AtlasResult<()> {
    let entries = storage.audit().read_recent(limit)?;
    if entries.is_empty() {
        println!("No audit entries.");
        return Ok(());
    }

    for entry in entries.iter().rev() {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
