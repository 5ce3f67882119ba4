//! List command (sizing report)

use anyhow::Result;

use crate::output;
use crate::roots;
use crate::sweeper;

/// Print `<name>: <size> bytes` for every entry of every cache root.
pub fn list(deep: bool, human: bool) -> Result<()> {
    let roots = roots::detect_cache_roots();
    if roots.is_empty() {
        output::print_info("No cache directory is known for this platform.");
        return Ok(());
    }

    sweeper::report_with(&roots, deep, |line| match line {
        Ok(entry) => output::print_report_entry(&entry, human),
        Err(err) => output::print_error(&err),
    });
    Ok(())
}
