//! Init-config command implementation.

use super::CliError;
use gridcrawl::GameConfig;
use std::path::Path;

/// Execute the init-config command.
///
/// # Errors
///
/// Returns an error if the file exists (without `force`) or cannot be written.
pub(crate) fn execute(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError::new(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    GameConfig::default().save(path)?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
