//! Shared helpers for command handlers.

use std::io::{self, IsTerminal};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use wakedeck_core::{DeviceRecord, InventorySnapshot, MacAddress};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve a device identifier (id, IP or MAC) against a snapshot.
pub fn find_device(snapshot: &InventorySnapshot, identifier: &str) -> Option<DeviceRecord> {
    let wanted_mac = MacAddress::comparable(identifier);
    snapshot
        .devices()
        .iter()
        .find(|d| {
            d.id.as_str() == identifier
                || d.ip == identifier
                || d.mac.as_deref().map(MacAddress::comparable).as_ref() == Some(&wanted_mac)
        })
        .cloned()
}

/// Like [`find_device`], failing with a not-found error.
pub fn resolve_device(snapshot: &InventorySnapshot, identifier: &str) -> Result<DeviceRecord, CliError> {
    find_device(snapshot, identifier).ok_or_else(|| CliError::device_not_found(identifier))
}

/// Fail early when a prompt would be needed but nobody can answer it.
pub fn require_interactive(action: &str, yes_flag: bool) -> Result<(), CliError> {
    if yes_flag || io::stdin().is_terminal() {
        return Ok(());
    }
    Err(CliError::NonInteractiveRequiresYes {
        action: action.into(),
    })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()?;
    Ok(confirmed)
}

/// Spinner on stderr for long-running requests. Hidden when quiet or
/// when stderr is not a terminal.
pub fn spinner(message: &str, global: &GlobalOpts) -> ProgressBar {
    if global.quiet || !io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_owned());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
