//! Add, update and delete handlers.

use wakedeck_core::{DeleteOutcome, DeviceDraft, DeviceRecord, Session};

use crate::cli::{AddArgs, GlobalOpts, UpdateArgs};
use crate::error::CliError;
use crate::output;

use super::{devices, util};

pub async fn add(session: &Session, args: AddArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let draft = DeviceDraft::new(args.name, args.ip, args.mac);
    session.client().add_device(&draft).await?;

    // The add reloaded the store; echo the new record when it is there.
    if let Some(device) = session.store().device_by_ip(draft.ip.trim()) {
        print_device(&device, global)?;
    }
    Ok(())
}

pub async fn update(session: &Session, args: UpdateArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = session.client().load().await?;
    let current = util::resolve_device(&snapshot, &args.device)?;

    let draft = merge(&current, args.name, args.ip, args.mac);
    session.client().update_device(&current.id, &draft).await?;

    if let Some(device) = session.store().device(&current.id) {
        print_device(&device, global)?;
    }
    Ok(())
}

pub async fn delete(session: &Session, identifier: &str, global: &GlobalOpts) -> Result<(), CliError> {
    util::require_interactive("delete", global.yes)?;

    let snapshot = session.client().load().await?;
    let device = util::resolve_device(&snapshot, identifier)?;

    let mut prompt_error = None;
    let outcome = session
        .client()
        .delete_device(&device.id, |label| {
            util::confirm(&format!("Delete device {label}?"), global.yes).unwrap_or_else(|e| {
                prompt_error = Some(e);
                false
            })
        })
        .await?;

    if let Some(e) = prompt_error {
        return Err(e);
    }
    if outcome == DeleteOutcome::Cancelled && !global.quiet {
        eprintln!("Cancelled");
    }
    Ok(())
}

/// Omitted fields keep the tracked device's current values. An empty
/// `--mac` clears the hardware address.
fn merge(
    current: &DeviceRecord,
    name: Option<String>,
    ip: Option<String>,
    mac: Option<String>,
) -> DeviceDraft {
    DeviceDraft {
        name: name.unwrap_or_else(|| current.name.clone()),
        ip: ip.unwrap_or_else(|| current.ip.clone()),
        mac: mac.or_else(|| current.mac.clone()),
    }
}

fn print_device(device: &DeviceRecord, global: &GlobalOpts) -> Result<(), CliError> {
    let out = devices::render_device(device, global)?;
    output::print_output(&out, global.quiet);
    Ok(())
}
