//! Device listing, detail and reload handlers.

use std::fmt::Write as _;

use tabled::Tabled;

use wakedeck_core::{DeviceRecord, InventorySnapshot, Session};

use crate::cli::{DevicesArgs, DevicesCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ────────────────────────────────────────────────────────

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Last Seen")]
    last_seen: String,
}

fn device_row(d: &DeviceRecord) -> DeviceRow {
    DeviceRow {
        id: d.id.to_string(),
        name: d.name.clone(),
        ip: d.ip.clone(),
        mac: d.mac_label().to_owned(),
        status: d.status.label().to_owned(),
        last_seen: d.last_seen_label(),
    }
}

fn detail(d: &DeviceRecord, color: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:         {}", d.id);
    let _ = writeln!(out, "Name:       {}", d.name);
    let _ = writeln!(out, "IP:         {}", d.ip);
    let _ = writeln!(out, "MAC:        {}", d.mac_label());
    let _ = writeln!(out, "Status:     {}", output::paint_status(d.status, color));
    let _ = writeln!(out, "Last seen:  {}", d.last_seen_label());
    let wake = if d.can_wake() {
        "available"
    } else {
        "unavailable (no MAC address)"
    };
    let _ = write!(out, "Wake:       {wake}");
    out
}

// ── Shared renderers ─────────────────────────────────────────────────

/// Render the whole inventory. Tables get a status summary footer.
pub fn render_inventory(snapshot: &InventorySnapshot, global: &GlobalOpts) -> Result<String, CliError> {
    let mut out = output::render_list(
        &global.output,
        snapshot.devices(),
        device_row,
        |d| d.id.to_string(),
    )?;

    if matches!(global.output, OutputFormat::Table) {
        let color = output::should_color(&global.color);
        let _ = write!(out, "\n{}", output::counts_line(&snapshot.counts(), color));
        if let Some(scan) = snapshot.last_scan() {
            let _ = write!(out, "\nLast scan: {}", scan.format("%Y-%m-%d %H:%M:%S"));
        }
    }
    Ok(out)
}

pub fn render_device(device: &DeviceRecord, global: &GlobalOpts) -> Result<String, CliError> {
    let color = output::should_color(&global.color);
    output::render_single(
        &global.output,
        device,
        |d| detail(d, color),
        |d| d.id.to_string(),
    )
}

// ── Handlers ─────────────────────────────────────────────────────────

pub async fn handle(session: &Session, args: DevicesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = session.client().load().await?;

    match args.command {
        DevicesCommand::List => {
            let out = render_inventory(&snapshot, global)?;
            output::print_output(&out, global.quiet);
        }
        DevicesCommand::Get { device } => {
            let device = util::resolve_device(&snapshot, &device)?;
            let out = render_device(&device, global)?;
            output::print_output(&out, global.quiet);
        }
    }
    Ok(())
}

/// Manual reload, independent of any scan state. Prints status counts.
pub async fn refresh(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    session.scheduler().refresh().await?;

    let counts = session.store().snapshot().counts();
    let color = output::should_color(&global.color);
    let out = output::render_single(
        &global.output,
        &counts,
        |c| output::counts_line(c, color),
        |c| c.total.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
