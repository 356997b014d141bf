//! Wake-on-LAN and reachability probes.

use std::fmt::Write as _;

use wakedeck_core::{PingOutcome, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::util;

pub async fn wake(session: &Session, identifier: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = session.client().load().await?;
    let device = util::resolve_device(&snapshot, identifier)?;

    session.client().wake(&device).await?;

    let out = output::render_single(
        &global.output,
        &device,
        |_| String::new(),
        |d| d.id.to_string(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

/// Ping a tracked device (by id, IP or MAC) or any IPv4 address.
pub async fn ping(session: &Session, target: &str, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = session.client().load().await?;
    let ip = util::find_device(&snapshot, target).map_or_else(|| target.to_owned(), |d| d.ip);

    let outcome = session.client().ping(&ip).await?;

    let out = output::render_single(&global.output, &outcome, ping_detail, |p| {
        if p.reachable { "up".into() } else { "down".into() }
    })?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn ping_detail(p: &PingOutcome) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Target:     {}", p.target);
    let _ = writeln!(out, "IP:         {}", p.ip);
    let _ = write!(
        out,
        "Reachable:  {}",
        if p.reachable { "yes" } else { "no" }
    );
    if let Some(ms) = p.response_time_ms {
        let _ = write!(out, "\nResponse:   {ms}ms");
    }
    out
}
