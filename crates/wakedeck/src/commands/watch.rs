//! Live inventory view.
//!
//! Starts the periodic refresh timer, re-renders whenever the store
//! changes and prints notifications as they arrive. Ctrl-C cancels the
//! timer before exiting.

use chrono::{DateTime, Duration, Local};
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use wakedeck_core::{InventorySnapshot, InventoryStream, Notification, Session};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::devices;

pub async fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let mut notes = session.notifications();
    let mut inventory = session.subscribe_inventory();
    let color = output::should_color_stderr(&global.color);

    // Every load replaces or resets the store, so the first frame comes
    // through `changed()` below. A failed first load is reported like any
    // later one; keep watching.
    if let Err(e) = session.client().load().await {
        debug!(error = %e, "initial load failed");
    }
    session.scheduler().start();

    let result = watch_loop(session, global, &mut notes, &mut inventory, color).await;
    session.shutdown().await;
    result
}

async fn watch_loop(
    session: &Session,
    global: &GlobalOpts,
    notes: &mut broadcast::Receiver<Notification>,
    inventory: &mut InventoryStream,
    color: bool,
) -> Result<(), CliError> {
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            biased;
            _ = &mut ctrl_c => {
                debug!("interrupted, stopping watch");
                break;
            }
            note = notes.recv() => match note {
                Ok(note) => {
                    if !global.quiet {
                        output::print_notification(&note, color);
                    }
                }
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "notifications dropped"),
                Err(RecvError::Closed) => break,
            },
            snapshot = inventory.changed() => match snapshot {
                Some(snapshot) => render(session, &snapshot, global)?,
                None => break,
            },
        }
    }

    Ok(())
}

fn render(session: &Session, snapshot: &InventorySnapshot, global: &GlobalOpts) -> Result<(), CliError> {
    let body = devices::render_inventory(snapshot, global)?;
    let out = if matches!(global.output, OutputFormat::Table) {
        let interval = session.scheduler().interval().as_secs();
        let every = if interval == 0 {
            "refresh off".to_owned()
        } else {
            format!("every {interval}s")
        };
        format!(
            "wakedeck · {} · {every} · {}\n{body}",
            session.config().base_url,
            freshness(session.store().data_age(), Local::now())
        )
    } else {
        body
    };
    output::print_output(&out, global.quiet);
    Ok(())
}

/// After a failed reload the store is empty but the last good load is
/// still known; say how stale it is.
fn freshness(age: Option<Duration>, now: DateTime<Local>) -> String {
    match age {
        None => "not loaded yet".to_owned(),
        Some(age) if age.num_seconds() < 1 => format!("updated {}", now.format("%H:%M:%S")),
        Some(age) => format!("last good load {}s ago", age.num_seconds()),
    }
}
