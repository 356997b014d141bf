//! Command dispatch: bridges CLI args -> session operations -> output.

pub mod actions;
pub mod config_cmd;
pub mod devices;
pub mod discover;
pub mod health;
pub mod mutate;
pub mod scan;
pub mod util;
pub mod watch;

use tokio::sync::broadcast::Receiver;

use wakedeck_core::{Notification, NotificationLevel, Session};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;
use crate::output;

/// Dispatch a backend-bound command to the appropriate handler.
///
/// Notifications raised while the command runs are printed to stderr
/// afterwards. When the command fails, error-level notifications are left
/// to the miette report so the failure is shown once.
pub async fn dispatch(cmd: Command, session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    // Watch mode streams its own notifications.
    if let Command::Watch = cmd {
        return watch::handle(session, global).await;
    }

    let mut notes = session.notifications();
    let result = match cmd {
        Command::Devices(args) => devices::handle(session, args, global).await,
        Command::Refresh => devices::refresh(session, global).await,
        Command::Scan => scan::handle(session, global).await,
        Command::Discover(args) => discover::handle(session, args, global).await,
        Command::Wake { device } => actions::wake(session, &device, global).await,
        Command::Ping { target } => actions::ping(session, &target, global).await,
        Command::Add(args) => mutate::add(session, args, global).await,
        Command::Update(args) => mutate::update(session, args, global).await,
        Command::Delete { device } => mutate::delete(session, &device, global).await,
        Command::Health => health::handle(session, global).await,
        // Handled before dispatch
        Command::Watch | Command::Config(_) | Command::Completions(_) => Ok(()),
    };

    flush_notifications(&mut notes, global, result.is_err());
    result
}

fn flush_notifications(notes: &mut Receiver<Notification>, global: &GlobalOpts, failed: bool) {
    let color = output::should_color_stderr(&global.color);
    while let Ok(note) = notes.try_recv() {
        if failed && note.level == NotificationLevel::Error {
            continue;
        }
        if global.quiet && note.level != NotificationLevel::Error {
            continue;
        }
        output::print_notification(&note, color);
    }
}
