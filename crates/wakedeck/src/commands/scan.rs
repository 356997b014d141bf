//! Status sweep handler.

use wakedeck_core::{ScanOutcome, Session};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

use super::{devices, util};

pub async fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let spinner = util::spinner("Scanning network…", global);
    let outcome = session.scheduler().scan().await;
    spinner.finish_and_clear();

    match outcome? {
        ScanOutcome::Completed { .. } => {
            // The scan reloaded the store; show what it found.
            let out = devices::render_inventory(&session.store().snapshot(), global)?;
            output::print_output(&out, global.quiet);
        }
        ScanOutcome::AlreadyRunning => {
            if !global.quiet {
                eprintln!("A scan is already running");
            }
        }
    }
    Ok(())
}
