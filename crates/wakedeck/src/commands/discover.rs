//! Discovery handler: list hosts that are not tracked yet, optionally
//! adding them one by one.

use dialoguer::Input;
use tabled::Tabled;

use wakedeck_core::{AddCandidate, Session};

use crate::cli::{DiscoverArgs, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct CandidateRow {
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn candidate_row(c: &AddCandidate) -> CandidateRow {
    CandidateRow {
        ip: c.host.ip.clone(),
        name: c.draft.name.clone(),
        mac: c.host.mac.clone().unwrap_or_else(|| "N/A".into()),
        status: c.host.status.label().to_owned(),
    }
}

pub async fn handle(session: &Session, args: DiscoverArgs, global: &GlobalOpts) -> Result<(), CliError> {
    if args.add {
        util::require_interactive("discover --add", global.yes)?;
    }

    // Reconciliation compares against the current inventory.
    session.client().load().await?;

    let spinner = util::spinner("Discovering devices…", global);
    let candidates = session.discovery().discover().await;
    spinner.finish_and_clear();
    let candidates = candidates?;

    let out = output::render_list(&global.output, &candidates, candidate_row, |c| {
        c.host.ip.clone()
    })?;
    if !candidates.is_empty() {
        output::print_output(&out, global.quiet);
    }

    if args.add {
        for candidate in &candidates {
            add_candidate(session, candidate, global).await?;
        }
    }
    Ok(())
}

/// Offer one candidate. The pre-filled name can be edited before the
/// add goes through the ordinary validated path.
async fn add_candidate(session: &Session, candidate: &AddCandidate, global: &GlobalOpts) -> Result<(), CliError> {
    let mut draft = candidate.draft.clone();
    if !global.yes {
        let prompt = format!("Add {} ({})?", draft.name, draft.ip);
        if !util::confirm(&prompt, false)? {
            return Ok(());
        }
        draft.name = Input::new()
            .with_prompt("Name")
            .with_initial_text(draft.name.clone())
            .interact_text()?;
    }

    session.discovery().commit(&draft).await?;
    Ok(())
}
