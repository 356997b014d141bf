//! Backend liveness check.

use wakedeck_core::Session;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output;

pub async fn handle(session: &Session, global: &GlobalOpts) -> Result<(), CliError> {
    let health = session.client().health().await?;
    let url = session.config().base_url.to_string();

    let out = output::render_single(
        &global.output,
        &health,
        |h| {
            let mut lines = vec![format!("URL:        {url}"), format!("Status:     {}", h.status)];
            if let Some(ref service) = h.service {
                lines.push(format!("Service:    {service}"));
            }
            if let Some(ref ts) = h.timestamp {
                lines.push(format!("Timestamp:  {ts}"));
            }
            lines.join("\n")
        },
        |h| h.status.clone(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}
