//! Config subcommand handlers.

use dialoguer::Input;

use wakedeck_config::{self as config, Config, DEFAULT_URL, Profile};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("wakedeck configuration wizard");
            eprintln!("   Config path: {}\n", config_path.display());

            // Keep other profiles when re-running the wizard.
            let mut cfg = config::load_config()?;

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()?;

            let url: String = Input::new()
                .with_prompt("Backend URL")
                .default(DEFAULT_URL.into())
                .validate_with(|raw: &String| config::parse_url(raw).map(|_| ()).map_err(|e| e.to_string()))
                .interact_text()?;

            let refresh_interval: u64 = Input::new()
                .with_prompt("Refresh interval in seconds (0 disables)")
                .default(cfg.defaults.refresh_interval)
                .interact_text()?;

            let profile = Profile {
                url,
                refresh_interval: (refresh_interval != cfg.defaults.refresh_interval)
                    .then_some(refresh_interval),
                timeout: None,
            };
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());

            let path = config::save_config(&cfg)?;

            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: wakedeck health");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = match global.output {
                OutputFormat::Table => toml::to_string_pretty(&cfg)?,
                _ => output::render_single(
                    &global.output,
                    &cfg,
                    |_| String::new(),
                    profile_names,
                )?,
            };
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }
    }
}

fn profile_names(cfg: &Config) -> String {
    cfg.profiles.keys().cloned().collect::<Vec<_>>().join("\n")
}
