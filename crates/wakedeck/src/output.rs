//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.
//! Notifications go to stderr so stdout stays machine-readable.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use wakedeck_core::{DeviceStatus, Notification, NotificationLevel, StatusCounts};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

fn color_enabled(mode: &ColorMode, is_terminal: bool) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => is_terminal && std::env::var("NO_COLOR").is_err(),
    }
}

/// Whether stdout output should be colored.
pub fn should_color(mode: &ColorMode) -> bool {
    color_enabled(mode, io::stdout().is_terminal())
}

/// Whether stderr output (notifications) should be colored.
pub fn should_color_stderr(mode: &ColorMode) -> bool {
    color_enabled(mode, io::stderr().is_terminal())
}

pub fn paint_status(status: DeviceStatus, color: bool) -> String {
    let label = status.label();
    if !color {
        return label.to_owned();
    }
    match status {
        DeviceStatus::Online => label.green().to_string(),
        DeviceStatus::Offline => label.red().to_string(),
        DeviceStatus::Unknown => label.yellow().to_string(),
    }
}

/// One-line inventory summary: "3 devices · 2 online · 1 offline · 0 unknown".
pub fn counts_line(counts: &StatusCounts, color: bool) -> String {
    let noun = if counts.total == 1 { "device" } else { "devices" };
    let online = format!("{} online", counts.online);
    let offline = format!("{} offline", counts.offline);
    let unknown = format!("{} unknown", counts.unknown);
    if color {
        format!(
            "{} {noun} · {} · {} · {}",
            counts.total,
            online.green(),
            offline.red(),
            unknown.yellow()
        )
    } else {
        format!("{} {noun} · {online} · {offline} · {unknown}", counts.total)
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: &OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(data.iter().map(&id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render a single serde-serializable item in the chosen format.
///
/// Table rendering uses a custom `detail_fn` that returns a pre-formatted
/// string, since single-item views don't use `Tabled` derive.
pub fn render_single<T>(
    format: &OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table => Ok(detail_fn(data)),
        OutputFormat::Json => render_json(data, false),
        OutputFormat::JsonCompact => render_json(data, true),
        OutputFormat::Yaml => render_yaml(data),
        OutputFormat::Plain => Ok(id_fn(data)),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print one notification to stderr.
pub fn print_notification(note: &Notification, color: bool) {
    let marker = match note.level {
        NotificationLevel::Success => "✓",
        NotificationLevel::Info => "•",
        NotificationLevel::Warning => "!",
        NotificationLevel::Error => "✗",
    };
    let line = if color {
        match note.level {
            NotificationLevel::Success => format!("{} {}", marker.green(), note.message),
            NotificationLevel::Info => format!("{} {}", marker.cyan(), note.message),
            NotificationLevel::Warning => format!("{} {}", marker.yellow(), note.message),
            NotificationLevel::Error => format!("{} {}", marker.red(), note.message),
        }
    } else {
        format!("{marker} {}", note.message)
    };
    let mut stderr = io::stderr().lock();
    let _ = writeln!(stderr, "{line}");
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

fn render_json<T: serde::Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(out)
}

fn render_yaml<T: serde::Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    Ok(serde_yaml::to_string(data)?)
}
