//! srtshift CLI entrypoint.
//!
//! Loads an SRT file, shows or saves it with a uniform time offset applied,
//! and keeps a recent-files history in the user config directory. Paths are
//! taken from the command line; the core performs no path selection itself.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, bail, Context, Result};
use directories::ProjectDirs;

use srtshift_core::config::{ConfigManager, ConfigSection};
use srtshift_core::logging::init_tracing;
use srtshift_core::projection::Column;
use srtshift_core::session::{BackupPolicy, EditSession, NoBackup, RenameBackup};
use srtshift_core::timecode::Timecode;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [options] <file.srt>\n  {program} --recent\n\nOptions:\n  --shift <ms>        offset magnitude in milliseconds (added by default)\n  --sub               subtract the offset instead of adding it\n  --align <N>=<TIME>  derive the offset so entry row N (1-based) starts at\n                      TIME (HH:MM:SS,mmm); overrides --shift\n  --renumber          renumber entries sequentially by row\n  --output <path>     save the shifted track to <path>; an existing file is\n                      backed up first (.bak, .bak1, ...)\n  --no-backup         overwrite the output without the backup step\n  --list              print the projected table even when saving\n  --recent            print the recent-files history and exit\n  --version           print the version and exit"
    );
}

#[derive(Debug, Default)]
struct CliOptions {
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    shift_ms: Option<u64>,
    subtract: bool,
    align: Option<(usize, Timecode)>,
    renumber: bool,
    list: bool,
    no_backup: bool,
    recent: bool,
    version: bool,
}

fn parse_options(args: impl Iterator<Item = String>) -> Result<CliOptions> {
    let mut options = CliOptions::default();
    let mut args = args;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--shift" => {
                let value = args.next().ok_or_else(|| anyhow!("--shift needs a value"))?;
                let ms = value
                    .parse::<u64>()
                    .with_context(|| format!("invalid --shift value '{value}'"))?;
                options.shift_ms = Some(ms);
            }
            "--sub" => options.subtract = true,
            "--align" => {
                let value = args.next().ok_or_else(|| anyhow!("--align needs a value"))?;
                options.align = Some(parse_align(&value)?);
            }
            "--renumber" => options.renumber = true,
            "--output" | "-o" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("--output needs a path"))?;
                options.output = Some(PathBuf::from(value));
            }
            "--no-backup" => options.no_backup = true,
            "--list" => options.list = true,
            "--recent" => options.recent = true,
            "--version" => options.version = true,
            other if other.starts_with('-') => bail!("unknown option '{other}'"),
            other => {
                if options.input.is_some() {
                    bail!("more than one input file given");
                }
                options.input = Some(PathBuf::from(other));
            }
        }
    }

    Ok(options)
}

/// Parse `N=HH:MM:SS,mmm` into a 0-based row and the desired start time.
fn parse_align(value: &str) -> Result<(usize, Timecode)> {
    let (row, time) = value
        .split_once('=')
        .ok_or_else(|| anyhow!("--align expects <row>=<HH:MM:SS,mmm>"))?;
    let row: usize = row
        .trim()
        .parse()
        .with_context(|| format!("invalid --align row '{row}'"))?;
    if row == 0 {
        bail!("--align rows are 1-based");
    }
    let desired = Timecode::parse(time).with_context(|| format!("invalid --align time '{time}'"))?;
    Ok((row - 1, desired))
}

fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "srtshift").map(|dirs| dirs.config_dir().join("settings.toml"))
}

fn print_track(session: &EditSession) {
    let projection = session.projection();
    for entry in session.track().entries() {
        println!(
            "{:>5}  {} --> {}  {}",
            projection.projected_value(entry, Column::Index),
            projection.projected_value(entry, Column::StartTime),
            projection.projected_value(entry, Column::EndTime),
            projection.projected_value(entry, Column::Text).replace('\n', " | "),
        );
    }
}

fn run(options: CliOptions) -> Result<()> {
    if options.version {
        println!("srtshift {}", srtshift_core::version());
        return Ok(());
    }

    let config_path = config_path().ok_or_else(|| anyhow!("no home directory found"))?;
    let mut config = ConfigManager::new(&config_path);
    config
        .load_or_create()
        .with_context(|| format!("loading config from '{}'", config_path.display()))?;

    init_tracing(config.settings().logging.level);
    tracing::debug!(config = %config_path.display(), "configuration loaded");

    if options.recent {
        for path in config.settings().history.recent() {
            println!("{path}");
        }
        return Ok(());
    }

    let input = options
        .input
        .ok_or_else(|| anyhow!("no input file given (try --recent for history)"))?;

    let mut session = EditSession::new(config.settings().history.clone());
    session
        .load(&input)
        .with_context(|| format!("loading '{}'", input.display()))?;

    if let Some(magnitude_ms) = options.shift_ms {
        session.set_offset(magnitude_ms, !options.subtract);
    }
    if let Some((row, desired)) = options.align {
        session
            .align_entry(row, desired)
            .with_context(|| format!("aligning entry row {}", row + 1))?;
        let offset = session.offset();
        eprintln!("derived offset: {:+} ms", offset.signed_ms());
    }
    if options.renumber {
        session.renumber();
    }

    if options.list || options.output.is_none() {
        print_track(&session);
    }

    if let Some(output) = &options.output {
        let backup: &dyn BackupPolicy = if options.no_backup {
            &NoBackup
        } else {
            &RenameBackup
        };
        session
            .save(output, backup)
            .with_context(|| format!("saving '{}'", output.display()))?;
        println!("saved {} entries to '{}'", session.track().len(), output.display());
    }

    // Persist the updated history for the next run.
    config.settings_mut().history = session.into_history();
    config.update_section(ConfigSection::History)?;

    Ok(())
}

fn main() -> ExitCode {
    let program = std::env::args().next().unwrap_or_else(|| "srtshift".into());

    let options = match parse_options(std::env::args().skip(1)) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err:#}\n");
            print_usage(&program);
            return ExitCode::from(2);
        }
    };

    match run(options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
