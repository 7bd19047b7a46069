mod config;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Deserialize;

use pmo_core::{
    fix, junk, organize, rename, CleanJunkOptions, FixOptions, OrganizeOptions, RenameOptions,
    RunSummary,
};

use config::Config;

#[derive(Parser)]
#[command(
    name = "pmo-rs-cli",
    version,
    about = "Photo Meta Organizer - organize, rename and fix photos by capture date"
)]
struct Cli {
    /// Path to the JSON configuration file (default: pmo.json if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Organize photos into the date-bucketed target tree
    Organize {
        /// Source directory (overrides source_dir in config)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Target directory (overrides target_dir in config)
        #[arg(short, long)]
        target: Option<PathBuf>,

        /// Print operations without executing
        #[arg(long)]
        dry_run: bool,

        /// Perform filesystem changes (dry-run is the default)
        #[arg(long, conflicts_with = "dry_run")]
        execute: bool,
    },

    /// Batch rename photos to YYYYMMDD_HHMMSS_OriginalName.ext
    Rename {
        /// Directory to rename (overrides target_dir in config)
        #[arg(short, long)]
        target: Option<PathBuf>,

        /// Print operations without executing
        #[arg(long)]
        dry_run: bool,

        /// Perform filesystem changes (dry-run is the default)
        #[arg(long, conflicts_with = "dry_run")]
        execute: bool,
    },

    /// Stamp legacy archives with dates parsed from folder names
    Fix {
        /// Directory to fix (overrides fix_dir in config)
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Print operations without executing
        #[arg(long)]
        dry_run: bool,

        /// Perform filesystem changes (dry-run is the default)
        #[arg(long, conflicts_with = "dry_run")]
        execute: bool,
    },

    /// Move small files into a junk/ quarantine folder
    CleanJunk {
        /// Directory to scan (overrides root_dir in config)
        #[arg(short, long)]
        root: Option<PathBuf>,

        /// Size threshold in MB (overrides size_threshold_mb in config)
        #[arg(long)]
        threshold: Option<f64>,

        /// Print operations without executing
        #[arg(long)]
        dry_run: bool,

        /// Perform filesystem changes (dry-run is the default)
        #[arg(long, conflicts_with = "dry_run")]
        execute: bool,
    },

    /// Execute a task described in a JSON parameters file
    RunTask {
        /// Path to the JSON parameters file
        params_file: PathBuf,
    },
}

/// JSON parameters file for run-task
#[derive(Debug, Deserialize)]
struct TaskParams {
    task: String,
    #[serde(default)]
    input_dirs: Vec<PathBuf>,
    #[serde(default)]
    output_dir: Option<PathBuf>,
    #[serde(default, alias = "size_threshold_mb")]
    threshold: Option<f64>,
    #[serde(default)]
    dry_run: Option<bool>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Organize {
            source,
            target,
            dry_run,
            execute,
        } => {
            let dry_run = effective_dry_run(dry_run, execute, &config);
            cmd_organize(&config, source, target, dry_run)
        }
        Command::Rename {
            target,
            dry_run,
            execute,
        } => {
            let dry_run = effective_dry_run(dry_run, execute, &config);
            cmd_rename(&config, target, dry_run)
        }
        Command::Fix {
            source,
            dry_run,
            execute,
        } => {
            let dry_run = effective_dry_run(dry_run, execute, &config);
            cmd_fix(&config, source, dry_run)
        }
        Command::CleanJunk {
            root,
            threshold,
            dry_run,
            execute,
        } => {
            let dry_run = effective_dry_run(dry_run, execute, &config);
            cmd_clean_junk(&config, root, threshold, dry_run)
        }
        Command::RunTask { params_file } => run_task(&config, &params_file),
    }
}

/// --dry-run forces a dry run, --execute forces live, else config decides
/// (default true).
fn effective_dry_run(dry_run_flag: bool, execute_flag: bool, config: &Config) -> bool {
    if dry_run_flag {
        true
    } else if execute_flag {
        false
    } else {
        config.settings.dry_run
    }
}

fn cmd_organize(
    config: &Config,
    source: Option<PathBuf>,
    target: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let options = OrganizeOptions {
        source_dir: require_dir(source, &config.directories.source_dir, "source_dir")?,
        target_dir: require_dir(target, &config.directories.target_dir, "target_dir")?,
        extensions: config.extensions.to_extensions(),
        dry_run,
    };
    eprintln!(
        "Organizing {} -> {}{}",
        options.source_dir.display(),
        options.target_dir.display(),
        mode_suffix(dry_run)
    );
    run_flow(dry_run, |progress| organize::organize(&options, progress))
}

fn cmd_rename(config: &Config, target: Option<PathBuf>, dry_run: bool) -> anyhow::Result<()> {
    let options = RenameOptions {
        target_dir: require_dir(target, &config.directories.target_dir, "target_dir")?,
        extensions: config.extensions.to_extensions(),
        dry_run,
    };
    eprintln!(
        "Renaming under {}{}",
        options.target_dir.display(),
        mode_suffix(dry_run)
    );
    run_flow(dry_run, |progress| rename::rename(&options, progress))
}

fn cmd_fix(config: &Config, source: Option<PathBuf>, dry_run: bool) -> anyhow::Result<()> {
    let options = FixOptions {
        fix_dir: require_dir(source, &config.directories.fix_dir, "fix_dir")?,
        dry_run,
    };
    eprintln!(
        "Fixing dates under {}{}",
        options.fix_dir.display(),
        mode_suffix(dry_run)
    );
    run_flow(dry_run, |progress| fix::fix(&options, progress))
}

fn cmd_clean_junk(
    config: &Config,
    root: Option<PathBuf>,
    threshold: Option<f64>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let options = CleanJunkOptions {
        root_dir: require_dir(root, &config.directories.root_dir, "root_dir")?,
        size_threshold_mb: threshold.unwrap_or(config.settings.size_threshold_mb),
        dry_run,
    };
    eprintln!(
        "Cleaning files <= {} MB under {}{}",
        options.size_threshold_mb,
        options.root_dir.display(),
        mode_suffix(dry_run)
    );
    run_flow(dry_run, |progress| junk::clean_junk(&options, progress))
}

fn run_task(config: &Config, params_file: &std::path::Path) -> anyhow::Result<()> {
    let raw = fs::read_to_string(params_file)
        .with_context(|| format!("cannot read parameters file: {}", params_file.display()))?;
    let params: TaskParams = serde_json::from_str(&raw)
        .with_context(|| format!("malformed parameters file: {}", params_file.display()))?;

    let dry_run = params.dry_run.unwrap_or(config.settings.dry_run);
    let first_input = params.input_dirs.first().cloned();

    match params.task.as_str() {
        "organize" => cmd_organize(config, first_input, params.output_dir, dry_run),
        "fix" => cmd_fix(config, first_input, dry_run),
        "rename" => cmd_rename(config, first_input, dry_run),
        "clean-junk" => cmd_clean_junk(config, first_input, params.threshold, dry_run),
        other => bail!("unknown task: {other}"),
    }
}

fn require_dir(
    flag: Option<PathBuf>,
    configured: &Option<PathBuf>,
    name: &str,
) -> anyhow::Result<PathBuf> {
    flag.or_else(|| configured.clone())
        .with_context(|| format!("{name} is not set; add it to the config file or pass the flag"))
}

fn mode_suffix(dry_run: bool) -> &'static str {
    if dry_run {
        " [dry run]"
    } else {
        ""
    }
}

/// Drive one engine flow with a spinner; plan lines print above it.
fn run_flow(
    dry_run: bool,
    flow: impl FnOnce(&pmo_core::ProgressCallback) -> anyhow::Result<RunSummary>,
) -> anyhow::Result<()> {
    let t_total = std::time::Instant::now();

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner} [{prefix}] {pos} {msg}")
            .unwrap(),
    );

    let callback = {
        let pb = pb.clone();
        move |stage: &str, count: u64, message: &str| {
            if stage == "plan" {
                pb.println(message.to_string());
            } else {
                pb.set_prefix(stage.to_string());
                pb.set_position(count);
                pb.set_message(message.to_string());
            }
        }
    };

    let result = flow(&callback);
    pb.finish_and_clear();
    let summary = result?;

    for warning in &summary.warnings {
        eprintln!("warning: {warning}");
    }
    for error in &summary.errors {
        eprintln!("error: {error}");
    }
    eprintln!(
        "Done! {} processed, {} skipped, {} warnings, {} errors ({:.2}s)",
        summary.success,
        summary.skipped,
        summary.warnings.len(),
        summary.errors.len(),
        t_total.elapsed().as_secs_f64()
    );
    if dry_run {
        eprintln!("Dry run - nothing was changed. Pass --execute to apply.");
    }

    Ok(())
}
