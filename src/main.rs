//! CLI entrypoint for `linuxuser`.
//!
//! Parses command-line arguments, builds a registry over the given passwd and
//! shadow files, runs one lookup and prints the result as a table, a detail
//! view or CSV.
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use linuxuser::{
    config::{DEFAULT_PASSWD_PATH, DEFAULT_SHADOW_PATH, RegistryConfig},
    export::write_csv,
    identity::{FixedIdentity, Identity, ProcessIdentity},
    io::DEFAULT_MMAP_THRESHOLD_BYTES,
    passwd::PasswdEntry,
    registry::Registry,
    report::{render_entry, render_table},
    shadow::UnmatchedShadow,
};
use log::{LevelFilter, error, warn};

#[derive(Parser, Debug)]
#[command(
    name = "linuxuser",
    version,
    about = "Look up accounts in passwd/shadow registries"
)]
struct Args {
    /// Path to the account registry
    #[arg(long, global = true, default_value = DEFAULT_PASSWD_PATH)]
    passwd: PathBuf,

    /// Path to the shadow registry (only read when running as uid 0)
    #[arg(long, global = true, default_value = DEFAULT_SHADOW_PATH)]
    shadow: PathBuf,

    /// Evaluate as this effective uid instead of the process's own
    #[arg(long = "as-uid", global = true)]
    as_uid: Option<u32>,

    /// Accounts without a shadow line take the last shadow line instead of an
    /// empty entry
    #[arg(long = "fall-through", global = true)]
    fall_through: bool,

    /// Override mmap threshold in bytes. If zero, disable mmap.
    #[arg(long = "mmap-threshold", global = true, default_value_t = DEFAULT_MMAP_THRESHOLD_BYTES)]
    mmap_threshold: u64,

    /// Increase verbosity (-v, -vv)
    #[arg(short = 'v', global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Control color output (auto, always, never)
    #[arg(long = "color", global = true, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Output format
    #[arg(long = "format", global = true, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every account
    List,
    /// Show the account of the effective uid
    Current,
    /// Show the account with this name
    Lookup { name: String },
    /// Show the account with this uid
    Id {
        #[arg(allow_negative_numbers = true)]
        uid: i64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
}

enum Selection {
    All(Vec<PasswdEntry>),
    One(PasswdEntry),
    Missing,
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .try_init();
}

fn verify_inputs(args: &Args) -> Result<()> {
    if !args.passwd.exists() {
        bail!("passwd file not found: {}", args.passwd.display());
    }
    Ok(())
}

fn select<I: Identity>(registry: &Registry<I>, command: &Command) -> linuxuser::Result<Selection> {
    Ok(match command {
        Command::List => Selection::All(registry.all()?),
        Command::Current => Selection::One(registry.current()?),
        Command::Lookup { name } => registry
            .snapshot()?
            .find(name)
            .cloned()
            .map_or(Selection::Missing, Selection::One),
        Command::Id { uid } => registry
            .snapshot()?
            .find_id(*uid)
            .cloned()
            .map_or(Selection::Missing, Selection::One),
    })
}

fn emit(selection: &Selection, format: OutputFormat) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match (selection, format) {
        (Selection::All(entries), OutputFormat::Csv) => write_csv(entries, &mut out)?,
        (Selection::One(entry), OutputFormat::Csv) => {
            write_csv(std::slice::from_ref(entry), &mut out)?
        }
        (Selection::All(entries), OutputFormat::Table) => {
            let table = render_table(entries);
            let (header, rows) = table.split_once('\n').unwrap_or((table.as_str(), ""));
            writeln!(out, "{}", header.bold())?;
            if !rows.is_empty() {
                writeln!(out, "{}", rows)?;
            }
        }
        (Selection::One(entry), OutputFormat::Table) => {
            writeln!(out, "{}", render_entry(entry))?;
        }
        (Selection::Missing, _) => {}
    }
    out.flush().context("flush stdout")?;
    Ok(())
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);
    // Configure color policy
    match args.color {
        ColorChoice::Always => {
            colored::control::set_override(true);
        }
        ColorChoice::Never => {
            colored::control::set_override(false);
        }
        ColorChoice::Auto => {}
    }
    if let Err(e) = verify_inputs(&args) {
        error!("{}", e);
        std::process::exit(2);
    }

    let unmatched = if args.fall_through {
        UnmatchedShadow::FallThrough
    } else {
        UnmatchedShadow::Empty
    };
    let config = RegistryConfig::new()
        .with_passwd_path(&args.passwd)
        .with_shadow_path(&args.shadow)
        .with_mmap_threshold(args.mmap_threshold)
        .with_unmatched_shadow(unmatched);

    let selected = match args.as_uid {
        Some(uid) => select(&Registry::new(config, FixedIdentity::new(uid)), &args.command),
        None => select(&Registry::new(config, ProcessIdentity), &args.command),
    };
    let selection = match selected {
        Ok(s) => s,
        Err(e) => {
            error!("{}", e);
            std::process::exit(3);
        }
    };

    if let Selection::Missing = selection {
        warn!("no matching account");
        std::process::exit(4);
    }

    if let Err(e) = emit(&selection, args.format) {
        error!("failed to write output: {:#}", e);
        std::process::exit(5);
    }
}
