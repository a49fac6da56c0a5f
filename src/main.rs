// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{error, info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::PathBuf;
use std::io::Write;
use clap::{Parser, ValueEnum, CommandFactory, Subcommand, Args};
use clap_complete::{generate, Shell};

use subpos::app_config::{self, Config};
use subpos::app_controller::Controller;
use subpos::file_utils::FileManager;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Assign position tags to overlapping subtitles (default command)
    #[command(alias = "position")]
    Resolve(ResolveArgs),

    /// Generate shell completions for subpos
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct ResolveArgs {
    /// Subtitle files (.srt, .ass, .ssa) or directories to process
    #[arg(value_name = "INPUT_PATH")]
    input_paths: Vec<PathBuf>,

    /// Remove every existing position tag before assigning new ones
    #[arg(short = 'C', long)]
    clean: bool,

    /// Keep position tags already present in the source
    #[arg(short, long)]
    ignore_existing: bool,

    /// Do not write a tag for subtitles at the default (bottom) position
    #[arg(short = 'd', long)]
    omit_default: bool,

    /// Keep white style colors when converting ASS files
    #[arg(short = 'w', long)]
    keep_white: bool,

    /// Suffix inserted before .srt in output names
    #[arg(short, long)]
    suffix: Option<String>,

    /// Write outputs into this directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the result to stdout instead of writing a file (single input only)
    #[arg(long)]
    stdout: bool,

    /// Force overwrite of existing output files
    #[arg(short, long)]
    force_overwrite: bool,

    /// Number of files processed at once
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Configuration file path
    #[arg(short, long, default_value = "subpos.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subpos - keep overlapping subtitles apart
///
/// Reads SRT or ASS subtitles and gives every caption a screen position
/// tag so that captions shown at the same time never sit on top of each other.
#[derive(Parser, Debug)]
#[command(name = "subpos")]
#[command(version)]
#[command(about = "Assign screen positions to overlapping subtitles")]
#[command(long_about = "subpos reads SRT or ASS subtitles and writes SRT files in which overlapping captions carry distinct {\\anN} position tags.

EXAMPLES:
    subpos movie.srt                    # Write movie.pos.srt
    subpos -i movie.srt                 # Keep tags already in the file
    subpos -C -d movie.ass              # Re-tag from scratch, leave bottom captions bare
    subpos -o out/ -s '' subs/          # Process a directory into out/
    subpos --stdout movie.srt           # Print the result
    subpos completions bash > subpos.bash

CONFIGURATION:
    Options may also be set in subpos.json (or the file given with --config-path).
    Command line flags override the file.")]
#[command(args_conflicts_with_subcommands = true)]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    resolve: ResolveArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and label for a level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("\x1B[1;31m", "ERROR"),
            Level::Warn => ("\x1B[1;33m", "WARN "),
            Level::Info => ("\x1B[1;32m", "INFO "),
            Level::Debug => ("\x1B[1;36m", "DEBUG"),
            Level::Trace => ("\x1B[1;35m", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, label) = Self::style_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "{}{} {} {}\x1B[0m", color, now, label, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; log::set_max_level does the filtering
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subpos", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Resolve(args)) => run_resolve(args).await,
        None => run_resolve(cli.resolve).await,
    }
}

/// Merge the config file with command line overrides
fn build_config(options: &ResolveArgs) -> Result<Config> {
    let mut config = Config::load_or_default(&options.config_path)?;

    // Flags only switch options on; the config file decides otherwise
    config.positioning.clean |= options.clean;
    config.positioning.ignore_existing |= options.ignore_existing;
    config.positioning.omit_default |= options.omit_default;
    config.positioning.keep_white |= options.keep_white;
    config.output.force_overwrite |= options.force_overwrite;

    if let Some(suffix) = &options.suffix {
        config.output.suffix = suffix.clone();
    }
    if let Some(output_dir) = &options.output_dir {
        config.output.output_dir = Some(output_dir.clone());
    }
    if let Some(jobs) = options.jobs {
        config.jobs = jobs;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    Ok(config)
}

async fn run_resolve(options: ResolveArgs) -> Result<()> {
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    if options.input_paths.is_empty() {
        return Err(anyhow!("INPUT_PATH is required when no subcommand is specified"));
    }

    let config = build_config(&options)?;
    log::set_max_level(config.log_level.to_level_filter());

    let controller = Controller::with_config(config)?;

    if options.stdout {
        let [input] = options.input_paths.as_slice() else {
            return Err(anyhow!("--stdout accepts exactly one input file"));
        };
        if !FileManager::file_exists(input) {
            return Err(anyhow!("--stdout requires a file, got: {:?}", input));
        }

        let processed = controller.render_file(input).await?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(processed.content.as_bytes())
            .context("Failed to write to stdout")?;
        info!("{}", processed);
        return Ok(());
    }

    let report = controller.run(&options.input_paths).await?;

    if report.has_failures() {
        for (path, message) in &report.failures {
            error!("{}: {}", path.display(), message);
        }
        return Err(anyhow!(
            "{} of {} file(s) failed",
            report.failures.len(),
            report.total()
        ));
    }

    Ok(())
}
