use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use stretch_coach::cli::args::{Cli, Commands};
use stretch_coach::cli::{commands, Context};
use stretch_coach::config::{ColorSetting, Paths};

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::Completions { shell } = cli.command {
        print!("{}", commands::completions(shell)?);
        return Ok(());
    }

    let interactive = matches!(cli.command, Commands::Session | Commands::Tui);
    init_logging(&cli, interactive)?;

    let mut ctx = Context::open(&cli).context("failed to load stretch-coach data")?;
    match ctx.config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {}
    }

    let output = match cli.command {
        Commands::Home => commands::home(&ctx)?,
        Commands::Session => commands::session(&mut ctx)?,
        Commands::Tui => commands::tui(&mut ctx)?,
        Commands::Plan => commands::plan(&ctx)?,
        Commands::Exercises => commands::exercises(&ctx)?,
        Commands::Settings(args) => commands::settings(&mut ctx, args.command)?,
        Commands::Progress => commands::progress(&ctx)?,
        Commands::Export { out } => commands::export(&ctx, out)?,
        Commands::Rules => commands::rules(&ctx)?,
        Commands::Completions { .. } => String::new(),
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

/// Log to stderr, or to `coach.log` while the alternate screen is up.
fn init_logging(cli: &Cli, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    if !interactive {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    let paths = match &cli.data_dir {
        Some(root) => Paths::with_root(root.clone()),
        None => Paths::new()?,
    };
    paths.ensure_dirs()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.log_file)
        .with_context(|| format!("failed to open {}", paths.log_file.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}
