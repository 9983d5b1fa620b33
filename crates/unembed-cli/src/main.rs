mod cli;
mod fix;
mod watch;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use std::path::{Path, PathBuf};
use unembed_config::Settings;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = cli.config_file.clone().unwrap_or_else(Settings::config_path);
    log::debug!("Config path: {}", config_path.display());
    let settings = Settings::load_or_default(&config_path)?;

    match cli.command {
        Commands::Fix(args) => {
            let vault = resolve_vault(args.vault.as_deref(), &settings)?;
            fix::run(&settings, &vault, &args.files, args.dry_run)
        }
        Commands::Watch(args) => {
            let vault = resolve_vault(args.vault.as_deref(), &settings)?;
            watch::run(&settings, &vault, &config_path)
        }
        Commands::Config { init } => show_config(&settings, &config_path, init),
    }
}

/// `-v` flags set the base level; `RUST_LOG` directives are applied over it.
fn init_logging(verbose: u8) {
    env_logger::Builder::new()
        .filter_level(log_level(verbose))
        .parse_default_env()
        .init();
}

fn log_level(verbose: u8) -> log::LevelFilter {
    match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    }
}

/// Vault root from the command line, then config, then the current directory.
fn resolve_vault(arg: Option<&Path>, settings: &Settings) -> Result<PathBuf> {
    let vault = match arg.or(settings.vault_path.as_deref()) {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };
    unembed_engine::io::validate_vault_dir(&vault)?;
    vault
        .canonicalize()
        .with_context(|| format!("Failed to resolve vault path {}", vault.display()))
}

fn show_config(settings: &Settings, config_path: &Path, init: bool) -> Result<()> {
    if init && !config_path.exists() {
        Settings::default().save_to_path(config_path)?;
        log::info!("Wrote default settings to {}", config_path.display());
    }
    println!("# {}", config_path.display());
    print!("{}", settings.to_toml()?);
    Ok(())
}
