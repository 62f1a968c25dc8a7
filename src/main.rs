// Copyright © 2025 Lukas Bower
// SPDX-License-Identifier: Apache-2.0
// Purpose: CLI entry point for the slicedterm portfolio terminal.
// Author: Lukas Bower
#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! CLI entry point for the slicedterm portfolio terminal.

use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{info, LevelFilter};

use slicedterm::console::run_interactive;
use slicedterm::{
    parse_script, run_script, write_banner, ColorMode, Renderer, Terminal, TerminalConfig,
    Transcript,
};

/// slicedterm command-line arguments.
#[derive(Debug, Parser)]
#[command(author = "Lukas Bower", version, about = "Portfolio terminal", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Run commands from a script instead of the interactive console ("-" reads stdin).
    #[arg(long, value_name = "FILE")]
    script: Option<PathBuf>,

    /// Write the final scrollback as JSON.
    #[arg(long, value_name = "FILE")]
    transcript: Option<PathBuf>,

    /// Disable ANSI colour regardless of configuration.
    #[arg(long, default_value_t = false)]
    no_color: bool,

    /// Skip the start-up banner.
    #[arg(long, default_value_t = false)]
    no_banner: bool,

    /// Enable debug logging.
    #[arg(short = 'v', long, default_value_t = false)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let mut builder =
        env_logger::Builder::from_env(Env::default().default_filter_or(default_level.as_str()));
    builder.format_timestamp_millis();
    let _ = builder.try_init();
}

fn use_color(mode: ColorMode, no_color: bool, scripted: bool) -> bool {
    if no_color {
        return false;
    }
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => !scripted && io::stdout().is_terminal(),
    }
}

fn open_script(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file =
        File::open(path).with_context(|| format!("failed to open script {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = TerminalConfig::resolve(cli.config.as_deref()).context("load configuration")?;
    let scripted = cli.script.is_some();
    let renderer = Renderer::new(
        use_color(config.color, cli.no_color, scripted),
        config.prompt_symbol.as_str(),
    );
    let banner = config.banner && !cli.no_banner;

    let session = match cli.script.as_deref() {
        Some(path) => {
            let ops = parse_script(open_script(path)?)
                .with_context(|| format!("failed to parse script {}", path.display()))?;
            info!("running {} script op(s) from {}", ops.len(), path.display());
            let mut terminal = Terminal::new(&config).blink_ms(None);
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            if banner {
                write_banner(&renderer, &mut writer)?;
            }
            run_script(&mut terminal, &ops, &renderer, &mut writer)?;
            terminal.into_session()
        }
        None => run_interactive(Terminal::new(&config), renderer, banner)?,
    };

    if let Some(path) = cli.transcript.as_deref() {
        Transcript::of(&session).save(path)?;
        info!("transcript written to {}", path.display());
    }
    Ok(())
}
