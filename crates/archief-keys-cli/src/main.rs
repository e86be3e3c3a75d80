#![deny(unsafe_code)]

//! archief-keys CLI: dry-run routing, shortcut listing, and a raw-mode
//! terminal listener that opens the archief site on single key presses.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use archief_keys_config::{AppConfig, DEFAULT_CONFIG_FILE};
use archief_keys_core::{KeyDown, KeyRouteMap, PageSession, ROUTES, RecordingNavigator};
use clap::{Parser, Subcommand};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// archief-keys: single-key shortcuts for the archief site.
#[derive(Parser)]
#[command(name = "archief-keys", version, about, long_about = None)]
struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a key sequence without navigating anywhere.
    Route {
        /// Key names in press order, e.g. `n 3 h` or `Enter`.
        #[arg(required = true)]
        keys: Vec<String>,

        /// Site base URL, overriding the config file.
        #[arg(long)]
        base_url: Option<String>,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the keyboard shortcuts.
    Keymap {
        /// Print the fixed route table as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Validate and display configuration.
    Config {
        /// Show the resolved configuration.
        #[arg(long)]
        show: bool,
    },

    /// Read key presses from the terminal and navigate. Ctrl+C exits.
    Listen {
        /// Site base URL, overriding the config file.
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli.config).await?;

    let raw_mode = matches!(cli.command, Commands::Listen { .. });
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_filter(cli.verbose, &config))),
        )
        .with_writer(move || LogWriter::new(io::stderr(), raw_mode))
        .init();

    match cli.command {
        Commands::Route {
            keys,
            base_url,
            json,
        } => {
            if let Some(url) = base_url {
                config.site.base_url = url;
            }
            cmd_route(&config, &keys, json)?
        }
        Commands::Keymap { json } => cmd_keymap(json)?,
        Commands::Config { show } => cmd_config(&cli.config, &config, show)?,
        Commands::Listen { base_url } => {
            if let Some(url) = base_url {
                config.site.base_url = url;
            }
            cmd_listen(&config)?
        }
    }

    Ok(())
}

async fn load_config(path: &Path) -> Result<AppConfig> {
    AppConfig::load_or_default(path)
        .await
        .with_context(|| format!("loading config from '{}'", path.display()))
}

/// Filter directive: `-v` and `-vv` raise the configured level.
fn log_filter(verbose: u8, config: &AppConfig) -> String {
    match verbose {
        0 => config.logging.level.to_ascii_lowercase(),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Log output that ends lines with `\r\n` while the terminal is in raw mode,
/// where a bare `\n` moves down without returning to the first column.
struct LogWriter<W> {
    inner: W,
    raw_mode: bool,
}

impl<W: Write> LogWriter<W> {
    fn new(inner: W, raw_mode: bool) -> Self {
        Self { inner, raw_mode }
    }
}

impl<W: Write> Write for LogWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if !self.raw_mode {
            return self.inner.write(buf);
        }
        let mut lines = buf.split(|&b| b == b'\n');
        if let Some(first) = lines.next() {
            self.inner.write_all(first)?;
        }
        for line in lines {
            self.inner.write_all(b"\r\n")?;
            self.inner.write_all(line)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Outcome of one key in a dry run.
#[derive(Debug, Serialize, PartialEq)]
struct RouteStep {
    key: String,
    path: Option<String>,
    url: Option<String>,
}

fn route_steps(base_url: &str, keys: &[String]) -> Result<Vec<RouteStep>> {
    let mut session = PageSession::new(base_url, RecordingNavigator::new())?;
    let mut steps = Vec::with_capacity(keys.len());
    for key in keys {
        let location = session.press(&KeyDown::new(key.as_str()))?;
        steps.push(RouteStep {
            key: key.clone(),
            path: location.as_ref().map(|l| l.path().to_string()),
            url: location.map(|l| l.url().to_string()),
        });
    }
    Ok(steps)
}

fn cmd_route(config: &AppConfig, keys: &[String], json: bool) -> Result<()> {
    let steps = route_steps(&config.site.base_url, keys)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&steps)?);
        return Ok(());
    }
    for step in &steps {
        println!("{:<8} {}", format!("{:?}", step.key), step.url.as_deref().unwrap_or("-"));
    }
    Ok(())
}

fn keymap_lines() -> Vec<String> {
    let mut lines: Vec<String> = KeyRouteMap
        .iter()
        .map(|route| format!("{:<6} {:<16} {}", route.key, route.path, route.label))
        .collect();
    lines.push(format!("{:<6} {:<16} {}", "0-9", "/bericht/latest/N", "Nth latest bericht"));
    lines.push(format!("{:<6} {:<16} {}", "n 0-9", "/object/latest/N", "Nth latest object"));
    lines
}

fn cmd_keymap(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&ROUTES)?);
        return Ok(());
    }
    for line in keymap_lines() {
        println!("{line}");
    }
    Ok(())
}

fn cmd_config(config_path: &Path, config: &AppConfig, show: bool) -> Result<()> {
    if show {
        let toml_str = toml::to_string_pretty(config).context("serializing config to TOML")?;
        println!("{toml_str}");
    } else {
        println!("Configuration at '{}' is valid.", config_path.display());
    }
    Ok(())
}

fn is_quit(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

fn cmd_listen(config: &AppConfig) -> Result<()> {
    let mut session = PageSession::from_config(config)?;
    info!(base_url = %session.base_url(), "listening for shortcuts");

    enable_raw_mode()?;
    let result = listen_loop(&mut session);
    disable_raw_mode()?;
    result?;

    info!(page_loads = session.page_loads(), "stopped listening");
    Ok(())
}

fn listen_loop<N: archief_keys_core::Navigator>(session: &mut PageSession<N>) -> Result<()> {
    let mut stdout = io::stdout();
    write!(stdout, "Press a shortcut key (Ctrl+C to quit)\r\n")?;
    stdout.flush()?;

    loop {
        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        if is_quit(&key) {
            return Ok(());
        }

        match session.press(&KeyDown::from(key.code)) {
            Ok(Some(location)) => write!(stdout, "-> {location}\r\n")?,
            Ok(None) => {}
            Err(e) => {
                warn!(error = %e, "navigation failed");
                write!(stdout, "!! {e}\r\n")?;
            }
        }
        stdout.flush()?;
    }
}
