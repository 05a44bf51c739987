use anyhow::Result;
use clap::{Parser, ValueEnum};
use rpncalc::line_mode;
use rpncalc::program::RpnProgram;
use std::io;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "RPNCALC_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Read lines from stdin, works with pipes
    Plain,
    /// Raw terminal line editor
    Line,
    /// Full screen interface
    Tui,
}

impl Default for Mode {
    fn default() -> Self {
        if cfg!(feature = "tui") {
            Mode::Tui
        } else if cfg!(feature = "line") {
            Mode::Line
        } else {
            Mode::Plain
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "rpncalc", version, about = "Reverse Polish Notation calculator")]
struct Args {
    /// Host to run the calculator in
    #[arg(long, value_enum, default_value_t = Mode::default())]
    mode: Mode,

    /// Skip the welcome banner
    #[arg(long)]
    no_banner: bool,

    /// Tracing filter, e.g. `debug` (overrides RPNCALC_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_level.as_deref());
    tracing::debug!(mode = ?args.mode, "starting");

    let show_banner = !args.no_banner;
    match args.mode {
        Mode::Plain => {
            let mut program = RpnProgram::new();
            line_mode::run_plain(&mut program, io::stdin().lock(), io::stdout().lock(), show_banner)
        }
        Mode::Line => run_line(show_banner),
        Mode::Tui => run_tui(show_banner),
    }
}

#[cfg(feature = "line")]
fn run_line(show_banner: bool) -> Result<()> {
    let mut program = RpnProgram::new();
    line_mode::run_line(&mut program, show_banner)
}

#[cfg(not(feature = "line"))]
fn run_line(_show_banner: bool) -> Result<()> {
    anyhow::bail!("line mode is not available: rebuild with `--features line`")
}

#[cfg(feature = "tui")]
fn run_tui(show_banner: bool) -> Result<()> {
    rpncalc::tui_mode::run_tui(show_banner)
}

#[cfg(not(feature = "tui"))]
fn run_tui(_show_banner: bool) -> Result<()> {
    anyhow::bail!("tui mode is not available: rebuild with the `tui` feature")
}
