//! tvprobe CLI
//!
//! Interactive page-source capture against a device-cloud session.
//!
//! Usage:
//!   tvprobe --platform tizen                 # change-gated capture on Tizen
//!   tvprobe --platform roku                  # Roku, with key-press input
//!   tvprobe --platform roku --mode append    # append every snapshot to one file
//!
//! Credentials come from the environment (or a `.env` file):
//! `HEADSPIN_API_TOKEN`, `APP_ID`, `UDID` (Tizen), `DEVICE_SELECTOR` (Roku,
//! optional).

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use tvprobe::{
    capture_step, is_quit, CaptureError, CaptureOutcome, CloudConfig, DeviceSession, PersistMode,
    Platform, SnapshotRecorder,
};

#[derive(Parser)]
#[command(name = "tvprobe")]
#[command(about = "Capture TV app page source through a device-cloud WebDriver session")]
struct Cli {
    /// Target platform for the session
    #[arg(long, value_enum)]
    platform: PlatformArg,

    /// Snapshot persistence policy
    #[arg(long, value_enum, default_value_t = ModeArg::Change)]
    mode: ModeArg,

    /// Directory output files are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
#[clap(rename_all = "lower")]
enum PlatformArg {
    Tizen,
    Roku,
}

impl std::fmt::Display for PlatformArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{self:?}").to_lowercase())
    }
}

impl From<PlatformArg> for Platform {
    fn from(arg: PlatformArg) -> Self {
        match arg {
            PlatformArg::Tizen => Platform::TizenTv,
            PlatformArg::Roku => Platform::Roku,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default)]
#[clap(rename_all = "lower")]
enum ModeArg {
    Append,
    #[default]
    Change,
}

impl std::fmt::Display for ModeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format!("{self:?}").to_lowercase())
    }
}

impl From<ModeArg> for PersistMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Append => PersistMode::Append,
            ModeArg::Change => PersistMode::ChangeGated,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let platform = Platform::from(cli.platform);
    let config = CloudConfig::from_env(platform).context("incomplete environment")?;

    // A session that fails to open is fatal; the loop is never entered.
    let session = DeviceSession::open(&config)
        .await
        .context("could not start device session")?;

    let recorder = SnapshotRecorder::new(cli.mode.into(), cli.output_dir);
    let result = run_loop(&session, recorder).await;

    // Release exactly once, on the normal and the error path alike.
    if let Err(e) = session.close().await {
        warn!("failed to release session cleanly: {e}");
    }

    result
}

async fn run_loop(session: &DeviceSession, mut recorder: SnapshotRecorder) -> Result<()> {
    println!(
        "{}",
        "Press Enter to capture the page source, or q to quit.".bold()
    );
    if session.platform().supports_key_input() {
        println!("Type a key name (e.g. Home, Select, Down) to press it before capturing.");
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.read_line(&mut line)? == 0 {
            // EOF behaves like quit.
            break;
        }
        let input = line.trim();

        if is_quit(input) {
            break;
        }

        if session.platform().supports_key_input() && !input.is_empty() {
            match session.press_key(input).await {
                Ok(()) => println!("{} {}", "pressed".green(), input),
                Err(e @ CaptureError::InvalidKey { .. }) => {
                    println!("{}", e.to_string().red());
                }
                Err(e) => error!("key press failed: {e}"),
            }
        }

        match capture_step(session, &mut recorder).await {
            Ok(CaptureOutcome::Written(path)) => {
                println!("{} {}", "saved".green(), path.display());
            }
            Ok(CaptureOutcome::Appended(path)) => {
                println!("{} {}", "appended to".green(), path.display());
            }
            Ok(CaptureOutcome::Unchanged) => {
                println!("{}", "no change".yellow());
            }
            Err(e) => error!("capture failed: {e}"),
        }
    }

    Ok(())
}
