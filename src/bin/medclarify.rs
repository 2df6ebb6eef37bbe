// Command-line driver: runs one capability call against the remote host.

use std::io::Read;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use medclarify::ai::host::RewriteLength;
use medclarify::ai::{Action, CapabilityAdapter, RemoteHost, RewriteOptions};
use medclarify::core::config::AppConfig;
use medclarify::core::models::Tone;
use medclarify::errors::ClarifyError;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "medclarify", about = "Turn medical text into plain language")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite in casual, plain-text language
    Simplify { text: Option<String> },
    /// Key points, short
    Summarize { text: Option<String> },
    /// Explain the medical terms in the text
    Explain { text: Option<String> },
    /// Rewrite with a chosen tone and length
    Rewrite {
        #[arg(long, value_enum)]
        tone: Option<ToneArg>,
        #[arg(long, value_enum)]
        length: Option<LengthArg>,
        text: Option<String>,
    },
    /// Show which capabilities the host exposes
    Availability,
}

#[derive(Clone, Copy, ValueEnum)]
enum ToneArg {
    Formal,
    Casual,
}

#[derive(Clone, Copy, ValueEnum)]
enum LengthArg {
    Shorter,
    Longer,
    Same,
}

impl From<ToneArg> for Tone {
    fn from(t: ToneArg) -> Self {
        match t {
            ToneArg::Formal => Tone::Formal,
            ToneArg::Casual => Tone::Casual,
        }
    }
}

impl From<LengthArg> for RewriteLength {
    fn from(l: LengthArg) -> Self {
        match l {
            LengthArg::Shorter => RewriteLength::Shorter,
            LengthArg::Longer => RewriteLength::Longer,
            LengthArg::Same => RewriteLength::Same,
        }
    }
}

fn read_text(arg: Option<String>) -> anyhow::Result<String> {
    let text = match arg {
        Some(text) => text,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("reading text from stdin")?;
            buf
        }
    };
    if text.trim().is_empty() {
        bail!(ClarifyError::EmptyInput);
    }
    Ok(text)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    medclarify::setup_logging();
    let cli = Cli::parse();

    let config = AppConfig::from_env().map_err(|e| {
        error!("Config error: {}", e);
        e
    })?;
    let adapter = CapabilityAdapter::new(Arc::new(RemoteHost::from_config(&config)))
        .with_timeout(config.session_timeout);

    let (action, text) = match cli.command {
        Command::Availability => {
            for (name, available) in adapter.check_availability().entries() {
                println!("{} {name}", if available { "✓" } else { "✗" });
            }
            return Ok(());
        }
        Command::Simplify { text } => (Action::Simplify, text),
        Command::Summarize { text } => (Action::Summarize, text),
        Command::Explain { text } => (Action::Explain, text),
        Command::Rewrite { tone, length, text } => (
            Action::Rewrite(RewriteOptions {
                tone: tone.map(Tone::from),
                length: length.map(RewriteLength::from),
            }),
            text,
        ),
    };

    let text = read_text(text)?;
    info!(?action, chars = text.chars().count(), "Running capability");
    let output = adapter.invoke(action, &text).await?;
    println!("{output}");
    Ok(())
}
