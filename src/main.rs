//! RedTerm - Terminal AI Mentor Console
//!
//! Relays operator queries to a hosted generative-language API and
//! renders the normalized replies in the terminal.

use anyhow::Result;
use clap::Parser;
use redterm::config::Config;
use redterm::console::Console;
use redterm::core::composer::Mode;
use redterm::core::service::ChatService;
use redterm::speech::SpeechSynthesizer;
use redterm::uplink;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Initial operating mode (mentor, deep-analysis, cve-hunter, speed-ops)
    #[arg(short, long, default_value = "mentor")]
    mode: Mode,

    /// Speak replies aloud
    #[arg(long)]
    speak: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Setup logging
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("🖥️ RedTerm v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = Config::load()?;
    let uplink = uplink::create_uplink(&config)?;

    let service = ChatService::new(uplink.clone(), config.models.clone());
    let synthesizer = SpeechSynthesizer::new(uplink, &config);
    let speech_enabled = args.speak || config.speech_enabled;

    let mut console = Console::new(service, synthesizer, args.mode, speech_enabled);
    console.run().await?;

    info!("👋 RedTerm session closed");
    Ok(())
}
