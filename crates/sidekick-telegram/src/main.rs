//! Sidekick Telegram Bot binary.
//!
//! Start the bot with:
//! ```bash
//! TELEGRAM_BOT_TOKEN=xxx cargo run -p sidekick-telegram
//! ```

use clap::Parser;
use sidekick_core::BotConfig;
use sidekick_telegram::state::create_shared_state;
use sidekick_telegram::SidekickBot;
use tracing_subscriber::EnvFilter;

/// Sidekick Telegram Bot - a menu bot with an LLM hint mode
#[derive(Parser, Debug)]
#[command(name = "sidekick-telegram")]
#[command(about = "Telegram assistant bot relaying hint-mode questions to an LLM")]
struct Args {
    /// Verbose logging (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Secrets come from .env.local or .env when present.
    let _ = dotenvy::from_filename(".env.local").or_else(|_| dotenvy::dotenv());

    // Initialize logging based on verbosity
    let filter = match args.verbose {
        0 => "sidekick_telegram=info,sidekick_core=info,teloxide=warn",
        1 => "sidekick_telegram=debug,sidekick_core=debug,teloxide=info",
        2 => "sidekick_telegram=trace,sidekick_core=trace,teloxide=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // A missing bot token is fatal before any traffic is served; a missing
    // OpenAI key only disables hint mode (warned about in state setup).
    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "configuration error");
            std::process::exit(1);
        }
    };

    let state = create_shared_state(&config);
    let bot = SidekickBot::new(config.telegram_token.clone(), state);

    match bot.get_me().await {
        Ok(username) => {
            tracing::info!(username = %username, "Bot initialized successfully");
            println!("\nSidekick Telegram Bot");
            println!("   Bot: @{}", username);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to get bot info");
            return Err(e.into());
        }
    }

    println!("\nOpen Telegram and send /start to begin");
    println!("   Press Ctrl+C to stop\n");

    bot.start_polling().await;

    Ok(())
}
