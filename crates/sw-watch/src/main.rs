//! slotwatch: embassy appointment availability watcher
//!
//! Runs one availability check against the booking site and reports the
//! result. Repeated checking is the job of whatever invokes this binary
//! (cron, a systemd timer).
//!
//! Usage:
//!   slotwatch             - Run one availability check
//!   slotwatch --visible   - Run with a visible browser window
//!   slotwatch --no-email  - Report to the console only
//!   slotwatch --help      - Show help

use sw_core::Config;
use sw_email::{EmailConfig, Notifier};
use tracing_subscriber::EnvFilter;

/// Run mode
enum RunMode {
    /// Run one availability check
    Check,
    /// Show help
    Help,
    /// Show version
    Version,
}

/// Parsed command line flags
struct CliArgs {
    mode: RunMode,
    visible: bool,
    no_email: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = parse_args();

    match args.mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("slotwatch {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Check => {}
    }

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let mut config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;
    if args.visible {
        config.headless = false;
    }

    tracing::info!("Starting appointment check...");
    tracing::info!("Booking site: {}", config.booking_url);

    let check_config = config.clone();
    let result = tokio::task::spawn_blocking(move || sw_checker::run_check(&check_config))
        .await
        .map_err(|e| anyhow::anyhow!("Check task failed: {}", e))?
        .map_err(|e| anyhow::anyhow!("Availability check could not start: {}", e))?;

    if result.available {
        println!("APPOINTMENTS ARE AVAILABLE!");
        println!("Visit {} to book your appointment.", config.booking_url);

        if args.no_email {
            tracing::info!("Email delivery disabled (--no-email)");
        } else {
            match EmailConfig::from_env() {
                Ok(email_config) => {
                    Notifier::new(email_config, config.booking_url.clone())
                        .notify(&result)
                        .await;
                }
                Err(e) => tracing::error!("Email not configured: {}", e),
            }
        }
    } else {
        println!("No appointments available at this time.");
    }

    Ok(())
}

/// Parse command line arguments
fn parse_args() -> CliArgs {
    let mut args = CliArgs {
        mode: RunMode::Check,
        visible: false,
        no_email: false,
    };

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--visible" => args.visible = true,
            "--no-email" => args.no_email = true,
            "--help" | "-h" => args.mode = RunMode::Help,
            "--version" | "-v" => args.mode = RunMode::Version,
            _ => {}
        }
    }

    args
}

/// Print help message
fn print_help() {
    println!("slotwatch - embassy appointment availability watcher");
    println!();
    println!("Usage:");
    println!("  slotwatch             Run one availability check");
    println!("  slotwatch --visible   Run with a visible browser window");
    println!("  slotwatch --no-email  Report to the console only");
    println!("  slotwatch --help      Show this help message");
    println!("  slotwatch --version   Show version");
    println!();
    println!("Environment Variables:");
    println!("  SENDER_EMAIL          SMTP sender address (required for email)");
    println!("  SENDER_PASSWORD       SMTP sender password (required for email)");
    println!("  RECEIVER_EMAIL        Comma-separated recipient list (required for email)");
    println!("  SMTP_HOST             SMTP relay host (default: smtp.gmail.com)");
    println!("  SMTP_PORT             SMTP relay port (default: 587)");
    println!("  SLOTWATCH_URL         Booking form URL");
    println!("  SLOTWATCH_HEADLESS    Set to 'false' for a visible browser");
    println!("  SLOTWATCH_DEBUG_DIR   Directory for diagnostic captures (default: debug)");
    println!("  RUST_LOG              Log filter (default: info)");
}
