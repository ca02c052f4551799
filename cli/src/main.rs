//! idea-score binary: `serve` runs the gateway and web client, `validate` scores one idea from
//! the terminal.

use std::io::IsTerminal;

use clap::{Parser, Subcommand};
use cli::{read_idea, run_validate, terminal_flags, ValidateError, ValidateOptions};
use config::Settings;
use serve::AppState;

#[derive(Parser, Debug)]
#[command(name = "idea-score")]
#[command(about = "idea-score: score a business idea on profitability, demand and execution")]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Run the HTTP server (gateway at /validate-idea, web form at /)
    Serve(ServeArgs),
    /// Score one idea through a running gateway and print the report
    Validate(ValidateArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct ServeArgs {
    /// Listen address (default IDEA_SCORE_ADDR or 127.0.0.1:8787)
    #[arg(long, value_name = "ADDR")]
    addr: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
struct ValidateArgs {
    /// Idea text (or pass as positional words, or pipe on stdin)
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,

    /// Positional words: the idea when -m/--message is not used
    #[arg(trailing_var_arg = true)]
    rest: Vec<String>,

    /// Gateway URL (default IDEA_SCORE_GATEWAY_URL or http://127.0.0.1:8787/validate-idea)
    #[arg(long, value_name = "URL")]
    gateway: Option<String>,

    /// Print the score object as JSON
    #[arg(long)]
    json: bool,

    /// Draw the gauges at their final values without animation
    #[arg(long)]
    no_animate: bool,
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("ctrl-c received, shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    config::load_and_apply(config::APP_NAME, None::<&std::path::Path>).ok();
    let _log_guard = config::logging::init()?;
    let settings = Settings::from_env();
    tracing::debug!(?settings, "settings resolved");

    let args = Args::parse();

    match args.cmd {
        Command::Serve(sa) => {
            let addr = sa.addr.unwrap_or_else(|| settings.addr.clone());
            let state = AppState::from_settings(&settings);
            if let Err(e) = serve::run_serve(Some(&addr), state, shutdown_signal()).await {
                eprintln!("serve error: {}", e);
                std::process::exit(1);
            }
        }
        Command::Validate(va) => {
            let stdin: Box<dyn std::io::Read> = if std::io::stdin().is_terminal() {
                Box::new(std::io::empty())
            } else {
                Box::new(std::io::stdin())
            };
            let idea = read_idea(va.message, &va.rest, stdin)?;
            let (stdout_tty, stderr_tty) = terminal_flags();
            let opts = ValidateOptions {
                idea,
                gateway_url: va.gateway.unwrap_or(settings.gateway_url),
                json: va.json,
                animate: !va.no_animate && !va.json && stdout_tty,
                style: stdout_tty,
                spinner: stderr_tty,
            };
            let mut stdout = std::io::stdout();
            match run_validate(opts, &mut stdout).await {
                Ok(_) => {}
                Err(ValidateError::Intake(e)) => {
                    eprintln!("idea-score: {}", e);
                    std::process::exit(2);
                }
                Err(e) => {
                    eprintln!("idea-score: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }
    Ok(())
}
