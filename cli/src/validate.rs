//! `idea-score validate`: one submission through the intake, then render the result.

use std::io::{self, IsTerminal, Read, Write};
use std::time::Duration;

use scoring::{resolve, HttpGatewayClient, IdeaIntake, IntakeError, ScoreOrigin};
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::debug;

use crate::display;

#[derive(Debug, Error)]
pub enum ValidateError {
    /// Input rejected before any network call.
    #[error("{0}")]
    Intake(#[from] IntakeError),
    #[error("write output: {0}")]
    Io(#[from] io::Error),
    #[error("encode json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Clone, Debug)]
pub struct ValidateOptions {
    pub idea: String,
    pub gateway_url: String,
    /// Print the score object as JSON instead of the report.
    pub json: bool,
    /// Animate the gauges (only meaningful on a terminal).
    pub animate: bool,
    /// Colour the report.
    pub style: bool,
    /// Show a spinner on stderr while the request is in flight.
    pub spinner: bool,
}

/// Idea text from `-m`, else the positional words, else `stdin`.
pub fn read_idea<R: Read>(
    message: Option<String>,
    rest: &[String],
    mut stdin: R,
) -> io::Result<String> {
    if let Some(m) = message {
        return Ok(m);
    }
    if !rest.is_empty() {
        return Ok(rest.join(" "));
    }
    let mut buf = String::new();
    stdin.read_to_string(&mut buf)?;
    Ok(buf.trim_end_matches(['\r', '\n']).to_string())
}

const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
const LOADING_LABEL: &str = "Analyzing Your Idea...";

/// Stderr spinner running on its own task until [`Spinner::stop`].
struct Spinner {
    stop: Option<oneshot::Sender<()>>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl Spinner {
    fn start(enabled: bool) -> Self {
        if !enabled {
            return Self {
                stop: None,
                task: None,
            };
        }
        let (tx, mut rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let mut tick = tokio::time::interval(Duration::from_millis(100));
            let mut i = 0usize;
            loop {
                tokio::select! {
                    _ = &mut rx => break,
                    _ = tick.tick() => {
                        let mut err = io::stderr();
                        let _ = write!(err, "\r{} {}", SPINNER_FRAMES[i % SPINNER_FRAMES.len()], LOADING_LABEL);
                        let _ = err.flush();
                        i += 1;
                    }
                }
            }
            let mut err = io::stderr();
            let _ = write!(err, "\r{}\r", " ".repeat(LOADING_LABEL.len() + 2));
            let _ = err.flush();
        });
        Self {
            stop: Some(tx),
            task: Some(task),
        }
    }

    async fn stop(mut self) {
        if let Some(tx) = self.stop.take() {
            let _ = tx.send(());
        }
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

/// Runs one validation and writes the result to `out`. Returns where the scores came from.
///
/// A short idea fails with [`ValidateError::Intake`] before any request is made. Any gateway
/// failure is replaced by placeholder scores, so otherwise this always renders a report.
pub async fn run_validate<W: Write>(
    opts: ValidateOptions,
    out: &mut W,
) -> Result<ScoreOrigin, ValidateError> {
    let mut intake = IdeaIntake::new();
    intake.set_text(opts.idea);
    let idea = intake.begin_submit()?;
    debug!(chars = idea.chars().count(), gateway = %opts.gateway_url, "submitting idea");

    let client = HttpGatewayClient::new(opts.gateway_url);
    let spinner = Spinner::start(opts.spinner);
    let result = client.score(&idea).await;
    spinner.stop().await;

    let (report, origin) = resolve(result, &mut rand::thread_rng());

    if opts.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report.scores)?)?;
    } else if opts.animate {
        display::animate_report(out, &report, origin).await?;
    } else {
        write!(out, "{}", display::render_report(&report, origin, opts.style))?;
    }
    out.flush()?;
    Ok(origin)
}

/// Whether stdout and stderr are terminals, for defaulting animation, colour and spinner.
pub fn terminal_flags() -> (bool, bool) {
    (io::stdout().is_terminal(), io::stderr().is_terminal())
}
