//! Terminal rendering of a score report: grade line, bar gauges coloured by band, reasoning.
//!
//! With `style` off the output is plain text (pipes, `--no-animate` into files, tests). The
//! animated variant draws empty gauges, waits [`START_DELAY`], then redraws the three gauge lines
//! in place for each eased frame.

use std::io::{self, Write};

use crossterm::{
    cursor::{MoveToColumn, MoveUp},
    queue,
    style::{Color, Stylize},
    terminal::{Clear, ClearType},
};
use scoring::gauge::{self, START_DELAY};
use scoring::{DimensionRow, ScoreOrigin, ScoreReport, Tone};

/// Width of a gauge bar in cells.
pub const BAR_WIDTH: usize = 30;
/// Frames drawn during one gauge transition.
pub const ANIMATION_STEPS: usize = 20;

const LABEL_WIDTH: usize = 18;
const PLACEHOLDER_NOTICE: &str =
    "We couldn't reach the scoring service. The scores below are placeholders.";

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Success => Color::Green,
        Tone::Warning => Color::Yellow,
        Tone::Danger => Color::Red,
    }
}

fn paint(text: &str, tone: Tone, style: bool) -> String {
    if style {
        text.with(tone_color(tone)).bold().to_string()
    } else {
        text.to_string()
    }
}

/// `[████░░░░]` with `fill_fraction(score)` of `width` cells filled.
pub fn gauge_bar(score: u8, width: usize) -> String {
    let filled = (gauge::fill_fraction(score) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// One gauge line showing `shown` (the animated value) against the row's band.
pub fn gauge_line(row: &DimensionRow, shown: u8, style: bool) -> String {
    let tone = row.band.tone();
    format!(
        "{:<width$} {} {:>3}  {}",
        row.dimension.label(),
        paint(&gauge_bar(shown, BAR_WIDTH), tone, style),
        shown,
        row.band.label(),
        width = LABEL_WIDTH
    )
}

fn header(report: &ScoreReport, origin: ScoreOrigin, style: bool) -> String {
    let mut out = String::new();
    if origin == ScoreOrigin::Placeholder {
        out.push_str(&paint(PLACEHOLDER_NOTICE, Tone::Warning, style));
        out.push_str("\n\n");
    }
    out.push_str("Overall Validation Score\n");
    out.push_str(&format!(
        "  {}  {}/100  {}\n\n",
        paint(report.grade.letter, report.grade.tone, style),
        report.mean,
        report.grade.message
    ));
    out.push_str("Detailed Breakdown\n");
    out
}

fn reasoning(report: &ScoreReport) -> String {
    let mut out = String::from("\n");
    for row in &report.rows {
        out.push_str(&format!("{}\n  {}\n\n", row.dimension.analysis_title(), row.reasoning));
    }
    out.push_str(&format!("Overall Assessment\n  {}\n", report.overall));
    out
}

/// Full report with gauges at their final values.
pub fn render_report(report: &ScoreReport, origin: ScoreOrigin, style: bool) -> String {
    let mut out = header(report, origin, style);
    for row in &report.rows {
        out.push_str(&gauge_line(row, row.score, style));
        out.push('\n');
    }
    out.push_str(&reasoning(report));
    out
}

fn draw_gauges<W: Write>(out: &mut W, report: &ScoreReport, frame: usize, frames: &[Vec<u8>]) -> io::Result<()> {
    for (row, values) in report.rows.iter().zip(frames) {
        let shown = values.get(frame).copied().unwrap_or(0);
        queue!(out, MoveToColumn(0), Clear(ClearType::CurrentLine))?;
        writeln!(out, "{}", gauge_line(row, shown, true))?;
    }
    out.flush()
}

/// Animated report: gauges start empty, fill after the start delay, then reasoning is printed.
pub async fn animate_report<W: Write>(
    out: &mut W,
    report: &ScoreReport,
    origin: ScoreOrigin,
) -> io::Result<()> {
    write!(out, "{}", header(report, origin, true))?;
    let frames: Vec<Vec<u8>> = report
        .rows
        .iter()
        .map(|r| gauge::frames(r.score, ANIMATION_STEPS))
        .collect();
    let rows = report.rows.len() as u16;

    for row in &report.rows {
        writeln!(out, "{}", gauge_line(row, 0, true))?;
    }
    out.flush()?;
    tokio::time::sleep(START_DELAY).await;

    let interval = gauge::frame_interval(ANIMATION_STEPS);
    for frame in 0..ANIMATION_STEPS {
        queue!(out, MoveUp(rows))?;
        draw_gauges(out, report, frame, &frames)?;
        tokio::time::sleep(interval).await;
    }
    write!(out, "{}", reasoning(report))?;
    out.flush()
}
