//! Server-rendered HTML for the intake form and the results view.
//!
//! Pages are plain strings; every piece of user or model text goes through [`escape`]. Gauges are
//! inline SVG whose arc starts empty and fills via a CSS animation after the start delay.

use scoring::gauge::{self, RADIUS, START_DELAY, STROKE_WIDTH, TRANSITION};
use scoring::{
    DimensionRow, IdeaIntake, ScoreOrigin, ScoreReport, IDEA_COUNTER_LIMIT, MIN_CLIENT_IDEA_CHARS,
};

const TITLE: &str = "Validate Your Business Idea";
const PLACEHOLDER: &str = "Describe your business or product idea in detail. Include what problem it solves, who your target customers are, and how it would work...";

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f7f7fb; color: #1f2330; }
main { max-width: 960px; margin: 0 auto; padding: 32px 16px; }
.card { background: #fff; border: 1px solid #e4e6ef; border-radius: 12px; padding: 24px; margin-bottom: 24px; box-shadow: 0 2px 8px rgba(0,0,0,.04); }
textarea { width: 100%; box-sizing: border-box; font: inherit; padding: 12px; border-radius: 8px; border: 1px solid #cdd1de; }
.counter { text-align: right; color: #6b7080; font-size: .85rem; }
.error { color: #c0392b; margin: 8px 0; }
.notice { background: #fff7e0; border: 1px solid #f2d48a; border-radius: 8px; padding: 12px; }
button, .button { font: inherit; padding: 10px 20px; border-radius: 8px; border: 0; background: #4f46e5; color: #fff; cursor: pointer; text-decoration: none; display: inline-block; }
button[disabled] { opacity: .5; cursor: not-allowed; }
.button.outline { background: transparent; color: #4f46e5; border: 1px solid #4f46e5; }
.center { text-align: center; }
.badge { display: inline-flex; align-items: center; justify-content: center; width: 96px; height: 96px; border-radius: 50%; font-size: 2rem; font-weight: 700; color: #fff; }
.tone-success { --tone: #16a34a; }
.tone-warning { --tone: #d97706; }
.tone-danger { --tone: #dc2626; }
.badge.tone-success, .badge.tone-warning, .badge.tone-danger { background: var(--tone); }
.gauges { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 32px; }
.gauge { display: flex; flex-direction: column; align-items: center; }
.gauge .ring { position: relative; width: 128px; height: 128px; }
.gauge svg { width: 100%; height: 100%; transform: rotate(-90deg); }
.gauge .track { stroke: #9aa0b4; opacity: .2; }
.gauge .arc { stroke: var(--tone); animation-name: gauge-fill; animation-timing-function: ease-out; animation-fill-mode: forwards; }
.gauge .value { position: absolute; inset: 0; display: flex; align-items: center; justify-content: center; font-size: 1.5rem; font-weight: 700; }
@keyframes gauge-fill { to { stroke-dashoffset: var(--target); } }
.reasons { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 24px; }
.reasons p { color: #4b5063; line-height: 1.5; font-size: .95rem; }
.actions { display: flex; gap: 16px; justify-content: center; flex-wrap: wrap; }
"#;

const FORM_SCRIPT: &str = r#"
(function () {
  var area = document.getElementById('idea');
  var counter = document.getElementById('counter');
  var button = document.getElementById('submit');
  var form = document.getElementById('idea-form');
  function refresh() {
    var n = Array.from(area.value).length;
    counter.textContent = n + '/' + area.dataset.limit;
    button.disabled = n < Number(area.getAttribute('minlength')) || area.value.trim() === '';
  }
  area.addEventListener('input', refresh);
  form.addEventListener('submit', function () {
    button.disabled = true;
    area.readOnly = true;
    button.textContent = 'Analyzing Your Idea...';
  });
  refresh();
})();
"#;

/// Escapes text for HTML element content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{TITLE}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<main>\n{body}\n</main>\n</body>\n</html>\n"
    )
}

/// Intake page. `idea` pre-fills the textarea; `error` is shown inline above it.
pub fn index_page(idea: &str, error: Option<&str>) -> String {
    let mut intake = IdeaIntake::new();
    intake.set_text(idea);
    let disabled = if intake.can_submit() { "" } else { " disabled" };
    let error_html = error
        .map(|e| format!("<p class=\"error\" role=\"alert\">{}</p>", escape(e)))
        .unwrap_or_default();

    let body = format!(
        r#"<header class="center">
<h1>{TITLE}</h1>
<p>Get an instant AI assessment of profitability, market demand and ease of execution.</p>
</header>
<section class="card">
<form id="idea-form" method="post" action="/">
<label for="idea"><strong>Your business idea</strong></label>
{error_html}<textarea id="idea" name="idea" rows="6" minlength="{min}" data-limit="{limit}" required placeholder="{placeholder}">{text}</textarea>
<div id="counter" class="counter">{counter}</div>
<button id="submit" type="submit"{disabled}>Validate My Idea</button>
</form>
</section>
<script>{FORM_SCRIPT}</script>"#,
        min = MIN_CLIENT_IDEA_CHARS,
        limit = IDEA_COUNTER_LIMIT,
        placeholder = escape(PLACEHOLDER),
        text = escape(intake.text()),
        counter = intake.counter(),
    );
    layout(&body)
}

/// One radial gauge. The arc starts at a full offset (empty) and animates to the score's offset.
pub fn gauge_svg(row: &DimensionRow) -> String {
    let circumference = gauge::circumference();
    let target = gauge::dash_offset(row.score);
    format!(
        r#"<div class="gauge tone-{tone}">
<div class="ring">
<svg viewBox="0 0 100 100" aria-hidden="true">
<circle class="track" cx="50" cy="50" r="{r}" stroke-width="{w}" fill="transparent"/>
<circle class="arc" cx="50" cy="50" r="{r}" stroke-width="{w}" fill="transparent" stroke-linecap="round" stroke-dasharray="{c:.3}" stroke-dashoffset="{c:.3}" style="--target: {t:.3}; animation-delay: {delay}ms; animation-duration: {dur}ms"/>
</svg>
<div class="value">{score}</div>
</div>
<h3>{label}</h3>
<p>{band}</p>
</div>"#,
        tone = row.band.tone().as_str(),
        r = RADIUS,
        w = STROKE_WIDTH,
        c = circumference,
        t = target,
        delay = START_DELAY.as_millis(),
        dur = TRANSITION.as_millis(),
        score = row.score,
        label = row.dimension.label(),
        band = row.band.label(),
    )
}

fn reasoning_card(title: &str, text: &str) -> String {
    format!(
        "<article class=\"card\"><h4>{}</h4><p>{}</p></article>",
        escape(title),
        escape(text)
    )
}

/// Results page: grade badge, mean, gauges, reasoning cards and the two actions.
pub fn results_page(idea: &str, report: &ScoreReport, origin: ScoreOrigin) -> String {
    let mut gauges = String::new();
    let mut cards = String::new();
    for row in &report.rows {
        gauges.push_str(&gauge_svg(row));
        cards.push_str(&reasoning_card(
            row.dimension.analysis_title(),
            &row.reasoning,
        ));
    }
    cards.push_str(&reasoning_card("Overall Assessment", &report.overall));

    let notice = match origin {
        ScoreOrigin::Placeholder => "<p class=\"notice\" role=\"status\">We couldn't reach the scoring service. The scores below are placeholders.</p>\n",
        ScoreOrigin::Gateway => "",
    };

    let body = format!(
        r#"{notice}<section class="card center">
<h2>Overall Validation Score</h2>
<div class="badge tone-{tone}">{letter}</div>
<p><strong>{mean}/100</strong></p>
<p>{message}</p>
<p><em>{idea}</em></p>
</section>
<section class="card">
<h3 class="center">Detailed Breakdown</h3>
<div class="gauges">
{gauges}
</div>
</section>
<section class="reasons">
{cards}
</section>
<div class="actions">
<a class="button outline" href="/new">Validate Another Idea</a>
<button type="button">Get Full Validation Report ($9.99)</button>
</div>"#,
        tone = report.grade.tone.as_str(),
        letter = report.grade.letter,
        mean = report.mean,
        message = report.grade.message,
        idea = escape(idea),
    );
    layout(&body)
}
