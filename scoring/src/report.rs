//! Client-side view of a score: overall grade, per-dimension bands and the overall narrative.
//!
//! Two independent threshold tables live here. The overall grade is a step function of the
//! rounded mean; the per-dimension band only colours a gauge. They are intentionally not shared.

use crate::score::{Dimension, ScoreBreakdown};

/// Colour family used by both the grade badge and the gauges.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
    Danger,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Success => "success",
            Tone::Warning => "warning",
            Tone::Danger => "danger",
        }
    }
}

/// Letter grade with its tone and message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OverallGrade {
    pub letter: &'static str,
    pub tone: Tone,
    pub message: &'static str,
}

/// Grade table, highest threshold first. The last row starts at 0 so every mean has a grade.
const GRADES: [(u8, OverallGrade); 8] = [
    (85, OverallGrade { letter: "A+", tone: Tone::Success, message: "Outstanding potential!" }),
    (80, OverallGrade { letter: "A", tone: Tone::Success, message: "Excellent opportunity" }),
    (75, OverallGrade { letter: "B+", tone: Tone::Success, message: "Very promising" }),
    (70, OverallGrade { letter: "B", tone: Tone::Warning, message: "Good potential" }),
    (65, OverallGrade { letter: "B-", tone: Tone::Warning, message: "Decent opportunity" }),
    (60, OverallGrade { letter: "C+", tone: Tone::Warning, message: "Some potential" }),
    (55, OverallGrade { letter: "C", tone: Tone::Warning, message: "Average potential" }),
    (0, OverallGrade { letter: "D", tone: Tone::Danger, message: "Needs improvement" }),
];

/// Grade for a rounded mean.
pub fn overall_grade(mean: u8) -> OverallGrade {
    GRADES
        .iter()
        .find(|(min, _)| mean >= *min)
        .map(|(_, g)| *g)
        .unwrap_or(GRADES[GRADES.len() - 1].1)
}

/// Unweighted mean of the three scores, rounded to the nearest integer.
pub fn mean_score(scores: &ScoreBreakdown) -> u8 {
    let sum = u32::from(scores.profitability) + u32::from(scores.demand) + u32::from(scores.execution);
    (f64::from(sum) / 3.0).round() as u8
}

/// Per-dimension band used to colour a gauge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    Excellent,
    Good,
    NeedsWork,
}

impl Band {
    pub fn for_score(score: u8) -> Self {
        if score >= 80 {
            Band::Excellent
        } else if score >= 60 {
            Band::Good
        } else {
            Band::NeedsWork
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Band::Excellent => "Excellent",
            Band::Good => "Good",
            Band::NeedsWork => "Needs Work",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Band::Excellent => Tone::Success,
            Band::Good => Tone::Warning,
            Band::NeedsWork => Tone::Danger,
        }
    }
}

/// One gauge row of the results view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DimensionRow {
    pub dimension: Dimension,
    pub score: u8,
    pub band: Band,
    pub reasoning: String,
}

/// Everything the results view shows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreReport {
    pub scores: ScoreBreakdown,
    pub mean: u8,
    pub grade: OverallGrade,
    pub rows: Vec<DimensionRow>,
    pub overall: String,
}

impl ScoreReport {
    /// Builds the view; `overall` replaces the synthesized narrative when given.
    pub fn new(scores: ScoreBreakdown, overall: Option<String>) -> Self {
        let mean = mean_score(&scores);
        let grade = overall_grade(mean);
        let rows = Dimension::ALL
            .iter()
            .map(|d| DimensionRow {
                dimension: *d,
                score: scores.score(*d),
                band: Band::for_score(scores.score(*d)),
                reasoning: scores.reasoning(*d).to_string(),
            })
            .collect::<Vec<_>>();
        let overall = overall.unwrap_or_else(|| overall_narrative(&rows, mean, grade));
        Self {
            scores,
            mean,
            grade,
            rows,
            overall,
        }
    }
}

/// Overall assessment text built from the mean, grade and the strongest and weakest dimensions.
pub fn overall_narrative(rows: &[DimensionRow], mean: u8, grade: OverallGrade) -> String {
    let strongest = rows.iter().max_by_key(|r| r.score);
    let weakest = rows.iter().min_by_key(|r| r.score);
    match (strongest, weakest) {
        (Some(s), Some(w)) if s.score != w.score => format!(
            "{} ({}/100, grade {}). Strongest area: {} ({}). Focus next on {} ({}).",
            grade.message,
            mean,
            grade.letter,
            s.dimension.label(),
            s.score,
            w.dimension.label().to_lowercase(),
            w.score
        ),
        _ => format!(
            "{} ({}/100, grade {}). The idea scores evenly across profitability, demand and execution.",
            grade.message, mean, grade.letter
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breakdown(p: u8, d: u8, e: u8) -> ScoreBreakdown {
        ScoreBreakdown {
            profitability: p,
            demand: d,
            execution: e,
            profitability_reasoning: "p".into(),
            demand_reasoning: "d".into(),
            execution_reasoning: "e".into(),
        }
    }

    #[test]
    fn mean_rounds_to_nearest() {
        assert_eq!(mean_score(&breakdown(82, 77, 65)), 75);
        assert_eq!(mean_score(&breakdown(1, 1, 2)), 1);
        assert_eq!(mean_score(&breakdown(100, 100, 99)), 100);
        assert_eq!(mean_score(&breakdown(70, 70, 71)), 70);
    }

    #[test]
    fn grade_thresholds() {
        let cases = [
            (100, "A+"),
            (85, "A+"),
            (84, "A"),
            (80, "A"),
            (79, "B+"),
            (75, "B+"),
            (74, "B"),
            (70, "B"),
            (69, "B-"),
            (65, "B-"),
            (64, "C+"),
            (60, "C+"),
            (59, "C"),
            (55, "C"),
            (54, "D"),
            (1, "D"),
        ];
        for (mean, letter) in cases {
            assert_eq!(overall_grade(mean).letter, letter, "mean {}", mean);
        }
    }

    #[test]
    fn grade_covers_full_range_monotonically() {
        let order = ["D", "C", "C+", "B-", "B", "B+", "A", "A+"];
        let mut last = 0;
        for mean in 1..=100u8 {
            let idx = order
                .iter()
                .position(|l| *l == overall_grade(mean).letter)
                .unwrap();
            assert!(idx >= last, "grade went down at {}", mean);
            last = idx;
        }
    }

    #[test]
    fn band_thresholds_are_independent_of_grades() {
        assert_eq!(Band::for_score(80), Band::Excellent);
        assert_eq!(Band::for_score(79), Band::Good);
        assert_eq!(Band::for_score(60), Band::Good);
        assert_eq!(Band::for_score(59), Band::NeedsWork);
        assert_eq!(Band::for_score(75).tone(), Tone::Warning);
        assert_eq!(overall_grade(75).tone, Tone::Success);
        assert_eq!(Band::NeedsWork.label(), "Needs Work");
    }

    #[test]
    fn report_for_worked_example() {
        let r = ScoreReport::new(breakdown(82, 77, 65), None);
        assert_eq!(r.mean, 75);
        assert_eq!(r.grade.letter, "B+");
        assert_eq!(r.grade.message, "Very promising");
        let bands: Vec<Band> = r.rows.iter().map(|row| row.band).collect();
        assert_eq!(bands, vec![Band::Excellent, Band::Good, Band::Good]);
        assert!(r.overall.contains("Profitability"));
        assert!(r.overall.contains("ease of execution"));
    }

    #[test]
    fn report_keeps_given_narrative() {
        let r = ScoreReport::new(breakdown(60, 60, 60), Some("custom".into()));
        assert_eq!(r.overall, "custom");
    }

    #[test]
    fn narrative_for_even_scores() {
        let r = ScoreReport::new(breakdown(60, 60, 60), None);
        assert!(r.overall.contains("evenly"));
        assert!(r.overall.contains("C+"));
    }
}
