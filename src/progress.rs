use log::warn;
use serde::{Deserialize, Serialize};

use crate::result::SessionResult;

pub const DEFAULT_WINDOW: usize = 20;
pub const DEFAULT_SPAN: usize = 5;

/// Lower WPM bounds of the feedback tiers. Must be strictly descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierThresholds {
    pub excellent: u32,
    pub great: u32,
    pub good: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            excellent: 70,
            great: 50,
            good: 30,
        }
    }
}

impl TierThresholds {
    pub fn is_valid(&self) -> bool {
        self.excellent > self.great && self.great > self.good
    }

    /// `self` if ordered, the defaults otherwise.
    pub fn validated(self) -> Self {
        if self.is_valid() {
            self
        } else {
            warn!("tier thresholds {self:?} are not descending, using defaults");
            Self::default()
        }
    }

    pub fn classify(&self, wpm: u32) -> FeedbackTier {
        if wpm >= self.excellent {
            FeedbackTier::Excellent
        } else if wpm >= self.great {
            FeedbackTier::Great
        } else if wpm >= self.good {
            FeedbackTier::Good
        } else {
            FeedbackTier::KeepPracticing
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum FeedbackTier {
    #[strum(to_string = "Excellent! You're a typing master!")]
    Excellent,
    #[strum(to_string = "Great job! Keep it up!")]
    Great,
    #[strum(to_string = "Good progress! Practice makes perfect.")]
    Good,
    #[strum(to_string = "Keep practicing! You'll improve.")]
    KeepPracticing,
}

/// One attempt on the progress chart: x is the 1-based position in the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressPoint {
    pub attempt: f64,
    pub wpm: f64,
}

impl From<ProgressPoint> for (f64, f64) {
    fn from(p: ProgressPoint) -> Self {
        (p.attempt, p.wpm)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressReport {
    pub attempts: usize,
    pub recent_mean: f64,
    pub previous_mean: f64,
    /// `recent_mean - previous_mean`; 0 until there is a full previous span.
    pub trend: f64,
    pub latest_wpm: Option<u32>,
    pub tier: Option<FeedbackTier>,
    /// Oldest first.
    pub series: Vec<ProgressPoint>,
    /// Standard deviation of WPM across the window.
    pub consistency: Option<f64>,
}

impl ProgressReport {
    pub fn chart_data(&self) -> Vec<(f64, f64)> {
        self.series.iter().copied().map(Into::into).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressAnalyzer {
    window: usize,
    span: usize,
    tiers: TierThresholds,
}

impl Default for ProgressAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW, DEFAULT_SPAN, TierThresholds::default())
    }
}

impl ProgressAnalyzer {
    pub fn new(window: usize, span: usize, tiers: TierThresholds) -> Self {
        let span = span.max(1);
        Self {
            window: window.max(span),
            span,
            tiers: tiers.validated(),
        }
    }

    pub fn tiers(&self) -> &TierThresholds {
        &self.tiers
    }

    /// Summarizes a newest-first result log.
    pub fn analyze(&self, newest_first: &[SessionResult]) -> ProgressReport {
        let chronological: Vec<f64> = newest_first
            .iter()
            .take(self.window)
            .rev()
            .map(|r| f64::from(r.wpm))
            .collect();

        let split = chronological.len().saturating_sub(self.span);
        let (older, recent) = chronological.split_at(split);
        let previous = &older[older.len().saturating_sub(self.span)..];

        let recent_mean = mean_wpm(recent).unwrap_or(0.0);
        let previous_mean = if previous.len() < self.span {
            recent_mean
        } else {
            mean_wpm(previous).unwrap_or(recent_mean)
        };

        let latest_wpm = newest_first.first().map(|r| r.wpm);

        ProgressReport {
            attempts: chronological.len(),
            recent_mean,
            previous_mean,
            trend: recent_mean - previous_mean,
            latest_wpm,
            tier: latest_wpm.map(|wpm| self.tiers.classify(wpm)),
            series: chronological
                .iter()
                .enumerate()
                .map(|(i, &wpm)| ProgressPoint {
                    attempt: (i + 1) as f64,
                    wpm,
                })
                .collect(),
            consistency: wpm_spread(&chronological),
        }
    }
}

fn mean_wpm(wpms: &[f64]) -> Option<f64> {
    if wpms.is_empty() {
        return None;
    }
    Some(wpms.iter().sum::<f64>() / wpms.len() as f64)
}

/// Population standard deviation; lower means steadier typing.
fn wpm_spread(wpms: &[f64]) -> Option<f64> {
    let mean = mean_wpm(wpms)?;
    let variance = wpms.iter().map(|wpm| (wpm - mean).powi(2)).sum::<f64>() / wpms.len() as f64;
    Some(variance.sqrt())
}
