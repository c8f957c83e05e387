use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

use crate::clock::secs_between;
use crate::metrics::{self, LiveMetrics};
use crate::script::{self, Script, Segmentation};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Normal,
    /// Countdown in whole seconds.
    Timed(u32),
}

impl SessionMode {
    /// `None` and `Some(0)` both mean an untimed session.
    pub fn from_secs(secs: Option<u32>) -> Self {
        match secs {
            Some(s) if s > 0 => SessionMode::Timed(s),
            _ => SessionMode::Normal,
        }
    }

    pub fn duration_secs(self) -> Option<u32> {
        match self {
            SessionMode::Normal => None,
            SessionMode::Timed(s) => Some(s),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Running,
    Completed,
}

/// Final numbers of a completed session, as handed to the completion callback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub wpm: u32,
    pub accuracy: u32,
    pub elapsed_secs: f64,
    pub error_count: usize,
    pub typed_units: usize,
    pub finished_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The whole current value of the input field.
    Input { value: String, at: DateTime<Utc> },
    /// One second of countdown has passed.
    Tick { at: DateTime<Utc> },
    Reset { text: String, mode: SessionMode },
}

/// Side effects the owner of the state must carry out after a step.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Started { at: DateTime<Utc> },
    Finalized(SessionSummary),
    Reset,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub effects: Vec<Effect>,
}

/// Everything one typing attempt knows about itself.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub target_text: String,
    pub typed_so_far: String,
    pub error_positions: BTreeSet<usize>,
    pub started_at: Option<DateTime<Utc>>,
    pub mode: SessionMode,
    pub remaining_seconds: u32,
    pub completed: bool,
    pub script: Script,
    pub segmentation: Segmentation,
    pub summary: Option<SessionSummary>,
    target_units: usize,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(String::new(), SessionMode::Normal, Segmentation::default())
    }
}

impl SessionState {
    pub fn new(target_text: String, mode: SessionMode, segmentation: Segmentation) -> Self {
        let mode = SessionMode::from_secs(mode.duration_secs());
        let script = Script::classify(&target_text);
        Self {
            target_units: script::unit_len(&target_text, script),
            target_text,
            typed_so_far: String::new(),
            error_positions: BTreeSet::new(),
            started_at: None,
            mode,
            remaining_seconds: mode.duration_secs().unwrap_or(0),
            completed: false,
            script,
            segmentation,
            summary: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.completed {
            Phase::Completed
        } else if self.started_at.is_some() {
            Phase::Running
        } else {
            Phase::Idle
        }
    }

    pub fn target_units(&self) -> usize {
        self.target_units
    }

    pub fn typed_units(&self) -> usize {
        script::unit_len(&self.typed_so_far, self.script)
    }

    /// Applies one event and reports what the owner has to do about it.
    pub fn step(mut self, event: SessionEvent) -> Transition {
        let mut effects = Vec::new();
        match event {
            SessionEvent::Input { value, at } => self.on_input(value, at, &mut effects),
            SessionEvent::Tick { at } => self.on_tick(at, &mut effects),
            SessionEvent::Reset { text, mode } => {
                self = SessionState::new(text, mode, self.segmentation);
                effects.push(Effect::Reset);
            }
        }
        Transition {
            state: self,
            effects,
        }
    }

    pub fn live_metrics(&self, now: DateTime<Utc>) -> LiveMetrics {
        if let Some(summary) = self.summary {
            return LiveMetrics {
                wpm: summary.wpm,
                accuracy: summary.accuracy,
                error_count: summary.error_count,
                typed_units: summary.typed_units,
                elapsed_secs: summary.elapsed_secs,
            };
        }

        let typed_units = self.typed_units();
        let error_count = self.error_positions.len();
        let (wpm, elapsed_secs) = match self.started_at {
            Some(start) => {
                let elapsed = secs_between(start, now);
                let wpm =
                    metrics::wpm(&self.typed_so_far, self.script, self.segmentation, elapsed);
                (wpm, elapsed)
            }
            None => (0, 0.0),
        };

        LiveMetrics {
            wpm,
            accuracy: metrics::accuracy(typed_units, error_count),
            error_count,
            typed_units,
            elapsed_secs,
        }
    }

    fn on_input(&mut self, value: String, at: DateTime<Utc>, effects: &mut Vec<Effect>) {
        if self.completed {
            return;
        }

        // shrinking is only allowed as a plain truncation of what is there
        let shrinks = script::unit_len(&value, self.script) < self.typed_units();
        if shrinks && !self.typed_so_far.starts_with(value.as_str()) {
            return;
        }

        if self.started_at.is_none() {
            if value.is_empty() {
                return;
            }
            self.started_at = Some(at);
            effects.push(Effect::Started { at });
        }

        self.typed_so_far = script::truncate_units(&value, self.script, self.target_units).to_string();
        self.error_positions =
            script::mismatches(&self.typed_so_far, &self.target_text, self.script)
                .into_iter()
                .collect();

        let reached_end = self.typed_units() == self.target_units
            && !script::last_unit_pending(&self.typed_so_far, &self.target_text, self.script);
        if self.target_units == 0 || (self.mode == SessionMode::Normal && reached_end) {
            self.finalize(at, effects);
        }
    }

    fn on_tick(&mut self, at: DateTime<Utc>, effects: &mut Vec<Effect>) {
        if self.completed || self.mode == SessionMode::Normal || self.remaining_seconds == 0 {
            return;
        }
        self.remaining_seconds -= 1;
        if self.remaining_seconds == 0 {
            self.finalize(at, effects);
        }
    }

    fn finalize(&mut self, at: DateTime<Utc>, effects: &mut Vec<Effect>) {
        if self.completed {
            return;
        }

        let elapsed_secs = match (self.started_at, self.mode) {
            (Some(start), _) => secs_between(start, at),
            (None, SessionMode::Timed(total)) => f64::from(total - self.remaining_seconds),
            (None, SessionMode::Normal) => 0.0,
        };
        let typed_units = self.typed_units();
        let error_count = self.error_positions.len();

        let summary = SessionSummary {
            wpm: metrics::wpm(
                &self.typed_so_far,
                self.script,
                self.segmentation,
                elapsed_secs,
            ),
            accuracy: metrics::accuracy(typed_units, error_count),
            elapsed_secs,
            error_count,
            typed_units,
            finished_at: at,
        };

        self.completed = true;
        self.summary = Some(summary);
        effects.push(Effect::Finalized(summary));
    }
}
