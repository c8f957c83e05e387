use std::mem;

use log::{debug, info};

use super::state::{Effect, Phase, SessionEvent, SessionMode, SessionState, SessionSummary};
use super::timer::CountdownTimer;
use crate::clock::{Clock, SystemClock};
use crate::corpus::PracticeText;
use crate::metrics::LiveMetrics;
use crate::result::SessionResult;
use crate::script::{self, Segmentation};

type CompletionHandler = Box<dyn FnMut(&SessionSummary)>;

/// Drives one [`SessionState`] from user input, the clock and the countdown.
///
/// Every change goes through [`SessionState::step`]; the engine only carries
/// out the returned effects: arming and cancelling the countdown and calling
/// the completion handler.
pub struct SessionEngine {
    state: SessionState,
    category: String,
    timer: Option<CountdownTimer>,
    clock: Box<dyn Clock>,
    on_complete: Option<CompletionHandler>,
}

impl SessionEngine {
    pub fn new(text: PracticeText, mode: SessionMode) -> Self {
        Self::with_clock(text, mode, SystemClock)
    }

    pub fn with_clock(text: PracticeText, mode: SessionMode, clock: impl Clock + 'static) -> Self {
        Self {
            state: SessionState::new(text.text, mode, Segmentation::default()),
            category: text.category,
            timer: None,
            clock: Box::new(clock),
            on_complete: None,
        }
    }

    pub fn with_segmentation(mut self, segmentation: Segmentation) -> Self {
        self.state.segmentation = segmentation;
        self
    }

    /// Registers the callback invoked exactly once per completed session.
    pub fn on_complete(&mut self, handler: impl FnMut(&SessionSummary) + 'static) {
        self.on_complete = Some(Box::new(handler));
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn timer_armed(&self) -> bool {
        self.timer.is_some()
    }

    pub fn live_metrics(&self) -> LiveMetrics {
        self.state.live_metrics(self.clock.now())
    }

    /// Feeds the full current value of the input field.
    pub fn submit_input(&mut self, value: &str) -> Option<SessionSummary> {
        let at = self.clock.now();
        self.dispatch(SessionEvent::Input {
            value: value.to_string(),
            at,
        })
    }

    pub fn type_char(&mut self, c: char) -> Option<SessionSummary> {
        let mut value = self.state.typed_so_far.clone();
        value.push(c);
        self.submit_input(&value)
    }

    pub fn backspace(&mut self) -> Option<SessionSummary> {
        let value = script::drop_last_unit(&self.state.typed_so_far, self.state.script).to_string();
        self.submit_input(&value)
    }

    /// One countdown tick stamped with the current time.
    ///
    /// For hosts that keep their own one-second schedule. An armed countdown
    /// gives up its next slot, so mixing this with [`Self::poll_timer`] never
    /// counts a second twice.
    pub fn tick(&mut self) -> Option<SessionSummary> {
        let at = self.clock.now();
        if let Some(timer) = self.timer.as_mut() {
            timer.consume_next();
        }
        self.dispatch(SessionEvent::Tick { at })
    }

    /// Delivers every countdown tick that has come due since the last poll.
    pub fn poll_timer(&mut self) -> Option<SessionSummary> {
        let now = self.clock.now();
        let due = match self.timer.as_mut() {
            Some(timer) => timer.due(now),
            None => return None,
        };

        let mut finished = None;
        for at in due {
            if self.timer.is_none() {
                break;
            }
            if let Some(summary) = self.dispatch(SessionEvent::Tick { at }) {
                finished = Some(summary);
            }
        }
        finished
    }

    /// Starts over with a fresh text, possibly switching mode.
    pub fn reset(&mut self, text: PracticeText, mode: SessionMode) {
        self.category = text.category;
        self.dispatch(SessionEvent::Reset {
            text: text.text,
            mode,
        });
    }

    /// The persistable record of the session, once it has completed.
    pub fn finish_result(&self) -> Option<SessionResult> {
        self.state
            .summary
            .as_ref()
            .map(|summary| SessionResult::from_summary(summary, &self.category))
    }

    fn dispatch(&mut self, event: SessionEvent) -> Option<SessionSummary> {
        let transition = mem::take(&mut self.state).step(event);
        self.state = transition.state;

        let mut finished = None;
        for effect in transition.effects {
            match effect {
                Effect::Started { at } => {
                    debug!("session started ({}) at {at}", self.category);
                    if let SessionMode::Timed(_) = self.state.mode {
                        self.timer = Some(CountdownTimer::start(at));
                    }
                }
                Effect::Finalized(summary) => {
                    self.cancel_timer();
                    info!(
                        "session finished: {} wpm, {}% accuracy, {} errors",
                        summary.wpm, summary.accuracy, summary.error_count
                    );
                    if let Some(handler) = self.on_complete.as_mut() {
                        handler(&summary);
                    }
                    finished = Some(summary);
                }
                Effect::Reset => self.cancel_timer(),
            }
        }
        finished
    }

    fn cancel_timer(&mut self) {
        if self.timer.take().is_some() {
            debug!("countdown cancelled");
        }
    }
}
